//! Shared fixtures and helpers for the chat storage tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::chat::domain::{ConversationId, Message, MessageId, UserId};

/// A clock advancing one second on every reading, for tests that need
/// distinct, ordered timestamps.
#[derive(Debug)]
pub(super) struct SteppingClock {
    base: DateTime<Utc>,
    readings: AtomicI64,
}

impl SteppingClock {
    pub(super) fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            base,
            readings: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let step = self.readings.fetch_add(1, Ordering::SeqCst);
        self.base + chrono::Duration::seconds(step)
    }
}

/// A timestamp `secs` seconds into 2024.
pub(super) fn ts(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(secs)
}

/// Builds a message with shorthand integer identifiers.
pub(super) fn make_message(
    conversation: i64,
    message: i64,
    timestamp: DateTime<Utc>,
    sender: i64,
    receiver: i64,
    content: &str,
) -> Message {
    Message {
        conversation_id: ConversationId::new(conversation),
        timestamp,
        message_id: MessageId::new(message),
        content: content.to_owned(),
        sender_id: UserId::new(sender),
        receiver_id: UserId::new(receiver),
    }
}
