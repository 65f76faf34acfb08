//! The recent-chats summary: a denormalised "latest message" pointer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ConversationId, Message, UserId};

/// The latest-message summary of a conversation.
///
/// One row per conversation, overwritten on every new message, so a chat
/// list renders without scanning the message store. The row is not
/// versioned: concurrent writers race under last-writer-wins by arrival
/// order at the storage layer, not by timestamp value, and the summary may
/// transiently reflect an earlier message. This is an accepted staleness
/// window, not a conflict to resolve with locking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The summarised conversation.
    pub conversation_id: ConversationId,

    /// Sender of the message this summary reflects.
    pub sender_id: UserId,

    /// Receiver of the message this summary reflects.
    pub receiver_id: UserId,

    /// Timestamp of the message this summary reflects.
    pub last_timestamp: DateTime<Utc>,

    /// Body of the message this summary reflects.
    pub last_message: String,
}

impl ConversationSummary {
    /// Builds the summary row reflecting `message`.
    #[must_use]
    pub fn of(message: &Message) -> Self {
        Self {
            conversation_id: message.conversation_id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            last_timestamp: message.timestamp,
            last_message: message.content.clone(),
        }
    }
}
