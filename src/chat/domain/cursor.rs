//! Cursor-driven pagination over conversation history.
//!
//! History reads are resumed from the position of the last row returned
//! rather than from an offset, so pages stay exact even while new messages
//! arrive at the head of the conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Message, MessageId};

/// Resumption point for a history scan.
///
/// A cursor names the last message the caller has already observed; the
/// next page contains only strictly older messages. Carrying the message
/// identifier alongside the timestamp keeps pagination exact when several
/// messages share a timestamp (same-millisecond sends).
///
/// A cursor is valid indefinitely: history is immutable, so a scan can be
/// restarted from any previously observed cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryCursor {
    /// Only messages with a strictly older position are returned.
    pub before_timestamp: DateTime<Utc>,

    /// Tie-break at timestamp collisions: among messages sharing
    /// `before_timestamp`, only those with a smaller identifier (earlier
    /// sends) are returned.
    pub before_message_id: MessageId,
}

impl HistoryCursor {
    /// Creates a cursor from an explicit position.
    #[must_use]
    pub const fn new(before_timestamp: DateTime<Utc>, before_message_id: MessageId) -> Self {
        Self {
            before_timestamp,
            before_message_id,
        }
    }

    /// Creates the cursor that resumes a scan after `message`.
    #[must_use]
    pub const fn after(message: &Message) -> Self {
        Self::new(message.timestamp, message.message_id)
    }

    /// Returns `true` if `message` lies strictly beyond this cursor, i.e.
    /// is older than the position the cursor names.
    #[must_use]
    pub fn admits(&self, message: &Message) -> bool {
        message.recency() < (self.before_timestamp, self.before_message_id)
    }
}

/// One page of conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage {
    /// Messages in retrieval order: most recent first.
    pub messages: Vec<Message>,

    /// `true` iff a message older than the last one returned exists, so
    /// another page is available.
    pub has_more: bool,
}

impl HistoryPage {
    /// An empty final page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            messages: Vec::new(),
            has_more: false,
        }
    }

    /// Returns the cursor resuming the scan after this page, or `None` if
    /// the page is empty or final.
    #[must_use]
    pub fn next_cursor(&self) -> Option<HistoryCursor> {
        if !self.has_more {
            return None;
        }
        self.messages.last().map(HistoryCursor::after)
    }
}
