//! The message entity: the immutable unit of conversation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ConversationId, MessageId, UserId};

/// A message within a conversation.
///
/// Identity is the triple `(conversation_id, timestamp, message_id)`; the
/// identifier alone is unique system-wide, but the full triple is the
/// storage key, which makes re-inserting the same message idempotent.
/// Messages are immutable once written: there is no update or delete path
/// in this core.
///
/// # Invariants
///
/// - `message_id` was allocated by the ID allocator and is never reused
/// - Within a conversation, messages are retrieved most-recent-first:
///   `timestamp` descending, with the higher `message_id` first on
///   timestamp ties (monotonic allocation makes the higher id the later
///   send)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The conversation this message belongs to; the storage partition key.
    pub conversation_id: ConversationId,

    /// When the message was accepted by the storage core.
    pub timestamp: DateTime<Utc>,

    /// Globally unique message identifier.
    pub message_id: MessageId,

    /// The message body.
    pub content: String,

    /// The user who sent the message.
    pub sender_id: UserId,

    /// The user the message was addressed to.
    pub receiver_id: UserId,
}

impl Message {
    /// Returns the recency rank of this message within its conversation.
    ///
    /// Greater rank means more recent. Sorting by this key descending
    /// yields the retrieval order of the message store: timestamp
    /// descending, message identifier breaking ties so the later-allocated
    /// message sorts first.
    #[must_use]
    pub const fn recency(&self) -> (DateTime<Utc>, MessageId) {
        (self.timestamp, self.message_id)
    }
}
