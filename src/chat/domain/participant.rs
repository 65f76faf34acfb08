//! Conversation directory rows: who participates in which conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ConversationId, UserId};

/// One participant's membership row in a conversation.
///
/// Keyed `(conversation_id, sender_id)` with `sender_id` as the clustering
/// key, supporting "list participants of conversation C" and "does user S
/// participate in C" without a secondary index.
///
/// # Convention
///
/// Membership is stored symmetrically: a two-party conversation holds two
/// rows, one per direction, each naming the counterpart in `receiver_id`.
/// A single directory upsert writes both rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationParticipant {
    /// The conversation this row belongs to; the partition key.
    pub conversation_id: ConversationId,

    /// The participant this row is stored under; the clustering key.
    pub sender_id: UserId,

    /// The counterpart participant.
    pub receiver_id: UserId,

    /// Last activity observed in the conversation when this row was
    /// written.
    pub last_timestamp: DateTime<Utc>,
}

impl ConversationParticipant {
    /// Returns this row's mirror: the same membership seen from the
    /// counterpart's side.
    #[must_use]
    pub const fn mirrored(&self) -> Self {
        Self {
            conversation_id: self.conversation_id,
            sender_id: self.receiver_id,
            receiver_id: self.sender_id,
            last_timestamp: self.last_timestamp,
        }
    }
}
