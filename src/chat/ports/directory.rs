//! Port for the conversation directory and its per-sender index.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::chat::{
    domain::{ConversationId, ConversationParticipant, UserId},
    error::StorageResult,
};

/// Maps conversations to their participants and last-activity timestamps.
///
/// The directory itself is partitioned by conversation, which answers
/// "who participates in conversation C" but not "which conversations is
/// user X in". The latter query is served by a denormalised per-sender
/// index maintained alongside the directory rows; implementations keep
/// both in step within a single `upsert` call (two single-row writes, no
/// transaction).
#[async_trait]
pub trait ConversationDirectory: Send + Sync {
    /// Overwrites the membership rows for a conversation.
    ///
    /// Membership is stored symmetrically: one row per participant, each
    /// naming the counterpart, plus one per-sender index row per
    /// participant. Idempotent, last-writer-wins under concurrency with
    /// the same contract as the recent-chats index.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage is unreachable;
    /// safe to retry.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn upsert(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        receiver_id: UserId,
        last_timestamp: DateTime<Utc>,
    ) -> StorageResult<()>;

    /// Lists the conversations a user participates in, most recently
    /// active first.
    ///
    /// Served from the per-sender index: a single-partition read, no
    /// filtering scan over the directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage is unreachable.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn list_by_sender(&self, sender_id: UserId) -> StorageResult<Vec<ConversationId>>;

    /// Lists the participant rows of a conversation, clustering order
    /// (participant id ascending).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage is unreachable.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn participants(
        &self,
        conversation_id: ConversationId,
    ) -> StorageResult<Vec<ConversationParticipant>>;

    /// Finds the conversation between two users, if one exists.
    ///
    /// Symmetric in its arguments. Used by the send path to reuse an
    /// existing conversation instead of allocating a new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage is unreachable.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn find_between(
        &self,
        user_a: UserId,
        user_b: UserId,
    ) -> StorageResult<Option<ConversationId>>;
}
