//! Port for the recent-chats index.

use async_trait::async_trait;

use crate::chat::{
    domain::{ConversationId, ConversationSummary},
    error::StorageResult,
};

/// A denormalised per-conversation "latest message" pointer, updated after
/// every write to the message store.
#[async_trait]
pub trait RecentChatsIndex: Send + Sync {
    /// Unconditionally overwrites the summary row for the conversation.
    ///
    /// Last-writer-wins by write arrival order at the storage layer, not
    /// by timestamp value: if two writers append to the same conversation
    /// concurrently, the index may end up reflecting the earlier message.
    /// Re-applying the same summary is idempotent, so re-delivery after a
    /// retry is safe.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage is unreachable;
    /// safe to retry.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn upsert_latest(&self, summary: &ConversationSummary) -> StorageResult<()>;

    /// Point lookup of a conversation's summary.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the conversation has no
    /// messages yet; this is returned to the caller, not retried.
    ///
    /// [`StorageError::NotFound`]: crate::chat::error::StorageError::NotFound
    async fn get_summary(
        &self,
        conversation_id: ConversationId,
    ) -> StorageResult<ConversationSummary>;
}
