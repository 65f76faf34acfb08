//! Port for the message store: the system of record for message bodies.

use async_trait::async_trait;

use crate::chat::{
    domain::{ConversationId, HistoryCursor, HistoryPage, Message},
    error::StorageResult,
};

/// The system of record for message bodies, keyed for ordered retrieval
/// per conversation.
///
/// One logical partition per conversation, unbounded growth over time; the
/// hot retrieval path (most-recent-first) aligns with the physical
/// clustering order. The store never cascades: updating the recent-chats
/// index and the conversation directory after an append is the caller's
/// responsibility, and consistency between them is eventual.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Inserts one immutable message row.
    ///
    /// Identity is the full key triple `(conversation_id, timestamp,
    /// message_id)`, supplied by the caller via the ID allocator, so the
    /// insert is idempotent and safe to retry. Concurrent appends to the
    /// same conversation never conflict: distinct messages occupy distinct
    /// clustering keys.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the underlying storage
    /// node set is unreachable; retry with backoff.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn append(&self, message: &Message) -> StorageResult<()>;

    /// Returns up to `limit` messages older than `cursor`, most recent
    /// first.
    ///
    /// With no cursor, the scan starts from the newest message. Ordering
    /// is timestamp descending with the higher message identifier first on
    /// timestamp ties (the later-allocated message is the later send).
    /// `has_more` on the returned page is `true` iff a message older than
    /// the last returned one exists; [`HistoryPage::next_cursor`] resumes
    /// the scan. The sequence is lazy, finite, forward-only, and
    /// restartable from any previously observed cursor.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidArgument`] if `limit` is zero,
    /// before any storage call is made.
    ///
    /// [`StorageError::InvalidArgument`]: crate::chat::error::StorageError::InvalidArgument
    async fn fetch_history(
        &self,
        conversation_id: ConversationId,
        cursor: Option<HistoryCursor>,
        limit: usize,
    ) -> StorageResult<HistoryPage>;
}
