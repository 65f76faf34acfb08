//! The send-message fan-out and read-path sequencing.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, warn};

use crate::chat::{
    domain::{
        ConversationId, ConversationSummary, HistoryCursor, HistoryPage, Message, MessageId,
        SequenceName, UserId,
    },
    error::{StorageError, StorageResult},
    ports::{ConversationDirectory, IdAllocator, MessageStore, RecentChatsIndex},
};

/// Sequences calls across the four storage components.
///
/// Sending a message runs the canonical fan-out: allocate identifiers,
/// append to the message store, then update the recent-chats index and
/// the conversation directory. The steps are not transactional; a failure
/// after the append surfaces as [`StorageError::PartialWrite`] naming the
/// step that failed, so the caller can retry the remaining updates (all
/// idempotent) or accept bounded staleness of the indexes.
///
/// All entities are created lazily: a conversation's first message writes
/// the first row of every table that mentions it.
pub struct ChatService {
    allocator: Arc<dyn IdAllocator>,
    store: Arc<dyn MessageStore>,
    recent: Arc<dyn RecentChatsIndex>,
    directory: Arc<dyn ConversationDirectory>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl ChatService {
    /// Creates a service over the given component implementations.
    #[must_use]
    pub fn new(
        allocator: Arc<dyn IdAllocator>,
        store: Arc<dyn MessageStore>,
        recent: Arc<dyn RecentChatsIndex>,
        directory: Arc<dyn ConversationDirectory>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            allocator,
            store,
            recent,
            directory,
            clock,
        }
    }

    /// Sends a message from `sender_id` to `receiver_id`.
    ///
    /// Reuses the existing conversation between the two users or allocates
    /// a new conversation identifier, allocates a message identifier,
    /// appends the message, and fans out to the recent-chats index and
    /// the directory. Returns the stored message.
    ///
    /// # Errors
    ///
    /// - [`StorageError::InvalidArgument`] if `content` is empty.
    /// - [`StorageError::PartialWrite`] if the append succeeded but an
    ///   index update failed; the message is durable and the caller should
    ///   retry the remaining steps.
    /// - Any error from the allocator or the append itself; retrying the
    ///   whole send after an ambiguous allocator failure may leave a gap
    ///   in the identifier sequence, which callers must tolerate.
    pub async fn send_message(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        content: impl Into<String>,
    ) -> StorageResult<Message> {
        let body = content.into();
        if body.is_empty() {
            return Err(StorageError::invalid_argument("message content is empty"));
        }

        let conversation_id = self.resolve_conversation(sender_id, receiver_id).await?;
        let message_id = MessageId::new(self.allocator.next_id(&SequenceName::messages()).await?);

        let message = Message {
            conversation_id,
            timestamp: self.clock.utc(),
            message_id,
            content: body,
            sender_id,
            receiver_id,
        };

        self.store.append(&message).await?;
        self.fan_out(&message).await?;

        Ok(message)
    }

    /// Retries the index updates for a message whose send previously
    /// returned [`StorageError::PartialWrite`].
    ///
    /// Both updates are idempotent overwrites, so re-applying an update
    /// that already landed is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PartialWrite`] again if an update still
    /// fails.
    pub async fn complete_fan_out(&self, message: &Message) -> StorageResult<()> {
        self.fan_out(message).await
    }

    /// Returns one page of a conversation's history, most recent first.
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] if the conversation has no messages.
    /// - [`StorageError::InvalidArgument`] if `limit` is zero.
    pub async fn conversation_history(
        &self,
        conversation_id: ConversationId,
        cursor: Option<HistoryCursor>,
        limit: usize,
    ) -> StorageResult<HistoryPage> {
        if limit == 0 {
            return Err(StorageError::invalid_argument("limit must be positive"));
        }

        // Absent summary means the conversation has never seen a message.
        self.recent.get_summary(conversation_id).await?;

        self.store
            .fetch_history(conversation_id, cursor, limit)
            .await
    }

    /// Returns the summaries of a user's conversations, most recently
    /// active first.
    ///
    /// A directory entry whose summary row is missing (an in-flight send's
    /// staleness window) is skipped rather than failing the listing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage is unreachable.
    pub async fn recent_chats(&self, user_id: UserId) -> StorageResult<Vec<ConversationSummary>> {
        let ids = self.directory.list_by_sender(user_id).await?;

        let mut summaries = Vec::with_capacity(ids.len());
        for conversation_id in ids {
            match self.recent.get_summary(conversation_id).await {
                Ok(summary) => summaries.push(summary),
                Err(StorageError::NotFound(_)) => {
                    debug!(%conversation_id, "directory entry without summary, skipping");
                }
                Err(other) => return Err(other),
            }
        }

        Ok(summaries)
    }

    async fn resolve_conversation(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> StorageResult<ConversationId> {
        if let Some(existing) = self.directory.find_between(sender_id, receiver_id).await? {
            return Ok(existing);
        }

        let id = self.allocator.next_id(&SequenceName::conversations()).await?;
        let conversation_id = ConversationId::new(id);
        debug!(%conversation_id, %sender_id, %receiver_id, "allocated new conversation");
        Ok(conversation_id)
    }

    async fn fan_out(&self, message: &Message) -> StorageResult<()> {
        if let Err(source) = self.recent.upsert_latest(&ConversationSummary::of(message)).await {
            return Err(partial(message, "recent-chats index", source));
        }

        if let Err(source) = self
            .directory
            .upsert(
                message.conversation_id,
                message.sender_id,
                message.receiver_id,
                message.timestamp,
            )
            .await
        {
            return Err(partial(message, "conversation directory", source));
        }

        Ok(())
    }
}

fn partial(message: &Message, stage: &'static str, source: StorageError) -> StorageError {
    warn!(
        conversation_id = %message.conversation_id,
        message_id = %message.message_id,
        stage,
        "send fan-out left indexes stale"
    );
    StorageError::PartialWrite {
        conversation_id: message.conversation_id,
        message_id: message.message_id,
        stage,
        source: Box::new(source),
    }
}
