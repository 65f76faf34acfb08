//! In-memory implementation of the `RecentChatsIndex` port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::poisoned;
use crate::chat::{
    domain::{ConversationId, ConversationSummary},
    error::{StorageError, StorageResult},
    ports::RecentChatsIndex,
};

/// In-memory implementation of [`RecentChatsIndex`].
///
/// One summary row per conversation; upserts overwrite unconditionally,
/// so the last writer to take the lock wins, matching the production
/// last-writer-wins-by-arrival contract. Suitable for unit tests only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecentChatsIndex {
    summaries: Arc<RwLock<HashMap<ConversationId, ConversationSummary>>>,
}

impl InMemoryRecentChatsIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of summarised conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.summaries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no conversation has been summarised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecentChatsIndex for InMemoryRecentChatsIndex {
    async fn upsert_latest(&self, summary: &ConversationSummary) -> StorageResult<()> {
        let mut guard = self.summaries.write().map_err(poisoned)?;
        guard.insert(summary.conversation_id, summary.clone());
        Ok(())
    }

    async fn get_summary(
        &self,
        conversation_id: ConversationId,
    ) -> StorageResult<ConversationSummary> {
        let guard = self.summaries.read().map_err(poisoned)?;
        guard
            .get(&conversation_id)
            .cloned()
            .ok_or(StorageError::NotFound(conversation_id))
    }
}
