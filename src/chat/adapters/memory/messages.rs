//! In-memory implementation of the `MessageStore` port.
//!
//! Stores each conversation as an ordered partition keyed by recency, so
//! history scans walk the same order the production clustering provides.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::poisoned;
use crate::chat::{
    domain::{ConversationId, HistoryCursor, HistoryPage, Message, MessageId},
    error::{StorageError, StorageResult},
    ports::MessageStore,
};

/// Partition-local clustering key: iterating a partition in ascending key
/// order yields timestamp descending, later-allocated message id first on
/// ties.
type ClusterKey = (Reverse<DateTime<Utc>>, Reverse<MessageId>);

const fn cluster_key(timestamp: DateTime<Utc>, message_id: MessageId) -> ClusterKey {
    (Reverse(timestamp), Reverse(message_id))
}

/// In-memory implementation of [`MessageStore`].
///
/// Thread-safe via an internal [`RwLock`]; one [`BTreeMap`] per
/// conversation stands in for a storage partition. Suitable for unit
/// tests only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageStore {
    partitions: Arc<RwLock<HashMap<ConversationId, BTreeMap<ClusterKey, Message>>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of messages stored for a conversation.
    #[must_use]
    pub fn partition_len(&self, conversation_id: ConversationId) -> usize {
        self.partitions
            .read()
            .map(|guard| guard.get(&conversation_id).map_or(0, BTreeMap::len))
            .unwrap_or(0)
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: &Message) -> StorageResult<()> {
        let mut guard = self.partitions.write().map_err(poisoned)?;
        guard
            .entry(message.conversation_id)
            .or_default()
            .insert(cluster_key(message.timestamp, message.message_id), message.clone());
        Ok(())
    }

    async fn fetch_history(
        &self,
        conversation_id: ConversationId,
        cursor: Option<HistoryCursor>,
        limit: usize,
    ) -> StorageResult<HistoryPage> {
        if limit == 0 {
            return Err(StorageError::invalid_argument("limit must be positive"));
        }

        let guard = self.partitions.read().map_err(poisoned)?;
        let Some(partition) = guard.get(&conversation_id) else {
            return Ok(HistoryPage::empty());
        };

        // Positions strictly after the cursor key are strictly older
        // messages.
        let lower = cursor.map_or(Bound::Unbounded, |c| {
            Bound::Excluded(cluster_key(c.before_timestamp, c.before_message_id))
        });

        let mut messages: Vec<Message> = partition
            .range((lower, Bound::Unbounded))
            .take(limit.saturating_add(1))
            .map(|(_, message)| message.clone())
            .collect();

        let has_more = messages.len() > limit;
        messages.truncate(limit);

        Ok(HistoryPage { messages, has_more })
    }
}
