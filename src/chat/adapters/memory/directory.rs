//! In-memory implementation of the `ConversationDirectory` port.
//!
//! Holds both the conversation-keyed directory rows and the denormalised
//! per-sender index, updated together (but not atomically) the way the
//! production adapter issues two single-row writes.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::poisoned;
use crate::chat::{
    domain::{ConversationId, ConversationParticipant, UserId},
    error::StorageResult,
    ports::ConversationDirectory,
};

/// In-memory implementation of [`ConversationDirectory`].
///
/// Directory partitions are [`BTreeMap`]s clustered by participant id;
/// the per-sender index maps each user to their conversations with the
/// last activity timestamp. Suitable for unit tests only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConversationDirectory {
    directory: Arc<RwLock<HashMap<ConversationId, BTreeMap<UserId, ConversationParticipant>>>>,
    by_sender: Arc<RwLock<HashMap<UserId, HashMap<ConversationId, DateTime<Utc>>>>>,
}

impl InMemoryConversationDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationDirectory for InMemoryConversationDirectory {
    async fn upsert(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        receiver_id: UserId,
        last_timestamp: DateTime<Utc>,
    ) -> StorageResult<()> {
        let row = ConversationParticipant {
            conversation_id,
            sender_id,
            receiver_id,
            last_timestamp,
        };

        {
            let mut guard = self.directory.write().map_err(poisoned)?;
            let partition = guard.entry(conversation_id).or_default();
            partition.insert(row.sender_id, row.clone());
            partition.insert(row.receiver_id, row.mirrored());
        }

        let mut guard = self.by_sender.write().map_err(poisoned)?;
        for user in [sender_id, receiver_id] {
            guard
                .entry(user)
                .or_default()
                .insert(conversation_id, last_timestamp);
        }

        Ok(())
    }

    async fn list_by_sender(&self, sender_id: UserId) -> StorageResult<Vec<ConversationId>> {
        let guard = self.by_sender.read().map_err(poisoned)?;
        let Some(partition) = guard.get(&sender_id) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(ConversationId, DateTime<Utc>)> =
            partition.iter().map(|(id, ts)| (*id, *ts)).collect();
        // Most recently active first; newest conversation id on ties.
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

        Ok(entries.into_iter().map(|(id, _)| id).collect())
    }

    async fn participants(
        &self,
        conversation_id: ConversationId,
    ) -> StorageResult<Vec<ConversationParticipant>> {
        let guard = self.directory.read().map_err(poisoned)?;
        Ok(guard
            .get(&conversation_id)
            .map(|partition| partition.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_between(
        &self,
        user_a: UserId,
        user_b: UserId,
    ) -> StorageResult<Option<ConversationId>> {
        let by_sender = self.by_sender.read().map_err(poisoned)?;
        let Some(candidates) = by_sender.get(&user_a) else {
            return Ok(None);
        };

        let directory = self.directory.read().map_err(poisoned)?;
        for conversation_id in candidates.keys() {
            let counterpart = directory
                .get(conversation_id)
                .and_then(|partition| partition.get(&user_a))
                .map(|row| row.receiver_id);
            if counterpart == Some(user_b) {
                return Ok(Some(*conversation_id));
            }
        }

        Ok(None)
    }
}
