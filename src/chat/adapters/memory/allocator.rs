//! In-memory implementation of the `IdAllocator` port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::poisoned;
use crate::chat::{domain::SequenceName, error::StorageResult, ports::IdAllocator};

/// In-memory implementation of [`IdAllocator`].
///
/// One counter per sequence name, serialised behind a [`Mutex`] the way a
/// distributed counter serialises increments internally. Values are
/// strictly increasing and, in this adapter, contiguous; callers must not
/// rely on contiguity, which the production counter does not provide.
#[derive(Debug, Default, Clone)]
pub struct InMemoryIdAllocator {
    counters: Arc<Mutex<HashMap<SequenceName, i64>>>,
}

impl InMemoryIdAllocator {
    /// Creates an allocator with all sequences at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last value issued for a sequence, or zero if the
    /// sequence has never been incremented.
    #[must_use]
    pub fn current(&self, sequence: &SequenceName) -> i64 {
        self.counters
            .lock()
            .map(|guard| guard.get(sequence).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl IdAllocator for InMemoryIdAllocator {
    async fn next_id(&self, sequence: &SequenceName) -> StorageResult<i64> {
        let mut guard = self.counters.lock().map_err(poisoned)?;
        let value = guard.entry(sequence.clone()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}
