//! Port for globally unique identifier allocation.

use async_trait::async_trait;

use crate::chat::{domain::SequenceName, error::StorageResult};

/// Issues globally unique, monotonically increasing integer identifiers
/// from named counter sequences.
///
/// # Contract
///
/// - Every successful call returns a value strictly greater than every
///   value previously returned for the same sequence, across all
///   concurrent callers. Values need not be contiguous.
/// - The underlying increment is commutative: the order in which
///   concurrent callers land does not affect uniqueness.
/// - The operation is **not** idempotent. After an ambiguous failure (a
///   timeout whose outcome is unknown) a retry may skip a value or, if the
///   original increment did land, consume two. Callers needing
///   exactly-once identifiers must tolerate gaps or layer a deduplication
///   token on top; this port guarantees neither.
/// - Counters are never decremented, reset, or deleted.
#[async_trait]
pub trait IdAllocator: Send + Sync {
    /// Increments the named counter and returns the new value.
    ///
    /// A sequence that has never been incremented starts at zero, so the
    /// first returned value is 1.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the counter's storage
    /// node set is unreachable. Retrying after such a failure is the one
    /// operation in this core that is *not* safe: the outcome of the
    /// original increment may be unknown.
    ///
    /// [`StorageError::Unavailable`]: crate::chat::error::StorageError::Unavailable
    async fn next_id(&self, sequence: &SequenceName) -> StorageResult<i64>;
}
