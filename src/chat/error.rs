//! Error taxonomy for the chat storage core.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants that
//! can be inspected by callers. No failure in this module is fatal to the
//! process; every operation returns a typed result.

use std::sync::Arc;
use thiserror::Error;

use super::domain::{ConversationId, MessageId};

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by the storage components.
///
/// The taxonomy determines retry behaviour:
///
/// - [`StorageError::Unavailable`]: retry with backoff. All operations are
///   safe to retry except a bare [`IdAllocator::next_id`], which is not
///   idempotent.
/// - [`StorageError::NotFound`]: returned to the caller, not retried.
/// - [`StorageError::InvalidArgument`]: rejected before any storage call.
/// - [`StorageError::PartialWrite`]: the send fan-out completed its
///   message-store insert but a later index write failed; the caller must
///   retry the remaining steps or accept bounded staleness.
///
/// [`IdAllocator::next_id`]: super::ports::IdAllocator::next_id
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage node set backing the operation is unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A point lookup targeted a key that holds no row.
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),

    /// The request was malformed and was rejected before reaching storage.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A send fan-out stalled after its message-store insert.
    ///
    /// The message is durable; the index named by `stage` was not updated
    /// and is stale until the caller retries the remaining steps.
    #[error(
        "partial write for message {message_id} in conversation \
         {conversation_id}: {stage} update failed: {source}"
    )]
    PartialWrite {
        /// The conversation whose indexes are stale.
        conversation_id: ConversationId,
        /// The durably stored message the indexes do not yet reflect.
        message_id: MessageId,
        /// The fan-out step that failed.
        stage: &'static str,
        /// The underlying failure.
        source: Box<StorageError>,
    },

    /// The storage engine rejected or failed the operation.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Creates an unavailability error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Returns `true` if the failed operation may be retried as-is.
    ///
    /// Partial writes are retryable in the narrow sense that re-running the
    /// remaining fan-out steps is safe; the message insert itself must not
    /// be repeated with a freshly allocated identifier.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_) | Self::Database(_) | Self::PartialWrite { .. }
        )
    }
}

impl From<diesel::result::Error> for StorageError {
    fn from(err: diesel::result::Error) -> Self {
        // Connection-level failures map to Unavailable so callers back off
        // and retry; everything else is surfaced as a database error.
        match err {
            diesel::result::Error::BrokenTransactionManager => {
                Self::unavailable("database connection lost mid-operation")
            }
            other => Self::database(other),
        }
    }
}

impl From<diesel::r2d2::PoolError> for StorageError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::Unavailable(err.to_string())
    }
}
