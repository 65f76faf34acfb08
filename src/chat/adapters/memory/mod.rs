//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing without database dependencies. They honour the same
//! contracts as the `PostgreSQL` adapters, including last-writer-wins
//! upserts and the non-idempotent counter increment.

mod allocator;
mod directory;
mod messages;
mod recent;

pub use allocator::InMemoryIdAllocator;
pub use directory::InMemoryConversationDirectory;
pub use messages::InMemoryMessageStore;
pub use recent::InMemoryRecentChatsIndex;

use std::sync::PoisonError;

use crate::chat::error::StorageError;

/// Maps a poisoned-lock failure onto the storage taxonomy.
///
/// A poisoned lock means a writer panicked mid-operation; the adapter is
/// in an unknown state and callers should treat it as unreachable.
fn poisoned<G>(_: PoisonError<G>) -> StorageError {
    StorageError::unavailable("in-memory store lock poisoned")
}
