//! `PostgreSQL` implementations of the storage ports using Diesel ORM.
//!
//! The relational layout preserves the logical schema of the storage
//! core: `counter`, `messages`, `user_conversations`, `conversation`, and
//! `sender_conversations`, keyed so the hot queries are single-partition
//! reads. Blocking Diesel work is offloaded to a dedicated thread pool;
//! the write-acknowledgement level is a pool-wide session setting taken
//! from [`StorageConfig`](crate::chat::config::StorageConfig), not
//! hardcoded.

mod allocator;
mod directory;
mod messages;
mod models;
mod pool;
mod recent;
mod schema;

pub use allocator::PostgresIdAllocator;
pub use directory::PostgresConversationDirectory;
pub use messages::PostgresMessageStore;
pub use pool::{PgPool, build_pool};
pub use recent::PostgresRecentChatsIndex;
