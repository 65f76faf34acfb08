//! Abstract trait interfaces for the storage components.
//!
//! Each of the four components of the storage core is defined as a port so
//! that domain logic and callers remain storage-engine-agnostic. Any
//! engine offering atomic per-row counters, partition-plus-clustering
//! ordered range scans, and single-row upserts can implement them.

mod allocator;
mod directory;
mod messages;
mod recent;

pub use allocator::IdAllocator;
pub use directory::ConversationDirectory;
pub use messages::MessageStore;
pub use recent::RecentChatsIndex;
