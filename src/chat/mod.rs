//! Chat storage core: message persistence, ID allocation, and the
//! denormalised read-path indexes.
//!
//! This module implements the data model and access protocol of the
//! messaging backend's storage layer. Four components cooperate, each
//! behind its own port:
//!
//! - [`ports::IdAllocator`]: globally unique, monotonically increasing
//!   integer identifiers backed by a distributed atomic counter
//! - [`ports::MessageStore`]: the system of record for message bodies,
//!   clustered for most-recent-first retrieval per conversation
//! - [`ports::RecentChatsIndex`]: a per-conversation "latest message"
//!   pointer for rendering chat lists without scanning message history
//! - [`ports::ConversationDirectory`]: participant rows plus a
//!   denormalised per-sender index answering "which conversations is
//!   user X in"
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types ([`domain::Message`],
//!   [`domain::ConversationSummary`], [`domain::HistoryCursor`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::MessageStore`] and
//!   friends)
//! - **Adapters**: Concrete implementations
//!   ([`adapters::memory`], [`adapters::postgres`])
//! - **Services**: The send-message fan-out sequencing writes across
//!   components ([`services::ChatService`])
//!
//! # Consistency model
//!
//! There is no in-process locking and there are no cross-table
//! transactions. Every write targets exactly one logical row or partition
//! and is independently atomic at the storage layer; consistency between
//! the message store and the denormalised indexes is eventual. Concurrent
//! upserts to the same conversation race under last-writer-wins.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
