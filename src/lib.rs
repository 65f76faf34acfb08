//! Courier: storage core for a distributed messaging backend.
//!
//! This crate provides the persistence layer that lets many concurrent
//! clients send messages, page through conversation history, and list a
//! user's recent conversations, without global locks or cross-partition
//! transactions.
//!
//! # Architecture
//!
//! Courier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure data-model types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the storage components
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`chat`]: ID allocation, the message store, the recent-chats index,
//!   and the conversation directory

pub mod chat;
