//! Services sequencing operations across the storage components.
//!
//! The storage ports are independently callable; these services provide
//! the canonical call sequences (the send-message fan-out and the read
//! paths) for the transport layer sitting above this core.

mod chat_service;

pub use chat_service::ChatService;
