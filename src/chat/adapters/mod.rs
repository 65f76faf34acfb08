//! Persistence adapters for the chat storage core.
//!
//! This module provides concrete implementations of the storage ports,
//! following hexagonal architecture principles. Adapters handle all
//! infrastructure concerns while the domain remains pure.
//!
//! # Available Adapters
//!
//! - [`memory`]: Thread-safe in-memory storage for unit testing
//! - [`postgres`]: Production persistence using Diesel ORM over a pooled
//!   `PostgreSQL` connection

pub mod memory;
pub mod postgres;
