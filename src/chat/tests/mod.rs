//! Unit tests for the chat storage core.
//!
//! Tests are organised by component, covering the ordering and pagination
//! contracts of the message store, counter uniqueness under concurrency,
//! last-writer-wins index semantics, directory symmetry, and the
//! send-message fan-out including partial-write surfacing.

mod fixtures;

mod allocator_tests;
mod domain_tests;
mod service_tests;
