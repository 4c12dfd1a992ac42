//! Eventum Event Store — in-memory event persistence.
//!
//! Implements the repository side of the event-sourcing contract: sealing
//! pending events with commit-time identity and keeping per-aggregate streams
//! with optimistic concurrency.

pub mod envelope;
pub mod memory_event_repository;

pub use envelope::{decode_stream, seal_events};
pub use memory_event_repository::InMemoryEventRepository;
