//! Event repository abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stored representation of a committed domain event: the serialized payload
/// plus the envelope identity the persistence layer assigned at commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Event type tag for deserialization routing.
    pub event_type: String,
    /// Serialized event payload (declared domain properties only).
    pub payload: serde_json::Value,
    /// Position within the aggregate stream, starting at 1.
    pub sequence_number: u64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing event/command.
    pub causation_id: Uuid,
    /// When the persistence layer recorded the event.
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

/// Repository trait for loading and appending domain events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Loads all events for a given aggregate, ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Appends new events to an aggregate stream with optimistic concurrency.
    /// `expected_version` is the last sequence number the caller observed;
    /// zero for a fresh stream.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: u64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}
