//! In-memory implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use eventum_core::error::DomainError;
use eventum_core::repository::{EventRepository, StoredEvent};

/// Event repository that keeps every stream in process memory.
///
/// Suitable for tests and single-process deployments. Access is serialized
/// through a mutex; appends enforce the expected-version check the core's
/// concurrency model delegates to the store.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self
            .streams
            .lock()
            .map_err(|_| DomainError::Infrastructure("event store mutex poisoned".into()))?;

        let events = streams.get(&aggregate_id).cloned().unwrap_or_default();
        debug!(%aggregate_id, count = events.len(), "loaded event stream");
        Ok(events)
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: u64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        let mut streams = self
            .streams
            .lock()
            .map_err(|_| DomainError::Infrastructure("event store mutex poisoned".into()))?;

        let stream = streams.entry(aggregate_id).or_default();
        let actual = stream.last().map_or(0, |event| event.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        stream.extend_from_slice(events);
        debug!(%aggregate_id, appended = events.len(), "appended to event stream");
        Ok(())
    }
}
