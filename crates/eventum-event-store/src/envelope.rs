//! Conversion between live domain events and store envelopes.
//!
//! Pending events leave an aggregate without identity. Sealing is the commit
//! step where the persistence layer assigns event id, stream position, and the
//! correlation/causation trail exactly once, through the write-once setters.
//! Decoding is the reverse: stored payloads are routed back to concrete events
//! and re-stamped with the envelope identity they were committed with.

use tracing::debug;
use uuid::Uuid;

use eventum_core::clock::Clock;
use eventum_core::error::DomainEventError;
use eventum_core::event::{DomainEvent, EventCodec};
use eventum_core::repository::StoredEvent;

/// Assigns envelope identity to each pending event and converts it to its
/// stored form.
///
/// `base_version` is the aggregate's last committed sequence number; the first
/// sealed event is placed at `base_version + 1`.
///
/// # Errors
///
/// Returns [`DomainEventError::AlreadySet`] if any event already carries
/// identity, which means it was sealed before.
pub fn seal_events<E: DomainEvent>(
    aggregate_id: Uuid,
    base_version: u64,
    correlation_id: Uuid,
    causation_id: Uuid,
    clock: &dyn Clock,
    events: &mut [E],
) -> Result<Vec<StoredEvent>, DomainEventError> {
    let mut stored = Vec::with_capacity(events.len());
    let mut sequence_number = base_version;

    for event in events.iter_mut() {
        sequence_number += 1;
        let event_id = Uuid::new_v4();

        event.set_event_id(event_id)?;
        event.set_version(sequence_number)?;
        event.set_correlation_id(correlation_id)?;
        event.set_causation_id(causation_id)?;

        stored.push(StoredEvent {
            event_id,
            aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.serialize(),
            sequence_number,
            correlation_id,
            causation_id,
            recorded_at: clock.now(),
        });
    }

    debug!(%aggregate_id, sealed = stored.len(), "sealed pending events");
    Ok(stored)
}

/// Decodes a stored stream back into live events, restoring the envelope
/// identity each event was committed with.
///
/// # Errors
///
/// Returns [`DomainEventError::UnknownEventType`] for a tag the codec does not
/// recognize, or forwards payload deserialization failures.
pub fn decode_stream<E>(stored: &[StoredEvent]) -> Result<Vec<E>, DomainEventError>
where
    E: DomainEvent + EventCodec,
{
    let mut events = Vec::with_capacity(stored.len());

    for record in stored {
        let mut event = E::decode(&record.event_type, &record.payload)?;
        // Freshly decoded events have unset identity, so the write-once
        // setters accept the envelope values.
        event.set_event_id(record.event_id)?;
        event.set_version(record.sequence_number)?;
        event.set_correlation_id(record.correlation_id)?;
        event.set_causation_id(record.causation_id)?;
        events.push(event);
    }

    Ok(events)
}
