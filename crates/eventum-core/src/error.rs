//! Domain error types.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Identity field on a domain event that infrastructure assigns exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvenanceField {
    /// The unique event identifier.
    EventId,
    /// The event's position in its aggregate stream.
    Version,
    /// The identifier linking events across a business transaction.
    CorrelationId,
    /// The identifier of the message that caused this event.
    CausationId,
}

impl fmt::Display for ProvenanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EventId => "Event id",
            Self::Version => "Version",
            Self::CorrelationId => "Correlation id",
            Self::CausationId => "Causation id",
        };
        f.write_str(name)
    }
}

/// Errors raised by domain event identity, metadata, and payload operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainEventError {
    /// A write-once identity field already holds a value.
    #[error("{0} can only be set once!")]
    AlreadySet(ProvenanceField),

    /// The metadata collection already contains this key/property pair.
    #[error("Metadata is already set!")]
    DuplicateMetadata,

    /// The property named by a metadata entry is not declared by the event.
    #[error("Can't set metadata on non existing event properties")]
    UnknownProperty,

    /// No metadata entry matches the key/property pair to remove.
    #[error("Can't remove non existent metadata!")]
    MetadataNotFound,

    /// A stored event type tag is not recognized by the decoding codec.
    #[error("unknown event type `{0}`")]
    UnknownEventType(String),

    /// A stored payload does not match the shape the event declares.
    #[error("malformed event payload: {0}")]
    MalformedPayload(String),
}

/// Errors raised by the aggregate dispatch machinery itself.
///
/// Errors raised by apply handlers propagate through `apply` unchanged and
/// only take this shape if the handler chose it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The aggregate's dispatch table has no handler for this event type.
    #[error("no apply handler registered for event type `{0}`")]
    MissingHandler(String),
}

/// Application and infrastructure level error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An aggregate was not found.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Optimistic concurrency conflict.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: u64,
        /// The actual version found.
        actual: u64,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// A domain event contract violation.
    #[error(transparent)]
    Event(#[from] DomainEventError),

    /// An aggregate dispatch failure.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}
