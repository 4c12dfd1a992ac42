//! Domain event abstractions.
//!
//! A domain event is an immutable record of a state change. The event's
//! identity and provenance (event id, stream version, correlation and
//! causation ids) are assigned by the persistence layer exactly once at
//! commit time; [`Provenance`] enforces the write-once rule so a second
//! assignment fails loudly instead of silently overwriting provenance.

use serde_json::Value;
use uuid::Uuid;

use crate::error::{DomainEventError, ProvenanceField};

/// A metadata entry tagging one of the event's declared properties with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// The metadata key.
    pub key: String,
    /// The declared event property the entry references.
    pub property: String,
}

/// Write-once identity fields plus the metadata collection, embedded by every
/// concrete event type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    event_id: Option<Uuid>,
    version: Option<u64>,
    correlation_id: Option<Uuid>,
    causation_id: Option<Uuid>,
    metadata: Vec<MetadataEntry>,
}

fn write_once<T>(
    slot: &mut Option<T>,
    value: T,
    field: ProvenanceField,
) -> Result<(), DomainEventError> {
    if slot.is_some() {
        return Err(DomainEventError::AlreadySet(field));
    }
    *slot = Some(value);
    Ok(())
}

impl Provenance {
    /// Creates an unset provenance block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The unique event identifier, if assigned.
    #[must_use]
    pub fn event_id(&self) -> Option<Uuid> {
        self.event_id
    }

    /// The event's position in its aggregate stream, if assigned.
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    /// The correlation identifier, if assigned.
    #[must_use]
    pub fn correlation_id(&self) -> Option<Uuid> {
        self.correlation_id
    }

    /// The causation identifier, if assigned.
    #[must_use]
    pub fn causation_id(&self) -> Option<Uuid> {
        self.causation_id
    }

    /// Assigns the event identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] if the field was assigned
    /// before, regardless of the value.
    pub fn set_event_id(&mut self, event_id: Uuid) -> Result<(), DomainEventError> {
        write_once(&mut self.event_id, event_id, ProvenanceField::EventId)
    }

    /// Assigns the stream version.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] if the field was assigned
    /// before, regardless of the value.
    pub fn set_version(&mut self, version: u64) -> Result<(), DomainEventError> {
        write_once(&mut self.version, version, ProvenanceField::Version)
    }

    /// Assigns the correlation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] if the field was assigned
    /// before, regardless of the value.
    pub fn set_correlation_id(&mut self, correlation_id: Uuid) -> Result<(), DomainEventError> {
        write_once(
            &mut self.correlation_id,
            correlation_id,
            ProvenanceField::CorrelationId,
        )
    }

    /// Assigns the causation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] if the field was assigned
    /// before, regardless of the value.
    pub fn set_causation_id(&mut self, causation_id: Uuid) -> Result<(), DomainEventError> {
        write_once(
            &mut self.causation_id,
            causation_id,
            ProvenanceField::CausationId,
        )
    }

    /// Read-only view of the metadata collection, in insertion order.
    #[must_use]
    pub fn metadata(&self) -> &[MetadataEntry] {
        &self.metadata
    }

    // Property existence is validated by `DomainEvent::add_metadata`, which
    // knows the concrete event's declared properties.
    pub(crate) fn push_metadata(&mut self, entry: MetadataEntry) -> Result<(), DomainEventError> {
        if self.metadata.contains(&entry) {
            return Err(DomainEventError::DuplicateMetadata);
        }
        self.metadata.push(entry);
        Ok(())
    }

    pub(crate) fn remove_metadata(
        &mut self,
        key: &str,
        property: &str,
    ) -> Result<(), DomainEventError> {
        let position = self
            .metadata
            .iter()
            .position(|entry| entry.key == key && entry.property == property)
            .ok_or(DomainEventError::MetadataNotFound)?;
        self.metadata.remove(position);
        Ok(())
    }
}

/// Trait that all domain events implement.
///
/// Concrete events embed a [`Provenance`] block and expose it through the
/// accessor pair; the identity and metadata operations are provided once here.
/// Per-context event enums implement this trait by delegating each method to
/// the active variant.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Stable tag identifying the concrete event, used for handler dispatch
    /// and store routing.
    fn event_type(&self) -> &'static str;

    /// The event's declared domain properties, in serialization order.
    fn properties(&self) -> &'static [&'static str];

    /// The embedded provenance block.
    fn provenance(&self) -> &Provenance;

    /// Mutable access to the embedded provenance block.
    fn provenance_mut(&mut self) -> &mut Provenance;

    /// Serializes the declared domain properties to a JSON object.
    ///
    /// Identity fields and the metadata collection never participate; they
    /// belong to the store envelope, not the payload.
    fn serialize(&self) -> Value;

    /// Assigns the event identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] on any call after the first.
    fn set_event_id(&mut self, event_id: Uuid) -> Result<(), DomainEventError> {
        self.provenance_mut().set_event_id(event_id)
    }

    /// Assigns the event's position in its aggregate stream.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] on any call after the first.
    fn set_version(&mut self, version: u64) -> Result<(), DomainEventError> {
        self.provenance_mut().set_version(version)
    }

    /// Assigns the correlation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] on any call after the first.
    fn set_correlation_id(&mut self, correlation_id: Uuid) -> Result<(), DomainEventError> {
        self.provenance_mut().set_correlation_id(correlation_id)
    }

    /// Assigns the causation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::AlreadySet`] on any call after the first.
    fn set_causation_id(&mut self, causation_id: Uuid) -> Result<(), DomainEventError> {
        self.provenance_mut().set_causation_id(causation_id)
    }

    /// Appends a metadata entry referencing one of the declared properties.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::UnknownProperty`] if `property` is not a
    /// declared property of this event, or
    /// [`DomainEventError::DuplicateMetadata`] if an identical entry exists.
    fn add_metadata(&mut self, key: &str, property: &str) -> Result<(), DomainEventError> {
        if !self.properties().contains(&property) {
            return Err(DomainEventError::UnknownProperty);
        }
        self.provenance_mut().push_metadata(MetadataEntry {
            key: key.to_owned(),
            property: property.to_owned(),
        })
    }

    /// Removes the metadata entry matching the key/property pair.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::MetadataNotFound`] if no entry matches.
    fn remove_metadata(&mut self, key: &str, property: &str) -> Result<(), DomainEventError> {
        self.provenance_mut().remove_metadata(key, property)
    }

    /// Read-only snapshot of the metadata collection, in insertion order.
    fn metadata(&self) -> &[MetadataEntry] {
        self.provenance().metadata()
    }
}

/// The reconstruction half of the serialization boundary.
///
/// Kept separate from [`DomainEvent`] so per-context event enums can delegate
/// `DomainEvent` to their variants while payload reconstruction stays on the
/// concrete types. Deserializing on a type always yields that type.
pub trait EventPayload: DomainEvent + Sized {
    /// Reconstructs the event from its serialized domain properties.
    ///
    /// Identity fields and metadata come back unset; they are restored from
    /// the store envelope, not the payload.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::MalformedPayload`] if the payload does not
    /// match the properties this event declares.
    fn deserialize(payload: &Value) -> Result<Self, DomainEventError>;
}

/// Routes stored payloads back to the event type of an aggregate's stream.
pub trait EventCodec: Sized {
    /// The event type tags this codec recognizes.
    const EVENT_TYPES: &'static [&'static str];

    /// Decodes a stored payload by its event type tag.
    ///
    /// # Errors
    ///
    /// Returns [`DomainEventError::UnknownEventType`] if `event_type` is not
    /// one of [`Self::EVENT_TYPES`], or forwards the deserialization error of
    /// the matched event type.
    fn decode(event_type: &str, payload: &Value) -> Result<Self, DomainEventError>;
}
