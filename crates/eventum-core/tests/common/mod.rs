//! Shared fixture context for the core contract tests: a small "profile"
//! domain with one event per dispatch scenario.
#![allow(dead_code)]

use eventum_core::aggregate::{AggregateRoot, AggregateState, ApplyFn};
use eventum_core::error::{AggregateError, DomainEventError};
use eventum_core::event::{DomainEvent, EventPayload, Provenance};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Emitted when a profile is created.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileCreated {
    /// The profile identifier.
    pub profile_id: Uuid,
    /// The display name the profile was created with.
    pub display_name: String,
    #[serde(skip)]
    provenance: Provenance,
}

impl ProfileCreated {
    pub fn new(profile_id: Uuid, display_name: &str) -> Self {
        Self {
            profile_id,
            display_name: display_name.to_owned(),
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for ProfileCreated {
    fn event_type(&self) -> &'static str {
        "profile.created"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["profile_id", "display_name"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("ProfileCreated serialization is infallible")
    }
}

impl EventPayload for ProfileCreated {
    fn deserialize(payload: &Value) -> Result<Self, DomainEventError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| DomainEventError::MalformedPayload(e.to_string()))
    }
}

/// Emitted when a profile changes its display name.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileRenamed {
    /// The profile identifier.
    pub profile_id: Uuid,
    /// The new display name.
    pub display_name: String,
    #[serde(skip)]
    provenance: Provenance,
}

impl ProfileRenamed {
    pub fn new(profile_id: Uuid, display_name: &str) -> Self {
        Self {
            profile_id,
            display_name: display_name.to_owned(),
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for ProfileRenamed {
    fn event_type(&self) -> &'static str {
        "profile.renamed"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["profile_id", "display_name"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("ProfileRenamed serialization is infallible")
    }
}

impl EventPayload for ProfileRenamed {
    fn deserialize(payload: &Value) -> Result<Self, DomainEventError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| DomainEventError::MalformedPayload(e.to_string()))
    }
}

/// Emitted when a profile is locked. The fixture aggregate's handler for this
/// event always rejects, standing in for a business rule that fails inside a
/// handler.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileLocked {
    /// The profile identifier.
    pub profile_id: Uuid,
    #[serde(skip)]
    provenance: Provenance,
}

impl ProfileLocked {
    pub fn new(profile_id: Uuid) -> Self {
        Self {
            profile_id,
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for ProfileLocked {
    fn event_type(&self) -> &'static str {
        "profile.locked"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["profile_id"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("ProfileLocked serialization is infallible")
    }
}

/// Emitted when a profile is archived. The fixture aggregate deliberately
/// leaves this event out of its dispatch table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProfileArchived {
    /// The profile identifier.
    pub profile_id: Uuid,
    #[serde(skip)]
    provenance: Provenance,
}

impl ProfileArchived {
    pub fn new(profile_id: Uuid) -> Self {
        Self {
            profile_id,
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for ProfileArchived {
    fn event_type(&self) -> &'static str {
        "profile.archived"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["profile_id"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("ProfileArchived serialization is infallible")
    }
}

/// Event stream type for the fixture aggregate.
#[derive(Debug, Clone)]
pub enum ProfileEvent {
    Created(ProfileCreated),
    Renamed(ProfileRenamed),
    Locked(ProfileLocked),
    Archived(ProfileArchived),
}

impl DomainEvent for ProfileEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Created(e) => e.event_type(),
            Self::Renamed(e) => e.event_type(),
            Self::Locked(e) => e.event_type(),
            Self::Archived(e) => e.event_type(),
        }
    }

    fn properties(&self) -> &'static [&'static str] {
        match self {
            Self::Created(e) => e.properties(),
            Self::Renamed(e) => e.properties(),
            Self::Locked(e) => e.properties(),
            Self::Archived(e) => e.properties(),
        }
    }

    fn provenance(&self) -> &Provenance {
        match self {
            Self::Created(e) => e.provenance(),
            Self::Renamed(e) => e.provenance(),
            Self::Locked(e) => e.provenance(),
            Self::Archived(e) => e.provenance(),
        }
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        match self {
            Self::Created(e) => e.provenance_mut(),
            Self::Renamed(e) => e.provenance_mut(),
            Self::Locked(e) => e.provenance_mut(),
            Self::Archived(e) => e.provenance_mut(),
        }
    }

    fn serialize(&self) -> Value {
        match self {
            Self::Created(e) => e.serialize(),
            Self::Renamed(e) => e.serialize(),
            Self::Locked(e) => e.serialize(),
            Self::Archived(e) => e.serialize(),
        }
    }
}

/// Errors raised by the fixture aggregate's handlers.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Raised on purpose by the `profile.locked` handler.
    #[error("done on purpose")]
    LockRejected,
}

/// Fixture aggregate whose state is a single display name.
#[derive(Debug, Default)]
pub struct Profile {
    id: Option<Uuid>,
    display_name: String,
    state: AggregateState<ProfileEvent>,
}

impl Profile {
    /// Factory operation: creates the profile by applying the first event.
    pub fn create(profile_id: Uuid, display_name: &str) -> Result<Self, ProfileError> {
        let mut profile = Self::default();
        profile.apply(ProfileEvent::Created(ProfileCreated::new(
            profile_id,
            display_name,
        )))?;
        Ok(profile)
    }

    pub fn rename(&mut self, display_name: &str) -> Result<(), ProfileError> {
        let profile_id = self.id.unwrap_or_default();
        self.apply(ProfileEvent::Renamed(ProfileRenamed::new(
            profile_id,
            display_name,
        )))
    }

    pub fn lock(&mut self) -> Result<(), ProfileError> {
        let profile_id = self.id.unwrap_or_default();
        self.apply(ProfileEvent::Locked(ProfileLocked::new(profile_id)))
    }

    pub fn archive(&mut self) -> Result<(), ProfileError> {
        let profile_id = self.id.unwrap_or_default();
        self.apply(ProfileEvent::Archived(ProfileArchived::new(profile_id)))
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    fn apply_created(&mut self, event: &ProfileEvent) -> Result<(), ProfileError> {
        let ProfileEvent::Created(created) = event else {
            return Ok(());
        };
        self.id = Some(created.profile_id);
        self.display_name.clone_from(&created.display_name);
        Ok(())
    }

    fn apply_renamed(&mut self, event: &ProfileEvent) -> Result<(), ProfileError> {
        let ProfileEvent::Renamed(renamed) = event else {
            return Ok(());
        };
        self.display_name.clone_from(&renamed.display_name);
        Ok(())
    }

    fn apply_locked(&mut self, _event: &ProfileEvent) -> Result<(), ProfileError> {
        Err(ProfileError::LockRejected)
    }
}

impl AggregateRoot for Profile {
    type Event = ProfileEvent;
    type Error = ProfileError;

    fn aggregate_id(&self) -> Option<Uuid> {
        self.id
    }

    fn state(&self) -> &AggregateState<Self::Event> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AggregateState<Self::Event> {
        &mut self.state
    }

    fn handler(event_type: &str) -> Option<ApplyFn<Self>> {
        match event_type {
            "profile.created" => Some(Self::apply_created),
            "profile.renamed" => Some(Self::apply_renamed),
            "profile.locked" => Some(Self::apply_locked),
            // profile.archived has no registered handler
            _ => None,
        }
    }
}
