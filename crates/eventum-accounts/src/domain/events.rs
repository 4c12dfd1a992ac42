//! Domain events for the Accounts context.

use eventum_core::error::DomainEventError;
use eventum_core::event::{DomainEvent, EventCodec, EventPayload, Provenance};
use serde_json::Value;
use uuid::Uuid;

/// Emitted when an account is opened.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AccountOpened {
    /// The account identifier.
    pub account_id: Uuid,
    /// The account owner's name.
    pub owner: String,
    #[serde(skip)]
    provenance: Provenance,
}

impl AccountOpened {
    /// Creates the event with unset provenance.
    #[must_use]
    pub fn new(account_id: Uuid, owner: &str) -> Self {
        Self {
            account_id,
            owner: owner.to_owned(),
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for AccountOpened {
    fn event_type(&self) -> &'static str {
        "account.opened"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["account_id", "owner"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("AccountOpened serialization is infallible")
    }
}

impl EventPayload for AccountOpened {
    fn deserialize(payload: &Value) -> Result<Self, DomainEventError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| DomainEventError::MalformedPayload(e.to_string()))
    }
}

/// Emitted when funds are deposited into an account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FundsDeposited {
    /// The account identifier.
    pub account_id: Uuid,
    /// The deposited amount in cents.
    pub amount: u64,
    #[serde(skip)]
    provenance: Provenance,
}

impl FundsDeposited {
    /// Creates the event with unset provenance.
    #[must_use]
    pub fn new(account_id: Uuid, amount: u64) -> Self {
        Self {
            account_id,
            amount,
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for FundsDeposited {
    fn event_type(&self) -> &'static str {
        "account.funds_deposited"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["account_id", "amount"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("FundsDeposited serialization is infallible")
    }
}

impl EventPayload for FundsDeposited {
    fn deserialize(payload: &Value) -> Result<Self, DomainEventError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| DomainEventError::MalformedPayload(e.to_string()))
    }
}

/// Emitted when funds are withdrawn from an account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FundsWithdrawn {
    /// The account identifier.
    pub account_id: Uuid,
    /// The withdrawn amount in cents.
    pub amount: u64,
    #[serde(skip)]
    provenance: Provenance,
}

impl FundsWithdrawn {
    /// Creates the event with unset provenance.
    #[must_use]
    pub fn new(account_id: Uuid, amount: u64) -> Self {
        Self {
            account_id,
            amount,
            provenance: Provenance::new(),
        }
    }
}

impl DomainEvent for FundsWithdrawn {
    fn event_type(&self) -> &'static str {
        "account.funds_withdrawn"
    }

    fn properties(&self) -> &'static [&'static str] {
        &["account_id", "amount"]
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }

    fn serialize(&self) -> Value {
        serde_json::to_value(self).expect("FundsWithdrawn serialization is infallible")
    }
}

impl EventPayload for FundsWithdrawn {
    fn deserialize(payload: &Value) -> Result<Self, DomainEventError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| DomainEventError::MalformedPayload(e.to_string()))
    }
}

/// Event stream type for the Accounts context.
#[derive(Debug, Clone)]
pub enum AccountEvent {
    /// An account has been opened.
    Opened(AccountOpened),
    /// Funds have been deposited.
    Deposited(FundsDeposited),
    /// Funds have been withdrawn.
    Withdrawn(FundsWithdrawn),
}

impl From<AccountOpened> for AccountEvent {
    fn from(event: AccountOpened) -> Self {
        Self::Opened(event)
    }
}

impl From<FundsDeposited> for AccountEvent {
    fn from(event: FundsDeposited) -> Self {
        Self::Deposited(event)
    }
}

impl From<FundsWithdrawn> for AccountEvent {
    fn from(event: FundsWithdrawn) -> Self {
        Self::Withdrawn(event)
    }
}

impl DomainEvent for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Opened(e) => e.event_type(),
            Self::Deposited(e) => e.event_type(),
            Self::Withdrawn(e) => e.event_type(),
        }
    }

    fn properties(&self) -> &'static [&'static str] {
        match self {
            Self::Opened(e) => e.properties(),
            Self::Deposited(e) => e.properties(),
            Self::Withdrawn(e) => e.properties(),
        }
    }

    fn provenance(&self) -> &Provenance {
        match self {
            Self::Opened(e) => e.provenance(),
            Self::Deposited(e) => e.provenance(),
            Self::Withdrawn(e) => e.provenance(),
        }
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        match self {
            Self::Opened(e) => e.provenance_mut(),
            Self::Deposited(e) => e.provenance_mut(),
            Self::Withdrawn(e) => e.provenance_mut(),
        }
    }

    fn serialize(&self) -> Value {
        match self {
            Self::Opened(e) => e.serialize(),
            Self::Deposited(e) => e.serialize(),
            Self::Withdrawn(e) => e.serialize(),
        }
    }
}

impl EventCodec for AccountEvent {
    const EVENT_TYPES: &'static [&'static str] = &[
        "account.opened",
        "account.funds_deposited",
        "account.funds_withdrawn",
    ];

    fn decode(event_type: &str, payload: &Value) -> Result<Self, DomainEventError> {
        match event_type {
            "account.opened" => AccountOpened::deserialize(payload).map(Self::Opened),
            "account.funds_deposited" => FundsDeposited::deserialize(payload).map(Self::Deposited),
            "account.funds_withdrawn" => FundsWithdrawn::deserialize(payload).map(Self::Withdrawn),
            other => Err(DomainEventError::UnknownEventType(other.to_owned())),
        }
    }
}
