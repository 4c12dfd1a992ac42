//! Aggregate roots for the Accounts context.

use eventum_core::aggregate::{AggregateRoot, AggregateState, ApplyFn};
use eventum_core::error::{AggregateError, DomainError};
use thiserror::Error;
use uuid::Uuid;

use super::events::{AccountEvent, AccountOpened, FundsDeposited, FundsWithdrawn};

/// Errors raised by account operations and apply handlers.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Dispatch failure from the aggregate base.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The account has no identity yet; open it first.
    #[error("account is not open")]
    NotOpen,

    /// Deposits and withdrawals must move a positive amount.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The balance does not cover the requested withdrawal.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The current balance in cents.
        balance: u64,
        /// The requested amount in cents.
        requested: u64,
    },
}

impl From<AccountError> for DomainError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Aggregate(inner) => Self::Aggregate(inner),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// The aggregate root for a bank account. Balance is tracked in cents and
/// derived entirely from the event stream.
#[derive(Debug, Default)]
pub struct Account {
    id: Option<Uuid>,
    owner: String,
    balance: u64,
    state: AggregateState<AccountEvent>,
}

impl Account {
    /// Factory operation: opens a new account by applying the first event.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] if the creation event cannot be applied.
    pub fn open(account_id: Uuid, owner: &str) -> Result<Self, AccountError> {
        let mut account = Self::default();
        account.apply(AccountOpened::new(account_id, owner).into())?;
        Ok(account)
    }

    /// Deposits `amount` cents.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotOpen`] on an account without identity or
    /// [`AccountError::InvalidAmount`] for a zero amount.
    pub fn deposit(&mut self, amount: u64) -> Result<(), AccountError> {
        let account_id = self.id.ok_or(AccountError::NotOpen)?;
        if amount == 0 {
            return Err(AccountError::InvalidAmount);
        }
        self.apply(FundsDeposited::new(account_id, amount).into())
    }

    /// Withdraws `amount` cents.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotOpen`], [`AccountError::InvalidAmount`], or
    /// [`AccountError::InsufficientFunds`] if the balance does not cover the
    /// withdrawal.
    pub fn withdraw(&mut self, amount: u64) -> Result<(), AccountError> {
        let account_id = self.id.ok_or(AccountError::NotOpen)?;
        if amount == 0 {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.apply(FundsWithdrawn::new(account_id, amount).into())
    }

    /// The account owner's name.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The current balance in cents.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    fn apply_opened(&mut self, event: &AccountEvent) -> Result<(), AccountError> {
        let AccountEvent::Opened(opened) = event else {
            return Ok(());
        };
        self.id = Some(opened.account_id);
        self.owner.clone_from(&opened.owner);
        Ok(())
    }

    fn apply_deposited(&mut self, event: &AccountEvent) -> Result<(), AccountError> {
        let AccountEvent::Deposited(deposited) = event else {
            return Ok(());
        };
        self.balance += deposited.amount;
        Ok(())
    }

    fn apply_withdrawn(&mut self, event: &AccountEvent) -> Result<(), AccountError> {
        let AccountEvent::Withdrawn(withdrawn) = event else {
            return Ok(());
        };
        self.balance -= withdrawn.amount;
        Ok(())
    }
}

impl AggregateRoot for Account {
    type Event = AccountEvent;
    type Error = AccountError;

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
            "account.opened" => Some(Self::apply_opened),
            "account.funds_deposited" => Some(Self::apply_deposited),
            "account.funds_withdrawn" => Some(Self::apply_withdrawn),
            _ => None,
        }
    }
}
