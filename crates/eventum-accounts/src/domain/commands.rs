//! Commands for the Accounts context.

use eventum_core::command::Command;
use uuid::Uuid;

/// Command to open a new account.
#[derive(Debug, Clone)]
pub struct OpenAccount {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
    /// The account owner's name.
    pub owner: String,
}

impl Command for OpenAccount {
    fn command_type(&self) -> &'static str {
        "account.open"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to deposit funds into an account.
#[derive(Debug, Clone)]
pub struct DepositFunds {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
    /// The amount in cents.
    pub amount: u64,
}

impl Command for DepositFunds {
    fn command_type(&self) -> &'static str {
        "account.deposit_funds"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to withdraw funds from an account.
#[derive(Debug, Clone)]
pub struct WithdrawFunds {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The account identifier.
    pub account_id: Uuid,
    /// The amount in cents.
    pub amount: u64,
}

impl Command for WithdrawFunds {
    fn command_type(&self) -> &'static str {
        "account.withdraw_funds"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
