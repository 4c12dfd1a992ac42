//! Command handlers for the Accounts context.
//!
//! Application-level functions that orchestrate domain logic: load the
//! aggregate, execute the command, seal the resulting events with commit-time
//! identity, and persist them.

use eventum_core::aggregate::AggregateRoot;
use eventum_core::clock::Clock;
use eventum_core::command::Command;
use eventum_core::error::DomainError;
use eventum_core::repository::{EventRepository, StoredEvent};
use eventum_event_store::{decode_stream, seal_events};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::Account;
use crate::domain::commands::{DepositFunds, OpenAccount, WithdrawFunds};
use crate::domain::events::AccountEvent;

/// Reconstitutes an `Account` from its stored event stream.
///
/// # Errors
///
/// Returns [`DomainError::AggregateNotFound`] for an empty stream, or forwards
/// decoding and replay failures.
pub(crate) async fn load_account(
    repo: &dyn EventRepository,
    account_id: Uuid,
) -> Result<Account, DomainError> {
    let stored = repo.load_events(account_id).await?;
    if stored.is_empty() {
        return Err(DomainError::AggregateNotFound(account_id));
    }
    let history = decode_stream::<AccountEvent>(&stored)?;
    let account = Account::replay(history)?;
    Ok(account)
}

/// Seals the aggregate's pending events and appends them to its stream.
/// `base_version` is the stream version observed before the command executed.
async fn commit(
    account: &mut Account,
    base_version: u64,
    command: &dyn Command,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let aggregate_id = account
        .aggregate_id()
        .ok_or_else(|| DomainError::Validation("aggregate has no identity".into()))?;

    let mut pending = account.take_uncommitted_events();
    let stored = seal_events(
        aggregate_id,
        base_version,
        command.correlation_id(),
        command.causation_id(),
        clock,
        &mut pending,
    )?;

    repo.append_events(aggregate_id, base_version, &stored)
        .await?;

    info!(
        command = command.command_type(),
        %aggregate_id,
        events = stored.len(),
        "committed events"
    );
    Ok(stored)
}

/// Handles the `OpenAccount` command: creates a fresh aggregate via the domain
/// factory and persists the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if validation or event appending fails.
pub async fn handle_open_account(
    command: &OpenAccount,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    if command.owner.trim().is_empty() {
        return Err(DomainError::Validation(
            "account owner must not be empty".into(),
        ));
    }

    let mut account = Account::open(command.account_id, &command.owner)?;
    commit(&mut account, 0, command, clock, repo).await
}

/// Handles the `DepositFunds` command: reconstitutes the aggregate, deposits,
/// and persists the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if event loading, the business rule, or appending
/// fails.
pub async fn handle_deposit_funds(
    command: &DepositFunds,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let mut account = load_account(repo, command.account_id).await?;
    let base_version = account.version();

    account.deposit(command.amount)?;

    commit(&mut account, base_version, command, clock, repo).await
}

/// Handles the `WithdrawFunds` command: reconstitutes the aggregate,
/// withdraws, and persists the resulting event.
///
/// # Errors
///
/// Returns `DomainError` if event loading, the business rule, or appending
/// fails.
pub async fn handle_withdraw_funds(
    command: &WithdrawFunds,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let mut account = load_account(repo, command.account_id).await?;
    let base_version = account.version();

    account.withdraw(command.amount)?;

    commit(&mut account, base_version, command, clock, repo).await
}
