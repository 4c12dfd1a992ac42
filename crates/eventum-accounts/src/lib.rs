//! Eventum Accounts — worked bounded context for the event-sourcing core.
//!
//! Models bank accounts whose balance is derived entirely from an event
//! stream: open, deposit, withdraw.

pub mod application;
pub mod domain;
