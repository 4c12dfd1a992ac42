//! Shared test mocks and utilities for the Eventum workspace.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{FailingEventRepository, RecordingEventRepository};
