//! Command abstractions.

use uuid::Uuid;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// Causation ID for the events this command produces. A command at the
    /// start of a business transaction causes its own events, so the default
    /// is the correlation id.
    fn causation_id(&self) -> Uuid {
        self.correlation_id()
    }
}
