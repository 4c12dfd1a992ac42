//! Aggregate root abstraction.
//!
//! An aggregate derives its state exclusively from events. `apply` is the only
//! state-mutation entry point: it routes the event through the aggregate's
//! dispatch table and records it as uncommitted in one step. Reconstitution
//! replays committed history through the same table without re-recording.

use uuid::Uuid;

use crate::error::AggregateError;
use crate::event::DomainEvent;

/// A state-mutation handler resolved from an aggregate's dispatch table.
pub type ApplyFn<A> =
    fn(&mut A, &<A as AggregateRoot>::Event) -> Result<(), <A as AggregateRoot>::Error>;

/// Uncommitted events and the version counter, embedded by every concrete
/// aggregate.
///
/// The uncommitted list is append-only until the persistence layer drains it;
/// the version counts every event applied over the aggregate's lifetime,
/// replayed or live.
#[derive(Debug, Clone)]
pub struct AggregateState<E> {
    uncommitted: Vec<E>,
    version: u64,
}

impl<E> AggregateState<E> {
    /// Creates the state of a fresh aggregate: no events, version zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            uncommitted: Vec::new(),
            version: 0,
        }
    }

    /// Number of events applied over the aggregate's lifetime.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Events applied but not yet drained by persistence, in application order.
    #[must_use]
    pub fn uncommitted(&self) -> &[E] {
        &self.uncommitted
    }

    pub(crate) fn record(&mut self, event: E) {
        self.uncommitted.push(event);
        self.version += 1;
    }

    pub(crate) fn advance(&mut self) {
        self.version += 1;
    }

    pub(crate) fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.uncommitted)
    }

    pub(crate) fn clear(&mut self) {
        self.uncommitted.clear();
    }
}

impl<E> Default for AggregateState<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn dispatch<A: AggregateRoot>(aggregate: &mut A, event: &A::Event) -> Result<(), A::Error> {
    let event_type = event.event_type();
    let handler = A::handler(event_type)
        .ok_or_else(|| AggregateError::MissingHandler(event_type.to_owned()))?;
    handler(aggregate, event)
}

/// Trait for aggregate roots reconstituted from event history.
pub trait AggregateRoot: Sized + Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The error type apply handlers raise. Business-rule rejections inside a
    /// handler propagate through [`apply`](Self::apply) unchanged.
    type Error: From<AggregateError>;

    /// The aggregate identifier, `None` until the creation event is applied.
    fn aggregate_id(&self) -> Option<Uuid>;

    /// The embedded uncommitted-events/version block.
    fn state(&self) -> &AggregateState<Self::Event>;

    /// Mutable access to the embedded uncommitted-events/version block.
    fn state_mut(&mut self) -> &mut AggregateState<Self::Event>;

    /// The dispatch table: resolves the handler for an event type tag.
    ///
    /// Registered once per concrete aggregate, typically as a match over the
    /// tags of the events it consumes.
    fn handler(event_type: &str) -> Option<ApplyFn<Self>>;

    /// Applies `event`: mutates state through the resolved handler and records
    /// the event as uncommitted. The two effects are atomic from the caller's
    /// perspective.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::MissingHandler`] (uncommitted events
    /// untouched) when the dispatch table has no entry for the event's type.
    /// Errors raised by the handler itself propagate unchanged; no partial
    /// mutation guarantee is made, so a failed aggregate must be discarded.
    fn apply(&mut self, event: Self::Event) -> Result<(), Self::Error> {
        dispatch(self, &event)?;
        self.state_mut().record(event);
        Ok(())
    }

    /// Rebuilds an aggregate by replaying its committed history in order.
    ///
    /// Replayed events go through the same dispatch table as live ones but are
    /// not re-added to the uncommitted list; they are already persisted.
    ///
    /// # Errors
    ///
    /// Same contract as [`apply`](Self::apply), per replayed event.
    fn replay<I>(events: I) -> Result<Self, Self::Error>
    where
        Self: Default,
        I: IntoIterator<Item = Self::Event>,
    {
        let mut aggregate = Self::default();
        for event in events {
            dispatch(&mut aggregate, &event)?;
            aggregate.state_mut().advance();
        }
        Ok(aggregate)
    }

    /// Events applied but not yet committed to a store, in application order.
    fn uncommitted_events(&self) -> &[Self::Event] {
        self.state().uncommitted()
    }

    /// Drains the uncommitted events for persistence.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        self.state_mut().take()
    }

    /// Clears uncommitted events after successful persistence.
    fn clear_uncommitted_events(&mut self) {
        self.state_mut().clear();
    }

    /// Number of events applied over the aggregate's lifetime.
    fn version(&self) -> u64 {
        self.state().version()
    }
}
