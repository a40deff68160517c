//! Core aggregate and domain event traits.

use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events describe a state change that has already been decided.
/// They are named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name, used in logs.
    fn event_type(&self) -> &'static str;
}

/// Trait for in-memory aggregates driven by commands.
///
/// Commands are evaluated against current state by [`Aggregate::handle`],
/// which decides the events without mutating anything. Events are then
/// folded in by [`Aggregate::apply`]. A command that would be a no-op
/// produces no events.
pub trait Aggregate: Default + Send + Sync + Sized {
    /// The commands this aggregate accepts.
    type Command;

    /// The events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate type name.
    fn aggregate_type() -> &'static str;

    /// Decides which events a command produces against the current state.
    ///
    /// Must not fail: commands that do not apply yield an empty vector.
    fn handle(&self, command: &Self::Command) -> Vec<Self::Event>;

    /// Applies an event to the aggregate, updating its state.
    ///
    /// Given the same state and event, it must always produce the same new state.
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Handles a command and applies the resulting events.
    ///
    /// Returns the applied events; an empty vector means nothing changed.
    fn dispatch(&mut self, command: Self::Command) -> Vec<Self::Event> {
        let events = self.handle(&command);
        self.apply_events(events.iter().cloned());
        events
    }
}
