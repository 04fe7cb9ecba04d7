//! One link of the snapshot chain
//!
//! A snapshot records the stage as it stood at its begin timestamp, plus
//! the timestamp-sorted events whose windows of effect start there.

use restage_core::{Event, Stage, Timestamp};
use std::fmt;

/// A stage at a point in time plus the events of its window
///
/// The base stage is the state *at* the begin timestamp, before any event
/// in the window has been applied. Invariant: after every insert the event
/// list is sorted by timestamp, with equal timestamps kept in insertion
/// order.
pub struct Snapshot {
    begin: Timestamp,
    base: Stage,
    events: Vec<Box<dyn Event>>,
}

impl Snapshot {
    /// Create a snapshot with an empty base stage
    pub fn new(begin: Timestamp) -> Self {
        Self {
            begin,
            base: Stage::new(),
            events: Vec::new(),
        }
    }

    /// Create a snapshot owning `base` as the stage at `begin`
    pub fn with_stage(begin: Timestamp, base: Stage) -> Self {
        Self {
            begin,
            base,
            events: Vec::new(),
        }
    }

    /// Earliest timestamp this snapshot represents
    pub fn begin(&self) -> Timestamp {
        self.begin
    }

    /// The stage as it stood at `begin`, before any event of this window
    pub fn base(&self) -> &Stage {
        &self.base
    }

    /// Replace the base stage
    pub fn set_base(&mut self, base: Stage) {
        self.base = base;
    }

    /// Insert an event at the sorted position for its timestamp
    ///
    /// An event with a timestamp equal to existing events lands after them,
    /// so replay order at ties matches submission order. Returns whether
    /// the event is now last in the list; the timeline uses that to skip
    /// resimulation for strictly-appending inserts.
    pub fn insert(&mut self, event: Box<dyn Event>) -> bool {
        let at = self.events.partition_point(|e| e.when() <= event.when());
        let appended = at == self.events.len();
        self.events.insert(at, event);
        appended
    }

    /// The events of this window, sorted by timestamp
    pub fn events(&self) -> &[Box<dyn Event>] {
        &self.events
    }

    /// Mutable access to the events for replay
    ///
    /// A slice borrow cannot reorder the list, so the sort invariant holds.
    pub fn events_mut(&mut self) -> &mut [Box<dyn Event>] {
        &mut self.events
    }

    /// Mutably borrow the newest event, if any
    pub fn last_event_mut(&mut self) -> Option<&mut (dyn Event + '_)> {
        match self.events.last_mut() {
            Some(event) => Some(&mut **event),
            None => None,
        }
    }

    /// Number of events in this window
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if this window holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("begin", &self.begin)
            .field("base", &self.base)
            .field("events", &self.events.len())
            .finish()
    }
}
