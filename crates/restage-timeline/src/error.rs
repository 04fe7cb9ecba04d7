//! Error types for restage-timeline

use restage_core::{Event, Timestamp};
use std::fmt;
use thiserror::Error;

/// Timeline error type
#[derive(Error)]
pub enum Error {
    /// Event timestamp precedes the oldest retained snapshot
    ///
    /// Nothing mutated; the event rides back inside the error so the caller
    /// can discard or re-target it.
    #[error("event at {when} precedes the rollback horizon at {horizon}")]
    StaleEvent {
        /// The rejected event's timestamp
        when: Timestamp,
        /// Begin timestamp of the oldest retained snapshot
        horizon: Timestamp,
        /// The event, handed back untouched
        event: Box<dyn Event>,
    },
}

impl Error {
    /// Recover the event the timeline refused
    pub fn into_event(self) -> Box<dyn Event> {
        match self {
            Error::StaleEvent { event, .. } => event,
        }
    }
}

// Manual impl: the event payload is a trait object without Debug.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StaleEvent { when, horizon, .. } => f
                .debug_struct("StaleEvent")
                .field("when", when)
                .field("horizon", horizon)
                .finish_non_exhaustive(),
        }
    }
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, Error>;
