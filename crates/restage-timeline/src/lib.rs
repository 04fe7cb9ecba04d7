//! Restage Timeline - snapshot chain with rollback and deterministic replay
//!
//! Networked simulations predict locally and hear about authoritative
//! events late. This crate keeps a chain of stage snapshots plus every
//! retained event sorted by timestamp; an in-order event applies straight
//! to the live stage, while a late arrival rolls history back to the
//! snapshot owning its timestamp and deterministically replays the suffix.
//!
//! # Example
//!
//! ```rust,ignore
//! use restage_timeline::{Timeline, Timestamp};
//!
//! let mut timeline = Timeline::new();
//!
//! // Simulation loop: submit events as they arrive, in any order
//! timeline.insert(Box::new(spawn_event))?;
//! timeline.insert(Box::new(late_move_event))?; // triggers rollback + replay
//!
//! // Periodically checkpoint so rollbacks stay short, and cap memory
//! timeline.snapshot_at(Timestamp::new(now));
//! timeline.limit_snapshots(32);
//!
//! // Read the reconciled world
//! let stage = timeline.stage();
//! ```
//!
//! Events older than the oldest retained snapshot are refused and handed
//! back; everything else is placed, replayed, and retained even when its
//! own apply reports failure (a later insertion can make it succeed).

mod error;
mod snapshot;
mod timeline;

pub use error::{Error, Result};
pub use snapshot::Snapshot;
pub use timeline::Timeline;

// Re-export the core surface for convenience
pub use restage_core::{
    ActorId, ActorState, Callback, CallbackEvent, Event, Stage, StateEvent, Timestamp,
};
