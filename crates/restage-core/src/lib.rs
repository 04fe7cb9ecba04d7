//! Restage Core - Actors, stages, and events for rollback simulation
//!
//! This crate provides the building blocks the timeline crate replays:
//! - Actor identity and logical time (`ActorId`, `Timestamp`)
//! - The per-actor state contract (`ActorState`)
//! - The deep-cloneable actor table (`Stage`)
//! - The event contract and built-in variants (`Event`, `StateEvent`,
//!   `CallbackEvent`)
//!
//! Everything here is single-threaded and synchronous. Determinism is the
//! load-bearing contract: an event applied to equal stages must produce
//! equal results, because rollback re-applies events as often as it needs
//! to.

mod event;
mod identity;
mod stage;
mod state;
mod time;

pub use event::{Callback, CallbackEvent, Event, StateEvent};
pub use identity::ActorId;
pub use stage::Stage;
pub use state::ActorState;
pub use time::Timestamp;
