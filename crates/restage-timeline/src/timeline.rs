//! The snapshot chain and its rollback machinery
//!
//! A timeline accepts events in any order and keeps the live stage equal to
//! what an in-order replay of every retained event would produce. In-order
//! arrivals apply directly; a late arrival rolls history back to the
//! snapshot owning its timestamp and replays the suffix of the chain.

use crate::{Error, Result, Snapshot};
use restage_core::{Event, Stage, Timestamp};
use tracing::{debug, trace};

/// Ordered chain of stage snapshots plus the live stage
///
/// The chain always holds at least one snapshot. Index 0 starts as the
/// sentinel at [`Timestamp::ZERO`] with an empty stage, so every valid
/// timestamp has a snapshot to land in; pruning can move the horizon
/// forward. The live stage equals the last snapshot's base with all of its
/// events applied in order.
///
/// A timeline is not safe for concurrent access; embedders requiring it
/// must serialize externally.
#[derive(Debug)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    current: Stage,
}

impl Timeline {
    /// Create a timeline holding only the sentinel snapshot
    pub fn new() -> Self {
        Self {
            snapshots: vec![Snapshot::new(Timestamp::ZERO)],
            current: Stage::new(),
        }
    }

    /// The live stage, with every retained event applied
    ///
    /// Resimulation may rebuild actor states from scratch, so borrows
    /// obtained here do not survive any mutating call.
    pub fn stage(&self) -> &Stage {
        &self.current
    }

    /// Begin timestamp of the oldest retained snapshot
    ///
    /// Events older than this can no longer be placed and are refused by
    /// [`insert`](Timeline::insert).
    pub fn horizon(&self) -> Timestamp {
        self.snapshots[0].begin()
    }

    /// Begin timestamp of the newest snapshot
    pub fn latest_begin(&self) -> Timestamp {
        self.snapshots[self.snapshots.len() - 1].begin()
    }

    /// Number of retained snapshots
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Insert an event and rebuild the history it affects
    ///
    /// The event lands in the snapshot whose window contains its timestamp;
    /// an event timestamped exactly at a snapshot boundary opens that
    /// snapshot's window. An event strictly newer than everything already
    /// applied skips resimulation and runs directly against the live stage.
    ///
    /// An event older than [`horizon`](Timeline::horizon) is refused and
    /// handed back inside [`Error::StaleEvent`]; nothing mutates.
    ///
    /// An event whose own apply reports failure is retained anyway: a later
    /// out-of-order insertion can make it succeed on replay (a create
    /// arriving before an increment). Such failures are observable only
    /// through a [`CallbackEvent`](restage_core::CallbackEvent) wrapper.
    pub fn insert(&mut self, event: Box<dyn Event>) -> Result<()> {
        let when = event.when();
        let Some(index) = self.locate(when) else {
            return Err(Error::StaleEvent {
                when,
                horizon: self.horizon(),
                event,
            });
        };

        let appended = self.snapshots[index].insert(event);

        if appended && index == self.snapshots.len() - 1 {
            // Strictly follows everything applied so far
            if let Some(event) = self.snapshots[index].last_event_mut() {
                if !event.apply(&mut self.current) {
                    trace!(actor = %event.target(), %when, "event application failed");
                }
            }
            return Ok(());
        }

        self.resimulate(index);
        Ok(())
    }

    /// Append a snapshot of the live stage at `now`
    ///
    /// `now` must not precede the newest snapshot's begin; producing
    /// non-decreasing timestamps is the embedder's clock contract. The live
    /// stage is unchanged.
    pub fn snapshot_at(&mut self, now: Timestamp) {
        debug_assert!(
            now >= self.latest_begin(),
            "snapshot timestamps must be non-decreasing"
        );
        self.snapshots
            .push(Snapshot::with_stage(now, self.current.clone()));
    }

    /// Retain only the most recent `count` snapshots
    ///
    /// Clamped to keep at least one. Dropped snapshots take their events
    /// with them and move the horizon forward; the live stage is unchanged.
    pub fn limit_snapshots(&mut self, count: usize) {
        let keep = count.max(1);
        if self.snapshots.len() <= keep {
            return;
        }
        let dropped = self.snapshots.len() - keep;
        self.snapshots.drain(..dropped);
        debug!(dropped, horizon = %self.horizon(), "pruned snapshots");
    }

    /// Index of the snapshot whose window contains `when`
    ///
    /// The greatest index with `begin <= when`, or `None` when `when`
    /// precedes even the oldest retained snapshot.
    fn locate(&self, when: Timestamp) -> Option<usize> {
        let bound = self.snapshots.partition_point(|s| s.begin() <= when);
        bound.checked_sub(1)
    }

    /// Rebuild every snapshot base from `from` forward, then the live stage
    fn resimulate(&mut self, from: usize) {
        debug!(
            from,
            rebuilt = self.snapshots.len() - from,
            "rolling back and replaying"
        );
        for index in from..self.snapshots.len() {
            let mut working = self.snapshots[index].base().clone();
            for event in self.snapshots[index].events_mut() {
                if !event.apply(&mut working) {
                    trace!(
                        actor = %event.target(),
                        when = %event.when(),
                        "event application failed during replay"
                    );
                }
            }
            match self.snapshots.get_mut(index + 1) {
                Some(next) => next.set_base(working),
                None => self.current = working,
            }
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
