//! Logical time for the snapshot chain

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque, totally ordered timestamp
///
/// Whether a timestamp counts frames, wall-clock microseconds, or a logical
/// counter is the embedder's concern; the timeline only compares them. The
/// embedder's clock must produce non-decreasing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// The zero timestamp, at or before every valid timestamp
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from a raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
