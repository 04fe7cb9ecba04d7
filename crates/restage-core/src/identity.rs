//! Identity types for actors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an actor within a stage
///
/// IDs are assigned by the embedder and must not be reused while a timeline
/// still holds events targeting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Create a new actor ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor:{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id() {
        let id = ActorId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "actor:42");
        assert_eq!(ActorId::from(42), id);
    }
}
