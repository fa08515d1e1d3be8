#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod entity;
pub mod error;
pub mod host;
pub mod rotation;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use entity::EntityId;
pub use error::{MissingResource, MissingResourceError};
pub use host::EntityHost;
pub use rotation::{EulerDegrees, Orientation, INITIAL_SPIN, TICK_SPIN};

/// Fixed simulation tick counter, advanced once per host frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_from_zero() {
        assert_eq!(SimTick::ZERO.advance(3), SimTick(3));
        assert!(SimTick(2) < SimTick(3));
    }
}
