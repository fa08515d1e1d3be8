//! Boundary the host exposes for entity mutation.

use crate::{EntityId, EulerDegrees, MissingResourceError};

/// Entity store owned by the host runtime.
///
/// Behaviours never read-modify-write entity state themselves; every change
/// goes through [`EntityHost::rotate`].
pub trait EntityHost {
    /// Whether `entity` currently exists.
    fn contains(&self, entity: EntityId) -> bool;

    /// Add `delta` to the orientation of `entity`.
    ///
    /// Fails with a stale-entity error, leaving the store untouched, when
    /// `entity` is unknown.
    fn rotate(&mut self, entity: EntityId, delta: EulerDegrees) -> Result<(), MissingResourceError>;
}
