//! Error raised when a behaviour runs without a collaborator it needs.

use crate::EntityId;
use std::fmt;
use thiserror::Error;

/// Which collaborator was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingResource {
    /// The behaviour was never bound to an entity.
    UnboundEntity,
    /// The bound entity no longer exists in the host.
    StaleEntity(EntityId),
    /// No navigation facility was supplied.
    Navigator,
    /// The host has no script registered under this slot.
    ScriptSlot(u32),
}

impl fmt::Display for MissingResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingResource::UnboundEntity => write!(f, "no entity bound"),
            MissingResource::StaleEntity(entity) => write!(f, "{entity} is not present in the host"),
            MissingResource::Navigator => write!(f, "no navigation facility bound"),
            MissingResource::ScriptSlot(slot) => write!(f, "no script in slot {slot}"),
        }
    }
}

/// A required host resource was absent when an operation ran.
///
/// Hosts treat this as a fatal configuration error for the affected entity.
/// Operations that return it have not applied any of their side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing resource: {resource}")]
pub struct MissingResourceError {
    /// The absent collaborator.
    pub resource: MissingResource,
}

impl MissingResourceError {
    /// Build an error for `resource`.
    pub const fn new(resource: MissingResource) -> Self {
        Self { resource }
    }

    /// Shorthand for [`MissingResource::UnboundEntity`].
    pub const fn unbound_entity() -> Self {
        Self::new(MissingResource::UnboundEntity)
    }

    /// Shorthand for [`MissingResource::StaleEntity`].
    pub const fn stale_entity(entity: EntityId) -> Self {
        Self::new(MissingResource::StaleEntity(entity))
    }

    /// Shorthand for [`MissingResource::Navigator`].
    pub const fn navigator() -> Self {
        Self::new(MissingResource::Navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_missing_entity() {
        let err = MissingResourceError::stale_entity(EntityId::from_bits(16));
        assert_eq!(err.to_string(), "missing resource: entity#10 is not present in the host");
    }
}
