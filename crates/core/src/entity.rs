//! Opaque entity handles.
//!
//! The host owns every entity. Behaviours only ever hold an [`EntityId`], which
//! is a non-owning reference: the entity it names can be despawned at any time,
//! after which the id is stale and every lookup through it fails.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host-issued handle naming a single entity.
///
/// The bit layout belongs to the host; nothing outside the host should build
/// one from arbitrary bits except to model a missing entity in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap raw host bits.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw host bits.
    pub const fn to_bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{:x}", self.0)
    }
}
