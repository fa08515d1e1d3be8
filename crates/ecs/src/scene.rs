//! Host-side entity store.
//!
//! [`SceneWorld`] owns every entity and is the only place orientation state is
//! mutated. Behaviours address entities through [`EntityId`], which maps to a
//! generational `bevy_ecs` entity, so ids of despawned entities go stale
//! instead of aliasing newer ones.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedules;
use glam::{Quat, Vec3};
use orbiter_core::{EntityHost, EntityId, EulerDegrees, MissingResourceError, Orientation, SimTick};

use crate::{build_default_schedule, run_tick};

/// Accumulated Euler orientation of an entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EntityOrientation(pub Orientation);

/// Render-facing transform derived from [`EntityOrientation`] each tick.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub translation: Vec3,
    /// Rotation synced from the entity's orientation.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY }
    }
}

/// `bevy_ecs` world plus the per-tick schedule.
pub struct SceneWorld {
    world: World,
    schedules: Schedules,
}

impl Default for SceneWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneWorld {
    /// Empty world with the default schedule.
    pub fn new() -> Self {
        Self { world: World::new(), schedules: build_default_schedule() }
    }

    /// Spawn an entity at the origin with the given orientation.
    pub fn spawn(&mut self, orientation: Orientation) -> EntityId {
        let transform = Transform { rotation: orientation.to_quat(), ..Transform::default() };
        let entity = self.world.spawn((EntityOrientation(orientation), transform)).id();
        tracing::debug!(entity = entity.to_bits(), "spawned scene entity");
        EntityId::from_bits(entity.to_bits())
    }

    /// Remove an entity. Returns `false` if it was already gone.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        match self.resolve(entity) {
            Some(resolved) => self.world.despawn(resolved),
            None => false,
        }
    }

    /// Current orientation of `entity`, if it exists.
    pub fn orientation(&self, entity: EntityId) -> Option<Orientation> {
        let resolved = self.resolve(entity)?;
        self.world.get::<EntityOrientation>(resolved).map(|component| component.0)
    }

    /// Transform as of the last tick, if the entity exists.
    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        let resolved = self.resolve(entity)?;
        self.world.get::<Transform>(resolved).copied()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.world.entities().len() as usize
    }

    /// Returns true if no entities are alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the scene schedule for `tick`.
    pub fn run_tick(&mut self, tick: SimTick) {
        run_tick(&mut self.world, &mut self.schedules, tick);
    }

    fn resolve(&self, entity: EntityId) -> Option<Entity> {
        let resolved = Entity::try_from_bits(entity.to_bits()).ok()?;
        self.world.entities().contains(resolved).then_some(resolved)
    }
}

impl EntityHost for SceneWorld {
    fn contains(&self, entity: EntityId) -> bool {
        self.resolve(entity).is_some()
    }

    fn rotate(&mut self, entity: EntityId, delta: EulerDegrees) -> Result<(), MissingResourceError> {
        let resolved = self.resolve(entity).ok_or(MissingResourceError::stale_entity(entity))?;
        let mut orientation = self
            .world
            .get_mut::<EntityOrientation>(resolved)
            .ok_or(MissingResourceError::stale_entity(entity))?;
        orientation.0.rotate(delta);
        tracing::trace!(%entity, pitch = delta.pitch, yaw = delta.yaw, roll = delta.roll, "rotated entity");
        Ok(())
    }
}
