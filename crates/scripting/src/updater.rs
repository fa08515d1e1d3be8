//! Fixed-spin orientation updater.
//!
//! Spins its entity by [`INITIAL_SPIN`] once on initialize and by
//! [`TICK_SPIN`] on every update, whatever the tick length. `swap` asks the
//! navigator to go to [`SWAP_TARGET`].

use orbiter_core::{EntityId, MissingResourceError, INITIAL_SPIN, TICK_SPIN};

use crate::{DiagnosticEvent, EntityScript, Navigator, ScriptContext};

/// Location requested by [`OrientationUpdater::swap`].
///
/// Empty, so navigation reloads the current location. Kept literal until a
/// real destination is decided.
pub const SWAP_TARGET: &str = "";

/// Behaviour that spins one entity a fixed amount per tick.
pub struct OrientationUpdater {
    entity: Option<EntityId>,
    navigator: Option<Box<dyn Navigator>>,
}

impl OrientationUpdater {
    /// Updater that navigates through `navigator` on swap.
    pub fn new(navigator: impl Navigator + 'static) -> Self {
        Self { entity: None, navigator: Some(Box::new(navigator)) }
    }

    /// Updater with no navigation facility. `swap` always fails.
    pub fn without_navigator() -> Self {
        Self { entity: None, navigator: None }
    }

    fn live_entity(&self, ctx: &ScriptContext<'_>) -> Result<EntityId, MissingResourceError> {
        let entity = self.entity.ok_or(MissingResourceError::unbound_entity())?;
        if !ctx.entities.contains(entity) {
            return Err(MissingResourceError::stale_entity(entity));
        }
        Ok(entity)
    }
}

impl EntityScript for OrientationUpdater {
    fn bind(&mut self, entity: EntityId) {
        self.entity = Some(entity);
    }

    fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    fn initialize(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), MissingResourceError> {
        let entity = self.live_entity(ctx)?;
        ctx.diagnostics.record(DiagnosticEvent::EntityBound { entity });
        ctx.entities.rotate(entity, INITIAL_SPIN)
    }

    fn post_initialize(&mut self, _ctx: &mut ScriptContext<'_>) {}

    fn update(&mut self, ctx: &mut ScriptContext<'_>, _dt: f32) -> Result<(), MissingResourceError> {
        let entity = self.live_entity(ctx)?;
        ctx.entities.rotate(entity, TICK_SPIN)
    }

    fn post_update(&mut self, _ctx: &mut ScriptContext<'_>) {}

    fn swap(&mut self) -> Result<(), MissingResourceError> {
        let navigator = self.navigator.as_mut().ok_or(MissingResourceError::navigator())?;
        tracing::warn!(entity = ?self.entity, "swap navigates to an empty target; the session reloads in place");
        navigator.navigate(SWAP_TARGET);
        Ok(())
    }
}
