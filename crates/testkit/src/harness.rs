//! Tick harness wiring a scene, a script host and recording collaborators.
//!
//! A harness run is intentionally small: spawn a few entities, attach
//! behaviours, step a fixed number of ticks and capture a snapshot after each
//! one. Tests then assert on the frames directly.

use orbiter_core::{EntityId, Orientation, SimTick};
use orbiter_ecs::SceneWorld;
use orbiter_scripting::{
    DiagnosticBus, EntityScript, NavigationLatch, ScriptContext, ScriptHost, ScriptSlot, TickReport,
};
use serde::Serialize;

/// Single snapshot captured at a given tick.
#[derive(Debug, Clone, Serialize)]
pub struct HarnessFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Scene, host and collaborators for one headless test.
#[derive(Default)]
pub struct SpinHarness {
    /// Entity store.
    pub scene: SceneWorld,
    /// Lifecycle driver.
    pub host: ScriptHost,
    /// Diagnostics recorded by behaviours and the host.
    pub diagnostics: DiagnosticBus,
    /// Navigation requests made by behaviours built with [`Self::navigator`].
    pub navigation: NavigationLatch,
    tick: SimTick,
}

impl SpinHarness {
    /// Empty harness at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator sharing this harness's latch.
    pub fn navigator(&self) -> NavigationLatch {
        self.navigation.clone()
    }

    /// Spawn an entity and attach `script` to it.
    pub fn spawn_with(
        &mut self,
        orientation: Orientation,
        script: impl EntityScript + 'static,
    ) -> (EntityId, ScriptSlot) {
        let entity = self.scene.spawn(orientation);
        let slot = self.host.attach(entity, script);
        (entity, slot)
    }

    /// Last completed tick.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Run one host frame followed by the scene schedule.
    pub fn step(&mut self, dt: f32) -> TickReport {
        let report = {
            let mut ctx = ScriptContext::new(&mut self.scene, &mut self.diagnostics);
            self.host.tick(&mut ctx, dt)
        };
        self.tick = self.tick.advance(1);
        self.scene.run_tick(self.tick);
        tracing::trace!(tick = self.tick.0, updated = report.updated, "harness step");
        report
    }
}

/// Step `harness` `ticks` times and snapshot it after each step.
///
/// The result holds `ticks + 1` frames: the initial snapshot at tick 0, then
/// one per step.
pub fn record_ticks<S, SnapFn>(
    harness: &mut SpinHarness,
    ticks: u64,
    dt: f32,
    mut snapshot: SnapFn,
) -> Vec<HarnessFrame<S>>
where
    SnapFn: FnMut(&SpinHarness) -> S,
{
    let mut frames = Vec::with_capacity(ticks as usize + 1);
    frames.push(HarnessFrame { tick: harness.tick().0, snapshot: snapshot(&*harness) });
    for _ in 0..ticks {
        harness.step(dt);
        frames.push(HarnessFrame { tick: harness.tick().0, snapshot: snapshot(&*harness) });
    }
    frames
}
