//! Registration and lifecycle driver for entity behaviours.

use orbiter_core::{EntityId, MissingResource, MissingResourceError};
use serde::Serialize;
use std::fmt;

use crate::{DiagnosticEvent, EntityScript, ScriptContext};

/// Handle returned by [`ScriptHost::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScriptSlot(u32);

impl ScriptSlot {
    /// Raw slot number.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ScriptSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Where a behaviour is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPhase {
    /// Attached, waiting for its first tick.
    Pending,
    /// Initialized and updated every tick.
    Ready,
    /// Failed; the host no longer calls it.
    Faulted,
}

/// A behaviour that failed during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFault {
    /// Slot of the failed behaviour.
    pub slot: ScriptSlot,
    /// Entity it was bound to.
    pub entity: Option<EntityId>,
    /// What was missing.
    pub error: MissingResourceError,
}

/// Outcome of one [`ScriptHost::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Behaviours that finished `initialize` this tick.
    pub initialized: usize,
    /// Behaviours that finished `update` this tick.
    pub updated: usize,
    /// Behaviours that failed this tick.
    pub faults: Vec<ScriptFault>,
}

impl TickReport {
    /// Returns true if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

struct ScriptEntry {
    slot: ScriptSlot,
    phase: ScriptPhase,
    script: Box<dyn EntityScript>,
}

/// Drives attached behaviours through their lifecycle, in attach order.
///
/// A behaviour that returns an error is faulted: the failure is reported once
/// and the host never calls it again.
#[derive(Default)]
pub struct ScriptHost {
    entries: Vec<ScriptEntry>,
    next_slot: u32,
}

impl ScriptHost {
    /// Host with no behaviours.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `script` to `entity` and schedule it for initialization on the
    /// next tick.
    pub fn attach(&mut self, entity: EntityId, script: impl EntityScript + 'static) -> ScriptSlot {
        self.attach_boxed(entity, Box::new(script))
    }

    /// [`attach`](Self::attach) for an already boxed behaviour.
    pub fn attach_boxed(&mut self, entity: EntityId, mut script: Box<dyn EntityScript>) -> ScriptSlot {
        let slot = ScriptSlot(self.next_slot);
        self.next_slot += 1;
        script.bind(entity);
        tracing::debug!(%slot, %entity, "attached behaviour");
        self.entries.push(ScriptEntry { slot, phase: ScriptPhase::Pending, script });
        slot
    }

    /// Remove a behaviour, ending its lifecycle.
    pub fn detach(&mut self, slot: ScriptSlot) -> Option<Box<dyn EntityScript>> {
        let index = self.entries.iter().position(|entry| entry.slot == slot)?;
        tracing::debug!(%slot, "detached behaviour");
        Some(self.entries.remove(index).script)
    }

    /// Lifecycle phase of `slot`, if attached.
    pub fn phase(&self, slot: ScriptSlot) -> Option<ScriptPhase> {
        self.entry(slot).map(|entry| entry.phase)
    }

    /// Number of attached behaviours, faulted ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run one host frame.
    ///
    /// Pending behaviours run `initialize`, then every behaviour that just
    /// initialized runs `post_initialize`. Every ready behaviour then runs
    /// `update(dt)`, followed by a `post_update` pass.
    pub fn tick(&mut self, ctx: &mut ScriptContext<'_>, dt: f32) -> TickReport {
        let mut report = TickReport::default();

        let mut initialized = Vec::new();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.phase != ScriptPhase::Pending {
                continue;
            }
            match entry.script.initialize(ctx) {
                Ok(()) => {
                    entry.phase = ScriptPhase::Ready;
                    initialized.push(index);
                }
                Err(error) => fault(entry, error, ctx, &mut report),
            }
        }
        for &index in &initialized {
            self.entries[index].script.post_initialize(ctx);
        }
        report.initialized = initialized.len();

        for entry in self.entries.iter_mut().filter(|entry| entry.phase == ScriptPhase::Ready) {
            match entry.script.update(ctx, dt) {
                Ok(()) => report.updated += 1,
                Err(error) => fault(entry, error, ctx, &mut report),
            }
        }
        for entry in self.entries.iter_mut().filter(|entry| entry.phase == ScriptPhase::Ready) {
            entry.script.post_update(ctx);
        }

        report
    }

    /// Forward an external swap trigger to the behaviour in `slot`.
    ///
    /// Faulted or unknown slots fail with a missing script-slot error.
    pub fn trigger_swap(&mut self, slot: ScriptSlot) -> Result<(), MissingResourceError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.slot == slot && entry.phase != ScriptPhase::Faulted)
            .ok_or(MissingResourceError::new(MissingResource::ScriptSlot(slot.0)))?;
        tracing::debug!(%slot, "swap triggered");
        entry.script.swap()
    }

    fn entry(&self, slot: ScriptSlot) -> Option<&ScriptEntry> {
        self.entries.iter().find(|entry| entry.slot == slot)
    }
}

fn fault(
    entry: &mut ScriptEntry,
    error: MissingResourceError,
    ctx: &mut ScriptContext<'_>,
    report: &mut TickReport,
) {
    entry.phase = ScriptPhase::Faulted;
    let entity = entry.script.entity();
    tracing::error!(
        slot = %entry.slot,
        entity = ?entity,
        %error,
        "behaviour faulted; no further callbacks"
    );
    ctx.diagnostics.record(DiagnosticEvent::ScriptFaulted {
        slot: entry.slot.0,
        entity,
        reason: error.to_string(),
    });
    report.faults.push(ScriptFault { slot: entry.slot, entity, error });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosticBus, NavigationLatch, OrientationUpdater};
    use orbiter_core::{EntityHost, EulerDegrees, Orientation, INITIAL_SPIN, TICK_SPIN};
    use orbiter_ecs::SceneWorld;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every callback it receives.
    struct RecordingScript {
        entity: Option<EntityId>,
        calls: Rc<RefCell<Vec<&'static str>>>,
        fail_init: bool,
    }

    impl RecordingScript {
        fn new(calls: &Rc<RefCell<Vec<&'static str>>>) -> Self {
            Self { entity: None, calls: Rc::clone(calls), fail_init: false }
        }
    }

    impl EntityScript for RecordingScript {
        fn bind(&mut self, entity: EntityId) {
            self.entity = Some(entity);
            self.calls.borrow_mut().push("bind");
        }

        fn entity(&self) -> Option<EntityId> {
            self.entity
        }

        fn initialize(&mut self, _ctx: &mut ScriptContext<'_>) -> Result<(), MissingResourceError> {
            self.calls.borrow_mut().push("initialize");
            if self.fail_init {
                return Err(MissingResourceError::unbound_entity());
            }
            Ok(())
        }

        fn post_initialize(&mut self, _ctx: &mut ScriptContext<'_>) {
            self.calls.borrow_mut().push("post_initialize");
        }

        fn update(&mut self, _ctx: &mut ScriptContext<'_>, _dt: f32) -> Result<(), MissingResourceError> {
            self.calls.borrow_mut().push("update");
            Ok(())
        }

        fn post_update(&mut self, _ctx: &mut ScriptContext<'_>) {
            self.calls.borrow_mut().push("post_update");
        }

        fn swap(&mut self) -> Result<(), MissingResourceError> {
            self.calls.borrow_mut().push("swap");
            Ok(())
        }
    }

    #[test]
    fn lifecycle_runs_in_host_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut scene = SceneWorld::new();
        let entity = scene.spawn(Orientation::IDENTITY);
        let mut bus = DiagnosticBus::new();
        let mut host = ScriptHost::new();
        let slot = host.attach(entity, RecordingScript::new(&calls));
        assert_eq!(host.phase(slot), Some(ScriptPhase::Pending));

        for _ in 0..3 {
            let report = host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);
            assert!(report.is_clean());
        }

        assert_eq!(
            *calls.borrow(),
            vec![
                "bind",
                "initialize",
                "post_initialize",
                "update",
                "post_update",
                "update",
                "post_update",
                "update",
                "post_update",
            ]
        );
        assert_eq!(host.phase(slot), Some(ScriptPhase::Ready));
    }

    #[test]
    fn failed_initialize_faults_the_slot_for_good() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut scene = SceneWorld::new();
        let entity = scene.spawn(Orientation::IDENTITY);
        let mut bus = DiagnosticBus::new();
        let mut host = ScriptHost::new();
        let slot = host.attach(entity, RecordingScript { fail_init: true, ..RecordingScript::new(&calls) });

        let first = host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);
        let second = host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);

        assert_eq!(first.faults.len(), 1);
        assert_eq!(first.faults[0].slot, slot);
        assert_eq!(first.faults[0].entity, Some(entity));
        assert!(second.is_clean());
        assert_eq!(*calls.borrow(), vec!["bind", "initialize"]);
        assert_eq!(host.phase(slot), Some(ScriptPhase::Faulted));
        assert!(matches!(bus.events(), [DiagnosticEvent::ScriptFaulted { .. }]));
        assert!(host.trigger_swap(slot).is_err());
    }

    #[test]
    fn despawned_entity_faults_updater_without_rotating_others() {
        let mut scene = SceneWorld::new();
        let doomed = scene.spawn(Orientation::IDENTITY);
        let survivor = scene.spawn(Orientation::IDENTITY);
        let mut bus = DiagnosticBus::new();
        let mut host = ScriptHost::new();
        let doomed_slot = host.attach(doomed, OrientationUpdater::without_navigator());
        host.attach(survivor, OrientationUpdater::without_navigator());

        host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);
        scene.despawn(doomed);
        let report = host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);

        assert_eq!(report.updated, 1);
        assert_eq!(report.faults[0].error, MissingResourceError::stale_entity(doomed));
        assert_eq!(host.phase(doomed_slot), Some(ScriptPhase::Faulted));
        let expected = INITIAL_SPIN + TICK_SPIN + TICK_SPIN;
        assert_eq!(scene.orientation(survivor).unwrap().euler(), expected);
    }

    #[test]
    fn updater_initializes_once_across_ticks() {
        let mut scene = SceneWorld::new();
        let entity = scene.spawn(Orientation::IDENTITY);
        let mut bus = DiagnosticBus::new();
        let mut host = ScriptHost::new();
        host.attach(entity, OrientationUpdater::without_navigator());

        let first = host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);
        let second = host.tick(&mut ScriptContext::new(&mut scene, &mut bus), 0.016);

        assert_eq!((first.initialized, second.initialized), (1, 0));
        assert_eq!(bus.events(), &[DiagnosticEvent::EntityBound { entity }]);
        assert!(scene.contains(entity));
        let euler = scene.orientation(entity).unwrap().euler();
        assert_eq!(euler, INITIAL_SPIN + TICK_SPIN + TICK_SPIN);
        assert_ne!(euler, EulerDegrees::ZERO);
    }

    #[test]
    fn trigger_swap_reaches_the_navigator() {
        let latch = NavigationLatch::new();
        let mut host = ScriptHost::new();
        let slot = host.attach(EntityId::from_bits(1), OrientationUpdater::new(latch.clone()));

        host.trigger_swap(slot).unwrap();

        assert_eq!(latch.requests(), vec![String::new()]);
    }

    #[test]
    fn detached_slot_is_missing() {
        let mut host = ScriptHost::new();
        let slot = host.attach(EntityId::from_bits(1), OrientationUpdater::without_navigator());
        assert!(host.detach(slot).is_some());
        assert!(host.is_empty());

        let err = host.trigger_swap(slot).unwrap_err();
        assert_eq!(err.resource, MissingResource::ScriptSlot(slot.index()));
        assert!(host.detach(slot).is_none());
    }
}
