use orbiter_core::{EntityHost, EulerDegrees, MissingResource, Orientation, INITIAL_SPIN, TICK_SPIN};
use orbiter_scripting::{DiagnosticEvent, OrientationUpdater, ScriptPhase, SWAP_TARGET};
use orbiter_testkit::{record_ticks, SpinHarness};

fn close(a: EulerDegrees, b: EulerDegrees) -> bool {
    (a.pitch - b.pitch).abs() < 1e-3 && (a.yaw - b.yaw).abs() < 1e-3 && (a.roll - b.roll).abs() < 1e-3
}

#[test]
fn updater_spins_entity_through_scene_pipeline() {
    let mut harness = SpinHarness::new();
    let updater = OrientationUpdater::new(harness.navigator());
    let (entity, slot) = harness.spawn_with(Orientation::IDENTITY, updater);

    let frames = record_ticks(&mut harness, 4, 1.0 / 60.0, |h| {
        h.scene.orientation(entity).expect("entity alive").euler()
    });

    for frame in &frames[1..] {
        let expected = INITIAL_SPIN + TICK_SPIN * frame.tick as f32;
        assert!(close(frame.snapshot, expected), "tick {}: {:?}", frame.tick, frame.snapshot);
    }
    assert_eq!(harness.host.phase(slot), Some(ScriptPhase::Ready));
    assert_eq!(
        harness.diagnostics.events(),
        &[DiagnosticEvent::EntityBound { entity }]
    );

    let transform = harness.scene.transform(entity).expect("entity alive");
    let orientation = harness.scene.orientation(entity).expect("entity alive");
    assert!(transform.rotation.abs_diff_eq(orientation.to_quat(), 1e-6));
}

#[test]
fn external_swap_requests_literal_empty_target() {
    let mut harness = SpinHarness::new();
    let updater = OrientationUpdater::new(harness.navigator());
    let (entity, slot) = harness.spawn_with(Orientation::IDENTITY, updater);
    harness.step(0.016);
    let before = harness.scene.orientation(entity);

    harness.host.trigger_swap(slot).expect("navigator bound");

    assert_eq!(harness.navigation.requests(), vec![SWAP_TARGET.to_string()]);
    assert_eq!(SWAP_TARGET, "");
    assert_eq!(harness.scene.orientation(entity), before);
    assert_eq!(harness.diagnostics.events().len(), 1);
}

#[test]
fn despawned_entity_faults_updater_once() {
    let mut harness = SpinHarness::new();
    let (entity, slot) =
        harness.spawn_with(Orientation::IDENTITY, OrientationUpdater::without_navigator());
    harness.scene.despawn(entity);

    let report = harness.step(0.016);
    let again = harness.step(0.016);

    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].error.resource, MissingResource::StaleEntity(entity));
    assert!(again.is_clean());
    assert_eq!(harness.host.phase(slot), Some(ScriptPhase::Faulted));
    assert!(!harness.scene.contains(entity));
    assert!(matches!(
        harness.diagnostics.events(),
        [DiagnosticEvent::ScriptFaulted { .. }]
    ));
    assert!(harness.navigation.is_empty());
}
