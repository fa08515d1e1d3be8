use anyhow::{Context, Result};
use orbiter_core::{Orientation, SimTick};
use orbiter_ecs::SceneWorld;
use orbiter_scripting::{
    DiagnosticBus, NavigationLatch, OrientationUpdater, ScriptContext, ScriptHost, ScriptPhase,
};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::event_log::{EventRecord, JsonlSink};
use crate::report::{RunReport, RunReportBuilder, RunResult};

/// Run one session to completion.
///
/// The session ends when the tick limit is reached, when the updater asks to
/// navigate (the component gives up the session at that point), or when the
/// updater faults.
pub fn run(config: &SessionConfig) -> Result<RunReport> {
    let mut scene = SceneWorld::new();
    let entity = scene.spawn(Orientation::from_euler(config.start_orientation));

    let navigation = NavigationLatch::new();
    let mut host = ScriptHost::new();
    let slot = host.attach(entity, OrientationUpdater::new(navigation.clone()));
    let mut diagnostics = DiagnosticBus::new();

    let mut events = match &config.event_log {
        Some(path) => Some(
            JsonlSink::create(path)
                .with_context(|| format!("failed to create event log {}", path.display()))?,
        ),
        None => None,
    };

    info!(%entity, ticks = config.ticks, swap_at_tick = ?config.swap_at_tick, "session started");

    let mut tick = SimTick::ZERO;
    let mut faults = 0;
    let mut result = RunResult::Completed;
    let mut target = None;
    loop {
        if config.swap_at_tick == Some(tick.0) {
            host.trigger_swap(slot)
                .with_context(|| format!("swap trigger failed at tick {}", tick.0))?;
        }
        if let Some(requested) = navigation.take().into_iter().next() {
            info!(tick = tick.0, target_location = %requested, "session navigated away");
            log_event(&mut events, tick, "Navigation", json!({ "target": requested }))?;
            target = Some(requested);
            result = RunResult::Navigated;
            break;
        }
        if tick.0 >= config.ticks {
            break;
        }
        if host.phase(slot) == Some(ScriptPhase::Faulted) {
            warn!(tick = tick.0, "orientation updater faulted; ending session");
            result = RunResult::Faulted;
            break;
        }

        let report = host.tick(
            &mut ScriptContext::new(&mut scene, &mut diagnostics),
            config.tick_seconds,
        );
        tick = tick.advance(1);
        scene.run_tick(tick);
        faults += report.faults.len();

        for event in diagnostics.drain() {
            log_event(&mut events, tick, "Diagnostic", serde_json::to_value(&event)?)?;
        }
        let orientation = scene.orientation(entity);
        debug!(
            tick = tick.0,
            updated = report.updated,
            wrapped = ?orientation.map(|o| o.wrapped().euler()),
            "tick complete"
        );
        let orientation = orientation.map(|o| o.euler());
        log_event(
            &mut events,
            tick,
            "Tick",
            json!({ "updated": report.updated, "orientation": orientation }),
        )?;
    }

    if let Some(sink) = events.as_mut() {
        sink.flush()?;
    }

    let mut builder = RunReportBuilder::new("orbiter-session")
        .result(result)
        .ticks(tick)
        .faults(faults);
    if let Some(orientation) = scene.orientation(entity) {
        builder = builder.final_orientation(orientation.euler());
    }
    if let Some(target) = target {
        builder = builder.navigation(target);
    }
    Ok(builder.build())
}

fn log_event(
    sink: &mut Option<JsonlSink>,
    tick: SimTick,
    kind: &str,
    payload: serde_json::Value,
) -> Result<()> {
    if let Some(sink) = sink.as_mut() {
        sink.write(&EventRecord { tick, kind, payload })?;
    }
    Ok(())
}
