#![warn(missing_docs)]
//! Scene storage and tick scheduling wrapping `bevy_ecs`.

mod scene;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ScheduleLabel, Schedules};
use orbiter_core::SimTick;

pub use scene::{EntityOrientation, SceneWorld, Transform};

/// Label for the per-tick scene schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ScheduleLabel)]
pub struct SceneTickSchedule;

/// Build the per-tick schedule with the transform sync system installed.
pub fn build_default_schedule() -> Schedules {
    let mut schedules = Schedules::default();
    let mut schedule = Schedule::new(SceneTickSchedule);
    schedule.set_apply_final_deferred(true);
    schedule.add_systems(sys_sync_transforms);
    schedules.insert(schedule);
    schedules
}

/// Run the scene schedule for a given tick.
pub fn run_tick(world: &mut World, schedules: &mut Schedules, tick: SimTick) {
    tracing::debug!(tick = tick.0, "running scene schedule");
    if let Some(schedule) = schedules.get_mut(SceneTickSchedule) {
        schedule.run(world);
    }
}

/// Copy each changed orientation into its transform rotation.
pub fn sys_sync_transforms(
    mut nodes: Query<(&EntityOrientation, &mut Transform), Changed<EntityOrientation>>,
) {
    for (orientation, mut transform) in nodes.iter_mut() {
        transform.rotation = orientation.0.to_quat();
    }
}
