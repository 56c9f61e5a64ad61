//! Composition root and run lifecycle.
//!
//! `configure` wires the whole simulation into an `App`. The host owns the
//! schedule runner and everything audiovisual; it drives a run with
//! [`start_run`] / [`restart`] / [`return_to_menu`], feeds `ControlIntent` before each
//! tick, and reads [`snapshot::Snapshot`] plus the audio cue messages
//! after.
//!
//! Entering `Playing` always rebuilds the run from scratch; a retry from
//! game over is the same transition as a first start.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::cues::AudioCue;
use crate::common::intent::ControlIntent;
use crate::common::state::RunState;
use crate::plugins;
use crate::plugins::boss::ActiveBoss;
use crate::plugins::camera;
use crate::plugins::cleanup::RunScoped;
use crate::plugins::combat::messages::{BossDefeated, UnitDestroyed};
use crate::plugins::core::SimClock;
use crate::plugins::physics::Velocity;
use crate::plugins::player;
use crate::plugins::projectiles::components::{PooledProjectile, ProjectileEntity, ProjectileState};
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::projectiles::pool::ProjectilePool;
use crate::plugins::scoring::RunStats;
use crate::plugins::worldgen::{self, WorldCursor};

pub mod snapshot;

/// Wire the simulation into `app`. A host that wants non-default tuning
/// inserts its own `Tunables` first.
pub fn configure(app: &mut App) {
    app.init_state::<RunState>();
    plugins::register_gameplay(app);

    app.add_systems(
        OnEnter(RunState::Playing),
        (
            purge_run_entities,
            clear_run_messages,
            reset_run,
            player::spawn,
            worldgen::seed_world,
            camera::snap_to_player,
        )
            .chain(),
    );
    // Back on the menu the old run has nothing left to show.
    app.add_systems(OnEnter(RunState::Start), purge_run_entities);
    app.add_systems(OnEnter(RunState::GameOver), clear_intent);
}

/// Begin a run from the menu.
pub fn start_run(world: &mut World) {
    world
        .resource_mut::<NextState<RunState>>()
        .set(RunState::Playing);
}

/// Retry after game over. Entering `Playing` rebuilds everything, so this
/// is the same transition as [`start_run`].
pub fn restart(world: &mut World) {
    start_run(world);
}

pub fn return_to_menu(world: &mut World) {
    world
        .resource_mut::<NextState<RunState>>()
        .set(RunState::Start);
}

/// A button still held at the death tick must not leak into the game-over
/// screen or the next run.
fn clear_intent(mut intent: ResMut<ControlIntent>) {
    *intent = ControlIntent::default();
}

fn purge_run_entities(mut commands: Commands, q: Query<Entity, With<RunScoped>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

/// Stale messages refer to the previous run's entities and must never
/// reach this run's systems.
fn clear_run_messages(world: &mut World) {
    world.resource_mut::<Messages<FireRequest>>().clear();
    world.resource_mut::<Messages<UnitDestroyed>>().clear();
    world.resource_mut::<Messages<BossDefeated>>().clear();
    world.resource_mut::<Messages<AudioCue>>().clear();
}

/// Fresh scoreboard, cursor and clock, and every pooled round parked back
/// on the free list.
fn reset_run(
    mut stats: ResMut<RunStats>,
    mut cursor: ResMut<WorldCursor>,
    mut clock: ResMut<SimClock>,
    mut active: ResMut<ActiveBoss>,
    mut intent: ResMut<ControlIntent>,
    mut pool: ResMut<ProjectilePool>,
    mut q_rounds: Query<(Entity, &mut ProjectileState, &mut Velocity), With<PooledProjectile>>,
) {
    debug!("run reset");
    *stats = RunStats::default();
    *cursor = WorldCursor::default();
    *clock = SimClock::default();
    active.0 = None;
    *intent = ControlIntent::default();

    pool.clear();
    for (e, mut state, mut vel) in &mut q_rounds {
        *state = ProjectileState::Inactive;
        vel.0 = Vec2::ZERO;
        pool.push_free(ProjectileEntity(e));
    }
}
