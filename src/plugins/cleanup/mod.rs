//! Lifecycle markers and the entity trimmer.
//!
//! Nothing in the Update schedule despawns directly. Systems insert
//! [`PendingDespawn`] and a single PostUpdate pass performs the structural
//! change, so every query in the same tick sees a consistent world.
//!
//! The trimmer enforces hard per-category entity caps. When a category
//! overflows, entities behind the camera are reclaimed; on-screen ones are
//! never touched, so an overflow is invisible to the player.

use bevy::prelude::*;

use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::effects::{FloatingText, Particle};
use crate::plugins::enemies::Unit;
use crate::plugins::pickups::Pickup;
use crate::plugins::worldgen::{Crate, Platform, ScrapDecor, Skyscraper};
use crate::plugins::SimSet;

/// Entities that belong to the current run. Purged on run transitions.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct RunScoped;

/// Marked entities are despawned by [`despawn_marked`] at the end of the
/// tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        trim_overflow
            .in_set(SimSet::Trim)
            .run_if(in_state(RunState::Playing)),
    );
    app.add_systems(PostUpdate, despawn_marked);
}

fn mark_behind<T: Component>(
    commands: &mut Commands,
    q: &Query<(Entity, &Transform), (With<T>, Without<PendingDespawn>)>,
    cap: usize,
    cutoff: f32,
) {
    if q.iter().count() <= cap {
        return;
    }
    for (e, tf) in q.iter() {
        if tf.translation.x < cutoff {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn trim_overflow(
    tunables: Res<Tunables>,
    rig: Res<CameraRig>,
    mut commands: Commands,
    q_platforms: Query<(Entity, &Transform), (With<Platform>, Without<PendingDespawn>)>,
    q_pickups: Query<(Entity, &Transform), (With<Pickup>, Without<PendingDespawn>)>,
    q_scraps: Query<(Entity, &Transform), (With<ScrapDecor>, Without<PendingDespawn>)>,
    q_units: Query<(Entity, &Transform), (With<Unit>, Without<PendingDespawn>)>,
    q_crates: Query<(Entity, &Transform), (With<Crate>, Without<PendingDespawn>)>,
    q_towers: Query<(Entity, &Transform), (With<Skyscraper>, Without<PendingDespawn>)>,
    q_particles: Query<(Entity, &Transform), (With<Particle>, Without<PendingDespawn>)>,
    q_labels: Query<(Entity, &Transform), (With<FloatingText>, Without<PendingDespawn>)>,
) {
    let caps = &tunables.caps;
    let left_edge = rig.center.x - tunables.view.width * 0.5;
    let cutoff = left_edge - caps.cull_margin;

    mark_behind(&mut commands, &q_platforms, caps.platforms, cutoff);
    mark_behind(&mut commands, &q_pickups, caps.pickups, cutoff);
    mark_behind(&mut commands, &q_scraps, caps.scraps, cutoff);
    mark_behind(&mut commands, &q_units, caps.enemies, cutoff);
    mark_behind(&mut commands, &q_crates, caps.crates, cutoff);
    mark_behind(&mut commands, &q_particles, caps.particles, cutoff);
    mark_behind(&mut commands, &q_labels, caps.labels, cutoff);

    // Towers scroll slowly in the background, so they get a deeper margin.
    let tower_cutoff = left_edge - caps.skyscraper_margin;
    mark_behind(&mut commands, &q_towers, caps.skyscrapers, tower_cutoff);
}

pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
