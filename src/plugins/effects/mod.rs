//! Cosmetic particles and floating score labels.
//!
//! These are real entities so the trimmer can budget them, but nothing
//! gameplay-relevant reads them back; the snapshot exposes them for the
//! host to draw.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::common::state::RunState;
use crate::plugins::cleanup::{PendingDespawn, RunScoped};
use crate::plugins::core::SimClock;
use crate::plugins::SimSet;

/// Particle drag per second of life.
const DRAG: f32 = 2.5;
/// Light downward pull so bursts arc instead of floating.
const PARTICLE_GRAVITY: f32 = 500.0;
/// Upward drift of score labels, units per second.
const LABEL_RISE: f32 = 40.0;
const LABEL_TTL: f32 = 0.9;

#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub vel: Vec2,
    pub ttl: f32,
    pub max_ttl: f32,
}

#[derive(Component, Debug, Clone)]
pub struct FloatingText {
    pub label: String,
    pub ttl: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (update_particles, update_labels)
            .in_set(SimSet::Hostiles)
            .run_if(in_state(RunState::Playing)),
    );
}

/// Scatter `count` particles from `pos` with speeds up to `speed`.
pub fn spawn_burst(
    commands: &mut Commands,
    rng: &mut StdRng,
    pos: Vec2,
    count: usize,
    speed: f32,
) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let magnitude = rng.gen_range(0.3..1.0) * speed;
        let ttl = rng.gen_range(0.3..0.6);
        commands.spawn((
            Name::new("Particle"),
            RunScoped,
            Particle {
                vel: Vec2::from_angle(angle) * magnitude,
                ttl,
                max_ttl: ttl,
            },
            Transform::from_xyz(pos.x, pos.y, 3.0),
        ));
    }
}

pub fn spawn_label(commands: &mut Commands, pos: Vec2, label: String) {
    commands.spawn((
        Name::new("FloatingText"),
        RunScoped,
        FloatingText { label, ttl: LABEL_TTL },
        Transform::from_xyz(pos.x, pos.y, 4.0),
    ));
}

pub fn update_particles(
    clock: Res<SimClock>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Particle, &mut Transform)>,
) {
    let dt = clock.dt;
    for (e, mut particle, mut tf) in &mut q {
        particle.ttl -= dt;
        if particle.ttl <= 0.0 {
            commands.entity(e).insert(PendingDespawn);
            continue;
        }
        particle.vel *= (1.0 - DRAG * dt).max(0.0);
        particle.vel.y -= PARTICLE_GRAVITY * dt;
        tf.translation.x += particle.vel.x * dt;
        tf.translation.y += particle.vel.y * dt;
    }
}

pub fn update_labels(
    clock: Res<SimClock>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut FloatingText, &mut Transform)>,
) {
    let dt = clock.dt;
    for (e, mut text, mut tf) in &mut q {
        text.ttl -= dt;
        if text.ttl <= 0.0 {
            commands.entity(e).insert(PendingDespawn);
            continue;
        }
        tf.translation.y += LABEL_RISE * dt;
    }
}

#[cfg(test)]
mod tests;
