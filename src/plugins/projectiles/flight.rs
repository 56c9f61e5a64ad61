//! Flight integration for active rounds.
//!
//! Projectiles ignore solids; they expire on hit (combat) or when their
//! lifetime runs out here.

use bevy::prelude::*;

use crate::plugins::core::SimClock;
use crate::plugins::physics::Velocity;

use super::components::{PooledProjectile, Projectile, ProjectileKind, ProjectileState};

/// Downward pull on gravity shells, units per second squared.
const SHELL_GRAVITY: f32 = 800.0;

pub fn update_flight(
    clock: Res<SimClock>,
    mut q: Query<
        (&mut ProjectileState, &mut Projectile, &mut Transform, &mut Velocity),
        With<PooledProjectile>,
    >,
) {
    let dt = clock.dt;
    for (mut state, mut projectile, mut tf, mut vel) in &mut q {
        if *state != ProjectileState::Active {
            continue;
        }
        projectile.ttl -= dt;
        if projectile.ttl <= 0.0 {
            *state = ProjectileState::PendingReturn;
            continue;
        }
        if projectile.kind == ProjectileKind::Gravity {
            vel.y -= SHELL_GRAVITY * dt;
        }
        tf.translation.x += vel.x * dt;
        tf.translation.y += vel.y * dt;
    }
}
