//! Fire consumer: activate projectiles from the pool.
//!
//! # Fail-fast invariants
//! - The pool free list contains only valid pooled projectile entities.
//! - Therefore, a pooled entity must match the projectile query.
//!
//! If this is violated, we `expect()` and crash loudly.
//! This removes branches from the hot loop and makes invariant violations
//! obvious.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::plugins::physics::Velocity;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};
use super::messages::FireRequest;
use super::pool::ProjectilePool;

pub fn allocate_projectiles(
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<FireRequest>,
    mut q: Query<
        (&mut ProjectileState, &mut Projectile, &mut Transform, &mut Velocity),
        With<PooledProjectile>,
    >,
) {
    for req in reader.read() {
        let Some(ProjectileEntity(e)) = pool.pop_free() else {
            // Capacity decision, not a correctness failure.
            debug!("projectile pool exhausted, dropping fire request");
            continue;
        };

        let (mut state, mut projectile, mut tf, mut vel) = q
            .get_mut(e)
            .expect("ProjectilePool contained an entity missing pooled projectile components");

        *state = ProjectileState::Active;
        projectile.reset_for_fire(req.kind, req.faction, req.damage);
        tf.translation = req.pos.extend(0.0);
        vel.0 = req.vel;
    }
}
