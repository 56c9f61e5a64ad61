//! Return commit: recycle projectiles back into the pool.
//!
//! This system is the "owner" of the *Inactive invariants*.
//!
//! Invariant: Inactive rounds must be:
//! - motionless (velocity zero)
//! - invisible to combat and snapshots (both filter on `Active`)
//!
//! Centralizing these writes here prevents inconsistencies.

use bevy::prelude::*;

use crate::plugins::physics::Velocity;

use super::components::{PooledProjectile, ProjectileEntity, ProjectileState};
use super::pool::ProjectilePool;

pub fn return_to_pool_commit(
    mut pool: ResMut<ProjectilePool>,
    mut q: Query<(Entity, &mut ProjectileState, &mut Velocity), With<PooledProjectile>>,
) {
    for (e, mut state, mut vel) in &mut q {
        if *state != ProjectileState::PendingReturn {
            continue;
        }

        *state = ProjectileState::Inactive;
        vel.0 = Vec2::ZERO;

        pool.push_free(ProjectileEntity(e));
    }
}
