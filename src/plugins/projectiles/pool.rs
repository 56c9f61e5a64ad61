//! Projectile pool: pre-spawned entities, recycled without structural
//! changes.
//!
//! Activation and return mutate component values in place, so a round's
//! whole life never moves it between archetypes.

use bevy::prelude::*;

use crate::plugins::physics::{Hitbox, Velocity};

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};

/// Every round collides as a fixed 20x20 box regardless of kind.
pub const PROJECTILE_SIZE: f32 = 20.0;

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    free: Vec<ProjectileEntity>,
    capacity: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<ProjectileEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: ProjectileEntity) {
        self.free.push(e);
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}

/// Pre-spawn the whole pool, inactive and parked at the origin.
pub fn init_projectile_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    pool.clear();
    for _ in 0..pool.capacity() {
        let e = commands
            .spawn((
                Name::new("Projectile(Pooled)"),
                PooledProjectile,
                ProjectileState::Inactive,
                Projectile::default(),
                Hitbox::new(PROJECTILE_SIZE, PROJECTILE_SIZE),
                Transform::from_xyz(0.0, 0.0, 0.0),
                Velocity(Vec2::ZERO),
            ))
            .id();
        pool.push_free(ProjectileEntity(e));
    }
}
