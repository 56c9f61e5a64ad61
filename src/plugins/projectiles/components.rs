//! Pooled projectile data.

use bevy::prelude::*;

/// Marker for entities owned by the projectile pool.
#[derive(Component)]
pub struct PooledProjectile;

/// Newtype for entities stored in the pool free list, so a bare `Entity`
/// cannot be pushed back by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileEntity(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    Inactive,
    Active,
    PendingReturn,
}

impl Default for ProjectileState {
    fn default() -> Self {
        Self::Inactive
    }
}

/// Which side fired the round, and therefore which side it can hurt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Straight round.
    Basic,
    /// Straight round with exaggerated knockback on hit.
    Knockback,
    /// Shell that sags under gravity in flight.
    Gravity,
    /// Long-range round with extended flight time.
    Sniper,
    /// Slow, hard-hitting round.
    Heavy,
    /// Energy bolt.
    Plasma,
}

impl ProjectileKind {
    /// Seconds of flight before the round expires unspent.
    #[inline]
    pub fn lifetime(self) -> f32 {
        match self {
            Self::Sniper => 3.0,
            _ => 2.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub faction: Faction,
    pub damage: f32,
    /// Seconds of flight left.
    pub ttl: f32,
}

impl Projectile {
    #[inline]
    pub fn reset_for_fire(&mut self, kind: ProjectileKind, faction: Faction, damage: f32) {
        self.kind = kind;
        self.faction = faction;
        self.damage = damage;
        self.ttl = kind.lifetime();
    }
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            kind: ProjectileKind::Basic,
            faction: Faction::Player,
            damage: 0.0,
            ttl: 0.0,
        }
    }
}
