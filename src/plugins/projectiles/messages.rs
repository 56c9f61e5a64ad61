//! Buffered fire requests.
//!
//! We use Bevy **Messages** here instead of direct pool access.
//! The key idea is separation of concerns:
//! - producers create *intent* (player weapon, unit guns, boss patterns)
//! - the consumer applies intent (pool pop + component writes)
//!
//! This is a producer → queue → consumer pipeline.

use bevy::prelude::*;

use super::components::{Faction, ProjectileKind};

#[derive(Message, Clone, Copy, Debug)]
pub struct FireRequest {
    pub kind: ProjectileKind,
    pub faction: Faction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
}

impl FireRequest {
    /// Request a round fired from `pos` toward `target` at `speed`.
    pub fn aimed(
        kind: ProjectileKind,
        faction: Faction,
        pos: Vec2,
        target: Vec2,
        speed: f32,
        damage: f32,
    ) -> Self {
        let dir = (target - pos).normalize_or(Vec2::X);
        Self { kind, faction, pos, vel: dir * speed, damage }
    }
}
