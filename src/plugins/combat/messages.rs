//! Combat outcomes, buffered for the scoring pass.
//!
//! Hit resolution only decides *that* something died and records where.
//! Score, combo, drops and despawn are settled later in the tick by the
//! scoring systems, so every death takes one code path no matter what
//! killed it.

use bevy::prelude::*;

use crate::plugins::enemies::Archetype;

/// A unit's integrity reached zero this tick.
#[derive(Message, Clone, Copy, Debug)]
pub struct UnitDestroyed {
    pub entity: Entity,
    pub pos: Vec2,
    pub archetype: Archetype,
    /// True when an overdrive dash did the killing instead of a round.
    pub overdrive_kill: bool,
}

/// The active boss's hull reached zero this tick.
#[derive(Message, Clone, Copy, Debug)]
pub struct BossDefeated {
    pub entity: Entity,
    pub pos: Vec2,
}
