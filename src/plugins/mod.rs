//! Feature plugins.
//!
//! All simulation runs in the `Update` schedule, partitioned into the
//! [`SimSet`] stages below. The stage chain fixes cross-module order once,
//! here; modules only order their own systems within a stage.
//!
//! `physics` carries no plugin: it is a library of collision helpers that
//! movement systems call inline, so each mover integrates and resolves in
//! one place.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod boss;
pub mod camera;
pub mod cleanup;
pub mod combat;
pub mod core;
pub mod effects;
pub mod enemies;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod projectiles;
pub mod scoring;
pub mod worldgen;

/// Update-schedule stages, chained in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Clamp the raw delta and relax the time-scale.
    Clock,
    /// Player movement and weapon fire.
    Player,
    /// Camera rig follow, shake and flash decay.
    Camera,
    /// Buffered fire requests become live rounds.
    Allocate,
    /// Rounds fly and expire.
    Flight,
    /// Projectile hit resolution.
    Combat,
    /// Units, boss, encounter milestones, melee, cosmetics.
    Hostiles,
    /// Pickup collection.
    Pickups,
    /// Terrain generation ahead of the player.
    Worldgen,
    /// Entity cap enforcement.
    Trim,
    /// Death settlement and score recompute.
    Score,
}

/// Register every simulation plugin. The app stays headless; rendering,
/// audio and input live with the host.
pub fn register_gameplay(app: &mut App) {
    app.configure_sets(
        Update,
        (
            SimSet::Clock,
            SimSet::Player,
            SimSet::Camera,
            SimSet::Allocate,
            SimSet::Flight,
            SimSet::Combat,
            SimSet::Hostiles,
            SimSet::Pickups,
            SimSet::Worldgen,
            SimSet::Trim,
            SimSet::Score,
        )
            .chain(),
    );

    core::plugin(app);
    camera::plugin(app);
    player::plugin(app);
    combat::plugin(app);
    enemies::plugin(app);
    boss::plugin(app);
    effects::plugin(app);
    pickups::plugin(app);
    worldgen::plugin(app);
    cleanup::plugin(app);
    scoring::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}
