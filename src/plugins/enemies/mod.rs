//! Hostile units: three archetypes with per-archetype stats and firing
//! patterns.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components:
//!    - `Unit` carries integrity, the recharge timer, and per-unit drift.
//!    - `Archetype` is a closed enum; its stat tables are methods, so a
//!      unit's numbers can never drift apart from its kind.
//!
//! 2) RULES mutate facts in predictable places:
//!    - this module moves units and emits `FireRequest` intent;
//!    - the combat plugin applies damage and reports kills;
//!    - scoring consumes kill reports and marks the corpse.
//!
//! 3) Nothing here despawns directly. Behind-camera units get
//!    `PendingDespawn` and the cleanup pass reclaims them, silently: no
//!    score, no cue, no drop.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::cleanup::{PendingDespawn, RunScoped};
use crate::plugins::core::SimClock;
use crate::plugins::physics::Hitbox;
use crate::plugins::player::Player;
use crate::plugins::projectiles::components::{Faction, ProjectileKind};
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::scoring::RunStats;
use crate::plugins::SimSet;

// -----------------------------------------------------------------------------
// Archetypes
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    /// Bobbing close-range harasser.
    Drone,
    /// Fragile, slow-firing, long-range.
    Sniper,
    /// Durable lobber.
    Tank,
}

impl Archetype {
    /// Weighted roll used by the world generator.
    pub fn roll(rng: &mut StdRng) -> Self {
        if rng.gen_bool(0.15) {
            Self::Sniper
        } else if rng.gen_bool(0.3) {
            Self::Tank
        } else {
            Self::Drone
        }
    }

    pub fn integrity(self) -> f32 {
        match self {
            Self::Drone => 60.0,
            Self::Sniper => 30.0,
            Self::Tank => 120.0,
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            Self::Drone => Vec2::new(34.0, 34.0),
            Self::Sniper => Vec2::new(30.0, 42.0),
            Self::Tank => Vec2::new(52.0, 44.0),
        }
    }

    /// Seconds between shots once the unit has fired.
    fn fire_reset(self) -> f32 {
        match self {
            Self::Sniper => 4.0,
            Self::Drone | Self::Tank => 2.8,
        }
    }

    /// (speed, damage, kind, upward angle bias) of this archetype's shot.
    fn shot(self) -> (f32, f32, ProjectileKind, f32) {
        match self {
            Self::Drone => (550.0, 10.0, ProjectileKind::Knockback, 0.0),
            Self::Sniper => (1400.0, 15.0, ProjectileKind::Sniper, 0.0),
            // Lobbed shell: aimed above the player so gravity brings it down.
            Self::Tank => (700.0, 25.0, ProjectileKind::Gravity, 0.2),
        }
    }
}

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone)]
pub struct Unit {
    pub archetype: Archetype,
    pub integrity: f32,
    /// Seconds until the next shot.
    pub recharge: f32,
    /// Per-unit horizontal drift speed before the difficulty multiplier.
    pub drift: f32,
    /// Oscillator phase for the drone bob.
    pub osc: f32,
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (update_units, cull_units_behind)
            .in_set(SimSet::Hostiles)
            .run_if(in_state(RunState::Playing)),
    );
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

/// Spawn a unit of a rolled archetype. Used by the world generator.
pub fn spawn_unit(commands: &mut Commands, rng: &mut StdRng, pos: Vec2) -> Entity {
    let archetype = Archetype::roll(rng);
    spawn_unit_of(commands, rng, pos, archetype)
}

pub fn spawn_unit_of(
    commands: &mut Commands,
    rng: &mut StdRng,
    pos: Vec2,
    archetype: Archetype,
) -> Entity {
    let size = archetype.size();
    // Snipers hold their perch; tanks close slower than drones.
    let drift = match archetype {
        Archetype::Drone => rng.gen_range(45.0..80.0),
        Archetype::Sniper => 0.0,
        Archetype::Tank => rng.gen_range(25.0..45.0),
    };
    commands
        .spawn((
            Name::new(format!("Unit({archetype:?})")),
            RunScoped,
            Unit {
                archetype,
                integrity: archetype.integrity(),
                // Stagger first shots so a fresh segment doesn't volley at once.
                recharge: rng.gen_range(1.5..4.5),
                drift,
                osc: rng.gen_range(0.0..std::f32::consts::TAU),
            },
            Hitbox::new(size.x, size.y),
            Transform::from_xyz(pos.x, pos.y, 1.0),
        ))
        .id()
}

// -----------------------------------------------------------------------------
// Rules: movement + fire
// -----------------------------------------------------------------------------

/// Per-tick unit behaviour: drift toward the player, bob if a drone, and
/// fire once recharged and inside engagement range.
///
/// Dead units (integrity spent) still awaiting their kill settlement are
/// skipped so they neither move nor fire on their last tick.
pub fn update_units(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    stats: Res<RunStats>,
    mut q_units: Query<(&mut Unit, &mut Transform), Without<PendingDespawn>>,
    q_player: Query<&Transform, (With<Player>, Without<Unit>)>,
    mut fire: MessageWriter<FireRequest>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player = player_tf.translation.truncate();
    let h = &tunables.hostiles;
    let dt = clock.dt;

    // Units close in faster the further the run has gone.
    let difficulty = 1.0 + stats.distance / h.difficulty_distance;

    for (mut unit, mut tf) in &mut q_units {
        if unit.integrity <= 0.0 {
            continue;
        }

        let dir = (player.x - tf.translation.x).signum();
        tf.translation.x += dir * unit.drift * difficulty * dt;

        if unit.archetype == Archetype::Drone {
            unit.osc += 4.0 * dt;
            tf.translation.y += unit.osc.sin() * 1.8;
        }

        unit.recharge -= dt;
        if unit.recharge > 0.0 {
            continue;
        }
        let pos = tf.translation.truncate();
        if pos.distance(player) > h.engagement_range {
            continue;
        }

        let (speed, damage, kind, lift) = unit.archetype.shot();
        let aim = (player - pos).normalize_or(Vec2::X);
        // Lift rotates toward up whichever way the unit faces.
        let vel = Vec2::from_angle(lift * aim.x.signum()).rotate(aim) * speed;
        fire.write(FireRequest {
            kind,
            faction: Faction::Enemy,
            pos,
            vel,
            damage,
        });
        unit.recharge = unit.archetype.fire_reset();
    }
}

// -----------------------------------------------------------------------------
// Rules: silent reclaim
// -----------------------------------------------------------------------------

/// Units far behind the camera are reclaimed outright, independent of the
/// cap-based trimmer.
pub fn cull_units_behind(
    tunables: Res<Tunables>,
    rig: Res<CameraRig>,
    mut commands: Commands,
    q_units: Query<(Entity, &Transform), (With<Unit>, Without<PendingDespawn>)>,
) {
    let cutoff =
        rig.center.x - tunables.view.width * 0.5 - tunables.hostiles.cull_margin;
    for (e, tf) in &q_units {
        if tf.translation.x < cutoff {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}
