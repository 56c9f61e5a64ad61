//! Pickups: weapon swaps and timed power-ups.
//!
//! Weapon pickups always collect and replace the current armament. Timed
//! power-ups are mutually exclusive: while any buff timer runs, a timed
//! pickup is refused and left in the world, untouched, so the player can
//! come back for it.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::common::cues::AudioCue;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::cleanup::{PendingDespawn, RunScoped};
use crate::plugins::effects;
use crate::plugins::player::{Armament, BuffTimers, Loadout, Player};
use crate::plugins::scoring::RunStats;
use crate::plugins::SimSet;

/// Centre-to-centre collection radius.
const COLLECT_RADIUS: f32 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    // Weapon swaps.
    Pulse,
    Spread,
    Heavy,
    Plasma,
    // Timed power-ups.
    RapidFire,
    Speed,
    Shield,
}

impl PickupKind {
    pub fn is_timed(self) -> bool {
        matches!(self, Self::RapidFire | Self::Speed | Self::Shield)
    }

    pub fn as_armament(self) -> Option<Armament> {
        match self {
            Self::Pulse => Some(Armament::Pulse),
            Self::Spread => Some(Armament::Spread),
            Self::Heavy => Some(Armament::Heavy),
            Self::Plasma => Some(Armament::Plasma),
            _ => None,
        }
    }

    /// Buff duration in seconds. Zero for weapon swaps.
    pub fn duration(self) -> f32 {
        match self {
            Self::RapidFire | Self::Speed => 8.0,
            Self::Shield => 10.0,
            _ => 0.0,
        }
    }

    /// Uniform roll over the timed kinds, used for crate drops.
    pub fn roll_timed(rng: &mut StdRng) -> Self {
        match rng.gen_range(0..3) {
            0 => Self::RapidFire,
            1 => Self::Speed,
            _ => Self::Shield,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        collect_pickups
            .in_set(SimSet::Pickups)
            .run_if(in_state(RunState::Playing)),
    );
}

pub fn spawn_pickup(commands: &mut Commands, pos: Vec2, kind: PickupKind) {
    commands.spawn((
        Name::new(format!("Pickup({kind:?})")),
        RunScoped,
        Pickup { kind },
        Transform::from_xyz(pos.x, pos.y, 1.0),
    ));
}

pub fn collect_pickups(
    tunables: Res<Tunables>,
    mut stats: ResMut<RunStats>,
    mut commands: Commands,
    mut cues: MessageWriter<AudioCue>,
    mut q_player: Query<(&Transform, &mut Loadout, &mut BuffTimers), With<Player>>,
    q_pickups: Query<(Entity, &Transform, &Pickup), Without<PendingDespawn>>,
) {
    let Ok((player_tf, mut loadout, mut buffs)) = q_player.single_mut() else {
        return;
    };
    let player = player_tf.translation.truncate();
    let reward = tunables.progression.pickup_score;

    for (e, tf, pickup) in &q_pickups {
        let pos = tf.translation.truncate();
        if player.distance(pos) > COLLECT_RADIUS {
            continue;
        }

        if pickup.kind.is_timed() {
            // One buff at a time; refused pickups stay where they are.
            if buffs.any_active() {
                continue;
            }
            let duration = pickup.kind.duration();
            match pickup.kind {
                PickupKind::RapidFire => buffs.rapid_fire = duration,
                PickupKind::Speed => buffs.speed_boost = duration,
                PickupKind::Shield => buffs.shield = duration,
                _ => unreachable!(),
            }
        } else if let Some(armament) = pickup.kind.as_armament() {
            loadout.armament = armament;
        }

        stats.kill_score += reward;
        effects::spawn_label(&mut commands, pos, format!("+{reward}"));
        cues.write(AudioCue::Pickup);
        commands.entity(e).insert(PendingDespawn);
    }
}

#[cfg(test)]
mod tests;
