//! Run progression: distance, combo scoring, neural sync and overdrive.
//!
//! `RunStats` is the single scoreboard for a run. Distance only ever grows
//! (backtracking never refunds it), kills feed a decaying combo multiplier,
//! and full neural sync arms a ten-second overdrive during which dashes
//! kill on contact.
//!
//! Deaths arrive as buffered messages from hit resolution; the settle
//! systems here own everything that follows a death, from score to the
//! despawn mark.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::Rng;

use crate::common::cues::AudioCue;
use crate::common::intent::ControlIntent;
use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::boss::ActiveBoss;
use crate::plugins::camera::CameraRig;
use crate::plugins::cleanup::PendingDespawn;
use crate::plugins::combat::messages::{BossDefeated, UnitDestroyed};
use crate::plugins::core::SimClock;
use crate::plugins::effects;
use crate::plugins::enemies::Archetype;
use crate::plugins::pickups::{self, PickupKind};
use crate::plugins::player::Player;
use crate::plugins::SimSet;

#[derive(Resource, Debug, Clone)]
pub struct RunStats {
    /// Furthest x the player has reached this run.
    pub distance: f32,
    /// 1-based encounter zone, bumped when a boss spawns.
    pub zone: u32,
    /// Distance at which the last boss encounter was resolved.
    pub last_boss_checkpoint: f32,
    /// Distance at which the last checkpoint heal was granted.
    pub last_heal_checkpoint: f32,
    /// Score from kills, crates, pickups and bosses.
    pub kill_score: u64,
    /// Total score, recomputed every tick from distance and kills.
    pub score: u64,
    pub combo: u32,
    /// Seconds before the combo lapses.
    pub combo_timer: f32,
    /// 0..=100. Full sync arms overdrive.
    pub neural_sync: f32,
    pub overdrive: bool,
    pub overdrive_timer: f32,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            distance: 0.0,
            zone: 1,
            last_boss_checkpoint: 0.0,
            last_heal_checkpoint: 0.0,
            kill_score: 0,
            score: 0,
            combo: 0,
            combo_timer: 0.0,
            neural_sync: 0.0,
            overdrive: false,
            overdrive_timer: 0.0,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<RunStats>();
    app.add_systems(
        Update,
        activate_overdrive
            .in_set(SimSet::Player)
            .run_if(in_state(RunState::Playing)),
    );
    app.add_systems(
        Update,
        track_distance
            .in_set(SimSet::Hostiles)
            .run_if(in_state(RunState::Playing)),
    );
    app.add_systems(
        Update,
        (settle_destroyed_units, settle_boss_defeat, advance_scoring)
            .chain()
            .in_set(SimSet::Score)
            .run_if(in_state(RunState::Playing)),
    );
}

pub fn track_distance(mut stats: ResMut<RunStats>, q_player: Query<&Transform, With<Player>>) {
    let Ok(tf) = q_player.single() else {
        return;
    };
    stats.distance = stats.distance.max(tf.translation.x);
}

/// Spending sync requires a full gauge; a press with less does nothing.
pub fn activate_overdrive(
    tunables: Res<Tunables>,
    mut intent: ResMut<ControlIntent>,
    mut stats: ResMut<RunStats>,
    mut rig: ResMut<CameraRig>,
) {
    if !intent.overdrive_pressed {
        return;
    }
    intent.overdrive_pressed = false;
    if stats.overdrive || stats.neural_sync < 100.0 {
        return;
    }
    stats.overdrive = true;
    stats.overdrive_timer = tunables.progression.overdrive_duration;
    rig.add_shake(0.5);
    rig.flash = rig.flash.max(0.6);
}

pub fn settle_destroyed_units(
    tunables: Res<Tunables>,
    mut stats: ResMut<RunStats>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut cues: MessageWriter<AudioCue>,
    mut kills: MessageReader<UnitDestroyed>,
) {
    let p = &tunables.progression;
    for kill in kills.read() {
        stats.combo += 1;
        stats.combo_timer = p.combo_window;

        let mut gain =
            (p.kill_score * (1.0 + stats.combo as f32 * p.combo_bonus)).floor() as u64;
        if kill.overdrive_kill {
            gain += p.overdrive_kill_bonus;
        }
        stats.kill_score += gain;
        if !stats.overdrive {
            stats.neural_sync = (stats.neural_sync
                + p.sync_per_kill
                + p.sync_per_combo * stats.combo as f32)
                .min(100.0);
        }

        let burst = if kill.archetype == Archetype::Tank { 22 } else { 14 };
        effects::spawn_burst(&mut commands, &mut rng.0, kill.pos, burst, 260.0);
        effects::spawn_label(&mut commands, kill.pos, format!("+{gain}"));
        cues.write(AudioCue::Explosion);
        commands.entity(kill.entity).insert(PendingDespawn);
    }
}

pub fn settle_boss_defeat(
    tunables: Res<Tunables>,
    mut stats: ResMut<RunStats>,
    mut active: ResMut<ActiveBoss>,
    mut rng: ResMut<GameRng>,
    mut rig: ResMut<CameraRig>,
    mut commands: Commands,
    mut cues: MessageWriter<AudioCue>,
    mut defeats: MessageReader<BossDefeated>,
) {
    let p = &tunables.progression;
    for defeat in defeats.read() {
        debug!("boss defeated at distance {:.0}", stats.distance);
        stats.kill_score += p.boss_score;
        // Resets the interval so the next encounter is a full one away.
        stats.last_boss_checkpoint = stats.distance;
        active.0 = None;

        for _ in 0..3 {
            let offset = Vec2::new(
                rng.0.gen_range(-100.0..100.0),
                rng.0.gen_range(-100.0..100.0),
            );
            pickups::spawn_pickup(&mut commands, defeat.pos + offset, PickupKind::Spread);
        }

        effects::spawn_burst(&mut commands, &mut rng.0, defeat.pos, 40, 420.0);
        effects::spawn_label(&mut commands, defeat.pos, format!("+{}", p.boss_score));
        rig.add_shake(1.0);
        cues.write(AudioCue::HeavyExplosion);
        commands.entity(defeat.entity).insert(PendingDespawn);
    }
}

pub fn advance_scoring(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut stats: ResMut<RunStats>,
) {
    if stats.combo_timer > 0.0 {
        stats.combo_timer -= clock.dt;
        if stats.combo_timer <= 0.0 {
            stats.combo_timer = 0.0;
            stats.combo = 0;
        }
    }

    if stats.overdrive {
        stats.overdrive_timer -= clock.dt;
        if stats.overdrive_timer <= 0.0 {
            stats.overdrive = false;
            stats.overdrive_timer = 0.0;
            stats.neural_sync = 0.0;
        } else {
            // The gauge doubles as the overdrive fuel readout.
            stats.neural_sync =
                stats.overdrive_timer / tunables.progression.overdrive_duration * 100.0;
        }
    }

    stats.score = (stats.distance / 10.0).floor() as u64 + stats.kill_score;
}
