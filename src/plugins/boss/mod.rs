//! Boss encounters: spawn scheduling, arrival, orbit tracking, and the
//! phase-cycled attack patterns.
//!
//! There is at most one boss alive. [`ActiveBoss`] is the single source of
//! truth for that; the scheduler refuses to spawn while it holds an entity
//! and scoring clears it on defeat. Everything the boss shoots goes
//! through the same `FireRequest` queue as every other gun in the game.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::common::cues::AudioCue;
use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::camera::CameraRig;
use crate::plugins::cleanup::RunScoped;
use crate::plugins::core::SimClock;
use crate::plugins::physics::Hitbox;
use crate::plugins::player::{Player, Vitals};
use crate::plugins::projectiles::components::{Faction, ProjectileKind};
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::scoring::{self, RunStats};
use crate::plugins::SimSet;

const BOSS_SIZE: Vec2 = Vec2::new(140.0, 120.0);
/// Arrival counts as finished inside this distance to the anchor.
const ARRIVE_EPSILON: f32 = 10.0;

#[derive(Component, Debug, Clone)]
pub struct Boss {
    /// Fight anchor chosen at spawn; the boss descends to it, then orbits
    /// relative to the live player position.
    pub anchor: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub power_level: u32,
    pub phase: u32,
    pub phase_count: u32,
    /// Free-running clock driving the orbit and rain patterns.
    pub orbit_clock: f32,
    /// Seconds into the current phase.
    pub cycle: f32,
    /// Seconds since the last volley.
    pub volley: f32,
    pub arriving: bool,
}

/// The one boss slot. `None` means encounters may schedule a new one.
#[derive(Resource, Debug, Default)]
pub struct ActiveBoss(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.init_resource::<ActiveBoss>();
    app.add_systems(
        Update,
        (
            advance_encounters.after(scoring::track_distance),
            advance_boss.after(advance_encounters),
        )
            .in_set(SimSet::Hostiles)
            .run_if(in_state(RunState::Playing)),
    );
}

/// Distance milestones: every boss interval spawns an encounter; between
/// them, heal checkpoints top the player up. Neither fires while a boss
/// is alive.
#[allow(clippy::too_many_arguments)]
pub fn advance_encounters(
    tunables: Res<Tunables>,
    mut stats: ResMut<RunStats>,
    mut active: ResMut<ActiveBoss>,
    mut clock: ResMut<SimClock>,
    mut rig: ResMut<CameraRig>,
    mut cues: MessageWriter<AudioCue>,
    mut commands: Commands,
    mut q_player: Query<(&Transform, &mut Vitals), With<Player>>,
) {
    if active.0.is_some() {
        return;
    }
    let Ok((player_tf, mut vitals)) = q_player.single_mut() else {
        return;
    };
    let b = &tunables.boss;
    let p = &tunables.progression;

    if stats.distance - stats.last_boss_checkpoint > p.boss_interval {
        let player = player_tf.translation.truncate();
        let power_level = (stats.distance / p.power_level_divisor) as u32;
        let hp = b.base_hp + power_level as f32 * b.hp_per_level;
        let phase_count = (b.base_phases + power_level.saturating_sub(1)).min(b.max_phases);
        let anchor = player + Vec2::new(b.spawn_lead, 0.0);

        let e = commands
            .spawn((
                Name::new("Boss"),
                RunScoped,
                Boss {
                    anchor,
                    hp,
                    max_hp: hp,
                    power_level,
                    phase: 0,
                    phase_count,
                    orbit_clock: 0.0,
                    cycle: 0.0,
                    volley: 0.0,
                    arriving: true,
                },
                Hitbox::new(BOSS_SIZE.x, BOSS_SIZE.y),
                Transform::from_xyz(anchor.x, anchor.y + b.spawn_rise, 1.0),
            ))
            .id();
        active.0 = Some(e);
        debug!("boss encounter at distance {:.0}, power level {power_level}", stats.distance);

        stats.last_boss_checkpoint = stats.distance;
        stats.zone += 1;
        clock.slow(0.3);
        rig.add_shake(0.6);
        cues.write(AudioCue::BossEntry);
        return;
    }

    if stats.distance - stats.last_heal_checkpoint > p.checkpoint_interval {
        stats.last_heal_checkpoint = stats.distance;
        vitals.hp = (vitals.hp + p.checkpoint_heal).min(vitals.max_hp);
    }
}

/// Boss behaviour tick: descend to the anchor, then orbit around a point
/// ahead of the player and run the current phase's volley pattern. The
/// phase advances strictly after each full cycle, wrapping modulo the
/// phase count.
pub fn advance_boss(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    active: Res<ActiveBoss>,
    mut rng: ResMut<GameRng>,
    mut q_boss: Query<(&mut Boss, &mut Transform)>,
    q_player: Query<&Transform, (With<Player>, Without<Boss>)>,
    mut fire: MessageWriter<FireRequest>,
) {
    let Some(boss_entity) = active.0 else {
        return;
    };
    let Ok((mut boss, mut tf)) = q_boss.get_mut(boss_entity) else {
        return;
    };
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player = player_tf.translation.truncate();
    let b = &tunables.boss;
    let dt = clock.dt;

    boss.orbit_clock += dt;
    boss.cycle += dt;
    boss.volley += dt;

    let mut pos = tf.translation.truncate();
    if boss.arriving {
        pos += (boss.anchor - pos) * b.arrive_lerp;
        if (boss.anchor - pos).length() < ARRIVE_EPSILON {
            boss.arriving = false;
        }
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        return;
    }

    let orbit = boss.orbit_clock;
    let target = Vec2::new(
        player.x + 650.0 + orbit.sin() * 450.0,
        player.y + 200.0 + (orbit * 0.75).cos() * 180.0,
    );
    pos += (target - pos) * b.track_lerp;
    tf.translation.x = pos.x;
    tf.translation.y = pos.y;

    if boss.cycle > b.cycle_seconds {
        boss.phase = (boss.phase + 1) % boss.phase_count;
        boss.cycle = 0.0;
        boss.volley = 0.0;
    }

    let interval = match boss.phase {
        0 => 0.8,
        1 => 1.2,
        2 => 2.0,
        3 => 0.4,
        _ => 0.1,
    };
    if boss.volley < interval {
        return;
    }
    boss.volley = 0.0;

    let mut shoot = |from: Vec2, vel: Vec2, damage: f32, kind: ProjectileKind| {
        fire.write(FireRequest {
            kind,
            faction: Faction::Enemy,
            pos: from,
            vel,
            damage,
        });
    };

    match boss.phase {
        // Tri-burst: a short aimed fan.
        0 => {
            let aim = (player - pos).normalize_or(Vec2::NEG_X);
            for i in -1..=1 {
                let vel = Vec2::from_angle(i as f32 * 0.3).rotate(aim) * 550.0;
                shoot(pos, vel, 15.0, ProjectileKind::Basic);
            }
        }
        // Nova: a slowly rotating 10-round ring.
        1 => {
            for i in 0..10 {
                let angle = i as f32 * std::f32::consts::TAU / 10.0 + orbit * 3.0;
                shoot(pos, Vec2::from_angle(angle) * 420.0, 20.0, ProjectileKind::Basic);
            }
        }
        // Snipe: one fast aimed round.
        2 => {
            fire.write(FireRequest::aimed(
                ProjectileKind::Sniper,
                Faction::Enemy,
                pos,
                player,
                1100.0,
                30.0,
            ));
        }
        // Barrage: shells dropped from above the view, scattered around
        // the boss's column.
        3 => {
            let drop_x = pos.x + rng.0.gen_range(-400.0..800.0);
            let drop = Vec2::new(drop_x, player.y + tunables.view.height * 0.5 + 100.0);
            shoot(drop, Vec2::new(0.0, -700.0), 15.0, ProjectileKind::Basic);
        }
        // Rain: a sweeping downward spray.
        _ => {
            let angle = -std::f32::consts::FRAC_PI_2 + (orbit * 5.0).sin() * 0.5;
            shoot(pos, Vec2::from_angle(angle) * 600.0, 10.0, ProjectileKind::Plasma);
        }
    }
}
