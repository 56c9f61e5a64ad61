//! Hit resolution.
//!
//! Two systems own all damage in the game:
//! - `resolve_projectile_hits` tests every **Active** round against what its
//!   faction can hurt. Player rounds check units, then crates, then the
//!   boss; enemy rounds only check the player. A round is spent by the
//!   first thing it touches.
//! - `contact_melee` handles body contact with units, after units have
//!   moved for the tick. During overdrive a dashing player kills on
//!   contact instead of taking damage.
//!
//! Neither system despawns anything. Deaths leave as [`messages`] and are
//! settled by the scoring pass, so a unit killed by a round and a unit
//! killed by an overdrive dash end the same way.

use bevy::ecs::message::{MessageWriter, Messages};
use bevy::prelude::*;

use crate::common::cues::AudioCue;
use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::boss::{ActiveBoss, Boss};
use crate::plugins::camera::CameraRig;
use crate::plugins::cleanup::PendingDespawn;
use crate::plugins::effects;
use crate::plugins::enemies::{self, Unit};
use crate::plugins::physics::{aabb_overlap, Hitbox, Velocity};
use crate::plugins::pickups::{self, PickupKind};
use crate::plugins::player::{
    self, BuffTimers, DashState, HitOutcome, JumpState, Player, Vitals,
};
use crate::plugins::projectiles::components::{
    Faction, PooledProjectile, Projectile, ProjectileKind, ProjectileState,
};
use crate::plugins::scoring::RunStats;
use crate::plugins::worldgen::Crate;
use crate::plugins::SimSet;

pub mod messages;

use messages::{BossDefeated, UnitDestroyed};

/// Knockback scale applied to an enemy round's velocity on impact.
const KNOCK_X: f32 = 0.8;
const KNOCK_Y: f32 = 0.6;
/// Upward shove every landed hit adds, so hits always pop the player.
const KNOCK_LIFT: f32 = 300.0;
/// Extra push from a knockback-class round.
const KNOCK_CLASS_X: f32 = 2.5;
const KNOCK_CLASS_LIFT: f32 = 200.0;

pub fn plugin(app: &mut App) {
    app.init_resource::<Messages<UnitDestroyed>>();
    app.init_resource::<Messages<BossDefeated>>();

    app.add_systems(
        Update,
        resolve_projectile_hits
            .in_set(SimSet::Combat)
            .run_if(in_state(RunState::Playing)),
    );
    app.add_systems(
        Update,
        contact_melee
            .in_set(SimSet::Hostiles)
            .after(enemies::update_units)
            .run_if(in_state(RunState::Playing)),
    );
    app.add_systems(PostUpdate, update_outcome_messages);
}

fn update_outcome_messages(
    mut unit_msgs: ResMut<Messages<UnitDestroyed>>,
    mut boss_msgs: ResMut<Messages<BossDefeated>>,
) {
    unit_msgs.update();
    boss_msgs.update();
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_projectile_hits(
    tunables: Res<Tunables>,
    active_boss: Res<ActiveBoss>,
    mut stats: ResMut<RunStats>,
    mut rng: ResMut<GameRng>,
    mut rig: ResMut<CameraRig>,
    mut next_state: ResMut<NextState<RunState>>,
    mut commands: Commands,
    mut cues: MessageWriter<AudioCue>,
    mut unit_kills: MessageWriter<UnitDestroyed>,
    mut boss_kills: MessageWriter<BossDefeated>,
    mut q_rounds: Query<
        (&Transform, &Hitbox, &Velocity, &Projectile, &mut ProjectileState),
        With<PooledProjectile>,
    >,
    mut q_player: Query<
        (&Transform, &Hitbox, &mut Vitals, &BuffTimers, &mut JumpState, &mut Velocity),
        (With<Player>, Without<PooledProjectile>),
    >,
    mut q_units: Query<(Entity, &Transform, &Hitbox, &mut Unit), Without<PendingDespawn>>,
    mut q_crates: Query<(Entity, &Transform, &Hitbox, &mut Crate), Without<PendingDespawn>>,
    mut q_boss: Query<(&Transform, &Hitbox, &mut Boss)>,
) {
    let Ok((player_tf, player_box, mut vitals, buffs, mut jump, mut player_vel)) =
        q_player.single_mut()
    else {
        return;
    };
    let player_pos = player_tf.translation.truncate();

    'rounds: for (tf, hitbox, vel, round, mut state) in &mut q_rounds {
        if *state != ProjectileState::Active {
            continue;
        }
        let pos = tf.translation.truncate();

        match round.faction {
            Faction::Enemy => {
                if !aabb_overlap(pos, hitbox.half, player_pos, player_box.half) {
                    continue;
                }
                // Spent even when a gate eats the damage.
                *state = ProjectileState::PendingReturn;

                let mut knock = Vec2::new(vel.x * KNOCK_X, vel.y * KNOCK_Y + KNOCK_LIFT);
                if round.kind == ProjectileKind::Knockback {
                    knock.x *= KNOCK_CLASS_X;
                    knock.y += KNOCK_CLASS_LIFT;
                }

                match player::take_hit(
                    &tunables.player,
                    &mut vitals,
                    buffs,
                    &mut jump,
                    &mut player_vel.0,
                    round.damage,
                    knock,
                    false,
                ) {
                    HitOutcome::Ignored => {}
                    HitOutcome::Absorbed => {
                        cues.write(AudioCue::Hit);
                    }
                    HitOutcome::Damaged { lethal } => {
                        rig.add_shake(0.45);
                        rig.flash = rig.flash.max(0.25);
                        cues.write(AudioCue::Hit);
                        if lethal {
                            next_state.set(RunState::GameOver);
                        }
                    }
                }
            }
            Faction::Player => {
                for (entity, unit_tf, unit_box, mut unit) in &mut q_units {
                    if unit.integrity <= 0.0 {
                        continue;
                    }
                    let unit_pos = unit_tf.translation.truncate();
                    if !aabb_overlap(pos, hitbox.half, unit_pos, unit_box.half) {
                        continue;
                    }
                    *state = ProjectileState::PendingReturn;
                    unit.integrity -= round.damage;
                    if unit.integrity <= 0.0 {
                        unit_kills.write(UnitDestroyed {
                            entity,
                            pos: unit_pos,
                            archetype: unit.archetype,
                            overdrive_kill: false,
                        });
                    } else {
                        effects::spawn_burst(&mut commands, &mut rng.0, pos, 4, 120.0);
                        cues.write(AudioCue::Impact);
                    }
                    continue 'rounds;
                }

                for (entity, crate_tf, crate_box, mut game_crate) in &mut q_crates {
                    let crate_pos = crate_tf.translation.truncate();
                    if !aabb_overlap(pos, hitbox.half, crate_pos, crate_box.half) {
                        continue;
                    }
                    *state = ProjectileState::PendingReturn;
                    game_crate.hp -= round.damage;
                    if game_crate.hp <= 0.0 {
                        break_crate(
                            &tunables,
                            &mut stats,
                            &mut rng,
                            &mut commands,
                            &mut cues,
                            entity,
                            crate_pos,
                        );
                    } else {
                        cues.write(AudioCue::Impact);
                    }
                    continue 'rounds;
                }

                let Some(boss_entity) = active_boss.0 else {
                    continue;
                };
                let Ok((boss_tf, boss_box, mut boss)) = q_boss.get_mut(boss_entity) else {
                    continue;
                };
                // The descent is a cinematic beat; rounds pass through it.
                if boss.arriving {
                    continue;
                }
                let boss_pos = boss_tf.translation.truncate();
                if !aabb_overlap(pos, hitbox.half, boss_pos, boss_box.half) {
                    continue;
                }
                *state = ProjectileState::PendingReturn;
                boss.hp -= round.damage;
                if boss.hp <= 0.0 {
                    boss_kills.write(BossDefeated { entity: boss_entity, pos: boss_pos });
                } else {
                    effects::spawn_burst(&mut commands, &mut rng.0, pos, 5, 150.0);
                    cues.write(AudioCue::Impact);
                }
            }
        }
    }
}

fn break_crate(
    tunables: &Tunables,
    stats: &mut RunStats,
    rng: &mut GameRng,
    commands: &mut Commands,
    cues: &mut MessageWriter<AudioCue>,
    entity: Entity,
    pos: Vec2,
) {
    use rand::Rng;

    let p = &tunables.progression;
    stats.kill_score += p.crate_score;
    if rng.0.gen_bool(p.crate_drop_chance) {
        pickups::spawn_pickup(commands, pos, PickupKind::roll_timed(&mut rng.0));
    }
    effects::spawn_burst(commands, &mut rng.0, pos, 10, 200.0);
    effects::spawn_label(commands, pos, format!("+{}", p.crate_score));
    cues.write(AudioCue::Explosion);
    commands.entity(entity).insert(PendingDespawn);
}

/// Body contact with a live unit. Runs after units move so the test uses
/// this tick's positions.
#[allow(clippy::too_many_arguments)]
pub fn contact_melee(
    tunables: Res<Tunables>,
    stats: Res<RunStats>,
    mut rig: ResMut<CameraRig>,
    mut next_state: ResMut<NextState<RunState>>,
    mut cues: MessageWriter<AudioCue>,
    mut unit_kills: MessageWriter<UnitDestroyed>,
    mut q_player: Query<
        (&Transform, &mut Vitals, &BuffTimers, &mut JumpState, &mut Velocity, &DashState),
        With<Player>,
    >,
    mut q_units: Query<(Entity, &Transform, &mut Unit), Without<Player>>,
) {
    let Ok((player_tf, mut vitals, buffs, mut jump, mut vel, dash)) = q_player.single_mut()
    else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let h = &tunables.hostiles;

    for (entity, unit_tf, mut unit) in &mut q_units {
        if unit.integrity <= 0.0 {
            continue;
        }
        let unit_pos = unit_tf.translation.truncate();
        if player_pos.distance(unit_pos) > h.melee_radius {
            continue;
        }

        if stats.overdrive && dash.active {
            unit.integrity = 0.0;
            unit_kills.write(UnitDestroyed {
                entity,
                pos: unit_pos,
                archetype: unit.archetype,
                overdrive_kill: true,
            });
            continue;
        }

        let knock = Vec2::new((player_pos.x - unit_pos.x) * 5.0, 200.0);
        match player::take_hit(
            &tunables.player,
            &mut vitals,
            buffs,
            &mut jump,
            &mut vel.0,
            h.melee_damage,
            knock,
            false,
        ) {
            HitOutcome::Ignored => {}
            HitOutcome::Absorbed => {
                cues.write(AudioCue::Hit);
            }
            HitOutcome::Damaged { lethal } => {
                rig.add_shake(0.3);
                cues.write(AudioCue::Hit);
                if lethal {
                    next_state.set(RunState::GameOver);
                }
            }
        }
    }
}
