//! Player plugin.
//!
//! One movement system owns the whole per-tick sequence (dash, drive,
//! timers, gravity, integrate, resolve, landing, buffered jumps, void
//! check) because each step feeds the next within a single tick. The
//! weapon runs after it so shots leave from the post-move muzzle.
//!
//! [`take_hit`] is a plain function, not a system: the combat plugin and
//! the void check both route damage through it so the gate order
//! (i-frames, shield, armor) lives in exactly one place.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::cues::AudioCue;
use crate::common::intent::ControlIntent;
use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::{PlayerTunables, Tunables};
use crate::plugins::cleanup::RunScoped;
use crate::plugins::core::SimClock;
use crate::plugins::effects;
use crate::plugins::physics::{resolve_solids, Hitbox, Solid, Velocity};
use crate::plugins::projectiles::components::{Faction, ProjectileKind};
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::scoring::RunStats;
use crate::plugins::SimSet;

#[derive(Component)]
pub struct Player;

/// Health and damage gating.
#[derive(Component, Debug, Clone)]
pub struct Vitals {
    pub hp: f32,
    pub max_hp: f32,
    /// Seconds of invulnerability left.
    pub i_frames: f32,
    /// Set by a lethal hit. A compromised player takes no further damage;
    /// the run is already over.
    pub compromised: bool,
    /// One-hit armor granted by a weapon upgrade taken at full health.
    pub armor_shield: bool,
}

#[derive(Component, Debug, Clone, Default)]
pub struct JumpState {
    pub grounded: bool,
    pub jumps_used: u32,
    /// Seconds left in which a buffered press may still trigger a jump.
    pub buffer: f32,
    /// Seconds after leaving a ledge during which a ground jump still
    /// counts as the first jump.
    pub coyote: f32,
}

#[derive(Component, Debug, Clone, Default)]
pub struct DashState {
    pub active: bool,
    /// Seconds left in the current dash.
    pub window: f32,
    /// Seconds until the next dash is available.
    pub reload: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Armament {
    Pulse,
    Spread,
    Heavy,
    Plasma,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Loadout {
    pub armament: Armament,
    pub level: u32,
    /// Seconds until the weapon may fire again.
    pub recharge: f32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self { armament: Armament::Pulse, level: 1, recharge: 0.0 }
    }
}

/// Timed power-up effects. Collection refuses a new timed power-up while
/// any of these runs, so they never stack.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BuffTimers {
    pub rapid_fire: f32,
    pub speed_boost: f32,
    pub shield: f32,
}

impl BuffTimers {
    pub fn any_active(&self) -> bool {
        self.rapid_fire > 0.0 || self.speed_boost > 0.0 || self.shield > 0.0
    }

    fn tick(&mut self, dt: f32) {
        self.rapid_fire = (self.rapid_fire - dt).max(0.0);
        self.speed_boost = (self.speed_boost - dt).max(0.0);
        self.shield = (self.shield - dt).max(0.0);
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (update_movement, update_weapon.after(update_movement))
            .in_set(SimSet::Player)
            .run_if(in_state(RunState::Playing)),
    );
}

pub fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let p = &tunables.player;
    commands.spawn((
        Name::new("Player"),
        Player,
        RunScoped,
        Transform::from_xyz(p.spawn.x, p.spawn.y, 1.0),
        Velocity(Vec2::ZERO),
        Hitbox::new(p.size.x, p.size.y),
        Vitals {
            hp: p.max_health,
            max_hp: p.max_health,
            i_frames: 0.0,
            compromised: false,
            armor_shield: false,
        },
        JumpState::default(),
        DashState::default(),
        Loadout::default(),
        BuffTimers::default(),
    ));
}

pub fn update_movement(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    mut intent: ResMut<ControlIntent>,
    mut rng: ResMut<GameRng>,
    mut next: ResMut<NextState<RunState>>,
    mut cues: MessageWriter<AudioCue>,
    mut commands: Commands,
    mut q_player: Query<
        (
            &mut Transform,
            &mut Velocity,
            &Hitbox,
            &mut Vitals,
            &mut JumpState,
            &mut DashState,
            &mut BuffTimers,
        ),
        With<Player>,
    >,
    q_solids: Query<(&Transform, &Hitbox), (With<Solid>, Without<Player>)>,
) {
    let Ok((mut tf, mut vel, hitbox, mut vitals, mut jump, mut dash, mut buffs)) =
        q_player.single_mut()
    else {
        return;
    };
    let p = &tunables.player;
    let dt = clock.dt;

    // Dash trigger first so the multiplier applies this same tick.
    if intent.dash_pressed {
        intent.dash_pressed = false;
        if !dash.active && dash.reload <= 0.0 {
            dash.active = true;
            dash.window = p.dash_window;
            dash.reload = p.dash_reload;
            vitals.i_frames = vitals.i_frames.max(p.dash_i_frames);
            cues.write(AudioCue::Dash);
        }
    }

    let mut vx = intent.move_axis.clamp(-1.0, 1.0) * p.move_speed;
    if buffs.speed_boost > 0.0 {
        vx *= p.speed_boost_mult;
    }
    if dash.active {
        vx *= p.dash_multiplier;
        dash.window -= dt;
        if dash.window <= 0.0 {
            dash.active = false;
        }
    }
    vel.x = vx;

    dash.reload = (dash.reload - dt).max(0.0);
    vitals.i_frames = (vitals.i_frames - dt).max(0.0);
    buffs.tick(dt);

    vel.y -= p.gravity * dt;

    tf.translation.x += vel.x * dt;
    tf.translation.y += vel.y * dt;

    let was_grounded = jump.grounded;
    let mut pos = tf.translation.truncate();
    let grounded = resolve_solids(
        &mut pos,
        hitbox.half,
        &mut vel.0,
        q_solids
            .iter()
            .map(|(t, h)| (t.translation.truncate(), h.half)),
    );
    tf.translation.x = pos.x;
    tf.translation.y = pos.y;

    jump.grounded = grounded;
    if grounded {
        jump.jumps_used = 0;
        jump.coyote = p.coyote_time;
        if !was_grounded {
            cues.write(AudioCue::Impact);
            effects::spawn_burst(
                &mut commands,
                &mut rng.0,
                pos - Vec2::new(0.0, hitbox.half.y),
                6,
                140.0,
            );
        }
    } else {
        jump.coyote = (jump.coyote - dt).max(0.0);
    }

    if intent.jump_pressed {
        intent.jump_pressed = false;
        jump.buffer = p.jump_buffer;
    } else {
        jump.buffer = (jump.buffer - dt).max(0.0);
    }

    if jump.buffer > 0.0 {
        let ground_jump = jump.grounded || jump.coyote > 0.0;
        if ground_jump || jump.jumps_used < p.jump_limit {
            if ground_jump {
                jump.jumps_used = 1;
            } else {
                jump.jumps_used += 1;
            }
            vel.y = p.jump_power;
            jump.buffer = 0.0;
            jump.coyote = 0.0;
            jump.grounded = false;
            cues.write(AudioCue::Jump);
        }
    }

    // The void is lethal no matter what the player is carrying.
    if tf.translation.y < tunables.world.fall_kill_y {
        let outcome = take_hit(
            p,
            &mut vitals,
            &buffs,
            &mut jump,
            &mut vel.0,
            999.0,
            Vec2::ZERO,
            true,
        );
        if matches!(outcome, HitOutcome::Damaged { lethal: true }) {
            next.set(RunState::GameOver);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Gated by i-frames, an active shield power-up, or an already
    /// compromised player.
    Ignored,
    /// Eaten by the one-hit armor.
    Absorbed,
    Damaged { lethal: bool },
}

/// Routes damage through the player's gates in order: i-frames and shield
/// ignore the hit, armor absorbs one, anything else lands. `forced`
/// bypasses every gate (the void). Health never goes below zero.
#[allow(clippy::too_many_arguments)]
pub fn take_hit(
    tunables: &PlayerTunables,
    vitals: &mut Vitals,
    buffs: &BuffTimers,
    jump: &mut JumpState,
    vel: &mut Vec2,
    damage: f32,
    knockback: Vec2,
    forced: bool,
) -> HitOutcome {
    if !forced && (vitals.i_frames > 0.0 || vitals.compromised || buffs.shield > 0.0) {
        return HitOutcome::Ignored;
    }
    if !forced && vitals.armor_shield {
        vitals.armor_shield = false;
        vitals.i_frames = tunables.armor_break_i_frames;
        return HitOutcome::Absorbed;
    }

    vitals.hp = (vitals.hp - damage).max(0.0);
    if !forced {
        vitals.i_frames = tunables.hit_i_frames;
    }
    *vel = knockback;
    jump.grounded = false;

    let lethal = vitals.hp <= 0.0;
    if lethal {
        vitals.compromised = true;
    }
    HitOutcome::Damaged { lethal }
}

pub fn update_weapon(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    intent: Res<ControlIntent>,
    stats: Res<RunStats>,
    mut q_player: Query<(&Transform, &Hitbox, &mut Loadout, &mut Vitals, &BuffTimers), With<Player>>,
    mut fire: MessageWriter<FireRequest>,
    mut cues: MessageWriter<AudioCue>,
) {
    let Ok((tf, hitbox, mut loadout, mut vitals, buffs)) = q_player.single_mut() else {
        return;
    };
    let w = &tunables.weapons;

    // Distance milestones upgrade the weapon; at full health the upgrade
    // grants one-hit armor instead of the heal.
    let target_level =
        (1 + (stats.distance / w.upgrade_distance) as u32).min(w.max_level);
    if target_level > loadout.level {
        loadout.level = target_level;
        if vitals.hp >= vitals.max_hp {
            vitals.armor_shield = true;
        } else {
            vitals.hp = (vitals.hp + w.upgrade_heal).min(vitals.max_hp);
        }
    }

    loadout.recharge = (loadout.recharge - clock.dt).max(0.0);
    if !intent.fire_held || loadout.recharge > 0.0 {
        return;
    }

    let mut recharge = w.base_recharge * (1.0 - (loadout.level - 1) as f32 * w.recharge_level_step);
    if buffs.rapid_fire > 0.0 {
        recharge *= w.rapid_fire_factor;
    }
    loadout.recharge = recharge;

    let damage = w.base_damage + (loadout.level - 1) as f32 * w.damage_per_level;
    let muzzle = tf.translation.truncate() + Vec2::new(0.0, hitbox.half.y - 15.0);
    let dir = (intent.aim - muzzle).normalize_or(Vec2::X);

    let mut shoot = |angle: f32, speed: f32, damage: f32, kind: ProjectileKind| {
        let vel = Vec2::from_angle(angle).rotate(dir) * speed;
        fire.write(FireRequest {
            kind,
            faction: Faction::Player,
            pos: muzzle,
            vel,
            damage,
        });
    };

    match loadout.armament {
        Armament::Pulse => shoot(0.0, 1150.0, damage, ProjectileKind::Basic),
        Armament::Spread => {
            for i in -1..=1 {
                shoot(i as f32 * 0.15, 1000.0, damage * 0.8, ProjectileKind::Basic);
            }
        }
        Armament::Heavy => shoot(0.0, 1400.0, damage * 2.5, ProjectileKind::Heavy),
        Armament::Plasma => {
            for i in -2..=2 {
                shoot(i as f32 * 0.1, 800.0, damage * 0.6, ProjectileKind::Plasma);
            }
        }
    }
    cues.write(AudioCue::Shoot);
}
