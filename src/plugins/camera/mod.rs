//! Camera rig.
//!
//! The simulation is headless, so there is no `Camera2d` here. The rig is a
//! resource describing where a presentation layer should frame the view:
//! a smoothed follow point plus transient shake and flash amounts. The
//! trimmer also reads the rig's centre to decide what counts as "behind
//! the camera".
//!
//! The follow point leads the player by a fixed fraction of the view width
//! and leans a little toward the aim, so the player sits left of centre
//! looking into oncoming terrain.

use bevy::prelude::*;
use rand::Rng;

use crate::common::intent::ControlIntent;
use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::core::SimClock;
use crate::plugins::player::Player;
use crate::plugins::SimSet;

/// Fraction of the view width the rig leads ahead of the player.
const LEAD_FRAC: f32 = 0.15;
/// How much of the player-to-aim offset leans into the frame.
const AIM_PEEK: f32 = 0.22;
const FOLLOW_LERP_X: f32 = 0.12;
const FOLLOW_LERP_Y: f32 = 0.10;
/// Per-tick multiplicative shake falloff.
const SHAKE_DECAY: f32 = 0.91;
/// World units of jitter at shake 1.0.
const SHAKE_AMPLITUDE: f32 = 24.0;
/// Flash opacity lost per second.
const FLASH_FADE: f32 = 2.5;

#[derive(Resource, Debug, Clone, Default)]
pub struct CameraRig {
    /// Smoothed follow point.
    pub center: Vec2,
    /// Remaining shake intensity. Decays toward zero every tick.
    pub shake: f32,
    /// Full-screen flash opacity, 0..=1.
    pub flash: f32,
    /// Shake offset for this tick, applied on top of `center`.
    pub jitter: Vec2,
}

impl CameraRig {
    /// The strongest pending shake wins; impulses do not stack.
    pub fn add_shake(&mut self, intensity: f32) {
        self.shake = self.shake.max(intensity);
    }

    /// Where the view actually sits this tick.
    pub fn position(&self) -> Vec2 {
        self.center + self.jitter
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<CameraRig>();
    app.add_systems(
        Update,
        follow_player
            .in_set(SimSet::Camera)
            .run_if(in_state(RunState::Playing)),
    );
}

fn follow_target(player: Vec2, aim: Vec2, view_width: f32) -> Vec2 {
    player + Vec2::new(LEAD_FRAC * view_width, 0.0) + (aim - player) * AIM_PEEK
}

pub fn follow_player(
    clock: Res<SimClock>,
    tunables: Res<Tunables>,
    intent: Res<ControlIntent>,
    mut rng: ResMut<GameRng>,
    mut rig: ResMut<CameraRig>,
    q_player: Query<&Transform, With<Player>>,
) {
    let Ok(tf) = q_player.single() else {
        return;
    };
    let player = tf.translation.truncate();
    let target = follow_target(player, intent.aim, tunables.view.width);

    // The vertical axis trails a touch more so jumps read as arcs, not
    // camera pops.
    rig.center.x += (target.x - rig.center.x) * FOLLOW_LERP_X;
    rig.center.y += (target.y - rig.center.y) * FOLLOW_LERP_Y;

    rig.shake *= SHAKE_DECAY;
    if rig.shake > 0.01 {
        rig.jitter = Vec2::new(rng.0.gen_range(-1.0..1.0), rng.0.gen_range(-1.0..1.0))
            * rig.shake
            * SHAKE_AMPLITUDE;
    } else {
        rig.shake = 0.0;
        rig.jitter = Vec2::ZERO;
    }

    rig.flash = (rig.flash - FLASH_FADE * clock.dt).max(0.0);
}

/// Run-start framing: put the rig where the follow lerp would settle,
/// with no leftover shake or flash from the previous run.
pub fn snap_to_player(
    tunables: Res<Tunables>,
    mut rig: ResMut<CameraRig>,
    q_player: Query<&Transform, With<Player>>,
) {
    let Ok(tf) = q_player.single() else {
        return;
    };
    let player = tf.translation.truncate();
    *rig = CameraRig {
        center: player + Vec2::new(LEAD_FRAC * tunables.view.width, 0.0),
        ..default()
    };
}
