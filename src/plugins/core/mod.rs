//! Core plugin: shared resources and the simulation clock.
//!
//! Every gameplay system reads its delta from [`SimClock`], never from
//! `Time` directly. The clock clamps long host frames and applies a global
//! time-scale that relaxes back toward 1.0, so a tab-switch hitch or a
//! boss-entry slowdown never teleports the simulation.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::cues::AudioCue;
use crate::common::intent::ControlIntent;
use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::SimSet;

/// Per-tick simulation time. `dt` is already clamped and scaled.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimClock {
    pub dt: f32,
    pub time_scale: f32,
}

impl Default for SimClock {
    fn default() -> Self {
        Self { dt: 0.0, time_scale: 1.0 }
    }
}

impl SimClock {
    /// Drops the time-scale to `scale` for a slow-motion beat. Takes the
    /// minimum so an already slower scale is not sped up.
    pub fn slow(&mut self, scale: f32) {
        self.time_scale = self.time_scale.min(scale);
    }
}

pub fn plugin(app: &mut App) {
    // Hosts may insert their own Tunables before the plugins register;
    // init_resource only fills in the default when absent.
    app.init_resource::<Tunables>();
    app.init_resource::<SimClock>();
    app.init_resource::<ControlIntent>();
    app.init_resource::<GameRng>();

    app.init_resource::<Messages<AudioCue>>();

    app.add_systems(
        Update,
        advance_clock
            .in_set(SimSet::Clock)
            .run_if(in_state(RunState::Playing)),
    );
    app.add_systems(PostUpdate, update_audio_messages);
}

/// Derives this tick's `dt` from the host frame delta, then relaxes the
/// time-scale toward 1.0. The clamp runs before the scale so a long frame
/// during slow motion still advances at most `max_tick * time_scale`.
pub fn advance_clock(time: Res<Time>, tunables: Res<Tunables>, mut clock: ResMut<SimClock>) {
    let raw = time.delta_secs().min(tunables.clock.max_tick);
    clock.dt = raw * clock.time_scale;
    let relax = tunables.clock.timescale_relax;
    clock.time_scale += (1.0 - clock.time_scale) * relax;
}

fn update_audio_messages(mut msgs: ResMut<Messages<AudioCue>>) {
    msgs.update();
}

#[cfg(test)]
mod tests;
