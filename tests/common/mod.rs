//! Integration test harness.
//!
//! Headless app: `MinimalPlugins` supplies the runner and clock,
//! `StatesPlugin` the state machine, and `overdrive::game::configure`
//! installs the whole simulation. Time is stepped manually so every
//! `app.update()` is one 16 ms tick regardless of wall-clock speed.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use overdrive::common::rng::GameRng;

pub const TICK: Duration = Duration::from_millis(16);

pub fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    overdrive::game::configure(&mut app);

    // Deterministic world generation and effects.
    app.insert_resource(GameRng::seeded(42));

    // First update runs Startup (projectile pool) and settles state.
    app.update();
    app
}

/// Enter `Playing` and apply the transition.
pub fn start_run(app: &mut App) {
    overdrive::game::start_run(app.world_mut());
    app.update();
}
