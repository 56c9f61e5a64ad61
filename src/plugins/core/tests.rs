use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::cues::AudioCue;
use crate::common::intent::ControlIntent;
use crate::common::rng::GameRng;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::core::{self, SimClock};

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<SimClock>().is_some());
    assert!(app.world().get_resource::<ControlIntent>().is_some());
    assert!(app.world().get_resource::<GameRng>().is_some());
    assert!(app.world().get_resource::<Messages<AudioCue>>().is_some());
}

#[test]
fn keeps_preinserted_tunables() {
    let mut app = App::new();
    let mut tunables = Tunables::default();
    tunables.player.move_speed = 123.0;
    app.insert_resource(tunables);
    core::plugin(&mut app);
    let kept = app.world().resource::<Tunables>();
    assert_eq!(kept.player.move_speed, 123.0);
}

fn advance(world: &mut World, millis: u64) {
    let mut time = Time::default();
    time.advance_by(Duration::from_millis(millis));
    world.insert_resource(time);
    run_system_once(world, core::advance_clock);
}

#[test]
fn clamps_long_ticks() {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    world.init_resource::<SimClock>();
    advance(&mut world, 500);
    let clock = world.resource::<SimClock>();
    assert!((clock.dt - 0.1).abs() < 1e-6, "dt was {}", clock.dt);
}

#[test]
fn short_ticks_pass_through() {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    world.init_resource::<SimClock>();
    advance(&mut world, 16);
    let clock = world.resource::<SimClock>();
    assert!((clock.dt - 0.016).abs() < 1e-6);
}

#[test]
fn time_scale_relaxes_toward_one() {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    let mut clock = SimClock::default();
    clock.slow(0.3);
    world.insert_resource(clock);

    advance(&mut world, 100);
    let clock = world.resource::<SimClock>();
    // This tick still ran at the slowed scale.
    assert!((clock.dt - 0.03).abs() < 1e-6);
    // Relaxed by 5% of the gap to 1.0.
    assert!((clock.time_scale - 0.335).abs() < 1e-6);

    for _ in 0..200 {
        advance(&mut world, 100);
    }
    let clock = world.resource::<SimClock>();
    assert!(clock.time_scale > 0.999);
}

#[test]
fn slow_never_speeds_up() {
    let mut clock = SimClock::default();
    clock.slow(0.3);
    clock.slow(0.8);
    assert_eq!(clock.time_scale, 0.3);
}
