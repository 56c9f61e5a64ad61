//! Run lifecycle: death, restart, and returning to the menu.

mod common;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use overdrive::common::cues::AudioCue;
use overdrive::common::intent::ControlIntent;
use overdrive::common::state::RunState;
use overdrive::game;
use overdrive::game::snapshot::Snapshot;
use overdrive::plugins::player::Player;

fn drop_player_into_the_void(app: &mut App) {
    let world = app.world_mut();
    let mut tf = world
        .query_filtered::<&mut Transform, With<Player>>()
        .single_mut(world)
        .unwrap();
    tf.translation.y = -700.0;
}

#[test]
fn falling_into_the_void_ends_the_run() {
    let mut app = common::app_headless();
    common::start_run(&mut app);

    drop_player_into_the_void(&mut app);
    // One tick registers the lethal hit, the next applies the transition.
    app.update();
    app.update();

    let snap = Snapshot::capture(app.world_mut());
    assert_eq!(snap.run_state, RunState::GameOver);
    // The world is left standing for the game-over screen.
    let player = snap.player.expect("player persists through game over");
    assert_eq!(player.hp, 0.0);
    assert!(!snap.platforms.is_empty());
}

#[test]
fn restarting_rebuilds_the_run_from_scratch() {
    let mut app = common::app_headless();
    common::start_run(&mut app);

    // Fire a few rounds so the restart has live state to tear down.
    app.world_mut().resource_mut::<ControlIntent>().fire_held = true;
    app.world_mut().resource_mut::<ControlIntent>().aim = Vec2::new(2000.0, 296.0);
    for _ in 0..10 {
        app.update();
    }
    assert!(!Snapshot::capture(app.world_mut()).projectiles.is_empty());

    drop_player_into_the_void(&mut app);
    app.update();
    app.update();
    assert_eq!(Snapshot::capture(app.world_mut()).run_state, RunState::GameOver);

    // Retry. Same transition as the first start. Game over already cleared
    // the held trigger.
    assert!(!app.world().resource::<ControlIntent>().fire_held);
    game::restart(app.world_mut());
    app.update();

    let snap = Snapshot::capture(app.world_mut());
    assert_eq!(snap.run_state, RunState::Playing);
    let player = snap.player.expect("restart respawns the player");
    assert_eq!(player.hp, 100.0);
    assert_eq!(player.pos.x, 266.0);
    assert!((player.pos.y - 296.0).abs() < 5.0);
    // Stats and the projectile pool start clean.
    assert_eq!(snap.stats.kill_score, 0);
    assert_eq!(snap.stats.combo, 0);
    assert!(snap.projectiles.is_empty());
}

#[test]
fn returning_to_the_menu_purges_the_world() {
    let mut app = common::app_headless();
    common::start_run(&mut app);
    for _ in 0..5 {
        app.update();
    }

    game::return_to_menu(app.world_mut());
    app.update();

    let snap = Snapshot::capture(app.world_mut());
    assert_eq!(snap.run_state, RunState::Start);
    assert!(snap.player.is_none());
    assert!(snap.platforms.is_empty());
    assert!(snap.units.is_empty());
    assert!(snap.boss.is_none());
}

#[test]
fn jumping_emits_a_cue() {
    let mut app = common::app_headless();
    common::start_run(&mut app);
    // Let the player settle onto the start slab.
    for _ in 0..20 {
        app.update();
    }

    app.world_mut().resource_mut::<ControlIntent>().jump_pressed = true;
    app.update();

    let cues = app.world().resource::<Messages<AudioCue>>();
    assert!(!cues.is_empty(), "jump should queue a cue for the host");
}
