mod common;

use overdrive::common::state::RunState;
use overdrive::game::snapshot::Snapshot;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    for _ in 0..3 {
        app.update();
    }
}

#[test]
fn menu_snapshot_is_empty() {
    let mut app = common::app_headless();

    let snap = Snapshot::capture(app.world_mut());
    assert_eq!(snap.run_state, RunState::Start);
    assert!(snap.player.is_none());
    assert!(snap.boss.is_none());
    assert!(snap.platforms.is_empty());
    assert!(snap.projectiles.is_empty());
}

#[test]
fn starting_a_run_builds_the_world() {
    let mut app = common::app_headless();
    common::start_run(&mut app);

    let snap = Snapshot::capture(app.world_mut());
    assert_eq!(snap.run_state, RunState::Playing);

    let player = snap.player.expect("player should exist in a run");
    assert_eq!(player.hp, 100.0);
    assert_eq!(player.max_hp, 100.0);

    // The start slab plus the pre-built stretch.
    assert!(snap.platforms.iter().any(|p| p.size.x == 1800.0), "start slab missing");
    assert!(snap.platforms.len() >= 3);
    // Every generated segment carries decor.
    assert!(snap.scraps.len() >= 3);
    // The pool is full and idle; nothing has fired yet.
    assert!(snap.projectiles.is_empty());

    // Camera frames the player with the standard lead, minus one tick of
    // drift toward the (still unset) aim point.
    assert!((snap.camera.center.x - (player.pos.x + 192.0)).abs() < 12.0);
}

#[test]
fn ticking_a_run_does_not_panic() {
    let mut app = common::app_headless();
    common::start_run(&mut app);
    for _ in 0..120 {
        app.update();
    }
    let snap = Snapshot::capture(app.world_mut());
    assert_eq!(snap.run_state, RunState::Playing);
    assert!(snap.player.is_some());
}
