use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::common::test_utils::run_system_once;

fn pickup_world() -> World {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    world.init_resource::<RunStats>();
    world.init_resource::<Messages<AudioCue>>();
    world.spawn((
        Player,
        Loadout::default(),
        BuffTimers::default(),
        Transform::from_xyz(100.0, 200.0, 0.0),
    ));
    world
}

fn spawn_at(world: &mut World, pos: Vec2, kind: PickupKind) -> Entity {
    world
        .spawn((Pickup { kind }, Transform::from_xyz(pos.x, pos.y, 1.0)))
        .id()
}

fn player_state(world: &mut World) -> (Loadout, BuffTimers) {
    let mut q = world.query_filtered::<(&Loadout, &BuffTimers), With<Player>>();
    let (loadout, buffs) = q.single(world).unwrap();
    (*loadout, *buffs)
}

fn drain_cues(world: &mut World) -> Vec<AudioCue> {
    run_system_once(world, |mut reader: MessageReader<AudioCue>| {
        reader.read().copied().collect::<Vec<_>>()
    })
}

#[test]
fn weapon_pickup_swaps_armament_and_scores() {
    let mut world = pickup_world();
    let e = spawn_at(&mut world, Vec2::new(130.0, 200.0), PickupKind::Spread);

    run_system_once(&mut world, collect_pickups);

    let (loadout, _) = player_state(&mut world);
    assert_eq!(loadout.armament, Armament::Spread);
    assert_eq!(world.resource::<RunStats>().kill_score, 1500);
    assert!(world.entity(e).contains::<PendingDespawn>());
    assert_eq!(drain_cues(&mut world), vec![AudioCue::Pickup]);
}

#[test]
fn out_of_range_pickup_is_ignored() {
    let mut world = pickup_world();
    let e = spawn_at(&mut world, Vec2::new(400.0, 200.0), PickupKind::Spread);

    run_system_once(&mut world, collect_pickups);

    let (loadout, _) = player_state(&mut world);
    assert_eq!(loadout.armament, Armament::Pulse);
    assert_eq!(world.resource::<RunStats>().kill_score, 0);
    assert!(!world.entity(e).contains::<PendingDespawn>());
}

#[test]
fn timed_pickup_sets_its_timer() {
    let mut world = pickup_world();
    spawn_at(&mut world, Vec2::new(110.0, 210.0), PickupKind::RapidFire);

    run_system_once(&mut world, collect_pickups);

    let (_, buffs) = player_state(&mut world);
    assert_eq!(buffs.rapid_fire, 8.0);
    assert_eq!(buffs.speed_boost, 0.0);
    assert_eq!(buffs.shield, 0.0);
}

#[test]
fn shield_lasts_ten_seconds() {
    let mut world = pickup_world();
    spawn_at(&mut world, Vec2::new(110.0, 210.0), PickupKind::Shield);

    run_system_once(&mut world, collect_pickups);

    let (_, buffs) = player_state(&mut world);
    assert_eq!(buffs.shield, 10.0);
}

#[test]
fn timed_pickup_refused_while_a_buff_runs() {
    let mut world = pickup_world();
    {
        let mut q = world.query_filtered::<&mut BuffTimers, With<Player>>();
        q.single_mut(&mut world).unwrap().shield = 3.0;
    }
    let e = spawn_at(&mut world, Vec2::new(110.0, 210.0), PickupKind::RapidFire);

    run_system_once(&mut world, collect_pickups);

    // Refused entirely: no timer, no score, entity untouched.
    let (_, buffs) = player_state(&mut world);
    assert_eq!(buffs.rapid_fire, 0.0);
    assert_eq!(buffs.shield, 3.0);
    assert_eq!(world.resource::<RunStats>().kill_score, 0);
    assert!(!world.entity(e).contains::<PendingDespawn>());
    assert!(drain_cues(&mut world).is_empty());
}

#[test]
fn weapon_pickup_still_collects_while_a_buff_runs() {
    let mut world = pickup_world();
    {
        let mut q = world.query_filtered::<&mut BuffTimers, With<Player>>();
        q.single_mut(&mut world).unwrap().speed_boost = 5.0;
    }
    let e = spawn_at(&mut world, Vec2::new(110.0, 210.0), PickupKind::Heavy);

    run_system_once(&mut world, collect_pickups);

    let (loadout, buffs) = player_state(&mut world);
    assert_eq!(loadout.armament, Armament::Heavy);
    assert_eq!(buffs.speed_boost, 5.0);
    assert!(world.entity(e).contains::<PendingDespawn>());
}

#[test]
fn already_collected_pickup_is_not_collected_twice() {
    let mut world = pickup_world();
    let e = spawn_at(&mut world, Vec2::new(110.0, 210.0), PickupKind::Spread);
    world.entity_mut(e).insert(PendingDespawn);

    run_system_once(&mut world, collect_pickups);

    assert_eq!(world.resource::<RunStats>().kill_score, 0);
}

#[test]
fn timed_roll_covers_every_kind() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut counts = [0u32; 3];
    for _ in 0..300 {
        match PickupKind::roll_timed(&mut rng) {
            PickupKind::RapidFire => counts[0] += 1,
            PickupKind::Speed => counts[1] += 1,
            PickupKind::Shield => counts[2] += 1,
            _ => unreachable!(),
        }
    }
    for count in counts {
        assert!(count > 60, "timed kinds should roll roughly evenly: {counts:?}");
    }
}
