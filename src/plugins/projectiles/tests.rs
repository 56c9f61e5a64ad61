use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::plugins::core::SimClock;
use crate::plugins::physics::Velocity;
use crate::plugins::projectiles::components::{
    Faction, PooledProjectile, Projectile, ProjectileKind, ProjectileState,
};
use crate::plugins::projectiles::messages::FireRequest;
use crate::plugins::projectiles::pool::{self, ProjectilePool};
use crate::plugins::projectiles::{allocator, commit, flight};

fn pool_world(capacity: usize) -> World {
    let mut world = World::new();
    world.insert_resource(ProjectilePool::new(capacity));
    world.init_resource::<Messages<FireRequest>>();
    run_system_once(&mut world, pool::init_projectile_pool);
    world
}

fn basic_request(pos: Vec2, vel: Vec2) -> FireRequest {
    FireRequest {
        kind: ProjectileKind::Basic,
        faction: Faction::Player,
        pos,
        vel,
        damage: 10.0,
    }
}

fn active_rounds(world: &mut World) -> Vec<(Projectile, Vec2, Vec2)> {
    let mut out = Vec::new();
    let mut q = world.query_filtered::<(&ProjectileState, &Projectile, &Transform, &Velocity), With<PooledProjectile>>();
    for (state, projectile, tf, vel) in q.iter(world) {
        if *state == ProjectileState::Active {
            out.push((*projectile, tf.translation.truncate(), vel.0));
        }
    }
    out
}

#[test]
fn pre_spawns_full_capacity() {
    let mut world = pool_world(8);
    let count = world
        .query_filtered::<(), With<PooledProjectile>>()
        .iter(&world)
        .count();
    assert_eq!(count, 8);
    assert_eq!(world.resource::<ProjectilePool>().free_len(), 8);
}

#[test]
fn allocates_from_fire_request() {
    let mut world = pool_world(4);
    world.write_message(basic_request(Vec2::new(5.0, 6.0), Vec2::new(100.0, 0.0)));
    run_system_once(&mut world, allocator::allocate_projectiles);

    assert_eq!(world.resource::<ProjectilePool>().free_len(), 3);
    let active = active_rounds(&mut world);
    assert_eq!(active.len(), 1);
    let (projectile, pos, vel) = active[0];
    assert_eq!(pos, Vec2::new(5.0, 6.0));
    assert_eq!(vel, Vec2::new(100.0, 0.0));
    assert_eq!(projectile.damage, 10.0);
    assert_eq!(projectile.ttl, 2.0);
}

#[test]
fn exhausted_pool_drops_requests() {
    let mut world = pool_world(2);
    for i in 0..3 {
        world.write_message(basic_request(Vec2::new(i as f32, 0.0), Vec2::X));
    }
    run_system_once(&mut world, allocator::allocate_projectiles);

    assert_eq!(world.resource::<ProjectilePool>().free_len(), 0);
    assert_eq!(active_rounds(&mut world).len(), 2);
}

#[test]
fn aimed_request_normalizes_direction() {
    let req = FireRequest::aimed(
        ProjectileKind::Sniper,
        Faction::Enemy,
        Vec2::ZERO,
        Vec2::new(0.0, 10.0),
        1400.0,
        15.0,
    );
    assert!((req.vel - Vec2::new(0.0, 1400.0)).length() < 1e-3);
}

#[test]
fn kind_lifetimes() {
    assert_eq!(ProjectileKind::Sniper.lifetime(), 3.0);
    assert_eq!(ProjectileKind::Basic.lifetime(), 2.0);
    assert_eq!(ProjectileKind::Gravity.lifetime(), 2.0);
}

#[test]
fn flight_advances_and_expires() {
    let mut world = pool_world(1);
    world.insert_resource(SimClock { dt: 0.1, time_scale: 1.0 });
    world.write_message(basic_request(Vec2::ZERO, Vec2::new(100.0, 0.0)));
    run_system_once(&mut world, allocator::allocate_projectiles);

    run_system_once(&mut world, flight::update_flight);
    let active = active_rounds(&mut world);
    assert_eq!(active.len(), 1);
    assert!((active[0].1.x - 10.0).abs() < 1e-4);

    // Lifetime is 2.0s; 19 more clamped ticks burn it out.
    for _ in 0..19 {
        run_system_once(&mut world, flight::update_flight);
    }
    assert!(active_rounds(&mut world).is_empty());
    let mut q = world.query_filtered::<&ProjectileState, With<PooledProjectile>>();
    assert_eq!(*q.single(&world).unwrap(), ProjectileState::PendingReturn);
}

#[test]
fn gravity_shells_sag_in_flight() {
    let mut world = pool_world(2);
    world.insert_resource(SimClock { dt: 0.1, time_scale: 1.0 });
    world.write_message(FireRequest {
        kind: ProjectileKind::Gravity,
        faction: Faction::Enemy,
        pos: Vec2::ZERO,
        vel: Vec2::new(100.0, 0.0),
        damage: 25.0,
    });
    world.write_message(basic_request(Vec2::ZERO, Vec2::new(100.0, 0.0)));
    run_system_once(&mut world, allocator::allocate_projectiles);
    run_system_once(&mut world, flight::update_flight);

    let active = active_rounds(&mut world);
    assert_eq!(active.len(), 2);
    for (projectile, _, vel) in active {
        match projectile.kind {
            ProjectileKind::Gravity => assert!((vel.y + 80.0).abs() < 1e-3),
            _ => assert_eq!(vel.y, 0.0),
        }
    }
}

#[test]
fn commit_restores_inactive_invariants() {
    let mut world = pool_world(1);
    world.write_message(basic_request(Vec2::new(50.0, 0.0), Vec2::new(300.0, 40.0)));
    run_system_once(&mut world, allocator::allocate_projectiles);
    assert_eq!(world.resource::<ProjectilePool>().free_len(), 0);

    {
        let mut q = world.query_filtered::<&mut ProjectileState, With<PooledProjectile>>();
        *q.single_mut(&mut world).unwrap() = ProjectileState::PendingReturn;
    }
    run_system_once(&mut world, commit::return_to_pool_commit);

    assert_eq!(world.resource::<ProjectilePool>().free_len(), 1);
    let mut q =
        world.query_filtered::<(&ProjectileState, &Velocity), With<PooledProjectile>>();
    let (state, vel) = q.single(&world).unwrap();
    assert_eq!(*state, ProjectileState::Inactive);
    assert_eq!(vel.0, Vec2::ZERO);
}

#[test]
fn recycled_rounds_can_fire_again() {
    let mut world = pool_world(1);
    world.write_message(basic_request(Vec2::ZERO, Vec2::X));
    run_system_once(&mut world, allocator::allocate_projectiles);
    {
        let mut q = world.query_filtered::<&mut ProjectileState, With<PooledProjectile>>();
        *q.single_mut(&mut world).unwrap() = ProjectileState::PendingReturn;
    }
    run_system_once(&mut world, commit::return_to_pool_commit);

    world.write_message(FireRequest {
        kind: ProjectileKind::Heavy,
        faction: Faction::Player,
        pos: Vec2::new(9.0, 9.0),
        vel: Vec2::new(0.0, -50.0),
        damage: 25.0,
    });
    run_system_once(&mut world, allocator::allocate_projectiles);

    let active = active_rounds(&mut world);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].0.kind, ProjectileKind::Heavy);
    assert_eq!(active[0].0.ttl, 2.0);
}
