use bevy::prelude::*;

use super::*;
use crate::common::rng::GameRng;
use crate::common::test_utils::run_system_once;

fn effects_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimClock { dt: 0.1, time_scale: 1.0 });
    world.insert_resource(GameRng::seeded(21));
    world
}

#[test]
fn burst_scatters_the_requested_count() {
    let mut world = effects_world();

    run_system_once(&mut world, |mut commands: Commands, mut rng: ResMut<GameRng>| {
        spawn_burst(&mut commands, &mut rng.0, Vec2::new(100.0, 200.0), 12, 300.0);
    });

    let mut q = world.query::<(&Particle, &Transform)>();
    let particles: Vec<_> = q.iter(&world).collect();
    assert_eq!(particles.len(), 12);
    for (particle, tf) in particles {
        let speed = particle.vel.length();
        assert!(speed >= 0.3 * 300.0 && speed < 300.0, "speed: {speed}");
        assert!(particle.ttl >= 0.3 && particle.ttl < 0.6);
        assert_eq!(particle.max_ttl, particle.ttl);
        assert_eq!(tf.translation.truncate(), Vec2::new(100.0, 200.0));
    }
}

#[test]
fn particles_drag_fall_and_drift() {
    let mut world = effects_world();
    let e = world
        .spawn((
            Particle { vel: Vec2::new(100.0, 0.0), ttl: 0.5, max_ttl: 0.5 },
            Transform::from_xyz(100.0, 200.0, 3.0),
        ))
        .id();

    run_system_once(&mut world, update_particles);

    let particle = world.entity(e).get::<Particle>().unwrap();
    assert_eq!(particle.vel, Vec2::new(75.0, -50.0));
    let tf = world.entity(e).get::<Transform>().unwrap();
    assert_eq!(tf.translation.truncate(), Vec2::new(107.5, 195.0));
    assert!(!world.entity(e).contains::<crate::plugins::cleanup::PendingDespawn>());
}

#[test]
fn expired_particles_are_marked() {
    let mut world = effects_world();
    let e = world
        .spawn((
            Particle { vel: Vec2::ZERO, ttl: 0.05, max_ttl: 0.5 },
            Transform::default(),
        ))
        .id();

    run_system_once(&mut world, update_particles);

    assert!(world.entity(e).contains::<crate::plugins::cleanup::PendingDespawn>());
}

#[test]
fn labels_rise_until_they_expire() {
    let mut world = effects_world();

    run_system_once(&mut world, |mut commands: Commands| {
        spawn_label(&mut commands, Vec2::new(50.0, 300.0), "+690".to_string());
    });

    {
        let mut q = world.query::<&FloatingText>();
        let text = q.single(&world).unwrap();
        assert_eq!(text.label, "+690");
        assert_eq!(text.ttl, 0.9);
    }

    run_system_once(&mut world, update_labels);

    let mut q = world.query::<(&FloatingText, &Transform)>();
    let (text, tf) = q.single(&world).unwrap();
    assert!((text.ttl - 0.8).abs() < 1e-6);
    assert_eq!(tf.translation.y, 304.0);
}

#[test]
fn expired_labels_are_marked() {
    let mut world = effects_world();
    let e = world
        .spawn((
            FloatingText { label: "+500".to_string(), ttl: 0.05 },
            Transform::default(),
        ))
        .id();

    run_system_once(&mut world, update_labels);

    assert!(world.entity(e).contains::<crate::plugins::cleanup::PendingDespawn>());
}
