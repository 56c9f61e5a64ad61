//! Procedural world: platforms, crates, decor, and segment population.
//!
//! Generation is cursor-driven. [`WorldCursor`] remembers where the built
//! world ends; seeding lays the start slab and a few kilometres of road,
//! and [`extend_ahead`] keeps building while the player closes on the
//! horizon. Every roll goes through [`GameRng`], so a seeded run lays the
//! same world every time.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::common::rng::GameRng;
use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::cleanup::RunScoped;
use crate::plugins::enemies;
use crate::plugins::physics::{Hitbox, Solid};
use crate::plugins::pickups::{self, PickupKind};
use crate::plugins::player::Player;
use crate::plugins::scoring::RunStats;
use crate::plugins::SimSet;

/// Start slab dimensions; thicker than generated platforms so the run
/// opens on solid ground.
const START_SLAB_CENTER: Vec2 = Vec2::new(900.0, 175.0);
const START_SLAB_SIZE: Vec2 = Vec2::new(1800.0, 90.0);
const CRATE_SIZE: f32 = 50.0;
const CRATE_HP: f32 = 20.0;

/// Where the built world currently ends.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldCursor {
    /// Right edge of the last platform.
    pub next_x: f32,
    /// Centre height of the last platform, the anchor for the next step.
    pub last_y: f32,
}

impl Default for WorldCursor {
    fn default() -> Self {
        Self { next_x: 2000.0, last_y: START_SLAB_CENTER.y }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Platform {
    /// Zone counter at generation time, for palette selection by the host.
    pub zone: u32,
}

/// Destructible cover. Solid until shot open.
#[derive(Component, Debug, Clone, Copy)]
pub struct Crate {
    pub hp: f32,
}

/// Foreground debris, purely visual.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScrapDecor {
    pub size: f32,
}

/// Parallax background tower.
#[derive(Component, Debug, Clone, Copy)]
pub struct Skyscraper {
    pub size: Vec2,
    /// Parallax depth factor in (0, 1); smaller is further away.
    pub depth: f32,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<WorldCursor>();
    app.add_systems(
        Update,
        extend_ahead
            .in_set(SimSet::Worldgen)
            .run_if(in_state(RunState::Playing)),
    );
}

/// Lay the start slab and pre-build the opening stretch. Runs on entry
/// into `Playing`, after the previous run's entities are purged.
pub fn seed_world(
    mut commands: Commands,
    mut rng: ResMut<GameRng>,
    mut cursor: ResMut<WorldCursor>,
    tunables: Res<Tunables>,
    stats: Res<RunStats>,
) {
    *cursor = WorldCursor::default();

    commands.spawn((
        Name::new("Platform(Start)"),
        RunScoped,
        Platform { zone: stats.zone },
        Solid,
        Hitbox::new(START_SLAB_SIZE.x, START_SLAB_SIZE.y),
        Transform::from_xyz(START_SLAB_CENTER.x, START_SLAB_CENTER.y, 0.0),
    ));

    while cursor.next_x < tunables.world.seed_extent {
        spawn_segment(&mut commands, &mut rng.0, &mut cursor, &tunables, stats.zone);
    }
}

/// Keep the world built out past the generation horizon.
pub fn extend_ahead(
    mut commands: Commands,
    mut rng: ResMut<GameRng>,
    mut cursor: ResMut<WorldCursor>,
    tunables: Res<Tunables>,
    stats: Res<RunStats>,
    q_player: Query<&Transform, With<Player>>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let horizon = player_tf.translation.x + tunables.world.lookahead;
    while cursor.next_x < horizon {
        spawn_segment(&mut commands, &mut rng.0, &mut cursor, &tunables, stats.zone);
    }
}

/// One platform plus its population: decor always, then independent rolls
/// for a unit, a crate, pickups, and a background tower.
fn spawn_segment(
    commands: &mut Commands,
    rng: &mut StdRng,
    cursor: &mut WorldCursor,
    tunables: &Tunables,
    zone: u32,
) {
    let w = &tunables.world;
    let view_h = tunables.view.height;

    let width = rng.gen_range(w.platform_width.0..w.platform_width.1);
    let x0 = cursor.next_x + rng.gen_range(w.platform_gap.0..w.platform_gap.1);
    let y = (cursor.last_y + rng.gen_range(-w.platform_step..w.platform_step))
        .clamp(w.band_frac.0 * view_h, w.band_frac.1 * view_h);
    let top = y + w.platform_thickness * 0.5;

    commands.spawn((
        Name::new("Platform"),
        RunScoped,
        Platform { zone },
        Solid,
        Hitbox::new(width, w.platform_thickness),
        Transform::from_xyz(x0 + width * 0.5, y, 0.0),
    ));

    for _ in 0..3 {
        commands.spawn((
            Name::new("Scrap"),
            RunScoped,
            ScrapDecor { size: rng.gen_range(10.0..40.0) },
            Transform::from_xyz(
                rng.gen_range(x0..x0 + width),
                rng.gen_range(-600.0..view_h + 200.0),
                -0.5,
            ),
        ));
    }

    if rng.gen_bool(w.enemy_chance) {
        let x = rng.gen_range(x0 + 50.0..x0 + width - 50.0);
        enemies::spawn_unit(commands, rng, Vec2::new(x, top + 31.0));
    }

    if rng.gen_bool(w.crate_chance) {
        let x = x0 + rng.gen_range(100.0..width - 100.0);
        commands.spawn((
            Name::new("Crate"),
            RunScoped,
            Crate { hp: CRATE_HP },
            Solid,
            Hitbox::new(CRATE_SIZE, CRATE_SIZE),
            Transform::from_xyz(x, top + CRATE_SIZE * 0.5, 0.0),
        ));
    }

    if rng.gen_bool(w.pickup_chance) {
        let x = rng.gen_range(x0 + 50.0..x0 + width - 50.0);
        pickups::spawn_pickup(commands, Vec2::new(x, top + 30.0), PickupKind::Spread);
    }

    if rng.gen_bool(w.rare_pickup_chance) {
        let kind = if rng.gen_bool(0.5) { PickupKind::Plasma } else { PickupKind::Heavy };
        let x = rng.gen_range(x0 + 50.0..x0 + width - 50.0);
        pickups::spawn_pickup(commands, Vec2::new(x, top + 30.0), kind);
    }

    if rng.gen_bool(w.skyscraper_chance) {
        let size = Vec2::new(rng.gen_range(200.0..400.0), rng.gen_range(600.0..1200.0));
        let x = rng.gen_range(x0..x0 + width);
        commands.spawn((
            Name::new("Skyscraper"),
            RunScoped,
            Skyscraper { size, depth: rng.gen_range(0.05..0.25) },
            Transform::from_xyz(x, size.y * 0.5, -1.0),
        ));
    }

    cursor.next_x = x0 + width;
    cursor.last_y = y;
}
