//! Tunable gameplay constants.
//!
//! One resource, grouped by domain. Defaults are the shipping tuning; a host
//! may insert its own `Tunables` before the plugins register to override
//! them (the core plugin uses `insert_resource` only when absent).
//!
//! Deep per-archetype stat tables (enemy shot speeds, boss pattern numbers)
//! live next to the code that fires them; this resource carries the
//! cross-cutting knobs.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct Tunables {
    pub view: ViewTunables,
    pub clock: ClockTunables,
    pub player: PlayerTunables,
    pub weapons: WeaponTunables,
    pub hostiles: HostileTunables,
    pub boss: BossTunables,
    pub world: WorldTunables,
    pub progression: ProgressionTunables,
    pub caps: PoolCaps,
}

/// Nominal view extent. The simulation is headless; these only anchor
/// camera framing, platform bands, and off-screen spawn heights.
#[derive(Debug, Clone)]
pub struct ViewTunables {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewTunables {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

#[derive(Debug, Clone)]
pub struct ClockTunables {
    /// Upper bound on a single tick's delta, in seconds.
    pub max_tick: f32,
    /// Fraction by which the time-scale relaxes toward 1.0 each tick.
    pub timescale_relax: f32,
}

impl Default for ClockTunables {
    fn default() -> Self {
        Self { max_tick: 0.1, timescale_relax: 0.05 }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerTunables {
    pub spawn: Vec2,
    /// Full player box, width x height.
    pub size: Vec2,
    pub move_speed: f32,
    pub jump_power: f32,
    pub gravity: f32,
    pub max_health: f32,
    pub jump_limit: u32,
    pub jump_buffer: f32,
    pub coyote_time: f32,
    pub dash_window: f32,
    pub dash_reload: f32,
    pub dash_multiplier: f32,
    pub dash_i_frames: f32,
    pub hit_i_frames: f32,
    pub armor_break_i_frames: f32,
    pub speed_boost_mult: f32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(266.0, 296.0),
            size: Vec2::new(32.0, 48.0),
            move_speed: 520.0,
            jump_power: 920.0,
            gravity: 2400.0,
            max_health: 100.0,
            jump_limit: 2,
            jump_buffer: 0.25,
            coyote_time: 0.15,
            dash_window: 0.18,
            dash_reload: 0.65,
            dash_multiplier: 3.3,
            dash_i_frames: 0.3,
            hit_i_frames: 0.6,
            armor_break_i_frames: 0.5,
            speed_boost_mult: 1.5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeaponTunables {
    pub base_damage: f32,
    pub damage_per_level: f32,
    pub base_recharge: f32,
    /// Recharge reduction per weapon level above 1.
    pub recharge_level_step: f32,
    pub rapid_fire_factor: f32,
    /// Distance between automatic weapon-level upgrades.
    pub upgrade_distance: f32,
    pub max_level: u32,
    /// Health granted by an upgrade taken below full health.
    pub upgrade_heal: f32,
}

impl Default for WeaponTunables {
    fn default() -> Self {
        Self {
            base_damage: 10.0,
            damage_per_level: 5.0,
            base_recharge: 0.12,
            recharge_level_step: 0.15,
            rapid_fire_factor: 0.4,
            upgrade_distance: 40_000.0,
            max_level: 3,
            upgrade_heal: 30.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HostileTunables {
    /// Enemies hold fire beyond this distance to the player.
    pub engagement_range: f32,
    /// Distance divisor for the difficulty speed multiplier.
    pub difficulty_distance: f32,
    pub melee_radius: f32,
    pub melee_damage: f32,
    /// Units this far behind the camera's left edge despawn silently.
    pub cull_margin: f32,
}

impl Default for HostileTunables {
    fn default() -> Self {
        Self {
            engagement_range: 900.0,
            difficulty_distance: 100_000.0,
            melee_radius: 45.0,
            melee_damage: 10.0,
            cull_margin: 1500.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BossTunables {
    pub base_hp: f32,
    pub hp_per_level: f32,
    pub base_phases: u32,
    pub max_phases: u32,
    pub cycle_seconds: f32,
    /// Horizontal lead ahead of the player at spawn.
    pub spawn_lead: f32,
    /// Height above the anchor at spawn.
    pub spawn_rise: f32,
    pub arrive_lerp: f32,
    pub track_lerp: f32,
}

impl Default for BossTunables {
    fn default() -> Self {
        Self {
            base_hp: 1200.0,
            hp_per_level: 800.0,
            base_phases: 3,
            max_phases: 5,
            cycle_seconds: 4.0,
            spawn_lead: 1200.0,
            spawn_rise: 600.0,
            arrive_lerp: 0.04,
            track_lerp: 0.05,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorldTunables {
    /// Generation horizon ahead of the player.
    pub lookahead: f32,
    /// World pre-built at run start.
    pub seed_extent: f32,
    pub platform_width: (f32, f32),
    pub platform_gap: (f32, f32),
    /// Max vertical offset between consecutive platforms.
    pub platform_step: f32,
    /// Playable platform band as fractions of view height.
    pub band_frac: (f32, f32),
    pub platform_thickness: f32,
    pub enemy_chance: f64,
    pub crate_chance: f64,
    pub pickup_chance: f64,
    pub rare_pickup_chance: f64,
    pub skyscraper_chance: f64,
    /// Falling below this y is lethal regardless of shields.
    pub fall_kill_y: f32,
}

impl Default for WorldTunables {
    fn default() -> Self {
        Self {
            lookahead: 8000.0,
            seed_extent: 6000.0,
            platform_width: (480.0, 950.0),
            platform_gap: (160.0, 360.0),
            platform_step: 160.0,
            band_frac: (0.12, 0.72),
            platform_thickness: 45.0,
            enemy_chance: 0.65,
            crate_chance: 0.4,
            pickup_chance: 0.07,
            rare_pickup_chance: 0.05,
            skyscraper_chance: 0.3,
            fall_kill_y: -600.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressionTunables {
    /// Distance between boss encounters.
    pub boss_interval: f32,
    /// Distance divisor for the boss power level.
    pub power_level_divisor: f32,
    /// Distance between heal checkpoints.
    pub checkpoint_interval: f32,
    pub checkpoint_heal: f32,
    pub kill_score: f32,
    /// Score multiplier gained per combo step.
    pub combo_bonus: f32,
    pub combo_window: f32,
    pub sync_per_kill: f32,
    pub sync_per_combo: f32,
    pub overdrive_duration: f32,
    pub crate_score: u64,
    pub pickup_score: u64,
    pub boss_score: u64,
    pub overdrive_kill_bonus: u64,
    pub crate_drop_chance: f64,
}

impl Default for ProgressionTunables {
    fn default() -> Self {
        Self {
            boss_interval: 60_000.0,
            power_level_divisor: 25_000.0,
            checkpoint_interval: 15_000.0,
            checkpoint_heal: 25.0,
            kill_score: 600.0,
            combo_bonus: 0.15,
            combo_window: 2.5,
            sync_per_kill: 2.0,
            sync_per_combo: 0.5,
            overdrive_duration: 10.0,
            crate_score: 500,
            pickup_score: 1500,
            boss_score: 15_000,
            overdrive_kill_bonus: 1000,
            crate_drop_chance: 0.6,
        }
    }
}

/// Hard entity caps enforced by the trimmer each tick.
#[derive(Debug, Clone)]
pub struct PoolCaps {
    pub platforms: usize,
    pub pickups: usize,
    pub scraps: usize,
    pub enemies: usize,
    pub crates: usize,
    pub skyscrapers: usize,
    pub particles: usize,
    pub labels: usize,
    pub projectiles: usize,
    /// Behind-camera distance at which over-cap entities are reclaimed.
    pub cull_margin: f32,
    pub skyscraper_margin: f32,
}

impl Default for PoolCaps {
    fn default() -> Self {
        Self {
            platforms: 40,
            pickups: 15,
            scraps: 30,
            enemies: 20,
            crates: 20,
            skyscrapers: 20,
            particles: 250,
            labels: 40,
            projectiles: 64,
            cull_margin: 1500.0,
            skyscraper_margin: 3000.0,
        }
    }
}
