//! Frame snapshot for the presentation layer.
//!
//! [`Snapshot::capture`] copies everything a renderer needs out of the
//! world into plain data: no entity ids, no component references, nothing
//! that could dangle once the next tick runs. The host calls it once per
//! frame after the schedule and draws from the copy.

use bevy::prelude::*;

use crate::common::state::RunState;
use crate::plugins::boss::{ActiveBoss, Boss};
use crate::plugins::camera::CameraRig;
use crate::plugins::cleanup::PendingDespawn;
use crate::plugins::effects::{FloatingText, Particle};
use crate::plugins::enemies::{Archetype, Unit};
use crate::plugins::physics::{Hitbox, Velocity};
use crate::plugins::pickups::{Pickup, PickupKind};
use crate::plugins::player::{Armament, BuffTimers, DashState, JumpState, Loadout, Player, Vitals};
use crate::plugins::projectiles::components::{Faction, Projectile, ProjectileKind, ProjectileState};
use crate::plugins::scoring::RunStats;
use crate::plugins::worldgen::{Crate, Platform, ScrapDecor, Skyscraper};

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub run_state: RunState,
    pub camera: CameraView,
    pub stats: RunStats,
    pub player: Option<PlayerView>,
    pub boss: Option<BossView>,
    pub units: Vec<UnitView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
    pub crates: Vec<CrateView>,
    pub platforms: Vec<PlatformView>,
    pub scraps: Vec<ScrapView>,
    pub skyscrapers: Vec<SkyscraperView>,
    pub particles: Vec<ParticleView>,
    pub labels: Vec<LabelView>,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    /// Frame centre with shake jitter already applied.
    pub center: Vec2,
    pub shake: f32,
    pub flash: f32,
}

#[derive(Debug, Clone)]
pub struct PlayerView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Positive while hits are being ignored; hosts usually blink the
    /// sprite on it.
    pub i_frames: f32,
    pub armor_shield: bool,
    pub grounded: bool,
    pub dashing: bool,
    pub armament: Armament,
    pub weapon_level: u32,
    pub buffs: BuffTimers,
}

#[derive(Debug, Clone, Copy)]
pub struct BossView {
    pub pos: Vec2,
    pub hp_fraction: f32,
    pub phase: u32,
    pub arriving: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct UnitView {
    pub pos: Vec2,
    pub archetype: Archetype,
    pub integrity: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ProjectileKind,
    pub faction: Faction,
}

#[derive(Debug, Clone, Copy)]
pub struct PickupView {
    pub pos: Vec2,
    pub kind: PickupKind,
}

#[derive(Debug, Clone, Copy)]
pub struct CrateView {
    pub pos: Vec2,
    pub hp: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct PlatformView {
    pub pos: Vec2,
    pub size: Vec2,
    pub zone: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ScrapView {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SkyscraperView {
    pub pos: Vec2,
    pub size: Vec2,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ParticleView {
    pub pos: Vec2,
    /// 1.0 when fresh, 0.0 at expiry.
    pub fade: f32,
}

#[derive(Debug, Clone)]
pub struct LabelView {
    pub pos: Vec2,
    pub text: String,
    pub ttl: f32,
}

impl Snapshot {
    pub fn capture(world: &mut World) -> Self {
        let run_state = *world.resource::<State<RunState>>().get();
        let stats = world.resource::<RunStats>().clone();
        let rig = world.resource::<CameraRig>();
        let camera = CameraView {
            center: rig.position(),
            shake: rig.shake,
            flash: rig.flash,
        };

        let player = world
            .query_filtered::<(
                &Transform,
                &Velocity,
                &Vitals,
                &JumpState,
                &DashState,
                &Loadout,
                &BuffTimers,
            ), With<Player>>()
            .single(world)
            .ok()
            .map(|(tf, vel, vitals, jump, dash, loadout, buffs)| PlayerView {
                pos: tf.translation.truncate(),
                vel: vel.0,
                hp: vitals.hp,
                max_hp: vitals.max_hp,
                i_frames: vitals.i_frames,
                armor_shield: vitals.armor_shield,
                grounded: jump.grounded,
                dashing: dash.active,
                armament: loadout.armament,
                weapon_level: loadout.level,
                buffs: *buffs,
            });

        let boss = world.resource::<ActiveBoss>().0.and_then(|e| {
            let boss = world.get::<Boss>(e)?;
            let tf = world.get::<Transform>(e)?;
            Some(BossView {
                pos: tf.translation.truncate(),
                hp_fraction: (boss.hp / boss.max_hp).max(0.0),
                phase: boss.phase,
                arriving: boss.arriving,
            })
        });

        let units = world
            .query_filtered::<(&Transform, &Unit), Without<PendingDespawn>>()
            .iter(world)
            .filter(|(_, unit)| unit.integrity > 0.0)
            .map(|(tf, unit)| UnitView {
                pos: tf.translation.truncate(),
                archetype: unit.archetype,
                integrity: unit.integrity,
            })
            .collect();

        let projectiles = world
            .query::<(&Transform, &Velocity, &Projectile, &ProjectileState)>()
            .iter(world)
            .filter(|(.., state)| **state == ProjectileState::Active)
            .map(|(tf, vel, round, _)| ProjectileView {
                pos: tf.translation.truncate(),
                vel: vel.0,
                kind: round.kind,
                faction: round.faction,
            })
            .collect();

        let pickups = world
            .query_filtered::<(&Transform, &Pickup), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, pickup)| PickupView {
                pos: tf.translation.truncate(),
                kind: pickup.kind,
            })
            .collect();

        let crates = world
            .query_filtered::<(&Transform, &Crate), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, c)| CrateView { pos: tf.translation.truncate(), hp: c.hp })
            .collect();

        let platforms = world
            .query_filtered::<(&Transform, &Hitbox, &Platform), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, hitbox, platform)| PlatformView {
                pos: tf.translation.truncate(),
                size: hitbox.half * 2.0,
                zone: platform.zone,
            })
            .collect();

        let scraps = world
            .query_filtered::<(&Transform, &ScrapDecor), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, scrap)| ScrapView {
                pos: tf.translation.truncate(),
                size: scrap.size,
            })
            .collect();

        let skyscrapers = world
            .query_filtered::<(&Transform, &Skyscraper), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, tower)| SkyscraperView {
                pos: tf.translation.truncate(),
                size: tower.size,
                depth: tower.depth,
            })
            .collect();

        let particles = world
            .query_filtered::<(&Transform, &Particle), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, particle)| ParticleView {
                pos: tf.translation.truncate(),
                fade: (particle.ttl / particle.max_ttl).clamp(0.0, 1.0),
            })
            .collect();

        let labels = world
            .query_filtered::<(&Transform, &FloatingText), Without<PendingDespawn>>()
            .iter(world)
            .map(|(tf, text)| LabelView {
                pos: tf.translation.truncate(),
                text: text.label.clone(),
                ttl: text.ttl,
            })
            .collect();

        Self {
            run_state,
            camera,
            stats,
            player,
            boss,
            units,
            projectiles,
            pickups,
            crates,
            platforms,
            scraps,
            skyscrapers,
            particles,
            labels,
        }
    }
}
