//! Simulation randomness source.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Single RNG behind all gameplay rolls: world layout, drop chances,
/// archetype picks, boss barrage jitter. Tests insert a seeded instance to
/// make generation reproducible.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}
