//! Common, shared types.

pub mod cues;
pub mod intent;
pub mod rng;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
