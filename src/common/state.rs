//! Run-level state machine.
//!
//! `Playing` is the only state in which gameplay systems run. `GameOver`
//! freezes the world in place until an explicit restart; `Start` is the
//! pre-run menu state.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum RunState {
    #[default]
    Start,
    Playing,
    GameOver,
}
