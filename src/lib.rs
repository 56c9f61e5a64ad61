//! Headless side-scroller simulation core.
//!
//! Everything that plays the game lives here; nothing that draws it does.
//! A host builds an `App` with `MinimalPlugins` + `StatesPlugin`, calls
//! [`game::configure`], writes [`common::intent::ControlIntent`] before
//! each `App::update`, and reads [`game::snapshot::Snapshot`] plus the
//! [`common::cues::AudioCue`] messages after.
//!
//! Integration tests in `tests/` are compiled as separate crates; this
//! `lib.rs` gives them the same public API surface a host embeds.

pub mod game;
pub mod common;
pub mod plugins;
