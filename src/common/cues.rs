//! Audio cue outbox.
//!
//! The simulation owns no audio. Systems that would make a sound write one
//! of these instead; the host drains the message buffer after each update
//! and maps cues to whatever playback it has. Cues carry no position, the
//! host can pair them with the snapshot if it wants panning.

use bevy::prelude::*;

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Shoot,
    Explosion,
    HeavyExplosion,
    Jump,
    Impact,
    Hit,
    Pickup,
    Dash,
    BossEntry,
}
