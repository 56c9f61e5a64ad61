//! Per-tick control intent supplied by the host.
//!
//! The engine never reads devices. The embedding layer translates whatever
//! input it owns (keys, touch, replay tape) into this resource before each
//! update; edge-triggered fields are consumed by the systems that act on
//! them.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ControlIntent {
    /// Horizontal move axis in [-1, 1].
    pub move_axis: f32,
    /// Jump edge. Consumed into the jump buffer.
    pub jump_pressed: bool,
    /// Dash edge. Consumed when a dash starts.
    pub dash_pressed: bool,
    /// Overdrive activation edge.
    pub overdrive_pressed: bool,
    pub fire_held: bool,
    /// Aim point in world space.
    pub aim: Vec2,
}

impl ControlIntent {
    /// Drops edge-triggered presses. Called on run transitions so a held
    /// button from the previous run cannot fire on the first tick.
    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.dash_pressed = false;
        self.overdrive_pressed = false;
    }
}
