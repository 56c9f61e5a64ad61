//! Collision primitives shared by every mover.
//!
//! There is no global integration step. Each mover system (player, units,
//! projectiles, particles) integrates its own velocity and then calls
//! [`resolve_solids`] against whatever solids it respects. Keeping the
//! resolver a plain function preserves per-mover ordering and makes it
//! trivially testable without a `World`.
//!
//! Resolution folds over solids in iteration order and a later solid may
//! undo an earlier snap. That order dependence is deliberate: stacked or
//! touching solids settle the same way every tick, which reads as stable
//! rather than jittery.

use bevy::prelude::*;

/// Velocity in world units per second.
#[derive(Component, Debug, Clone, Copy, Default, Deref, DerefMut)]
pub struct Velocity(pub Vec2);

/// Axis-aligned collision box, stored as half extents.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub half: Vec2,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { half: Vec2::new(width * 0.5, height * 0.5) }
    }
}

/// Marks an entity the resolver treats as impassable (platforms, crates).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Solid;

/// True when the two boxes overlap. Touching edges do not count.
pub fn aabb_overlap(a: Vec2, half_a: Vec2, b: Vec2, half_b: Vec2) -> bool {
    (a.x - b.x).abs() < half_a.x + half_b.x && (a.y - b.y).abs() < half_a.y + half_b.y
}

/// Pushes a mover out of every overlapping solid, least-penetrated axis
/// first. Returns whether the mover ended the pass standing on a solid.
///
/// Per solid:
/// - smaller horizontal overlap: push out the near side with a one-unit
///   gap, velocity untouched;
/// - mover above, moving down or still: land (snap to the top, `vel.y`
///   zeroed); a rising mover passes through from above;
/// - mover below: snap to the underside, upward velocity zeroed.
pub fn resolve_solids<I>(pos: &mut Vec2, half: Vec2, vel: &mut Vec2, solids: I) -> bool
where
    I: IntoIterator<Item = (Vec2, Vec2)>,
{
    let mut grounded = false;
    for (solid_pos, solid_half) in solids {
        let dx = pos.x - solid_pos.x;
        let dy = pos.y - solid_pos.y;
        let overlap_x = (half.x + solid_half.x) - dx.abs();
        let overlap_y = (half.y + solid_half.y) - dy.abs();
        if overlap_x <= 0.0 || overlap_y <= 0.0 {
            continue;
        }
        if overlap_x < overlap_y {
            // One unit of clearance so the pair is separated next tick.
            pos.x = solid_pos.x + (solid_half.x + half.x + 1.0) * dx.signum();
        } else if dy > 0.0 {
            if vel.y <= 0.0 {
                vel.y = 0.0;
                pos.y = solid_pos.y + solid_half.y + half.y;
                grounded = true;
            }
        } else {
            if vel.y > 0.0 {
                vel.y = 0.0;
            }
            pos.y = solid_pos.y - solid_half.y - half.y;
        }
    }
    grounded
}
