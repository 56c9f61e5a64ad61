//! Projectiles plugin: **message-based producer → consumer** spawning +
//! data-driven pooling.
//!
//! # Philosophy: invariants first
//! This module tree is intentionally designed to **push correctness checks
//! to boundaries** and keep **hot paths** (allocation, flight, return
//! commit) as straight-line as possible.
//!
//! In an ECS, you can't make "this entity exists and has these components"
//! a compile-time fact. But you *can*:
//! - encode **meaning** with types (newtypes / enums),
//! - validate invariants once (pre-spawn / state transition),
//! - and then treat violations as bugs (fail-fast `expect()`),
//! which removes a lot of runtime branching from hot loops.
//!
//! # Data flow (big picture)
//! ```text
//!   Update schedule (clamped, scaled dt)
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  (A) Producers: player weapon, unit guns, boss patterns              │
//! │      - read: positions, recharge timers, aim                         │
//! │      - write: FireRequest message                                    │
//! │                                                                      │
//! │  (B) Consumer: allocate_projectiles                                  │
//! │      - reads: FireRequest messages                                   │
//! │      - mutates: ProjectilePool free list (single writer)             │
//! │      - mutates: ProjectileState, Projectile, Transform, Velocity     │
//! │                                                                      │
//! │  (C) Flight: update_flight                                           │
//! │      - integrates velocity, sags gravity shells, burns lifetime      │
//! │      - mutates: ProjectileState -> PendingReturn on expiry           │
//! │                                                                      │
//! │  (D) Combat resolve (combat plugin)                                  │
//! │      - overlap tests against units / crates / boss / player          │
//! │      - mutates: ProjectileState -> PendingReturn on hit              │
//! └──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  (E) Commit returns: return_to_pool_commit                           │
//! │      - writes invariants for the Inactive state                      │
//! │      - mutates: ProjectilePool free list push                        │
//! └──────────────────────────────────────────────────────────────────────┘
//!
//! Feedback loop:
//!   commit pushes ProjectileEntity back into the free list
//!   allocator pops ProjectileEntity from the free list
//! ```
//!
//! # Why "Messages" instead of direct pool access?
//! Producers do **not** borrow `ResMut<ProjectilePool>`.
//! They only enqueue intent (FireRequest).
//! The allocator is the **single writer** that mutates the pool.
//! This improves decoupling and keeps pool mutation localized.
//!
//! # Where do we still branch?
//! - Capacity: the pool can be empty → the allocator drops the request
//!   (capacity decision).
//! Everything else is treated as an invariant violation.

pub mod components;
pub mod pool;

pub mod messages;
pub mod allocator;
pub mod flight;
pub mod commit;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::RunState;
use crate::common::tunables::Tunables;
use crate::plugins::SimSet;

pub struct ProjectilesPlugin;

/// Maintain fire request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_fire_messages(mut msgs: ResMut<Messages<messages::FireRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        // Pool + pre-spawn. Capacity is a tunable so tests can shrink it.
        let capacity = app.world().resource::<Tunables>().caps.projectiles;
        app.insert_resource(pool::ProjectilePool::new(capacity));
        app.add_systems(Startup, pool::init_projectile_pool);

        // Message storage for fire requests.
        app.init_resource::<Messages<messages::FireRequest>>();
        app.add_systems(PostUpdate, update_fire_messages);

        app.add_systems(
            Update,
            (
                allocator::allocate_projectiles.in_set(SimSet::Allocate),
                flight::update_flight.in_set(SimSet::Flight),
            )
                .run_if(in_state(RunState::Playing)),
        );

        app.add_systems(
            PostUpdate,
            commit::return_to_pool_commit.run_if(in_state(RunState::Playing)),
        );
    }
}

#[cfg(test)]
mod tests;
