//! Paddock - a circular arena survival game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `persistence`: High score storage
//!
//! The crate implements only the simulation; rendering, audio playback and UI
//! are external consumers that drain [`sim::GameEvent`]s each tick.

pub mod persistence;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Fixed geometry and timing constants that are not part of [`Tuning`]
pub mod consts {
    /// Fixed simulation timestep used by the demo shell (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Squared input magnitude below which the agent counts as idle
    pub const MOVE_EPSILON_SQ: f32 = 0.001;

    /// Trigger-volume radii for overlap checks
    pub const AGENT_RADIUS: f32 = 0.5;
    pub const COLLECTIBLE_RADIUS: f32 = 0.35;
    pub const HAZARD_RADIUS: f32 = 0.45;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
