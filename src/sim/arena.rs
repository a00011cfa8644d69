//! Circular arena geometry
//!
//! The play area is a disc defined by a center point and radius. The agent is
//! hard-clamped onto the disc, collectibles spawn area-uniformly inside it,
//! and hazards launch from the exact perimeter.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// The bounded circular play area. Immutable for the duration of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arena {
    pub center: Vec2,
    pub radius: f32,
}

impl Arena {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(f32::EPSILON),
        }
    }

    /// Distance of a point from the arena center
    #[inline]
    pub fn dist_from_center(&self, pos: Vec2) -> f32 {
        (pos - self.center).length()
    }

    /// True if the point lies on or inside the boundary
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        self.dist_from_center(pos) <= self.radius
    }

    /// Hard-clamp a point onto the disc
    ///
    /// Positions beyond the boundary are rescaled to land exactly on the
    /// radius (no bounce, no reflection).
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        let offset = pos - self.center;
        if offset.length() > self.radius {
            self.center + offset.normalize() * self.radius
        } else {
            pos
        }
    }

    /// Sample a point uniformly over the disc area, shrunk by `margin`
    ///
    /// The square root on the radial draw gives uniform *area* density; a
    /// plain uniform radius would cluster points near the center.
    pub fn sample_point(&self, rng: &mut impl Rng, margin: f32) -> Vec2 {
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let r = rng.random::<f32>().sqrt() * (self.radius - margin).max(0.0);
        self.center + polar_to_cartesian(r, theta)
    }

    /// Sample a point uniformly on the perimeter (exact radius)
    pub fn sample_perimeter(&self, rng: &mut impl Rng) -> Vec2 {
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        self.center + polar_to_cartesian(self.radius, theta)
    }
}
