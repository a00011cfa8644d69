//! Short-lived arena entities: collectibles and hazards
//!
//! Both are one-shot triggers: the first agent overlap applies the effect
//! and the entity is removed in the same tick, so a second application is
//! impossible by construction.

use glam::Vec2;

use super::arena::Arena;
use crate::consts::{AGENT_RADIUS, COLLECTIBLE_RADIUS, HAZARD_RADIUS};

/// Collectible effect variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    /// Temporary multiplicative speed boost for the agent
    SpeedBoost,
    /// +1 life, clamped at the session maximum
    ExtraLife,
    /// Score penalty
    Penalty,
}

/// A stationary pickup with a sampled despawn timer
#[derive(Debug, Clone)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    /// Scaled seconds until silent despawn, drawn once at spawn
    pub lifetime_remaining: f32,
}

impl Collectible {
    /// Advance the despawn timer; returns true once the lifetime elapsed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.lifetime_remaining -= dt;
        self.lifetime_remaining <= 0.0
    }

    /// Trigger-volume overlap test against the agent
    #[inline]
    pub fn overlaps_agent(&self, agent_pos: Vec2) -> bool {
        (self.pos - agent_pos).length() <= AGENT_RADIUS + COLLECTIBLE_RADIUS
    }
}

/// A projectile launched from the arena perimeter toward the center
#[derive(Debug, Clone)]
pub struct Hazard {
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction from launch point toward the arena center, fixed at
    /// launch
    pub dir: Vec2,
    /// Speed sampled once at launch
    pub speed: f32,
    /// Accumulated presentation spin in degrees; no physical effect
    pub spin: f32,
    spin_rate: f32,
}

impl Hazard {
    pub fn launch(id: u32, launch_pos: Vec2, center: Vec2, speed: f32, spin_rate: f32) -> Self {
        Self {
            id,
            pos: launch_pos,
            dir: (center - launch_pos).normalize_or_zero(),
            speed,
            spin: 0.0,
            spin_rate,
        }
    }

    /// Constant-velocity step plus presentation spin
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
        self.spin += self.spin_rate * dt;
    }

    /// True once the hazard has passed the despawn margin beyond the arena
    /// boundary. Guarantees every hazard eventually leaves the simulation
    /// even if it never meets the agent.
    #[inline]
    pub fn out_of_bounds(&self, arena: &Arena, margin: f32) -> bool {
        arena.dist_from_center(self.pos) > arena.radius + margin
    }

    /// Trigger-volume overlap test against the agent
    #[inline]
    pub fn overlaps_agent(&self, agent_pos: Vec2) -> bool {
        (self.pos - agent_pos).length() <= AGENT_RADIUS + HAZARD_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hazard_radial_motion_exact() {
        let arena = Arena::new(Vec2::ZERO, 7.5);
        let launch = Vec2::new(7.5, 0.0);
        let mut h = Hazard::launch(1, launch, arena.center, 4.0, 720.0);

        // After T seconds: P + normalize(center - P) * S * T, no clamping
        let mut t = 0.0;
        for _ in 0..10 {
            h.advance(0.25);
            t += 0.25;
            let expected = launch + (arena.center - launch).normalize() * 4.0 * t;
            assert!((h.pos - expected).length() < 1e-4);
        }
    }

    #[test]
    fn test_hazard_crosses_center_and_despawns_past_margin() {
        let arena = Arena::new(Vec2::ZERO, 7.5);
        let mut h = Hazard::launch(1, Vec2::new(0.0, 7.5), arena.center, 4.0, 720.0);
        // 7.5 units to the center, another 9.0 to the far despawn line
        for _ in 0..40 {
            assert!(!h.out_of_bounds(&arena, 1.5));
            h.advance(0.1);
        }
        // t = 4.0 -> 16.0 units traveled, 8.5 past center
        h.advance(0.1);
        for _ in 0..5 {
            h.advance(0.1);
        }
        assert!(h.out_of_bounds(&arena, 1.5));
    }

    #[test]
    fn test_hazard_spin_is_presentation_only() {
        let arena = Arena::new(Vec2::ZERO, 7.5);
        let mut a = Hazard::launch(1, Vec2::new(7.5, 0.0), arena.center, 4.0, 720.0);
        let mut b = Hazard::launch(2, Vec2::new(7.5, 0.0), arena.center, 4.0, 0.0);
        a.advance(1.0);
        b.advance(1.0);
        assert_eq!(a.pos, b.pos);
        assert!((a.spin - 720.0).abs() < 1e-3);
    }

    #[test]
    fn test_collectible_lifetime_elapses() {
        let mut c = Collectible {
            id: 1,
            kind: CollectibleKind::Penalty,
            pos: Vec2::ZERO,
            lifetime_remaining: 3.5,
        };
        assert!(!c.advance(3.0));
        assert!(c.advance(0.5));
    }

    #[test]
    fn test_overlap_threshold() {
        let c = Collectible {
            id: 1,
            kind: CollectibleKind::SpeedBoost,
            pos: Vec2::ZERO,
            lifetime_remaining: 1.0,
        };
        assert!(c.overlaps_agent(Vec2::new(0.8, 0.0)));
        assert!(!c.overlaps_agent(Vec2::new(0.9, 0.0)));

        let h = Hazard::launch(2, Vec2::new(1.0, 0.0), Vec2::ZERO, 4.0, 0.0);
        assert!(h.overlaps_agent(Vec2::new(0.1, 0.0)));
        assert!(!h.overlaps_agent(Vec2::new(-0.5, 0.0)));
    }
}
