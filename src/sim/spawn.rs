//! Spawn scheduling for collectibles and hazards
//!
//! Spawners own only their scheduling state; the simulation root owns the
//! entities they produce. Both timers are explicit countdown fields advanced
//! once per tick by the scheduler - there is no suspended control flow.
//!
//! Clock asymmetry: the collectible spawner is advanced with *unscaled* time
//! so a presentation freeze never desynchronizes its cadence, while the
//! hazard spawner runs on scaled time with the rest of the simulation.

use glam::Vec2;
use rand::Rng;

use super::arena::Arena;
use super::entity::{Collectible, CollectibleKind, Hazard};
use crate::tuning::Tuning;

/// Uniform sample from `[lo, hi)`. Degenerate or inverted ranges collapse to
/// the deterministic boundary value `lo` instead of panicking.
pub fn sample_range(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Pick a collectible variant from a uniform roll against cumulative cuts.
/// The cuts come pre-normalized from [`Tuning::variant_cuts`], so the three
/// outcomes always partition `[0, 1)` with no gap and no overlap.
pub fn roll_variant(rng: &mut impl Rng, cut_red: f32, cut_gold: f32) -> CollectibleKind {
    let roll: f32 = rng.random();
    if roll < cut_red {
        CollectibleKind::SpeedBoost
    } else if roll < cut_gold {
        CollectibleKind::ExtraLife
    } else {
        CollectibleKind::Penalty
    }
}

/// Randomized-interval scheduler for collectibles
///
/// Redraws its interval from the configured range after every cycle,
/// including cycles where production was skipped because the session had no
/// lives left - the cadence itself never stalls.
#[derive(Debug, Clone)]
pub struct CollectibleSpawner {
    time_to_next: f32,
}

impl CollectibleSpawner {
    pub fn new(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        Self {
            time_to_next: sample_range(
                rng,
                tuning.collectible_interval[0],
                tuning.collectible_interval[1],
            ),
        }
    }

    /// Advance by `dt` unscaled seconds. Returns true when a spawn is due;
    /// the interval is resampled either way.
    pub fn advance(&mut self, dt: f32, rng: &mut impl Rng, tuning: &Tuning) -> bool {
        self.time_to_next -= dt;
        if self.time_to_next > 0.0 {
            return false;
        }
        self.time_to_next = sample_range(
            rng,
            tuning.collectible_interval[0],
            tuning.collectible_interval[1],
        )
        .max(1e-3);
        true
    }

    /// Produce one collectible at an area-uniform point inside the arena
    pub fn spawn(&self, id: u32, rng: &mut impl Rng, arena: &Arena, tuning: &Tuning) -> Collectible {
        let (cut_red, cut_gold) = tuning.variant_cuts();
        Collectible {
            id,
            kind: roll_variant(rng, cut_red, cut_gold),
            pos: arena.sample_point(rng, tuning.collectible_margin),
            lifetime_remaining: sample_range(
                rng,
                tuning.collectible_lifetime[0],
                tuning.collectible_lifetime[1],
            ),
        }
    }
}

/// Fixed-period scheduler for hazards, with a one-time initial delay
#[derive(Debug, Clone)]
pub struct HazardSpawner {
    time_to_next: f32,
}

impl HazardSpawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            time_to_next: tuning.hazard_first_delay,
        }
    }

    /// Advance by `dt` scaled seconds. Fires on a strictly fixed period;
    /// the overshoot is carried so the cadence does not drift.
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> bool {
        self.time_to_next -= dt;
        if self.time_to_next > 0.0 {
            return false;
        }
        self.time_to_next += tuning.hazard_spawn_every.max(1e-3);
        true
    }

    /// Launch one hazard from a uniform perimeter point, aimed at the
    /// center with jittered speed
    pub fn spawn(&self, id: u32, rng: &mut impl Rng, arena: &Arena, tuning: &Tuning) -> Hazard {
        let launch = arena.sample_perimeter(rng);
        let jitter = tuning.hazard_speed_jitter;
        let speed = tuning.hazard_base_speed + sample_range(rng, -jitter, jitter);
        Hazard::launch(id, launch, arena.center, speed, tuning.hazard_spin_rate)
    }
}
