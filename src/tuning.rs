//! Data-driven game balance
//!
//! Defaults match the shipped balance. An optional JSON file can override
//! any subset of fields; anything missing or unparseable falls back to the
//! defaults. Validation runs once at load/construction time - in particular
//! the collectible probability mix is normalized here, never at roll time.

use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// All configurable balance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_center: Vec2,
    pub arena_radius: f32,

    // === Agent ===
    pub agent_speed: f32,
    /// Substituted when a boost is requested with a non-positive multiplier
    pub boost_default_multiplier: f32,

    // === Collectibles ===
    /// Spawn interval range [min, max] in unscaled seconds, resampled each cycle
    pub collectible_interval: [f32; 2],
    /// Untouched-despawn lifetime range [min, max] in seconds
    pub collectible_lifetime: [f32; 2],
    /// Placement keeps this distance inside the arena boundary
    pub collectible_margin: f32,
    /// Probability share of the speed-boost (red) variant
    pub p_red: f32,
    /// Probability share of the extra-life (gold) variant; the remainder is
    /// the penalty variant
    pub p_gold: f32,
    pub pickup_boost_multiplier: f32,
    pub pickup_boost_duration: f32,
    pub extra_lives: u32,
    pub penalty_points: i64,

    // === Hazards ===
    pub hazard_first_delay: f32,
    pub hazard_spawn_every: f32,
    pub hazard_base_speed: f32,
    /// Speed is sampled as base ± this jitter
    pub hazard_speed_jitter: f32,
    /// Presentation spin in degrees per second
    pub hazard_spin_rate: f32,
    /// Hazards despawn this far past the arena boundary
    pub hazard_despawn_margin: f32,

    // === Session ===
    pub max_lives: u32,
    pub points_per_tick: i64,
    /// Period of the survival score award, in scaled seconds
    pub tick_seconds: f32,
    /// Zero the time scale when the session ends
    pub freeze_on_game_over: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_center: Vec2::ZERO,
            arena_radius: 7.5,

            agent_speed: 5.0,
            boost_default_multiplier: 2.0,

            collectible_interval: [3.0, 5.0],
            collectible_lifetime: [3.0, 4.0],
            collectible_margin: 0.5,
            p_red: 0.6,
            p_gold: 0.2,
            pickup_boost_multiplier: 2.0,
            pickup_boost_duration: 5.0,
            extra_lives: 1,
            penalty_points: -20,

            hazard_first_delay: 1.5,
            hazard_spawn_every: 2.0,
            hazard_base_speed: 4.0,
            hazard_speed_jitter: 1.5,
            hazard_spin_rate: 720.0,
            hazard_despawn_margin: 1.5,

            max_lives: 3,
            points_per_tick: 10,
            tick_seconds: 5.0,
            freeze_on_game_over: true,
        }
    }
}

impl Tuning {
    /// Repair out-of-range values in place. Called once when a simulation is
    /// constructed; roll-time code can then assume a well-formed mix.
    pub fn validate(&mut self) {
        if self.arena_radius <= 0.0 {
            log::warn!("non-positive arena radius {}, using 7.5", self.arena_radius);
            self.arena_radius = 7.5;
        }
        if self.max_lives == 0 {
            log::warn!("max_lives 0 bumped to 1");
            self.max_lives = 1;
        }
        if self.tick_seconds <= 0.0 {
            log::warn!("non-positive tick_seconds {}, using 5.0", self.tick_seconds);
            self.tick_seconds = 5.0;
        }

        self.p_red = self.p_red.clamp(0.0, 1.0);
        self.p_gold = self.p_gold.clamp(0.0, 1.0);
        let sum = self.p_red + self.p_gold;
        if sum > 1.0 {
            // Scale down proportionally so the shares partition [0, 1)
            log::warn!("variant mix sums to {sum:.3} > 1, normalizing proportionally");
            self.p_red /= sum;
            self.p_gold /= sum;
        }
    }

    /// Cumulative roll cuts for the 3-way variant draw:
    /// roll < cut_red -> SpeedBoost, roll < cut_gold -> ExtraLife, else Penalty
    pub fn variant_cuts(&self) -> (f32, f32) {
        let cut_red = self.p_red.clamp(0.0, 1.0);
        let cut_gold = (self.p_red + self.p_gold).clamp(0.0, 1.0);
        (cut_red, cut_gold)
    }

    /// Load tuning from a JSON file, falling back to defaults when the file
    /// is missing or unparseable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Tuning>(&contents) {
                Ok(mut tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning.validate();
                    tuning
                }
                Err(err) => {
                    log::warn!("Failed to parse {}: {err}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
