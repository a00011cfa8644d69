//! Player-controlled agent: clamped movement, facing, timed speed boost

use glam::Vec2;

use super::arena::Arena;
use super::state::GameEvent;
use crate::consts::MOVE_EPSILON_SQ;

/// Coarse 4-way facing derived from raw input. Presentation-only; the
/// physics never reads it. Ties break toward `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Down,
    Left,
    Right,
    Up,
}

impl Facing {
    fn from_axes(axes: Vec2) -> Self {
        if axes.x.abs() > axes.y.abs() {
            if axes.x < 0.0 {
                Facing::Left
            } else {
                Facing::Right
            }
        } else if axes.y > 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone)]
pub struct Agent {
    pub pos: Vec2,
    base_speed: f32,
    multiplier: f32,
    /// Remaining boost time in scaled seconds; `None` when no boost is
    /// active. A single field, so boosts cannot stack - the latest call
    /// always owns the countdown.
    boost_remaining: Option<f32>,
    default_boost_multiplier: f32,
    pub moving: bool,
    pub facing: Facing,
}

impl Agent {
    pub fn new(pos: Vec2, base_speed: f32, default_boost_multiplier: f32) -> Self {
        Self {
            pos,
            base_speed,
            multiplier: 1.0,
            boost_remaining: None,
            default_boost_multiplier,
            moving: false,
            facing: Facing::Down,
        }
    }

    /// Current effective speed multiplier (1.0 when no boost is active)
    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Start a timed speed boost. A non-positive multiplier is replaced by
    /// the configured default. Supersedes any in-flight boost entirely:
    /// the multiplier switches immediately and the countdown restarts.
    pub fn apply_speed_boost(&mut self, multiplier: f32, duration: f32) {
        let multiplier = if multiplier <= 0.0 {
            self.default_boost_multiplier
        } else {
            multiplier
        };
        self.multiplier = multiplier;
        self.boost_remaining = Some(duration);
    }

    /// Advance the boost countdown by `dt` scaled seconds
    pub fn advance_boost(&mut self, dt: f32) {
        if let Some(remaining) = self.boost_remaining.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.boost_remaining = None;
                self.multiplier = 1.0;
            }
        }
    }

    /// One movement step: consume the raw input axes (each in [-1, 1], not
    /// pre-normalized), move at boosted speed and hard-clamp onto the arena
    /// disc. Emits `MovementChanged` when the moving flag or facing flips.
    pub fn update(&mut self, axes: Vec2, arena: &Arena, dt: f32, events: &mut Vec<GameEvent>) {
        self.advance_boost(dt);

        let moving = axes.length_squared() > MOVE_EPSILON_SQ;
        // Facing persists while idle; zero input never snaps it back to Down
        let facing = if moving {
            Facing::from_axes(axes)
        } else {
            self.facing
        };
        if moving != self.moving || facing != self.facing {
            self.moving = moving;
            self.facing = facing;
            events.push(GameEvent::MovementChanged { moving, facing });
        }

        if moving {
            let dir = axes.normalize();
            let candidate = self.pos + dir * self.base_speed * self.multiplier * dt;
            self.pos = arena.clamp(candidate);
        }
    }
}
