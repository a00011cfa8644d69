//! Session state: score, lives and the game-over transition
//!
//! All mutation goes through the operations here; there is no other write
//! path. Every operation is a silent no-op once the session is over, which
//! makes late effects from same-tick overlaps harmless by construction.

use super::state::GameEvent;

/// Score, lives and game-over flag for one play-through
#[derive(Debug, Clone)]
pub struct SessionState {
    score: i64,
    lives: u32,
    max_lives: u32,
    over: bool,
    points_per_tick: i64,
    tick_seconds: f32,
    /// Countdown to the next periodic score award, in scaled seconds.
    /// `None` means cancelled (game over). Being a single field, two
    /// concurrent tickers are impossible.
    score_tick: Option<f32>,
}

impl SessionState {
    pub fn new(max_lives: u32, points_per_tick: i64, tick_seconds: f32) -> Self {
        let max_lives = max_lives.max(1);
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
            over: false,
            points_per_tick,
            tick_seconds,
            score_tick: Some(tick_seconds),
        }
    }

    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Add (or with a negative delta, subtract) score points.
    /// Score has no lower bound; penalties may drive it negative.
    pub fn add_score(&mut self, delta: i64, events: &mut Vec<GameEvent>) {
        if self.over {
            return;
        }
        self.score += delta;
        events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Remove lives, clamped at zero. Reaching zero flips the session to
    /// over exactly once and cancels the score ticker.
    pub fn lose_life(&mut self, amount: u32, events: &mut Vec<GameEvent>) {
        if self.over {
            return;
        }
        self.lives = self.lives.saturating_sub(amount);
        events.push(GameEvent::LivesChanged(self.lives));
        if self.lives == 0 {
            self.over = true;
            self.score_tick = None;
        }
    }

    /// Add lives, clamped at the configured maximum
    pub fn gain_life(&mut self, amount: u32, events: &mut Vec<GameEvent>) {
        if self.over {
            return;
        }
        self.lives = (self.lives + amount).min(self.max_lives);
        events.push(GameEvent::LivesChanged(self.lives));
    }

    /// Advance the periodic score ticker by `dt` scaled seconds
    pub fn advance_ticker(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if self.over {
            return;
        }
        if let Some(remaining) = self.score_tick.as_mut() {
            *remaining -= dt;
            if *remaining > 0.0 {
                return;
            }
            // Carry the overshoot so the cadence does not drift
            *remaining += self.tick_seconds.max(1e-3);
        } else {
            return;
        }
        self.add_score(self.points_per_tick, events);
    }

    /// Reinitialize for a fresh session: full lives, zero score, ticker
    /// re-armed, game-over panel hidden
    pub fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.score = 0;
        self.lives = self.max_lives;
        self.over = false;
        self.score_tick = Some(self.tick_seconds);
        events.push(GameEvent::GameOverHidden);
        events.push(GameEvent::ScoreChanged(self.score));
        events.push(GameEvent::LivesChanged(self.lives));
    }
}
