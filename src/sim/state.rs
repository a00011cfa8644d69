//! Simulation root state and the presentation event queue

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::{Agent, Facing};
use super::arena::Arena;
use super::entity::{Collectible, CollectibleKind, Hazard};
use super::session::SessionState;
use super::spawn::{CollectibleSpawner, HazardSpawner};
use crate::tuning::Tuning;

/// The two simulation clocks
///
/// Scaled time stops advancing while the session is frozen (`time_scale`
/// zero on game over); unscaled time always advances. Each timer in the
/// simulation is tied to exactly one of the two - see the module docs.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    /// Accumulated scaled simulation seconds
    pub scaled: f64,
    /// Accumulated real seconds, unaffected by freezing
    pub unscaled: f64,
    /// Multiplier applied to incoming frame time (0 = frozen, 1 = normal)
    pub time_scale: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            scaled: 0.0,
            unscaled: 0.0,
            time_scale: 1.0,
        }
    }

    /// Push both clocks forward by one frame; returns the scaled dt
    pub fn advance(&mut self, dt: f32) -> f32 {
        let scaled_dt = dt * self.time_scale;
        self.unscaled += dt as f64;
        self.scaled += scaled_dt as f64;
        scaled_dt
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Presentation-port events emitted by the simulation and drained by the
/// shell each tick. The core never renders or plays audio itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Score display update
    ScoreChanged(i64),
    /// Life-count (hearts) display update
    LivesChanged(u32),
    /// Game-over panel show, with final and persisted-best scores
    GameOver { final_score: i64, high_score: i64 },
    /// Game-over panel hide (session reset)
    GameOverHidden,
    /// Animation flags and gallop-loop start/stop
    MovementChanged { moving: bool, facing: Facing },
    /// Pickup audio cue, per collectible variant
    PickupSound(CollectibleKind),
    /// Hazard impact audio cue
    ExplosionSound,
    /// The player asked for a full session reload; the shell rebuilds the
    /// simulation (scene-reload port)
    RestartRequested,
}

/// Complete simulation state, owned by the shell and advanced by
/// [`super::tick::tick`]
///
/// There are no globals: every entity and spawner reaches the one
/// [`SessionState`] through this root.
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub arena: Arena,
    pub clock: SimClock,
    pub session: SessionState,
    pub agent: Agent,
    /// Active collectibles, in spawn (id) order
    pub collectibles: Vec<Collectible>,
    /// Active hazards, in spawn (id) order
    pub hazards: Vec<Hazard>,
    pub collectible_spawner: CollectibleSpawner,
    pub hazard_spawner: HazardSpawner,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending presentation events; drained by the shell
    pub events: Vec<GameEvent>,
    /// Set once the game-over transition (freeze, high score, panel event)
    /// has run, so it cannot run twice for one session
    pub(crate) game_over_handled: bool,
    next_id: u32,
}

impl SimState {
    /// Create a fresh session. The tuning is validated (probability mix
    /// normalized, degenerate values clamped) before use.
    pub fn new(seed: u64, mut tuning: Tuning) -> Self {
        tuning.validate();
        let arena = Arena::new(tuning.arena_center, tuning.arena_radius);
        let mut rng = Pcg32::seed_from_u64(seed);
        let session = SessionState::new(
            tuning.max_lives,
            tuning.points_per_tick,
            tuning.tick_seconds,
        );
        let agent = Agent::new(
            arena.center,
            tuning.agent_speed,
            tuning.boost_default_multiplier,
        );
        let collectible_spawner = CollectibleSpawner::new(&mut rng, &tuning);
        let hazard_spawner = HazardSpawner::new(&tuning);
        Self {
            seed,
            tuning,
            arena,
            clock: SimClock::new(),
            session,
            agent,
            collectibles: Vec::new(),
            hazards: Vec::new(),
            collectible_spawner,
            hazard_spawner,
            rng,
            time_ticks: 0,
            events: Vec::new(),
            game_over_handled: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// In-place session reset: zero score, full lives, ticker re-armed,
    /// simulation time resumed, live entities and spawner schedules
    /// reinitialized. The agent returns to the arena center.
    pub fn reset_session(&mut self) {
        self.session.reset(&mut self.events);
        self.clock.time_scale = 1.0;
        self.game_over_handled = false;
        self.collectibles.clear();
        self.hazards.clear();
        self.collectible_spawner = CollectibleSpawner::new(&mut self.rng, &self.tuning);
        self.hazard_spawner = HazardSpawner::new(&self.tuning);
        self.agent = Agent::new(
            self.arena.center,
            self.tuning.agent_speed,
            self.tuning.boost_default_multiplier,
        );
    }

    /// Take all pending presentation events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
