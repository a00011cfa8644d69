//! Deterministic arena simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies
//!
//! Two clocks coexist (see [`SimClock`]): scaled simulation time, which stops
//! when the session freezes on game over, and unscaled real time, which never
//! stops. Agent movement, boosts, entity motion/lifetimes, the score tick and
//! the hazard spawner run on scaled time; the collectible spawner runs on
//! unscaled time so its cadence survives a presentation freeze.

pub mod agent;
pub mod arena;
pub mod entity;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use agent::{Agent, Facing};
pub use arena::Arena;
pub use entity::{Collectible, CollectibleKind, Hazard};
pub use session::SessionState;
pub use spawn::{CollectibleSpawner, HazardSpawner, sample_range};
pub use state::{GameEvent, SimClock, SimState};
pub use tick::{TickInput, tick};
