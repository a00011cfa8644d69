//! Headless demo shell
//!
//! Runs a session at a fixed timestep with a simple scripted input and logs
//! the presentation events the core emits. Stands in for the rendering,
//! audio and UI layers, which live outside this crate.

use glam::Vec2;
use paddock::consts::SIM_DT;
use paddock::persistence::FileHighScoreStore;
use paddock::sim::{GameEvent, SimState, TickInput, tick};
use paddock::tuning::Tuning;

const TUNING_PATH: &str = "paddock-tuning.json";
const HIGH_SCORE_PATH: &str = "paddock-highscore.json";

fn main() {
    env_logger::init();
    log::info!("Paddock (headless) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let tuning = Tuning::load(TUNING_PATH);
    let mut store = FileHighScoreStore::load(HIGH_SCORE_PATH);
    let mut state = SimState::new(seed, tuning);
    log::info!("Session started with seed {seed}");

    // Sweep around the arena while alive; ask for one reload after the
    // first game over so the restart path is exercised too
    let mut restarts_left = 1u32;
    let max_ticks = (180.0 / SIM_DT) as u64;

    for frame in 0..max_ticks {
        let t = frame as f32 * SIM_DT;
        let over = state.session.is_over();
        let input = TickInput {
            move_axes: if over {
                Vec2::ZERO
            } else {
                Vec2::new((t * 0.7).cos(), (t * 0.9).sin())
            },
            restart: over && restarts_left > 0,
        };
        tick(&mut state, &input, SIM_DT, &mut store);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::info!("score: {score}"),
                GameEvent::LivesChanged(lives) => log::info!("lives: {lives}"),
                GameEvent::GameOver {
                    final_score,
                    high_score,
                } => log::info!("GAME OVER - score {final_score}, best {high_score}"),
                GameEvent::GameOverHidden => log::info!("game over panel hidden"),
                GameEvent::MovementChanged { moving, facing } => {
                    log::debug!("moving={moving} facing={facing:?}")
                }
                GameEvent::PickupSound(kind) => log::debug!("pickup: {kind:?}"),
                GameEvent::ExplosionSound => log::debug!("hay impact"),
                GameEvent::RestartRequested => {
                    if restarts_left > 0 {
                        restarts_left -= 1;
                        let reseed = seed.wrapping_add(1);
                        state = SimState::new(reseed, state.tuning.clone());
                        log::info!("Session reloaded with seed {reseed}");
                    }
                }
            }
        }
    }

    log::info!(
        "Demo finished after {} ticks: score {}, lives {}",
        state.time_ticks,
        state.session.score(),
        state.session.lives()
    );
}
