//! One cooperative simulation step
//!
//! A single `tick` advances the clocks, the agent, both spawner timers, all
//! live entities, overlap resolution and the session state machine. Entity
//! removal is synchronous within the tick: a consumed entity cannot apply a
//! second effect, and effects landing after game over fall into the
//! session's no-op guard.

use glam::Vec2;

use super::entity::CollectibleKind;
use super::state::{GameEvent, SimState};
use crate::persistence::HighScoreStore;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Raw movement axes, each component in [-1, 1], not pre-normalized
    pub move_axes: Vec2,
    /// Restart request (game-over panel button); only honored while over
    pub restart: bool,
}

/// Advance the simulation by one frame of `dt` real seconds
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32, store: &mut dyn HighScoreStore) {
    if input.restart && state.session.is_over() {
        state.events.push(GameEvent::RestartRequested);
    }

    let scaled_dt = state.clock.advance(dt);
    state.time_ticks += 1;

    // Agent movement and boost countdown (scaled time)
    state
        .agent
        .update(input.move_axes, &state.arena, scaled_dt, &mut state.events);

    // Periodic score award (scaled time, cancelled on game over)
    state.session.advance_ticker(scaled_dt, &mut state.events);

    // Collectible spawner runs on unscaled time so a presentation freeze
    // never shifts its cadence; at zero lives the cycle re-arms but
    // produces nothing
    if state
        .collectible_spawner
        .advance(dt, &mut state.rng, &state.tuning)
        && state.session.lives() > 0
    {
        let id = state.next_entity_id();
        let c = state
            .collectible_spawner
            .spawn(id, &mut state.rng, &state.arena, &state.tuning);
        state.collectibles.push(c);
    }

    // Hazard spawner runs on scaled time; production is suspended once the
    // session is over
    if state.hazard_spawner.advance(scaled_dt, &state.tuning) && !state.session.is_over() {
        let id = state.next_entity_id();
        let h = state
            .hazard_spawner
            .spawn(id, &mut state.rng, &state.arena, &state.tuning);
        state.hazards.push(h);
    }

    // Entity motion and lifetimes (scaled time)
    for hazard in &mut state.hazards {
        hazard.advance(scaled_dt);
    }
    let arena = state.arena;
    let despawn_margin = state.tuning.hazard_despawn_margin;
    state
        .hazards
        .retain(|h| !h.out_of_bounds(&arena, despawn_margin));

    for collectible in &mut state.collectibles {
        collectible.advance(scaled_dt);
    }
    state.collectibles.retain(|c| c.lifetime_remaining > 0.0);

    // Overlap resolution. Consumed entities are removed before their
    // effects run, so one instance can never fire twice.
    let agent_pos = state.agent.pos;

    let mut picked: Vec<CollectibleKind> = Vec::new();
    state.collectibles.retain(|c| {
        if c.overlaps_agent(agent_pos) {
            picked.push(c.kind);
            false
        } else {
            true
        }
    });
    for kind in picked {
        state.events.push(GameEvent::PickupSound(kind));
        match kind {
            CollectibleKind::SpeedBoost => state.agent.apply_speed_boost(
                state.tuning.pickup_boost_multiplier,
                state.tuning.pickup_boost_duration,
            ),
            CollectibleKind::ExtraLife => state
                .session
                .gain_life(state.tuning.extra_lives, &mut state.events),
            CollectibleKind::Penalty => state
                .session
                .add_score(state.tuning.penalty_points, &mut state.events),
        }
    }

    let mut impacts = 0u32;
    state.hazards.retain(|h| {
        if h.overlaps_agent(agent_pos) {
            impacts += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..impacts {
        state.events.push(GameEvent::ExplosionSound);
        state.session.lose_life(1, &mut state.events);
    }

    // Game-over transition, exactly once per session: freeze simulation
    // time, persist the high score, show the panel
    if state.session.is_over() && !state.game_over_handled {
        state.game_over_handled = true;
        if state.tuning.freeze_on_game_over {
            state.clock.time_scale = 0.0;
        }
        let final_score = state.session.score();
        let stored = store.high_score();
        let high_score = if final_score > stored {
            store.set_high_score(final_score);
            final_score
        } else {
            stored
        };
        log::info!("game over: final score {final_score}, high score {high_score}");
        state.events.push(GameEvent::GameOver {
            final_score,
            high_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryHighScoreStore;
    use crate::sim::entity::{Collectible, Hazard};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state(seed: u64) -> SimState {
        SimState::new(seed, Tuning::default())
    }

    fn place_collectible(state: &mut SimState, kind: CollectibleKind, pos: Vec2) {
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            kind,
            pos,
            lifetime_remaining: 10.0,
        });
    }

    fn place_hazard_on_agent(state: &mut SimState) {
        let id = state.next_entity_id();
        let agent_pos = state.agent.pos;
        state
            .hazards
            .push(Hazard::launch(id, agent_pos, state.arena.center, 0.0, 0.0));
    }

    /// Drive the session to game over through real hazard impacts
    fn run_to_game_over(state: &mut SimState, store: &mut MemoryHighScoreStore) {
        while !state.session.is_over() {
            place_hazard_on_agent(state);
            tick(state, &TickInput::default(), SIM_DT, store);
        }
    }

    #[test]
    fn test_pickup_applies_effect_once_and_consumes() {
        let mut state = new_state(1);
        let mut store = MemoryHighScoreStore::default();
        let agent_pos = state.agent.pos;
        place_collectible(&mut state, CollectibleKind::ExtraLife, agent_pos);
        state.session.lose_life(1, &mut state.events);
        state.events.clear();

        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert_eq!(state.session.lives(), 3);
        assert!(state.collectibles.is_empty());
        assert!(
            state
                .events
                .contains(&GameEvent::PickupSound(CollectibleKind::ExtraLife))
        );

        // Nothing left to re-trigger
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert_eq!(state.session.lives(), 3);
    }

    #[test]
    fn test_penalty_pickup_subtracts_score() {
        let mut state = new_state(2);
        let mut store = MemoryHighScoreStore::default();
        let agent_pos = state.agent.pos;
        place_collectible(&mut state, CollectibleKind::Penalty, agent_pos);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert_eq!(state.session.score(), -20);
    }

    #[test]
    fn test_boost_pickup_boosts_agent() {
        let mut state = new_state(3);
        let mut store = MemoryHighScoreStore::default();
        let agent_pos = state.agent.pos;
        place_collectible(&mut state, CollectibleKind::SpeedBoost, agent_pos);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert_eq!(state.agent.speed_multiplier(), 2.0);
    }

    #[test]
    fn test_hazard_impact_loses_life_and_consumes() {
        let mut state = new_state(4);
        let mut store = MemoryHighScoreStore::default();
        place_hazard_on_agent(&mut state);
        tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        assert_eq!(state.session.lives(), 2);
        assert!(state.hazards.is_empty());
        assert!(state.events.contains(&GameEvent::ExplosionSound));
    }

    #[test]
    fn test_game_over_freezes_time_and_persists_high_score() {
        let mut state = new_state(5);
        let mut store = MemoryHighScoreStore::default();
        state.session.add_score(70, &mut state.events);

        run_to_game_over(&mut state, &mut store);
        assert_eq!(state.clock.time_scale, 0.0);
        assert_eq!(store.high_score(), 70);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            final_score: 70,
            high_score: 70,
        }));

        // Frozen: score ticker and hazards make no progress
        let ticks_before = state.session.score();
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        }
        assert_eq!(state.session.score(), ticks_before);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_high_score_not_lowered() {
        let mut state = new_state(6);
        let mut store = MemoryHighScoreStore::new(500);
        state.session.add_score(70, &mut state.events);

        run_to_game_over(&mut state, &mut store);
        assert_eq!(store.high_score(), 500);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            final_score: 70,
            high_score: 500,
        }));
    }

    #[test]
    fn test_game_over_transition_runs_once() {
        let mut state = new_state(7);
        let mut store = MemoryHighScoreStore::default();
        run_to_game_over(&mut state, &mut store);
        state.drain_events();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        }
        let repeats = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(repeats, 0);
    }

    #[test]
    fn test_collectible_cadence_survives_freeze_but_skips_at_zero_lives() {
        let mut state = new_state(8);
        let mut store = MemoryHighScoreStore::default();
        run_to_game_over(&mut state, &mut store);
        state.collectibles.clear();

        // A minute of frozen presentation time: the unscaled spawn timer
        // keeps cycling but zero lives suppress production
        for _ in 0..3600 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
        }
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_reset_round_trip_resumes_score_tick() {
        // Push both spawners far out so only the score ticker acts here
        let tuning = Tuning {
            hazard_first_delay: 1000.0,
            collectible_interval: [1000.0, 1001.0],
            ..Tuning::default()
        };
        let mut state = SimState::new(9, tuning);
        let mut store = MemoryHighScoreStore::default();
        run_to_game_over(&mut state, &mut store);

        state.reset_session();
        assert_eq!(state.session.score(), 0);
        assert_eq!(state.session.lives(), 3);
        assert!(!state.session.is_over());
        assert_eq!(state.clock.time_scale, 1.0);

        // One full tick interval => exactly one award
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 0.5, &mut store);
        }
        assert_eq!(state.session.score(), 10);
    }

    #[test]
    fn test_restart_request_only_while_over() {
        let mut state = new_state(10);
        let mut store = MemoryHighScoreStore::default();
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };

        tick(&mut state, &restart, SIM_DT, &mut store);
        assert!(!state.drain_events().contains(&GameEvent::RestartRequested));

        run_to_game_over(&mut state, &mut store);
        state.drain_events();
        tick(&mut state, &restart, SIM_DT, &mut store);
        assert!(state.drain_events().contains(&GameEvent::RestartRequested));
    }

    #[test]
    fn test_hazards_spawn_and_eventually_despawn() {
        let mut state = new_state(11);
        let mut store = MemoryHighScoreStore::default();
        // Park the agent off-center so most hazards miss it
        state.agent.pos = Vec2::new(6.0, 0.0);

        let mut seen_hazard = false;
        for _ in 0..(30.0 / SIM_DT) as u32 {
            tick(&mut state, &TickInput::default(), SIM_DT, &mut store);
            seen_hazard |= !state.hazards.is_empty();
            for h in &state.hazards {
                let d = state.arena.dist_from_center(h.pos);
                assert!(d <= state.arena.radius + state.tuning.hazard_despawn_margin + 0.1);
            }
        }
        assert!(seen_hazard);
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let mut a = new_state(12345);
        let mut b = new_state(12345);
        let mut store_a = MemoryHighScoreStore::default();
        let mut store_b = MemoryHighScoreStore::default();

        let input = TickInput {
            move_axes: Vec2::new(0.7, -0.4),
            restart: false,
        };
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT, &mut store_a);
            tick(&mut b, &input, SIM_DT, &mut store_b);
        }
        assert_eq!(a.agent.pos, b.agent.pos);
        assert_eq!(a.session.score(), b.session.score());
        assert_eq!(a.session.lives(), b.session.lives());
        assert_eq!(a.collectibles.len(), b.collectibles.len());
        assert_eq!(a.hazards.len(), b.hazards.len());
    }

    #[test]
    fn test_agent_stays_inside_arena_under_input() {
        let mut state = new_state(13);
        let mut store = MemoryHighScoreStore::default();
        let input = TickInput {
            move_axes: Vec2::new(1.0, 0.3),
            restart: false,
        };
        for _ in 0..1200 {
            tick(&mut state, &input, SIM_DT, &mut store);
            assert!(state.arena.dist_from_center(state.agent.pos) <= state.arena.radius + 1e-3);
        }
    }
}
