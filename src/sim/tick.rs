//! Fixed-step simulation tick
//!
//! Core game loop that advances the simulation deterministically. The host
//! calls [`tick`] once per frame; there are no internal timers.

use super::collision::resolve_collisions;
use super::events::GameEvent;
use super::rng::RandomSource;
use super::spawn::{should_spawn, spawn_object};
use super::state::{GamePhase, GameState, PowerUp};
use crate::input::Command;
use crate::tuning::Tuning;

/// Reset state for a fresh round and enter `Running`
pub fn start(state: &mut GameState, tuning: &Tuning) {
    state.reset(tuning);
    state.round.phase = GamePhase::Running;
    log::info!(
        "Round started (lives={}, speed={})",
        state.round.lives,
        state.round.speed
    );
}

/// Apply a lane command. Ignored unless the round is running.
pub fn apply_command(state: &mut GameState, command: Command, tuning: &Tuning) {
    if state.round.phase != GamePhase::Running {
        return;
    }
    match command {
        Command::Left => state.player.move_left(),
        Command::Right => state.player.move_right(),
        Command::Jump => {
            if !state.player.jump(tuning.jump_force) {
                log::trace!("Jump ignored while airborne");
            }
        }
    }
}

/// Advance the game state by one step, returning the events it produced
pub fn tick(
    state: &mut GameState,
    command: Option<Command>,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick before start or after game over
    if state.round.phase != GamePhase::Running {
        return events;
    }

    if let Some(command) = command {
        apply_command(state, command, tuning);
    }

    // Difficulty follows score, not wall-clock time
    state.round.speed = tuning.speed_for_score(state.round.score);

    // Player physics
    state.player.ease_toward_lane(tuning.easing);
    state.player.apply_gravity(tuning.gravity);

    // Power-up timers
    if state.player.tick_magnet() {
        log::debug!("Magnet expired");
        events.push(GameEvent::PowerUpExpired(PowerUp::Magnet));
    }

    // Spawner
    let frame = state.round.frame_counter;
    state.round.frame_counter += 1;
    if should_spawn(frame, state.round.speed) {
        let (id, kind, lane) = spawn_object(state, rng);
        events.push(GameEvent::ObjectSpawned { id, kind, lane });
    }

    // Advance objects and apply magnet pull
    let speed = state.round.speed;
    let player_x = state.player.x;
    for obj in &mut state.objects {
        obj.depth += speed;
        if obj.is_magnetised(&state.player, tuning) {
            obj.x_pos += (player_x - obj.x_pos) * tuning.magnet_pull;
        }
    }

    resolve_collisions(state, tuning, &mut events);

    let prune_depth = tuning.prune_depth;
    state.objects.retain(|o| o.active && o.depth < prune_depth);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, SeededRng};
    use crate::sim::state::ObjectKind;
    use proptest::prelude::*;

    /// Rolls that always spawn a wall in lane 0
    fn walls_left() -> ScriptedRandom {
        ScriptedRandom::new(vec![0.0, 0.7])
    }

    fn started(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(tuning);
        start(&mut state, tuning);
        state
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let tuning = Tuning::default();
        let mut state = GameState::new(&tuning);
        let before = state.clone();
        let events = tick(&mut state, Some(Command::Right), &tuning, &mut walls_left());
        assert!(events.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_first_tick_spawns() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        let events = tick(&mut state, None, &tuning, &mut walls_left());
        assert_eq!(
            events,
            vec![GameEvent::ObjectSpawned {
                id: 1,
                kind: ObjectKind::Wall,
                lane: 0
            }]
        );
        assert_eq!(state.round.frame_counter, 1);
        assert_eq!(state.objects.len(), 1);
        assert!((state.objects[0].depth - tuning.speed_start).abs() < 1e-6);
    }

    #[test]
    fn test_spawns_every_hundred_ticks_at_start_speed() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        let mut rng = walls_left();
        let mut spawns = Vec::new();
        for t in 0..250 {
            for e in tick(&mut state, None, &tuning, &mut rng) {
                if matches!(e, GameEvent::ObjectSpawned { .. }) {
                    spawns.push(t);
                }
            }
        }
        assert_eq!(spawns, vec![0, 100, 200]);
    }

    #[test]
    fn test_commands_move_and_jump() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        let mut rng = walls_left();
        tick(&mut state, Some(Command::Left), &tuning, &mut rng);
        assert_eq!(state.player.lane, 0);
        assert!(state.player.x < 1.0 && state.player.x > 0.0);

        tick(&mut state, Some(Command::Jump), &tuning, &mut rng);
        assert!(state.player.is_jumping);
        assert!(state.player.y > 0.0);
        let vy = state.player.vertical_velocity;

        // A second jump mid-air does not reset the arc
        tick(&mut state, Some(Command::Jump), &tuning, &mut rng);
        assert!(state.player.vertical_velocity < vy);
    }

    #[test]
    fn test_collision_in_lane_costs_life() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.push_object(ObjectKind::Bad, 1, 0);
        state.objects[0].depth = 0.85;
        let events = tick(&mut state, None, &tuning, &mut walls_left());
        assert_eq!(state.round.lives, 2);
        assert!(events.contains(&GameEvent::LifeLost { lives: 2 }));
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_jumping_player_clears_wall() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.push_object(ObjectKind::Wall, 1, 0);
        state.objects[0].depth = 0.88;
        state.player.y = 0.5;
        state.player.is_jumping = true;
        state.player.vertical_velocity = 0.01;
        let events = tick(&mut state, None, &tuning, &mut walls_left());
        assert_eq!(state.round.lives, 3);
        assert_eq!(state.round.score, 0);
        assert!(events.is_empty());
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_good_pickup_raises_speed() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.push_object(ObjectKind::Good, 1, 0);
        state.objects[0].depth = 0.88;
        tick(&mut state, None, &tuning, &mut walls_left());
        assert_eq!(state.round.score, 10);
        tick(&mut state, None, &tuning, &mut walls_left());
        assert!(state.round.speed > tuning.speed_start);
    }

    #[test]
    fn test_magnet_pulls_good_items_past_midpoint() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.player.grant_magnet(600);
        state.push_object(ObjectKind::Good, 0, 0);
        state.push_object(ObjectKind::Good, 2, 0);
        state.push_object(ObjectKind::Bad, 2, 0);
        state.objects[0].depth = 0.6;
        state.objects[1].depth = 0.1;
        state.objects[2].depth = 0.6;
        tick(&mut state, None, &tuning, &mut walls_left());
        assert!(state.objects[0].x_pos > 0.0);
        assert_eq!(state.objects[1].x_pos, 2.0);
        assert_eq!(state.objects[2].x_pos, 2.0);
    }

    #[test]
    fn test_magnet_expiry_event() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.player.grant_magnet(2);
        assert!(tick(&mut state, None, &tuning, &mut walls_left()).is_empty());
        let events = tick(&mut state, None, &tuning, &mut walls_left());
        assert_eq!(events, vec![GameEvent::PowerUpExpired(PowerUp::Magnet)]);
        assert!(!state.player.has_magnet);
    }

    #[test]
    fn test_objects_pruned_past_player() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.push_object(ObjectKind::Bad, 0, 0);
        state.objects[0].depth = 1.199;
        tick(&mut state, None, &tuning, &mut walls_left());
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_idle_tick_only_advances_depth() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.push_object(ObjectKind::Wall, 0, 0);
        state.push_object(ObjectKind::Good, 2, 0);
        state.objects[0].depth = 0.2;
        state.objects[1].depth = 0.4;
        let before = state.clone();
        let events = tick(&mut state, None, &tuning, &mut walls_left());
        assert!(events.is_empty());
        assert_eq!(state.round.score, before.round.score);
        assert_eq!(state.round.lives, before.round.lives);
        assert_eq!(state.round.frame_counter, 2);
        assert_eq!(state.objects.len(), 2);
        for (a, b) in state.objects.iter().zip(&before.objects) {
            assert_eq!((a.id, a.kind, a.lane, a.x_pos), (b.id, b.kind, b.lane, b.x_pos));
            assert!((a.depth - b.depth - tuning.speed_start).abs() < 1e-6);
        }
        assert_eq!(state.player.has_shield, before.player.has_shield);
    }

    #[test]
    fn test_game_over_stops_ticking() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.frame_counter = 1;
        state.round.lives = 1;
        state.push_object(ObjectKind::Bad, 1, 0);
        state.objects[0].depth = 0.88;
        let events = tick(&mut state, None, &tuning, &mut walls_left());
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));
        assert_eq!(state.round.phase, GamePhase::GameOver);

        let frame = state.round.frame_counter;
        assert!(tick(&mut state, Some(Command::Left), &tuning, &mut walls_left()).is_empty());
        assert_eq!(state.round.frame_counter, frame);
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let tuning = Tuning::default();
        let mut state = started(&tuning);
        state.round.score = 340;
        state.round.lives = 0;
        state.round.phase = GamePhase::GameOver;
        state.player.has_shield = true;
        state.player.grant_magnet(10);
        state.push_object(ObjectKind::Good, 2, 0);

        start(&mut state, &tuning);
        assert_eq!(state.round.phase, GamePhase::Running);
        assert_eq!(state.round.score, 0);
        assert_eq!(state.round.lives, 3);
        assert_eq!(state.round.frame_counter, 0);
        assert!(state.objects.is_empty());
        assert!(!state.player.has_shield && !state.player.has_magnet);
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed and inputs should produce identical results
        let tuning = Tuning::default();
        let mut state1 = started(&tuning);
        let mut state2 = started(&tuning);
        let mut rng1 = SeededRng::new(99999);
        let mut rng2 = SeededRng::new(99999);

        let inputs = [None, Some(Command::Left), None, Some(Command::Jump), Some(Command::Right)];
        for t in 0..2000 {
            let input = inputs[t % inputs.len()];
            let e1 = tick(&mut state1, input, &tuning, &mut rng1);
            let e2 = tick(&mut state2, input, &tuning, &mut rng2);
            assert_eq!(e1, e2);
        }
        assert_eq!(state1, state2);
    }

    fn command_strategy() -> impl Strategy<Value = Option<Command>> {
        prop_oneof![
            Just(None),
            Just(Some(Command::Left)),
            Just(Some(Command::Right)),
            Just(Some(Command::Jump)),
        ]
    }

    proptest! {
        #[test]
        fn prop_round_invariants(
            seed in any::<u64>(),
            commands in proptest::collection::vec(command_strategy(), 1..1500),
        ) {
            let tuning = Tuning::default();
            let mut state = started(&tuning);
            let mut rng = SeededRng::new(seed);
            let mut game_overs = 0;

            for command in commands {
                let (lives, score, speed) = (state.round.lives, state.round.score, state.round.speed);
                let running = state.round.is_running();
                let events = tick(&mut state, command, &tuning, &mut rng);
                game_overs += events.iter().filter(|e| matches!(e, GameEvent::GameOver { .. })).count();

                prop_assert!(state.round.lives <= lives);
                prop_assert!(state.round.score >= score);
                prop_assert!(state.round.speed <= tuning.speed_max);
                if running {
                    prop_assert!(state.round.speed >= speed);
                }
                prop_assert!(state.player.y >= 0.0);
                prop_assert!(state.player.lane < crate::consts::LANE_COUNT);
                prop_assert!(state.objects.iter().all(|o| o.active && o.depth < tuning.prune_depth));
            }

            prop_assert!(game_overs <= 1);
            prop_assert_eq!(game_overs == 1, state.round.phase == GamePhase::GameOver);
        }
    }
}
