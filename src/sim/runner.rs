//! Runner simulation handle
//!
//! Bundles the state, tuning, random source and best-score store of one game
//! so a host only has to forward commands and call [`RunnerSimulation::tick`]
//! once per frame.

use super::events::GameEvent;
use super::rng::{RandomSource, SeededRng};
use super::snapshot::Snapshot;
use super::state::{GamePhase, GameState};
use super::tick;
use crate::best_score::BestScore;
use crate::input::Command;
use crate::tuning::Tuning;

/// One independent runner game
pub struct RunnerSimulation<R: RandomSource = SeededRng> {
    state: GameState,
    tuning: Tuning,
    rng: R,
    best: BestScore,
    /// Command queued by the host for the next tick
    pending: Option<Command>,
}

impl RunnerSimulation<SeededRng> {
    /// Default tuning, seeded RNG, in-memory best score
    pub fn new(seed: u64) -> Self {
        Self::with_parts(Tuning::default(), SeededRng::new(seed), BestScore::in_memory())
    }
}

impl<R: RandomSource> RunnerSimulation<R> {
    pub fn with_parts(tuning: Tuning, rng: R, best: BestScore) -> Self {
        let tuning = tuning.sanitized();
        let mut state = GameState::new(&tuning);
        state.best_score = best.load();
        Self {
            state,
            tuning,
            rng,
            best,
            pending: None,
        }
    }

    /// Start (or restart) a round
    pub fn start(&mut self) {
        self.pending = None;
        tick::start(&mut self.state, &self.tuning);
    }

    /// Queue a command for the next tick. A newer command replaces an older
    /// one; commands are dropped while no round is running.
    pub fn queue_command(&mut self, command: Command) {
        if self.state.round.is_running() {
            self.pending = Some(command);
        }
    }

    /// Apply a command immediately, outside of a tick
    pub fn apply_command(&mut self, command: Command) {
        tick::apply_command(&mut self.state, command, &self.tuning);
    }

    /// Advance one step. An explicit command takes precedence over a queued
    /// one, and the queued command is then dropped rather than carried over
    /// to the next tick.
    pub fn tick(&mut self, command: Option<Command>) -> Vec<GameEvent> {
        let queued = self.pending.take();
        let command = command.or(queued);
        let mut events = tick::tick(&mut self.state, command, &self.tuning, &mut self.rng);

        if let Some(final_score) = events.iter().find_map(|e| match e {
            GameEvent::GameOver { final_score } => Some(*final_score),
            _ => None,
        }) {
            let (best, beaten) = self.best.record(final_score);
            self.state.best_score = best;
            if beaten {
                events.push(GameEvent::NewBestScore { score: best });
            }
        }

        events
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that need to stage a situation
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.state.round.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.round.is_running()
    }

    pub fn best_score(&self) -> u64 {
        self.state.best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::MemoryStore;
    use crate::consts::BEST_SCORE_KEY;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::ObjectKind;

    fn scripted(best: BestScore) -> RunnerSimulation<ScriptedRandom> {
        // Walls in lane 0 only
        RunnerSimulation::with_parts(Tuning::default(), ScriptedRandom::new(vec![0.0, 0.7]), best)
    }

    fn stage_hazard(sim: &mut RunnerSimulation<ScriptedRandom>, kind: ObjectKind) {
        let state = sim.state_mut();
        state.push_object(kind, 1, 0);
        let last = state.objects.len() - 1;
        state.objects[last].depth = 0.88;
    }

    #[test]
    fn test_new_sim_not_started() {
        let mut sim = RunnerSimulation::new(1);
        assert_eq!(sim.phase(), GamePhase::NotStarted);
        assert!(sim.tick(None).is_empty());
        sim.start();
        assert!(sim.is_running());
    }

    #[test]
    fn test_loads_best_score_on_creation() {
        let sim = scripted(BestScore::new(MemoryStore::with_value(BEST_SCORE_KEY, "80")));
        assert_eq!(sim.best_score(), 80);
        assert_eq!(sim.snapshot().best_score, 80);
    }

    #[test]
    fn test_game_over_records_new_best() {
        let mut sim = scripted(BestScore::new(MemoryStore::with_value(BEST_SCORE_KEY, "10")));
        sim.start();
        sim.tick(None);
        sim.state_mut().round.score = 40;
        sim.state_mut().round.lives = 1;
        stage_hazard(&mut sim, ObjectKind::Bad);
        let events = sim.tick(None);
        assert!(events.contains(&GameEvent::GameOver { final_score: 40 }));
        assert!(events.contains(&GameEvent::NewBestScore { score: 40 }));
        assert_eq!(sim.best_score(), 40);
    }

    #[test]
    fn test_game_over_below_best_keeps_best() {
        let mut sim = scripted(BestScore::new(MemoryStore::with_value(BEST_SCORE_KEY, "500")));
        sim.start();
        sim.tick(None);
        sim.state_mut().round.lives = 1;
        stage_hazard(&mut sim, ObjectKind::Wall);
        let events = sim.tick(None);
        assert!(events.contains(&GameEvent::GameOver { final_score: 0 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBestScore { .. })));
        assert_eq!(sim.best_score(), 500);
    }

    #[test]
    fn test_queued_command_applies_once() {
        let mut sim = scripted(BestScore::in_memory());
        sim.queue_command(Command::Left);
        sim.start();
        sim.tick(None);
        assert_eq!(sim.state().player.lane, 1);

        sim.queue_command(Command::Left);
        sim.queue_command(Command::Right);
        sim.tick(None);
        assert_eq!(sim.state().player.lane, 2);
        sim.tick(None);
        assert_eq!(sim.state().player.lane, 2);
    }

    #[test]
    fn test_explicit_command_drops_queued_one() {
        let mut sim = scripted(BestScore::in_memory());
        sim.start();
        sim.queue_command(Command::Left);
        sim.tick(Some(Command::Right));
        assert_eq!(sim.state().player.lane, 2);
        sim.tick(None);
        assert_eq!(sim.state().player.lane, 2);
    }

    #[test]
    fn test_fast_tuning_still_collides() {
        let tuning = Tuning {
            speed_start: 0.12,
            speed_max: 0.12,
            ..Default::default()
        };
        let mut sim = RunnerSimulation::with_parts(
            tuning,
            ScriptedRandom::new(vec![0.0, 0.7]),
            BestScore::in_memory(),
        );
        sim.start();
        let state = sim.state_mut();
        state.push_object(ObjectKind::Bad, 1, 0);
        state.objects[0].depth = 0.84;
        let events = sim.tick(None);
        assert_eq!(sim.state().round.lives, 2);
        assert!(events.contains(&GameEvent::LifeLost { lives: 2 }));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = RunnerSimulation::new(5);
        let mut b = RunnerSimulation::new(5);
        a.start();
        b.start();
        for _ in 0..50 {
            a.tick(Some(Command::Left));
            b.tick(None);
        }
        assert_eq!(a.state().player.lane, 0);
        assert_eq!(b.state().player.lane, 1);
        assert_eq!(a.state().round.frame_counter, b.state().round.frame_counter);
    }

    #[test]
    fn test_restart_resets_round_but_keeps_best() {
        let mut sim = scripted(BestScore::in_memory());
        sim.start();
        sim.tick(None);
        sim.state_mut().round.score = 90;
        sim.state_mut().round.lives = 1;
        sim.state_mut().player.grant_magnet(100);
        stage_hazard(&mut sim, ObjectKind::Bad);
        sim.tick(None);
        assert_eq!(sim.phase(), GamePhase::GameOver);

        sim.start();
        let snap = sim.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.lives, 3);
        assert!(snap.objects.is_empty());
        assert!(!snap.player.has_magnet && !snap.player.has_shield);
        assert_eq!(snap.best_score, 90);
    }

    #[test]
    fn test_snapshot_orders_far_to_near() {
        let mut sim = scripted(BestScore::in_memory());
        sim.start();
        let state = sim.state_mut();
        state.push_object(ObjectKind::Good, 0, 2);
        state.push_object(ObjectKind::Wall, 2, 0);
        state.objects[0].depth = 0.7;
        state.objects[1].depth = 0.3;
        let snap = sim.snapshot();
        assert_eq!(snap.objects[0].kind, ObjectKind::Wall);
        assert_eq!(snap.objects[1].variant, 2);
        assert!(snap.to_json().contains("\"score\":0"));
    }
}
