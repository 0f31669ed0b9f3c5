//! Game driver
//!
//! Owns the session state, the frame clock and the best-score store, and
//! exposes the small command/query surface a presentation layer needs.
//! Commands arriving between frames are queued in [`TickInput`] and applied
//! at the start of the next tick that advances the simulation.

use serde::Serialize;

use crate::best_score::BestScore;
use crate::persistence::ScoreStore;
use crate::sim::{
    ClockMode, GameEvent, GamePhase, GameState, ObstacleView, Rect, SimClock, TickInput,
    TickToken, tick,
};
use crate::tuning::Tuning;

/// Everything a renderer/HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub paused: bool,
    pub score: u64,
    pub best: u64,
    pub speed: f32,
    pub elapsed: f32,
    pub player: Rect,
    pub obstacles: Vec<ObstacleView>,
}

pub struct Game<S: ScoreStore> {
    state: GameState,
    clock: SimClock,
    input: TickInput,
    store: S,
    token: Option<TickToken>,
}

impl<S: ScoreStore> Game<S> {
    /// Idle session using the variable-step clock
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        Self::with_clock(tuning, seed, store, ClockMode::Variable)
    }

    pub fn with_clock(tuning: Tuning, seed: u64, store: S, mode: ClockMode) -> Self {
        let best = BestScore::load(&store).value();
        let clock = SimClock::new(mode, tuning.max_frame_dt);
        Self {
            state: GameState::new(tuning, seed, best),
            clock,
            input: TickInput::default(),
            store,
            token: None,
        }
    }

    // === Commands ===

    /// Begin a fresh run from Idle or GameOver (always a full reset)
    pub fn start_game(&mut self) {
        let stored = BestScore::load(&self.store).value();
        self.state.best = self.state.best.max(stored);
        self.state.start();
        self.input = TickInput::default();
        self.token = Some(self.clock.start());
        log::info!("Run started (best {})", self.state.best);
    }

    /// Freeze a running game; the run resumes where it left off
    pub fn pause_game(&mut self) {
        if self.state.pause() {
            self.stop_clock();
            log::info!("Paused at score {}", self.state.score);
        }
    }

    /// The toggle-pause signal: pause, resume, or start a fresh session
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause_game(),
            GamePhase::Idle if self.state.paused => {
                if self.state.resume() {
                    self.token = Some(self.clock.start());
                    log::info!("Resumed at score {}", self.state.score);
                }
            }
            GamePhase::Idle => self.start_game(),
            GamePhase::GameOver => {}
        }
    }

    /// The activate signal: jump while running, play again after game over
    pub fn jump(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.input.jump = true,
            GamePhase::GameOver => self.start_game(),
            GamePhase::Idle => {}
        }
    }

    /// Advance by `dt` seconds (no-op unless Running)
    pub fn tick(&mut self, dt: f32) {
        if !tick(&mut self.state, &self.input, dt) {
            return;
        }
        self.input = TickInput::default();

        if self.state.phase == GamePhase::GameOver {
            self.stop_clock();
            BestScore::new(self.state.best).save(&mut self.store);
        }
    }

    /// Feed one display-refresh timestamp (ms) from the tick source.
    ///
    /// Returns whether the caller should schedule another frame with the
    /// same token; false once the token is stale or the run stopped.
    pub fn frame(&mut self, token: TickToken, now_ms: f64) -> bool {
        for dt in self.clock.advance(token, now_ms) {
            self.tick(dt);
            if self.state.phase != GamePhase::Running {
                break;
            }
        }
        self.clock.accepts(token)
    }

    fn stop_clock(&mut self) {
        self.clock.stop();
        self.token = None;
    }

    // === Queries ===

    /// Token for the current run of the clock, if it is ticking
    pub fn tick_token(&self) -> Option<TickToken> {
        self.token
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best(&self) -> u64 {
        self.state.best
    }

    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    pub fn elapsed(&self) -> f32 {
        self.state.elapsed
    }

    pub fn player_rect(&self) -> Rect {
        self.state.player_rect()
    }

    pub fn obstacles(&self) -> impl Iterator<Item = ObstacleView> + '_ {
        self.state.obstacle_views()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            paused: self.state.paused,
            score: self.state.score,
            best: self.state.best,
            speed: self.state.speed,
            elapsed: self.state.elapsed,
            player: self.player_rect(),
            obstacles: self.obstacles().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::Obstacle;

    fn new_game() -> Game<MemoryStore> {
        Game::new(Tuning::default(), 42, MemoryStore::new())
    }

    /// Obstacle parked on the player so the next tick collides
    fn obstacle_on_player(game: &mut Game<MemoryStore>) {
        game.state.spawner.timer = f32::MAX;
        game.state.obstacles.push(Obstacle {
            id: 999,
            x: 60.0,
            width: 40.0,
            height: 60.0,
        });
    }

    #[test]
    fn test_starts_idle() {
        let game = new_game();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), 260.0);
        assert!(game.tick_token().is_none());
    }

    #[test]
    fn test_loads_best_from_store() {
        let store = MemoryStore::with_entry(BestScore::STORAGE_KEY, "17");
        let game = Game::new(Tuning::default(), 1, store);
        assert_eq!(game.best(), 17);

        let store = MemoryStore::with_entry(BestScore::STORAGE_KEY, "-3");
        let game = Game::new(Tuning::default(), 1, store);
        assert_eq!(game.best(), 0);
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut game = new_game();
        game.tick(0.1);
        assert_eq!(game.elapsed(), 0.0);
    }

    #[test]
    fn test_jump_is_queued_until_next_tick() {
        let mut game = new_game();
        game.start_game();
        game.state.spawner.timer = f32::MAX;

        game.jump();
        assert_eq!(game.state().player.vy, 0.0);

        // dt = 0 must not consume the queued jump
        game.tick(0.0);
        game.tick(0.1);
        let player = game.player_rect();
        assert!((player.min.y - 511.0).abs() < 1e-3);
        assert!((game.state().player.vy - -650.0).abs() < 1e-3);
    }

    #[test]
    fn test_jump_while_idle_is_noop() {
        let mut game = new_game();
        game.jump();
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_collision_persists_best() {
        let mut game = new_game();
        game.start_game();
        game.state.score = 6;
        obstacle_on_player(&mut game);

        game.tick(0.001);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.best(), 6);
        assert_eq!(
            game.store().get(BestScore::STORAGE_KEY).as_deref(),
            Some("6")
        );
        assert!(game.tick_token().is_none());

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Collided { obstacle_id: 999 }));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_lower_score_keeps_best() {
        let store = MemoryStore::with_entry(BestScore::STORAGE_KEY, "50");
        let mut game = Game::new(Tuning::default(), 3, store);
        game.start_game();
        game.state.score = 2;
        obstacle_on_player(&mut game);
        game.tick(0.001);
        assert_eq!(game.best(), 50);
        assert_eq!(
            game.store().get(BestScore::STORAGE_KEY).as_deref(),
            Some("50")
        );
    }

    #[test]
    fn test_jump_after_game_over_restarts() {
        let mut game = new_game();
        game.start_game();
        game.state.score = 3;
        obstacle_on_player(&mut game);
        game.tick(0.001);
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.jump();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);
        assert!(game.obstacles().next().is_none());
        assert_eq!(game.best(), 3);
    }

    #[test]
    fn test_pause_resume_keeps_run() {
        let mut game = new_game();
        game.start_game();
        game.state.spawner.timer = 0.5;
        for _ in 0..60 {
            game.tick(1.0 / 60.0);
        }
        let before = game.snapshot();
        assert_eq!(before.obstacles.len(), 1);

        game.pause_game();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.is_paused());
        game.tick(0.5);
        game.jump();
        assert_eq!(game.snapshot().obstacles, before.obstacles);

        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::Running);
        let after = game.snapshot();
        assert_eq!(after.score, before.score);
        assert_eq!(after.obstacles, before.obstacles);
        assert_eq!(after.elapsed, before.elapsed);
    }

    #[test]
    fn test_start_from_pause_resets() {
        let mut game = new_game();
        game.start_game();
        for _ in 0..60 {
            game.tick(1.0 / 60.0);
        }
        game.pause_game();
        game.start_game();
        assert_eq!(game.elapsed(), 0.0);
        assert!(game.obstacles().next().is_none());
        assert!(!game.is_paused());
    }

    #[test]
    fn test_toggle_pause_from_fresh_idle_starts() {
        let mut game = new_game();
        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_toggle_pause_after_game_over_is_noop() {
        let mut game = new_game();
        game.start_game();
        obstacle_on_player(&mut game);
        game.tick(0.001);
        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_frame_drives_ticks_and_stale_tokens_are_dropped() {
        let mut game = new_game();
        game.start_game();
        let token = game.tick_token().expect("clock running");

        assert!(game.frame(token, 1000.0));
        assert_eq!(game.elapsed(), 0.0);
        assert!(game.frame(token, 1016.0));
        assert!((game.elapsed() - 0.016).abs() < 1e-5);

        game.pause_game();
        assert!(!game.frame(token, 1032.0));
        assert!((game.elapsed() - 0.016).abs() < 1e-5);

        game.toggle_pause();
        let resumed = game.tick_token().expect("clock running");
        assert_ne!(resumed, token);
        assert!(!game.frame(token, 5000.0));
        // First frame after resume carries no time, then a clamped step
        assert!(game.frame(resumed, 9000.0));
        assert!(game.frame(resumed, 9100.0));
        assert!((game.elapsed() - (0.016 + 0.033)).abs() < 1e-5);
    }

    #[test]
    fn test_fixed_step_clock() {
        let mut game =
            Game::with_clock(Tuning::default(), 42, MemoryStore::new(), ClockMode::fixed());
        game.start_game();
        let token = game.tick_token().expect("clock running");

        game.frame(token, 0.0);
        // 30 ms at 120 Hz: three steps, remainder carried
        game.frame(token, 30.0);
        assert!((game.elapsed() - 3.0 / 120.0).abs() < 1e-5);
    }

    #[test]
    fn test_frame_stops_on_game_over() {
        let mut game = new_game();
        game.start_game();
        let token = game.tick_token().expect("clock running");
        game.frame(token, 0.0);
        obstacle_on_player(&mut game);
        assert!(!game.frame(token, 16.0));
        assert_eq!(game.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = new_game();
        game.start_game();
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Running\""));
        assert!(json.contains("\"obstacles\":[]"));
    }
}
