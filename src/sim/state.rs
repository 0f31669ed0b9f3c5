//! Game state and core simulation types
//!
//! The session context: everything a run mutates lives in [`GameState`],
//! which is owned by exactly one driver and mutated only by `tick` and the
//! phase transition methods below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::spawn::Spawner;
use crate::best_score::BestScore;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet, or paused mid-run
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by a collision
    GameOver,
}

/// Axis-aligned rectangle in world units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// The player's square. Horizontal position and size come from [`Tuning`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge
    pub y: f32,
    /// Vertical velocity (negative = up)
    pub vy: f32,
}

impl Player {
    /// Standing still on the ground
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            y: tuning.ground_y(),
            vy: 0.0,
        }
    }

    /// Within jump tolerance of the ground
    pub fn is_grounded(&self, tuning: &Tuning) -> bool {
        self.y >= tuning.ground_y() - tuning.jump_tolerance
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(tuning.player_x, self.y, tuning.player_size, tuning.player_size)
    }
}

/// A block standing on the ground, scrolling left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x,
            tuning.ground_top() - self.height,
            self.width,
            self.height,
        )
    }

    pub fn view(&self, tuning: &Tuning) -> ObstacleView {
        ObstacleView {
            id: self.id,
            x: self.x,
            y: tuning.ground_top() - self.height,
            w: self.width,
            h: self.height,
        }
    }
}

/// Read-only obstacle snapshot handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Things that happened during a transition or tick, for HUD/audio/logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    ObstacleSpawned { id: u32 },
    ObstaclesPassed { count: u32, score: u64 },
    Collided { obstacle_id: u32 },
    GameOver { score: u64, best: u64, new_best: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Set while Idle because of a pause (resume continues the run)
    pub paused: bool,
    pub player: Player,
    /// Ordered by spawn (ascending id)
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub best: u64,
    /// Seconds of Running time since the last reset
    pub elapsed: f32,
    /// Current scroll speed (units/s)
    pub speed: f32,
    pub spawner: Spawner,
    /// Drained by the driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh Idle session
    pub fn new(tuning: Tuning, seed: u64, best: u64) -> Self {
        let spawner = Spawner::new(seed, &tuning);
        Self {
            phase: GamePhase::Idle,
            paused: false,
            player: Player::grounded(&tuning),
            obstacles: Vec::new(),
            score: 0,
            best,
            elapsed: 0.0,
            speed: tuning.base_speed,
            spawner,
            events: Vec::new(),
            tuning,
        }
    }

    /// Wipe every transient field; `best` survives
    pub fn reset(&mut self) {
        self.player = Player::grounded(&self.tuning);
        self.obstacles.clear();
        self.score = 0;
        self.elapsed = 0.0;
        self.speed = self.tuning.base_speed;
        self.spawner.reset(&self.tuning);
        self.paused = false;
    }

    /// Idle/GameOver -> Running with a full reset
    pub fn start(&mut self) {
        self.reset();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
    }

    /// Running -> Idle, keeping the run intact. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Idle;
        self.paused = true;
        self.events.push(GameEvent::Paused);
        true
    }

    /// Paused Idle -> Running without a reset. Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Idle || !self.paused {
            return false;
        }
        self.phase = GamePhase::Running;
        self.paused = false;
        self.events.push(GameEvent::Resumed);
        true
    }

    /// Freeze the run and commit `best = max(best, score)`.
    ///
    /// Calling it again with the same score leaves `best` unchanged.
    pub fn end_game(&mut self) {
        let mut best = BestScore::new(self.best);
        let new_best = best.commit(self.score);
        self.best = best.value();
        self.phase = GamePhase::GameOver;
        self.paused = false;
        self.events.push(GameEvent::GameOver {
            score: self.score,
            best: self.best,
            new_best,
        });
    }

    pub fn player_rect(&self) -> Rect {
        self.player.rect(&self.tuning)
    }

    /// Obstacle snapshots, recomputed on every call
    pub fn obstacle_views(&self) -> impl Iterator<Item = ObstacleView> + '_ {
        self.obstacles.iter().map(|o| o.view(&self.tuning))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_on_ground() {
        let state = GameState::new(Tuning::default(), 1, 0);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.player.y, 576.0);
        assert_eq!(state.speed, 260.0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_obstacle_sits_on_ground() {
        let tuning = Tuning::default();
        let obstacle = Obstacle {
            id: 3,
            x: 40.0,
            width: 60.0,
            height: 70.0,
        };
        let rect = obstacle.rect(&tuning);
        assert_eq!(rect, Rect::new(40.0, 546.0, 60.0, 70.0));
        assert_eq!(rect.max().y, tuning.ground_top());

        let view = obstacle.view(&tuning);
        assert_eq!((view.id, view.x, view.y, view.w, view.h), (3, 40.0, 546.0, 60.0, 70.0));
    }

    #[test]
    fn test_pause_keeps_run_and_resume_continues() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        state.start();
        state.score = 4;
        state.obstacles.push(Obstacle {
            id: 0,
            x: 100.0,
            width: 30.0,
            height: 50.0,
        });

        assert!(state.pause());
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.paused);
        assert!(!state.pause());

        assert!(state.resume());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 4);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_resume_requires_pause() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        assert!(!state.resume());
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_start_after_game_over_wipes_run() {
        let mut state = GameState::new(Tuning::default(), 1, 0);
        state.start();
        state.score = 9;
        state.elapsed = 33.0;
        state.player.y = 300.0;
        state.end_game();

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.player, Player::grounded(&state.tuning));
        assert_eq!(state.best, 9);
    }

    #[test]
    fn test_end_game_commits_best_idempotently() {
        let mut state = GameState::new(Tuning::default(), 1, 5);
        state.start();
        state.score = 3;
        state.end_game();
        assert_eq!(state.best, 5);

        state.score = 8;
        state.end_game();
        assert_eq!(state.best, 8);
        state.end_game();
        assert_eq!(state.best, 8);
        assert_eq!(state.phase, GamePhase::GameOver);

        let last = state.events.last().copied();
        assert_eq!(
            last,
            Some(GameEvent::GameOver {
                score: 8,
                best: 8,
                new_best: false
            })
        );
    }
}
