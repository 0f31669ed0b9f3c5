//! Tap Jump - a one-button endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session state)
//! - `game`: Command/query facade driven by the presentation layer
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best-score bookkeeping on top of `persistence`
//! - `platform`: Browser storage (wasm32 only)

pub mod best_score;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use game::{Game, Snapshot};
pub use persistence::{MemoryStore, ScoreStore};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 2500.0;
    /// Initial vertical velocity of a jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -900.0;
    /// Allowed distance above the ground that still counts as grounded
    pub const JUMP_TOLERANCE: f32 = 1.0;

    /// Scroll speed at the start of a run (units/s)
    pub const BASE_SPEED: f32 = 260.0;
    /// Speed added every growth interval
    pub const SPEED_GROWTH: f32 = 12.0;
    /// Length of one difficulty step (seconds)
    pub const GROWTH_INTERVAL: f32 = 10.0;

    /// Virtual world dimensions (9:16 portrait)
    pub const WORLD_WIDTH: f32 = 360.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    pub const GROUND_THICKNESS: f32 = 24.0;

    /// Player square
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_X: f32 = 52.0;

    /// Seconds between spawns, drawn uniformly
    pub const SPAWN_MIN: f32 = 0.9;
    pub const SPAWN_MAX: f32 = 1.8;

    /// Obstacle size bounds
    pub const OBSTACLE_MIN_W: f32 = 24.0;
    pub const OBSTACLE_MAX_W: f32 = 60.0;
    pub const OBSTACLE_MIN_H: f32 = 40.0;
    pub const OBSTACLE_MAX_H: f32 = 90.0;

    /// Obstacles enter this far past the right edge
    pub const SPAWN_MARGIN: f32 = 8.0;
    /// Obstacles are dropped once their right edge is this far past the left edge
    pub const DESPAWN_MARGIN: f32 = 20.0;

    /// Largest frame delta fed to the simulation (~30 FPS)
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Fixed-step mode timestep (120 Hz)
    pub const FIXED_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame in fixed-step mode
    pub const MAX_SUBSTEPS: u32 = 8;
}
