//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (obstacles by spawn id)
//! - No rendering, storage or platform dependencies

pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{ClockMode, SimClock, TickToken};
pub use collision::{aabb_overlap, first_collision};
pub use difficulty::speed_at;
pub use rng::SimRng;
pub use spawn::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleView, Player, Rect};
pub use tick::{TickInput, tick};
