//! Game balance values
//!
//! Every number the simulation uses lives here so a run can be retuned
//! from JSON without touching code. Missing fields fall back to `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Problems found while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} range is inverted ({min} > {max})")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

/// Tunable gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    pub gravity: f32,
    pub jump_velocity: f32,
    pub jump_tolerance: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_growth: f32,
    pub growth_interval: f32,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub ground_thickness: f32,
    pub player_size: f32,
    pub player_x: f32,

    // === Spawning ===
    pub spawn_min: f32,
    pub spawn_max: f32,
    pub obstacle_min_w: f32,
    pub obstacle_max_w: f32,
    pub obstacle_min_h: f32,
    pub obstacle_max_h: f32,
    pub spawn_margin: f32,
    pub despawn_margin: f32,

    // === Clock ===
    /// Largest dt a single frame may feed into the simulation
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            jump_tolerance: JUMP_TOLERANCE,

            base_speed: BASE_SPEED,
            speed_growth: SPEED_GROWTH,
            growth_interval: GROWTH_INTERVAL,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_thickness: GROUND_THICKNESS,
            player_size: PLAYER_SIZE,
            player_x: PLAYER_X,

            spawn_min: SPAWN_MIN,
            spawn_max: SPAWN_MAX,
            obstacle_min_w: OBSTACLE_MIN_W,
            obstacle_max_w: OBSTACLE_MAX_W,
            obstacle_min_h: OBSTACLE_MIN_H,
            obstacle_max_h: OBSTACLE_MAX_H,
            spawn_margin: SPAWN_MARGIN,
            despawn_margin: DESPAWN_MARGIN,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check ranges and sizes the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let ranges = [
            ("spawn interval", self.spawn_min, self.spawn_max),
            ("obstacle width", self.obstacle_min_w, self.obstacle_max_w),
            ("obstacle height", self.obstacle_min_h, self.obstacle_max_h),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }

        let positives = [
            ("growth_interval", self.growth_interval),
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("player_size", self.player_size),
            ("spawn_min", self.spawn_min),
            ("obstacle_min_w", self.obstacle_min_w),
            ("obstacle_min_h", self.obstacle_min_h),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positives {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        Ok(())
    }

    /// Resting y of the player's top edge
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_thickness - self.player_size
    }

    /// y of the ground surface (obstacles stand on it)
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.world_height - self.ground_thickness
    }

    /// Load overrides from the file named by `TAP_JUMP_TUNING`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("TAP_JUMP_TUNING") else {
            return Self::default();
        };

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Self::from_json(&json).map_err(|e| e.to_string()));

        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
