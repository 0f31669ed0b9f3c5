//! Difficulty curve: scroll speed as a step function of elapsed time

use crate::tuning::Tuning;

/// `base_speed + floor(elapsed / growth_interval) * speed_growth`
pub fn speed_at(elapsed: f32, tuning: &Tuning) -> f32 {
    let steps = (elapsed.max(0.0) / tuning.growth_interval).floor();
    tuning.base_speed + steps * tuning.speed_growth
}
