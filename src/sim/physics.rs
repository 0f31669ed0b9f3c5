//! Vertical player kinematics

use super::state::Player;
use crate::tuning::Tuning;

/// Semi-implicit Euler step with a hard floor at `ground_y`.
///
/// Non-positive (or NaN) `dt` leaves the player untouched.
pub fn integrate(player: &mut Player, dt: f32, tuning: &Tuning) {
    if !(dt > 0.0) {
        return;
    }

    player.vy += tuning.gravity * dt;
    player.y += player.vy * dt;

    let ground_y = tuning.ground_y();
    if player.y > ground_y {
        player.y = ground_y;
        player.vy = 0.0;
    }
}

/// Launch upward if grounded. Returns whether the jump happened.
pub fn jump(player: &mut Player, tuning: &Tuning) -> bool {
    if !player.is_grounded(tuning) {
        return false;
    }
    player.vy = tuning.jump_velocity;
    true
}
