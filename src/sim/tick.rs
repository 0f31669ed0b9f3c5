//! Simulation tick
//!
//! Core game loop step: difficulty, player, spawning, scrolling, scoring,
//! then collisions. Runs to completion; nothing else mutates the state
//! while it executes.

use super::collision::first_collision;
use super::difficulty::speed_at;
use super::physics;
use super::state::{GameEvent, GamePhase, GameState};

/// Commands queued between ticks, consumed by the next tick that advances
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (tap/click/space)
    pub jump: bool,
}

/// Advance the session by `dt` seconds.
///
/// Returns false without touching anything when the session isn't
/// Running or `dt` is not positive; the caller should keep its input
/// queued in that case.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    if state.phase != GamePhase::Running || !(dt > 0.0) {
        return false;
    }

    state.elapsed += dt;
    state.speed = speed_at(state.elapsed, &state.tuning);

    if input.jump {
        physics::jump(&mut state.player, &state.tuning);
    }
    physics::integrate(&mut state.player, dt, &state.tuning);

    if let Some(obstacle) = state.spawner.update(dt, &state.tuning) {
        log::debug!("Spawned obstacle {} ({:.0}x{:.0})", obstacle.id, obstacle.width, obstacle.height);
        state.events.push(GameEvent::ObstacleSpawned { id: obstacle.id });
        state.obstacles.push(obstacle);
    }

    let shift = state.speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.x -= shift;
    }

    let limit = -state.tuning.despawn_margin;
    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.right_edge() > limit);
    let passed = (before - state.obstacles.len()) as u32;
    if passed > 0 {
        state.score += u64::from(passed);
        log::debug!("Passed {} obstacle(s), score {}", passed, state.score);
        state.events.push(GameEvent::ObstaclesPassed {
            count: passed,
            score: state.score,
        });
    }

    let player = state.player_rect();
    if let Some(obstacle_id) = first_collision(&player, &state.obstacles, &state.tuning) {
        state.events.push(GameEvent::Collided { obstacle_id });
        state.end_game();
        log::info!(
            "Game over: hit obstacle {} (score {}, best {})",
            obstacle_id,
            state.score,
            state.best
        );
    }

    true
}
