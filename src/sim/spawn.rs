//! Obstacle spawning
//!
//! Spawn cadence is independent of scroll speed: the timer is drawn from
//! `[spawn_min, spawn_max)` seconds and counts down in simulation time.

use super::rng::SimRng;
use super::state::Obstacle;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Spawner {
    /// Seconds until the next spawn
    pub timer: f32,
    rng: SimRng,
    /// Never reset, so ids stay unique across runs
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut spawner = Self {
            timer: 0.0,
            rng: SimRng::new(seed),
            next_id: 0,
        };
        spawner.reset(tuning);
        spawner
    }

    /// Redraw the countdown for a fresh run
    pub fn reset(&mut self, tuning: &Tuning) {
        self.timer = self.draw_interval(tuning);
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Count down by `dt`; when the timer expires, build one obstacle just
    /// past the right edge and redraw the timer.
    pub fn update(&mut self, dt: f32, tuning: &Tuning) -> Option<Obstacle> {
        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        let width = self.rng.uniform(tuning.obstacle_min_w, tuning.obstacle_max_w);
        let height = self.rng.uniform(tuning.obstacle_min_h, tuning.obstacle_max_h);
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.timer = self.draw_interval(tuning);

        Some(Obstacle {
            id,
            x: tuning.world_width + tuning.spawn_margin,
            width,
            height,
        })
    }

    fn draw_interval(&mut self, tuning: &Tuning) -> f32 {
        self.rng.uniform(tuning.spawn_min, tuning.spawn_max)
    }
}
