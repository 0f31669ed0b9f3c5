//! Frame clock: turns display-refresh timestamps into simulation steps
//!
//! Every `start()` opens a new generation and hands out a [`TickToken`].
//! Frames scheduled under an older token are ignored, so a pause or game
//! over can't be undone by a callback that was already in flight.

use crate::consts::{FIXED_DT, MAX_SUBSTEPS};

/// How frame deltas become simulation steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// One step per frame of the (clamped) wall-clock delta
    Variable,
    /// Accumulate deltas and emit fixed steps (at most `MAX_SUBSTEPS` per frame)
    Fixed { step: f32 },
}

impl ClockMode {
    pub fn fixed() -> Self {
        ClockMode::Fixed { step: FIXED_DT }
    }
}

/// Proof that a scheduled frame belongs to the current run of the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickToken(u64);

#[derive(Debug, Clone)]
pub struct SimClock {
    mode: ClockMode,
    max_dt: f32,
    last_timestamp: Option<f64>,
    accumulator: f32,
    generation: u64,
    running: bool,
}

impl SimClock {
    pub fn new(mode: ClockMode, max_dt: f32) -> Self {
        Self {
            mode,
            max_dt,
            last_timestamp: None,
            accumulator: 0.0,
            generation: 0,
            running: false,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin (or resume) ticking. The first frame after this yields dt = 0,
    /// so time spent stopped never reaches the simulation.
    pub fn start(&mut self) -> TickToken {
        self.generation = self.generation.wrapping_add(1);
        self.running = true;
        self.last_timestamp = None;
        self.accumulator = 0.0;
        TickToken(self.generation)
    }

    /// Stop ticking and invalidate every outstanding token
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.running = false;
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }

    pub fn accepts(&self, token: TickToken) -> bool {
        self.running && token.0 == self.generation
    }

    /// Consume a frame timestamp (milliseconds, monotonic) and return the
    /// steps to simulate. Empty for stale tokens and the first frame.
    pub fn advance(&mut self, token: TickToken, now_ms: f64) -> Vec<f32> {
        if !self.accepts(token) {
            return Vec::new();
        }

        let delta = match self.last_timestamp {
            Some(prev) => ((now_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        // Also maps NaN and backwards timestamps to 0
        let dt = if delta > 0.0 { delta.min(self.max_dt) } else { 0.0 };

        match self.mode {
            ClockMode::Variable => {
                if dt > 0.0 {
                    vec![dt]
                } else {
                    Vec::new()
                }
            }
            ClockMode::Fixed { step } => {
                self.accumulator += dt;
                let mut steps = Vec::new();
                while self.accumulator >= step && (steps.len() as u32) < MAX_SUBSTEPS {
                    steps.push(step);
                    self.accumulator -= step;
                }
                steps
            }
        }
    }
}
