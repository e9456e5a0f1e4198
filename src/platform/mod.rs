//! Platform abstraction layer
//!
//! Turns wall-clock frame time into a whole number of fixed simulation
//! ticks. The simulation itself never sees real time.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame the clock will account for; longer stalls are dropped
pub const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-step accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds; returns how many ticks to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick left over, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / SIM_DT).clamp(0.0, 1.0)
    }

    /// Drop any pending time (after pause or focus loss)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
