//! Countdown timer shared by buffs, cooldowns and fuses

use serde::{Deserialize, Serialize};

/// A scalar countdown measured in ticks.
///
/// Ticking with a scale below 1.0 (time dilation) drains it more slowly.
/// A fresh `Countdown::default()` is already expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Create a countdown with `duration` ticks left
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// Advance by `scale` ticks, saturating at zero
    pub fn tick(&mut self, scale: f32) {
        self.remaining = (self.remaining - scale).max(0.0);
    }

    pub fn expired(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn active(&self) -> bool {
        !self.expired()
    }

    /// Restart at `duration` ticks
    pub fn reset(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Force to expired
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
