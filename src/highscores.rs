//! High score tracking
//!
//! Only the single best score is kept; it is persisted by the save store as
//! `{"high_score": N}`.

use serde::{Deserialize, Serialize};

/// Best score seen across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && score > self.best
    }

    /// Record `score`; returns true if it became the new best
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }
}
