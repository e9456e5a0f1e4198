//! Runner settings
//!
//! Persisted separately from game saves as a plain JSON file. Missing or
//! unreadable files fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::persistence::Result;

/// Headless runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding progress.json and highscore.json
    pub save_dir: PathBuf,
    /// Fixed run seed; a time-derived seed is used when absent
    pub seed: Option<u64>,
    /// Stop after this many simulation ticks
    pub max_ticks: u64,
    /// Restarts allowed after game over before the run ends
    pub max_restarts: u32,
    /// Pace ticks against the wall clock instead of running flat out
    pub realtime: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            seed: None,
            // Five minutes of play
            max_ticks: 5 * 60 * TICK_RATE as u64,
            max_restarts: 2,
            realtime: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// The configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
