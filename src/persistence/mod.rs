//! Save/load persistence for phase progress and the high score
//!
//! Features:
//! - Versioned JSON envelope per file
//! - Atomic writes (tmp → save)
//! - Malformed progress is sanitised, unreadable files fall back to defaults

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Current on-disk format version
pub const SAVE_VERSION: u32 = 1;

pub const PROGRESS_FILE: &str = "progress.json";
pub const HIGH_SCORE_FILE: &str = "highscore.json";

/// Errors at the persistence boundary
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or mistyped JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File written by a newer build
    #[error("Unsupported save version {found}")]
    Version { found: u32 },
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Unlocked phases and the phase to resume at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSave {
    pub unlocked_phases: BTreeSet<u32>,
    pub current_phase: u32,
}

impl Default for ProgressSave {
    fn default() -> Self {
        Self {
            unlocked_phases: BTreeSet::from([1]),
            current_phase: 1,
        }
    }
}

impl ProgressSave {
    /// Repair a loaded save: phase 0 is dropped, phase 1 is always unlocked,
    /// and a locked current phase falls back to the highest unlocked one.
    pub fn sanitized(mut self) -> Self {
        self.unlocked_phases.remove(&0);
        self.unlocked_phases.insert(1);
        if !self.unlocked_phases.contains(&self.current_phase) {
            let fallback = self.unlocked_phases.last().copied().unwrap_or(1);
            log::warn!(
                "Saved phase {} is not unlocked, resuming at {}",
                self.current_phase,
                fallback
            );
            self.current_phase = fallback;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScoreSave {
    pub high_score: u64,
}

/// A save request raised by the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveEvent {
    Progress(ProgressSave),
    HighScore(HighScoreSave),
}

/// Everything the simulation is seeded from at startup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaveSeed {
    pub progress: ProgressSave,
    pub high_score: HighScoreSave,
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

fn encode<T: Serialize>(data: &T) -> Result<String> {
    let envelope = Envelope {
        version: SAVE_VERSION,
        data,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(text)?;
    if envelope.version > SAVE_VERSION {
        return Err(PersistenceError::Version {
            found: envelope.version,
        });
    }
    Ok(envelope.data)
}

/// Storage backend for save events
pub trait SaveStore {
    fn read_progress(&self) -> Result<Option<ProgressSave>>;
    fn read_high_score(&self) -> Result<Option<HighScoreSave>>;
    fn write(&mut self, event: &SaveEvent) -> Result<()>;

    /// Load both saves; never fails, errors are logged and replaced by defaults
    fn load_seed(&self) -> SaveSeed {
        let progress = match self.read_progress() {
            Ok(Some(progress)) => progress.sanitized(),
            Ok(None) => ProgressSave::default(),
            Err(e) => {
                log::warn!("Failed to load progress, starting fresh: {}", e);
                ProgressSave::default()
            }
        };
        let high_score = match self.read_high_score() {
            Ok(Some(hs)) => hs,
            Ok(None) => HighScoreSave::default(),
            Err(e) => {
                log::warn!("Failed to load high score, using 0: {}", e);
                HighScoreSave::default()
            }
        };
        SaveSeed {
            progress,
            high_score,
        }
    }
}

/// Two JSON files in one directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        decode(&text).map(Some)
    }

    fn write_file<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encode(data)?)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl SaveStore for JsonFileStore {
    fn read_progress(&self) -> Result<Option<ProgressSave>> {
        self.read(PROGRESS_FILE)
    }

    fn read_high_score(&self) -> Result<Option<HighScoreSave>> {
        self.read(HIGH_SCORE_FILE)
    }

    fn write(&mut self, event: &SaveEvent) -> Result<()> {
        match event {
            SaveEvent::Progress(progress) => self.write_file(PROGRESS_FILE, progress),
            SaveEvent::HighScore(hs) => self.write_file(HIGH_SCORE_FILE, hs),
        }
    }
}

/// In-memory store for tests and headless runs without a save directory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub progress: Option<ProgressSave>,
    pub high_score: Option<HighScoreSave>,
    /// Number of writes applied
    pub writes: usize,
}

impl SaveStore for MemoryStore {
    fn read_progress(&self) -> Result<Option<ProgressSave>> {
        Ok(self.progress.clone())
    }

    fn read_high_score(&self) -> Result<Option<HighScoreSave>> {
        Ok(self.high_score)
    }

    fn write(&mut self, event: &SaveEvent) -> Result<()> {
        match event {
            SaveEvent::Progress(progress) => self.progress = Some(progress.clone()),
            SaveEvent::HighScore(hs) => self.high_score = Some(*hs),
        }
        self.writes += 1;
        Ok(())
    }
}
