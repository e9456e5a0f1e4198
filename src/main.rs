//! Galaxy Blast headless runner
//!
//! Loads settings and saves, lets the autopilot play, writes save events as
//! they happen and restarts after game over until the budget runs out.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use galaxy_blast::Settings;
use galaxy_blast::persistence::{JsonFileStore, SaveStore};
use galaxy_blast::platform::FrameClock;
use galaxy_blast::sim::{ArchetypeTable, GameEvent, GameMode, GameState, TickInput, hud, tick};

const DEFAULT_SETTINGS: &str = "galaxy_blast.json";

#[derive(Debug, Default)]
struct RunStats {
    kills: u32,
    parries: u32,
    phases_cleared: u32,
    deaths: u32,
    best_score: u64,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyKilled { .. } => self.kills += 1,
            GameEvent::Parry => self.parries += 1,
            GameEvent::PhaseCompleted { phase, next_phase } => {
                self.phases_cleared += 1;
                log::info!("Phase {} complete, moving to {}", phase, next_phase);
            }
            GameEvent::PlayerDied { score } => {
                self.deaths += 1;
                self.best_score = self.best_score.max(*score);
            }
            GameEvent::BossAlertStarted | GameEvent::BossSpawned { .. } => {
                log::info!("{}", event.name());
            }
            _ => log::debug!("{}", event.name()),
        }
    }
}

fn main() {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS));
    let settings = Settings::load(&settings_path);

    let mut store = JsonFileStore::new(&settings.save_dir);
    let seed = settings.resolve_seed();
    let mut state = GameState::from_save(seed, store.load_seed(), ArchetypeTable::default());
    log::info!("Galaxy Blast starting (seed {})", seed);

    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };
    let mut clock = FrameClock::new();
    let mut last_frame = Instant::now();
    let mut stats = RunStats::default();
    let mut restarts = 0;
    let mut ticks_run: u64 = 0;

    'run: while ticks_run < settings.max_ticks {
        let steps = if settings.realtime {
            std::thread::sleep(Duration::from_millis(4));
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            clock.advance(dt)
        } else {
            1
        };

        for _ in 0..steps {
            tick(&mut state, &input);
            ticks_run += 1;

            for event in &state.events {
                stats.record(event);
            }
            for save in &state.saves {
                if let Err(e) = store.write(save) {
                    log::warn!("Failed to write save: {}", e);
                }
            }

            if state.session.mode == GameMode::GameOver {
                if restarts >= settings.max_restarts {
                    break 'run;
                }
                restarts += 1;
                state.restart();
                clock.reset();
            }
        }
    }

    stats.best_score = stats.best_score.max(state.session.score);
    let summary = hud(&state);
    log::info!(
        "Run finished after {} ticks: phase {}, score {}, best {}",
        ticks_run,
        summary.phase,
        summary.score,
        summary.high_score
    );
    println!(
        "ticks={} phase={} kills={} parries={} phases_cleared={} deaths={} best_run={} high_score={}",
        ticks_run,
        summary.phase,
        stats.kills,
        stats.parries,
        stats.phases_cleared,
        stats.deaths,
        stats.best_score,
        summary.high_score
    );
}
