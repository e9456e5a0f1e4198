//! Session state machine: phases, score, boss threshold and spawner
//!
//! `Normal → BossAlert → BossFight → PhaseTransition → Normal`, with
//! `GameOver` reachable from any mode. Session countdowns run on unscaled
//! ticks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use super::timer::Countdown;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::{HighScoreSave, ProgressSave, SaveEvent, SaveSeed};

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Regular enemy waves
    Normal,
    /// Warning countdown before the boss arrives
    BossAlert,
    /// Boss on screen
    BossFight,
    /// Phase-clear banner between phases
    PhaseTransition,
    /// Player dead, waiting for restart
    GameOver,
}

/// Spawner interval in simulated milliseconds for `phase`
pub fn spawn_interval_ms(phase: u32) -> u32 {
    let step = SPAWN_INTERVAL_STEP_MS.saturating_mul(phase.saturating_sub(1));
    SPAWN_INTERVAL_BASE_MS
        .saturating_sub(step)
        .max(SPAWN_INTERVAL_MIN_MS)
}

/// Spawner interval converted to ticks
pub fn spawn_interval_ticks(phase: u32) -> f32 {
    spawn_interval_ms(phase) as f32 * TICK_RATE as f32 / 1000.0
}

/// Score needed to trigger the boss alert
pub fn boss_threshold(phase: u32, carried_score: u64) -> u64 {
    BOSS_THRESHOLD_BASE * phase as u64 + carried_score
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub mode: GameMode,
    /// Phase being played (1-based)
    pub phase: u32,
    /// Phases available in the menu; only ever grows
    pub unlocked: BTreeSet<u32>,
    pub score: u64,
    pub high_score: HighScore,
    pub boss_threshold: u64,
    pub spawn_interval: f32,
    pub spawn_timer: Countdown,
    pub alert: Countdown,
    pub banner: Countdown,
    /// Set from boss death until the banner finishes
    pub boss_defeat_pending: bool,
    high_score_dirty: bool,
    record_announced: bool,
}

impl Session {
    pub fn new(save: &SaveSeed) -> Self {
        let progress = save.progress.clone().sanitized();
        let phase = progress.current_phase;
        let spawn_interval = spawn_interval_ticks(phase);
        Self {
            mode: GameMode::Normal,
            phase,
            unlocked: progress.unlocked_phases,
            score: 0,
            high_score: HighScore::new(save.high_score.high_score),
            boss_threshold: boss_threshold(phase, 0),
            spawn_interval,
            spawn_timer: Countdown::new(spawn_interval),
            alert: Countdown::default(),
            banner: Countdown::default(),
            boss_defeat_pending: false,
            high_score_dirty: false,
            record_announced: false,
        }
    }

    /// Add (or subtract) points; the score never goes below zero
    pub fn add_points(&mut self, delta: i64) {
        self.score = if delta >= 0 {
            self.score.saturating_add(delta as u64)
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
        if self.high_score.submit(self.score) {
            self.high_score_dirty = true;
        }
    }

    pub fn progress_save(&self) -> ProgressSave {
        ProgressSave {
            unlocked_phases: self.unlocked.clone(),
            current_phase: self.phase,
        }
    }

    /// Ticks left on the boss alert, while it is showing
    pub fn alert_ticks_left(&self) -> Option<u32> {
        (self.mode == GameMode::BossAlert).then(|| self.alert.remaining().ceil() as u32)
    }
}

/// Advance the session by one tick, after collisions have been resolved
pub fn step(state: &mut GameState) {
    if state.session.mode != GameMode::GameOver && !state.player.is_alive() {
        enter_game_over(state);
        return;
    }

    match state.session.mode {
        GameMode::Normal => {
            if state.session.score >= state.session.boss_threshold {
                state.session.mode = GameMode::BossAlert;
                state.session.alert.reset(BOSS_ALERT_TICKS);
                state.events.push(GameEvent::BossAlertStarted);
                log::info!(
                    "Boss alert: score {} reached threshold {}",
                    state.session.score,
                    state.session.boss_threshold
                );
                return;
            }
            state.session.spawn_timer.tick(1.0);
            if state.session.spawn_timer.expired() {
                state.spawn_random_enemy();
                let interval = state.session.spawn_interval;
                state.session.spawn_timer.reset(interval);
            }
        }
        GameMode::BossAlert => {
            state.session.alert.tick(1.0);
            if state.session.alert.expired() {
                state.spawn_boss();
                state.session.mode = GameMode::BossFight;
                state.events.push(GameEvent::BossSpawned {
                    phase: state.session.phase,
                });
            }
        }
        GameMode::BossFight => {
            if state.boss.as_ref().is_none_or(|b| !b.alive) {
                enter_phase_transition(state);
            }
        }
        GameMode::PhaseTransition => {
            state.session.banner.tick(1.0);
            if state.session.banner.expired() {
                state.session.mode = GameMode::Normal;
                state.session.boss_defeat_pending = false;
                let interval = state.session.spawn_interval;
                state.session.spawn_timer.reset(interval);
                log::info!("Phase {} begins", state.session.phase);
            }
        }
        GameMode::GameOver => {}
    }
}

/// Everything a boss kill triggers, applied once on the same tick
fn enter_phase_transition(state: &mut GameState) {
    let completed = state.session.phase;
    let next = completed + 1;

    state.session.add_points(PHASE_CLEAR_BONUS);
    if state.session.unlocked.insert(next) {
        log::info!("Phase {} unlocked", next);
    }
    state.session.phase = next;

    state.clear_transient();
    state.player.reset_overcharge();

    let progress = state.session.progress_save();
    state.saves.push(SaveEvent::Progress(progress));

    let session = &mut state.session;
    session.spawn_interval = spawn_interval_ticks(next);
    session.boss_threshold = boss_threshold(next, session.score);
    session.banner.reset(PHASE_BANNER_TICKS);
    session.mode = GameMode::PhaseTransition;
    session.boss_defeat_pending = true;

    state.events.push(GameEvent::BossDefeated { phase: completed });
    state.events.push(GameEvent::PhaseCompleted {
        phase: completed,
        next_phase: next,
    });
    log::info!(
        "Phase {} cleared, score {}, next boss at {}",
        completed,
        state.session.score,
        state.session.boss_threshold
    );
}

fn enter_game_over(state: &mut GameState) {
    state.session.mode = GameMode::GameOver;
    state.events.push(GameEvent::PlayerDied {
        score: state.session.score,
    });
    log::info!(
        "Game over in phase {} with score {} (best {})",
        state.session.phase,
        state.session.score,
        state.session.high_score.best()
    );
}

/// Emit at most one high-score save per tick
pub fn flush_high_score(state: &mut GameState) {
    let session = &mut state.session;
    if !session.high_score_dirty {
        return;
    }
    session.high_score_dirty = false;
    let best = session.high_score.best();
    state.saves.push(SaveEvent::HighScore(HighScoreSave { high_score: best }));
    if !session.record_announced {
        session.record_announced = true;
        state.events.push(GameEvent::NewHighScore { score: best });
    }
}

/// Reset player, score, boss and transient entities; unlocked phases stay
pub fn restart(state: &mut GameState) {
    let player_id = state.next_entity_id();
    state.player = super::player::Player::new(player_id);
    state.clear_transient();

    let session = &mut state.session;
    session.mode = GameMode::Normal;
    session.score = 0;
    session.boss_threshold = boss_threshold(session.phase, 0);
    session.spawn_interval = spawn_interval_ticks(session.phase);
    session.spawn_timer.reset(session.spawn_interval);
    session.alert.clear();
    session.banner.clear();
    session.boss_defeat_pending = false;
    session.high_score_dirty = false;
    session.record_announced = false;
    log::info!("Restarting at phase {}", session.phase);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_interval() {
        assert_eq!(spawn_interval_ms(1), 1800);
        assert_eq!(spawn_interval_ms(2), 1650);
        assert_eq!(spawn_interval_ms(10), 450);
        assert_eq!(spawn_interval_ms(11), 400);
        assert_eq!(spawn_interval_ms(50), 400);
        assert_eq!(spawn_interval_ticks(1), 108.0);
        assert_eq!(spawn_interval_ticks(50), 24.0);
    }

    #[test]
    fn test_threshold() {
        assert_eq!(boss_threshold(1, 0), 1000);
        assert_eq!(boss_threshold(3, 0), 3000);
        assert_eq!(boss_threshold(2, 1540), 3540);
    }

    #[test]
    fn test_score_floor_and_high_score() {
        let mut session = Session::new(&SaveSeed::default());
        session.add_points(-50);
        assert_eq!(session.score, 0);
        session.add_points(120);
        session.add_points(-20);
        assert_eq!(session.score, 100);
        assert_eq!(session.high_score.best(), 120);
    }

    #[test]
    fn test_seeded_from_save() {
        let save = SaveSeed {
            progress: ProgressSave {
                unlocked_phases: BTreeSet::from([1, 2, 3]),
                current_phase: 3,
            },
            high_score: HighScoreSave { high_score: 9000 },
        };
        let session = Session::new(&save);
        assert_eq!(session.phase, 3);
        assert_eq!(session.boss_threshold, 3000);
        assert_eq!(session.high_score.best(), 9000);
        assert_eq!(session.spawn_interval, spawn_interval_ticks(3));
    }

    #[test]
    fn test_spawner_fires_on_interval() {
        let mut state = GameState::new(3);
        for _ in 0..107 {
            step(&mut state);
        }
        assert!(state.enemies.is_empty());
        step(&mut state);
        assert_eq!(state.enemies.len(), 1);
        for _ in 0..108 {
            step(&mut state);
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_alert_then_boss() {
        let mut state = GameState::new(3);
        state.session.add_points(1000);
        step(&mut state);
        assert_eq!(state.session.mode, GameMode::BossAlert);
        assert_eq!(state.events, vec![GameEvent::BossAlertStarted]);

        // Spawner is suppressed while the alert runs
        for _ in 0..179 {
            step(&mut state);
        }
        assert_eq!(state.session.mode, GameMode::BossAlert);
        assert!(state.enemies.is_empty());
        assert!(state.boss.is_none());

        step(&mut state);
        assert_eq!(state.session.mode, GameMode::BossFight);
        assert!(state.boss.is_some());

        // Further score does not re-trigger the alert
        state.session.add_points(5000);
        step(&mut state);
        assert_eq!(state.session.mode, GameMode::BossFight);
        let alerts = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::BossAlertStarted)
            .count();
        assert_eq!(alerts, 1);
    }

    #[test]
    fn test_phase_transition_and_return() {
        let mut state = GameState::new(3);
        state.session.mode = GameMode::BossFight;
        state.session.score = 1200;
        state.player.gauge = 70;
        state.spawn_enemy(crate::sim::enemy::Archetype::Normal, 100.0);

        step(&mut state);
        assert_eq!(state.session.mode, GameMode::PhaseTransition);
        assert_eq!(state.session.phase, 2);
        assert_eq!(state.session.score, 1700);
        assert_eq!(state.session.boss_threshold, 2000 + 1700);
        assert!(state.session.unlocked.contains(&2));
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.gauge, 0);
        assert!(state.session.boss_defeat_pending);
        assert!(state.saves.iter().any(|s| matches!(
            s,
            SaveEvent::Progress(p) if p.current_phase == 2
        )));

        for _ in 0..239 {
            step(&mut state);
        }
        assert_eq!(state.session.mode, GameMode::PhaseTransition);
        assert_eq!(state.session.score, 1700);
        step(&mut state);
        assert_eq!(state.session.mode, GameMode::Normal);
        assert_eq!(state.session.spawn_timer.remaining(), spawn_interval_ticks(2));
        assert!(!state.session.boss_defeat_pending);
    }

    #[test]
    fn test_game_over_from_any_mode() {
        for mode in [GameMode::Normal, GameMode::BossAlert, GameMode::BossFight] {
            let mut state = GameState::new(3);
            state.session.mode = mode;
            state.player.health = 0;
            step(&mut state);
            assert_eq!(state.session.mode, GameMode::GameOver);
            assert_eq!(state.events, vec![GameEvent::PlayerDied { score: 0 }]);
        }
    }

    #[test]
    fn test_restart_keeps_unlocks() {
        let mut state = GameState::new(3);
        state.session.unlocked.insert(2);
        state.session.score = 400;
        state.player.health = 0;
        state.spawn_boss();
        step(&mut state);
        assert_eq!(state.session.mode, GameMode::GameOver);

        restart(&mut state);
        assert_eq!(state.session.mode, GameMode::Normal);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
        assert!(state.boss.is_none());
        assert!(state.session.unlocked.contains(&2));
        assert_eq!(state.session.high_score.best(), 0);
    }

    #[test]
    fn test_high_score_flush_once_per_tick() {
        let mut state = GameState::new(3);
        state.session.add_points(50);
        state.session.add_points(50);
        flush_high_score(&mut state);
        assert_eq!(state.saves.len(), 1);
        assert!(state.events.contains(&GameEvent::NewHighScore { score: 100 }));

        state.saves.clear();
        state.events.clear();
        flush_high_score(&mut state);
        assert!(state.saves.is_empty());

        state.session.add_points(10);
        flush_high_score(&mut state);
        assert_eq!(state.saves.len(), 1);
        // The record is only announced once per run
        assert!(state.events.is_empty());
    }
}
