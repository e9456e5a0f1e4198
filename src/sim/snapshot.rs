//! Read-only views for the renderer and HUD
//!
//! Nothing here mutates state; a renderer can draw a whole frame from
//! `render_items` plus `hud`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pattern::BossPattern;
use super::projectile::ProjectileKind;
use super::session::GameMode;
use super::state::{EntityId, EntityKind, GameState, PowerUpKind};
use crate::consts::*;

/// Frames in the power-up spin animation
const POWERUP_FRAMES: u32 = 5;
/// Ticks per power-up animation frame
const POWERUP_FRAME_TICKS: f32 = 6.0;

/// Per-kind drawing hint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Ship {
        shielded: bool,
        dashing: bool,
        overcharged: bool,
    },
    /// Enemy sprite variant
    Sprite(u8),
    Boss {
        entering: bool,
        /// Remaining health in [0, 1]
        health: f32,
        last_pattern: Option<BossPattern>,
    },
    Bullet,
    /// Charged ball pulse scale
    Pulse(f32),
    Mine,
    PowerUp {
        kind: PowerUpKind,
        frame: u8,
    },
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub visual: Visual,
}

/// HUD summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub gauge: u32,
    pub gauge_max: u32,
    pub overcharged: bool,
    pub shield: bool,
    pub speed_boost: bool,
    pub double_shot: bool,
    pub double_points: bool,
    pub score: u64,
    pub high_score: u64,
    pub phase: u32,
    pub mode: GameMode,
    pub alert_ticks_left: Option<u32>,
    /// Phase-clear banner text while it is showing
    pub banner: Option<String>,
}

/// Every live entity in draw order: power-ups, enemies, boss, projectiles, player
pub fn render_items(state: &GameState) -> Vec<RenderItem> {
    let mut items = Vec::with_capacity(state.entity_count());

    for p in state.powerups.iter().filter(|p| p.alive) {
        let frame = (p.anim / POWERUP_FRAME_TICKS) as u32 % POWERUP_FRAMES;
        items.push(RenderItem {
            id: p.id,
            kind: EntityKind::PowerUp,
            pos: p.rect.center,
            size: p.rect.size,
            visual: Visual::PowerUp {
                kind: p.kind,
                frame: frame as u8,
            },
        });
    }

    for e in state.enemies.iter().filter(|e| e.alive) {
        items.push(RenderItem {
            id: e.id,
            kind: EntityKind::EnemyShip,
            pos: e.rect.center,
            size: e.rect.size,
            visual: Visual::Sprite(e.sprite),
        });
    }

    if let Some(boss) = state.boss.as_ref().filter(|b| b.alive) {
        items.push(RenderItem {
            id: boss.id,
            kind: EntityKind::BossShip,
            pos: boss.rect.center,
            size: boss.rect.size,
            visual: Visual::Boss {
                entering: boss.entering,
                health: boss.health.max(0) as f32 / boss.max_health.max(1) as f32,
                last_pattern: boss.last_pattern,
            },
        });
    }

    for p in state.projectiles.iter().filter(|p| p.alive) {
        let visual = match &p.kind {
            ProjectileKind::ChargedBall { .. } => Visual::Pulse(p.pulse_scale()),
            ProjectileKind::Mine { .. } => Visual::Mine,
            _ => Visual::Bullet,
        };
        items.push(RenderItem {
            id: p.id,
            kind: p.entity_kind(),
            pos: p.rect.center,
            size: p.rect.size,
            visual,
        });
    }

    let player = &state.player;
    items.push(RenderItem {
        id: player.id,
        kind: EntityKind::PlayerShip,
        pos: player.rect.center,
        size: player.rect.size,
        visual: Visual::Ship {
            shielded: player.is_shielded(),
            dashing: player.is_dashing(),
            overcharged: player.is_overcharged(),
        },
    });

    items
}

pub fn hud(state: &GameState) -> Hud {
    let player = &state.player;
    let session = &state.session;
    let banner = (session.mode == GameMode::PhaseTransition).then(|| {
        format!(
            "Phase {} cleared! Next: phase {}",
            session.phase.saturating_sub(1),
            session.phase
        )
    });
    Hud {
        health: player.health,
        max_health: player.max_health,
        gauge: player.gauge,
        gauge_max: OVERCHARGE_MAX,
        overcharged: player.is_overcharged(),
        shield: player.is_shielded(),
        speed_boost: player.speed_boost.active(),
        double_shot: player.double_shot.active(),
        double_points: player.has_double_points(),
        score: session.score,
        high_score: session.high_score.best(),
        phase: session.phase,
        mode: session.mode,
        alert_ticks_left: session.alert_ticks_left(),
        banner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;
    use crate::sim::spawn::SpawnRequest;

    #[test]
    fn test_player_always_drawn_last() {
        let mut state = GameState::new(1);
        state.spawn_enemy(Archetype::Normal, 100.0);
        state.spawn_boss();
        state.spawn(SpawnRequest::PowerUp {
            pos: Vec2::new(50.0, 50.0),
            kind: PowerUpKind::Health,
        });
        let items = render_items(&state);
        assert_eq!(items.len(), state.entity_count());
        assert_eq!(items[0].kind, EntityKind::PowerUp);
        assert_eq!(items.last().map(|i| i.kind), Some(EntityKind::PlayerShip));
        assert!(matches!(
            items[2].visual,
            Visual::Boss {
                entering: true,
                ..
            }
        ));
    }

    #[test]
    fn test_hud_reflects_session() {
        let mut state = GameState::new(1);
        state.session.add_points(300);
        state.player.shield.reset(SHIELD_TICKS);
        let hud = hud(&state);
        assert_eq!(hud.score, 300);
        assert_eq!(hud.high_score, 300);
        assert!(hud.shield);
        assert!(!hud.double_points);
        assert_eq!(hud.mode, GameMode::Normal);
        assert_eq!(hud.alert_ticks_left, None);
        assert_eq!(hud.banner, None);
    }

    #[test]
    fn test_hud_alert_countdown() {
        let mut state = GameState::new(1);
        state.session.mode = GameMode::BossAlert;
        state.session.alert.reset(BOSS_ALERT_TICKS);
        assert_eq!(hud(&state).alert_ticks_left, Some(180));
    }
}
