//! Demo-mode pilot
//!
//! Produces a `TickInput` from the current state: chase pickups, line up
//! under the nearest target, fire continuously, dash into incoming fire
//! for parries and burn the overcharge gauge once it is full.

use glam::Vec2;

use super::projectile::Faction;
use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Hostile fire closer than this triggers a parry dash
const PARRY_RADIUS: f32 = 70.0;
/// Horizontal slack before steering
const DEADZONE: f32 = PLAYER_SPEED;

/// Compute the autopilot's input for the next tick
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let pos = player.rect.center;
    let mut input = TickInput {
        fire: true,
        ..TickInput::default()
    };

    // Go get the pickup first, otherwise the lowest enemy, otherwise the boss
    let target_x = state
        .powerups
        .iter()
        .filter(|p| p.alive && p.rect.center.y < pos.y)
        .min_by(|a, b| a.rect.center.distance(pos).total_cmp(&b.rect.center.distance(pos)))
        .map(|p| p.rect.center.x)
        .or_else(|| {
            state
                .enemies
                .iter()
                .filter(|e| e.alive && !e.is_entering())
                .max_by(|a, b| a.rect.center.y.total_cmp(&b.rect.center.y))
                .map(|e| e.rect.center.x)
        })
        .or_else(|| state.boss.as_ref().map(|b| b.rect.center.x));

    if let Some(x) = target_x {
        // Wander a little so runs don't settle into a loop
        let wobble = (state.time_ticks as f32 * 0.05).sin() * 12.0;
        let dx = x + wobble - pos.x;
        input.left = dx < -DEADZONE;
        input.right = dx > DEADZONE;
    }

    let home = PLAYER_SPAWN_Y;
    input.up = pos.y > home + DEADZONE;
    input.down = pos.y < home - DEADZONE;

    let threatened = state
        .projectiles
        .iter()
        .filter(|p| p.alive && p.faction != Faction::Player)
        .any(|p| incoming(p.rect.center, pos))
        || state
            .enemies
            .iter()
            .any(|e| e.alive && incoming(e.rect.center, pos));
    input.dash = threatened && player.dash_cooldown.expired();

    let has_targets = !state.enemies.is_empty() || state.boss.is_some();
    input.overcharge = has_targets && player.gauge >= OVERCHARGE_MAX;

    input
}

fn incoming(threat: Vec2, player: Vec2) -> bool {
    threat.y <= player.y && threat.distance(player) < PARRY_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;
    use crate::sim::projectile::ProjectileSpawn;
    use crate::sim::spawn::SpawnRequest;
    use crate::sim::state::PowerUpKind;
    use crate::sim::tick::tick;

    #[test]
    fn test_always_fires() {
        let state = GameState::new(1);
        assert!(steer(&state).fire);
    }

    #[test]
    fn test_steers_toward_lowest_enemy() {
        let mut state = GameState::new(1);
        let id = state.spawn_enemy(Archetype::Tank, 60.0);
        if let Some(e) = state.enemies.iter_mut().find(|e| e.id == id) {
            e.rect.center.y = 300.0;
        }
        let input = steer(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_prefers_pickups() {
        let mut state = GameState::new(1);
        let id = state.spawn_enemy(Archetype::Tank, 60.0);
        if let Some(e) = state.enemies.iter_mut().find(|e| e.id == id) {
            e.rect.center.y = 300.0;
        }
        state.spawn(SpawnRequest::PowerUp {
            pos: Vec2::new(440.0, 400.0),
            kind: PowerUpKind::Shield,
        });
        assert!(steer(&state).right);
    }

    #[test]
    fn test_dashes_into_incoming_fire() {
        let mut state = GameState::new(1);
        let pos = state.player.rect.center - Vec2::new(0.0, 40.0);
        state.spawn(SpawnRequest::Projectile(ProjectileSpawn::straight(
            99,
            Faction::Enemy,
            pos,
            Vec2::splat(10.0),
            90.0,
            4.0,
        )));
        assert!(steer(&state).dash);

        state.player.dash_cooldown.reset(DASH_COOLDOWN_TICKS);
        assert!(!steer(&state).dash);
    }

    #[test]
    fn test_survives_a_while() {
        let mut state = GameState::new(2024);
        for _ in 0..1200 {
            let input = steer(&state);
            tick(&mut state, &input);
        }
        assert!(state.time_ticks > 0);
        assert!(state.player.health <= PLAYER_MAX_HEALTH);
    }
}
