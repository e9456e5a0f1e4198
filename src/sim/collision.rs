//! Collision resolution
//!
//! One pass per tick over axis-aligned rects, in a fixed rule order. Every
//! rule only marks entities dead and adjusts health, score and gauge; the
//! registry sweeps afterwards.

use rand::Rng;

use super::player::Player;
use super::projectile::Faction;
use super::spawn::SpawnRequest;
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::consts::*;

/// Score for a player bullet hitting an enemy. The overcharge bonus stacks
/// on top of the plain or double-points hit score.
pub fn hit_reward(player: &Player) -> i64 {
    let bonus = if player.is_overcharged() {
        SCORE_OVERCHARGE_BONUS
    } else {
        0
    };
    let base = if player.has_double_points() {
        SCORE_HIT_DOUBLE
    } else {
        SCORE_HIT
    };
    bonus + base
}

/// Score for a player bullet hitting the boss
pub fn boss_hit_reward(player: &Player) -> i64 {
    if player.has_double_points() {
        SCORE_BOSS_HIT_DOUBLE
    } else {
        SCORE_BOSS_HIT
    }
}

/// Score for a parry
pub fn parry_reward(player: &Player) -> i64 {
    if player.has_double_points() {
        SCORE_PARRY_DOUBLE
    } else {
        SCORE_PARRY
    }
}

/// Run every collision rule in order
pub fn resolve(state: &mut GameState) {
    player_bullets_vs_enemies(state);
    player_vs_powerups(state);
    player_vs_enemies(state);
    hostile_bullets_vs_player(state, Faction::Enemy, PENALTY_ENEMY_BULLET);
    player_bullets_vs_boss(state);
    hostile_bullets_vs_player(state, Faction::Boss, PENALTY_BOSS_BULLET);
}

fn parry(state: &mut GameState) {
    let reward = parry_reward(&state.player);
    state.session.add_points(reward);
    state.player.add_gauge(GAUGE_PER_PARRY);
    state.events.push(GameEvent::Parry);
}

fn damage_player(state: &mut GameState, penalty: i64) {
    state.player.take_damage(HIT_DAMAGE);
    state.session.add_points(penalty);
    state.events.push(GameEvent::PlayerHit { damage: HIT_DAMAGE });
}

fn player_bullets_vs_enemies(state: &mut GameState) {
    for bullet in state
        .projectiles
        .iter_mut()
        .filter(|p| p.alive && p.faction == Faction::Player)
    {
        // Every overlapping enemy takes damage; the bullet scores once
        let rect = bullet.rect;
        let mut struck = false;
        for enemy in state
            .enemies
            .iter_mut()
            .filter(|e| e.alive && e.rect.overlaps(&rect))
        {
            struck = true;
            if enemy.hit(HIT_DAMAGE) {
                state.events.push(GameEvent::EnemyKilled {
                    id: enemy.id,
                    archetype: enemy.archetype,
                    pos: enemy.rect.center,
                });
            }
        }
        if !struck {
            continue;
        }

        bullet.alive = false;
        state.session.add_points(hit_reward(&state.player));
        state.player.add_gauge(GAUGE_PER_HIT);

        if state.rng.random_bool(POWERUP_DROP_CHANCE) {
            let kind = PowerUpKind::random(&mut state.rng);
            state.queue.push(SpawnRequest::PowerUp {
                pos: bullet.rect.center,
                kind,
            });
        }
    }
}

fn player_vs_powerups(state: &mut GameState) {
    for powerup in state.powerups.iter_mut().filter(|p| p.alive) {
        if powerup.rect.overlaps(&state.player.rect) {
            powerup.alive = false;
            state.player.apply_powerup(powerup.kind);
            state
                .events
                .push(GameEvent::PowerupCollected { kind: powerup.kind });
        }
    }
}

fn player_vs_enemies(state: &mut GameState) {
    let player_rect = state.player.rect;
    let mut contacts = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        if enemy.rect.overlaps(&player_rect) {
            enemy.alive = false;
            contacts.push(GameEvent::EnemyKilled {
                id: enemy.id,
                archetype: enemy.archetype,
                pos: enemy.rect.center,
            });
        }
    }

    for event in contacts {
        state.events.push(event);
        if state.player.is_dashing() {
            parry(state);
        } else if !state.player.is_shielded() {
            damage_player(state, PENALTY_ENEMY_CONTACT);
        }
    }
}

/// Enemy and boss projectiles share one rule; only the penalty differs
fn hostile_bullets_vs_player(state: &mut GameState, faction: Faction, penalty: i64) {
    let player_rect = state.player.rect;
    let mut hits = 0;
    for bullet in state
        .projectiles
        .iter_mut()
        .filter(|p| p.alive && p.faction == faction)
    {
        if bullet.rect.overlaps(&player_rect) {
            bullet.alive = false;
            hits += 1;
        }
    }

    for _ in 0..hits {
        if state.player.is_dashing() {
            parry(state);
        } else if !state.player.is_shielded() {
            damage_player(state, penalty);
        }
    }
}

fn player_bullets_vs_boss(state: &mut GameState) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    for bullet in state
        .projectiles
        .iter_mut()
        .filter(|p| p.alive && p.faction == Faction::Player)
    {
        if !boss.vulnerable() || !boss.rect.overlaps(&bullet.rect) {
            continue;
        }
        bullet.alive = false;
        if boss.hit(HIT_DAMAGE) {
            log::info!("Boss {} destroyed", boss.id);
        }
        state.session.add_points(boss_hit_reward(&state.player));
        state.player.add_gauge(GAUGE_PER_HIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;
    use crate::sim::projectile::ProjectileSpawn;
    use crate::sim::state::PowerUp;
    use glam::Vec2;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(11)
    }

    /// Put an enemy fully on screen at `pos`
    fn place_enemy(state: &mut GameState, archetype: Archetype, pos: Vec2) -> u32 {
        let id = state.spawn_enemy(archetype, pos.x);
        if let Some(e) = state.enemies.iter_mut().find(|e| e.id == id) {
            e.rect.center = pos;
        }
        id
    }

    fn fire_at(state: &mut GameState, faction: Faction, pos: Vec2) -> u32 {
        let emitter = state.player.id;
        state.spawn(SpawnRequest::Projectile(ProjectileSpawn::straight(
            emitter,
            faction,
            pos,
            Vec2::new(10.0, 10.0),
            90.0,
            4.0,
        )))
    }

    #[test]
    fn test_overcharge_bonus_stacks_with_hit_score() {
        let mut player = Player::new(1);
        assert_eq!(hit_reward(&player), 50);
        player.overcharge.reset(10.0);
        assert_eq!(hit_reward(&player), 250);
        player.double_points.reset(10.0);
        assert_eq!(hit_reward(&player), 300);
        player.overcharge.clear();
        assert_eq!(hit_reward(&player), 100);
        // Boss hits and parries ignore overcharge
        player.overcharge.reset(10.0);
        assert_eq!(boss_hit_reward(&player), 200);
        assert_eq!(parry_reward(&player), 200);
    }

    #[test]
    fn test_overcharged_hit_on_tank_scores_250() {
        let mut s = state();
        s.player.overcharge.reset(OVERCHARGE_DURATION_TICKS);
        let id = place_enemy(&mut s, Archetype::Tank, Vec2::new(200.0, 200.0));
        fire_at(&mut s, Faction::Player, Vec2::new(200.0, 200.0));
        resolve(&mut s);
        assert_eq!(s.session.score, 250);
        assert_eq!(
            s.enemies.iter().find(|e| e.id == id).map(|e| e.health),
            Some(40)
        );
    }

    #[test]
    fn test_bullet_damages_every_overlapping_enemy_once_scored() {
        let mut s = state();
        let a = place_enemy(&mut s, Archetype::Normal, Vec2::new(200.0, 200.0));
        let b = place_enemy(&mut s, Archetype::Normal, Vec2::new(200.0, 200.0));
        let far = place_enemy(&mut s, Archetype::Normal, Vec2::new(400.0, 200.0));
        fire_at(&mut s, Faction::Player, Vec2::new(200.0, 200.0));
        resolve(&mut s);

        let health = |s: &GameState, id| s.enemies.iter().find(|e| e.id == id).map(|e| e.health);
        assert_eq!(health(&s, a), Some(10));
        assert_eq!(health(&s, b), Some(10));
        assert_eq!(health(&s, far), Some(20));
        assert_eq!(s.session.score, 50);
        assert_eq!(s.player.gauge, GAUGE_PER_HIT);
        assert!(s.projectiles.iter().all(|p| !p.alive));
    }

    #[test]
    fn test_hits_drop_powerups_about_one_in_ten() {
        let mut s = state();
        let pos = Vec2::new(200.0, 200.0);
        let id = place_enemy(&mut s, Archetype::Tank, pos);
        if let Some(e) = s.enemies.iter_mut().find(|e| e.id == id) {
            e.health = 100_000;
        }

        let hits = 1000;
        for _ in 0..hits {
            fire_at(&mut s, Faction::Player, pos);
            resolve(&mut s);
            s.projectiles.clear();
        }

        // Drops wait in the queue until the registry drains it
        assert!(s.powerups.is_empty());
        let drops = s.queue.len();
        assert!((60..=140).contains(&drops), "{drops} drops in {hits} hits");

        s.drain_spawn_queue();
        assert_eq!(s.powerups.len(), drops);
        assert!(s.powerups.iter().all(|p| p.alive && p.rect.center == pos));
    }

    #[test]
    fn test_powerup_pickup() {
        let mut s = state();
        let pos = s.player.rect.center;
        s.powerups.push(PowerUp::new(99, PowerUpKind::Shield, pos));
        resolve(&mut s);
        assert!(s.player.is_shielded());
        assert!(!s.powerups[0].alive);
        assert_eq!(
            s.events,
            vec![GameEvent::PowerupCollected {
                kind: PowerUpKind::Shield
            }]
        );
    }

    #[test]
    fn test_body_contact_damages_unshielded_player() {
        let mut s = state();
        s.session.score = 100;
        let pos = s.player.rect.center;
        place_enemy(&mut s, Archetype::Tank, pos);
        resolve(&mut s);
        assert!(s.enemies.iter().all(|e| !e.alive));
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH - HIT_DAMAGE);
        assert_eq!(s.session.score, 80);
    }

    #[test]
    fn test_body_contact_costs_once_per_enemy() {
        let mut s = state();
        s.session.score = 100;
        let pos = s.player.rect.center;
        place_enemy(&mut s, Archetype::Normal, pos);
        place_enemy(&mut s, Archetype::Normal, pos);
        resolve(&mut s);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH - 2 * HIT_DAMAGE);
        assert_eq!(s.session.score, 60);
    }

    #[test]
    fn test_shield_blocks_contact_but_enemy_still_dies() {
        let mut s = state();
        s.player.shield.reset(SHIELD_TICKS);
        let pos = s.player.rect.center;
        place_enemy(&mut s, Archetype::Tank, pos);
        resolve(&mut s);
        assert!(s.enemies.iter().all(|e| !e.alive));
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(s.session.score, 0);
    }

    #[test]
    fn test_dash_parries_enemy_bullet() {
        let mut s = state();
        s.player.dash.reset(DASH_DURATION_TICKS);
        let pos = s.player.rect.center;
        fire_at(&mut s, Faction::Enemy, pos);
        resolve(&mut s);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(s.session.score, SCORE_PARRY as u64);
        assert_eq!(s.player.gauge, GAUGE_PER_PARRY);
        assert!(s.events.contains(&GameEvent::Parry));
    }

    #[test]
    fn test_shielded_bullet_still_destroyed() {
        let mut s = state();
        s.player.shield.reset(SHIELD_TICKS);
        let pos = s.player.rect.center;
        fire_at(&mut s, Faction::Enemy, pos);
        resolve(&mut s);
        assert!(s.projectiles.iter().all(|p| !p.alive));
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_boss_bullet_penalty_floored() {
        let mut s = state();
        s.session.score = 20;
        let pos = s.player.rect.center;
        fire_at(&mut s, Faction::Boss, pos);
        resolve(&mut s);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH - HIT_DAMAGE);
        assert_eq!(s.session.score, 0);
    }

    #[test]
    fn test_boss_immune_during_entry() {
        let mut s = state();
        s.spawn_boss();
        let center = s.boss.as_ref().map(|b| b.rect.center).unwrap_or_default();
        fire_at(&mut s, Faction::Player, center);
        resolve(&mut s);
        assert_eq!(s.boss.as_ref().map(|b| b.health), Some(BOSS_BASE_HEALTH));
        assert_eq!(s.session.score, 0);
        assert!(s.projectiles[0].alive);

        if let Some(boss) = s.boss.as_mut() {
            boss.entering = false;
        }
        resolve(&mut s);
        assert_eq!(s.boss.as_ref().map(|b| b.health), Some(BOSS_BASE_HEALTH - 10));
        assert_eq!(s.session.score, SCORE_BOSS_HIT as u64);
    }

    #[test]
    fn test_player_bullet_ignores_player() {
        let mut s = state();
        let pos = s.player.rect.center;
        fire_at(&mut s, Faction::Player, pos);
        resolve(&mut s);
        assert!(s.projectiles[0].alive);
        assert_eq!(s.player.health, PLAYER_MAX_HEALTH);
    }

    #[derive(Debug, Clone)]
    enum Hazard {
        Enemy,
        EnemyBullet,
        BossBullet,
    }

    fn hazard() -> impl Strategy<Value = Hazard> {
        prop_oneof![
            Just(Hazard::Enemy),
            Just(Hazard::EnemyBullet),
            Just(Hazard::BossBullet),
        ]
    }

    proptest! {
        #[test]
        fn prop_health_and_score_stay_in_range(
            hazards in proptest::collection::vec(hazard(), 0..40),
            start_score in 0u64..200,
            start_health in 1i32..=PLAYER_MAX_HEALTH,
            shielded in any::<bool>(),
        ) {
            let mut s = state();
            s.session.score = start_score;
            s.player.health = start_health;
            if shielded {
                s.player.shield.reset(SHIELD_TICKS);
            }
            let pos = s.player.rect.center;
            for h in &hazards {
                match h {
                    Hazard::Enemy => { place_enemy(&mut s, Archetype::Normal, pos); }
                    Hazard::EnemyBullet => { fire_at(&mut s, Faction::Enemy, pos); }
                    Hazard::BossBullet => { fire_at(&mut s, Faction::Boss, pos); }
                }
            }
            resolve(&mut s);
            prop_assert!(s.player.health >= 0);
            prop_assert!(s.player.health <= s.player.max_health);
            if shielded {
                prop_assert_eq!(s.player.health, start_health);
            }
        }

        #[test]
        fn prop_parry_never_costs_health(
            hazards in proptest::collection::vec(hazard(), 1..20),
            double in any::<bool>(),
        ) {
            let mut s = state();
            s.player.dash.reset(DASH_DURATION_TICKS);
            if double {
                s.player.double_points.reset(DOUBLE_POINTS_TICKS);
            }
            let pos = s.player.rect.center;
            for h in &hazards {
                match h {
                    Hazard::Enemy => { place_enemy(&mut s, Archetype::Tank, pos); }
                    Hazard::EnemyBullet => { fire_at(&mut s, Faction::Enemy, pos); }
                    Hazard::BossBullet => { fire_at(&mut s, Faction::Boss, pos); }
                }
            }
            resolve(&mut s);
            let per_parry = if double { SCORE_PARRY_DOUBLE } else { SCORE_PARRY };
            prop_assert_eq!(s.player.health, PLAYER_MAX_HEALTH);
            prop_assert_eq!(s.session.score, per_parry as u64 * hazards.len() as u64);
            prop_assert!(s.player.gauge > 0);
        }
    }
}
