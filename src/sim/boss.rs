//! The phase boss: entry dive, horizontal patrol, randomized attack patterns

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::{BossPattern, boss_fire, choose_boss_pattern};
use super::rect::Rect;
use super::spawn::SpawnQueue;
use super::state::EntityId;
use super::timer::Countdown;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: EntityId,
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// True until the boss reaches its patrol depth; no damage, no fire
    pub entering: bool,
    pub fire_timer: Countdown,
    /// Most recent attack (for the renderer's tell)
    pub last_pattern: Option<BossPattern>,
    pub alive: bool,
}

impl Boss {
    /// Spawn above the playfield; health scales with the phase number
    pub fn spawn(id: EntityId, phase: u32) -> Self {
        let health = BOSS_BASE_HEALTH * phase.max(1) as i32;
        Self {
            id,
            rect: Rect::from_midtop(
                Vec2::new(SCREEN_WIDTH / 2.0, BOSS_SPAWN_TOP),
                Vec2::splat(BOSS_SIZE),
            ),
            health,
            max_health: health,
            speed: BOSS_PATROL_SPEED,
            direction: 1.0,
            entering: true,
            fire_timer: Countdown::new(BOSS_FIRE_INTERVAL_TICKS),
            last_pattern: None,
            alive: true,
        }
    }

    /// Whether player bullets can currently damage the boss
    pub fn vulnerable(&self) -> bool {
        self.alive && !self.entering
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        scale: f32,
        elapsed_ticks: u64,
        rng: &mut R,
        queue: &mut SpawnQueue,
    ) {
        if !self.alive {
            return;
        }

        if self.entering {
            self.rect.center.y += BOSS_ENTRY_SPEED * scale;
            if self.rect.top() >= BOSS_ENTRY_DEPTH {
                self.entering = false;
                log::debug!("Boss {} finished entry", self.id);
            }
            return;
        }

        self.rect.center.x += self.speed * scale * self.direction;
        if self.rect.left() <= 0.0 || self.rect.right() >= SCREEN_WIDTH {
            self.direction = -self.direction;
            self.rect.clamp_within(&Rect::playfield());
        }

        self.fire_timer.tick(scale);
        if self.fire_timer.expired() {
            let pattern = choose_boss_pattern(rng);
            boss_fire(pattern, self.id, &self.rect, elapsed_ticks, queue);
            self.last_pattern = Some(pattern);
            self.fire_timer.reset(BOSS_FIRE_INTERVAL_TICKS);
        }
    }

    /// Apply damage; returns true if this hit killed the boss
    pub fn hit(&mut self, damage: i32) -> bool {
        if !self.vulnerable() {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn entered_boss() -> Boss {
        let mut boss = Boss::spawn(2, 1);
        boss.entering = false;
        boss.rect.center.y = BOSS_ENTRY_DEPTH + BOSS_SIZE / 2.0;
        boss
    }

    #[test]
    fn test_health_scales_with_phase() {
        assert_eq!(Boss::spawn(1, 1).health, 1500);
        assert_eq!(Boss::spawn(1, 3).health, 4500);
    }

    #[test]
    fn test_entry_blocks_fire_and_damage() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut queue = SpawnQueue::default();
        let mut boss = Boss::spawn(2, 1);
        assert!(!boss.hit(HIT_DAMAGE));
        assert_eq!(boss.health, 1500);

        let mut ticks = 0;
        while boss.entering {
            boss.update(1.0, ticks, &mut rng, &mut queue);
            ticks += 1;
        }
        assert!(queue.is_empty());
        // Entry takes from top -100 to top 50 at one pixel per tick
        assert_eq!(ticks, 150);
        assert!(boss.vulnerable());
    }

    #[test]
    fn test_fires_every_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut queue = SpawnQueue::default();
        let mut boss = entered_boss();
        for t in 0..59 {
            boss.update(1.0, t, &mut rng, &mut queue);
        }
        assert!(queue.is_empty());
        boss.update(1.0, 59, &mut rng, &mut queue);
        assert!(!queue.is_empty());
        assert!(boss.last_pattern.is_some());
    }

    #[test]
    fn test_patrol_bounces_off_edges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut queue = SpawnQueue::default();
        let mut boss = entered_boss();
        boss.rect.center.x = SCREEN_WIDTH - BOSS_SIZE / 2.0 - 1.0;
        boss.update(1.0, 0, &mut rng, &mut queue);
        assert_eq!(boss.direction, -1.0);
        assert!(boss.rect.right() <= SCREEN_WIDTH);
    }

    #[test]
    fn test_hit_to_zero_kills() {
        let mut boss = entered_boss();
        boss.health = 10;
        assert!(boss.hit(HIT_DAMAGE));
        assert!(!boss.alive);
        assert!(!boss.vulnerable());
    }
}
