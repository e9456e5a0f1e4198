//! The player's ship: movement, firing, dash, overcharge and buff timers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::{Faction, ProjectileSpawn};
use super::rect::Rect;
use super::spawn::SpawnQueue;
use super::state::{EntityId, PowerUpKind};
use super::tick::TickInput;
use super::timer::Countdown;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub rect: Rect,
    pub health: i32,
    pub max_health: i32,
    pub shield: Countdown,
    pub speed_boost: Countdown,
    pub double_shot: Countdown,
    pub double_points: Countdown,
    /// Overcharge gauge, 0..=OVERCHARGE_MAX
    pub gauge: u32,
    /// Active while not expired
    pub overcharge: Countdown,
    /// Active while not expired
    pub dash: Countdown,
    pub dash_cooldown: Countdown,
    pub fire_cooldown: Countdown,
    /// Last non-zero steering direction (unit length)
    pub facing: Vec2,
}

impl Player {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            rect: Rect::new(
                Vec2::new(SCREEN_WIDTH / 2.0, PLAYER_SPAWN_Y),
                Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            ),
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            shield: Countdown::default(),
            speed_boost: Countdown::default(),
            double_shot: Countdown::default(),
            double_points: Countdown::default(),
            gauge: 0,
            overcharge: Countdown::default(),
            dash: Countdown::default(),
            dash_cooldown: Countdown::default(),
            fire_cooldown: Countdown::default(),
            facing: Vec2::ZERO,
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.active()
    }

    pub fn is_overcharged(&self) -> bool {
        self.overcharge.active()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield.active()
    }

    pub fn has_double_points(&self) -> bool {
        self.double_points.active()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Time scale the rest of the world runs at this tick
    pub fn time_scale(&self) -> f32 {
        if self.is_overcharged() {
            OVERCHARGE_TIME_SCALE
        } else {
            1.0
        }
    }

    fn move_speed(&self) -> f32 {
        if self.is_overcharged() || self.speed_boost.active() {
            PLAYER_SPEED * PLAYER_BOOST_FACTOR
        } else {
            PLAYER_SPEED
        }
    }

    /// Advance one tick. The player always runs at full speed.
    pub fn update(&mut self, input: &TickInput, queue: &mut SpawnQueue) {
        let mut direction = Vec2::ZERO;
        if input.left {
            direction.x -= 1.0;
        }
        if input.right {
            direction.x += 1.0;
        }
        if input.up {
            direction.y -= 1.0;
        }
        if input.down {
            direction.y += 1.0;
        }
        if direction != Vec2::ZERO {
            self.facing = direction.normalize();
        }

        if input.overcharge && self.gauge >= OVERCHARGE_MAX && !self.is_overcharged() {
            self.overcharge.reset(OVERCHARGE_DURATION_TICKS);
            self.gauge = 0;
            log::debug!("Overcharge engaged");
        }

        if input.dash && self.dash_cooldown.expired() {
            self.dash.reset(DASH_DURATION_TICKS);
            self.dash_cooldown.reset(DASH_COOLDOWN_TICKS);
        }

        let speed = self.move_speed();
        if self.is_dashing() {
            self.rect.center += self.facing * speed * DASH_SPEED_FACTOR;
            self.dash.tick(1.0);
        } else {
            self.rect.center += direction * speed;
        }
        self.rect.clamp_within(&Rect::playfield());

        let (dash_drain, fire_drain) = if self.is_overcharged() {
            (OVERCHARGE_DASH_DRAIN, OVERCHARGE_FIRE_DRAIN)
        } else {
            (1.0, 1.0)
        };
        self.overcharge.tick(1.0);
        self.dash_cooldown.tick(dash_drain);
        self.fire_cooldown.tick(fire_drain);
        self.shield.tick(1.0);
        self.speed_boost.tick(1.0);
        self.double_shot.tick(1.0);
        self.double_points.tick(1.0);

        if input.fire && self.fire_cooldown.expired() {
            self.shoot(queue);
        }
    }

    /// Horizontal muzzle offsets for the current buffs
    pub fn muzzle_offsets(&self) -> &'static [f32] {
        match (self.double_shot.active(), self.is_overcharged()) {
            (true, true) => &[-DOUBLE_SHOT_SPREAD, DOUBLE_SHOT_SPREAD, 0.0],
            (true, false) | (false, true) => &[-DOUBLE_SHOT_SPREAD, DOUBLE_SHOT_SPREAD],
            (false, false) => &[0.0],
        }
    }

    fn shoot(&mut self, queue: &mut SpawnQueue) {
        let nose = Vec2::new(self.rect.center.x, self.rect.top());
        for &offset in self.muzzle_offsets() {
            queue.push_projectile(ProjectileSpawn::straight(
                self.id,
                Faction::Player,
                nose + Vec2::new(offset, 0.0),
                Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
                -90.0,
                PLAYER_BULLET_SPEED,
            ));
        }
        self.fire_cooldown.reset(FIRE_COOLDOWN_TICKS);
    }

    /// Subtract health, clamped at zero
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, self.max_health);
    }

    pub fn add_gauge(&mut self, amount: u32) {
        self.gauge = (self.gauge + amount).min(OVERCHARGE_MAX);
    }

    /// Drop the gauge and end any active overcharge
    pub fn reset_overcharge(&mut self) {
        self.gauge = 0;
        self.overcharge.clear();
    }

    /// Apply a collected power-up; timers restart at their full duration
    pub fn apply_powerup(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.health = (self.health + HEALTH_PICKUP_AMOUNT).min(self.max_health);
            }
            PowerUpKind::Shoot => self.double_shot.reset(DOUBLE_SHOT_TICKS),
            PowerUpKind::Speed => self.speed_boost.reset(SPEED_BOOST_TICKS),
            PowerUpKind::Shield => self.shield.reset(SHIELD_TICKS),
            PowerUpKind::DoublePoints => self.double_points.reset(DOUBLE_POINTS_TICKS),
        }
    }
}
