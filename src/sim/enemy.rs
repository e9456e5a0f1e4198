//! Enemy ships and the archetype table

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pattern::{FirePattern, MovementPattern, enemy_fire, movement_step};
use super::rect::Rect;
use super::spawn::SpawnQueue;
use super::state::EntityId;
use super::timer::Countdown;
use crate::consts::*;

/// Enemy archetypes; each fixes a movement + fire pairing and base stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Normal,
    Turret,
    Tank,
    Fast,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Normal,
        Archetype::Turret,
        Archetype::Tank,
        Archetype::Fast,
    ];

    fn index(self) -> usize {
        match self {
            Archetype::Normal => 0,
            Archetype::Turret => 1,
            Archetype::Tank => 2,
            Archetype::Fast => 3,
        }
    }

    /// Pick an archetype uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Stats, patterns and sprite metadata for one archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeProfile {
    pub health: i32,
    pub speed: f32,
    pub movement: MovementPattern,
    pub fire: FirePattern,
    pub size: Vec2,
    /// Number of interchangeable sprites the renderer has for this archetype
    pub sprite_variants: u8,
}

/// Read-only table injected into the registry at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeTable {
    profiles: [ArchetypeProfile; 4],
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        Self {
            profiles: [
                ArchetypeProfile {
                    health: 20,
                    speed: 2.0,
                    movement: MovementPattern::Vertical,
                    fire: FirePattern::Direct,
                    size: Vec2::new(42.0, 36.0),
                    sprite_variants: 4,
                },
                ArchetypeProfile {
                    health: 30,
                    speed: 0.0,
                    movement: MovementPattern::Vertical,
                    fire: FirePattern::SineWave,
                    size: Vec2::new(72.0, 81.0),
                    sprite_variants: 3,
                },
                ArchetypeProfile {
                    health: 50,
                    speed: 1.0,
                    movement: MovementPattern::Slow,
                    fire: FirePattern::RandomSpread,
                    size: Vec2::new(69.0, 52.0),
                    sprite_variants: 2,
                },
                ArchetypeProfile {
                    health: 10,
                    speed: 4.0,
                    movement: MovementPattern::ZigZag,
                    fire: FirePattern::MineDrop,
                    size: Vec2::new(48.0, 30.0),
                    sprite_variants: 3,
                },
            ],
        }
    }
}

impl ArchetypeTable {
    pub fn get(&self, archetype: Archetype) -> &ArchetypeProfile {
        &self.profiles[archetype.index()]
    }

    /// Replace one archetype's profile
    pub fn with_profile(mut self, archetype: Archetype, profile: ArchetypeProfile) -> Self {
        self.profiles[archetype.index()] = profile;
        self
    }
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub archetype: Archetype,
    pub rect: Rect,
    pub health: i32,
    pub speed: f32,
    pub movement: MovementPattern,
    pub fire: FirePattern,
    /// Ticks between volleys
    pub fire_interval: f32,
    pub fire_cooldown: Countdown,
    /// Scaled ticks since the enemy came on screen (drives zig-zag and jump)
    pub age: f32,
    /// Sprite variant chosen at spawn (cosmetic)
    pub sprite: u8,
    pub alive: bool,
}

impl Enemy {
    /// Spawn just above the playfield, horizontally centred on `x`
    pub fn spawn<R: Rng + ?Sized>(
        id: EntityId,
        archetype: Archetype,
        x: f32,
        table: &ArchetypeTable,
        rng: &mut R,
    ) -> Self {
        let profile = table.get(archetype);
        let fire_interval =
            rng.random_range(ENEMY_FIRE_INTERVAL_MIN..=ENEMY_FIRE_INTERVAL_MAX) as f32;
        let offset = rng.random_range(0..=ENEMY_FIRE_OFFSET_MAX) as f32;
        let sprite = rng.random_range(0..profile.sprite_variants.max(1));

        Self {
            id,
            archetype,
            rect: Rect::from_midtop(Vec2::new(x, ENEMY_SPAWN_TOP), profile.size),
            health: profile.health,
            speed: profile.speed,
            movement: profile.movement,
            fire: profile.fire,
            fire_interval,
            fire_cooldown: Countdown::new(fire_interval - offset),
            age: 0.0,
            sprite,
            alive: true,
        }
    }

    /// Still sliding in from above the playfield
    pub fn is_entering(&self) -> bool {
        self.rect.top() < 0.0
    }

    /// Move, count down the fire cooldown, and fire at `target` when ready
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        scale: f32,
        target: Vec2,
        rng: &mut R,
        queue: &mut SpawnQueue,
    ) {
        if !self.alive {
            return;
        }

        if self.is_entering() {
            self.rect.center.y += ENEMY_ENTRY_SPEED * scale;
            return;
        }

        self.age += scale;
        self.rect.center += movement_step(self.movement, self.speed, self.age) * scale;
        if self.rect.top() > SCREEN_HEIGHT {
            self.alive = false;
            return;
        }

        self.fire_cooldown.tick(scale);
        if self.fire_cooldown.expired() {
            enemy_fire(self.fire, self.id, &self.rect, target, rng, queue);
            self.fire_cooldown.reset(self.fire_interval);
        }
    }

    /// Apply damage; returns true if this hit killed the enemy
    pub fn hit(&mut self, damage: i32) -> bool {
        if !self.alive {
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
