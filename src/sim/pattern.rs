//! Movement and attack patterns for enemies and the boss
//!
//! Every firing function is a pure function of its tag plus an injected RNG;
//! the produced projectiles go onto the spawn queue.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::{Burst, Faction, ProjectileKind, ProjectileSpawn};
use super::rect::Rect;
use super::spawn::SpawnQueue;
use super::state::EntityId;
use super::timer::Countdown;
use crate::consts::*;
use crate::{angle_toward, heading, normalize_degrees};

/// How an enemy moves once it is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPattern {
    Vertical,
    ZigZag,
    Slow,
    Jump,
}

/// How an enemy fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirePattern {
    Direct,
    Fan,
    RandomSpread,
    SineWave,
    MineDrop,
}

/// Boss attack, picked uniformly at every fire interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossPattern {
    Basic,
    Spiral,
    Ring,
    ChargedBall,
}

impl BossPattern {
    pub const ALL: [BossPattern; 4] = [
        BossPattern::Basic,
        BossPattern::Spiral,
        BossPattern::Ring,
        BossPattern::ChargedBall,
    ];
}

/// Angular offsets from straight down for the fan volley
pub const FAN_OFFSETS: [f32; 5] = [-30.0, -15.0, 0.0, 15.0, 30.0];
/// Horizontal muzzle offsets for the sine-wave volley
pub const SINE_OFFSETS: [f32; 5] = [-80.0, -40.0, 0.0, 40.0, 80.0];
/// Spiral bullets per volley
pub const SPIRAL_ARMS: u32 = 8;

/// Displacement for one full-speed tick. `age` is the enemy's scaled tick count.
pub fn movement_step(pattern: MovementPattern, speed: f32, age: f32) -> Vec2 {
    // Every pattern shares the base drift
    let drift = speed;
    match pattern {
        MovementPattern::Vertical => Vec2::new(0.0, drift + speed),
        MovementPattern::ZigZag => Vec2::new(3.0 * (age / 12.0).sin(), drift + speed),
        MovementPattern::Slow => Vec2::new(0.0, drift + speed / 2.0),
        MovementPattern::Jump => Vec2::new(0.0, drift + speed + 2.0 * (age / 18.0).sin().abs()),
    }
}

fn enemy_bullet_size() -> Vec2 {
    Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT)
}

fn boss_bullet_size() -> Vec2 {
    Vec2::new(BOSS_BULLET_WIDTH, BOSS_BULLET_HEIGHT)
}

fn enemy_bullet(emitter: EntityId, pos: Vec2, angle: f32) -> ProjectileSpawn {
    ProjectileSpawn::straight(
        emitter,
        Faction::Enemy,
        pos,
        enemy_bullet_size(),
        angle,
        ENEMY_BULLET_SPEED,
    )
}

/// Fire one enemy volley from `body` at a player centred on `target`
pub fn enemy_fire<R: Rng + ?Sized>(
    pattern: FirePattern,
    emitter: EntityId,
    body: &Rect,
    target: Vec2,
    rng: &mut R,
    queue: &mut SpawnQueue,
) {
    let muzzle = body.midbottom();
    match pattern {
        FirePattern::Direct => {
            let angle = angle_toward(body.center, target);
            queue.push_projectile(enemy_bullet(emitter, muzzle, angle));
        }
        FirePattern::Fan => {
            for offset in FAN_OFFSETS {
                queue.push_projectile(enemy_bullet(emitter, muzzle, 90.0 + offset));
            }
        }
        FirePattern::RandomSpread => {
            for _ in 0..3 {
                let angle = rng.random_range(60..=120) as f32;
                queue.push_projectile(enemy_bullet(emitter, muzzle, angle));
            }
        }
        FirePattern::SineWave => {
            for offset in SINE_OFFSETS {
                // Aim at a focus one unit below and offset/50 units aside
                let angle = 1.0_f32.atan2(offset / 50.0).to_degrees();
                let pos = Vec2::new(muzzle.x + offset, muzzle.y);
                queue.push_projectile(enemy_bullet(emitter, pos, angle));
            }
        }
        FirePattern::MineDrop => {
            queue.push_projectile(ProjectileSpawn {
                emitter,
                faction: Faction::Enemy,
                pos: muzzle,
                size: Vec2::new(MINE_WIDTH, MINE_HEIGHT),
                kind: ProjectileKind::Mine {
                    fuse: Countdown::new(MINE_FUSE_TICKS),
                    bob: 0.0,
                    amplitude: MINE_FLOAT_AMPLITUDE,
                    burst: Burst::radial(enemy_bullet_size()),
                },
            });
        }
    }
}

/// Pick a boss attack uniformly
pub fn choose_boss_pattern<R: Rng + ?Sized>(rng: &mut R) -> BossPattern {
    BossPattern::ALL[rng.random_range(0..BossPattern::ALL.len())]
}

/// Spiral base angle derived from elapsed simulated milliseconds
pub fn spiral_base_angle(elapsed_ticks: u64) -> f32 {
    let elapsed_ms = elapsed_ticks * 1000 / TICK_RATE as u64;
    (elapsed_ms % 360) as f32
}

/// Fire one boss volley
pub fn boss_fire(
    pattern: BossPattern,
    emitter: EntityId,
    body: &Rect,
    elapsed_ticks: u64,
    queue: &mut SpawnQueue,
) {
    match pattern {
        BossPattern::Basic => {
            let size = boss_bullet_size();
            let pos = body.midbottom() + Vec2::new(0.0, size.y / 2.0);
            queue.push_projectile(ProjectileSpawn::straight(
                emitter,
                Faction::Boss,
                pos,
                size,
                90.0,
                BOSS_BULLET_SPEED,
            ));
        }
        BossPattern::Spiral => {
            let base = spiral_base_angle(elapsed_ticks);
            for i in 0..SPIRAL_ARMS {
                queue.push_projectile(ProjectileSpawn {
                    emitter,
                    faction: Faction::Boss,
                    pos: body.center,
                    size: boss_bullet_size(),
                    kind: ProjectileKind::Spiral {
                        center: body.center,
                        angle: normalize_degrees(base + 45.0 * i as f32),
                        radius: 0.0,
                        growth: SPIRAL_GROWTH,
                    },
                });
            }
        }
        BossPattern::Ring => ring(emitter, body.center, RING_BULLETS, queue),
        BossPattern::ChargedBall => {
            queue.push_projectile(ProjectileSpawn {
                emitter,
                faction: Faction::Boss,
                pos: body.midbottom(),
                size: Vec2::splat(CHARGED_BALL_SIZE),
                kind: ProjectileKind::ChargedBall {
                    vel: Vec2::new(0.0, CHARGED_BALL_SPEED),
                    pulse: 0.0,
                    fuse: Countdown::new(CHARGED_BALL_FUSE_TICKS),
                    burst: Burst::radial_at(boss_bullet_size(), CHARGED_BURST_SPEED),
                },
            });
        }
    }
}

/// Full radial burst of `count` bullets at `360/count * i` degrees
pub fn ring(emitter: EntityId, origin: Vec2, count: u32, queue: &mut SpawnQueue) {
    if count == 0 {
        return;
    }
    for i in 0..count {
        let angle = 360.0 / count as f32 * i as f32;
        queue.push_projectile(ProjectileSpawn {
            emitter,
            faction: Faction::Boss,
            pos: origin,
            size: boss_bullet_size(),
            kind: ProjectileKind::Ring {
                vel: heading(angle) * BOSS_BULLET_SPEED,
            },
        });
    }
}
