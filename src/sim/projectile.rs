//! Projectile family: bullets, spiral shots, charged balls and mines
//!
//! One tagged enum carries the kind-specific payload; a single `update`
//! dispatches on it. Detonating kinds push their children onto the spawn
//! queue instead of reaching into any container themselves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::SpawnQueue;
use super::state::{EntityId, EntityKind};
use super::timer::Countdown;
use crate::consts::*;
use crate::heading;

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
    Boss,
}

/// Children released when a mine or charged ball detonates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Burst {
    pub count: u32,
    pub speed: f32,
    pub size: Vec2,
}

impl Burst {
    /// Eight bullets at 45° steps
    pub fn radial(size: Vec2) -> Self {
        Self::radial_at(size, BURST_SPEED)
    }

    pub fn radial_at(size: Vec2, speed: f32) -> Self {
        Self {
            count: BURST_COUNT,
            speed,
            size,
        }
    }

    /// Angle in degrees of child `i`
    pub fn angle_of(&self, i: u32) -> f32 {
        360.0 / self.count as f32 * i as f32
    }
}

/// Kind-specific projectile state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Constant velocity
    Straight { vel: Vec2 },
    /// Orbits outward from a fixed spawn centre along `angle` (degrees)
    Spiral {
        center: Vec2,
        angle: f32,
        radius: f32,
        growth: f32,
    },
    /// One spoke of a radial burst
    Ring { vel: Vec2 },
    /// Slow pulsing ball that detonates after its fuse
    ChargedBall {
        vel: Vec2,
        pulse: f32,
        fuse: Countdown,
        burst: Burst,
    },
    /// Stationary, bobbing mine that detonates after its fuse
    Mine {
        fuse: Countdown,
        bob: f32,
        amplitude: f32,
        burst: Burst,
    },
}

/// Everything needed to create a projectile; the registry assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpawn {
    pub emitter: EntityId,
    pub faction: Faction,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ProjectileKind,
}

impl ProjectileSpawn {
    /// Straight bullet travelling at `angle` degrees
    pub fn straight(
        emitter: EntityId,
        faction: Faction,
        pos: Vec2,
        size: Vec2,
        angle: f32,
        speed: f32,
    ) -> Self {
        Self {
            emitter,
            faction,
            pos,
            size,
            kind: ProjectileKind::Straight {
                vel: heading(angle) * speed,
            },
        }
    }
}

/// A live projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Attribution only; never dereferenced for live state
    pub emitter: EntityId,
    pub faction: Faction,
    pub rect: Rect,
    pub kind: ProjectileKind,
    pub alive: bool,
}

impl Projectile {
    pub fn from_spawn(id: EntityId, spawn: ProjectileSpawn) -> Self {
        Self {
            id,
            emitter: spawn.emitter,
            faction: spawn.faction,
            rect: Rect::new(spawn.pos, spawn.size),
            kind: spawn.kind,
            alive: true,
        }
    }

    /// Kind reported to the renderer
    pub fn entity_kind(&self) -> EntityKind {
        match (self.faction, &self.kind) {
            (Faction::Player, _) => EntityKind::PlayerBullet,
            (Faction::Enemy, ProjectileKind::Mine { .. }) => EntityKind::EnemyMine,
            (Faction::Enemy, _) => EntityKind::EnemyBullet,
            (Faction::Boss, _) => EntityKind::BossBullet,
        }
    }

    /// Visual pulse scale (1.0 for everything but charged balls)
    pub fn pulse_scale(&self) -> f32 {
        match self.kind {
            ProjectileKind::ChargedBall { pulse, .. } => 1.0 + 0.1 * pulse.sin(),
            _ => 1.0,
        }
    }

    /// Distance from the spiral's spawn centre, if this is a spiral bullet
    pub fn spiral_radius(&self) -> Option<f32> {
        match self.kind {
            ProjectileKind::Spiral { radius, .. } => Some(radius),
            _ => None,
        }
    }

    /// Advance one tick. Detonation children are pushed onto `queue`.
    pub fn update(&mut self, scale: f32, queue: &mut SpawnQueue) {
        if !self.alive {
            return;
        }

        let mut detonation = None;
        match &mut self.kind {
            ProjectileKind::Straight { vel } | ProjectileKind::Ring { vel } => {
                self.rect.center += *vel * scale;
            }
            ProjectileKind::Spiral {
                center,
                angle,
                radius,
                growth,
            } => {
                *radius += *growth * scale;
                self.rect.center = *center + heading(*angle) * *radius;
                if *radius > SPIRAL_MAX_RADIUS {
                    self.alive = false;
                }
            }
            ProjectileKind::ChargedBall {
                vel,
                pulse,
                fuse,
                burst,
            } => {
                *pulse += CHARGED_BALL_PULSE_STEP * scale;
                fuse.tick(scale);
                self.rect.center += *vel * scale;
                if fuse.expired() {
                    detonation = Some(*burst);
                }
            }
            ProjectileKind::Mine {
                fuse,
                bob,
                amplitude,
                burst,
            } => {
                fuse.tick(scale);
                if fuse.expired() {
                    detonation = Some(*burst);
                } else {
                    self.rect.center.y += bob.sin() * *amplitude * scale;
                    *bob += scale / 30.0;
                }
            }
        }

        if let Some(burst) = detonation {
            self.detonate(burst, queue);
            return;
        }

        // Spirals are bounded by radius alone
        let bounded = !matches!(self.kind, ProjectileKind::Spiral { .. });
        if self.alive && bounded && !self.rect.overlaps(&Rect::despawn_bounds()) {
            self.alive = false;
        }
    }

    fn detonate(&mut self, burst: Burst, queue: &mut SpawnQueue) {
        for i in 0..burst.count {
            queue.push_projectile(ProjectileSpawn::straight(
                self.emitter,
                self.faction,
                self.rect.center,
                burst.size,
                burst.angle_of(i),
                burst.speed,
            ));
        }
        self.alive = false;
    }
}
