//! Spawn-request queue
//!
//! Entity updates never insert into the registry directly. They push requests
//! here and the registry drains the queue once per tick.

use glam::Vec2;

use super::projectile::ProjectileSpawn;
use super::state::PowerUpKind;

#[derive(Debug, Clone, PartialEq)]
pub enum SpawnRequest {
    Projectile(ProjectileSpawn),
    PowerUp { pos: Vec2, kind: PowerUpKind },
}

#[derive(Debug, Clone, Default)]
pub struct SpawnQueue {
    requests: Vec<SpawnRequest>,
}

impl SpawnQueue {
    pub fn push(&mut self, request: SpawnRequest) {
        self.requests.push(request);
    }

    pub fn push_projectile(&mut self, spawn: ProjectileSpawn) {
        self.requests.push(SpawnRequest::Projectile(spawn));
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Take every pending request in insertion order
    pub fn drain(&mut self) -> impl Iterator<Item = SpawnRequest> + '_ {
        self.requests.drain(..)
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}
