//! Game state and entity registry
//!
//! The registry exclusively owns every entity. Updates only mark entities
//! dead; removal happens in `purge_dead`, and insertions requested during a
//! tick go through the spawn queue.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::enemy::{Archetype, ArchetypeTable, Enemy};
use super::player::Player;
use super::projectile::Projectile;
use super::rect::Rect;
use super::session::Session;
use super::spawn::{SpawnQueue, SpawnRequest};
use super::tick::TickInput;
use crate::consts::*;
use crate::persistence::{SaveEvent, SaveSeed};

/// Stable identifier for any entity
pub type EntityId = u32;

/// Entity kinds as seen by collaborators (renderer, audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    PlayerShip,
    EnemyShip,
    BossShip,
    PlayerBullet,
    EnemyBullet,
    EnemyMine,
    BossBullet,
    PowerUp,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Shoot,
    Speed,
    Shield,
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Shoot,
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::DoublePoints,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A drifting power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: EntityId,
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub speed: f32,
    /// Animation phase (cosmetic only)
    pub anim: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn new(id: EntityId, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(pos, Vec2::splat(POWERUP_SIZE)),
            speed: POWERUP_DRIFT_SPEED,
            anim: 0.0,
            alive: true,
        }
    }

    pub fn update(&mut self, scale: f32) {
        if !self.alive {
            return;
        }
        self.rect.center.y += self.speed * scale;
        self.anim += scale;
        if self.rect.top() > SCREEN_HEIGHT {
            self.alive = false;
        }
    }
}

/// Discrete notifications for audio/menu collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled {
        id: EntityId,
        archetype: Archetype,
        pos: Vec2,
    },
    PowerupCollected {
        kind: PowerUpKind,
    },
    BossAlertStarted,
    BossSpawned {
        phase: u32,
    },
    BossDefeated {
        phase: u32,
    },
    PhaseCompleted {
        phase: u32,
        next_phase: u32,
    },
    PlayerDied {
        score: u64,
    },
    PlayerHit {
        damage: i32,
    },
    Parry,
    NewHighScore {
        score: u64,
    },
}

impl GameEvent {
    /// Event name used by the audio/menu layer
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::EnemyKilled { .. } => "enemy_killed",
            GameEvent::PowerupCollected { .. } => "powerup_collected",
            GameEvent::BossAlertStarted => "boss_alert_started",
            GameEvent::BossSpawned { .. } => "boss_spawned",
            GameEvent::BossDefeated { .. } => "boss_defeated",
            GameEvent::PhaseCompleted { .. } => "phase_completed",
            GameEvent::PlayerDied { .. } => "player_died",
            GameEvent::PlayerHit { .. } => "player_hit",
            GameEvent::Parry => "parry",
            GameEvent::NewHighScore { .. } => "new_high_score",
        }
    }
}

/// Complete game state: entity registry plus session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    /// Every live projectile regardless of faction (sorted by id)
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub session: Session,
    /// Read-only archetype data injected at startup
    pub archetypes: ArchetypeTable,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
    /// Save requests raised during the last tick
    pub saves: Vec<SaveEvent>,
    pub(crate) queue: SpawnQueue,
    next_id: EntityId,
}

impl GameState {
    /// Fresh session: phase 1, nothing unlocked beyond it, no high score
    pub fn new(seed: u64) -> Self {
        Self::from_save(seed, SaveSeed::default(), ArchetypeTable::default())
    }

    /// Session seeded from persisted progress and high score
    pub fn from_save(seed: u64, save: SaveSeed, archetypes: ArchetypeTable) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            player: Player::new(0),
            enemies: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            powerups: Vec::new(),
            session: Session::new(&save),
            archetypes,
            events: Vec::new(),
            saves: Vec::new(),
            queue: SpawnQueue::default(),
            next_id: 1,
        };
        let player_id = state.next_entity_id();
        state.player = Player::new(player_id);
        log::info!(
            "Session start: seed={} phase={} unlocked={:?} high_score={}",
            seed,
            state.session.phase,
            state.session.unlocked,
            state.session.high_score.best()
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an entity immediately and return its id
    pub fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        let id = self.next_entity_id();
        match request {
            SpawnRequest::Projectile(spawn) => {
                self.projectiles.push(Projectile::from_spawn(id, spawn));
            }
            SpawnRequest::PowerUp { pos, kind } => {
                self.powerups.push(PowerUp::new(id, kind, pos));
            }
        }
        id
    }

    /// Spawn an enemy of `archetype` centred horizontally on `x`
    pub fn spawn_enemy(&mut self, archetype: Archetype, x: f32) -> EntityId {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, archetype, x, &self.archetypes, &mut self.rng);
        self.enemies.push(enemy);
        id
    }

    /// Spawn a random archetype at a random x
    pub fn spawn_random_enemy(&mut self) -> EntityId {
        let archetype = Archetype::random(&mut self.rng);
        let x = self
            .rng
            .random_range(ENEMY_SPAWN_MARGIN..=SCREEN_WIDTH - ENEMY_SPAWN_MARGIN);
        self.spawn_enemy(archetype, x)
    }

    /// Spawn this phase's boss, replacing any previous one
    pub fn spawn_boss(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let boss = Boss::spawn(id, self.session.phase);
        log::info!("Boss {} spawned for phase {} ({} hp)", id, self.session.phase, boss.health);
        self.boss = Some(boss);
        id
    }

    /// Mark an entity dead. Unknown or already-dead ids are a no-op.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if let Some(e) = self.enemies.iter_mut().find(|e| e.id == id && e.alive) {
            e.alive = false;
            return true;
        }
        if let Some(p) = self.projectiles.iter_mut().find(|p| p.id == id && p.alive) {
            p.alive = false;
            return true;
        }
        if let Some(p) = self.powerups.iter_mut().find(|p| p.id == id && p.alive) {
            p.alive = false;
            return true;
        }
        if let Some(boss) = self.boss.as_mut().filter(|b| b.id == id && b.alive) {
            boss.alive = false;
            return true;
        }
        false
    }

    /// Kind of a live entity, if it exists
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        if self.player.id == id {
            return Some(EntityKind::PlayerShip);
        }
        if self.enemies.iter().any(|e| e.id == id && e.alive) {
            return Some(EntityKind::EnemyShip);
        }
        if self.boss.as_ref().is_some_and(|b| b.id == id && b.alive) {
            return Some(EntityKind::BossShip);
        }
        if let Some(p) = self.projectiles.iter().find(|p| p.id == id && p.alive) {
            return Some(p.entity_kind());
        }
        if self.powerups.iter().any(|p| p.id == id && p.alive) {
            return Some(EntityKind::PowerUp);
        }
        None
    }

    /// Apply this tick's input to the player, who always runs at full speed
    pub fn update_player(&mut self, input: &TickInput) {
        self.player.update(input, &mut self.queue);
    }

    /// Advance every other live entity exactly once at the given time scale
    pub fn advance_world(&mut self, scale: f32) {
        let target = self.player.rect.center;
        for enemy in &mut self.enemies {
            enemy.update(scale, target, &mut self.rng, &mut self.queue);
        }
        if let Some(boss) = self.boss.as_mut() {
            boss.update(scale, self.time_ticks, &mut self.rng, &mut self.queue);
        }
        for projectile in &mut self.projectiles {
            projectile.update(scale, &mut self.queue);
        }
        for powerup in &mut self.powerups {
            powerup.update(scale);
        }
    }

    /// Remove every entity marked dead
    pub fn purge_dead(&mut self) {
        self.enemies.retain(|e| e.alive);
        self.projectiles.retain(|p| p.alive);
        self.powerups.retain(|p| p.alive);
        if self.boss.as_ref().is_some_and(|b| !b.alive) {
            self.boss = None;
        }
    }

    /// Insert everything requested during this tick
    pub fn drain_spawn_queue(&mut self) {
        let requests: Vec<SpawnRequest> = self.queue.drain().collect();
        for request in requests {
            self.spawn(request);
        }
    }

    /// Drop enemies, boss, projectiles, power-ups and pending spawns
    pub fn clear_transient(&mut self) {
        self.enemies.clear();
        self.boss = None;
        self.projectiles.clear();
        self.powerups.clear();
        self.queue.clear();
    }

    /// Total live entities including the player
    pub fn entity_count(&self) -> usize {
        1 + self.enemies.len()
            + self.boss.iter().count()
            + self.projectiles.len()
            + self.powerups.len()
    }

    /// Restart after game over; unlocked phases are kept
    pub fn restart(&mut self) {
        super::session::restart(self);
    }

    /// Jump to an already-unlocked phase and restart there
    pub fn select_phase(&mut self, phase: u32) -> bool {
        if !self.session.unlocked.contains(&phase) {
            log::warn!("Phase {} is locked", phase);
            return false;
        }
        self.session.phase = phase;
        self.restart();
        true
    }
}
