//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod enemy;
pub mod pattern;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use boss::Boss;
pub use enemy::{Archetype, ArchetypeProfile, ArchetypeTable, Enemy};
pub use pattern::{BossPattern, FirePattern, MovementPattern};
pub use player::Player;
pub use projectile::{Faction, Projectile, ProjectileKind, ProjectileSpawn};
pub use rect::Rect;
pub use session::{GameMode, Session};
pub use snapshot::{Hud, RenderItem, Visual, hud, render_items};
pub use spawn::{SpawnQueue, SpawnRequest};
pub use state::{EntityId, EntityKind, GameEvent, GameState, PowerUp, PowerUpKind};
pub use tick::{TickInput, tick};
pub use timer::Countdown;
