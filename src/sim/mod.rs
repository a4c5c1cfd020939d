//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order everywhere)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entities;
pub mod geom;
pub mod level;
pub mod particles;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod render;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Side, resolve_aabb};
pub use entities::{Collectible, Enemy, EnemyKind, Facing, Platform};
pub use geom::Aabb;
pub use level::LevelLayout;
pub use particles::{EffectSink, Particle, ParticleKind, ParticleSystem};
pub use player::Player;
pub use pool::BoundedPool;
pub use projectile::{Projectile, ProjectileManager, ViewWindow};
pub use render::{RenderDescriptor, RenderInstance, RenderKind, snapshot};
pub use state::{Camera, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
