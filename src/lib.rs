//! Ember Run - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `score`: Score accumulation and persisted best score
//! - `persistence`: Key/value storage seam (LocalStorage on web)
//! - `platform`: Browser/native input mapping
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod score;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use score::ScoreManager;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Visible window in world units
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;

    /// Points for picking up a collectible
    pub const COLLECTIBLE_POINTS: u64 = 100;
    /// Points for destroying an enemy
    pub const ENEMY_POINTS: u64 = 500;

    /// Default particle pool capacity
    pub const MAX_PARTICLES: usize = 500;
    /// Default projectile pool capacity
    pub const MAX_PROJECTILES: usize = 10;
}

/// Convert a 0xRRGGBB literal to linear RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    ]
}
