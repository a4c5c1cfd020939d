//! Data-driven game balance
//!
//! Every physics and effect number lives here so a level can be re-tuned
//! from JSON without touching the simulation. Missing fields fall back to
//! the built-in defaults.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::rgb;

/// Failure to read a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player movement and collision feedback
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed while a direction is held (units/tick)
    pub speed: f32,
    /// Upward impulse applied on jump (units/tick)
    pub jump_power: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Horizontal velocity multiplier with no input (< 1)
    pub friction: f32,
    /// Moving ticks between trail particles
    pub trail_every: u32,
    /// |vx| + |vy| above which the player counts as moving
    pub trail_min_speed: f32,
    /// Landing speed above which a landing bursts
    pub hard_landing_speed: f32,
    /// Horizontal speed above which a side hit bursts
    pub side_impact_speed: f32,
    /// Test the side-impact threshold against the speed before the hit
    /// zeroed it. Off by default: the check then sees the zeroed value.
    pub side_impact_uses_entry_speed: bool,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 5.0,
            jump_power: 12.0,
            gravity: 0.5,
            friction: 0.8,
            trail_every: 3,
            trail_min_speed: 1.0,
            hard_landing_speed: 5.0,
            side_impact_speed: 2.0,
            side_impact_uses_entry_speed: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Fraction of the remaining distance covered per tick
    pub smoothness: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self { smoothness: 0.1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Max excursion from the spawn x before turning around
    pub patrol_distance: f32,
    pub health: i32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 2.0,
            patrol_distance: 150.0,
            health: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleTuning {
    pub width: f32,
    pub height: f32,
    /// Cosmetic rotation per tick (radians)
    pub spin: f32,
}

impl Default for CollectibleTuning {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            spin: 0.05,
        }
    }
}

/// One particle effect preset.
///
/// `speed` is read per preset: velocity jitter for trails, burst speed for
/// explosions, float speed for sparkles, fall speed for confetti.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlePreset {
    pub count: u32,
    pub size: [f32; 2],
    pub lifetime: [u32; 2],
    pub speed: [f32; 2],
    pub colors: Vec<[f32; 4]>,
}

/// Presets differ in their defaults, so deserialization merges each preset
/// field by field over its own built-in values.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleTuning {
    pub trail: ParticlePreset,
    pub explosion: ParticlePreset,
    pub sparkle: ParticlePreset,
    pub confetti: ParticlePreset,
    /// Downward acceleration for explosion and confetti particles
    pub gravity: f32,
    /// Fraction of the emitter's velocity a trail particle inherits
    pub trail_inherit: f32,
    /// Angular jitter added to each explosion spoke (total span, radians)
    pub explosion_angle_jitter: f32,
    /// Square spawn area side for sparkles
    pub sparkle_spread: f32,
    /// Horizontal drift span for sparkles
    pub sparkle_drift: f32,
    /// Horizontal drift span for confetti
    pub confetti_drift: f32,
    /// Rotation speed span for confetti (radians/tick)
    pub confetti_spin: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            trail: ParticlePreset {
                count: 1,
                size: [3.0, 6.0],
                lifetime: [15, 30],
                speed: [-0.25, 0.25],
                colors: vec![rgb(0xFFD700), rgb(0xFFA500), rgb(0xFF6B6B)],
            },
            explosion: ParticlePreset {
                count: 10,
                size: [4.0, 8.0],
                lifetime: [20, 40],
                speed: [2.0, 5.0],
                colors: vec![rgb(0xFF6B6B), rgb(0xFF8C00), rgb(0xFFD700)],
            },
            sparkle: ParticlePreset {
                count: 6,
                size: [2.0, 4.0],
                lifetime: [30, 50],
                speed: [-2.0, -1.0],
                colors: vec![rgb(0xFFFFFF), rgb(0xFFD700), rgb(0x00FFFF)],
            },
            confetti: ParticlePreset {
                count: 60,
                size: [4.0, 8.0],
                lifetime: [60, 120],
                speed: [3.0, 8.0],
                colors: vec![
                    rgb(0xFF6B6B),
                    rgb(0x4CAF50),
                    rgb(0x2196F3),
                    rgb(0xFFD700),
                    rgb(0x9C27B0),
                ],
            },
            gravity: 0.15,
            trail_inherit: -0.3,
            explosion_angle_jitter: 0.5,
            sparkle_spread: 20.0,
            sparkle_drift: 2.0,
            confetti_drift: 4.0,
            confetti_spin: 0.2,
        }
    }
}

/// Partial preset as read from JSON
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParticlePresetOverride {
    count: Option<u32>,
    size: Option<[f32; 2]>,
    lifetime: Option<[u32; 2]>,
    speed: Option<[f32; 2]>,
    colors: Option<Vec<[f32; 4]>>,
}

impl ParticlePresetOverride {
    fn apply(self, preset: &mut ParticlePreset) {
        if let Some(count) = self.count {
            preset.count = count;
        }
        if let Some(size) = self.size {
            preset.size = size;
        }
        if let Some(lifetime) = self.lifetime {
            preset.lifetime = lifetime;
        }
        if let Some(speed) = self.speed {
            preset.speed = speed;
        }
        if let Some(colors) = self.colors {
            preset.colors = colors;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ParticleTuningOverride {
    trail: ParticlePresetOverride,
    explosion: ParticlePresetOverride,
    sparkle: ParticlePresetOverride,
    confetti: ParticlePresetOverride,
    gravity: Option<f32>,
    trail_inherit: Option<f32>,
    explosion_angle_jitter: Option<f32>,
    sparkle_spread: Option<f32>,
    sparkle_drift: Option<f32>,
    confetti_drift: Option<f32>,
    confetti_spin: Option<f32>,
}

impl<'de> Deserialize<'de> for ParticleTuning {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let o = ParticleTuningOverride::deserialize(deserializer)?;
        let mut tuning = ParticleTuning::default();

        o.trail.apply(&mut tuning.trail);
        o.explosion.apply(&mut tuning.explosion);
        o.sparkle.apply(&mut tuning.sparkle);
        o.confetti.apply(&mut tuning.confetti);

        let scalars = [
            (o.gravity, &mut tuning.gravity),
            (o.trail_inherit, &mut tuning.trail_inherit),
            (o.explosion_angle_jitter, &mut tuning.explosion_angle_jitter),
            (o.sparkle_spread, &mut tuning.sparkle_spread),
            (o.sparkle_drift, &mut tuning.sparkle_drift),
            (o.confetti_drift, &mut tuning.confetti_drift),
            (o.confetti_spin, &mut tuning.confetti_spin),
        ];
        for (value, slot) in scalars {
            if let Some(value) = value {
                *slot = value;
            }
        }
        Ok(tuning)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Ticks before a fireball burns out
    pub lifetime: u32,
    /// Emit a trail particle every N ticks
    pub trail_interval: u32,
    /// Share of the fireball's x velocity handed to its trail
    pub trail_velocity_scale: f32,
}

impl Default for FireballTuning {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 16.0,
            speed: 8.0,
            lifetime: 180,
            trail_interval: 2,
            trail_velocity_scale: 0.5,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub camera: CameraTuning,
    pub enemy: EnemyTuning,
    pub collectible: CollectibleTuning,
    pub particles: ParticleTuning,
    pub fireball: FireballTuning,
}

impl Tuning {
    /// Parse a (possibly partial) override; absent sections keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
