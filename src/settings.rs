//! Game settings and preferences
//!
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::{Storage, StorageError};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particle pool capacity for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Particle effects (explosions, sparkles, ...)
    pub particles: bool,
    /// Movement trails behind the player and fireballs
    pub trails: bool,
    /// Reduced motion (no full-screen confetti)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            particles: true,
            trails: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage slot
    pub const STORAGE_KEY: &'static str = "ember_run_settings";

    /// Effective particle pool capacity
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Whether a new best score may trigger confetti
    pub fn confetti_enabled(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn Storage) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings unreadable ({}), using defaults", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    /// Persist settings; failures are logged and dropped
    pub fn save(&self, store: &mut dyn Storage) {
        let result = serde_json::to_string(self)
            .map_err(|e| StorageError::Serialize(e.to_string()))
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));

        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_max_particles() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 500);

        settings.quality = QualityPreset::High;
        assert_eq!(settings.max_particles(), 2000);

        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
        assert!(!settings.confetti_enabled());
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("LOW"), Some(QualityPreset::Low));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStorage::new();
        let settings = Settings {
            quality: QualityPreset::Low,
            reduced_motion: true,
            ..Settings::default()
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let store = MemoryStorage::new().with_slot(Settings::STORAGE_KEY, "{{{");
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
