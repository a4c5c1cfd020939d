//! Static course layout
//!
//! Levels are plain data: where the solids, pickups and enemies go, where
//! the player starts, and how far right counts as finished.

use glam::Vec2;

use super::entities::{EnemyKind, GROUND_COLOR, Platform};

/// Everything needed to populate a level
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub start: Vec2,
    /// Player x beyond which the level is complete
    pub goal_x: f32,
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Vec2>,
    pub enemies: Vec<(Vec2, EnemyKind)>,
}

impl LevelLayout {
    /// Layout for a 1-based level number. Every level currently shares the
    /// same course.
    pub fn for_level(level: u32) -> Self {
        log::debug!("Building layout for level {}", level);
        Self::meadow()
    }

    fn meadow() -> Self {
        let platforms = vec![
            // Ground
            Platform::new(0.0, 550.0, 3000.0, 50.0).with_color(GROUND_COLOR),
            // Starting area
            Platform::new(200.0, 450.0, 150.0, 20.0),
            Platform::new(400.0, 380.0, 120.0, 20.0),
            Platform::new(600.0, 320.0, 150.0, 20.0),
            // Mid section
            Platform::new(850.0, 400.0, 100.0, 20.0),
            Platform::new(1050.0, 350.0, 120.0, 20.0),
            Platform::new(1250.0, 280.0, 100.0, 20.0),
            // Stepping stones
            Platform::new(1400.0, 450.0, 80.0, 20.0),
            Platform::new(1550.0, 400.0, 80.0, 20.0),
            Platform::new(1700.0, 350.0, 80.0, 20.0),
            // Upper path
            Platform::new(1900.0, 250.0, 150.0, 20.0),
            Platform::new(2100.0, 200.0, 120.0, 20.0),
            // Final stretch
            Platform::new(2300.0, 350.0, 200.0, 20.0),
            Platform::new(2600.0, 450.0, 300.0, 20.0),
        ];

        let collectibles = [
            (250.0, 420.0),
            (440.0, 350.0),
            (650.0, 290.0),
            (880.0, 370.0),
            (1080.0, 320.0),
            (1280.0, 250.0),
            (1430.0, 420.0),
            (1580.0, 370.0),
            (1730.0, 320.0),
            (1950.0, 220.0),
            (2130.0, 170.0),
            (2400.0, 320.0),
            (2700.0, 420.0),
        ]
        .into_iter()
        .map(|(x, y)| Vec2::new(x, y))
        .collect();

        let enemies = [
            (500.0, 510.0, EnemyKind::Crawler),
            (900.0, 360.0, EnemyKind::Crawler),
            (1300.0, 240.0, EnemyKind::Crawler),
            (1800.0, 310.0, EnemyKind::Crawler),
            (2400.0, 310.0, EnemyKind::Crawler),
            (700.0, 510.0, EnemyKind::Drifter),
            (1100.0, 310.0, EnemyKind::Drifter),
            (1500.0, 360.0, EnemyKind::Drifter),
            (2000.0, 160.0, EnemyKind::Drifter),
            (2700.0, 410.0, EnemyKind::Drifter),
        ]
        .into_iter()
        .map(|(x, y, kind)| (Vec2::new(x, y), kind))
        .collect();

        Self {
            start: Vec2::new(100.0, 100.0),
            goal_x: 2800.0,
            platforms,
            collectibles,
            enemies,
        }
    }
}
