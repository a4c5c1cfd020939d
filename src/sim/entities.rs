//! Level entities: platforms, collectibles and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::rgb;
use crate::tuning::{CollectibleTuning, EnemyTuning};

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

pub const PLATFORM_COLOR: [f32; 4] = rgb(0x8B4513);
pub const GROUND_COLOR: [f32; 4] = rgb(0x228B22);

/// Static solid rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub bounds: Aabb,
    pub color: [f32; 4],
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, width, height),
            color: PLATFORM_COLOR,
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

/// A one-shot pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub bounds: Aabb,
    /// Once set, never cleared
    pub collected: bool,
    /// Cosmetic spin (radians, unbounded)
    pub rotation: f32,
}

impl Collectible {
    pub fn new(pos: Vec2, tuning: &CollectibleTuning) -> Self {
        Self {
            bounds: Aabb {
                pos,
                size: Vec2::new(tuning.width, tuning.height),
            },
            collected: false,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, tuning: &CollectibleTuning) {
        self.rotation += tuning.spin;
    }

    /// Consume the pickup if `player` touches it.
    ///
    /// Returns true only on the tick it gets collected.
    pub fn try_collect(&mut self, player: &Aabb) -> bool {
        if self.collected || !self.bounds.intersects(player) {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Visual variant of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Crawler,
    Drifter,
}

impl EnemyKind {
    pub fn color(self) -> [f32; 4] {
        match self {
            EnemyKind::Crawler => rgb(0x4285F4),
            EnemyKind::Drifter => rgb(0x0078D4),
        }
    }
}

/// A patrolling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub bounds: Aabb,
    /// Spawn x the patrol is anchored to
    pub start_x: f32,
    pub vel_x: f32,
    pub patrol_distance: f32,
    pub health: i32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, kind: EnemyKind, tuning: &EnemyTuning) -> Self {
        Self {
            kind,
            bounds: Aabb {
                pos,
                size: Vec2::new(tuning.width, tuning.height),
            },
            start_x: pos.x,
            vel_x: tuning.speed,
            patrol_distance: tuning.patrol_distance,
            health: tuning.health,
            alive: true,
        }
    }

    /// Step the patrol; turns around once past either end
    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        self.bounds.pos.x += self.vel_x;

        let x = self.bounds.pos.x;
        if x > self.start_x + self.patrol_distance || x < self.start_x - self.patrol_distance {
            self.vel_x = -self.vel_x;
        }
    }

    /// Overlap test that ignores dead enemies
    pub fn hits(&self, other: &Aabb) -> bool {
        self.alive && self.bounds.intersects(other)
    }

    pub fn take_damage(&mut self) {
        self.health -= 1;
        if self.health <= 0 {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_once() {
        let mut coin = Collectible::new(Vec2::new(0.0, 0.0), &CollectibleTuning::default());
        let player = Aabb::new(5.0, 5.0, 40.0, 40.0);

        assert!(coin.try_collect(&player));
        assert!(coin.collected);
        assert!(!coin.try_collect(&player));
        assert!(coin.collected);
    }

    #[test]
    fn test_collect_requires_overlap() {
        let mut coin = Collectible::new(Vec2::new(0.0, 0.0), &CollectibleTuning::default());
        assert!(!coin.try_collect(&Aabb::new(100.0, 100.0, 40.0, 40.0)));
        assert!(!coin.collected);
    }

    #[test]
    fn test_collectible_spins() {
        let tuning = CollectibleTuning::default();
        let mut coin = Collectible::new(Vec2::ZERO, &tuning);
        for _ in 0..10 {
            coin.update(&tuning);
        }
        assert!((coin.rotation - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_patrol_reverses_past_boundary() {
        let tuning = EnemyTuning::default();
        let mut enemy = Enemy::new(Vec2::new(500.0, 510.0), EnemyKind::Crawler, &tuning);

        // 75 ticks at speed 2 lands exactly on the boundary without passing it
        for _ in 0..75 {
            enemy.update();
        }
        assert_eq!(enemy.bounds.pos.x, 650.0);
        assert_eq!(enemy.vel_x, 2.0);

        enemy.update();
        assert_eq!(enemy.bounds.pos.x, 652.0);
        assert_eq!(enemy.vel_x, -2.0);

        // Heads back toward the anchor and stays within one step of the range
        for _ in 0..400 {
            enemy.update();
            assert!((enemy.bounds.pos.x - 500.0).abs() <= 152.0);
        }
    }

    #[test]
    fn test_damage_kills_at_zero_health() {
        let tuning = EnemyTuning {
            health: 2,
            ..EnemyTuning::default()
        };
        let mut enemy = Enemy::new(Vec2::ZERO, EnemyKind::Drifter, &tuning);
        let probe = Aabb::new(10.0, 10.0, 5.0, 5.0);

        enemy.take_damage();
        assert!(enemy.alive);
        assert!(enemy.hits(&probe));

        enemy.take_damage();
        assert!(!enemy.alive);
        assert!(!enemy.hits(&probe));
    }

    #[test]
    fn test_dead_enemy_is_inert() {
        let mut enemy = Enemy::new(Vec2::ZERO, EnemyKind::Crawler, &EnemyTuning::default());
        enemy.take_damage();
        enemy.update();
        assert_eq!(enemy.bounds.pos.x, 0.0);
    }

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
        assert_eq!(Facing::default(), Facing::Right);
    }
}
