//! Player fireballs
//!
//! Fireballs fly in a straight horizontal line, leave a particle trail, and
//! burst on the first platform they touch. They are also dropped once they
//! leave the visible window or burn out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::first_overlap;
use super::entities::{Facing, Platform};
use super::geom::Aabb;
use super::particles::EffectSink;
use super::pool::BoundedPool;
use crate::tuning::FireballTuning;

/// A single fireball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub bounds: Aabb,
    pub vel: Vec2,
    /// Ticks until it burns out
    pub lifetime: u32,
    /// Inactive fireballs are inert until culled
    pub active: bool,
    trail_counter: u32,
}

impl Projectile {
    pub fn new(pos: Vec2, facing: Facing, tuning: &FireballTuning) -> Self {
        Self {
            bounds: Aabb {
                pos,
                size: Vec2::new(tuning.width, tuning.height),
            },
            vel: Vec2::new(tuning.speed * facing.sign(), 0.0),
            lifetime: tuning.lifetime,
            active: true,
            trail_counter: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Inactive or burnt out
    pub fn is_dead(&self) -> bool {
        !self.active || self.lifetime == 0
    }

    /// Move one tick and drop a trail particle every `trail_interval` ticks
    fn advance<E: EffectSink>(&mut self, tuning: &FireballTuning, effects: &mut E) {
        self.bounds.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);

        if self.trail_counter % tuning.trail_interval.max(1) == 0 {
            effects.trail(
                self.center(),
                Vec2::new(self.vel.x * tuning.trail_velocity_scale, 0.0),
            );
        }
        self.trail_counter += 1;
    }
}

/// Horizontal slice of the world currently on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewWindow {
    pub left: f32,
    pub width: f32,
}

impl ViewWindow {
    /// True if `bounds` lies entirely left or right of the window
    pub fn is_outside(&self, bounds: &Aabb) -> bool {
        bounds.right() < self.left || bounds.left() > self.left + self.width
    }
}

/// Owner of every live fireball
#[derive(Debug, Clone)]
pub struct ProjectileManager {
    pool: BoundedPool<Projectile>,
    tuning: FireballTuning,
}

impl ProjectileManager {
    pub fn new(capacity: usize, tuning: FireballTuning) -> Self {
        Self {
            pool: BoundedPool::new(capacity),
            tuning,
        }
    }

    pub fn projectile_size(&self) -> Vec2 {
        Vec2::new(self.tuning.width, self.tuning.height)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.pool.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.pool.iter_mut()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Add a fireball, evicting the oldest when full
    pub fn add(&mut self, projectile: Projectile) {
        if self.pool.push(projectile).is_some() {
            log::debug!("Projectile limit reached, dropped oldest fireball");
        }
    }

    pub fn spawn(&mut self, pos: Vec2, facing: Facing) {
        let projectile = Projectile::new(pos, facing, &self.tuning);
        self.add(projectile);
    }

    /// Move, collide and cull every fireball
    pub fn update<E: EffectSink>(&mut self, platforms: &[Platform], view: ViewWindow, effects: &mut E) {
        for projectile in self.pool.iter_mut() {
            if !projectile.active {
                continue;
            }
            projectile.advance(&self.tuning, effects);

            if first_overlap(&projectile.bounds, platforms.iter().map(|p| &p.bounds)).is_some() {
                effects.explosion(projectile.center());
                projectile.deactivate();
            }

            if view.is_outside(&projectile.bounds) {
                projectile.deactivate();
            }
        }

        self.purge();
    }

    /// Drop inactive and burnt-out fireballs
    pub fn purge(&mut self) {
        self.pool.retain(|p| !p.is_dead());
    }
}
