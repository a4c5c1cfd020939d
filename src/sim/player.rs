//! The player body: input, integration and platform collision

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Side, resolve_aabb};
use super::entities::{Facing, Platform};
use super::geom::Aabb;
use super::particles::EffectSink;
use super::projectile::ProjectileManager;
use super::tick::TickInput;
use crate::tuning::PlayerTuning;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    pub vel: Vec2,
    /// Standing on a platform (required to jump)
    pub grounded: bool,
    pub facing: Facing,
    /// Moving ticks since the last trail particle
    #[serde(skip)]
    trail_counter: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            bounds: Aabb {
                pos,
                size: Vec2::new(tuning.width, tuning.height),
            },
            vel: Vec2::ZERO,
            grounded: false,
            facing: Facing::Right,
            trail_counter: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Put the player back at `pos`, at rest
    pub fn respawn(&mut self, pos: Vec2) {
        self.bounds.pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Advance one tick: input, gravity, integration, collision, trail
    pub fn update<E: EffectSink>(
        &mut self,
        input: &TickInput,
        platforms: &[Platform],
        tuning: &PlayerTuning,
        effects: &mut E,
    ) {
        if input.left {
            self.vel.x = -tuning.speed;
            self.facing = Facing::Left;
        } else if input.right {
            self.vel.x = tuning.speed;
            self.facing = Facing::Right;
        } else {
            self.vel.x *= tuning.friction;
        }

        if input.jump && self.grounded {
            self.vel.y = -tuning.jump_power;
            self.grounded = false;
        }
        self.vel.y += tuning.gravity;

        self.bounds.pos += self.vel;

        self.grounded = false;
        self.resolve_collisions(platforms, tuning, effects);

        if self.vel.x.abs() + self.vel.y.abs() > tuning.trail_min_speed {
            self.trail_counter += 1;
            if self.trail_counter >= tuning.trail_every {
                self.trail_counter = 0;
                effects.trail(self.center(), self.vel);
            }
        }
    }

    /// Push out of every overlapping platform, in platform order.
    ///
    /// Each overlap is resolved on its own against the already-corrected
    /// position, so a body wedged between several platforms may not end up
    /// in the globally best spot.
    fn resolve_collisions<E: EffectSink>(
        &mut self,
        platforms: &[Platform],
        tuning: &PlayerTuning,
        effects: &mut E,
    ) {
        for platform in platforms {
            let Some(hit) = resolve_aabb(&self.bounds, &platform.bounds) else {
                continue;
            };
            self.bounds.pos = hit.position;

            match hit.side {
                Side::Left | Side::Right => {
                    let entry_speed = self.vel.x;
                    self.vel.x = 0.0;
                    let speed = if tuning.side_impact_uses_entry_speed {
                        entry_speed
                    } else {
                        self.vel.x
                    };
                    if speed.abs() > tuning.side_impact_speed {
                        effects.explosion(hit.contact);
                    }
                }
                Side::Top => {
                    let landing_speed = self.vel.y;
                    self.vel.y = 0.0;
                    self.grounded = true;
                    if landing_speed > tuning.hard_landing_speed {
                        effects.explosion(hit.contact);
                    }
                }
                Side::Bottom => {
                    self.vel.y = 0.0;
                }
            }
        }
    }

    /// Launch a fireball from the leading edge
    pub fn fire(&self, projectiles: &mut ProjectileManager) {
        let size = projectiles.projectile_size();
        let x = match self.facing {
            Facing::Right => self.bounds.right(),
            Facing::Left => self.bounds.left(),
        };
        let y = self.bounds.pos.y + self.bounds.size.y / 2.0 - size.y / 2.0;
        projectiles.spawn(Vec2::new(x, y), self.facing);
    }
}
