//! Visual-effect particles
//!
//! Particles never affect gameplay. They are spawned from presets by the
//! [`ParticleSystem`], integrated once per tick, and culled when their
//! lifetime runs out.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::BoundedPool;
use crate::tuning::{ParticlePreset, ParticleTuning};

/// Effect preset a particle came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Trail,
    Explosion,
    Sparkle,
    Confetti,
}

/// A single particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// Radius for round particles, side length for confetti
    pub size: f32,
    /// Ticks left to live
    pub lifetime: u32,
    pub max_lifetime: u32,
    /// Confetti only
    pub rotation: f32,
    pub spin: f32,
    /// Added to `vel.y` every tick
    pub gravity: f32,
}

impl Particle {
    pub fn new(
        kind: ParticleKind,
        pos: Vec2,
        vel: Vec2,
        color: [f32; 4],
        size: f32,
        lifetime: u32,
    ) -> Self {
        Self {
            kind,
            pos,
            vel,
            color,
            size,
            lifetime,
            max_lifetime: lifetime,
            rotation: 0.0,
            spin: 0.0,
            gravity: 0.0,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        if self.kind == ParticleKind::Confetti {
            self.rotation += self.spin;
        }
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    /// Fade factor: remaining lifetime over max lifetime
    pub fn opacity(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime == 0
    }
}

/// Receiver for gameplay-triggered effects.
///
/// Entities that emit effects talk to this rather than to the particle
/// storage directly.
pub trait EffectSink {
    /// One trail particle behind something moving with `source_vel`
    fn trail(&mut self, pos: Vec2, source_vel: Vec2);
    /// Radial burst
    fn explosion(&mut self, pos: Vec2);
}

/// Owner of every live particle
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pool: BoundedPool<Particle>,
    tuning: ParticleTuning,
    rng: Pcg32,
    trails_enabled: bool,
}

impl ParticleSystem {
    pub fn new(capacity: usize, tuning: ParticleTuning, seed: u64) -> Self {
        Self {
            pool: BoundedPool::new(capacity),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            trails_enabled: true,
        }
    }

    pub fn set_trails_enabled(&mut self, enabled: bool) {
        self.trails_enabled = enabled;
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

    /// Live particles, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }

    pub fn clear(&mut self) {
        self.pool.clear();
    }

    /// Insert a particle, evicting the oldest when full
    pub fn add(&mut self, particle: Particle) {
        insert(&mut self.pool, particle);
    }

    /// Integrate all particles and drop the expired ones
    pub fn update(&mut self) {
        for particle in self.pool.iter_mut() {
            particle.update();
        }
        self.pool.retain(|p| !p.is_dead());
    }

    /// Trail particle drifting against the emitter's motion
    pub fn spawn_trail(&mut self, pos: Vec2, source_vel: Vec2) {
        if !self.trails_enabled {
            return;
        }
        let Self {
            pool, tuning, rng, ..
        } = self;
        let preset = &tuning.trail;
        let (size, lifetime, color) = roll(rng, preset);
        let jitter = Vec2::new(in_range(rng, preset.speed), in_range(rng, preset.speed));
        let vel = source_vel * tuning.trail_inherit + jitter;
        insert(
            pool,
            Particle::new(ParticleKind::Trail, pos, vel, color, size, lifetime),
        );
    }

    /// Ring of particles fanning out from `pos`
    pub fn spawn_explosion(&mut self, pos: Vec2) {
        let Self {
            pool, tuning, rng, ..
        } = self;
        let preset = &tuning.explosion;
        let count = preset.count.max(1);

        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32
                + centered(rng, tuning.explosion_angle_jitter);
            let speed = in_range(rng, preset.speed);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let (size, lifetime, color) = roll(rng, preset);

            let mut particle =
                Particle::new(ParticleKind::Explosion, pos, vel, color, size, lifetime);
            particle.gravity = tuning.gravity;
            insert(pool, particle);
        }
    }

    /// Upward-floating sparkles scattered around `pos`
    pub fn spawn_sparkles(&mut self, pos: Vec2) {
        let Self {
            pool, tuning, rng, ..
        } = self;
        let preset = &tuning.sparkle;

        for _ in 0..preset.count {
            let vel = Vec2::new(
                centered(rng, tuning.sparkle_drift),
                in_range(rng, preset.speed),
            );
            let (size, lifetime, color) = roll(rng, preset);
            let offset = Vec2::new(
                centered(rng, tuning.sparkle_spread),
                centered(rng, tuning.sparkle_spread),
            );
            insert(
                pool,
                Particle::new(ParticleKind::Sparkle, pos + offset, vel, color, size, lifetime),
            );
        }
    }

    /// Confetti raining down across the visible window.
    ///
    /// `view_left` is the world x of the window's left edge; particles start
    /// just above the top of the screen.
    pub fn spawn_confetti(&mut self, view_left: f32, view_width: f32) {
        let Self {
            pool, tuning, rng, ..
        } = self;
        let preset = &tuning.confetti;

        for _ in 0..preset.count {
            let pos = Vec2::new(
                view_left + rng.random::<f32>() * view_width,
                -20.0 - rng.random::<f32>() * 50.0,
            );
            let vel = Vec2::new(
                centered(rng, tuning.confetti_drift),
                in_range(rng, preset.speed),
            );
            let (size, lifetime, color) = roll(rng, preset);

            let mut particle =
                Particle::new(ParticleKind::Confetti, pos, vel, color, size, lifetime);
            particle.gravity = tuning.gravity;
            particle.spin = centered(rng, tuning.confetti_spin);
            insert(pool, particle);
        }
    }
}

impl EffectSink for ParticleSystem {
    fn trail(&mut self, pos: Vec2, source_vel: Vec2) {
        self.spawn_trail(pos, source_vel);
    }

    fn explosion(&mut self, pos: Vec2) {
        self.spawn_explosion(pos);
    }
}

/// Add to the pool, returning the particle evicted to make room.
///
/// With particles disabled (zero capacity) the new particle is dropped and
/// nothing counts as evicted.
fn insert(pool: &mut BoundedPool<Particle>, particle: Particle) -> Option<Particle> {
    if pool.capacity() == 0 {
        return None;
    }
    let evicted = pool.push(particle);
    if evicted.is_some() {
        log::debug!("Particle pool full, evicted oldest");
    }
    evicted
}

/// Uniform sample in `[lo, hi)`
fn in_range(rng: &mut Pcg32, [lo, hi]: [f32; 2]) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniform sample in `[-span/2, span/2)`
fn centered(rng: &mut Pcg32, span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * span
}

/// Size, lifetime and colour for one particle of a preset
fn roll(rng: &mut Pcg32, preset: &ParticlePreset) -> (f32, u32, [f32; 4]) {
    let size = in_range(rng, preset.size);
    let [lo, hi] = preset.lifetime;
    let lifetime = if hi > lo { rng.random_range(lo..=hi) } else { lo };
    let color = if preset.colors.is_empty() {
        [1.0; 4]
    } else {
        preset.colors[rng.random_range(0..preset.colors.len())]
    };
    (size, lifetime.max(1), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn system(capacity: usize) -> ParticleSystem {
        ParticleSystem::new(capacity, ParticleTuning::default(), 7)
    }

    fn marker(x: f32, lifetime: u32) -> Particle {
        Particle::new(
            ParticleKind::Trail,
            Vec2::new(x, 0.0),
            Vec2::ZERO,
            [1.0; 4],
            1.0,
            lifetime,
        )
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut particles = system(500);
        for i in 0..501 {
            particles.add(marker(i as f32, 100));
        }
        assert_eq!(particles.len(), 500);
        // Particle 0 was evicted, 1 is now the oldest
        let xs: Vec<f32> = particles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs[0], 1.0);
        assert_eq!(xs[499], 500.0);
    }

    #[test]
    fn test_explosion_fans_out() {
        let mut particles = system(500);
        particles.spawn_explosion(Vec2::new(50.0, 50.0));
        assert_eq!(particles.len(), 10);

        for p in particles.iter() {
            assert_eq!(p.kind, ParticleKind::Explosion);
            assert_eq!(p.pos, Vec2::new(50.0, 50.0));
            assert_eq!(p.gravity, 0.15);
            let speed = p.vel.length();
            assert!((2.0 - 1e-4..5.0 + 1e-4).contains(&speed));
            assert!((4.0..=8.0).contains(&p.size));
            assert!((20..=40).contains(&p.lifetime));
        }

        // Evenly spaced spokes: the sum of unit directions nearly cancels
        let sum: Vec2 = particles.iter().map(|p| p.vel.normalize()).sum();
        assert!(sum.length() < 3.0);
    }

    #[test]
    fn test_sparkles_float_up() {
        let mut particles = system(500);
        particles.spawn_sparkles(Vec2::new(100.0, 100.0));
        assert_eq!(particles.len(), 6);
        for p in particles.iter() {
            assert!(p.vel.y < 0.0);
            assert_eq!(p.gravity, 0.0);
            assert!((p.pos.x - 100.0).abs() <= 10.0);
            assert!((p.pos.y - 100.0).abs() <= 10.0);
        }
    }

    #[test]
    fn test_confetti_spans_visible_window() {
        let mut particles = system(500);
        particles.spawn_confetti(1000.0, 800.0);
        assert_eq!(particles.len(), 60);
        for p in particles.iter() {
            assert!((1000.0..=1800.0).contains(&p.pos.x));
            assert!(p.pos.y <= -20.0 && p.pos.y >= -70.0);
            assert!(p.vel.y >= 3.0);
            assert!(p.spin.abs() <= 0.1);
        }
    }

    #[test]
    fn test_confetti_rotates_others_do_not() {
        let mut confetti = marker(0.0, 10);
        confetti.kind = ParticleKind::Confetti;
        confetti.spin = 0.1;
        let mut sparkle = marker(0.0, 10);
        sparkle.kind = ParticleKind::Sparkle;
        sparkle.spin = 0.1;

        confetti.update();
        sparkle.update();
        assert!((confetti.rotation - 0.1).abs() < 1e-6);
        assert_eq!(sparkle.rotation, 0.0);
    }

    #[test]
    fn test_trail_inherits_inverse_velocity() {
        let mut particles = system(500);
        particles.spawn_trail(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let p = particles.iter().next().unwrap();
        // -0.3 * 10 with at most 0.25 of jitter
        assert!((p.vel.x + 3.0).abs() <= 0.26);
        assert!(p.vel.y.abs() <= 0.26);
    }

    #[test]
    fn test_trails_can_be_disabled() {
        let mut particles = system(500);
        particles.set_trails_enabled(false);
        particles.spawn_trail(Vec2::ZERO, Vec2::X);
        assert!(particles.is_empty());
        particles.spawn_explosion(Vec2::ZERO);
        assert_eq!(particles.len(), 10);
    }

    #[test]
    fn test_zero_capacity_spawns_nothing() {
        let mut particles = system(0);
        particles.spawn_confetti(0.0, 800.0);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_insert_reports_only_real_evictions() {
        let mut disabled = BoundedPool::new(0);
        assert!(insert(&mut disabled, marker(1.0, 5)).is_none());
        assert!(disabled.is_empty());

        let mut full = BoundedPool::new(2);
        assert!(insert(&mut full, marker(1.0, 5)).is_none());
        assert!(insert(&mut full, marker(2.0, 5)).is_none());
        let evicted = insert(&mut full, marker(3.0, 5));
        assert_eq!(evicted.map(|p| p.pos.x), Some(1.0));
        assert_eq!(full.len(), 2);
    }

    #[test]
    fn test_gravity_integration() {
        let mut p = marker(0.0, 10);
        p.vel = Vec2::new(1.0, -2.0);
        p.gravity = 0.15;
        p.update();
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.y + 1.85).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_opacity_tracks_lifetime(lifetime in 1u32..200) {
            let mut particles = system(10);
            particles.add(marker(0.0, lifetime));

            let mut last = 1.0f32;
            for tick in 1..=lifetime {
                particles.update();
                let remaining = lifetime - tick;
                if remaining == 0 {
                    prop_assert!(particles.is_empty());
                } else {
                    let p = particles.iter().next().unwrap();
                    let expected = remaining as f32 / lifetime as f32;
                    prop_assert!((p.opacity() - expected).abs() < 1e-6);
                    prop_assert!(p.opacity() <= last);
                    prop_assert!((0.0..=1.0).contains(&p.opacity()));
                    last = p.opacity();
                }
            }
        }
    }
}
