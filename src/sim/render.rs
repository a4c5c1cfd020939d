//! Render-ready view of the simulation
//!
//! The simulation never paints. Once per frame the host asks for a
//! [`snapshot`] and draws it in order; camera offsetting is left to the host.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use super::entities::{EnemyKind, Facing};
use super::particles::ParticleKind;
use super::state::GameState;
use crate::rgb;

pub const PLAYER_COLOR: [f32; 4] = rgb(0xFF6B6B);
pub const COLLECTIBLE_COLOR: [f32; 4] = rgb(0xFFD700);
pub const FIREBALL_COLOR: [f32; 4] = rgb(0xFF6B00);

/// What a descriptor depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum RenderKind {
    Platform,
    Collectible,
    Enemy { variant: EnemyKind },
    Particle { variant: ParticleKind },
    Projectile,
    Player { facing: Facing },
}

impl RenderKind {
    /// Stable numeric tag for GPU instance data
    pub fn code(self) -> u32 {
        match self {
            RenderKind::Platform => 0,
            RenderKind::Collectible => 1,
            RenderKind::Enemy { .. } => 2,
            RenderKind::Particle {
                variant: ParticleKind::Confetti,
            } => 4,
            RenderKind::Particle { .. } => 3,
            RenderKind::Projectile => 5,
            RenderKind::Player { .. } => 6,
        }
    }
}

/// One drawable item in world space.
///
/// Boxes are positioned by their top-left corner. Particles are positioned
/// by their centre, with `size` holding the radius (or confetti side).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderDescriptor {
    pub kind: RenderKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: [f32; 4],
    pub opacity: f32,
    pub rotation: f32,
}

impl RenderDescriptor {
    fn solid(kind: RenderKind, pos: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            kind,
            pos,
            size,
            color,
            opacity: 1.0,
            rotation: 0.0,
        }
    }
}

/// Everything visible, back to front
pub fn snapshot(state: &GameState) -> Vec<RenderDescriptor> {
    let mut out = Vec::with_capacity(
        state.platforms.len()
            + state.collectibles.len()
            + state.enemies.len()
            + state.particles.len()
            + state.projectiles.len()
            + 1,
    );

    out.extend(state.platforms.iter().map(|p| {
        RenderDescriptor::solid(RenderKind::Platform, p.bounds.pos, p.bounds.size, p.color)
    }));

    out.extend(state.collectibles.iter().filter(|c| !c.collected).map(|c| {
        RenderDescriptor {
            rotation: c.rotation,
            ..RenderDescriptor::solid(
                RenderKind::Collectible,
                c.bounds.pos,
                c.bounds.size,
                COLLECTIBLE_COLOR,
            )
        }
    }));

    out.extend(state.enemies.iter().filter(|e| e.alive).map(|e| {
        RenderDescriptor::solid(
            RenderKind::Enemy { variant: e.kind },
            e.bounds.pos,
            e.bounds.size,
            e.kind.color(),
        )
    }));

    out.extend(state.particles.iter().map(|p| RenderDescriptor {
        kind: RenderKind::Particle { variant: p.kind },
        pos: p.pos,
        size: Vec2::splat(p.size),
        color: p.color,
        opacity: p.opacity(),
        rotation: p.rotation,
    }));

    out.extend(state.projectiles.iter().filter(|p| p.active).map(|p| {
        RenderDescriptor::solid(
            RenderKind::Projectile,
            p.bounds.pos,
            p.bounds.size,
            FIREBALL_COLOR,
        )
    }));

    let player = &state.player;
    out.push(RenderDescriptor::solid(
        RenderKind::Player {
            facing: player.facing,
        },
        player.bounds.pos,
        player.bounds.size,
        PLAYER_COLOR,
    ));

    out
}

/// Per-instance GPU data
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct RenderInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Straight RGBA with opacity folded into alpha
    pub color: [f32; 4],
    pub rotation: f32,
    pub kind: u32,
}

impl From<&RenderDescriptor> for RenderInstance {
    fn from(d: &RenderDescriptor) -> Self {
        let [r, g, b, a] = d.color;
        Self {
            position: d.pos.to_array(),
            size: d.size.to_array(),
            color: [r, g, b, a * d.opacity],
            rotation: d.rotation,
            kind: d.kind.code(),
        }
    }
}

/// Snapshot packed for upload to an instance buffer
pub fn instances(state: &GameState) -> Vec<RenderInstance> {
    snapshot(state).iter().map(RenderInstance::from).collect()
}

/// Raw bytes of [`instances`], `INSTANCE_STRIDE` bytes per item
pub fn instance_bytes(state: &GameState) -> Vec<u8> {
    bytemuck::cast_slice(&instances(state)).to_vec()
}

pub const INSTANCE_STRIDE: usize = std::mem::size_of::<RenderInstance>();
