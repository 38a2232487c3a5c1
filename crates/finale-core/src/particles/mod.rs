//! Particle subsystems and the fixed-capacity buffers they share.
//!
//! Every subsystem allocates its buffers once (per subsystem, or per transient
//! instance for shockwaves and fireworks) and mutates them in place. Expired
//! particles are hidden through opacity or visibility, never removed.

mod burst;
mod firework;
mod flash;
mod shockwave;
mod star_field;
mod vortex;

pub use burst::{BurstLayerSpec, BurstSystem, BURST_LAYERS};
pub use firework::{Firework, FireworkSystem, COOL_PALETTE, WARM_PALETTE};
pub use flash::FlashPlane;
pub use shockwave::{RingSpec, Shockwave, ShockwaveSystem, CLIMAX_RINGS};
pub use star_field::StarField;
pub use vortex::TimeParticles;

use crate::color::Rgb;
use crate::render::{PointBatch, PointStyle, RenderBackend};
use crate::scene::LayerId;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

const GOLDEN_ANGLE: f32 = 2.399_963_1;

/// Structure-of-arrays point storage with a fixed logical count.
#[derive(Clone, Debug)]
pub struct PointBuffer {
    positions: Vec<f32>,
    colors: Option<Vec<f32>>,
    count: usize,
    dirty: bool,
}

impl PointBuffer {
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: None,
            count,
            dirty: true,
        }
    }

    /// Buffer with a per-particle colour channel, initialised to white.
    pub fn with_colors(count: usize) -> Self {
        Self {
            colors: Some(vec![1.0; count * 3]),
            ..Self::new(count)
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        let o = i * 3;
        Vec3::new(self.positions[o], self.positions[o + 1], self.positions[o + 2])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        let o = i * 3;
        self.positions[o] = p.x;
        self.positions[o + 1] = p.y;
        self.positions[o + 2] = p.z;
    }

    #[inline]
    pub fn set_color(&mut self, i: usize, c: Rgb) {
        if let Some(colors) = self.colors.as_mut() {
            let o = i * 3;
            colors[o..o + 3].copy_from_slice(&c);
        }
    }

    pub fn color(&self, i: usize) -> Option<Rgb> {
        self.colors.as_ref().map(|c| {
            let o = i * 3;
            [c[o], c[o + 1], c[o + 2]]
        })
    }

    pub fn fill_positions(&mut self, p: Vec3) {
        for chunk in self.positions.chunks_exact_mut(3) {
            chunk[0] = p.x;
            chunk[1] = p.y;
            chunk[2] = p.z;
        }
        self.dirty = true;
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> Option<&[f32]> {
        self.colors.as_deref()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn batch(&self, layer: LayerId, model: Mat4, style: PointStyle) -> PointBatch<'_> {
        PointBatch {
            layer,
            positions: &self.positions,
            colors: self.colors.as_deref(),
            model,
            style,
            dirty: self.dirty,
        }
    }

    /// Hand the buffer to the backend, clearing the dirty flag only when the
    /// backend took the data.
    pub fn draw(
        &mut self,
        backend: &mut dyn RenderBackend,
        layer: LayerId,
        model: Mat4,
        style: PointStyle,
    ) {
        if backend.draw_points(&self.batch(layer, model, style)) {
            self.dirty = false;
        }
    }
}

/// Independent generator for subsystem `index`, derived from the scene seed.
pub fn subsystem_rng(seed: u64, index: u64) -> StdRng {
    let mix = seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let theta: f32 = rng.gen_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Direction `i` of `n` on a Fibonacci sphere (near-uniform, deterministic).
pub fn fibonacci_direction(i: usize, n: usize) -> Vec3 {
    let n = n.max(1) as f32;
    let y = 1.0 - 2.0 * (i as f32 + 0.5) / n;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = i as f32 * GOLDEN_ANGLE;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}
