use super::{random_unit_vector, PointBuffer};
use crate::color::Rgb;
use crate::constants::*;
use crate::easing::{in_quad, out_cubic};
use crate::render::{PointStyle, RenderBackend};
use crate::scene::{LayerId, LayerKind, Scene};
use glam::{Mat4, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstLayerSpec {
    pub count: usize,
    pub color: Rgb,
    pub size: f32,
    pub speed: f32,
}

/// The five layers of the climax explosion, outermost first.
pub const BURST_LAYERS: [BurstLayerSpec; 5] = [
    BurstLayerSpec {
        count: 3000,
        color: [1.0, 0.84, 0.0],
        size: 0.8,
        speed: 1.0,
    },
    BurstLayerSpec {
        count: 2000,
        color: [1.0, 1.0, 1.0],
        size: 0.5,
        speed: 1.4,
    },
    BurstLayerSpec {
        count: 2000,
        color: [0.0, 1.0, 1.0],
        size: 0.6,
        speed: 0.8,
    },
    BurstLayerSpec {
        count: 1500,
        color: [1.0, 0.0, 1.0],
        size: 0.7,
        speed: 1.2,
    },
    BurstLayerSpec {
        count: 1000,
        color: [1.0, 0.5, 0.1],
        size: 0.9,
        speed: 0.6,
    },
];

struct BurstLayer {
    layer: LayerId,
    buffer: PointBuffer,
    // Final displacement of each particle before gravity; fixed at construction.
    velocities: Vec<Vec3>,
    lifetimes: Vec<f32>,
    max_lifetime: f32,
    start_time: Option<f64>,
    style: PointStyle,
}

impl BurstLayer {
    fn new(scene: &mut Scene, spec: &BurstLayerSpec, rng: &mut StdRng) -> Self {
        let mut velocities = Vec::with_capacity(spec.count);
        let mut lifetimes = Vec::with_capacity(spec.count);
        for _ in 0..spec.count {
            let distance = rng.gen_range(BURST_DISTANCE_MIN..BURST_DISTANCE_MAX) * spec.speed;
            velocities.push(random_unit_vector(rng) * distance);
            lifetimes.push(rng.gen_range(BURST_LIFETIME_MIN..BURST_LIFETIME_MAX));
        }
        let max_lifetime = lifetimes.iter().copied().fold(0.0_f32, f32::max);
        Self {
            layer: scene.attach(LayerKind::Points),
            buffer: PointBuffer::new(spec.count),
            velocities,
            lifetimes,
            max_lifetime,
            start_time: None,
            style: PointStyle {
                opacity: 0.0,
                visible: false,
                ..PointStyle::new(spec.color, spec.size)
            },
        }
    }

    fn update(&mut self, time: f64) {
        let Some(start) = self.start_time else { return };
        let elapsed = (time - start) as f32;
        if elapsed < 0.0 {
            self.style.visible = false;
            return;
        }
        let fade = ((elapsed - BURST_FADE_DELAY_SEC) / BURST_FADE_SEC).clamp(0.0, 1.0);
        if elapsed > self.max_lifetime || fade >= 1.0 {
            self.style.visible = false;
            self.style.opacity = 0.0;
            self.start_time = None;
            return;
        }
        let drop = BURST_GRAVITY * elapsed * elapsed;
        for i in 0..self.buffer.len() {
            let t = (elapsed / self.lifetimes[i]).min(1.0);
            let mut p = self.velocities[i] * out_cubic(t);
            p.y -= drop;
            self.buffer.set_position(i, p);
        }
        self.buffer.mark_dirty();
        self.style.visible = true;
        self.style.opacity = 1.0 - in_quad(fade);
    }
}

/// Pre-allocated multi-layer explosion fired at climax. Retriggering reuses the
/// same velocity field from the origin.
pub struct BurstSystem {
    layers: Vec<BurstLayer>,
    disposed: bool,
}

impl BurstSystem {
    pub fn new(scene: &mut Scene, rng: &mut StdRng) -> Self {
        Self::with_layers(scene, rng, &BURST_LAYERS)
    }

    pub fn with_layers(scene: &mut Scene, rng: &mut StdRng, specs: &[BurstLayerSpec]) -> Self {
        let layers = specs
            .iter()
            .map(|spec| BurstLayer::new(scene, spec, rng))
            .collect();
        Self {
            layers,
            disposed: false,
        }
    }

    /// Arm every layer, each `index * 0.1 s` after `start_time`.
    pub fn trigger(&mut self, start_time: f64) {
        if self.disposed {
            return;
        }
        for (i, layer) in self.layers.iter_mut().enumerate() {
            layer.start_time = Some(start_time + f64::from(i as f32 * BURST_LAYER_STAGGER_SEC));
            layer.buffer.fill_positions(Vec3::ZERO);
            layer.style.opacity = 1.0;
            layer.style.visible = false;
        }
    }

    pub fn update(&mut self, time: f64) {
        if self.disposed {
            return;
        }
        for layer in &mut self.layers {
            layer.update(time);
        }
    }

    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        if self.disposed {
            return;
        }
        for layer in &mut self.layers {
            if !layer.style.visible {
                continue;
            }
            layer
                .buffer
                .draw(backend, layer.layer, Mat4::IDENTITY, layer.style);
        }
    }

    pub fn dispose(&mut self, scene: &mut Scene) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for layer in self.layers.drain(..) {
            scene.detach(layer.layer);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn particle_count(&self) -> usize {
        self.layers.iter().map(|l| l.buffer.len()).sum()
    }

    /// True while any layer is armed (waiting for its delay or animating).
    pub fn is_active(&self) -> bool {
        self.layers.iter().any(|l| l.start_time.is_some())
    }

    pub fn layer_visible(&self, index: usize) -> bool {
        self.layers.get(index).map_or(false, |l| l.style.visible)
    }

    pub fn layer_opacity(&self, index: usize) -> f32 {
        self.layers.get(index).map_or(0.0, |l| l.style.opacity)
    }

    pub fn layer_start(&self, index: usize) -> Option<f64> {
        self.layers.get(index).and_then(|l| l.start_time)
    }

    pub fn particle_position(&self, layer: usize, i: usize) -> Vec3 {
        self.layers[layer].buffer.position(i)
    }

    pub fn launch_velocity(&self, layer: usize, i: usize) -> Vec3 {
        self.layers[layer].velocities[i]
    }
}
