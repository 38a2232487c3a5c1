use super::{random_unit_vector, PointBuffer};
use crate::color::mix;
use crate::constants::*;
use crate::easing::out_cubic;
use crate::render::{PointStyle, RenderBackend};
use crate::scene::{LayerId, LayerKind, Scene};
use crate::signals::FrameSignals;
use crate::smoothing::approach_factor;
use glam::{Mat4, Vec3};
use rand::prelude::*;

const STAR_TINTS: [[f32; 3]; 3] = [[0.8, 0.9, 1.0], [1.0, 1.0, 1.0], [1.0, 0.95, 0.8]];

/// Ambient shell of stars that contracts towards the origin once intensity
/// passes the threshold and relaxes back below it.
pub struct StarField {
    layer: Option<LayerId>,
    buffer: PointBuffer,
    origin: Vec<f32>,
    rotation: f32,
    style: PointStyle,
}

impl StarField {
    pub fn new(scene: &mut Scene, rng: &mut StdRng) -> Self {
        Self::with_count(scene, rng, STAR_COUNT)
    }

    pub fn with_count(scene: &mut Scene, rng: &mut StdRng, count: usize) -> Self {
        let mut buffer = PointBuffer::with_colors(count);
        for i in 0..count {
            let radius = rng.gen_range(STAR_RADIUS_MIN..STAR_RADIUS_MAX);
            buffer.set_position(i, random_unit_vector(rng) * radius);
            let tint = STAR_TINTS[rng.gen_range(0..STAR_TINTS.len())];
            buffer.set_color(i, mix(tint, [1.0, 1.0, 1.0], rng.gen_range(0.0..0.5)));
        }
        let origin = buffer.positions().to_vec();
        Self {
            layer: Some(scene.attach(LayerKind::Points)),
            buffer,
            origin,
            rotation: 0.0,
            style: PointStyle {
                opacity: STAR_BASE_OPACITY,
                ..PointStyle::new([1.0, 1.0, 1.0], STAR_BASE_SIZE)
            },
        }
    }

    /// Fraction of the way towards the origin each star is pulled.
    pub fn pull_for_intensity(intensity: f32) -> f32 {
        if intensity > STAR_INTENSITY_THRESHOLD {
            let t = ((intensity - STAR_INTENSITY_THRESHOLD) / (1.0 - STAR_INTENSITY_THRESHOLD))
                .clamp(0.0, 1.0);
            out_cubic(t) * STAR_MAX_PULL
        } else {
            0.0
        }
    }

    pub fn update(&mut self, signals: &FrameSignals) {
        if self.layer.is_none() {
            return;
        }
        let intensity = signals.dramatic_intensity.clamp(0.0, 1.0);
        let keep = 1.0 - Self::pull_for_intensity(intensity);
        let factor = approach_factor(STAR_APPROACH_SPEED, signals.dt);

        let mut moved = false;
        for i in 0..self.buffer.len() {
            let o = i * 3;
            let home = Vec3::new(self.origin[o], self.origin[o + 1], self.origin[o + 2]);
            let p = self.buffer.position(i);
            let delta = (home * keep - p) * factor;
            if delta.length_squared() > 1e-8 {
                self.buffer.set_position(i, p + delta);
                moved = true;
            }
        }
        if moved {
            self.buffer.mark_dirty();
        }

        self.rotation += STAR_ROTATION_SPEED * signals.dt;
        self.style.opacity = STAR_BASE_OPACITY + intensity * (1.0 - STAR_BASE_OPACITY);
        self.style.size = STAR_BASE_SIZE * (1.0 + intensity);
    }

    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        let Some(layer) = self.layer else { return };
        let model = Mat4::from_rotation_y(self.rotation);
        self.buffer.draw(backend, layer, model, self.style);
    }

    pub fn dispose(&mut self, scene: &mut Scene) {
        if let Some(layer) = self.layer.take() {
            scene.detach(layer);
            self.buffer = PointBuffer::new(0);
            self.origin = Vec::new();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.layer.is_none()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        self.buffer.position(i)
    }

    pub fn home_position(&self, i: usize) -> Vec3 {
        let o = i * 3;
        Vec3::new(self.origin[o], self.origin[o + 1], self.origin[o + 2])
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn style(&self) -> PointStyle {
        self.style
    }
}
