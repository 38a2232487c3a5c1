use super::{fibonacci_direction, random_unit_vector, PointBuffer};
use crate::color::{countdown_gradient, hsl_to_rgb};
use crate::constants::*;
use crate::easing::out_back;
use crate::render::{PointStyle, RenderBackend};
use crate::scene::{LayerId, LayerKind, Scene};
use crate::signals::FrameSignals;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

// Scales the tangential kick so that, after damping, particles orbit at
// roughly `spin` radians per second.
const SPIRAL_KICK: f32 = 1.0 - VORTEX_DAMPING_PER_FRAME;

/// The central vortex ("time particles"): a velocity-driven cloud that
/// compresses with intensity and bursts outward with overshoot at celebration.
pub struct TimeParticles {
    layer: Option<LayerId>,
    buffer: PointBuffer,
    velocities: Vec<Vec3>,
    initial_radius: Vec<f32>,
    seeds: Vec<Vec3>,
    rng: StdRng,
    style: PointStyle,
}

impl TimeParticles {
    pub fn new(scene: &mut Scene, rng: StdRng) -> Self {
        Self::with_count(scene, rng, VORTEX_COUNT)
    }

    pub fn with_count(scene: &mut Scene, mut rng: StdRng, count: usize) -> Self {
        let mut buffer = PointBuffer::with_colors(count);
        let mut initial_radius = Vec::with_capacity(count);
        let mut seeds = Vec::with_capacity(count);
        for i in 0..count {
            let radius = rng.gen_range(VORTEX_RADIUS_MIN..VORTEX_RADIUS_MAX);
            buffer.set_position(i, fibonacci_direction(i, count) * radius);
            buffer.set_color(i, countdown_gradient(0.0));
            initial_radius.push(radius);
            seeds.push(Vec3::new(rng.gen(), rng.gen(), rng.gen()));
        }
        Self {
            layer: Some(scene.attach(LayerKind::Points)),
            buffer,
            velocities: vec![Vec3::ZERO; count],
            initial_radius,
            seeds,
            rng,
            style: PointStyle {
                opacity: 0.7,
                ..PointStyle::new([1.0, 1.0, 1.0], 0.4)
            },
        }
    }

    pub fn inward_force(intensity: f32) -> f32 {
        VORTEX_BASE_INWARD + intensity.clamp(0.0, 1.0) * (1.0 - VORTEX_BASE_INWARD)
    }

    /// Spring target radius for a particle born at `initial`.
    pub fn target_radius(initial: f32, intensity: f32, celebration_elapsed: Option<f32>) -> f32 {
        let compressed = initial * (1.0 - Self::inward_force(intensity) * VORTEX_COMPRESSION);
        match celebration_elapsed {
            Some(elapsed) => {
                let t = (elapsed / VORTEX_EXPAND_SEC).clamp(0.0, 1.0);
                let expanded = initial * VORTEX_EXPAND_SCALE;
                compressed + (expanded - compressed) * out_back(t)
            }
            None => compressed,
        }
    }

    pub fn update(&mut self, signals: &FrameSignals) {
        if self.layer.is_none() {
            return;
        }
        let intensity = signals.dramatic_intensity.clamp(0.0, 1.0);
        let celebrating = signals.in_celebration();
        let expansion = if celebrating {
            signals.celebration_elapsed
        } else {
            None
        };
        let spin = VORTEX_BASE_SPIN + intensity * VORTEX_SPIN_GAIN;
        let spiral = spin * signals.dt * SPIRAL_KICK;
        let turbulence = VORTEX_TURBULENCE * (1.0 + intensity);
        let count = self.buffer.len();

        for i in 0..count {
            let p = self.buffer.position(i);
            let seed = self.seeds[i];
            let mut v = self.velocities[i];

            let r = p.length();
            let dir = if r > 1e-4 { p / r } else { Vec3::Y };
            let target = Self::target_radius(self.initial_radius[i], intensity, expansion);
            v += dir * (target - r) * VORTEX_SPRING;

            v += Vec3::new(-p.z, 0.0, p.x) * spiral;

            v += Vec3::new(
                (signals.angle(1.3) + seed.x * TAU).sin(),
                (signals.angle(1.1) + seed.y * TAU).cos(),
                (signals.angle(0.9) + seed.z * TAU).sin(),
            ) * turbulence;

            if celebrating {
                v += random_unit_vector(&mut self.rng) * VORTEX_JOY_JITTER * self.rng.gen::<f32>();
            }

            v *= VORTEX_DAMPING_PER_FRAME;
            self.velocities[i] = v;
            self.buffer.set_position(i, p + v);

            let color = if celebrating {
                hsl_to_rgb(signals.turns(0.3) + i as f32 / count as f32, 1.0, 0.6)
            } else if intensity > VORTEX_HUE_INTENSITY {
                hsl_to_rgb(signals.turns(0.5) + seed.x * 0.25, 0.9, 0.6)
            } else {
                countdown_gradient(signals.smooth_progress + (seed.y - 0.5) * 0.1)
            };
            self.buffer.set_color(i, color);
        }
        self.buffer.mark_dirty();

        self.style.opacity = 0.7 + intensity * 0.3;
        self.style.size = 0.4 * (1.0 + intensity);
    }

    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        let Some(layer) = self.layer else { return };
        self.buffer.draw(backend, layer, Mat4::IDENTITY, self.style);
    }

    pub fn dispose(&mut self, scene: &mut Scene) {
        if let Some(layer) = self.layer.take() {
            scene.detach(layer);
            self.buffer = PointBuffer::new(0);
            self.velocities = Vec::new();
            self.initial_radius = Vec::new();
            self.seeds = Vec::new();
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

    pub fn initial_radius(&self, i: usize) -> f32 {
        self.initial_radius[i]
    }

    pub fn color(&self, i: usize) -> Option<[f32; 3]> {
        self.buffer.color(i)
    }

    /// Mean distance of all particles from the origin.
    pub fn mean_radius(&self) -> f32 {
        let n = self.buffer.len();
        if n == 0 {
            return 0.0;
        }
        (0..n).map(|i| self.buffer.position(i).length()).sum::<f32>() / n as f32
    }

    pub fn style(&self) -> PointStyle {
        self.style
    }
}
