use super::PointBuffer;
use crate::color::Rgb;
use crate::constants::*;
use crate::easing::{in_quad, out_cubic};
use crate::render::{PointStyle, RenderBackend};
use crate::scene::{LayerId, LayerKind, Scene};
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub color: Rgb,
    pub delay: f32,
    pub max_radius: f32,
}

/// Layered blast fired at climax: later rings start later and stay smaller.
pub const CLIMAX_RINGS: [RingSpec; 5] = [
    RingSpec {
        color: [1.0, 1.0, 1.0],
        delay: 0.0,
        max_radius: 120.0,
    },
    RingSpec {
        color: [1.0, 0.84, 0.0],
        delay: 0.1,
        max_radius: 100.0,
    },
    RingSpec {
        color: [0.0, 1.0, 1.0],
        delay: 0.25,
        max_radius: 80.0,
    },
    RingSpec {
        color: [1.0, 0.0, 1.0],
        delay: 0.45,
        max_radius: 60.0,
    },
    RingSpec {
        color: [1.0, 0.5, 0.1],
        delay: 0.7,
        max_radius: 45.0,
    },
];

/// One expanding ring. The geometry is a unit annulus scaled by the current
/// radius.
pub struct Shockwave {
    layer: LayerId,
    buffer: PointBuffer,
    start_time: f64,
    duration: f32,
    max_radius: f32,
    radius: f32,
    style: PointStyle,
}

impl Shockwave {
    fn new(scene: &mut Scene, rng: &mut StdRng, start_time: f64, spec: &RingSpec) -> Self {
        let mut buffer = PointBuffer::new(SHOCKWAVE_POINTS);
        for i in 0..SHOCKWAVE_POINTS {
            let angle = i as f32 / SHOCKWAVE_POINTS as f32 * TAU;
            let r = 1.0 - rng.gen_range(0.0..SHOCKWAVE_THICKNESS);
            buffer.set_position(i, Vec3::new(angle.cos() * r, angle.sin() * r, 0.0));
        }
        Self {
            layer: scene.attach(LayerKind::Ring),
            buffer,
            start_time,
            duration: SHOCKWAVE_DURATION_SEC,
            max_radius: spec.max_radius,
            radius: 0.0,
            style: PointStyle {
                opacity: 0.0,
                visible: false,
                ..PointStyle::new(spec.color, 1.2)
            },
        }
    }

    /// Normalized age, negative while the ring is still scheduled.
    pub fn progress(&self, time: f64) -> f32 {
        (time - self.start_time) as f32 / self.duration
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn opacity(&self) -> f32 {
        self.style.opacity
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn is_visible(&self) -> bool {
        self.style.visible
    }

    pub fn color(&self) -> Rgb {
        self.style.color
    }
}

/// Growing list of ring instances, created on demand and disposed on expiry.
pub struct ShockwaveSystem {
    rings: Vec<Shockwave>,
    rng: StdRng,
    disposed: bool,
}

impl ShockwaveSystem {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rings: Vec::new(),
            rng,
            disposed: false,
        }
    }

    /// Add one ring that starts `delay` seconds after `time`.
    pub fn spawn(&mut self, scene: &mut Scene, time: f64, spec: &RingSpec) {
        if self.disposed {
            return;
        }
        let ring = Shockwave::new(scene, &mut self.rng, time + f64::from(spec.delay), spec);
        self.rings.push(ring);
    }

    pub fn trigger_climax(&mut self, scene: &mut Scene, time: f64) {
        for spec in &CLIMAX_RINGS {
            self.spawn(scene, time, spec);
        }
    }

    pub fn update(&mut self, scene: &mut Scene, time: f64) {
        if self.disposed {
            return;
        }
        self.rings.retain_mut(|ring| {
            let p = ring.progress(time);
            if p >= 1.0 {
                scene.detach(ring.layer);
                return false;
            }
            if p < 0.0 {
                ring.style.visible = false;
                return true;
            }
            ring.radius = out_cubic(p) * ring.max_radius;
            ring.style.opacity = 1.0 - in_quad(p);
            ring.style.visible = true;
            true
        });
    }

    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        for ring in &mut self.rings {
            if !ring.style.visible {
                continue;
            }
            let model = Mat4::from_scale(Vec3::splat(ring.radius.max(1e-3)));
            ring.buffer.draw(backend, ring.layer, model, ring.style);
        }
    }

    pub fn dispose(&mut self, scene: &mut Scene) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for ring in self.rings.drain(..) {
            scene.detach(ring.layer);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn len(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    pub fn rings(&self) -> &[Shockwave] {
        &self.rings
    }
}
