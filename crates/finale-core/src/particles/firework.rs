use super::{random_unit_vector, PointBuffer};
use crate::color::Rgb;
use crate::constants::*;
use crate::easing::{in_quad, out_cubic};
use crate::render::{PointStyle, RenderBackend};
use crate::scene::{LayerId, LayerKind, Scene};
use glam::{Mat4, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

pub const WARM_PALETTE: [Rgb; 4] = [
    [1.0, 0.2, 0.2],
    [1.0, 0.55, 0.0],
    [1.0, 0.85, 0.2],
    [1.0, 0.4, 0.7],
];

pub const COOL_PALETTE: [Rgb; 4] = [
    [0.2, 0.6, 1.0],
    [0.0, 1.0, 0.8],
    [0.6, 0.3, 1.0],
    [0.3, 1.0, 0.4],
];

/// A single shell: particles fly out from the launch point, decelerate, sag
/// under gravity and fade.
pub struct Firework {
    layer: LayerId,
    buffer: PointBuffer,
    velocities: Vec<Vec3>,
    origin: Vec3,
    start_time: f64,
    lifetime: f32,
    style: PointStyle,
}

impl Firework {
    fn new(scene: &mut Scene, rng: &mut StdRng, time: f64) -> Self {
        let angle = rng.gen_range(0.0..TAU);
        let distance = rng.gen_range(FIREWORK_RING_MIN..FIREWORK_RING_MAX);
        let origin = Vec3::new(
            angle.cos() * distance,
            rng.gen_range(FIREWORK_HEIGHT_MIN..FIREWORK_HEIGHT_MAX),
            angle.sin() * distance,
        );
        let palette = if rng.gen_bool(0.5) {
            &WARM_PALETTE
        } else {
            &COOL_PALETTE
        };
        let color = palette[rng.gen_range(0..palette.len())];
        let count = rng.gen_range(FIREWORK_PARTICLES_MIN..=FIREWORK_PARTICLES_MAX);
        let velocities = (0..count)
            .map(|_| random_unit_vector(rng) * rng.gen_range(FIREWORK_SPEED_MIN..FIREWORK_SPEED_MAX))
            .collect();
        Self {
            layer: scene.attach(LayerKind::Points),
            buffer: PointBuffer::new(count),
            velocities,
            origin,
            start_time: time,
            lifetime: rng.gen_range(FIREWORK_LIFETIME_MIN..FIREWORK_LIFETIME_MAX),
            style: PointStyle::new(color, FIREWORK_SIZE),
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn color(&self) -> Rgb {
        self.style.color
    }

    pub fn opacity(&self) -> f32 {
        self.style.opacity
    }

    pub fn position(&self, i: usize) -> Vec3 {
        self.origin + self.buffer.position(i)
    }
}

/// Celebration fireworks. The orchestrator controls cadence; this system only
/// spawns, animates and retires shells.
pub struct FireworkSystem {
    fireworks: Vec<Firework>,
    rng: StdRng,
    spawned: usize,
    disposed: bool,
}

impl FireworkSystem {
    pub fn new(rng: StdRng) -> Self {
        Self {
            fireworks: Vec::new(),
            rng,
            spawned: 0,
            disposed: false,
        }
    }

    pub fn spawn(&mut self, scene: &mut Scene, time: f64) {
        if self.disposed {
            return;
        }
        let firework = Firework::new(scene, &mut self.rng, time);
        log::debug!(
            "firework #{} at ({:.1}, {:.1}, {:.1}) with {} particles",
            self.spawned,
            firework.origin.x,
            firework.origin.y,
            firework.origin.z,
            firework.buffer.len()
        );
        self.spawned += 1;
        self.fireworks.push(firework);
    }

    pub fn update(&mut self, scene: &mut Scene, time: f64) {
        if self.disposed {
            return;
        }
        self.fireworks.retain_mut(|fw| {
            let elapsed = ((time - fw.start_time) as f32).max(0.0);
            let t = elapsed / fw.lifetime;
            if t > 1.0 {
                scene.detach(fw.layer);
                return false;
            }
            let travel = out_cubic(t) * fw.lifetime;
            let drop = 0.5 * FIREWORK_GRAVITY * elapsed * elapsed;
            for i in 0..fw.velocities.len() {
                let mut p = fw.velocities[i] * travel;
                p.y -= drop;
                fw.buffer.set_position(i, p);
            }
            fw.buffer.mark_dirty();
            fw.style.opacity = 1.0 - in_quad(t);
            true
        });
    }

    pub fn draw(&mut self, backend: &mut dyn RenderBackend) {
        for fw in &mut self.fireworks {
            let model = Mat4::from_translation(fw.origin);
            fw.buffer.draw(backend, fw.layer, model, fw.style);
        }
    }

    pub fn dispose(&mut self, scene: &mut Scene) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for fw in self.fireworks.drain(..) {
            scene.detach(fw.layer);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    /// Total shells spawned over the system's lifetime.
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }
}
