//! Camera description and the pure motion curves the orchestrator drives it
//! with.
//!
//! These types avoid referencing platform-specific APIs. The web front-end
//! consumes them to build its view/projection uniforms.

use crate::constants::*;
use crate::easing::{in_out_cubic, out_expo, out_quad};
use crate::signals::wrapped_angle;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(distance: f32, fov_deg: f32, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: fov_deg.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }
}

/// Eye position on the slow orbit. The orbit tightens as intensity rises and
/// bobs gently on the vertical axis.
pub fn orbit_eye(time: f64, orbit_speed: f32, distance: f32, intensity: f32) -> Vec3 {
    let angle = wrapped_angle(time, orbit_speed * (1.0 + intensity));
    let radius = distance * (1.0 - intensity.clamp(0.0, 1.0) * CAMERA_ORBIT_TIGHTEN);
    Vec3::new(
        angle.sin() * radius,
        wrapped_angle(time, 0.2).sin() * radius * CAMERA_BOB,
        angle.cos() * radius,
    )
}

/// Distance multiplier for the climax dolly given seconds since climax start:
/// pull back, rush forward, then recover to rest.
pub fn climax_dolly(elapsed: f32) -> f32 {
    if elapsed < 0.0 {
        return 1.0;
    }
    if elapsed < DOLLY_PULLBACK_SEC {
        let t = elapsed / DOLLY_PULLBACK_SEC;
        return 1.0 + out_quad(t) * (DOLLY_PULLBACK_SCALE - 1.0);
    }
    let rush = elapsed - DOLLY_PULLBACK_SEC;
    if rush < DOLLY_RUSH_SEC {
        let t = rush / DOLLY_RUSH_SEC;
        return DOLLY_PULLBACK_SCALE - out_expo(t) * (DOLLY_PULLBACK_SCALE - DOLLY_RUSH_SCALE);
    }
    let recover = rush - DOLLY_RUSH_SEC;
    if recover < DOLLY_RECOVER_SEC {
        let t = recover / DOLLY_RECOVER_SEC;
        return DOLLY_RUSH_SCALE + in_out_cubic(t) * (1.0 - DOLLY_RUSH_SCALE);
    }
    1.0
}

/// Vertical field of view in degrees: narrows with intensity and breathes
/// with the heartbeat once intensity builds.
pub fn field_of_view(base_deg: f32, intensity: f32, heartbeat: f32) -> f32 {
    let i = intensity.clamp(0.0, 1.0);
    base_deg - i * CAMERA_FOV_NARROW_DEG + heartbeat * i * CAMERA_FOV_HEARTBEAT_DEG
}
