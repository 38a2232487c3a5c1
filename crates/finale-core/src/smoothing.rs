use glam::Vec3;

// Reference frame rate the smoothing speeds were tuned at.
const REFERENCE_FPS: f32 = 60.0;

/// Frame-rate independent exponential approach of `current` towards `target`.
///
/// `speed` is the fraction of the remaining distance covered per 1/60 s:
/// 0 never moves, 1 snaps on the first non-zero step. Never overshoots for
/// `speed` in \[0, 1\].
#[inline]
pub fn smooth_lerp(current: f32, target: f32, speed: f32, dt_sec: f32) -> f32 {
    current + (target - current) * approach_factor(speed, dt_sec)
}

#[inline]
pub fn smooth_lerp_vec3(current: Vec3, target: Vec3, speed: f32, dt_sec: f32) -> Vec3 {
    current + (target - current) * approach_factor(speed, dt_sec)
}

/// Fraction of the remaining distance covered over `dt_sec`.
#[inline]
pub fn approach_factor(speed: f32, dt_sec: f32) -> f32 {
    1.0 - (1.0 - speed).powf(dt_sec * REFERENCE_FPS)
}
