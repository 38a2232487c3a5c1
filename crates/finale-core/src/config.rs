use crate::constants::*;
use crate::error::SceneError;

/// Orchestrator-level tuning. Subsystem internals use `constants` directly.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Seed for structural randomness (star layout, burst velocity field, ...).
    pub seed: u64,
    pub camera_distance: f32,
    pub base_fov_deg: f32,
    pub orbit_speed: f32,
    pub progress_smoothing: f32,
    pub max_dt_sec: f32,
    pub shake_decay_per_frame: f32,
    pub climax_shake: f32,
    pub celebration_shake: f32,
    pub initial_fireworks: usize,
    pub firework_stagger_sec: f32,
    pub firework_interval_sec: (f32, f32),
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            camera_distance: CAMERA_DISTANCE,
            base_fov_deg: CAMERA_BASE_FOV_DEG,
            orbit_speed: CAMERA_ORBIT_SPEED,
            progress_smoothing: PROGRESS_SMOOTHING,
            max_dt_sec: MAX_FRAME_DT_SEC,
            shake_decay_per_frame: SHAKE_DECAY_PER_FRAME,
            climax_shake: CLIMAX_SHAKE,
            celebration_shake: CELEBRATION_SHAKE,
            initial_fireworks: INITIAL_FIREWORKS,
            firework_stagger_sec: FIREWORK_STAGGER_SEC,
            firework_interval_sec: (FIREWORK_INTERVAL_MIN_SEC, FIREWORK_INTERVAL_MAX_SEC),
        }
    }
}

impl SceneConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.camera_distance > 0.0) {
            return Err(SceneError::InvalidConfig("camera_distance must be positive"));
        }
        if !(self.base_fov_deg > CAMERA_FOV_NARROW_DEG && self.base_fov_deg < 180.0) {
            return Err(SceneError::InvalidConfig("base_fov_deg out of range"));
        }
        if !(0.0..=1.0).contains(&self.progress_smoothing) {
            return Err(SceneError::InvalidConfig("progress_smoothing must be in [0, 1]"));
        }
        if !(self.max_dt_sec > 0.0) {
            return Err(SceneError::InvalidConfig("max_dt_sec must be positive"));
        }
        if !(0.0..1.0).contains(&self.shake_decay_per_frame) {
            return Err(SceneError::InvalidConfig("shake decay must be in [0, 1)"));
        }
        if self.climax_shake < 0.0 || self.celebration_shake < 0.0 {
            return Err(SceneError::InvalidConfig("shake targets must be non-negative"));
        }
        if self.firework_stagger_sec < 0.0 {
            return Err(SceneError::InvalidConfig("firework_stagger_sec must be non-negative"));
        }
        let (lo, hi) = self.firework_interval_sec;
        if !(lo > 0.0 && hi >= lo) {
            return Err(SceneError::InvalidConfig("firework interval range is inverted or empty"));
        }
        Ok(())
    }
}
