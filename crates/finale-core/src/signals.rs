use crate::countdown::Phase;
use std::f64::consts::TAU;

/// Shared per-frame signals, computed once by the orchestrator and handed to
/// every subsystem by value. Subsystems never write back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSignals {
    /// Seconds since the scene's first tick. Kept in f64 so that an
    /// indefinite run does not lose sub-frame resolution.
    pub time: f64,
    /// Clamped frame delta in seconds.
    pub dt: f32,
    pub progress: f32,
    pub smooth_progress: f32,
    pub dramatic_intensity: f32,
    pub heartbeat_intensity: f32,
    pub shake_intensity: f32,
    pub phase: Phase,
    /// Seconds since the last climax trigger.
    pub climax_elapsed: Option<f32>,
    /// Seconds since the last celebration trigger.
    pub celebration_elapsed: Option<f32>,
}

impl FrameSignals {
    pub fn in_celebration(&self) -> bool {
        self.phase == Phase::Celebration
    }

    /// Phase of an oscillator turning at `rate` radians per second.
    pub fn angle(&self, rate: f32) -> f32 {
        wrapped_angle(self.time, rate)
    }

    /// Position within a cycle that repeats `rate` times per second, in [0, 1).
    pub fn turns(&self, rate: f32) -> f32 {
        (self.time * f64::from(rate)).rem_euclid(1.0) as f32
    }
}

/// `time * rate` reduced to one turn before narrowing to f32.
pub fn wrapped_angle(time: f64, rate: f32) -> f32 {
    (time * f64::from(rate)).rem_euclid(TAU) as f32
}
