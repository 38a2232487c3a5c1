/// Front-end tuning constants: page wiring, sampling cadence and GPU limits.
///
/// The engine's own tuning lives in `finale_core::constants`; these only
/// concern how the browser host drives and draws it.
// Canvas the scene renders into
pub const CANVAS_ID: &str = "finale-canvas";

// Countdown sampling cadence, independent of the display refresh
pub const SAMPLE_INTERVAL_MS: i32 = 50;

// Query-string keys for launch parameters
pub const PARAM_TARGET: &str = "target";
pub const PARAM_PROGRESS: &str = "progress";
pub const PARAM_SEED: &str = "seed";

pub const MS_PER_MINUTE: f64 = 60_000.0;
pub const MS_PER_DAY: f64 = 86_400_000.0;

// Smallest per-layer instance allocation; layers grow in powers of two
pub const MIN_LAYER_CAPACITY: usize = 64;

// Hard cap on instances uploaded for a single layer
pub const MAX_LAYER_INSTANCES: usize = 1 << 16;

// Fragment falloff exponent for the soft sprite edge
pub const SPRITE_SOFTNESS: f32 = 2.0;
