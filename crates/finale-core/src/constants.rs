/// Choreography tuning constants.
///
/// Per-frame factors (`*_PER_FRAME`) are applied once per tick regardless of
/// the frame duration; everything else is expressed in seconds or world units.

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp for resumed/backgrounded tabs

// Shared signal shaping
pub const PROGRESS_SMOOTHING: f32 = 0.05;
pub const HEARTBEAT_RATE_GAIN: f32 = 3.0; // pulse frequency boost at full intensity
pub const HEARTBEAT_SHARPNESS: i32 = 8; // even power keeps the pulse non-negative
pub const SHAKE_DECAY_PER_FRAME: f32 = 0.98;
pub const SHAKE_SMOOTHING: f32 = 0.1;
pub const CLIMAX_SHAKE: f32 = 1.0;
pub const CELEBRATION_SHAKE: f32 = 0.3;
pub const SHAKE_AMPLITUDE: f32 = 2.5; // world units at full shake

// Camera
pub const CAMERA_DISTANCE: f32 = 60.0;
pub const CAMERA_BASE_FOV_DEG: f32 = 75.0;
pub const CAMERA_FOV_NARROW_DEG: f32 = 15.0;
pub const CAMERA_FOV_HEARTBEAT_DEG: f32 = 2.0;
pub const CAMERA_ORBIT_SPEED: f32 = 0.05; // radians per second
pub const CAMERA_ORBIT_TIGHTEN: f32 = 0.3; // fraction of distance lost at full intensity
pub const CAMERA_BOB: f32 = 0.1;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Climax dolly: pull back, rush forward, recover
pub const DOLLY_PULLBACK_SEC: f32 = 0.3;
pub const DOLLY_RUSH_SEC: f32 = 2.0;
pub const DOLLY_RECOVER_SEC: f32 = 4.0;
pub const DOLLY_PULLBACK_SCALE: f32 = 1.25;
pub const DOLLY_RUSH_SCALE: f32 = 0.7;

// Star field
pub const STAR_COUNT: usize = 5_000;
pub const STAR_RADIUS_MIN: f32 = 60.0;
pub const STAR_RADIUS_MAX: f32 = 200.0;
pub const STAR_INTENSITY_THRESHOLD: f32 = 0.3;
pub const STAR_MAX_PULL: f32 = 0.7;
pub const STAR_APPROACH_SPEED: f32 = 0.02;
pub const STAR_ROTATION_SPEED: f32 = 0.01; // radians per second
pub const STAR_BASE_OPACITY: f32 = 0.6;
pub const STAR_BASE_SIZE: f32 = 0.6;

// Vortex
pub const VORTEX_COUNT: usize = 3_000;
pub const VORTEX_RADIUS_MIN: f32 = 10.0;
pub const VORTEX_RADIUS_MAX: f32 = 38.0;
pub const VORTEX_BASE_INWARD: f32 = 0.05;
pub const VORTEX_COMPRESSION: f32 = 0.8;
pub const VORTEX_SPRING: f32 = 0.02;
pub const VORTEX_BASE_SPIN: f32 = 0.1; // radians per second
pub const VORTEX_SPIN_GAIN: f32 = 2.0;
pub const VORTEX_TURBULENCE: f32 = 0.02;
pub const VORTEX_DAMPING_PER_FRAME: f32 = 0.95;
pub const VORTEX_EXPAND_SEC: f32 = 3.0;
pub const VORTEX_EXPAND_SCALE: f32 = 1.6;
pub const VORTEX_JOY_JITTER: f32 = 0.15;
pub const VORTEX_HUE_INTENSITY: f32 = 0.5;

// Burst
pub const BURST_LAYER_STAGGER_SEC: f32 = 0.1;
pub const BURST_GRAVITY: f32 = 3.0;
pub const BURST_LIFETIME_MIN: f32 = 2.0;
pub const BURST_LIFETIME_MAX: f32 = 3.5;
pub const BURST_DISTANCE_MIN: f32 = 20.0;
pub const BURST_DISTANCE_MAX: f32 = 70.0;
pub const BURST_FADE_DELAY_SEC: f32 = 1.0;
pub const BURST_FADE_SEC: f32 = 2.5;

// Shockwaves
pub const SHOCKWAVE_POINTS: usize = 720;
pub const SHOCKWAVE_THICKNESS: f32 = 0.08; // fraction of the radius
pub const SHOCKWAVE_DURATION_SEC: f32 = 2.5;

// Fireworks
pub const FIREWORK_PARTICLES_MIN: usize = 400;
pub const FIREWORK_PARTICLES_MAX: usize = 700;
pub const FIREWORK_LIFETIME_MIN: f32 = 2.5;
pub const FIREWORK_LIFETIME_MAX: f32 = 3.5;
pub const FIREWORK_RING_MIN: f32 = 20.0;
pub const FIREWORK_RING_MAX: f32 = 50.0;
pub const FIREWORK_HEIGHT_MIN: f32 = -10.0;
pub const FIREWORK_HEIGHT_MAX: f32 = 30.0;
pub const FIREWORK_SPEED_MIN: f32 = 8.0;
pub const FIREWORK_SPEED_MAX: f32 = 20.0;
pub const FIREWORK_GRAVITY: f32 = 4.0;
pub const FIREWORK_SIZE: f32 = 0.8;

// Flash
pub const FLASH_DECAY_PER_FRAME: f32 = 0.85;
pub const FLASH_HEARTBEAT_GAIN: f32 = 0.15;
pub const FLASH_MAX_OPACITY: f32 = 0.8;
pub const FLASH_HUE_INTENSITY: f32 = 0.8;
pub const FLASH_WARM_INTENSITY: f32 = 0.5;

// Celebration firework cadence
pub const INITIAL_FIREWORKS: usize = 5;
pub const FIREWORK_STAGGER_SEC: f32 = 0.2;
pub const FIREWORK_INTERVAL_MIN_SEC: f32 = 0.3;
pub const FIREWORK_INTERVAL_MAX_SEC: f32 = 0.8;
