//! Scene orchestrator: owns every subsystem, the camera and the frame loop
//! contract, and turns progress/phase into shared per-frame signals.

use crate::camera::{climax_dolly, field_of_view, orbit_eye, Camera};
use crate::color::Rgb;
use crate::config::SceneConfig;
use crate::constants::*;
use crate::countdown::Phase;
use crate::easing::dramatic_ramp;
use crate::error::SceneError;
use crate::particles::{
    subsystem_rng, BurstSystem, FireworkSystem, FlashPlane, ShockwaveSystem, StarField,
    TimeParticles,
};
use crate::render::{FrameHost, RenderBackend};
use crate::scene::Scene;
use crate::signals::FrameSignals;
use crate::smoothing::smooth_lerp;
use glam::Vec3;
use rand::prelude::*;
use smallvec::SmallVec;
use std::f32::consts::PI;

const CLEAR_COLOR: Rgb = [0.0, 0.0, 0.02];

// Indices used to derive each subsystem's generator from the scene seed.
const RNG_STARS: u64 = 0;
const RNG_VORTEX: u64 = 1;
const RNG_BURST: u64 = 2;
const RNG_SHOCKWAVES: u64 = 3;
const RNG_FIREWORKS: u64 = 4;
const RNG_LIVE: u64 = 5;

pub struct Orchestrator<R: RenderBackend, H: FrameHost> {
    backend: R,
    host: H,
    scene: Scene,
    camera: Camera,
    config: SceneConfig,

    stars: StarField,
    vortex: TimeParticles,
    burst: BurstSystem,
    shockwaves: ShockwaveSystem,
    fireworks: FireworkSystem,
    flash: FlashPlane,

    live_rng: StdRng,

    progress: f32,
    phase: Phase,
    start_sec: Option<f64>,
    last_sec: Option<f64>,
    time: f64,
    smooth_progress: f32,
    pulse_phase: f32,
    shake_intensity: f32,
    target_shake_intensity: f32,
    climax_start: Option<f64>,
    celebration_start: Option<f64>,
    pending_spawns: SmallVec<[f64; 8]>,
    next_firework_at: Option<f64>,
    signals: FrameSignals,
    frames: u64,
    disposed: bool,
}

impl<R: RenderBackend, H: FrameHost> Orchestrator<R, H> {
    /// Build the scene and every subsystem. Fails when the backend has no
    /// surface to attach to or the config is unusable.
    pub fn new(backend: R, host: H, config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let (width, height) = backend
            .surface_size()
            .ok_or(SceneError::SurfaceUnavailable)?;
        let aspect = width.max(1) as f32 / height.max(1) as f32;

        let seed = config.seed;
        let mut scene = Scene::new();
        let stars = StarField::new(&mut scene, &mut subsystem_rng(seed, RNG_STARS));
        let vortex = TimeParticles::new(&mut scene, subsystem_rng(seed, RNG_VORTEX));
        let burst = BurstSystem::new(&mut scene, &mut subsystem_rng(seed, RNG_BURST));
        let shockwaves = ShockwaveSystem::new(subsystem_rng(seed, RNG_SHOCKWAVES));
        let fireworks = FireworkSystem::new(subsystem_rng(seed, RNG_FIREWORKS));
        let flash = FlashPlane::new(&mut scene);

        log::info!(
            "[scene] {}x{} stars={} vortex={} burst={} layers={}",
            width,
            height,
            stars.len(),
            vortex.len(),
            burst.particle_count(),
            scene.len()
        );

        Ok(Self {
            backend,
            host,
            camera: Camera::new(config.camera_distance, config.base_fov_deg, aspect),
            scene,
            stars,
            vortex,
            burst,
            shockwaves,
            fireworks,
            flash,
            live_rng: subsystem_rng(seed, RNG_LIVE),
            progress: 0.0,
            phase: Phase::Dormant,
            start_sec: None,
            last_sec: None,
            time: 0.0,
            smooth_progress: 0.0,
            pulse_phase: 0.0,
            shake_intensity: 0.0,
            target_shake_intensity: 0.0,
            climax_start: None,
            celebration_start: None,
            pending_spawns: SmallVec::new(),
            next_firework_at: None,
            signals: FrameSignals::default(),
            frames: 0,
            disposed: false,
            config,
        })
    }

    /// Request the first frame.
    pub fn start(&mut self) {
        if self.disposed {
            return;
        }
        self.host.request_frame();
    }

    /// Store the latest progress and phase. Entering climax or celebration
    /// fires its trigger once per entry; leaving a phase fires nothing.
    pub fn update_progress(&mut self, progress: f32, phase: Phase) {
        if self.disposed {
            log::debug!("update_progress ignored after dispose");
            return;
        }
        let previous = self.phase;
        self.progress = if progress.is_finite() { progress } else { 0.0 };
        self.phase = phase;
        if phase == previous {
            return;
        }
        match phase {
            Phase::Climax => self.trigger_climax(),
            Phase::Celebration => self.trigger_celebration(),
            _ => {}
        }
    }

    pub fn trigger_climax(&mut self) {
        if self.disposed {
            return;
        }
        let now = self.time;
        log::info!("[scene] climax at t={:.2}s", now);
        self.climax_start = Some(now);
        self.burst.trigger(now);
        self.shockwaves.trigger_climax(&mut self.scene, now);
        self.target_shake_intensity = self.config.climax_shake;
        self.flash.trigger_flash(1.0);
    }

    pub fn trigger_celebration(&mut self) {
        if self.disposed {
            return;
        }
        let now = self.time;
        log::info!("[scene] celebration at t={:.2}s", now);
        self.celebration_start = Some(now);
        self.target_shake_intensity = self.config.celebration_shake;
        self.pending_spawns.clear();
        let stagger = f64::from(self.config.firework_stagger_sec);
        for i in 0..self.config.initial_fireworks {
            self.pending_spawns.push(now + i as f64 * stagger);
        }
        let burst_end = now + self.config.initial_fireworks as f64 * stagger;
        self.next_firework_at = Some(burst_end + f64::from(self.next_firework_interval()));
    }

    /// One display refresh. `now_sec` is a monotonic host clock in seconds.
    /// Returns false, without doing any work or scheduling another frame,
    /// once the orchestrator has been disposed.
    pub fn tick(&mut self, now_sec: f64) -> bool {
        if self.disposed {
            return false;
        }
        let start = *self.start_sec.get_or_insert(now_sec);
        let dt = match self.last_sec {
            Some(last) => ((now_sec - last) as f32).clamp(0.0, self.config.max_dt_sec),
            None => 0.0,
        };
        self.last_sec = Some(now_sec);
        self.time = (now_sec - start).max(self.time);
        self.frames += 1;

        self.signals = self.compute_signals(dt);
        let signals = self.signals;

        self.run_spawn_schedule();

        self.stars.update(&signals);
        self.vortex.update(&signals);
        self.burst.update(signals.time);
        self.shockwaves.update(&mut self.scene, signals.time);
        self.fireworks.update(&mut self.scene, signals.time);
        self.flash.update(&signals);

        self.update_camera(&signals);
        self.render();

        self.host.request_frame();
        true
    }

    fn compute_signals(&mut self, dt: f32) -> FrameSignals {
        let intensity = dramatic_ramp(self.progress.clamp(0.0, 1.0));
        self.smooth_progress = smooth_lerp(
            self.smooth_progress,
            self.progress,
            self.config.progress_smoothing,
            dt,
        );
        self.pulse_phase += dt * (1.0 + intensity * HEARTBEAT_RATE_GAIN);
        // sin(x * pi)^8 repeats every unit, so wrapping keeps the f32 phase precise.
        self.pulse_phase = self.pulse_phase.rem_euclid(2.0);
        let heartbeat = (self.pulse_phase * PI).sin().powi(HEARTBEAT_SHARPNESS);

        // Frame-count based decay, so the shake tail depends on frame rate.
        self.target_shake_intensity *= self.config.shake_decay_per_frame;
        self.shake_intensity = smooth_lerp(
            self.shake_intensity,
            self.target_shake_intensity,
            SHAKE_SMOOTHING,
            dt,
        );

        FrameSignals {
            time: self.time,
            dt,
            progress: self.progress,
            smooth_progress: self.smooth_progress,
            dramatic_intensity: intensity,
            heartbeat_intensity: heartbeat,
            shake_intensity: self.shake_intensity,
            phase: self.phase,
            climax_elapsed: self.climax_start.map(|s| (self.time - s) as f32),
            celebration_elapsed: self.celebration_start.map(|s| (self.time - s) as f32),
        }
    }

    fn run_spawn_schedule(&mut self) {
        let now = self.time;
        let mut i = 0;
        while i < self.pending_spawns.len() {
            if self.pending_spawns[i] <= now {
                self.pending_spawns.swap_remove(i);
                self.fireworks.spawn(&mut self.scene, now);
            } else {
                i += 1;
            }
        }

        if self.phase != Phase::Celebration {
            return;
        }
        if let Some(at) = self.next_firework_at {
            if now >= at {
                self.fireworks.spawn(&mut self.scene, now);
                self.next_firework_at = Some(now + f64::from(self.next_firework_interval()));
            }
        }
    }

    fn next_firework_interval(&mut self) -> f32 {
        let (lo, hi) = self.config.firework_interval_sec;
        if hi > lo {
            self.live_rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    fn update_camera(&mut self, signals: &FrameSignals) {
        let intensity = signals.dramatic_intensity;
        let dolly = signals.climax_elapsed.map_or(1.0, climax_dolly);
        let eye = orbit_eye(
            signals.time,
            self.config.orbit_speed,
            self.config.camera_distance * dolly,
            intensity,
        );
        let shake = if signals.shake_intensity > 1e-4 {
            Vec3::new(
                self.live_rng.gen_range(-1.0..=1.0),
                self.live_rng.gen_range(-1.0..=1.0),
                self.live_rng.gen_range(-1.0..=1.0),
            ) * signals.shake_intensity
                * SHAKE_AMPLITUDE
        } else {
            Vec3::ZERO
        };
        self.camera.eye = eye + shake;
        self.camera.target = Vec3::ZERO;
        self.camera.fovy_radians =
            field_of_view(self.config.base_fov_deg, intensity, signals.heartbeat_intensity)
                .to_radians();
    }

    fn render(&mut self) {
        let backend: &mut dyn RenderBackend = &mut self.backend;
        backend.begin_frame(&self.camera, CLEAR_COLOR);
        self.stars.draw(backend);
        self.vortex.draw(backend);
        self.burst.draw(backend);
        self.shockwaves.draw(backend);
        self.fireworks.draw(backend);
        self.flash.draw(backend);
        for layer in self.scene.drain_released() {
            backend.release_layer(layer);
        }
        backend.end_frame();
    }

    /// Viewport change from the host. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        self.camera.set_viewport(width, height);
        self.backend.resize(width, height);
    }

    /// Tear down the loop and every subsystem. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.host.cancel_frame();
        self.host.release();
        self.pending_spawns.clear();
        self.next_firework_at = None;

        self.stars.dispose(&mut self.scene);
        self.vortex.dispose(&mut self.scene);
        self.burst.dispose(&mut self.scene);
        self.shockwaves.dispose(&mut self.scene);
        self.fireworks.dispose(&mut self.scene);
        self.flash.dispose(&mut self.scene);
        for layer in self.scene.drain_released() {
            self.backend.release_layer(layer);
        }
        self.backend.detach();
        log::info!("[scene] disposed after {} frames", self.frames);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds since the first tick.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Signals computed on the most recent tick.
    pub fn signals(&self) -> FrameSignals {
        self.signals
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn target_shake_intensity(&self) -> f32 {
        self.target_shake_intensity
    }

    pub fn climax_start(&self) -> Option<f64> {
        self.climax_start
    }

    pub fn celebration_start(&self) -> Option<f64> {
        self.celebration_start
    }

    pub fn pending_spawns(&self) -> usize {
        self.pending_spawns.len()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn vortex(&self) -> &TimeParticles {
        &self.vortex
    }

    pub fn burst(&self) -> &BurstSystem {
        &self.burst
    }

    pub fn shockwaves(&self) -> &ShockwaveSystem {
        &self.shockwaves
    }

    pub fn fireworks(&self) -> &FireworkSystem {
        &self.fireworks
    }

    pub fn flash(&self) -> &FlashPlane {
        &self.flash
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut R {
        &mut self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
