use crate::constants::SAMPLE_INTERVAL_MS;
use crate::dom::ResizeListener;
use crate::render::GpuRenderer;
use finale_core::{calculate_state, debug_state, FrameHost, Orchestrator, Phase};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedScene = Rc<RefCell<Orchestrator<GpuRenderer, RafHost>>>;
type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Where each countdown sample comes from.
#[derive(Clone, Copy, Debug)]
pub enum ProgressSource {
    Clock { target_ms: i64 },
    Manual(f32),
}

impl ProgressSource {
    pub fn sample(&self) -> (f32, Phase) {
        match *self {
            ProgressSource::Clock { target_ms } => {
                let state = calculate_state(target_ms, js_sys::Date::now() as i64);
                (state.progress, state.phase)
            }
            ProgressSource::Manual(progress) => debug_state(progress),
        }
    }
}

/// Fixed-cadence `setInterval` feeding progress and phase to the scene,
/// independent of the display refresh rate.
pub struct Sampler {
    handle: Option<i32>,
    _closure: Closure<dyn FnMut()>,
}

impl Sampler {
    pub fn start(scene: &SharedScene, source: ProgressSource) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut sample = sampler_step(scene.clone(), source);
        sample();
        let closure = Closure::wrap(Box::new(sample) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                SAMPLE_INTERVAL_MS,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            handle: Some(handle),
            _closure: closure,
        })
    }

    fn stop(&mut self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web::window()) {
            window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sampler_step(scene: SharedScene, source: ProgressSource) -> impl FnMut() + 'static {
    let mut last_phase: Option<Phase> = None;
    move || {
        let (progress, phase) = source.sample();
        if last_phase != Some(phase) {
            log::info!("[countdown] phase {} progress={:.4}", phase, progress);
            last_phase = Some(phase);
        }
        if let Ok(mut s) = scene.try_borrow_mut() {
            s.update_progress(progress, phase);
        }
    }
}

/// `requestAnimationFrame` scheduling plus the page hooks the scene owns:
/// the resize listener and the countdown sampler.
pub struct RafHost {
    tick: TickSlot,
    handle: Option<i32>,
    resize: Option<ResizeListener>,
    sampler: Option<Sampler>,
}

impl RafHost {
    pub fn new(resize: ResizeListener) -> Self {
        Self {
            tick: Rc::new(RefCell::new(None)),
            handle: None,
            resize: Some(resize),
            sampler: None,
        }
    }

    pub fn set_sampler(&mut self, sampler: Sampler) {
        self.sampler = Some(sampler);
    }

    fn tick_slot(&self) -> TickSlot {
        self.tick.clone()
    }
}

impl FrameHost for RafHost {
    fn request_frame(&mut self) {
        let Some(window) = web::window() else { return };
        if let Some(cb) = self.tick.borrow().as_ref() {
            match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => self.handle = Some(id),
                Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }

    fn release(&mut self) {
        if let Some(mut resize) = self.resize.take() {
            resize.remove();
        }
        self.sampler = None;
        self.tick.borrow_mut().take();
    }
}

/// Install the frame callback, start sampling and request the first frame.
/// Every frame keeps the renderer sized to the canvas backing store before
/// ticking the scene on a monotonic clock.
pub fn start_loop(
    scene: &SharedScene,
    canvas: web::HtmlCanvasElement,
    source: ProgressSource,
) -> anyhow::Result<()> {
    let slot = scene.borrow().host().tick_slot();
    let epoch = Instant::now();
    let scene_tick = scene.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut s = scene_tick.borrow_mut();
        s.resize(canvas.width(), canvas.height());
        s.tick(epoch.elapsed().as_secs_f64());
    }) as Box<dyn FnMut()>));

    let sampler = Sampler::start(scene, source)?;
    let mut s = scene.borrow_mut();
    s.host_mut().set_sampler(sampler);
    s.start();
    Ok(())
}
