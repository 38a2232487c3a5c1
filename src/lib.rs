#![cfg(target_arch = "wasm32")]
use finale_core::{Orchestrator, SceneConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod frame;
mod params;
mod render;

use frame::ProgressSource;
use params::LaunchParams;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("finale-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, constants::CANVAS_ID)?;

    let params = LaunchParams::from_query(&dom::location_search());
    let source = match params.progress {
        Some(progress) => ProgressSource::Manual(progress),
        None => {
            let now = js_sys::Date::now();
            let offset = js_sys::Date::new_0().get_timezone_offset();
            ProgressSource::Clock {
                target_ms: params.target_or_midnight(now, offset),
            }
        }
    };
    let seed = params.seed.unwrap_or_else(rand::random);
    log::info!("[launch] source={:?} seed={}", source, seed);

    // Keep the backing store at CSS size * devicePixelRatio before the
    // surface is configured.
    let resize = dom::ResizeListener::attach(&canvas);
    let renderer = render::GpuRenderer::new(&canvas).await?;
    let host = frame::RafHost::new(resize);
    let orchestrator = Orchestrator::new(renderer, host, SceneConfig::with_seed(seed))?;
    let scene: frame::SharedScene = Rc::new(RefCell::new(orchestrator));

    frame::start_loop(&scene, canvas, source)?;

    let scene_hide = scene.clone();
    dom::on_pagehide(move || {
        if let Ok(mut s) = scene_hide.try_borrow_mut() {
            s.dispose();
        }
    });
    Ok(())
}
