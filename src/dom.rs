use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// Raw query string of the current page, including the leading `?`.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Window `resize` listener keeping the canvas backing store at CSS size
/// times devicePixelRatio. Removed explicitly on teardown.
pub struct ResizeListener {
    closure: Option<Closure<dyn FnMut()>>,
}

impl ResizeListener {
    pub fn attach(canvas: &web::HtmlCanvasElement) -> Self {
        sync_canvas_backing_size(canvas);
        let canvas_resize = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        Self {
            closure: Some(closure),
        }
    }

    pub fn remove(&mut self) {
        let Some(closure) = self.closure.take() else {
            return;
        };
        if let Some(window) = web::window() {
            _ = window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Run `handler` once when the page is being unloaded or put in the
/// back/forward cache.
pub fn on_pagehide(mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
