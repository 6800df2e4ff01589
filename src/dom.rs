use crate::core::config::gamma_label;
use crate::core::constants::{GAMMA_MAX, GAMMA_MIN, GAMMA_STEP};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener that unregisters itself when dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[dom] failed to add `{}` listener: {:?}", kind, e);
        }
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
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

/// Keep the canvas backing store matched to its CSS size.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) -> Option<EventListener> {
    sync_canvas_backing_size(canvas);
    let window = web::window()?;
    let canvas = canvas.clone();
    Some(EventListener::new(&window, "resize", move |_| {
        sync_canvas_backing_size(&canvas);
    }))
}

/// Look up a range input and configure it as the gamma control.
pub fn gamma_control(
    document: &web::Document,
    element_id: &str,
    initial: f32,
) -> Option<web::HtmlInputElement> {
    let Some(input) = document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        log::warn!("[dom] #{} is not an input element", element_id);
        return None;
    };
    input.set_min(&GAMMA_MIN.to_string());
    input.set_max(&GAMMA_MAX.to_string());
    input.set_step(&format!("{:.1}", GAMMA_STEP));
    input.set_value(&gamma_label(initial));
    Some(input)
}

/// Forward every value the gamma control takes to `on_change`.
pub fn wire_gamma_control(
    input: &web::HtmlInputElement,
    mut on_change: impl FnMut(f32) + 'static,
) -> EventListener {
    let source = input.clone();
    EventListener::new(input, "input", move |_| {
        match source.value().parse::<f32>() {
            Ok(g) => on_change(g),
            Err(e) => log::warn!("[dom] bad gamma value {:?}: {}", source.value(), e),
        }
    })
}

pub fn wire_click(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<EventListener> {
    let el = document.get_element_by_id(element_id)?;
    Some(EventListener::new(&el, "click", move |_| handler()))
}
