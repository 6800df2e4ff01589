use crate::core::config::gamma_label;
use crate::core::protocol::{encode_set_input, push_from_value};
use crate::core::{parse_push, OrbitControls, TwinOptions, TwinState};
use crate::dom::{self, EventListener};
use crate::events::{self, PointerState, PointerWiring};
use crate::frame::{self, FrameContext, RenderLoop};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// State shared by every callback of one view.
#[derive(Clone)]
pub(crate) struct Shared {
    pub twin: Rc<RefCell<TwinState>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
    pub input_sink: Rc<RefCell<Option<js_sys::Function>>>,
    pub gamma_control: Option<web_sys::HtmlInputElement>,
}

impl Shared {
    fn new(options: TwinOptions, gamma_control: Option<web_sys::HtmlInputElement>) -> Self {
        Self {
            twin: Rc::new(RefCell::new(TwinState::new(options))),
            orbit: Rc::new(RefCell::new(OrbitControls::default())),
            input_sink: Rc::new(RefCell::new(None)),
            gamma_control,
        }
    }

    /// Set gamma from code and move the gamma control to match.
    pub fn set_gamma(&self, gamma: f32) {
        let applied = {
            let mut twin = self.twin.borrow_mut();
            twin.set_gamma(gamma);
            twin.gamma()
        };
        if let Some(control) = &self.gamma_control {
            control.set_value(&gamma_label(applied));
        }
    }

    /// Send `{ input: [...] }` to the registered callback when reporting is on.
    ///
    /// Must be called with no twin borrow held: the callback may re-enter.
    pub fn notify_input(&self) {
        let values = {
            let twin = self.twin.borrow();
            if !twin.options().report_input {
                return;
            }
            twin.input_values().to_vec()
        };
        let Some(callback) = self.input_sink.borrow().clone() else {
            return;
        };
        let payload = match encode_set_input(&values) {
            Ok(json) => js_sys::JSON::parse(&json),
            Err(e) => {
                log::error!("[set_input] encode failed: {}", e);
                return;
            }
        };
        match payload {
            Ok(v) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &v) {
                    log::warn!("[set_input] callback threw: {:?}", e);
                }
            }
            Err(e) => log::error!("[set_input] JSON.parse failed: {:?}", e),
        }
    }

    pub fn reset(&self) {
        let changed = self.twin.borrow_mut().reset();
        if changed {
            log::info!("[input] reset");
            self.notify_input();
        }
    }
}

struct View {
    render_loop: RenderLoop,
    _listeners: Vec<EventListener>,
    shared: Shared,
}

impl Drop for View {
    fn drop(&mut self) {
        self.render_loop.stop();
        log::info!("view torn down");
    }
}

fn js_to_json(value: &JsValue) -> anyhow::Result<Option<String>> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    if let Some(s) = value.as_string() {
        return Ok(Some(s));
    }
    let json = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!(format!("JSON.stringify failed: {:?}", e)))?;
    Ok(json.as_string())
}

async fn init_view(canvas_id: &str, options: &JsValue) -> anyhow::Result<View> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let options = match js_to_json(options)? {
        Some(json) => TwinOptions::from_json(&json)?,
        None => TwinOptions::default(),
    };
    log::info!(
        "[mount] #{} policy={:?} output={:?} gamma={:.1}",
        canvas_id,
        options.policy,
        options.output,
        options.gamma
    );
    let gamma_control = options
        .gamma_control_id
        .as_deref()
        .and_then(|id| dom::gamma_control(&document, id, options.gamma));
    let shared = Shared::new(options.clone(), gamma_control.clone());

    let mut listeners = Vec::new();
    listeners.extend(dom::wire_canvas_resize(&canvas));
    listeners.extend(events::wire_pointer_handlers(PointerWiring {
        canvas: canvas.clone(),
        shared: shared.clone(),
        pointer: Rc::new(RefCell::new(PointerState::default())),
    }));
    if let Some(control) = &gamma_control {
        let s = shared.clone();
        listeners.push(dom::wire_gamma_control(control, move |g| {
            s.twin.borrow_mut().set_gamma(g);
        }));
    }
    if let Some(id) = options.reset_control_id.as_deref() {
        let s = shared.clone();
        listeners.extend(dom::wire_click(&document, id, move || s.reset()));
    }

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        shared: shared.clone(),
        canvas,
        gpu,
    }));
    let render_loop = frame::start_loop(frame_ctx);

    Ok(View {
        render_loop,
        _listeners: listeners,
        shared,
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nn-twin loaded");
    Ok(())
}

/// Mount a view on `<canvas id=canvas_id>`. `options` may be undefined, an
/// object, or a JSON string.
#[wasm_bindgen]
pub async fn mount(canvas_id: String, options: JsValue) -> Result<TwinHandle, JsValue> {
    match init_view(&canvas_id, &options).await {
        Ok(view) => Ok(TwinHandle { view: Some(view) }),
        Err(e) => {
            log::error!("mount error: {:?}", e);
            Err(JsValue::from_str(&format!("{:#}", e)))
        }
    }
}

#[wasm_bindgen]
pub struct TwinHandle {
    view: Option<View>,
}

impl TwinHandle {
    fn shared(&self) -> Option<&Shared> {
        self.view.as_ref().map(|v| &v.shared)
    }
}

#[wasm_bindgen]
impl TwinHandle {
    /// Apply a remote "weights" event. Never throws; bad parts are logged.
    pub fn push(&self, payload: JsValue) {
        let Some(shared) = self.shared() else {
            return;
        };
        let json = match js_to_json(&payload) {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(e) => {
                log::warn!("[push] ignoring payload: {:#}", e);
                return;
            }
        };
        match serde_json::from_str::<serde_json::Value>(&json) {
            Ok(value) => {
                shared.twin.borrow_mut().handle_push(push_from_value(&value));
            }
            Err(e) => log::warn!("[push] ignoring payload: {}", e),
        }
    }

    /// Apply a push given as a JSON string. Errors only on unparsable JSON.
    pub fn push_json(&self, json: &str) -> Result<(), JsValue> {
        let Some(shared) = self.shared() else {
            return Ok(());
        };
        let push = parse_push(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        shared.twin.borrow_mut().handle_push(push);
        Ok(())
    }

    pub fn reset(&self) {
        if let Some(shared) = self.shared() {
            shared.reset();
        }
    }

    pub fn set_gamma(&self, gamma: f32) {
        if let Some(shared) = self.shared() {
            shared.set_gamma(gamma);
        }
    }

    pub fn gamma(&self) -> f32 {
        self.shared()
            .map(|s| s.twin.borrow().gamma())
            .unwrap_or(crate::core::constants::DEFAULT_GAMMA)
    }

    /// Current input vector (empty before the first topology).
    pub fn input(&self) -> Vec<f32> {
        self.shared()
            .map(|s| s.twin.borrow().input_values().to_vec())
            .unwrap_or_default()
    }

    /// Current output probabilities (empty before the first topology).
    pub fn output(&self) -> Vec<f32> {
        self.shared()
            .map(|s| s.twin.borrow().activations().output.clone())
            .unwrap_or_default()
    }

    /// Register the legacy `set_input` sink; only called when `report_input` is set.
    pub fn on_input(&self, callback: js_sys::Function) {
        if let Some(shared) = self.shared() {
            *shared.input_sink.borrow_mut() = Some(callback);
        }
    }

    /// Stop rendering and release every listener. Further calls are no-ops.
    pub fn destroy(&mut self) {
        self.view.take();
    }
}
