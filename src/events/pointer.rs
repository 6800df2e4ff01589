use crate::app::Shared;
use crate::constants::CLICK_SLOP_PX;
use crate::core::pick::{pointer_inside, pointer_ndc};
use crate::core::{InteractionPolicy, Ray};
use crate::dom::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    pub orbiting: bool,
    pub travel: f32,
}

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub shared: Shared,
    pub pointer: Rc<RefCell<PointerState>>,
}

pub fn wire_pointer_handlers(w: PointerWiring) -> Vec<EventListener> {
    let mut listeners = vec![
        wire_pointerdown(&w),
        wire_pointermove(&w),
        wire_pointerup(&w, "pointerup"),
        wire_pointerup(&w, "pointerleave"),
        wire_wheel(&w),
    ];
    if w.shared.twin.borrow().options().policy == InteractionPolicy::Toggle {
        listeners.push(wire_click(&w));
    }
    listeners
}

/// Pointer position relative to the canvas in CSS pixels.
#[inline]
fn canvas_css_pos(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

fn ray_at(w: &PointerWiring, ev: &web::MouseEvent) -> Option<Ray> {
    let rect = w.canvas.get_bounding_client_rect();
    let (x, y) = canvas_css_pos(ev, &w.canvas);
    let (width, height) = (rect.width() as f32, rect.height() as f32);
    let ndc = pointer_ndc(x, y, width, height)?;
    let camera = w.shared.orbit.borrow().camera(width / height);
    Some(camera.ray_from_ndc(ndc))
}

fn hit_at(w: &PointerWiring, ev: &web::MouseEvent) -> Option<usize> {
    let ray = ray_at(w, ev)?;
    w.shared.twin.borrow().pick_input(&ray)
}

fn wire_pointerdown(w: &PointerWiring) -> EventListener {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "pointerdown", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let (x, y) = canvas_css_pos(ev, &w.canvas);
        let hit = hit_at(&w, ev);
        let drawing = w.shared.twin.borrow_mut().pointer_down(hit);
        let capture = w.shared.twin.borrow().captures_pointer();
        {
            let mut ps = w.pointer.borrow_mut();
            ps.x = x;
            ps.y = y;
            ps.down = true;
            ps.orbiting = !drawing;
            ps.travel = 0.0;
        }
        if drawing {
            log::info!("[pointer] begin draw on input {:?}", hit);
        }
        if capture {
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
        }
        ev.prevent_default();
    })
}

fn wire_pointermove(w: &PointerWiring) -> EventListener {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let (x, y) = canvas_css_pos(ev, &w.canvas);
        let (dx, dy, orbiting) = {
            let mut ps = w.pointer.borrow_mut();
            let (dx, dy) = (x - ps.x, y - ps.y);
            ps.x = x;
            ps.y = y;
            if ps.down {
                ps.travel += (dx * dx + dy * dy).sqrt();
            }
            (dx, dy, ps.down && ps.orbiting)
        };

        if w.shared.twin.borrow().is_drawing() {
            let rect = w.canvas.get_bounding_client_rect();
            let inside = pointer_inside(x, y, rect.width() as f32, rect.height() as f32);
            let hit = if inside { hit_at(&w, ev) } else { None };
            let changed = w.shared.twin.borrow_mut().pointer_move_at(hit, inside);
            if changed {
                w.shared.notify_input();
            }
        } else if orbiting {
            let height = w.canvas.get_bounding_client_rect().height() as f32;
            w.shared.orbit.borrow_mut().rotate(dx, dy, height);
        }
    })
}

fn wire_pointerup(w: &PointerWiring, kind: &'static str) -> EventListener {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, kind, move |_ev: web::Event| {
        w.shared.twin.borrow_mut().pointer_up();
        let mut ps = w.pointer.borrow_mut();
        ps.down = false;
        ps.orbiting = false;
    })
}

fn wire_click(w: &PointerWiring) -> EventListener {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "click", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        // an orbit drag that ends over a node is not a click
        if w.pointer.borrow().travel > CLICK_SLOP_PX {
            return;
        }
        let hit = hit_at(&w, ev);
        let changed = w.shared.twin.borrow_mut().click(hit);
        if changed {
            log::info!("[click] toggle input {:?}", hit);
            w.shared.notify_input();
        }
    })
}

fn wire_wheel(w: &PointerWiring) -> EventListener {
    let w = w.clone();
    let target = w.canvas.clone();
    EventListener::new(&target, "wheel", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        w.shared.orbit.borrow_mut().zoom(ev.delta_y() as f32);
        ev.prevent_default();
    })
}
