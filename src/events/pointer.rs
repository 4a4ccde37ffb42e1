use crate::constants::MOUSE_BUTTON_PRIMARY;
use crate::dom;
use crate::input::{drag_mode_for, DragMode, PointerTracker, Release};
use crate::overlay;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{pointer_to_ndc, Viewer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Rc<RefCell<Viewer>>,
    pub tracker: Rc<RefCell<PointerTracker>>,
}

impl InputWiring {
    pub fn new(canvas: web::HtmlCanvasElement, viewer: Rc<RefCell<Viewer>>) -> Self {
        Self {
            canvas,
            viewer,
            tracker: Rc::new(RefCell::new(PointerTracker::default())),
        }
    }

    fn viewport_height(&self) -> f32 {
        (self.canvas.client_height() as f32).max(1.0)
    }
}

#[inline]
fn client_pos(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointercancel(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn listen<E>(target: &web::EventTarget, event: &str, handler: impl FnMut(E) + 'static)
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        let mode = drag_mode_for(ev.button(), ev.shift_key());
        w2.tracker
            .borrow_mut()
            .press(ev.pointer_id(), client_pos(&ev), mode);
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
    });
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let motion = w2
            .tracker
            .borrow_mut()
            .motion(ev.pointer_id(), client_pos(&ev));
        let Some((mode, delta)) = motion else {
            return;
        };
        let h = w2.viewport_height();
        let mut viewer = w2.viewer.borrow_mut();
        match mode {
            DragMode::Rotate => viewer.rotate_view(delta.x, delta.y, h),
            DragMode::Pan => viewer.pan_view(delta.x, delta.y, h),
        }
    });
}

fn wire_pointerup(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerup", move |ev: web::PointerEvent| {
        _ = w2.canvas.release_pointer_capture(ev.pointer_id());
        let release = w2
            .tracker
            .borrow_mut()
            .release(ev.pointer_id(), client_pos(&ev));
        if let Release::Click(pos) = release {
            if ev.button() == MOUSE_BUTTON_PRIMARY {
                handle_click(&w2, pos);
            }
        }
    });
}

fn wire_pointercancel(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointercancel", move |_ev: web::PointerEvent| {
        w2.tracker.borrow_mut().cancel();
    });
}

fn wire_wheel(w: &InputWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        w2.viewer.borrow_mut().zoom_view(ev.delta_y() as f32);
    });
}

fn wire_contextmenu(w: &InputWiring) {
    // right drag pans
    listen(&w.canvas, "contextmenu", move |ev: web::MouseEvent| {
        ev.prevent_default();
    });
}

fn handle_click(w: &InputWiring, pos: Vec2) {
    let rect = w.canvas.get_bounding_client_rect();
    let ndc = pointer_to_ndc(
        pos,
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    );
    let report = w.viewer.borrow_mut().click(ndc);
    let Some(report) = report else {
        return;
    };
    log::info!("[pick] {}", report.display_name());
    if let Some(document) = dom::window_document() {
        overlay::show_info_panel(&document, &report);
    }
}
