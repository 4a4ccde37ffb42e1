use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::Viewer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drop the selection and close the info panel.
pub fn dismiss_selection(document: &web::Document, viewer: &Rc<RefCell<Viewer>>) {
    if viewer.borrow_mut().clear_selection() {
        log::info!("[pick] selection cleared");
    }
    overlay::hide_info_panel(document);
}

pub fn wire_global_keydown(document: web::Document, viewer: Rc<RefCell<Viewer>>) {
    let target = document.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() == "Escape" {
            dismiss_selection(&document, &viewer);
        }
    }) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
