use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[ui] missing #{}", element_id);
    }
}

/// Listen for `change` on an element; the handler receives the element.
pub fn add_change_listener<T>(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(&T) + 'static,
) where
    T: JsCast + Clone + 'static,
{
    let Some(el) = element::<T>(document, element_id) else {
        log::warn!("[ui] missing #{}", element_id);
        return;
    };
    let target = el.clone();
    let closure = Closure::wrap(Box::new(move || handler(&target)) as Box<dyn FnMut()>);
    let as_target: &web::EventTarget = el.unchecked_ref();
    _ = as_target.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn element<T: JsCast>(document: &web::Document, element_id: &str) -> Option<T> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn checkbox_checked(document: &web::Document, element_id: &str) -> Option<bool> {
    element::<web::HtmlInputElement>(document, element_id).map(|el| el.checked())
}

pub fn select_value(document: &web::Document, element_id: &str) -> Option<String> {
    element::<web::HtmlSelectElement>(document, element_id).map(|el| el.value())
}

/// Show or hide by the `hidden` class, with an inline style fallback.
pub fn set_shown(el: &web::Element, shown: bool) {
    let cl = el.class_list();
    if shown {
        _ = cl.remove_1(crate::constants::HIDDEN_CLASS);
        _ = el.remove_attribute("style");
    } else {
        _ = cl.add_1(crate::constants::HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
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
