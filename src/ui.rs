use crate::constants::{BASEMAP_TOGGLE_ID, BASEMAP_TYPE_ID, INFO_CLOSE_ID, NIGHT_MODE_ID};
use crate::dom;
use crate::events;
use crate::loader::WebAssetLoader;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{load_basemap, BasemapKind, BasemapOutcome, Viewer, ViewerConfig};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Seed the viewer from the initial state of the page controls.
pub fn read_config(document: &web::Document) -> ViewerConfig {
    let mut config = ViewerConfig::default();
    if let Some(night) = dom::checkbox_checked(document, NIGHT_MODE_ID) {
        config.night = night;
    }
    if let Some(enabled) = dom::checkbox_checked(document, BASEMAP_TOGGLE_ID) {
        config.basemap_enabled = enabled;
    }
    if let Some(value) = dom::select_value(document, BASEMAP_TYPE_ID) {
        match value.parse::<BasemapKind>() {
            Ok(kind) => config.basemap_kind = kind,
            Err(e) => log::warn!("[ui] {}", e),
        }
    }
    config
}

/// Fetch a basemap texture in the background and report the result on the page.
pub fn spawn_basemap_load(
    document: web::Document,
    viewer: Rc<RefCell<Viewer>>,
    loader: WebAssetLoader,
    kind: BasemapKind,
) {
    spawn_local(async move {
        match load_basemap(&viewer, &loader, kind).await {
            Ok(BasemapOutcome::Superseded { seq, latest }) => {
                log::info!("[basemap] {} load #{} superseded by #{}", kind, seq, latest);
            }
            Ok(_) => {
                log::info!("[basemap] {} applied", kind);
                overlay::clear_basemap_status(&document);
            }
            Err(_) => overlay::show_basemap_error(&document, kind),
        }
    });
}

pub fn wire_controls(document: &web::Document, viewer: &Rc<RefCell<Viewer>>, loader: WebAssetLoader) {
    let night_viewer = viewer.clone();
    dom::add_change_listener(
        document,
        NIGHT_MODE_ID,
        move |el: &web::HtmlInputElement| {
            night_viewer.borrow_mut().set_night_mode(el.checked());
        },
    );

    let toggle_viewer = viewer.clone();
    let toggle_doc = document.clone();
    dom::add_change_listener(
        document,
        BASEMAP_TOGGLE_ID,
        move |el: &web::HtmlInputElement| {
            let fetch = toggle_viewer.borrow_mut().set_basemap_enabled(el.checked());
            if let Some(kind) = fetch {
                spawn_basemap_load(toggle_doc.clone(), toggle_viewer.clone(), loader, kind);
            }
        },
    );

    let select_viewer = viewer.clone();
    let select_doc = document.clone();
    dom::add_change_listener(
        document,
        BASEMAP_TYPE_ID,
        move |el: &web::HtmlSelectElement| {
            let kind = match el.value().parse::<BasemapKind>() {
                Ok(kind) => kind,
                Err(e) => {
                    log::warn!("[ui] {}", e);
                    return;
                }
            };
            let fetch = select_viewer.borrow_mut().select_basemap(kind);
            if let Some(kind) = fetch {
                spawn_basemap_load(select_doc.clone(), select_viewer.clone(), loader, kind);
            }
        },
    );

    let close_viewer = viewer.clone();
    let close_doc = document.clone();
    dom::add_click_listener(document, INFO_CLOSE_ID, move || {
        events::dismiss_selection(&close_doc, &close_viewer);
    });
}
