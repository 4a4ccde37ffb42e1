#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::{load_model, Viewer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod panel;
mod render;
mod ui;

use loader::WebAssetLoader;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn spawn_model_load(document: web::Document, viewer: Rc<RefCell<Viewer>>, loader: WebAssetLoader) {
    spawn_local(async move {
        match load_model(&viewer, &loader).await {
            Ok(id) => {
                log::info!("[model] attached as {:?}", id);
                overlay::hide_loading(&document);
            }
            Err(e) => {
                log::error!("[model] {}", e);
                overlay::show_load_error(&document);
            }
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = ui::read_config(&document);
    log::info!(
        "[scene] night={} basemap={} ({})",
        config.night,
        config.basemap_enabled,
        config.basemap_kind
    );
    let viewer = Rc::new(RefCell::new(Viewer::new(config)));
    let loader = WebAssetLoader;

    ui::wire_controls(&document, &viewer, loader);
    events::wire_input_handlers(events::InputWiring::new(canvas.clone(), viewer.clone()));
    events::wire_global_keydown(document.clone(), viewer.clone());

    spawn_model_load(document.clone(), viewer.clone(), loader);
    let initial = viewer.borrow().initial_basemap_request();
    if let Some(kind) = initial {
        ui::spawn_basemap_load(document.clone(), viewer.clone(), loader, kind);
    }

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        viewer,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
