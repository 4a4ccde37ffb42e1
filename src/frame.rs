use crate::constants::MAX_FRAME_DT_SEC;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viewer_core::Viewer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        // long pauses (background tabs) must not fling the damped orbit
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT_SEC);

        let (width, height) = (self.canvas.width(), self.canvas.height());
        let mut viewer = self.viewer.borrow_mut();
        if width > 0 && height > 0 {
            viewer.resize(width as f32, height as f32);
        }
        viewer.tick(dt_sec);

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        gpu.resize_if_needed(width, height);
        match gpu.render(&viewer) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {}
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
