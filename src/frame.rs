//! The frame driver: the per-refresh callback plus scheduling, stop, and
//! teardown.

use crate::core::{DriverState, ResourceLedger, SharedInputState, Simulation};
use crate::dom;
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub sim: Simulation,
    pub ledger: ResourceLedger,
    pub input: Rc<RefCell<SharedInputState>>,
    pub gpu: Option<render::GpuState<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub driver: DriverState,
    pub last_instant: Instant,
    pub pending_frame: Option<i32>,
    torn_down: bool,
}

impl FrameContext {
    pub fn new(
        sim: Simulation,
        ledger: ResourceLedger,
        input: Rc<RefCell<SharedInputState>>,
        gpu: Option<render::GpuState<'static>>,
        canvas: web::HtmlCanvasElement,
    ) -> Self {
        Self {
            sim,
            ledger,
            input,
            gpu,
            canvas,
            driver: DriverState::new(),
            last_instant: Instant::now(),
            pending_frame: None,
            torn_down: false,
        }
    }

    /// One frame: measure the delta, take a single input snapshot, advance
    /// the simulation, then submit the render. Every particle in the frame
    /// sees the same snapshot; adapters may overwrite between frames only.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let snapshot = self.input.borrow().snapshot();
        self.sim.advance(dt_sec, &snapshot);

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            self.sim.camera.set_viewport(w as f32, h as f32);
            if let Err(e) = g.render(dt_sec, &self.sim) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    /// Viewport-change entry point. Also safe before GPU init completes: the
    /// camera keeps the latest aspect and the renderer picks up the size on
    /// its first frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.sim.camera.set_viewport(width as f32, height as f32);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
        }
    }
}

/// Initialize WebGPU for the canvas, or degrade to no rendering at all.
pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    sim: &Simulation,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy the 'static lifetime of the surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, sim).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Schedule the first frame; each completed frame reschedules the next until
/// `stop` flips the run state.
pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) {
    if !ctx.borrow_mut().driver.start() {
        return;
    }
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let ctx_tick = ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let keep_going = {
            let mut c = ctx_tick.borrow_mut();
            c.pending_frame = None;
            c.frame();
            c.driver.is_running()
        };
        if keep_going {
            if let Some(w) = web::window() {
                if let Ok(id) = w.request_animation_frame(
                    tick_clone
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    ctx_tick.borrow_mut().pending_frame = Some(id);
                }
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Ok(id) =
            w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            ctx.borrow_mut().pending_frame = Some(id);
        }
    }
}

/// Idempotent: cancels the pending callback and moves the driver to
/// `Stopped`. Callable at any time, also before `start_loop`.
pub fn stop(ctx: &Rc<RefCell<FrameContext>>) {
    let mut c = ctx.borrow_mut();
    c.driver.stop();
    if let Some(id) = c.pending_frame.take() {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(id);
        }
    }
}

/// Stop the loop and release every scene resource exactly once. Safe to call
/// after `stop`, and safe to call twice.
pub fn teardown(ctx: &Rc<RefCell<FrameContext>>) {
    stop(ctx);
    let mut c = ctx.borrow_mut();
    if c.torn_down {
        return;
    }
    c.torn_down = true;
    let c = &mut *c;
    let released = c.sim.dispose(&mut c.ledger);
    if c.ledger.live_count() > 0 {
        log::warn!(
            "{} visual handles still live after teardown",
            c.ledger.live_count()
        );
    }
    log::info!("scene teardown: released {released} visual handles");
    if let Some(mut g) = c.gpu.take() {
        g.teardown();
    }
    dom::detach_render_canvas(&c.canvas);
}
