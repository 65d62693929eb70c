#![cfg(target_arch = "wasm32")]

//! Animated hero background for a single-page portfolio: a WebGPU particle
//! field with pointer parallax and audio-reactive displacement, driven by a
//! requestAnimationFrame loop.

use crate::core::{
    Bounds, ResourceLedger, SharedInputState, Simulation, FIELD_BOUNDS, PARTICLE_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, ctx: Rc<RefCell<frame::FrameContext>>) {
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        ctx.borrow_mut()
            .resize(canvas_resize.width(), canvas_resize.height());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_audio_toggle(document: &web::Document, feed: Rc<audio::AudioFeed>) {
    let doc = document.clone();
    dom::add_click_listener(document, AUDIO_TOGGLE_ID, move || {
        let playing = audio::toggle_playback(&feed);
        overlay::set_audio_button_state(&doc, AUDIO_TOGGLE_ID, playing);
    });
}

/// Hold the loading screen for its dwell time, then hide it and start the
/// frame loop. The UI layer owns when the visual subsystem begins.
fn schedule_reveal(ctx: Rc<RefCell<frame::FrameContext>>) {
    let reveal = Closure::wrap(Box::new(move || {
        if let Some(doc) = dom::window_document() {
            overlay::hide(&doc, LOADING_OVERLAY_ID);
        }
        frame::start_loop(ctx.clone());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            reveal.as_ref().unchecked_ref(),
            REVEAL_DELAY_MS,
        ) {
            log::warn!("reveal timer: {:?}", e);
        }
    }
    reveal.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("aurora-web starting");

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

    // The scene owns exactly one set of graphics resources per mounted view;
    // a second init call is a no-op.
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    // A missing mount point means "not ready": the page renders without a
    // background and no frame loop starts.
    let Some(canvas) = dom::mount_render_canvas(&document, HERO_MOUNT_ID) else {
        log::info!("missing #{HERO_MOUNT_ID}; hero background disabled");
        return Ok(());
    };
    dom::sync_canvas_backing_size(&canvas);

    let input = Rc::new(RefCell::new(SharedInputState::new()));
    events::pointer::wire_pointer_adapter(input.clone());

    // Ambient audio is optional; without it the field just loses reactivity.
    match audio::build_ambient_feed() {
        Ok(feed) => {
            let feed = Rc::new(feed);
            audio::start_sampling(&feed, input.clone());
            wire_audio_toggle(&document, feed);
        }
        Err(e) => log::warn!("ambient audio unavailable: {e}"),
    }

    let mut ledger = ResourceLedger::new();
    let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let sim = Simulation::new(
        PARTICLE_COUNT,
        Bounds::from(FIELD_BOUNDS),
        aspect,
        &mut ledger,
        &mut rng,
    );
    log::info!(
        "scene ready: {} particles, {} shapes",
        sim.field.len(),
        sim.shapes.len()
    );

    let gpu = frame::init_gpu(&canvas, &sim).await;
    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        sim,
        ledger,
        input,
        gpu,
        canvas.clone(),
    )));

    wire_canvas_resize(&canvas, ctx.clone());
    events::lifecycle::wire_pagehide_teardown(ctx.clone());
    schedule_reveal(ctx);

    Ok(())
}
