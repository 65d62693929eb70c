use crate::frame::{self, FrameContext};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Stop the frame loop and release scene resources when the page goes away.
pub fn wire_pagehide_teardown(ctx: Rc<RefCell<FrameContext>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        frame::teardown(&ctx);
    }) as Box<dyn FnMut()>);

    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
