use crate::core::{normalize_pointer, SharedInputState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Overwrite the shared pointer offset on every move. No queuing: only the
/// latest sample matters, intermediate moves between frames are discarded.
pub fn wire_pointer_adapter(shared: Rc<RefCell<SharedInputState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let Some(window) = web::window() else {
            return;
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let ndc = normalize_pointer(ev.client_x() as f32, ev.client_y() as f32, width, height);
        shared.borrow_mut().set_pointer(ndc);
    }) as Box<dyn FnMut(_)>);

    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
