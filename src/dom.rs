use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Create the render canvas and attach it under the hero mount point.
/// Returns `None` when the mount point is absent; the page then renders
/// without a background.
pub fn mount_render_canvas(
    document: &web::Document,
    mount_id: &str,
) -> Option<web::HtmlCanvasElement> {
    let mount = document.get_element_by_id(mount_id)?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    _ = canvas.set_attribute(
        "style",
        "position:absolute;inset:0;width:100%;height:100%;pointer-events:none",
    );
    mount.append_child(&canvas).ok()?;
    Some(canvas)
}

/// Remove the render canvas from its mount point.
pub fn detach_render_canvas(canvas: &web::HtmlCanvasElement) {
    canvas.remove();
}

/// Keep the canvas backing store in sync with its CSS size times the device
/// pixel ratio (capped to keep fill rate sane on dense displays).
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
