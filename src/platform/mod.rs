//! Platform abstraction layer (browser only)
//!
//! Maps the show's platform-free traits onto the page:
//! - `dom`: element lookup, slide construction and the `Surface` impl
//! - `canvas`: 2D canvas painter for the confetti
//! - `fullscreen`: best-effort fullscreen request

pub mod canvas;
pub mod dom;
pub mod fullscreen;

pub use canvas::CanvasPainter;
pub use dom::{DomSurface, create_photo_slides, preload_images};
pub use fullscreen::request_fullscreen;

/// Current window size in CSS pixels
pub fn viewport_size() -> (f32, f32) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}
