//! Fullscreen request with vendor-prefixed fallbacks

use wasm_bindgen::prelude::*;

// JS binding: browsers disagree on the method name, and the standard one
// returns a promise that may reject outside a user gesture
#[wasm_bindgen(inline_js = "
    export function request_document_fullscreen() {
        const el = document.documentElement;
        const request = el.requestFullscreen
            || el.webkitRequestFullscreen
            || el.msRequestFullscreen;
        if (!request) {
            return false;
        }
        try {
            const result = request.call(el);
            if (result && result.catch) {
                result.catch(e => console.debug('Fullscreen request rejected:', e));
            }
            return true;
        } catch (e) {
            console.debug('Fullscreen request failed:', e);
            return false;
        }
    }
")]
extern "C" {
    fn request_document_fullscreen() -> bool;
}

/// Ask for fullscreen on the whole page. Returns whether any request API
/// was available; refusal is silent.
pub fn request_fullscreen() -> bool {
    let requested = request_document_fullscreen();
    if !requested {
        log::debug!("Fullscreen unavailable");
    }
    requested
}
