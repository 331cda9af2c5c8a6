//! Soundtrack playback using the page's `<audio>` element
//!
//! Browsers only allow playback after a user gesture, so `play` is called
//! from the start gate. Playback failure is logged and otherwise ignored:
//! the show runs silently.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAudioElement};

/// Element id of the soundtrack
pub const MUSIC_ELEMENT_ID: &str = "backgroundMusic";

/// Soundtrack player
pub struct MusicPlayer {
    element: Option<HtmlAudioElement>,
}

impl MusicPlayer {
    /// Find the soundtrack element in `document`
    pub fn from_document(document: &Document) -> Self {
        let element = document
            .get_element_by_id(MUSIC_ELEMENT_ID)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if element.is_none() {
            log::warn!("No #{} audio element - soundtrack disabled", MUSIC_ELEMENT_ID);
        }
        Self { element }
    }

    /// Start playback. Resolves in the background; a rejection is logged.
    pub fn play(&self) {
        let Some(element) = &self.element else { return };

        let promise = match element.play() {
            Ok(promise) => promise,
            Err(e) => {
                log::info!("Audio playback failed: {:?}", e);
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => log::info!("Soundtrack playing"),
                Err(e) => log::info!("Audio playback failed: {:?}", e),
            }
        });
    }
}
