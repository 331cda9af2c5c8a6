//! DOM-backed animation surface
//!
//! Each `Target` resolves to one element looked up once at startup. Property
//! values are cached so transforms can be rebuilt from their parts on every
//! write.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlImageElement};

use crate::anim::{Prop, Surface, Target};

pub const START_SCREEN_ID: &str = "startScreen";
pub const START_BUTTON_ID: &str = "startButton";
pub const STAGE_ID: &str = "cinematicContainer";
pub const FLASH_ID: &str = "flashOverlay";
pub const MESSAGE_ID: &str = "finalMessage";
pub const MESSAGE_TEXT_SELECTOR: &str = ".birthday-text";
pub const CONFETTI_ID: &str = "confettiCanvas";

/// CSS class that switches on an element's styled presentation
const VISIBLE_CLASS: &str = "visible";

/// Element id of the slide at `index`
pub fn slide_id(index: usize) -> String {
    format!("photo-{}", index)
}

fn html_element(element: Option<web_sys::Element>) -> Option<HtmlElement> {
    element.and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Build one slide (`<div class="photo-slide"><img></div>`) per photo inside
/// the stage
pub fn create_photo_slides(document: &Document, photo_paths: &[String]) -> Result<(), JsValue> {
    let stage = document
        .get_element_by_id(STAGE_ID)
        .ok_or_else(|| JsValue::from_str("missing stage element"))?;

    for (index, path) in photo_paths.iter().enumerate() {
        let slide = document.create_element("div")?;
        slide.set_class_name("photo-slide");
        slide.set_id(&slide_id(index));

        let img = document
            .create_element("img")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| JsValue::from_str("img is not an image element"))?;
        img.set_src(path);
        img.set_alt(&format!("Memory {}", index + 1));

        slide.append_child(&img)?;
        stage.append_child(&slide)?;
    }
    log::info!("Created {} photo slides", photo_paths.len());
    Ok(())
}

/// Kick off image downloads so transitions never wait on the network
pub fn preload_images(photo_paths: &[String]) {
    for path in photo_paths {
        match HtmlImageElement::new() {
            Ok(img) => img.set_src(path),
            Err(e) => log::warn!("Could not preload {}: {:?}", path, e),
        }
    }
}

/// Text shadow for a glow intensity in [0, 1]
fn glow_shadow(intensity: f32) -> String {
    let blur = 40.0 + 80.0 * intensity;
    let alpha = 0.5 + 0.4 * intensity;
    format!("0 0 {:.1}px rgba(255, 215, 0, {:.3})", blur, alpha)
}

/// `Surface` implementation writing inline styles
pub struct DomSurface {
    elements: HashMap<Target, HtmlElement>,
    values: HashMap<(Target, Prop), f32>,
}

impl DomSurface {
    /// Look up every animated element. Missing elements are logged and
    /// their writes dropped.
    pub fn new(document: &Document, photo_count: usize) -> Self {
        let mut elements = HashMap::new();

        for (target, id) in [
            (Target::StartScreen, START_SCREEN_ID),
            (Target::StartButton, START_BUTTON_ID),
            (Target::Stage, STAGE_ID),
            (Target::Flash, FLASH_ID),
            (Target::Message, MESSAGE_ID),
            (Target::Confetti, CONFETTI_ID),
        ] {
            match html_element(document.get_element_by_id(id)) {
                Some(el) => {
                    elements.insert(target, el);
                }
                None => log::warn!("Missing #{} element", id),
            }
        }

        match html_element(document.query_selector(MESSAGE_TEXT_SELECTOR).ok().flatten()) {
            Some(el) => {
                elements.insert(Target::MessageText, el);
            }
            None => log::warn!("Missing {} element", MESSAGE_TEXT_SELECTOR),
        }

        for index in 0..photo_count {
            let id = slide_id(index);
            if let Some(el) = html_element(document.get_element_by_id(&id)) {
                elements.insert(Target::Slide(index), el);
            }
            let photo = document.query_selector(&format!("#{} img", id)).ok().flatten();
            if let Some(el) = html_element(photo) {
                elements.insert(Target::Photo(index), el);
            }
        }

        Self {
            elements,
            values: HashMap::new(),
        }
    }

    fn transform(&self, target: Target) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.get(target, Prop::X),
            self.get(target, Prop::Y),
            self.get(target, Prop::Rotation),
            self.get(target, Prop::Scale),
        )
    }

    fn write_style(&self, target: Target, prop: Prop) {
        let Some(element) = self.elements.get(&target) else {
            return;
        };
        let style = element.style();
        let value = self.get(target, prop);
        let result = match prop {
            Prop::Opacity => style.set_property("opacity", &value.to_string()),
            Prop::ZIndex => style.set_property("z-index", &(value.round() as i32).to_string()),
            Prop::X | Prop::Y | Prop::Scale | Prop::Rotation => {
                style.set_property("transform", &self.transform(target))
            }
            Prop::Glow => style.set_property("text-shadow", &glow_shadow(value)),
        };
        if let Err(e) = result {
            log::debug!("Style write failed on {:?}: {:?}", target, e);
        }
    }
}

impl Surface for DomSurface {
    fn get(&self, target: Target, prop: Prop) -> f32 {
        self.values
            .get(&(target, prop))
            .copied()
            .unwrap_or_else(|| prop.neutral())
    }

    fn set(&mut self, target: Target, prop: Prop, value: f32) {
        self.values.insert((target, prop), value);
        self.write_style(target, prop);
    }

    fn set_visible(&mut self, target: Target, visible: bool) {
        let Some(element) = self.elements.get(&target) else {
            return;
        };
        let result = match target {
            // The start screen is removed from layout rather than restyled
            Target::StartScreen => element
                .style()
                .set_property("display", if visible { "" } else { "none" }),
            _ if visible => element.class_list().add_1(VISIBLE_CLASS),
            _ => element.class_list().remove_1(VISIBLE_CLASS),
        };
        if let Err(e) = result {
            log::debug!("Visibility change failed on {:?}: {:?}", target, e);
        }
    }
}
