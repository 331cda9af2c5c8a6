//! Confetti painter over a 2D canvas context

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::dom::CONFETTI_ID;
use crate::show::ConfettiCanvas;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(CONFETTI_ID)
            .ok_or_else(|| JsValue::from_str("missing confetti canvas"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("confetti element is not a canvas"))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the viewport
    pub fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}

impl ConfettiCanvas for CanvasPainter {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rotated_rect(&mut self, center: Vec2, size: Vec2, radians: f32, color: &str) {
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(radians as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            -size.x as f64 / 2.0,
            -size.y as f64 / 2.0,
            size.x as f64,
            size.y as f64,
        );
        self.ctx.restore();
    }
}
