// Drawing surface backed by a 2d canvas on the DOM
// The context is looked up lazily, so a canvas that is not ready yet just
// skips frames until it is.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::simulator::Bounds;
use crate::surface::DrawingSurface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: Option<CanvasRenderingContext2d>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let context = context_2d(&canvas);
        CanvasSurface { canvas, context }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Matches the canvas backing store to the viewport.
    pub fn fit(&self, bounds: Bounds) {
        let (width, height) = (bounds.width as u32, bounds.height as u32);
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

impl DrawingSurface for CanvasSurface {
    fn acquire(&mut self) -> bool {
        if self.context.is_none() {
            self.context = context_2d(&self.canvas);
        }
        self.context.is_some()
    }

    fn clear(&mut self, bounds: Bounds) {
        if let Some(ctx) = &self.context {
            ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        }
    }

    #[allow(deprecated)]
    fn fill_disc(&mut self, center: [f64; 2], radius: f64, fill: &str) {
        if let Some(ctx) = &self.context {
            ctx.begin_path();
            if ctx.arc(center[0], center[1], radius, 0.0, 2.0 * PI).is_ok() {
                ctx.set_fill_style(&JsValue::from_str(fill));
                ctx.fill();
            }
        }
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: &str, line_width: f64) {
        if let Some(ctx) = &self.context {
            ctx.begin_path();
            ctx.move_to(from[0], from[1]);
            ctx.line_to(to[0], to[1]);
            ctx.set_stroke_style(&JsValue::from_str(stroke));
            ctx.set_line_width(line_width);
            ctx.stroke();
        }
    }
}
