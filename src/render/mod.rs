//! Canvas 2D drawing for the grass and rock layers.
//!
//! Everything here draws in CSS pixels; [`begin_frame`] installs the
//! device-pixel scale once per frame.

mod grass;
mod rocks;

pub use grass::draw_grass;
pub use rocks::{draw_ridge, draw_rocks};

use crate::dom::{sync_canvas_backing_size, CanvasMetrics};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Clear the whole backing store and scale to CSS pixels.
pub fn begin_frame(ctx: &web::CanvasRenderingContext2d, canvas: &web::HtmlCanvasElement, ratio: f64) {
    _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    ctx.set_global_alpha(1.0);
}

/// A canvas, its 2D context and the metrics from the last resync.
pub struct Surface {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub metrics: CanvasMetrics,
}

impl Surface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = context_2d(&canvas)?;
        let metrics = sync_canvas_backing_size(&canvas);
        Ok(Self {
            canvas,
            ctx,
            metrics,
        })
    }

    pub fn resync(&mut self) -> CanvasMetrics {
        self.metrics = sync_canvas_backing_size(&self.canvas);
        self.metrics
    }

    pub fn begin_frame(&self) {
        begin_frame(&self.ctx, &self.canvas, self.metrics.ratio);
    }
}
