use crate::frame::FrameLayer;
use crate::render::{self, Surface};
use glam::Vec2;
use prairie_core::constants::MAX_FRAME_DT_SEC;
use prairie_core::{AnimationLoop, GustBus, MountAction, RockField, RockParams, Tick, Visibility};
use web_sys as web;

/// The pebble ridge canvas under the carousel.
pub struct GroundLayer {
    surface: Surface,
    field: RockField,
    lifecycle: AnimationLoop,
}

impl GroundLayer {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let surface = Surface::new(canvas)?;
        let mut field = RockField::new(RockParams::default());
        field.relayout(surface.metrics.css_width, surface.metrics.css_height);
        field.set_canvas_left(surface.metrics.left);
        log::info!(
            "[ground] {} rocks on a {:.0}x{:.0} ridge",
            field.rocks().len(),
            surface.metrics.css_width,
            surface.metrics.css_height
        );
        Ok(Self {
            surface,
            field,
            lifecycle: AnimationLoop::new(MAX_FRAME_DT_SEC),
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.surface.canvas
    }

    /// Only an animating layer listens for gusts; a static one would never
    /// drain its inbox.
    pub fn mount(&mut self, reduced_motion: bool, bus: &GustBus) -> MountAction {
        let action = self.lifecycle.mount(reduced_motion);
        if action == MountAction::StartLoop {
            self.field.subscribe(bus.subscribe());
        }
        if action == MountAction::RenderStaticFrame {
            self.draw();
        }
        action
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }

    pub fn resize(&mut self) {
        let m = self.surface.resync();
        self.field.relayout(m.css_width, m.css_height);
        self.field.set_canvas_left(m.left);
        if self.lifecycle.needs_static_redraw() {
            self.draw();
        }
    }

    /// Pick up the rock under a canvas-local point.
    pub fn grab(&mut self, point: Vec2) -> bool {
        let hit = self.field.begin_drag(point);
        if hit {
            log::debug!("[ground] grabbed rock at {:.0},{:.0}", point.x, point.y);
        }
        hit
    }

    pub fn drag_to(&mut self, point: Vec2) {
        self.field.drag_to(point);
    }

    pub fn release(&mut self) {
        self.field.end_drag();
    }

    pub fn is_dragging(&self) -> bool {
        self.field.is_dragging()
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.lifecycle.set_visibility(visibility);
    }

    fn draw(&self) {
        let (w, h) = self.field.size();
        self.surface.begin_frame();
        render::draw_ridge(&self.surface.ctx, w, h);
        render::draw_rocks(&self.surface.ctx, self.field.rocks());
    }
}

impl FrameLayer for GroundLayer {
    fn frame(&mut self, raw_dt: f32) -> bool {
        match self.lifecycle.tick(raw_dt) {
            Tick::Stop => false,
            Tick::Skip => {
                self.field.discard_gusts();
                true
            }
            Tick::Advance { .. } => {
                self.field.advance();
                self.draw();
                true
            }
        }
    }
}
