use crate::config::{apply_grass_overrides, parse_grass_overrides};
use crate::constants::{ATTR_BREEZE, ATTR_SEED, ATTR_WIND};
use crate::dom;
use crate::frame::FrameLayer;
use crate::render::{self, Surface};
use crate::sprites::{read_manifest, SpriteCache};
use glam::Vec2;
use prairie_core::{
    AnimationLoop, GrassScene, GustBus, MountAction, SceneConfig, Tick, Visibility, BLADE_SPRITES,
    SEED_HEAD_SPRITES,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys as web;

/// The prairie grass canvas: scene, sprites and loop state.
pub struct GrassLayer {
    surface: Surface,
    scene: GrassScene,
    sprites: SpriteCache,
    lifecycle: AnimationLoop,
}

impl GrassLayer {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        document: &web::Document,
    ) -> anyhow::Result<Self> {
        let (overrides, errors) = parse_grass_overrides(
            dom::data_attr(&canvas, ATTR_BREEZE).as_deref(),
            dom::data_attr(&canvas, ATTR_SEED).as_deref(),
            dom::data_attr(&canvas, ATTR_WIND).as_deref(),
        );
        for e in &errors {
            log::warn!("[grass] {e}; using default");
        }
        let mut config = SceneConfig::default();
        apply_grass_overrides(&mut config, &overrides);

        let max_dt = config.sway.max_frame_dt;
        let surface = Surface::new(canvas)?;
        let seed = overrides.seed.unwrap_or_else(rand::random);
        let mut scene = GrassScene::new(
            config,
            surface.metrics.css_width,
            surface.metrics.css_height,
            seed,
        );
        scene.set_canvas_left(surface.metrics.left);

        let mut sprites = SpriteCache::new(read_manifest(document));
        sprites.preload_all(BLADE_SPRITES.iter().chain(SEED_HEAD_SPRITES).copied());

        let lifecycle = AnimationLoop::new(max_dt);
        Ok(Self {
            surface,
            scene,
            sprites,
            lifecycle,
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
            self.scene.subscribe(bus.subscribe());
        }
        if action == MountAction::RenderStaticFrame {
            log::info!("[grass] reduced motion: drawing one static frame");
            self.render_static();
        }
        action
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }

    fn render_static(&mut self) {
        let alpha = self.scene.config().render.fallback_alpha;
        self.surface.begin_frame();
        let draws = self.scene.static_frame();
        render::draw_grass(&self.surface.ctx, draws, &self.sprites, alpha);
    }

    pub fn resize(&mut self) {
        let m = self.surface.resync();
        self.scene.resize(m.css_width, m.css_height);
        self.scene.set_canvas_left(m.left);
        if self.lifecycle.needs_static_redraw() {
            self.render_static();
        }
    }

    /// Pointer in canvas CSS pixels, or `None` when it has left.
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.scene.set_pointer(pointer);
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.lifecycle.set_visibility(visibility);
    }

    /// In the static mode sprites that decode after the first frame would
    /// never show, so redraw once per late sprite.
    pub fn redraw_on_sprite_load(this: &Rc<RefCell<Self>>) {
        if !this.borrow().lifecycle.needs_static_redraw() {
            return;
        }
        let mut layer = this.borrow_mut();
        let names: Vec<String> = layer.sprites.names().map(str::to_string).collect();
        for name in names {
            let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
            layer.sprites.on_loaded(&name, move || {
                let Some(rc) = weak.upgrade() else { return };
                let Ok(mut layer) = rc.try_borrow_mut() else { return };
                if layer.lifecycle.needs_static_redraw() {
                    layer.render_static();
                }
            });
        }
    }
}

impl FrameLayer for GrassLayer {
    fn frame(&mut self, raw_dt: f32) -> bool {
        match self.lifecycle.tick(raw_dt) {
            Tick::Stop => false,
            Tick::Skip => {
                self.scene.discard_gusts();
                true
            }
            Tick::Advance { dt } => {
                let alpha = self.scene.config().render.fallback_alpha;
                self.surface.begin_frame();
                let draws = self.scene.advance(dt);
                render::draw_grass(&self.surface.ctx, draws, &self.sprites, alpha);
                true
            }
        }
    }
}
