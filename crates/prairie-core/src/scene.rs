//! The grass layer as one owned simulation.

use crate::field::{generate_blades, total_candidates, BladeInstance};
use crate::gust::{apply_grass_gust, GustEvent, GustSubscription};
use crate::motion::{rendered_rotation, static_state, step_blade, MotionContext};
use crate::params::SceneConfig;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedHeadDraw {
    pub sprite: &'static str,
    /// Drawn height in CSS pixels, already clipped to the canvas top.
    pub height: f32,
}

/// Everything the renderer needs for one blade this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeDraw {
    pub index: usize,
    pub x: f32,
    /// Canvas y of the blade's anchor (ground overlap included).
    pub base_y: f32,
    pub rotation: f32,
    pub scale: f32,
    pub height: f32,
    pub width: f32,
    pub opacity: f32,
    pub blade_sprite: &'static str,
    pub seed_head: Option<SeedHeadDraw>,
}

pub struct GrassScene {
    config: SceneConfig,
    blades: Vec<BladeInstance>,
    width: f32,
    height: f32,
    canvas_left: f32,
    generation: u64,
    time: f32,
    pointer: Option<Vec2>,
    rng: StdRng,
    subscription: Option<GustSubscription>,
    draws: Vec<BladeDraw>,
}

impl GrassScene {
    pub fn new(config: SceneConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let blades = generate_blades(width, &config.field, &mut rng);
        log::info!(
            "[grass] generated {} blades for width {width:.0} ({} candidates)",
            blades.len(),
            total_candidates(width, &config.field)
        );
        Self::assemble(config, blades, width, height, rng)
    }

    /// Scene over a hand-built population.
    pub fn from_blades(config: SceneConfig, blades: Vec<BladeInstance>, width: f32, height: f32) -> Self {
        Self::assemble(config, blades, width, height, StdRng::seed_from_u64(0))
    }

    fn assemble(
        config: SceneConfig,
        blades: Vec<BladeInstance>,
        width: f32,
        height: f32,
        rng: StdRng,
    ) -> Self {
        Self {
            draws: Vec::with_capacity(blades.len()),
            config,
            blades,
            width,
            height,
            canvas_left: 0.0,
            generation: 0,
            time: 0.0,
            pointer: None,
            rng,
            subscription: None,
        }
    }

    /// Regenerate the whole field for a new canvas size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.blades = generate_blades(width, &self.config.field, &mut self.rng);
        self.draws = Vec::with_capacity(self.blades.len());
        self.generation += 1;
        log::info!(
            "[grass] resize to {width:.0}x{height:.0}: {} blades (generation {})",
            self.blades.len(),
            self.generation
        );
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn set_canvas_left(&mut self, left: f32) {
        self.canvas_left = left;
    }

    pub fn subscribe(&mut self, subscription: GustSubscription) {
        self.subscription = Some(subscription);
    }

    /// Throw away gusts that arrived while the scene was not advancing.
    pub fn discard_gusts(&mut self) {
        if let Some(sub) = &self.subscription {
            sub.clear();
        }
    }

    pub fn apply_gust(&mut self, event: &GustEvent) {
        apply_grass_gust(
            &mut self.blades,
            event.focus_x - self.canvas_left,
            event.strength,
            event.direction,
            self.width,
            &self.config.gust,
            self.config.wind.seed_head_attenuation,
        );
    }

    #[inline]
    fn is_culled(&self, x: f32) -> bool {
        let pad = self.config.render.cull_padding;
        x < -pad || x > self.width + pad
    }

    /// Step every visible blade by `dt` seconds and return the draw list.
    /// Culled blades keep their state untouched.
    pub fn advance(&mut self, dt: f32) -> &[BladeDraw] {
        self.time += dt;
        let inbox = self
            .subscription
            .as_ref()
            .map(GustSubscription::drain)
            .unwrap_or_default();
        for event in &inbox {
            self.apply_gust(event);
        }

        let ctx = MotionContext {
            time: self.time,
            dt,
            width: self.width,
            ground_y: self.height,
            blade_height_px: self.config.field.blade_height_px,
            pointer: self.pointer,
            wind: &self.config.wind,
            sway: &self.config.sway,
            pointer_params: &self.config.pointer,
            gust: &self.config.gust,
        };
        let pad = self.config.render.cull_padding;
        let width = self.width;
        for blade in self.blades.iter_mut() {
            if blade.x < -pad || blade.x > width + pad {
                continue;
            }
            blade.state = step_blade(blade, &ctx);
        }
        self.collect_draws();
        &self.draws
    }

    /// Reduced-motion snapshot at `t = 0`.
    pub fn static_frame(&mut self) -> &[BladeDraw] {
        self.time = 0.0;
        let sway = self.config.sway;
        for blade in self.blades.iter_mut() {
            blade.state = static_state(blade, &sway);
        }
        self.collect_draws();
        &self.draws
    }

    fn collect_draws(&mut self) {
        self.draws.clear();
        let field = &self.config.field;
        let render = &self.config.render;
        for (index, blade) in self.blades.iter().enumerate() {
            if self.is_culled(blade.x) {
                continue;
            }
            let scale = blade.scale * blade.layer_scale;
            let height = field.blade_height_px * scale;
            let base_y = self.height + blade.base_y + render.ground_overlap;
            let seed_head = blade.seed_head_sprite.map(|sprite| SeedHeadDraw {
                sprite,
                height: (height * render.seed_head_height_mult)
                    .max(self.height * render.seed_head_canvas_fraction)
                    .min(base_y.max(0.0)),
            });
            self.draws.push(BladeDraw {
                index,
                x: blade.x,
                base_y,
                rotation: rendered_rotation(blade),
                scale,
                height,
                width: field.blade_width_px * scale,
                opacity: blade.opacity,
                blade_sprite: blade.blade_sprite,
                seed_head,
            });
        }
    }

    pub fn blades(&self) -> &[BladeInstance] {
        &self.blades
    }

    pub fn draws(&self) -> &[BladeDraw] {
        &self.draws
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
