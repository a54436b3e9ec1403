use crate::constants::FALLBACK_LEAF_COLOR;
use crate::sprites::SpriteCache;
use prairie_core::{BladeDraw, SeedHeadDraw};
use web_sys as web;

pub fn draw_grass(
    ctx: &web::CanvasRenderingContext2d,
    draws: &[BladeDraw],
    sprites: &SpriteCache,
    fallback_alpha: f32,
) {
    for d in draws {
        ctx.save();
        _ = ctx.translate(d.x as f64, d.base_y as f64);
        _ = ctx.rotate(d.rotation as f64);
        let (w, h) = (d.width as f64, d.height as f64);
        match sprites.get(d.blade_sprite) {
            Some(img) => {
                ctx.set_global_alpha(d.opacity as f64);
                _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h, w, h);
            }
            None => {
                ctx.set_global_alpha((d.opacity * fallback_alpha) as f64);
                fallback_leaf(ctx, w, h);
            }
        }
        if let Some(head) = d.seed_head {
            draw_seed_head(ctx, &head, d, sprites, fallback_alpha);
        }
        ctx.restore();
    }
}

/// Leaf silhouette anchored at the origin, pointing up.
fn fallback_leaf(ctx: &web::CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.begin_path();
    ctx.move_to(-w / 2.0, 0.0);
    ctx.quadratic_curve_to(-w * 0.15, -h * 0.55, 0.0, -h);
    ctx.quadratic_curve_to(w * 0.15, -h * 0.55, w / 2.0, 0.0);
    ctx.close_path();
    ctx.set_fill_style_str(FALLBACK_LEAF_COLOR);
    ctx.fill();
}

fn draw_seed_head(
    ctx: &web::CanvasRenderingContext2d,
    head: &SeedHeadDraw,
    blade: &BladeDraw,
    sprites: &SpriteCache,
    fallback_alpha: f32,
) {
    let h = head.height as f64;
    match sprites.get(head.sprite) {
        Some(img) => {
            let aspect = img.natural_width() as f64 / (img.natural_height().max(1)) as f64;
            let w = h * aspect;
            ctx.set_global_alpha(blade.opacity as f64);
            _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h, w, h);
        }
        None => {
            // Thin stalk with a narrow head.
            ctx.set_global_alpha((blade.opacity * fallback_alpha) as f64);
            ctx.begin_path();
            ctx.move_to(0.0, 0.0);
            ctx.quadratic_curve_to(h * 0.04, -h * 0.5, 0.0, -h * 0.8);
            ctx.set_stroke_style_str(FALLBACK_LEAF_COLOR);
            ctx.set_line_width(1.0);
            ctx.stroke();
            let w = (blade.width as f64 * 0.6).max(2.0);
            fallback_leaf_at(ctx, w, h * 0.2, -h * 0.8);
        }
    }
}

fn fallback_leaf_at(ctx: &web::CanvasRenderingContext2d, w: f64, h: f64, y: f64) {
    ctx.save();
    _ = ctx.translate(0.0, y);
    fallback_leaf(ctx, w, h);
    ctx.restore();
}
