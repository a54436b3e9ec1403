use crate::constants::{
    RIDGE_FILL, ROCK_HIGHLIGHT_COLOR, ROCK_HIGHLIGHT_OFFSET, ROCK_HIGHLIGHT_SIZE, ROCK_SHADOW_COLOR,
};
use glam::Vec2;
use prairie_core::constants::ROCK_SHADOW_OFFSET_PX;
use prairie_core::{ridge_path, RockInstance};
use std::f64::consts::TAU;
use web_sys as web;

/// Ground band under the ridge line.
pub fn draw_ridge(ctx: &web::CanvasRenderingContext2d, width: f32, height: f32) {
    let (start, segments) = ridge_path(width, height);
    ctx.begin_path();
    ctx.move_to(0.0, height as f64);
    ctx.line_to(start.x as f64, start.y as f64);
    for [c1, c2, end] in segments {
        ctx.bezier_curve_to(
            c1.x as f64,
            c1.y as f64,
            c2.x as f64,
            c2.y as f64,
            end.x as f64,
            end.y as f64,
        );
    }
    ctx.line_to(width as f64, height as f64);
    ctx.close_path();
    ctx.set_fill_style_str(RIDGE_FILL);
    ctx.fill();
}

pub fn draw_rocks(ctx: &web::CanvasRenderingContext2d, rocks: &[RockInstance]) {
    let shadow = Vec2::new(ROCK_SHADOW_OFFSET_PX.0, ROCK_SHADOW_OFFSET_PX.1);
    for rock in rocks {
        let center = rock.center();

        trace_polygon(ctx, center + shadow, &rock.vertices);
        ctx.set_fill_style_str(ROCK_SHADOW_COLOR);
        ctx.fill();

        trace_polygon(ctx, center, &rock.vertices);
        ctx.set_fill_style_str(&rock.color.css());
        ctx.fill();

        let (hw, hh) = (rock.spec.width / 2.0, rock.spec.height / 2.0);
        ctx.begin_path();
        _ = ctx.ellipse(
            (center.x - hw * ROCK_HIGHLIGHT_OFFSET) as f64,
            (center.y - hh * ROCK_HIGHLIGHT_OFFSET) as f64,
            (hw * ROCK_HIGHLIGHT_SIZE) as f64,
            (hh * ROCK_HIGHLIGHT_SIZE) as f64,
            0.0,
            0.0,
            TAU,
        );
        ctx.set_fill_style_str(ROCK_HIGHLIGHT_COLOR);
        ctx.fill();
    }
}

fn trace_polygon(ctx: &web::CanvasRenderingContext2d, at: Vec2, vertices: &[Vec2]) {
    ctx.begin_path();
    let mut points = vertices.iter().map(|v| at + *v);
    if let Some(first) = points.next() {
        ctx.move_to(first.x as f64, first.y as f64);
        for p in points {
            ctx.line_to(p.x as f64, p.y as f64);
        }
    }
    ctx.close_path();
}
