use glam::Vec2;
use prairie_core::{NavCommand, Visibility};
use web_sys as web;

/// Keyboard navigation for the focused carousel.
#[inline]
pub fn command_for_key(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowRight" | "ArrowDown" => Some(NavCommand::Next),
        "ArrowLeft" | "ArrowUp" => Some(NavCommand::Previous),
        "Home" => Some(NavCommand::First),
        "End" => Some(NavCommand::Last),
        _ => None,
    }
}

/// Device pixel ratio capped for backing-store sizing. Bad values fall back to 1.
#[inline]
pub fn effective_pixel_ratio(device_pixel_ratio: f64, max: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(max)
    } else {
        1.0
    }
}

/// Backing-store size in device pixels, never below 1x1.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, ratio: f64) -> (u32, u32) {
    let w = (css_width.max(0.0) * ratio).round() as u32;
    let h = (css_height.max(0.0) * ratio).round() as u32;
    (w.max(1), h.max(1))
}

/// A canvas counts as visible once enough of it intersects the viewport.
#[inline]
pub fn visibility_for_ratio(intersection_ratio: f64, threshold: f64) -> Visibility {
    if intersection_ratio >= threshold {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Client coordinates to canvas-local CSS pixels.
#[inline]
pub fn client_to_canvas(client: Vec2, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client.x - rect_left, client.y - rect_top)
}

pub fn pointer_canvas_css(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    client_to_canvas(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        rect.left() as f32,
        rect.top() as f32,
    )
}

/// First active touch in canvas CSS pixels.
pub fn touch_canvas_css(ev: &web::TouchEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let touch = ev.touches().get(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some(client_to_canvas(
        Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
        rect.left() as f32,
        rect.top() as f32,
    ))
}

/// CSS transform placing a carousel item on the ring.
pub fn item_transform(angle_deg: f32, radius_px: f32) -> String {
    format!("rotateY({angle_deg:.3}deg) translateZ({radius_px:.1}px)")
}
