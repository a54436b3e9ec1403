use crate::carousel::CarouselView;
use crate::constants::{AUTOPLAY_POLL_MS, CAROUSEL_NEXT_SELECTOR, CAROUSEL_PREV_SELECTOR};
use crate::dom::{self, EventListener, Interval};
use glam::Vec2;
use prairie_core::{fully_in_view, normalize_wheel_delta, DeltaMode, NavCommand};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_buttons(
    document: &web::Document,
    carousel: &Rc<RefCell<CarouselView>>,
) -> anyhow::Result<Vec<EventListener>> {
    let mut listeners = Vec::new();
    for (selector, cmd) in [
        (CAROUSEL_PREV_SELECTOR, NavCommand::Previous),
        (CAROUSEL_NEXT_SELECTOR, NavCommand::Next),
    ] {
        let Ok(Some(button)) = document.query_selector(selector) else {
            continue;
        };
        let c = carousel.clone();
        listeners.push(dom::listen(&button, "click", true, move |_: web::MouseEvent| {
            CarouselView::command(&c, cmd);
        })?);
    }
    Ok(listeners)
}

/// Pointer swipes on the ring: one step per gesture.
pub fn wire_swipe(carousel: &Rc<RefCell<CarouselView>>) -> anyhow::Result<Vec<EventListener>> {
    let root = carousel.borrow().root().clone();
    let mut listeners = Vec::new();

    let c = carousel.clone();
    let el = root.clone();
    listeners.push(dom::listen(&root, "pointerdown", false, move |ev: web::PointerEvent| {
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        if c.borrow_mut().swipe.begin(pos, instant::now()) {
            _ = el.set_pointer_capture(ev.pointer_id());
        }
    })?);

    let c = carousel.clone();
    listeners.push(dom::listen(&root, "pointermove", false, move |ev: web::PointerEvent| {
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let (cmd, capturing) = {
            let mut view = c.borrow_mut();
            let cmd = view.swipe.update(pos, instant::now());
            (cmd, view.swipe.is_capturing())
        };
        if capturing || cmd.is_some() {
            ev.prevent_default();
            ev.stop_propagation();
        }
        if let Some(cmd) = cmd {
            CarouselView::command(&c, cmd);
        }
    })?);

    for kind in ["pointerup", "pointercancel"] {
        let c = carousel.clone();
        let el = root.clone();
        listeners.push(dom::listen(&root, kind, true, move |ev: web::PointerEvent| {
            _ = el.release_pointer_capture(ev.pointer_id());
            c.borrow_mut().swipe.end();
        })?);
    }
    Ok(listeners)
}

/// Wheel over the ring steps it; every wheel event over it is consumed.
pub fn wire_wheel(
    window: &web::Window,
    carousel: &Rc<RefCell<CarouselView>>,
) -> anyhow::Result<EventListener> {
    let c = carousel.clone();
    let win = window.clone();
    dom::listen(window, "wheel", false, move |ev: web::WheelEvent| {
        let root = c.borrow().root().clone();
        let target = ev.target().and_then(|t| t.dyn_into::<web::Node>().ok());
        if !root.contains(target.as_ref()) {
            return;
        }
        let vh = win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let (require_in_view, line_px) = {
            let view = c.borrow();
            let cfg = view.wheel.config();
            (cfg.require_fully_in_view, cfg.line_px)
        };
        if require_in_view {
            let rect = root.get_bounding_client_rect();
            if !fully_in_view(rect.top() as f32, rect.bottom() as f32, vh) {
                return;
            }
        }
        ev.prevent_default();
        ev.stop_propagation();

        let delta = normalize_wheel_delta(
            Vec2::new(ev.delta_x() as f32, ev.delta_y() as f32),
            DeltaMode::from_dom(ev.delta_mode()),
            line_px,
            vh,
        );
        let cmd = c.borrow_mut().wheel.feed(delta, instant::now());
        if let Some(cmd) = cmd {
            CarouselView::command(&c, cmd);
        }
    })
}

/// Autoplay polling; `None` when autoplay is off.
pub fn start_autoplay(carousel: &Rc<RefCell<CarouselView>>) -> anyhow::Result<Option<Interval>> {
    if carousel.borrow().state().config().autoplay_ms <= 0.0 {
        return Ok(None);
    }
    let c = carousel.clone();
    Interval::new(AUTOPLAY_POLL_MS, move || CarouselView::autoplay_tick(&c)).map(Some)
}
