use crate::dom::{self, EventListener};
use crate::grass::GrassLayer;
use crate::ground::GroundLayer;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Pointer and touch positions feed the grass repulsion. Listeners sit on
/// the window because the canvas is usually behind page content.
pub fn wire_grass_pointer(
    window: &web::Window,
    grass: &Rc<RefCell<GrassLayer>>,
) -> anyhow::Result<Vec<EventListener>> {
    let mut listeners = Vec::new();

    let g = grass.clone();
    listeners.push(dom::listen(window, "pointermove", true, move |ev: web::PointerEvent| {
        let mut layer = g.borrow_mut();
        let pos = input::pointer_canvas_css(&ev, layer.canvas());
        layer.set_pointer(Some(pos));
    })?);

    // A lifted finger leaves no hover point behind.
    let g = grass.clone();
    listeners.push(dom::listen(window, "pointerup", true, move |ev: web::PointerEvent| {
        if ev.pointer_type() == "touch" {
            g.borrow_mut().set_pointer(None);
        }
    })?);

    for kind in ["touchstart", "touchmove"] {
        let g = grass.clone();
        listeners.push(dom::listen(window, kind, true, move |ev: web::TouchEvent| {
            let mut layer = g.borrow_mut();
            let pos = input::touch_canvas_css(&ev, layer.canvas());
            layer.set_pointer(pos);
        })?);
    }

    for kind in ["touchend", "touchcancel", "pointercancel", "blur"] {
        let g = grass.clone();
        listeners.push(dom::listen(window, kind, true, move |_: web::Event| {
            g.borrow_mut().set_pointer(None);
        })?);
    }

    // Leaving the document clears the pointer.
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let g = grass.clone();
        listeners.push(dom::listen(&root, "pointerleave", true, move |_: web::Event| {
            g.borrow_mut().set_pointer(None);
        })?);
    }

    Ok(listeners)
}

/// Rock dragging: grab on the rock canvas, then follow and release on the
/// window so a drag survives leaving the canvas.
pub fn wire_ground_drag(
    window: &web::Window,
    ground: &Rc<RefCell<GroundLayer>>,
) -> anyhow::Result<Vec<EventListener>> {
    let mut listeners = Vec::new();

    let g = ground.clone();
    let canvas = ground.borrow().canvas().clone();
    listeners.push(dom::listen(&canvas, "pointerdown", true, move |ev: web::PointerEvent| {
        let mut layer = g.borrow_mut();
        let pos = input::pointer_canvas_css(&ev, layer.canvas());
        layer.grab(pos);
    })?);

    let g = ground.clone();
    listeners.push(dom::listen(window, "pointermove", true, move |ev: web::PointerEvent| {
        let mut layer = g.borrow_mut();
        if layer.is_dragging() {
            let pos = input::pointer_canvas_css(&ev, layer.canvas());
            layer.drag_to(pos);
        }
    })?);

    for kind in ["pointerup", "pointercancel"] {
        let g = ground.clone();
        listeners.push(dom::listen(window, kind, true, move |_: web::Event| {
            g.borrow_mut().release();
        })?);
    }

    Ok(listeners)
}
