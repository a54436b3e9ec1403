use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One canvas driven by `requestAnimationFrame`.
pub trait FrameLayer {
    /// Called once per animation frame with the raw wall-clock delta in
    /// seconds. Returning `false` ends the chain.
    fn frame(&mut self, raw_dt: f32) -> bool;
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running frame chain; cancels the pending frame when dropped.
pub struct FrameHandle {
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

fn request(window: &web::Window, callback: &FrameCallback) -> Option<i32> {
    let cb = callback.borrow();
    let closure = cb.as_ref()?;
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

pub fn start_loop<L: FrameLayer + 'static>(layer: Rc<RefCell<L>>) -> anyhow::Result<FrameHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let pending = Rc::new(Cell::new(None));
    let callback: FrameCallback = Rc::new(RefCell::new(None));

    let f = callback.clone();
    let pending_inner = pending.clone();
    let window_inner = window.clone();
    let mut last = Instant::now();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_inner.set(None);
        let now = Instant::now();
        let raw_dt = (now - last).as_secs_f32();
        last = now;
        if layer.borrow_mut().frame(raw_dt) {
            pending_inner.set(request(&window_inner, &f));
        }
    }) as Box<dyn FnMut()>));

    pending.set(request(&window, &callback));
    Ok(FrameHandle { pending, callback })
}
