use crate::constants::{MAX_PIXEL_RATIO, REDUCED_MOTION_QUERY};
use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// CSS size, viewport offset and pixel ratio of a canvas after a resync.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasMetrics {
    pub css_width: f32,
    pub css_height: f32,
    pub left: f32,
    pub ratio: f64,
}

/// Size the backing store to the CSS box at the capped pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> CanvasMetrics {
    let dpr = web::window().map_or(1.0, |w| w.device_pixel_ratio());
    let ratio = input::effective_pixel_ratio(dpr, MAX_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), ratio);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    CanvasMetrics {
        css_width: rect.width() as f32,
        css_height: rect.height() as f32,
        left: rect.left() as f32,
        ratio,
    }
}

/// Read once at mount; later changes are not tracked.
pub fn prefers_reduced_motion() -> bool {
    web::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .is_some_and(|mq| mq.matches())
}

#[inline]
pub fn data_attr(el: &web::Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.trim().is_empty())
}

/// Registered DOM listener, removed again when dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Attach `handler` for `kind` events. The event is cast to `E` unchecked, so
/// `kind` must name an event of that type.
pub fn listen<E>(
    target: &web::EventTarget,
    kind: &'static str,
    passive: bool,
    mut handler: impl FnMut(E) + 'static,
) -> anyhow::Result<EventListener>
where
    E: JsCast + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        handler(ev.unchecked_into::<E>());
    }) as Box<dyn FnMut(web::Event)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(EventListener {
        target: target.clone(),
        kind,
        closure,
    })
}

/// `setInterval` handle, cleared when dropped.
pub struct Interval {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: i32, callback: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms,
            )
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.handle);
        }
    }
}

/// One-shot `setTimeout`; the closure frees itself after running.
pub fn set_timeout(delay_ms: i32, callback: impl FnOnce() + 'static) {
    let Some(window) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(callback);
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
    {
        log::warn!("setTimeout failed: {:?}", e);
    }
}
