use crate::constants::VISIBILITY_THRESHOLD;
use crate::input;
use prairie_core::Visibility;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// IntersectionObserver on one element; disconnects when dropped.
pub struct VisibilityObserver {
    observer: web::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl VisibilityObserver {
    pub fn observe(
        target: &web::Element,
        mut on_change: impl FnMut(Visibility) + 'static,
    ) -> anyhow::Result<Self> {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _: web::IntersectionObserver| {
                // Only the latest entry matters for a single target.
                if let Some(entry) = entries
                    .iter()
                    .last()
                    .and_then(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
                {
                    on_change(input::visibility_for_ratio(
                        entry.intersection_ratio(),
                        VISIBILITY_THRESHOLD,
                    ));
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let init = web::IntersectionObserverInit::new();
        init.set_threshold(&wasm_bindgen::JsValue::from_f64(VISIBILITY_THRESHOLD));
        let observer = web::IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        observer.observe(target);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
