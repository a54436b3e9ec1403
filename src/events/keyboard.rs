use crate::carousel::CarouselView;
use crate::dom::{self, EventListener};
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Arrow/Home/End navigation while focus is inside the carousel.
pub fn wire_carousel_keys(carousel: &Rc<RefCell<CarouselView>>) -> anyhow::Result<EventListener> {
    let root = carousel.borrow().root().clone();
    if !root.has_attribute("tabindex") {
        _ = root.set_attribute("tabindex", "0");
    }
    let c = carousel.clone();
    dom::listen(&root, "keydown", false, move |ev: web::KeyboardEvent| {
        if ev.alt_key() || ev.ctrl_key() || ev.meta_key() {
            return;
        }
        if let Some(cmd) = input::command_for_key(&ev.key()) {
            ev.prevent_default();
            CarouselView::command(&c, cmd);
        }
    })
}
