use crate::config::carousel_config;
use crate::constants::{ACTIVE_ITEM_CLASS, ATTR_AUTOPLAY_MS, CAROUSEL_ITEM_SELECTOR};
use crate::dom;
use crate::input;
use prairie_core::{
    CarouselState, GustBus, NavCommand, SwipeTracker, Transition, WheelAccumulator,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

/// The 3D project ring: DOM items plus the navigation state machine.
pub struct CarouselView {
    root: web::HtmlElement,
    items: Vec<web::HtmlElement>,
    state: CarouselState,
    bus: GustBus,
    pub swipe: SwipeTracker,
    pub wheel: WheelAccumulator,
}

impl CarouselView {
    pub fn new(root: web::HtmlElement, bus: GustBus) -> anyhow::Result<Self> {
        let list = root
            .query_selector_all(CAROUSEL_ITEM_SELECTOR)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let items: Vec<web::HtmlElement> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
            .collect();

        let (config, error) = carousel_config(dom::data_attr(&root, ATTR_AUTOPLAY_MS).as_deref());
        if let Some(e) = error {
            log::warn!("[carousel] {e}; autoplay off");
        }
        log::info!(
            "[carousel] {} items, autoplay {}",
            items.len(),
            if config.autoplay_ms > 0.0 {
                format!("every {:.0} ms", config.autoplay_ms)
            } else {
                "off".to_string()
            }
        );
        let view = Self {
            state: CarouselState::new(items.len(), config),
            root,
            items,
            bus,
            swipe: SwipeTracker::default(),
            wheel: WheelAccumulator::default(),
        };
        view.layout();
        Ok(view)
    }

    pub fn root(&self) -> &web::HtmlElement {
        &self.root
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Place every item on the ring and mark the active one.
    pub fn layout(&self) {
        let radius = self.state.config().radius_px;
        let active = self.state.index();
        for (i, item) in self.items.iter().enumerate() {
            let transform = input::item_transform(self.state.item_angle(i), radius);
            _ = item.style().set_property("transform", &transform);
            _ = item
                .class_list()
                .toggle_with_force(ACTIVE_ITEM_CLASS, i == active);
            _ = item.set_attribute("aria-hidden", if i == active { "false" } else { "true" });
        }
    }

    /// Viewport x of the active item's centre, or of the ring when it has no items.
    fn focus_x(&self) -> f32 {
        let rect = self
            .items
            .get(self.state.index())
            .map_or_else(|| self.root.get_bounding_client_rect(), |el| el.get_bounding_client_rect());
        (rect.left() + rect.width() / 2.0) as f32
    }

    fn publish_gust(&self, transition: Transition) {
        let strength = self.state.config().gust_strength;
        self.bus.publish(transition.gust(self.focus_x(), strength));
    }

    /// Run a navigation command; accepted moves relayout now and publish a
    /// gust once the layout has settled.
    pub fn command(this: &Rc<RefCell<Self>>, cmd: NavCommand) {
        let transition = this.borrow_mut().state.command(cmd, instant::now());
        if let Some(t) = transition {
            Self::commit(this, t);
        }
    }

    pub fn autoplay_tick(this: &Rc<RefCell<Self>>) {
        let transition = this.borrow_mut().state.autoplay_tick(instant::now());
        if let Some(t) = transition {
            Self::commit(this, t);
        }
    }

    fn commit(this: &Rc<RefCell<Self>>, transition: Transition) {
        let delay = {
            let view = this.borrow();
            view.layout();
            view.state.config().gust_delay_ms
        };
        log::debug!(
            "[carousel] {} -> {} ({:?})",
            transition.from,
            transition.to,
            transition.direction
        );
        let weak: Weak<RefCell<Self>> = Rc::downgrade(this);
        dom::set_timeout(delay.round() as i32, move || {
            if let Some(view) = weak.upgrade() {
                view.borrow().publish_gust(transition);
            }
        });
    }
}
