#![cfg(target_arch = "wasm32")]
use prairie_core::{GustBus, MountAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod carousel;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod grass;
mod ground;
mod input;
mod render;
mod sprites;
mod visibility;

use carousel::CarouselView;
use constants::{CAROUSEL_ID, GRASS_CANVAS_ID, ROCKS_CANVAS_ID};
use dom::{EventListener, Interval};
use frame::FrameHandle;
use grass::GrassLayer;
use ground::GroundLayer;
use visibility::VisibilityObserver;

/// Everything mounted on the page. Dropping it tears the page back down:
/// frames are cancelled, observers disconnected and listeners removed.
#[derive(Default)]
struct App {
    bus: GustBus,
    grass: Option<Rc<RefCell<GrassLayer>>>,
    ground: Option<Rc<RefCell<GroundLayer>>>,
    carousel: Option<Rc<RefCell<CarouselView>>>,
    frames: Vec<FrameHandle>,
    observers: Vec<VisibilityObserver>,
    listeners: Vec<EventListener>,
    autoplay: Option<Interval>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

impl App {
    fn mount_grass(
        &mut self,
        window: &web::Window,
        document: &web::Document,
        reduced_motion: bool,
    ) -> anyhow::Result<()> {
        let Some(canvas) = dom::canvas_by_id(document, GRASS_CANVAS_ID) else {
            log::info!("[grass] no #{GRASS_CANVAS_ID} canvas; layer disabled");
            return Ok(());
        };
        let layer = Rc::new(RefCell::new(GrassLayer::new(canvas, document)?));
        let action = layer.borrow_mut().mount(reduced_motion, &self.bus);
        match action {
            MountAction::StartLoop => {
                self.frames.push(frame::start_loop(layer.clone())?);
                self.listeners
                    .extend(events::pointer::wire_grass_pointer(window, &layer)?);
                let l = layer.clone();
                self.observers.push(VisibilityObserver::observe(
                    layer.borrow().canvas(),
                    move |v| l.borrow_mut().set_visibility(v),
                )?);
            }
            MountAction::RenderStaticFrame => GrassLayer::redraw_on_sprite_load(&layer),
        }
        self.grass = Some(layer);
        Ok(())
    }

    fn mount_ground(
        &mut self,
        window: &web::Window,
        document: &web::Document,
        reduced_motion: bool,
    ) -> anyhow::Result<()> {
        let Some(canvas) = dom::canvas_by_id(document, ROCKS_CANVAS_ID) else {
            log::info!("[ground] no #{ROCKS_CANVAS_ID} canvas; layer disabled");
            return Ok(());
        };
        let layer = Rc::new(RefCell::new(GroundLayer::new(canvas)?));
        let action = layer.borrow_mut().mount(reduced_motion, &self.bus);
        if action == MountAction::StartLoop {
            self.frames.push(frame::start_loop(layer.clone())?);
            self.listeners
                .extend(events::pointer::wire_ground_drag(window, &layer)?);
            let l = layer.clone();
            self.observers.push(VisibilityObserver::observe(
                layer.borrow().canvas(),
                move |v| l.borrow_mut().set_visibility(v),
            )?);
        }
        self.ground = Some(layer);
        Ok(())
    }

    fn mount_carousel(&mut self, window: &web::Window, document: &web::Document) -> anyhow::Result<()> {
        let Some(root) = document
            .get_element_by_id(CAROUSEL_ID)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            log::info!("[carousel] no #{CAROUSEL_ID} element; carousel disabled");
            return Ok(());
        };
        let view = Rc::new(RefCell::new(CarouselView::new(root, self.bus.clone())?));
        self.listeners
            .extend(events::carousel::wire_buttons(document, &view)?);
        self.listeners.extend(events::carousel::wire_swipe(&view)?);
        self.listeners
            .push(events::carousel::wire_wheel(window, &view)?);
        self.listeners
            .push(events::keyboard::wire_carousel_keys(&view)?);
        self.autoplay = events::carousel::start_autoplay(&view)?;
        self.carousel = Some(view);
        Ok(())
    }

    fn wire_resize(&mut self, window: &web::Window) -> anyhow::Result<()> {
        let grass = self.grass.clone();
        let ground = self.ground.clone();
        let carousel = self.carousel.clone();
        self.listeners
            .push(dom::listen(window, "resize", true, move |_: web::Event| {
                if let Some(g) = &grass {
                    g.borrow_mut().resize();
                }
                if let Some(g) = &ground {
                    g.borrow_mut().resize();
                }
                if let Some(c) = &carousel {
                    c.borrow().layout();
                }
            })?);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(g) = &self.grass {
            g.borrow_mut().unmount();
        }
        if let Some(g) = &self.ground {
            g.borrow_mut().unmount();
        }
        log::info!(
            "unmounting: {} frame loops, {} listeners, {} gust subscribers",
            self.frames.len(),
            self.listeners.len(),
            self.bus.subscriber_count()
        );
    }
}

fn mount() -> anyhow::Result<App> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let reduced_motion = dom::prefers_reduced_motion();
    if reduced_motion {
        log::info!("prefers-reduced-motion: static frames only");
    }

    let mut app = App::default();
    // A broken layer only disables itself.
    if let Err(e) = app.mount_grass(&window, &document, reduced_motion) {
        log::error!("[grass] mount failed: {:?}", e);
    }
    if let Err(e) = app.mount_ground(&window, &document, reduced_motion) {
        log::error!("[ground] mount failed: {:?}", e);
    }
    if let Err(e) = app.mount_carousel(&window, &document) {
        log::error!("[carousel] mount failed: {:?}", e);
    }
    app.wire_resize(&window)?;
    Ok(app)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("prairie-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let app = mount()?;
    // Remounting replaces (and tears down) any previous app.
    let previous = APP.with(|slot| slot.borrow_mut().replace(app));
    drop(previous);
    log::info!("prairie-web mounted");
    Ok(())
}

/// Tear down every layer, listener and observer.
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    drop(app);
}
