//! Directional wind gusts shared between layers.
//!
//! The carousel publishes a [`GustEvent`]; every layer holding a
//! [`GustSubscription`] finds it in its inbox on its next update. Increments
//! are additive, so the order in which layers drain does not matter.

use crate::field::BladeInstance;
use crate::params::GustParams;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GustDirection {
    Left,
    Right,
}

impl GustDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            GustDirection::Left => -1.0,
            GustDirection::Right => 1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            GustDirection::Left
        } else {
            GustDirection::Right
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GustEvent {
    /// Focal x in viewport CSS pixels.
    pub focus_x: f32,
    pub strength: f32,
    pub direction: GustDirection,
}

/// Most events an undrained inbox holds; older ones are dropped first.
pub const GUST_INBOX_CAPACITY: usize = 4;

pub type GustInbox = SmallVec<[GustEvent; GUST_INBOX_CAPACITY]>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    inboxes: FnvHashMap<u64, GustInbox>,
}

/// Single-threaded broadcast channel for gusts. Cloning shares the bus.
#[derive(Clone, Default)]
pub struct GustBus {
    inner: Rc<RefCell<BusInner>>,
}

impl GustBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, event: GustEvent) {
        let mut inner = self.inner.borrow_mut();
        for inbox in inner.inboxes.values_mut() {
            if inbox.len() >= GUST_INBOX_CAPACITY {
                inbox.remove(0);
            }
            inbox.push(event);
        }
    }

    pub fn subscribe(&self) -> GustSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.inboxes.insert(id, GustInbox::new());
        GustSubscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().inboxes.len()
    }
}

/// Inbox handle; unsubscribes when dropped.
pub struct GustSubscription {
    id: u64,
    bus: Weak<RefCell<BusInner>>,
}

impl GustSubscription {
    /// Take every event delivered since the last drain.
    pub fn drain(&self) -> GustInbox {
        let Some(bus) = self.bus.upgrade() else {
            return GustInbox::new();
        };
        let mut inner = bus.borrow_mut();
        inner
            .inboxes
            .get_mut(&self.id)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Drop pending events without applying them.
    pub fn clear(&self) {
        if let Some(bus) = self.bus.upgrade() {
            if let Some(inbox) = bus.borrow_mut().inboxes.get_mut(&self.id) {
                inbox.clear();
            }
        }
    }
}

impl Drop for GustSubscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            if let Ok(mut inner) = bus.try_borrow_mut() {
                inner.inboxes.remove(&self.id);
            }
        }
    }
}

impl std::fmt::Debug for GustSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GustSubscription").field("id", &self.id).finish()
    }
}

/// `exp(-dx² / 2σ²)`; zero for a non-positive sigma.
#[inline]
pub fn gaussian_weight(dx: f32, sigma: f32) -> f32 {
    if sigma <= 0.0 {
        return 0.0;
    }
    (-(dx * dx) / (2.0 * sigma * sigma)).exp()
}

/// Raw (uncapped) sway-boost increment a gust gives one blade. The gust-angle
/// increment is this value times `angle_gain / boost_gain` and the direction.
pub fn blade_weight(
    blade: &BladeInstance,
    focus_x: f32,
    width: f32,
    strength: f32,
    params: &GustParams,
    seed_head_attenuation: f32,
) -> f32 {
    let sigma = width * params.sigma_fraction;
    let mut w = gaussian_weight(blade.x - focus_x, sigma)
        * blade.constants.gust_jitter
        * blade.constants.reactivity
        * strength.max(0.0);
    if blade.has_seed_head() {
        w *= seed_head_attenuation;
    }
    w
}

/// Inject one gust into a blade population. `focus_x` must already be in
/// the canvas's local coordinates.
pub fn apply_grass_gust(
    blades: &mut [BladeInstance],
    focus_x: f32,
    strength: f32,
    direction: GustDirection,
    width: f32,
    params: &GustParams,
    seed_head_attenuation: f32,
) {
    let dir = direction.sign();
    for blade in blades.iter_mut() {
        let w = blade_weight(blade, focus_x, width, strength, params, seed_head_attenuation);
        if w <= params.negligible {
            continue;
        }
        let s = &mut blade.state;
        s.sway_boost = (s.sway_boost + w * params.boost_gain).min(params.boost_max);
        s.gust_angle = (s.gust_angle + dir * w * params.angle_gain)
            .clamp(-params.angle_max, params.angle_max);
    }
}
