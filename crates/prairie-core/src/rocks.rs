//! Pebble layer sitting on the ground ridge.

use crate::constants::*;
use crate::field::Depth;
use crate::gust::{gaussian_weight, GustDirection, GustSubscription};
use crate::ridge::ridge_y_px;
use crate::params::Span;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// One entry of the fixed rock layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RockSpec {
    /// Normalized x in `[0, 1]`.
    pub x: f32,
    pub depth: Depth,
    pub width: f32,
    pub height: f32,
    /// Hue offset from the base earth tone.
    pub hue: f32,
    pub seed: u32,
}

const fn rock(x: f32, depth: Depth, width: f32, height: f32, hue: f32, seed: u32) -> RockSpec {
    RockSpec {
        x,
        depth,
        width,
        height,
        hue,
        seed,
    }
}

/// Five back, six mid and six front rocks.
pub const ROCK_LAYOUT: [RockSpec; 17] = [
    rock(0.08, Depth::Back, 18.0, 14.0, -5.0, 42),
    rock(0.22, Depth::Back, 20.0, 16.0, 8.0, 17),
    rock(0.45, Depth::Back, 16.0, 13.0, -10.0, 93),
    rock(0.71, Depth::Back, 19.0, 15.0, 5.0, 64),
    rock(0.89, Depth::Back, 17.0, 14.0, -8.0, 28),
    rock(0.15, Depth::Mid, 26.0, 20.0, 12.0, 73),
    rock(0.34, Depth::Mid, 28.0, 22.0, -15.0, 51),
    rock(0.52, Depth::Mid, 24.0, 19.0, 7.0, 89),
    rock(0.68, Depth::Mid, 27.0, 21.0, -12.0, 36),
    rock(0.83, Depth::Mid, 25.0, 20.0, 10.0, 45),
    rock(0.94, Depth::Mid, 23.0, 18.0, -6.0, 82),
    rock(0.12, Depth::Front, 34.0, 26.0, 15.0, 61),
    rock(0.28, Depth::Front, 36.0, 28.0, -18.0, 29),
    rock(0.41, Depth::Front, 32.0, 25.0, 8.0, 77),
    rock(0.58, Depth::Front, 35.0, 27.0, -14.0, 14),
    rock(0.76, Depth::Front, 33.0, 26.0, 11.0, 56),
    rock(0.91, Depth::Front, 31.0, 24.0, -9.0, 38),
];

pub type Pebble = SmallVec<[Vec2; 7]>;

/// `fract(sin(s) * 10000)`.
#[inline]
fn shape_rand(s: f64) -> f64 {
    let x = s.sin() * 10_000.0;
    x - x.floor()
}

/// Irregular polygon of 5–7 vertices around the origin. Pure in its inputs.
pub fn pebble_vertices(seed: u32, width: f32, height: f32) -> Pebble {
    let seed = seed as f64;
    let count = 5 + ((shape_rand(seed) * 3.0).floor() as usize).min(2);
    let (rx, ry) = (width as f64 / 2.0, height as f64 / 2.0);
    (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * TAU;
            let jitter = 0.7 + shape_rand(seed + i as f64 * 17.0) * 0.3;
            Vec2::new(
                (angle.cos() * rx * jitter) as f32,
                (angle.sin() * ry * jitter) as f32,
            )
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub fn css(&self) -> String {
        format!(
            "hsl({:.0}, {:.0}%, {:.0}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Earth tone for a hue offset; back rocks are paler and less saturated.
pub fn rock_color(hue: f32, depth: Depth) -> Hsl {
    Hsl {
        hue: ROCK_BASE_HUE + hue,
        saturation: ROCK_SATURATION[depth.index()],
        lightness: ROCK_LIGHTNESS[depth.index()],
    }
}

/// What a rock's body is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RockMotion {
    #[default]
    Resting,
    Held,
    Falling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RockInstance {
    pub spec: RockSpec,
    pub vertices: Pebble,
    pub color: Hsl,
    /// Body centre in canvas pixels; the ridge seat until the rock is moved.
    pub position: Vec2,
    /// Pixels per frame.
    pub velocity: Vec2,
    pub motion: RockMotion,
    /// Transient gust displacement.
    pub offset: Vec2,
    /// Gust response multiplier.
    pub reactivity: f32,
}

impl RockInstance {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.position + self.offset
    }

    /// Collision and grab radius.
    #[inline]
    pub fn radius(&self) -> f32 {
        (self.spec.width + self.spec.height) / 4.0
    }
}

/// Shapes, colours and reactivities for a layout; positions stay zero until
/// [`RockField::relayout`].
pub fn generate_rocks(layout: &[RockSpec]) -> Vec<RockInstance> {
    let reactivity = Span::from_pair(ROCK_REACTIVITY);
    layout
        .iter()
        .map(|spec| {
            let mut rng = StdRng::seed_from_u64(spec.seed as u64);
            RockInstance {
                spec: *spec,
                vertices: pebble_vertices(spec.seed, spec.width, spec.height),
                color: rock_color(spec.hue, spec.depth),
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                motion: RockMotion::Resting,
                offset: Vec2::ZERO,
                reactivity: reactivity.sample(&mut rng),
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RockParams {
    pub sigma_fraction: [f32; 3],
    pub cutoff_sigmas: f32,
    pub nudge_px: [f32; 3],
    pub lift_px: f32,
    pub decay: f32,
    pub negligible_px: f32,
    pub max_offset_px: f32,
    pub sink_fraction: f32,
    pub gravity_px: f32,
    pub floor_bounce: f32,
    pub floor_friction: f32,
    pub wall_bounce: f32,
    pub edge_margin_px: f32,
    pub throw_max_px: f32,
    pub settle_speed_px: f32,
}

impl Default for RockParams {
    fn default() -> Self {
        Self {
            sigma_fraction: ROCK_GUST_SIGMA_FRACTION,
            cutoff_sigmas: ROCK_GUST_CUTOFF_SIGMAS,
            nudge_px: ROCK_NUDGE_PX,
            lift_px: ROCK_LIFT_PX,
            decay: ROCK_GUST_DECAY,
            negligible_px: ROCK_OFFSET_NEGLIGIBLE_PX,
            max_offset_px: ROCK_OFFSET_MAX_PX,
            sink_fraction: ROCK_SINK_FRACTION,
            gravity_px: ROCK_GRAVITY_PX,
            floor_bounce: ROCK_FLOOR_BOUNCE,
            floor_friction: ROCK_FLOOR_FRICTION,
            wall_bounce: ROCK_WALL_BOUNCE,
            edge_margin_px: ROCK_EDGE_MARGIN_PX,
            throw_max_px: ROCK_THROW_MAX_PX,
            settle_speed_px: ROCK_SETTLE_SPEED_PX,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    index: usize,
    target: Vec2,
}

/// The rock layer: instances plus their gust and drag state.
#[derive(Debug)]
pub struct RockField {
    rocks: Vec<RockInstance>,
    params: RockParams,
    width: f32,
    height: f32,
    canvas_left: f32,
    drag: Option<Drag>,
    subscription: Option<GustSubscription>,
}

impl RockField {
    pub fn new(params: RockParams) -> Self {
        Self::with_layout(&ROCK_LAYOUT, params)
    }

    pub fn with_layout(layout: &[RockSpec], params: RockParams) -> Self {
        Self {
            rocks: generate_rocks(layout),
            params,
            width: 0.0,
            height: 0.0,
            canvas_left: 0.0,
            drag: None,
            subscription: None,
        }
    }

    pub fn subscribe(&mut self, subscription: GustSubscription) {
        self.subscription = Some(subscription);
    }

    /// Throw away gusts that arrived while the field was not advancing.
    pub fn discard_gusts(&mut self) {
        if let Some(sub) = &self.subscription {
            sub.clear();
        }
    }

    /// Viewport x of the canvas's left edge, used to localize gust foci.
    pub fn set_canvas_left(&mut self, left: f32) {
        self.canvas_left = left;
    }

    /// Re-seat every rock on the ridge for a new canvas size. Gust offsets,
    /// velocities and any drag are cleared.
    pub fn relayout(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.drag = None;
        let (w, h, sink) = (self.width, self.height, self.params.sink_fraction);
        for rock in &mut self.rocks {
            let x = rock.spec.x * w;
            rock.position = Vec2::new(x, seat_y(&rock.spec, x, w, h, sink));
            rock.velocity = Vec2::ZERO;
            rock.motion = RockMotion::Resting;
            rock.offset = Vec2::ZERO;
        }
    }

    /// Nudge mid/front rocks near `focus_x` (canvas-local pixels).
    pub fn apply_gust(&mut self, focus_x: f32, strength: f32, direction: GustDirection) {
        let p = self.params;
        for rock in &mut self.rocks {
            let layer = rock.spec.depth.index();
            let sigma = self.width * p.sigma_fraction[layer];
            if sigma <= 0.0 {
                continue;
            }
            let dx = rock.position.x - focus_x;
            if dx.abs() > p.cutoff_sigmas * sigma {
                continue;
            }
            let w = gaussian_weight(dx, sigma) * strength.max(0.0) * rock.reactivity;
            rock.offset += Vec2::new(direction.sign() * p.nudge_px[layer] * w, -p.lift_px * w);
            rock.offset = rock.offset.clamp_length_max(p.max_offset_px);
        }
    }

    /// Grab the rock nearest to `point` (canvas-local pixels) if one is
    /// within its radius plus the edge margin.
    pub fn begin_drag(&mut self, point: Vec2) -> bool {
        self.end_drag();
        let slop = self.params.edge_margin_px;
        let hit = self
            .rocks
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.position.distance(point), r.radius()))
            .filter(|&(_, d, r)| d <= r + slop)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _, _)| i);
        let Some(index) = hit else {
            return false;
        };
        let rock = &mut self.rocks[index];
        rock.motion = RockMotion::Held;
        rock.velocity = Vec2::ZERO;
        self.drag = Some(Drag {
            index,
            target: rock.position,
        });
        true
    }

    /// Move the held rock's target; applied on the next [`Self::advance`].
    pub fn drag_to(&mut self, point: Vec2) {
        if let Some(drag) = &mut self.drag {
            drag.target = point;
        }
    }

    /// Release the held rock so it falls with its throw velocity.
    pub fn end_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            if let Some(rock) = self.rocks.get_mut(drag.index) {
                rock.motion = RockMotion::Falling;
            }
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drain pending gusts, step the rock bodies one frame, then decay every
    /// gust offset.
    pub fn advance(&mut self) {
        let inbox = self
            .subscription
            .as_ref()
            .map(GustSubscription::drain)
            .unwrap_or_default();
        for event in inbox {
            self.apply_gust(event.focus_x - self.canvas_left, event.strength, event.direction);
        }

        self.step_bodies();
        self.separate();

        let (decay, negligible) = (self.params.decay, self.params.negligible_px);
        for rock in &mut self.rocks {
            rock.offset *= decay;
            if rock.offset.length() < negligible {
                rock.offset = Vec2::ZERO;
            }
        }
    }

    fn step_bodies(&mut self) {
        let (p, w, h) = (self.params, self.width, self.height);
        let drag = self.drag;
        for (i, rock) in self.rocks.iter_mut().enumerate() {
            match rock.motion {
                RockMotion::Resting => continue,
                RockMotion::Held => {
                    if let Some(d) = drag.filter(|d| d.index == i) {
                        rock.velocity = (d.target - rock.position).clamp_length_max(p.throw_max_px);
                        rock.position = d.target;
                    }
                }
                RockMotion::Falling => {
                    rock.velocity.y += p.gravity_px;
                    rock.position += rock.velocity;
                }
            }
            confine(rock, &p, w, h);
        }
    }

    /// Push apart overlapping rocks of one layer when either is moving.
    fn separate(&mut self) {
        let n = self.rocks.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (left, right) = self.rocks.split_at_mut(j);
                let (a, b) = (&mut left[i], &mut right[0]);
                if a.spec.depth != b.spec.depth {
                    continue;
                }
                if a.motion == RockMotion::Resting && b.motion == RockMotion::Resting {
                    continue;
                }
                let delta = b.position - a.position;
                let dist = delta.length();
                let min = a.radius() + b.radius();
                if dist <= 0.0 || dist >= min {
                    continue;
                }
                let normal = delta / dist;
                let overlap = min - dist;
                let (share_a, share_b) = match (a.motion, b.motion) {
                    (RockMotion::Held, _) => (0.0, overlap),
                    (_, RockMotion::Held) => (overlap, 0.0),
                    _ => (overlap / 2.0, overlap / 2.0),
                };
                a.position -= normal * share_a;
                b.position += normal * share_b;
                for rock in [a, b] {
                    if rock.motion == RockMotion::Resting {
                        rock.motion = RockMotion::Falling;
                    }
                }
            }
        }
    }

    pub fn rocks(&self) -> &[RockInstance] {
        &self.rocks
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Centre y of a rock sitting on the ridge at canvas x.
fn seat_y(spec: &RockSpec, x: f32, width: f32, height: f32, sink: f32) -> f32 {
    let nx = if width > 0.0 { x / width } else { spec.x };
    ridge_y_px(nx, height) + spec.height * (sink - 0.5)
}

/// Side walls and the ridge floor.
fn confine(rock: &mut RockInstance, p: &RockParams, width: f32, height: f32) {
    let r = rock.radius();
    let (lo, hi) = (p.edge_margin_px + r, width - p.edge_margin_px - r);
    if hi < lo {
        rock.position.x = width / 2.0;
    } else if rock.position.x < lo {
        rock.position.x = lo;
        rock.velocity.x = rock.velocity.x.abs() * p.wall_bounce;
    } else if rock.position.x > hi {
        rock.position.x = hi;
        rock.velocity.x = -rock.velocity.x.abs() * p.wall_bounce;
    }

    let seat = seat_y(&rock.spec, rock.position.x, width, height, p.sink_fraction);
    if rock.position.y < seat {
        return;
    }
    rock.position.y = seat;
    if rock.motion != RockMotion::Falling {
        return;
    }
    if rock.velocity.y > 0.0 {
        rock.velocity.y *= -p.floor_bounce;
    }
    rock.velocity.x *= p.floor_friction;
    if rock.velocity.length() < p.settle_speed_px {
        rock.velocity = Vec2::ZERO;
        rock.motion = RockMotion::Resting;
    }
}
