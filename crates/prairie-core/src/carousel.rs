//! Rotating carousel state and gesture normalization.
//!
//! Time is passed in explicitly (milliseconds, any monotonic origin) so the
//! state machine never reads a clock.

use crate::constants::*;
use crate::gust::{GustDirection, GustEvent};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    First,
    Last,
    GoTo(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    pub transition_ms: f64,
    /// Delay between a committed move and its gust.
    pub gust_delay_ms: f64,
    pub gust_strength: f32,
    /// Autoplay interval; `0` disables autoplay.
    pub autoplay_ms: f64,
    pub radius_px: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            transition_ms: CAROUSEL_TRANSITION_MS,
            gust_delay_ms: CAROUSEL_GUST_DELAY_MS,
            gust_strength: CAROUSEL_GUST_STRENGTH,
            autoplay_ms: CAROUSEL_AUTOPLAY_MS,
            radius_px: CAROUSEL_RADIUS_PX,
        }
    }
}

/// A committed navigation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: GustDirection,
}

impl Transition {
    pub fn gust(&self, focus_x: f32, strength: f32) -> GustEvent {
        GustEvent {
            focus_x,
            strength,
            direction: self.direction,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    index: usize,
    /// Continuous ring rotation in degrees.
    rotation: f32,
    item_count: usize,
    locked_until_ms: f64,
    last_move_ms: f64,
    config: CarouselConfig,
}

impl CarouselState {
    pub fn new(item_count: usize, config: CarouselConfig) -> Self {
        Self {
            index: 0,
            rotation: 0.0,
            item_count,
            locked_until_ms: f64::NEG_INFINITY,
            last_move_ms: 0.0,
            config,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Angular step between items in degrees.
    pub fn step(&self) -> f32 {
        if self.item_count == 0 {
            0.0
        } else {
            360.0 / self.item_count as f32
        }
    }

    /// Rotation folded into `[0, 360)`.
    pub fn normalized_rotation(&self) -> f32 {
        let r = self.rotation.rem_euclid(360.0);
        if r >= 360.0 - 1e-3 {
            0.0
        } else {
            r
        }
    }

    /// Angle (degrees) at which item `i` currently sits on the ring.
    pub fn item_angle(&self, i: usize) -> f32 {
        i as f32 * self.step() + self.rotation
    }

    pub fn is_transitioning(&self, now_ms: f64) -> bool {
        now_ms < self.locked_until_ms
    }

    fn can_move(&self, now_ms: f64) -> bool {
        self.item_count > 1 && !self.is_transitioning(now_ms)
    }

    fn commit(&mut self, to: usize, direction: GustDirection, now_ms: f64) -> Transition {
        let from = self.index;
        self.index = to;
        self.locked_until_ms = now_ms + self.config.transition_ms;
        self.last_move_ms = now_ms;
        Transition { from, to, direction }
    }

    pub fn next(&mut self, now_ms: f64) -> Option<Transition> {
        if !self.can_move(now_ms) {
            return None;
        }
        self.rotation -= self.step();
        let to = (self.index + 1) % self.item_count;
        Some(self.commit(to, GustDirection::Right, now_ms))
    }

    pub fn previous(&mut self, now_ms: f64) -> Option<Transition> {
        if !self.can_move(now_ms) {
            return None;
        }
        self.rotation += self.step();
        let to = (self.index + self.item_count - 1) % self.item_count;
        Some(self.commit(to, GustDirection::Left, now_ms))
    }

    /// Jump to `target`. The gust follows the shorter way around the ring.
    pub fn go_to(&mut self, target: usize, now_ms: f64) -> Option<Transition> {
        if target >= self.item_count || target == self.index || !self.can_move(now_ms) {
            return None;
        }
        let delta = shortest_delta(self.index, target, self.item_count);
        self.rotation = -(target as f32) * self.step();
        let direction = GustDirection::from_sign(delta as f32);
        Some(self.commit(target, direction, now_ms))
    }

    pub fn command(&mut self, cmd: NavCommand, now_ms: f64) -> Option<Transition> {
        match cmd {
            NavCommand::Next => self.next(now_ms),
            NavCommand::Previous => self.previous(now_ms),
            NavCommand::First => self.go_to(0, now_ms),
            NavCommand::Last => self.go_to(self.item_count.saturating_sub(1), now_ms),
            NavCommand::GoTo(i) => self.go_to(i, now_ms),
        }
    }

    /// Advance once per autoplay interval of inactivity.
    pub fn autoplay_tick(&mut self, now_ms: f64) -> Option<Transition> {
        if self.config.autoplay_ms <= 0.0 || now_ms - self.last_move_ms < self.config.autoplay_ms {
            return None;
        }
        self.next(now_ms)
    }
}

/// Signed index delta from `from` to `to` taking the shorter way around a
/// ring of `count`. Ties go the direct way.
pub fn shortest_delta(from: usize, to: usize, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    let direct = to as i64 - from as i64;
    let wrap = if direct > 0 {
        direct - count as i64
    } else {
        direct + count as i64
    };
    if wrap.abs() < direct.abs() {
        wrap
    } else {
        direct
    }
}

// ---------------------------------------------------------------------------
// Swipe
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeConfig {
    pub intent_px: f32,
    pub trigger_px: f32,
    pub cooldown_ms: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            intent_px: SWIPE_INTENT_PX,
            trigger_px: SWIPE_TRIGGER_PX,
            cooldown_ms: SWIPE_COOLDOWN_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SwipePhase {
    Idle,
    Pending,
    Locked(Axis),
    Done,
}

/// One-step-per-gesture swipe recognizer.
#[derive(Clone, Debug)]
pub struct SwipeTracker {
    config: SwipeConfig,
    start: Vec2,
    phase: SwipePhase,
    lock_until_ms: f64,
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: Vec2::ZERO,
            phase: SwipePhase::Idle,
            lock_until_ms: f64::NEG_INFINITY,
        }
    }

    /// Start a gesture; returns `false` while cooling down.
    pub fn begin(&mut self, pos: Vec2, now_ms: f64) -> bool {
        if now_ms < self.lock_until_ms {
            self.phase = SwipePhase::Idle;
            return false;
        }
        self.start = pos;
        self.phase = SwipePhase::Pending;
        true
    }

    /// Feed a move; yields a command at most once per gesture.
    pub fn update(&mut self, pos: Vec2, now_ms: f64) -> Option<NavCommand> {
        let d = pos - self.start;
        let axis = match self.phase {
            SwipePhase::Idle | SwipePhase::Done => return None,
            SwipePhase::Locked(axis) => axis,
            SwipePhase::Pending => {
                if d.length() < self.config.intent_px {
                    return None;
                }
                let axis = if d.x.abs() >= d.y.abs() { Axis::X } else { Axis::Y };
                self.phase = SwipePhase::Locked(axis);
                axis
            }
        };
        let primary = match axis {
            Axis::X => d.x,
            Axis::Y => d.y,
        };
        if primary.abs() < self.config.trigger_px {
            return None;
        }
        self.phase = SwipePhase::Done;
        self.lock_until_ms = now_ms + self.config.cooldown_ms;
        Some(if primary > 0.0 {
            NavCommand::Previous
        } else {
            NavCommand::Next
        })
    }

    /// Whether moves should be consumed (axis locked or already fired).
    pub fn is_capturing(&self) -> bool {
        matches!(self.phase, SwipePhase::Locked(_) | SwipePhase::Done)
    }

    pub fn end(&mut self) {
        self.phase = SwipePhase::Idle;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelConfig {
    pub threshold_px: f32,
    pub cooldown_ms: f64,
    pub line_px: f32,
    pub require_fully_in_view: bool,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            threshold_px: WHEEL_THRESHOLD_PX,
            cooldown_ms: WHEEL_COOLDOWN_MS,
            line_px: WHEEL_LINE_PX,
            require_fully_in_view: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaMode {
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// From `WheelEvent.deltaMode`; unknown values are treated as pixels.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

pub fn normalize_wheel_delta(delta: Vec2, mode: DeltaMode, line_px: f32, viewport_height: f32) -> Vec2 {
    match mode {
        DeltaMode::Pixel => delta,
        DeltaMode::Line => delta * line_px,
        DeltaMode::Page => delta * viewport_height,
    }
}

/// True when `[top, bottom]` lies within the viewport.
#[inline]
pub fn fully_in_view(top: f32, bottom: f32, viewport_height: f32) -> bool {
    top >= 0.0 && bottom <= viewport_height
}

#[derive(Clone, Debug)]
pub struct WheelAccumulator {
    config: WheelConfig,
    acc: f32,
    last_dir: f32,
    lock_until_ms: f64,
}

impl WheelAccumulator {
    pub fn new(config: WheelConfig) -> Self {
        Self {
            config,
            acc: 0.0,
            last_dir: 0.0,
            lock_until_ms: f64::NEG_INFINITY,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Feed a pixel-normalized delta.
    pub fn feed(&mut self, delta: Vec2, now_ms: f64) -> Option<NavCommand> {
        if now_ms < self.lock_until_ms {
            return None;
        }
        let primary = if delta.x.abs() >= delta.y.abs() {
            delta.x
        } else {
            delta.y
        };
        let dir = if primary > 0.0 {
            1.0
        } else if primary < 0.0 {
            -1.0
        } else {
            0.0
        };
        if dir != 0.0 && dir != self.last_dir {
            self.acc = 0.0;
        }
        self.last_dir = dir;
        self.acc += primary;

        if self.acc.abs() < self.config.threshold_px {
            return None;
        }
        let cmd = if self.acc > 0.0 {
            NavCommand::Next
        } else {
            NavCommand::Previous
        };
        self.acc = 0.0;
        self.lock_until_ms = now_ms + self.config.cooldown_ms;
        Some(cmd)
    }
}

impl Default for WheelAccumulator {
    fn default() -> Self {
        Self::new(WheelConfig::default())
    }
}
