//! Per-canvas animation loop state.
//!
//! The host owns the actual `requestAnimationFrame` chain; this decides what
//! each callback should do.

use crate::motion::clamp_dt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Animating,
    StaticReducedMotion,
}

/// What the host should do right after mounting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountAction {
    /// Draw one static frame; never schedule a frame.
    RenderStaticFrame,
    StartLoop,
}

/// What a single frame callback should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    /// Off-screen: no work, but keep scheduling.
    Skip,
    Advance { dt: f32 },
    /// Unmounted or static: stop the chain.
    Stop,
}

#[derive(Clone, Debug)]
pub struct AnimationLoop {
    visibility: Visibility,
    mode: Mode,
    mounted: bool,
    max_dt: f32,
    static_renders: u32,
    frames: u64,
}

impl AnimationLoop {
    pub fn new(max_dt: f32) -> Self {
        Self {
            visibility: Visibility::Visible,
            mode: Mode::Animating,
            mounted: false,
            max_dt,
            static_renders: 0,
            frames: 0,
        }
    }

    pub fn mount(&mut self, reduced_motion: bool) -> MountAction {
        self.mounted = true;
        if reduced_motion {
            self.mode = Mode::StaticReducedMotion;
            self.static_renders += 1;
            MountAction::RenderStaticFrame
        } else {
            self.mode = Mode::Animating;
            MountAction::StartLoop
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    /// Decide a frame given the raw wall-clock delta in seconds.
    pub fn tick(&mut self, raw_dt: f32) -> Tick {
        if !self.mounted || self.mode == Mode::StaticReducedMotion {
            return Tick::Stop;
        }
        if self.visibility == Visibility::Hidden {
            return Tick::Skip;
        }
        self.frames += 1;
        Tick::Advance {
            dt: clamp_dt(raw_dt, self.max_dt),
        }
    }

    /// Whether a resize should redraw immediately without the loop.
    pub fn needs_static_redraw(&self) -> bool {
        self.mounted && self.mode == Mode::StaticReducedMotion
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn static_renders(&self) -> u32 {
        self.static_renders
    }

    /// Frames that did real work.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
