// DOM contract and drawing constants for the web front-end.
// Simulation tuning lives in `prairie_core::constants`.

// Element ids / selectors. Every element is optional.
pub const GRASS_CANVAS_ID: &str = "prairie-grass";
pub const ROCKS_CANVAS_ID: &str = "ground-rocks";
pub const CAROUSEL_ID: &str = "project-carousel";
pub const CAROUSEL_ITEM_SELECTOR: &str = ".carousel-item";
pub const CAROUSEL_PREV_SELECTOR: &str = "[data-carousel=\"prev\"]";
pub const CAROUSEL_NEXT_SELECTOR: &str = "[data-carousel=\"next\"]";
pub const SPRITE_MANIFEST_ID: &str = "grass-sprites";

// Optional data-* overrides
pub const ATTR_BREEZE: &str = "data-breeze";
pub const ATTR_SEED: &str = "data-seed";
pub const ATTR_WIND: &str = "data-wind";
pub const ATTR_AUTOPLAY_MS: &str = "data-autoplay-ms";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub const ACTIVE_ITEM_CLASS: &str = "is-active";

// Off-screen throttling
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

// Backing store is sized at min(devicePixelRatio, MAX_PIXEL_RATIO)
pub const MAX_PIXEL_RATIO: f64 = 1.5;

// How often the carousel checks its autoplay timer (ms)
pub const AUTOPLAY_POLL_MS: i32 = 250;

// Colours
pub const FALLBACK_LEAF_COLOR: &str = "#6f8f3a";
pub const RIDGE_FILL: &str = "#8a7a5c";
pub const ROCK_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.18)";
pub const ROCK_HIGHLIGHT_COLOR: &str = "rgba(255, 255, 255, 0.22)";

// Rock highlight ellipse relative to the rock's half extents
pub const ROCK_HIGHLIGHT_OFFSET: f32 = 0.3;
pub const ROCK_HIGHLIGHT_SIZE: f32 = 0.22;
