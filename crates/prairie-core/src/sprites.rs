//! Sprite names and the name → URL manifest.
//!
//! The host owns asset bundling; this module only knows sprite names and how
//! to look them up forgivingly. A missing sprite is never fatal: callers get
//! `None` and draw the vector fallback.

use fnv::FnvHashMap;
use thiserror::Error;

/// Blade sprites assigned at generation.
pub const BLADE_SPRITES: &[&str] = &[
    "blade_green_01",
    "blade_green_02",
    "blade_green_03",
    "blade_green_left_01",
    "blade_green_left_02",
    "blade_green_straight_01",
    "blade_green_straight_02",
    // Shipped asset name is misspelled.
    "blade_green_straigh_03",
];

/// Seed-head sprites; only seed-bearing blades get one.
pub const SEED_HEAD_SPRITES: &[&str] = &["seed_head_01", "seed_head_02"];

const EXTENSION: &str = ".png";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpriteError {
    #[error("sprite lookup with an empty name")]
    EmptyName,
    #[error("missing sprite `{name}` (looked up as `{cleaned}`)")]
    Missing { name: String, cleaned: String },
}

/// Anything that can resolve sprite names to URLs.
pub trait SpriteSource {
    fn resolve(&self, name: &str) -> Result<&str, SpriteError>;

    /// URL for `name`, logging a warning when it is unknown.
    fn sprite_url(&self, name: &str) -> Option<&str> {
        match self.resolve(name) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("[sprites] {e}");
                None
            }
        }
    }

    fn has_sprite(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }
}

/// Collapse a doubled `blade_blade_` prefix.
pub fn clean_name(name: &str) -> String {
    match name.strip_prefix("blade_blade_") {
        Some(rest) => format!("blade_{rest}"),
        None => name.to_string(),
    }
}

/// File-name keyed manifest; every entry is reachable with or without `.png`.
#[derive(Clone, Debug, Default)]
pub struct SpriteManifest {
    entries: FnvHashMap<String, String>,
}

impl SpriteManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(path or file name, url)` pairs. Only the file name part
    /// of the key is kept.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut manifest = Self::new();
        for (k, v) in entries {
            manifest.insert(k.as_ref(), v);
        }
        manifest
    }

    pub fn insert(&mut self, path: &str, url: impl Into<String>) {
        let file = path.rsplit('/').next().unwrap_or(path);
        if file.is_empty() {
            return;
        }
        let url = url.into();
        let bare = file.strip_suffix(EXTENSION).unwrap_or(file);
        self.entries.insert(bare.to_string(), url.clone());
        self.entries.insert(format!("{bare}{EXTENSION}"), url);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted sprite names without extension.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|k| !k.contains('.'))
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn blade_sprites(&self) -> Vec<(&str, &str)> {
        self.with_prefix("blade_")
    }

    pub fn bud_sprites(&self) -> Vec<(&str, &str)> {
        self.with_prefix("seed_")
    }

    fn with_prefix(&self, prefix: &str) -> Vec<(&str, &str)> {
        let mut out: Vec<(&str, &str)> = self
            .entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix) && !k.contains('.'))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        out.sort_unstable();
        out
    }
}

impl SpriteSource for SpriteManifest {
    fn resolve(&self, name: &str) -> Result<&str, SpriteError> {
        if name.is_empty() {
            return Err(SpriteError::EmptyName);
        }
        let cleaned = clean_name(name);
        let hit = self
            .entries
            .get(&cleaned)
            .or_else(|| {
                if cleaned.contains('.') {
                    cleaned
                        .strip_suffix(EXTENSION)
                        .and_then(|bare| self.entries.get(bare))
                } else {
                    self.entries.get(&format!("{cleaned}{EXTENSION}"))
                }
            })
            .map(String::as_str);
        hit.ok_or_else(|| SpriteError::Missing {
            name: name.to_string(),
            cleaned,
        })
    }
}
