use crate::constants::SPRITE_MANIFEST_ID;
use crate::dom::{self, EventListener};
use fnv::FnvHashMap;
use prairie_core::{clean_name, SpriteManifest, SpriteSource};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Read the `{ "file name": "url" }` manifest embedded in the page.
/// A missing or malformed script tag yields an empty manifest.
pub fn read_manifest(document: &web::Document) -> SpriteManifest {
    let mut manifest = SpriteManifest::new();
    let Some(text) = document
        .get_element_by_id(SPRITE_MANIFEST_ID)
        .and_then(|el| el.text_content())
    else {
        log::info!("[sprites] no #{SPRITE_MANIFEST_ID} manifest; using vector fallback");
        return manifest;
    };
    let parsed = match js_sys::JSON::parse(&text) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[sprites] manifest is not valid JSON: {:?}", e);
            return manifest;
        }
    };
    let Some(object) = parsed.dyn_ref::<js_sys::Object>() else {
        log::warn!("[sprites] manifest is not an object");
        return manifest;
    };
    for entry in js_sys::Object::entries(object).iter() {
        let pair: js_sys::Array = entry.unchecked_into();
        if let (Some(path), Some(url)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            manifest.insert(&path, url);
        }
    }
    log::info!("[sprites] manifest with {} entries", manifest.keys().len());
    manifest
}

/// Loaded sprite images keyed by cleaned sprite name.
pub struct SpriteCache {
    manifest: SpriteManifest,
    images: FnvHashMap<String, web::HtmlImageElement>,
    listeners: Vec<EventListener>,
}

impl SpriteCache {
    pub fn new(manifest: SpriteManifest) -> Self {
        Self {
            manifest,
            images: FnvHashMap::default(),
            listeners: Vec::new(),
        }
    }

    /// Start loading `name` unless it is already requested. Unknown names warn
    /// once and stay on the vector fallback.
    pub fn preload(&mut self, name: &str) {
        let key = clean_name(name);
        if self.images.contains_key(&key) {
            return;
        }
        let Some(url) = self.manifest.sprite_url(name).map(str::to_string) else {
            return;
        };
        let image = match web::HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                log::warn!("[sprites] cannot create image for {key}: {:?}", e);
                return;
            }
        };
        let failed = key.clone();
        match dom::listen(&image, "error", true, move |_: web::Event| {
            log::warn!("[sprites] failed to load {failed}; drawing fallback");
        }) {
            Ok(l) => self.listeners.push(l),
            Err(e) => log::warn!("[sprites] {e}"),
        }
        image.set_src(&url);
        self.images.insert(key, image);
    }

    pub fn preload_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.preload(name);
        }
    }

    /// The image for `name`, only once it has decoded.
    pub fn get(&self, name: &str) -> Option<&web::HtmlImageElement> {
        self.images
            .get(&clean_name(name))
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    /// Run `callback` when `name` finishes loading; immediately if it already has.
    pub fn on_loaded(&mut self, name: &str, mut callback: impl FnMut() + 'static) {
        if self.get(name).is_some() {
            callback();
            return;
        }
        let Some(image) = self.images.get(&clean_name(name)) else {
            return;
        };
        match dom::listen(image, "load", true, move |_: web::Event| callback()) {
            Ok(l) => self.listeners.push(l),
            Err(e) => log::warn!("[sprites] {e}"),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }
}
