use prairie_core::{
    parse_number, BreezeIntensity, CarouselConfig, ConfigError, SceneConfig, WindFieldKind,
};

/// Overrides read from the grass canvas's `data-*` attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrassOverrides {
    pub breeze: Option<BreezeIntensity>,
    pub seed: Option<u64>,
    pub wind: Option<WindFieldKind>,
}

/// Parse whatever is present; bad values are reported and left unset.
pub fn parse_grass_overrides(
    breeze: Option<&str>,
    seed: Option<&str>,
    wind: Option<&str>,
) -> (GrassOverrides, Vec<ConfigError>) {
    let mut errors = Vec::new();
    let breeze = keep(breeze.map(str::parse::<BreezeIntensity>), &mut errors);
    let wind = keep(wind.map(str::parse::<WindFieldKind>), &mut errors);
    let seed = keep(seed.map(|s| parse_number::<u64>("data-seed", s)), &mut errors);
    (GrassOverrides { breeze, seed, wind }, errors)
}

fn keep<T>(parsed: Option<Result<T, ConfigError>>, errors: &mut Vec<ConfigError>) -> Option<T> {
    match parsed? {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

pub fn apply_grass_overrides(config: &mut SceneConfig, overrides: &GrassOverrides) {
    if let Some(breeze) = overrides.breeze {
        config.wind.breeze = breeze;
    }
    if let Some(kind) = overrides.wind {
        config.wind.field.kind = kind;
    }
}

/// Carousel config with an optional `data-autoplay-ms` value applied.
pub fn carousel_config(autoplay_ms: Option<&str>) -> (CarouselConfig, Option<ConfigError>) {
    let mut config = CarouselConfig::default();
    match autoplay_ms.map(|v| parse_number::<f64>("data-autoplay-ms", v)) {
        Some(Ok(ms)) if ms.is_finite() && ms >= 0.0 => {
            config.autoplay_ms = ms;
            (config, None)
        }
        Some(Ok(_)) => (
            config,
            Some(ConfigError::InvalidNumber {
                key: "data-autoplay-ms",
                value: autoplay_ms.unwrap_or_default().to_string(),
            }),
        ),
        Some(Err(e)) => (config, Some(e)),
        None => (config, None),
    }
}
