//! Widget configuration.
//!
//! Every field has a default taken from `constants`, so a page can override a
//! single knob (e.g. the particle asset) without spelling out the rest.  The
//! configuration can arrive either as a JS object handed to `mount_widget()`
//! or as JSON stored in the container's `data-widget-config` attribute.

use std::fmt;

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::constants::*;

/// Runtime knobs of the widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub image_id: String,
    pub container_id: String,
    pub particle_asset: String,
    pub particle_class: String,
    /// `[min, max]` particle edge length in pixels.
    pub particle_size_range: [f64; 2],
    /// `[min, max]` delay between two spawns in milliseconds.
    pub spawn_interval_range_ms: [u32; 2],
    pub particle_animation_ms: u32,
    pub particle_removal_buffer_ms: u32,
    /// Distance in pixels between the silhouette top and a new particle.
    pub vertical_spawn_offset: f64,
    /// Inject the built-in fade/rise keyframes when the page has none.
    pub inject_default_styles: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            image_id: DEFAULT_IMAGE_ID.to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            particle_asset: DEFAULT_PARTICLE_ASSET.to_string(),
            particle_class: DEFAULT_PARTICLE_CLASS.to_string(),
            particle_size_range: [DEFAULT_PARTICLE_MIN_SIZE, DEFAULT_PARTICLE_MAX_SIZE],
            spawn_interval_range_ms: [DEFAULT_SPAWN_MIN_INTERVAL_MS, DEFAULT_SPAWN_MAX_INTERVAL_MS],
            particle_animation_ms: DEFAULT_PARTICLE_ANIMATION_MS,
            particle_removal_buffer_ms: DEFAULT_PARTICLE_REMOVAL_BUFFER_MS,
            vertical_spawn_offset: DEFAULT_VERTICAL_SPAWN_OFFSET,
            inject_default_styles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A `[min, max]` pair is inverted, negative or not finite.
    InvalidRange { field: &'static str },
    /// The input could not be deserialized.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRange { field } => {
                write!(f, "invalid range for `{}`: expected 0 < min <= max", field)
            }
            ConfigError::Parse(msg) => write!(f, "invalid widget config: {}", msg),
        }
    }
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl WidgetConfig {
    /// Parse a (possibly partial) JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Deserialize from a JS object.  `undefined` / `null` yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, ConfigError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: WidgetConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [min_size, max_size] = self.particle_size_range;
        if !(min_size.is_finite() && max_size.is_finite()) || min_size <= 0.0 || min_size > max_size {
            return Err(ConfigError::InvalidRange { field: "particle_size_range" });
        }
        let [min_ms, max_ms] = self.spawn_interval_range_ms;
        if min_ms == 0 || min_ms > max_ms {
            return Err(ConfigError::InvalidRange { field: "spawn_interval_range_ms" });
        }
        if !self.vertical_spawn_offset.is_finite() {
            return Err(ConfigError::InvalidRange { field: "vertical_spawn_offset" });
        }
        Ok(())
    }

    /// Time a particle stays in the DOM: its animation plus the removal buffer.
    pub fn particle_lifetime_ms(&self) -> u32 {
        self.particle_animation_ms.saturating_add(self.particle_removal_buffer_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = WidgetConfig::default();
        assert_eq!(config.image_id, "draggable-item");
        assert_eq!(config.container_id, "game-container");
        assert_eq!(config.particle_size_range, [36.0, 64.0]);
        assert_eq!(config.spawn_interval_range_ms, [150, 350]);
        assert_eq!(config.particle_lifetime_ms(), 3100);
        assert_eq!(config.vertical_spawn_offset, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = WidgetConfig::from_json(r#"{"particle_asset":"img/steam.webp"}"#).unwrap();
        assert_eq!(config.particle_asset, "img/steam.webp");
        assert_eq!(config.container_id, DEFAULT_CONTAINER_ID);
        assert_eq!(config.particle_animation_ms, DEFAULT_PARTICLE_ANIMATION_MS);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = WidgetConfig::from_json(r#"{"particle_size_range":[64,36]}"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidRange { field: "particle_size_range" });

        let err = WidgetConfig::from_json(r#"{"spawn_interval_range_ms":[400,100]}"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidRange { field: "spawn_interval_range_ms" });
    }

    #[test]
    fn zero_interval_is_rejected() {
        let mut config = WidgetConfig::default();
        config.spawn_interval_range_ms = [0, 10];
        assert!(config.validate().is_err());
    }

    #[test]
    fn huge_durations_saturate_the_lifetime() {
        let config = WidgetConfig::from_json(r#"{"particle_animation_ms":4294967295}"#).unwrap();
        assert_eq!(config.particle_lifetime_ms(), u32::MAX);

        let config =
            WidgetConfig::from_json(r#"{"particle_animation_ms":4294967000,"particle_removal_buffer_ms":4000}"#)
                .unwrap();
        assert_eq!(config.particle_lifetime_ms(), u32::MAX);
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        match WidgetConfig::from_json("{not json") {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
