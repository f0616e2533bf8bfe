//! Engine configuration.
//!
//! Handles loading, validating, and merging the process-wide option set. The
//! engine never reads hidden global state: an [`EngineConfig`] is constructed
//! once during composition (builtin defaults, optionally overlaid by a TOML
//! file) and passed by reference into every computation. Rebuilding a fresh
//! config is the test-isolation story — there is nothing to reset.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [defaults]
//! ratio = 0.0               # Aspect ratio applied to all calls (0 = none)
//! quality = 70              # Thumbnail encode quality (0-100)
//! blur = 0                  # Thumbnail blur amount
//! grayscale = false         # Desaturate thumbnails
//! lazy = true               # Emit lazy-load markup
//! formats = ["avif", "webp"]
//! dimensions = [400, 800, 1140]
//! sizes = "100vw"           # CSS sizes attribute value
//!
//! [placeholder]
//! width = 50                # Legacy fixed sampling width
//! blur = 10                 # Legacy placeholder blur
//! quality = 50              # Legacy placeholder quality
//! fallback_quality = 20     # Thumbnail quality on the raw base64 path
//! sample_max_size = 100     # Longer-edge sampling size
//! blur_radius = 1.0         # SVG Gaussian blur stdDeviation (0 disables)
//! ```
//!
//! Breakpoints may also be explicit boxes:
//!
//! ```toml
//! [defaults]
//! dimensions = [{ width = 400, height = 300 }, 800]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. A key that is
//! absent keeps its builtin default; there is no way for a missing key to
//! clobber a default with an empty value. Unknown keys are rejected to catch
//! typos early.

use crate::srcset::BreakpointSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Process-wide engine configuration.
///
/// Immutable once constructed; safe to share by reference across any number
/// of concurrent descriptor computations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Default processing options, overridable per call.
    pub defaults: DefaultsConfig,
    /// Placeholder generation tuning.
    pub placeholder: PlaceholderConfig,
}

impl EngineConfig {
    /// Parse from a TOML string and validate.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.quality > 100 {
            return Err(ConfigError::Validation(
                "defaults.quality must be 0-100".into(),
            ));
        }
        if self.defaults.formats.is_empty() {
            return Err(ConfigError::Validation(
                "defaults.formats must not be empty".into(),
            ));
        }
        if self.defaults.dimensions.is_empty() {
            return Err(ConfigError::Validation(
                "defaults.dimensions must not be empty".into(),
            ));
        }
        if self.placeholder.quality > 100 || self.placeholder.fallback_quality > 100 {
            return Err(ConfigError::Validation(
                "placeholder quality values must be 0-100".into(),
            ));
        }
        if self.placeholder.sample_max_size == 0 {
            return Err(ConfigError::Validation(
                "placeholder.sample_max_size must be at least 1".into(),
            ));
        }
        if !(self.placeholder.blur_radius >= 0.0 && self.placeholder.blur_radius.is_finite()) {
            return Err(ConfigError::Validation(
                "placeholder.blur_radius must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Default processing options applied to every call unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Default aspect ratio. `0` means none: images keep their natural
    /// proportions.
    pub ratio: f64,
    /// Thumbnail encode quality (0 = worst, 100 = best).
    pub quality: u32,
    /// Thumbnail blur amount (not the placeholder blur).
    pub blur: u32,
    /// Desaturate thumbnails.
    pub grayscale: bool,
    /// Emit lazy-load markup.
    pub lazy: bool,
    /// Encodings generated for the main srcset, in render order.
    pub formats: Vec<String>,
    /// Breakpoints: bare widths or explicit `{width, height}` boxes.
    pub dimensions: Vec<BreakpointSpec>,
    /// CSS `sizes` attribute value.
    pub sizes: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ratio: 0.0,
            quality: 70,
            blur: 0,
            grayscale: false,
            lazy: true,
            formats: vec!["avif".into(), "webp".into()],
            dimensions: vec![400.into(), 800.into(), 1140.into()],
            sizes: "100vw".into(),
        }
    }
}

/// Placeholder generation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderConfig {
    /// Fixed sampling width. Legacy: superseded by `sample_max_size`, kept
    /// so existing config files keep parsing.
    pub width: u32,
    /// Placeholder blur. Legacy: superseded by `blur_radius`.
    pub blur: u32,
    /// Placeholder thumbnail quality. Legacy: the hash path uses a fixed
    /// moderate quality, the fallback path uses `fallback_quality`.
    pub quality: u32,
    /// Thumbnail quality on the raw base64 fallback path.
    pub fallback_quality: u32,
    /// Longer-edge size of the placeholder sampling box.
    pub sample_max_size: u32,
    /// `stdDeviation` of the SVG Gaussian blur wrapper. `0` disables the
    /// wrapper and embeds the bitmap URI directly.
    pub blur_radius: f32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            width: 50,
            blur: 10,
            quality: 50,
            fallback_quality: 20,
            sample_max_size: 100,
            blur_radius: 1.0,
        }
    }
}
