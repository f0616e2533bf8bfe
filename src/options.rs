//! Option resolution.
//!
//! Three layers produce the effective option set for one call:
//!
//! 1. Builtin defaults ([`DefaultsConfig::default`]).
//! 2. Process-wide configured values — applied per key at config parse time,
//!    so an absent key can never clobber a builtin default.
//! 3. Per-call [`Overrides`] — merged last, winning over both.
//!
//! The merge is a flat key-wise override. `formats` and `dimensions` are
//! replaced wholesale, never concatenated. The resolved [`EffectiveOptions`]
//! is immutable and safe to share across concurrent descriptor computations.

use crate::config::DefaultsConfig;
use crate::ratio::{self, RatioInput};
use crate::srcset::BreakpointSpec;
use serde::{Deserialize, Serialize};

/// Per-call option overrides. Every field is optional; unset fields fall
/// through to the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overrides {
    pub ratio: Option<RatioInput>,
    pub quality: Option<u32>,
    pub blur: Option<u32>,
    pub grayscale: Option<bool>,
    pub lazy: Option<bool>,
    pub formats: Option<Vec<String>>,
    pub dimensions: Option<Vec<BreakpointSpec>>,
    pub sizes: Option<String>,
    /// Alt text override; wins over the source's own alt text.
    pub alt: Option<String>,
}

/// The resolved, immutable option set for one computation.
///
/// Invariants held after [`resolve`](EffectiveOptions::resolve): `formats`
/// and `dimensions` are never empty, `quality` is within 0–100, and `ratio`
/// is either strictly positive or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveOptions {
    /// Normalized aspect ratio, or `None` for natural proportions.
    pub ratio: Option<f64>,
    pub quality: u32,
    pub blur: u32,
    pub grayscale: bool,
    pub lazy: bool,
    pub formats: Vec<String>,
    pub dimensions: Vec<BreakpointSpec>,
    pub sizes: String,
    pub alt: Option<String>,
}

impl EffectiveOptions {
    /// Merge per-call overrides onto the configured defaults.
    pub fn resolve(defaults: &DefaultsConfig, overrides: &Overrides) -> Self {
        let ratio = match &overrides.ratio {
            Some(input) => input.normalize(),
            None => ratio::normalize(defaults.ratio),
        };

        let formats = overrides
            .formats
            .clone()
            .filter(|formats| !formats.is_empty())
            .unwrap_or_else(|| non_empty_formats(defaults));
        let dimensions = overrides
            .dimensions
            .clone()
            .filter(|dimensions| !dimensions.is_empty())
            .unwrap_or_else(|| non_empty_dimensions(defaults));

        Self {
            ratio,
            quality: overrides.quality.unwrap_or(defaults.quality).min(100),
            blur: overrides.blur.unwrap_or(defaults.blur),
            grayscale: overrides.grayscale.unwrap_or(defaults.grayscale),
            lazy: overrides.lazy.unwrap_or(defaults.lazy),
            formats,
            dimensions,
            sizes: overrides
                .sizes
                .clone()
                .unwrap_or_else(|| defaults.sizes.clone()),
            alt: overrides.alt.clone(),
        }
    }
}

// Validated configs never hit these fallbacks; they guard programmatically
// constructed DefaultsConfig values so the never-empty invariant holds
// unconditionally.

fn non_empty_formats(defaults: &DefaultsConfig) -> Vec<String> {
    if defaults.formats.is_empty() {
        DefaultsConfig::default().formats
    } else {
        defaults.formats.clone()
    }
}

fn non_empty_dimensions(defaults: &DefaultsConfig) -> Vec<BreakpointSpec> {
    if defaults.dimensions.is_empty() {
        DefaultsConfig::default().dimensions
    } else {
        defaults.dimensions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overrides_mirrors_defaults() {
        let defaults = DefaultsConfig::default();
        let opts = EffectiveOptions::resolve(&defaults, &Overrides::default());

        assert_eq!(opts.ratio, None); // builtin ratio 0 means none
        assert_eq!(opts.quality, 70);
        assert_eq!(opts.blur, 0);
        assert!(!opts.grayscale);
        assert!(opts.lazy);
        assert_eq!(opts.formats, defaults.formats);
        assert_eq!(opts.dimensions, defaults.dimensions);
        assert_eq!(opts.sizes, "100vw");
        assert_eq!(opts.alt, None);
    }

    #[test]
    fn overrides_win_over_defaults() {
        let opts = EffectiveOptions::resolve(
            &DefaultsConfig::default(),
            &Overrides {
                ratio: Some("16/9".into()),
                quality: Some(90),
                lazy: Some(false),
                sizes: Some("(max-width: 600px) 100vw, 50vw".into()),
                alt: Some("A dune at dawn".into()),
                ..Overrides::default()
            },
        );

        assert!((opts.ratio.unwrap() - 16.0 / 9.0).abs() < 1e-9);
        assert_eq!(opts.quality, 90);
        assert!(!opts.lazy);
        assert_eq!(opts.sizes, "(max-width: 600px) 100vw, 50vw");
        assert_eq!(opts.alt.as_deref(), Some("A dune at dawn"));
    }

    #[test]
    fn configured_defaults_beat_builtins() {
        let defaults = DefaultsConfig {
            ratio: 1.5,
            quality: 60,
            ..DefaultsConfig::default()
        };
        let opts = EffectiveOptions::resolve(&defaults, &Overrides::default());
        assert_eq!(opts.ratio, Some(1.5));
        assert_eq!(opts.quality, 60);
    }

    #[test]
    fn arrays_replaced_wholesale() {
        let opts = EffectiveOptions::resolve(
            &DefaultsConfig::default(),
            &Overrides {
                formats: Some(vec!["jpg".into()]),
                dimensions: Some(vec![640.into()]),
                ..Overrides::default()
            },
        );
        assert_eq!(opts.formats, ["jpg"]);
        assert_eq!(opts.dimensions, [640.into()]);
    }

    #[test]
    fn empty_override_arrays_fall_back() {
        // Never-empty invariant: an explicitly empty override cannot strip
        // the defaults
        let opts = EffectiveOptions::resolve(
            &DefaultsConfig::default(),
            &Overrides {
                formats: Some(vec![]),
                dimensions: Some(vec![]),
                ..Overrides::default()
            },
        );
        assert_eq!(opts.formats, ["avif", "webp"]);
        assert_eq!(opts.dimensions.len(), 3);
    }

    #[test]
    fn empty_defaults_fall_back_to_builtins() {
        let defaults = DefaultsConfig {
            formats: vec![],
            dimensions: vec![],
            ..DefaultsConfig::default()
        };
        let opts = EffectiveOptions::resolve(&defaults, &Overrides::default());
        assert!(!opts.formats.is_empty());
        assert!(!opts.dimensions.is_empty());
    }

    #[test]
    fn invalid_ratio_override_means_no_ratio() {
        for bad in [RatioInput::Number(0.0), RatioInput::Number(-1.0), "abc".into()] {
            let opts = EffectiveOptions::resolve(
                &DefaultsConfig {
                    ratio: 1.5,
                    ..DefaultsConfig::default()
                },
                &Overrides {
                    ratio: Some(bad),
                    ..Overrides::default()
                },
            );
            // An explicit override, even an invalid one, replaces the
            // configured ratio rather than falling through to it
            assert_eq!(opts.ratio, None);
        }
    }

    #[test]
    fn quality_clamped_to_100() {
        let opts = EffectiveOptions::resolve(
            &DefaultsConfig::default(),
            &Overrides {
                quality: Some(250),
                ..Overrides::default()
            },
        );
        assert_eq!(opts.quality, 100);
    }

    #[test]
    fn overrides_deserialize_sparse_json() {
        let overrides: Overrides =
            serde_json::from_str(r#"{"ratio": "4:3", "dimensions": [320, {"width": 640, "height": 480}]}"#)
                .unwrap();
        assert_eq!(overrides.ratio, Some("4:3".into()));
        assert_eq!(
            overrides.dimensions,
            Some(vec![320.into(), BreakpointSpec::pair(640, 480)])
        );
        assert_eq!(overrides.quality, None);
    }
}
