//! # respimg
//!
//! A responsive `<picture>` descriptor engine. Given one source image's
//! intrinsic dimensions and a set of constraints, respimg computes
//! everything a renderer needs: per-format, per-breakpoint target dimensions
//! (the srcset), a single canonical display size, and an inline placeholder
//! image encoded as a `data:` URI.
//!
//! The engine computes *descriptors*, not pixels. Resizing, cropping, and
//! encoding stay with the hosting framework behind the [`ImageSource`]
//! capability trait — respimg decides what to ask for and assembles the
//! results.
//!
//! # Architecture: One Pipeline
//!
//! ```text
//! Overrides ─┐
//!            ├─ options ──► dimensions ──► srcset ────┐
//! Config ────┘                 │                      ├──► Descriptor
//!                              └────► placeholder ────┘
//! ```
//!
//! Each stage is a pure function of its inputs; the only long-lived state is
//! the immutable [`EngineConfig`] and the placeholder cache, both owned by
//! [`Engine`]. That makes every stage unit-testable without I/O and the
//! whole engine safe to share across threads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Process-wide defaults: TOML loading, validation, builtin values |
//! | [`ratio`] | Ratio normalization: numbers, `"W/H"`, `"W:H"`, graceful rejection |
//! | [`dimensions`] | Pure dimension math: ratio fitting, bounds capping, sample boxes |
//! | [`options`] | Three-layer option resolution (builtin → configured → per-call) |
//! | [`source`] | The [`ImageSource`] capability boundary and content identity |
//! | [`srcset`] | Breakpoint × format fan-out into thumbnail specifications |
//! | [`datauri`] | base64 and percent-encoded SVG `data:` URIs |
//! | [`placeholder`] | Cached placeholder generation with a three-step fallback chain |
//! | [`descriptor`] | The render-ready output record and its JSON surface |
//! | [`engine`] | Composition root: [`Engine::describe`](engine::Engine::describe) |
//! | [`markup`] | Optional maud `<picture>` renderer over a descriptor |
//!
//! # Design Decisions
//!
//! ## Never Upscale on the Ratio Path
//!
//! When a ratio is in play, the solved rectangle is the largest one with that
//! exact ratio that fits inside the source — breakpoints past the source
//! bounds all collapse to it (keeping their nominal labels, so the markup
//! stays stable). The ratio-less fit-by-width branch deliberately does *not*
//! clamp: those are "fit" semantics, and hosts that never want upscaled
//! targets can cap their breakpoint lists instead.
//!
//! ## Placeholders Degrade, Srcsets Don't
//!
//! A malformed breakpoint is a programmer error and fails the whole
//! computation; no partial srcset is ever returned. A failing thumbnail
//! request during placeholder generation is an operational hiccup and walks
//! a fallback chain instead — perceptual hash, then raw base64, then a flat
//! gray SVG rectangle. The placeholder is never empty and never an error.
//!
//! ## ThumbHash Behind a Feature
//!
//! The perceptual-hash placeholder (a ~25-byte encoding that decodes to a
//! blurry preview) comes from the `thumbhash` crate behind the default-on
//! `thumbhash` feature. The strategy is injected as a trait object at
//! composition, so disabling the feature — or swapping in another hasher —
//! changes nothing but the [`Engine`] constructor.
//!
//! ## Maud Over Template Engines
//!
//! The SVG blur wrapper and the optional `<picture>` renderer use
//! [Maud](https://maud.lambda.xyz/): compile-time checked markup, auto-escaped
//! interpolation, zero runtime template files.
//!
//! # Example
//!
//! ```no_run
//! use respimg::{Engine, EngineConfig, Overrides};
//! # fn demo(photo: &dyn respimg::ImageSource) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Engine::new(EngineConfig::default());
//!
//! let descriptor = engine.describe(photo, &Overrides {
//!     ratio: Some("16/9".into()),
//!     ..Overrides::default()
//! })?;
//!
//! let html = respimg::markup::picture(&descriptor, &engine.options(&Overrides::default()));
//! # let _ = html;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod datauri;
pub mod descriptor;
pub mod dimensions;
pub mod engine;
pub mod markup;
pub mod options;
pub mod placeholder;
pub mod ratio;
pub mod source;
pub mod srcset;

pub use config::{ConfigError, DefaultsConfig, EngineConfig, PlaceholderConfig};
pub use descriptor::{Descriptor, SourceEntry};
pub use engine::{DescribeError, Engine};
pub use options::{EffectiveOptions, Overrides};
pub use placeholder::{MemoryCache, PerceptualHasher, PlaceholderCache};
#[cfg(feature = "thumbhash")]
pub use placeholder::ThumbHashHasher;
pub use ratio::RatioInput;
pub use source::{Focus, ImageSource, SourceError, Thumbnail, content_identity};
pub use srcset::{BreakpointSpec, FormatSrcset, SrcsetEntry, SrcsetError, SrcsetMap, ThumbSpec};
