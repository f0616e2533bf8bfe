//! Srcset construction.
//!
//! Fans the configured breakpoint list out across the configured format list,
//! producing one [`ThumbSpec`] per (format, breakpoint) pair. Bare breakpoints
//! go through the dimension solver; explicit `{width, height}` pairs are
//! authoritative and bypass ratio logic entirely.
//!
//! The builder is a pure transformation of `(source dimensions, options)` —
//! it performs no thumbnailing itself. Malformed breakpoints are programmer
//! errors and fail the whole build; no partial map is ever returned.

use crate::dimensions;
use crate::options::EffectiveOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrcsetError {
    #[error("breakpoint {index}: width missing")]
    MissingWidth { index: usize },
    #[error("breakpoint {index}: height missing")]
    MissingHeight { index: usize },
    #[error("breakpoint {index}: width must be a positive integer")]
    InvalidWidth { index: usize },
}

/// A single breakpoint: a bare target width, or an explicit box.
///
/// Deserializes from either `400` or `{ width = 400, height = 300 }`. The
/// pair fields are optional at the type level so that half-specified pairs
/// survive parsing and can be rejected with a descriptive error at build
/// time instead of an opaque deserialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BreakpointSpec {
    Width(u32),
    Pair {
        width: Option<u32>,
        height: Option<u32>,
    },
}

impl BreakpointSpec {
    pub fn pair(width: u32, height: u32) -> Self {
        BreakpointSpec::Pair {
            width: Some(width),
            height: Some(height),
        }
    }
}

impl From<u32> for BreakpointSpec {
    fn from(width: u32) -> Self {
        BreakpointSpec::Width(width)
    }
}

/// The exact subset of options the external thumbnailing capability
/// understands, plus per-breakpoint geometry.
///
/// This is a whitelist: render-level options (`lazy`, `sizes`, `formats`,
/// `dimensions`, `ratio`) must never leak into a thumbnail request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbSpec {
    pub width: u32,
    pub height: u32,
    pub crop: bool,
    /// Target encoding. `None` for the canonical URL thumbnail, which keeps
    /// the source's own format.
    pub format: Option<String>,
    pub quality: u32,
    pub blur: u32,
    pub grayscale: bool,
    pub auto_orient: bool,
}

impl ThumbSpec {
    /// Build a spec from solved geometry and the whitelisted options.
    pub fn new(
        width: u32,
        height: u32,
        format: Option<String>,
        options: &EffectiveOptions,
    ) -> Self {
        Self {
            width,
            height,
            crop: true,
            format,
            quality: options.quality,
            blur: options.blur,
            grayscale: options.grayscale,
            auto_orient: true,
        }
    }
}

/// One labeled entry of a per-format srcset, e.g. `"400w"` → spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SrcsetEntry {
    pub label: String,
    pub spec: ThumbSpec,
}

/// The ordered srcset for a single format. Entry order matches the
/// configured breakpoint order and is render-significant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatSrcset {
    pub format: String,
    pub entries: Vec<SrcsetEntry>,
}

impl FormatSrcset {
    /// Look up an entry by its width label (`"400w"`).
    pub fn get(&self, label: &str) -> Option<&ThumbSpec> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.spec)
    }
}

/// Per-format srcsets in configured format order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SrcsetMap {
    pub formats: Vec<FormatSrcset>,
}

impl SrcsetMap {
    pub fn get(&self, format: &str) -> Option<&FormatSrcset> {
        self.formats.iter().find(|f| f.format == format)
    }
}

/// Build the full srcset map: every configured format × every breakpoint.
pub fn build(source: (u32, u32), options: &EffectiveOptions) -> Result<SrcsetMap, SrcsetError> {
    let formats = options
        .formats
        .iter()
        .map(|format| build_format(source, options, format))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SrcsetMap { formats })
}

/// Build the srcset for a single format.
///
/// Useful on its own for a universal fallback format (e.g. a `jpg` srcset
/// for the bare `<img>` element).
pub fn build_format(
    source: (u32, u32),
    options: &EffectiveOptions,
    format: &str,
) -> Result<FormatSrcset, SrcsetError> {
    let mut entries = Vec::with_capacity(options.dimensions.len());

    for (index, breakpoint) in options.dimensions.iter().enumerate() {
        let entry = match *breakpoint {
            BreakpointSpec::Pair { width, height } => {
                let width = width
                    .filter(|w| *w > 0)
                    .ok_or(SrcsetError::MissingWidth { index })?;
                let height = height
                    .filter(|h| *h > 0)
                    .ok_or(SrcsetError::MissingHeight { index })?;
                // Explicit pairs are authoritative: no ratio, no bounds fit
                SrcsetEntry {
                    label: format!("{width}w"),
                    spec: ThumbSpec::new(width, height, Some(format.to_string()), options),
                }
            }
            BreakpointSpec::Width(requested) => {
                if requested == 0 {
                    return Err(SrcsetError::InvalidWidth { index });
                }
                let solved = dimensions::solve(source, options.ratio, Some(requested));
                // The label keeps the requested nominal width even when the
                // solved width was capped by the source bounds
                SrcsetEntry {
                    label: format!("{requested}w"),
                    spec: ThumbSpec::new(
                        solved.width,
                        solved.height,
                        Some(format.to_string()),
                        options,
                    ),
                }
            }
        };
        entries.push(entry);
    }

    Ok(FormatSrcset {
        format: format.to_string(),
        entries,
    })
}
