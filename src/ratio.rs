//! Aspect-ratio normalization.
//!
//! Callers express a ratio as a bare number (`1.5`), a `"W/H"` or `"W:H"`
//! string (`"16/9"`, `"4:3"`), or a plain numeric string (`"1.777"`). All of
//! these normalize to a strictly positive `f64`, or to "no ratio" for any
//! falsy, negative, or malformed input. Normalization never fails — a bad
//! ratio means "use the image's natural proportions", not an error.

use serde::{Deserialize, Serialize};

/// A ratio as supplied by configuration or a per-call override.
///
/// Deserializes from either a TOML/JSON number or a string, so config files
/// can write `ratio = 1.5` and call sites can pass `"16/9"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioInput {
    Number(f64),
    Text(String),
}

impl RatioInput {
    /// Normalize to a strictly positive ratio, or `None`.
    pub fn normalize(&self) -> Option<f64> {
        match self {
            RatioInput::Number(value) => normalize(*value),
            RatioInput::Text(text) => parse(text),
        }
    }
}

impl From<f64> for RatioInput {
    fn from(value: f64) -> Self {
        RatioInput::Number(value)
    }
}

impl From<&str> for RatioInput {
    fn from(text: &str) -> Self {
        RatioInput::Text(text.to_string())
    }
}

/// Keep a numeric ratio only if it is finite and strictly positive.
///
/// Idempotent: feeding an already-normalized ratio back in returns it
/// unchanged.
pub fn normalize(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parse a textual ratio.
///
/// - `"W/H"`: split on the first `/`; both parts must be positive numbers.
/// - `"W:H"`: same rule with `:`, checked only when no `/` is present.
/// - Anything else is parsed as a single number.
///
/// More than two parts, non-numeric parts, or non-positive values all yield
/// `None`.
pub fn parse(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.contains('/') {
        parse_pair(text, '/')
    } else if text.contains(':') {
        parse_pair(text, ':')
    } else {
        text.parse::<f64>().ok().and_then(normalize)
    }
}

fn parse_pair(text: &str, separator: char) -> Option<f64> {
    let (numerator, denominator) = text.split_once(separator)?;
    if denominator.contains(separator) {
        // "16/9/2" and friends are malformed, not a chained division
        return None;
    }
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if numerator > 0.0 && denominator > 0.0 {
        normalize(numerator / denominator)
    } else {
        None
    }
}
