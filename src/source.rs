//! The image-source capability boundary.
//!
//! The engine never touches pixels of the original image itself — the hosting
//! framework supplies dimensions, renders thumbnails, and builds srcset
//! markup. [`ImageSource`] is the exact capability set the engine relies on;
//! the rest of the crate is written against this trait so hosts (and tests)
//! can plug in anything that satisfies it.
//!
//! Two variants commonly exist on the host side: a managed file with
//! alt/focus/object-fit metadata and a stable identifier, and a bare asset
//! with neither. Both satisfy the same trait; the optional capabilities have
//! defaulted methods, and the engine substitutes fixed defaults when they
//! return `None`. Bare assets derive their [`identity`](ImageSource::identity)
//! from file contents via [`content_identity`].

use crate::srcset::{FormatSrcset, ThumbSpec};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("thumbnail request failed: {0}")]
    Thumbnail(String),
    #[error("srcset markup failed: {0}")]
    Markup(String),
}

/// A rendered thumbnail handle returned by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Public URL of the rendered file.
    pub url: String,
    /// Raw encoded bytes, used for placeholder embedding.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. `image/jpeg`.
    pub mime: String,
}

/// Focus point of an image: a named keyword or a percentage pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Focus {
    Keyword(String),
    Percent { x: f64, y: f64 },
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Keyword("center".into())
    }
}

/// Capabilities the engine requires from a source image.
///
/// `width`, `height`, `identity`, `filename`, `request_thumbnail`, and
/// `srcset_markup` are mandatory. `alt`, `focus`, and `object_fit` are
/// optional metadata; the defaults return `None` and the descriptor
/// assembler fills in fixed fallbacks (filename, `center`, `cover`).
pub trait ImageSource {
    /// Intrinsic pixel width. Positive for any real image.
    fn width(&self) -> u32;

    /// Intrinsic pixel height. Positive for any real image.
    fn height(&self) -> u32;

    /// Stable cache key: a persistent identifier for managed files, a
    /// content hash for bare assets.
    fn identity(&self) -> String;

    /// Original filename, used as the alt-text fallback.
    fn filename(&self) -> String;

    /// Render a thumbnail. Potentially slow, potentially failing; the
    /// engine treats it as a blocking call and applies its own fallback
    /// chain where one exists.
    fn request_thumbnail(&self, spec: &ThumbSpec) -> Result<Thumbnail, SourceError>;

    /// Render the srcset attribute string for one format's breakpoint map.
    fn srcset_markup(&self, srcset: &FormatSrcset) -> Result<String, SourceError>;

    fn alt(&self) -> Option<String> {
        None
    }

    fn focus(&self) -> Option<Focus> {
        None
    }

    fn object_fit(&self) -> Option<String> {
        None
    }
}

/// Content-derived identity for bare assets: SHA-256 of the file bytes,
/// as a hex string.
pub fn content_identity(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
