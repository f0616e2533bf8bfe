//! Placeholder generation.
//!
//! Produces a tiny representative preview of an image as a `data:` URI that
//! can be inlined into markup and shown before the real image loads. The
//! pipeline per call:
//!
//! 1. Cache lookup by source identity — a hit returns immediately, with no
//!    thumbnail request.
//! 2. Resolve the effective ratio (option, else natural, else guarded) and
//!    compute a small sampling box.
//! 3. Try the perceptual-hash path: thumbnail at the box, decode pixels,
//!    hash, decode the hash back to a blurry bitmap, embed as PNG.
//! 4. On any failure (or no hasher configured): raw low-quality thumbnail,
//!    base64-embedded as-is.
//! 5. If even that fails: a fixed neutral-gray SVG rectangle.
//!
//! A non-zero configured blur radius wraps the bitmap in an SVG Gaussian-blur
//! filter ([`datauri::blurred_svg_uri`]). The result is written to the cache
//! before returning.
//!
//! This function **never fails and never returns an empty string**. Thumbnail
//! failures here are operator-invisible by design: a degraded placeholder is
//! always better than no page render. (Srcset and canonical-URL thumbnail
//! failures, by contrast, propagate — see [`engine`](crate::engine).)
//!
//! Concurrency: two threads generating the placeholder for the same identity
//! may race and both compute it. That is harmless — the value is derived and
//! reproducible, so last write wins.

use crate::config::PlaceholderConfig;
use crate::datauri;
use crate::dimensions::{self, Resolved};
use crate::options::EffectiveOptions;
use crate::source::{ImageSource, SourceError};
use crate::srcset::ThumbSpec;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;
use thiserror::Error;

/// Thumbnail quality for the perceptual-hash sampling request. The hash
/// discards most detail anyway; moderate quality keeps color fidelity
/// without a large intermediate.
const HASH_THUMB_QUALITY: u32 = 70;

/// Perceptual hashers can only make sense of small bitmaps; sampling
/// thumbnails are downscaled to this bound before hashing.
const HASH_MAX_EDGE: u32 = 100;

/// Key-value store for finished placeholder URIs, addressed by source
/// identity.
///
/// The engine's contract is read-through/write-through: one meaningful entry
/// per identity, never invalidated by the engine itself (invalidation, if
/// any, is the store's concern). Implementations must tolerate concurrent
/// access; duplicate computation for the same identity is acceptable.
pub trait PlaceholderCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
}

/// In-process cache backed by a mutexed map. Suitable for a single build or
/// server process; hosts with persistent caches implement
/// [`PlaceholderCache`] over their own store instead.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlaceholderCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn put(&self, key: &str, value: String) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }
}

#[derive(Error, Debug)]
#[error("perceptual hash failed: {0}")]
pub struct HashError(pub String);

/// A compact-perceptual-hash strategy.
///
/// Selected once at engine composition, not probed per call. The builtin
/// implementation is [`ThumbHashHasher`] (cargo feature `thumbhash`); hosts
/// can inject their own, and an engine without any hasher simply uses the
/// raw base64 placeholder path.
pub trait PerceptualHasher: Send + Sync {
    /// Encode a small RGBA bitmap into a compact hash.
    fn encode(&self, width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, HashError>;

    /// Decode a hash back into `(width, height, rgba)`.
    fn decode(&self, hash: &[u8]) -> Result<(u32, u32, Vec<u8>), HashError>;
}

/// ThumbHash-based strategy: ~25 bytes per image, decodes to a blurry
/// low-resolution approximation with usable alpha.
#[cfg(feature = "thumbhash")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbHashHasher;

#[cfg(feature = "thumbhash")]
impl PerceptualHasher for ThumbHashHasher {
    fn encode(&self, width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, HashError> {
        if width == 0 || height == 0 || width > HASH_MAX_EDGE || height > HASH_MAX_EDGE {
            return Err(HashError(format!(
                "bitmap {width}x{height} outside 1..={HASH_MAX_EDGE}"
            )));
        }
        if rgba.len() != (width * height * 4) as usize {
            return Err(HashError("rgba length does not match dimensions".into()));
        }
        Ok(thumbhash::rgba_to_thumb_hash(
            width as usize,
            height as usize,
            rgba,
        ))
    }

    fn decode(&self, hash: &[u8]) -> Result<(u32, u32, Vec<u8>), HashError> {
        let (width, height, rgba) = thumbhash::thumb_hash_to_rgba(hash)
            .map_err(|_| HashError("hash could not be decoded".into()))?;
        Ok((width as u32, height as u32, rgba))
    }
}

/// The hasher the engine uses when none is injected explicitly.
pub fn default_hasher() -> Option<std::sync::Arc<dyn PerceptualHasher>> {
    #[cfg(feature = "thumbhash")]
    {
        Some(std::sync::Arc::new(ThumbHashHasher))
    }
    #[cfg(not(feature = "thumbhash"))]
    {
        None
    }
}

/// Errors internal to the generation chain. Never escape this module: each
/// failure moves the chain to the next fallback.
#[derive(Error, Debug)]
enum PlaceholderError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Generate (or fetch from cache) the placeholder URI for a source.
pub(crate) fn generate(
    source: &dyn ImageSource,
    options: &EffectiveOptions,
    config: &PlaceholderConfig,
    cache: &dyn PlaceholderCache,
    hasher: Option<&dyn PerceptualHasher>,
) -> String {
    let key = source.identity();
    if let Some(hit) = cache.get(&key) {
        return hit;
    }

    let dims = (source.width(), source.height());
    let ratio = options
        .ratio
        .unwrap_or_else(|| dimensions::natural_ratio(dims));
    let sample = dimensions::sample_box(dims, ratio, config.sample_max_size);

    let uri = hasher
        .and_then(|hasher| hash_path(source, options, sample, config.blur_radius, hasher).ok())
        .or_else(|| fallback_path(source, options, sample, config).ok())
        .unwrap_or_else(|| datauri::gray_rect_uri(sample.width, sample.height));

    cache.put(&key, uri.clone());
    uri
}

/// Perceptual-hash path: sample → hash → blurry bitmap → PNG data URI.
fn hash_path(
    source: &dyn ImageSource,
    options: &EffectiveOptions,
    sample: Resolved,
    blur_radius: f32,
    hasher: &dyn PerceptualHasher,
) -> Result<String, PlaceholderError> {
    let thumb = source.request_thumbnail(&sample_spec(sample, HASH_THUMB_QUALITY, options))?;

    let mut decoded = image::load_from_memory(&thumb.bytes)?;
    if decoded.width() > HASH_MAX_EDGE || decoded.height() > HASH_MAX_EDGE {
        decoded = decoded.thumbnail(HASH_MAX_EDGE, HASH_MAX_EDGE);
    }
    let rgba = decoded.to_rgba8();

    let hash = hasher.encode(rgba.width(), rgba.height(), rgba.as_raw())?;
    let (width, height, pixels) = hasher.decode(&hash)?;
    let transparent = pixels.chunks_exact(4).any(|px| px[3] < 255);

    let bitmap = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| HashError("decoded bitmap size mismatch".into()))?;
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(bitmap)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    let bitmap_uri = datauri::base64_data_uri("image/png", &png);

    Ok(wrap(&bitmap_uri, sample, blur_radius, !transparent))
}

/// Raw path: low-quality thumbnail, embedded byte-for-byte.
fn fallback_path(
    source: &dyn ImageSource,
    options: &EffectiveOptions,
    sample: Resolved,
    config: &PlaceholderConfig,
) -> Result<String, PlaceholderError> {
    let thumb = source.request_thumbnail(&sample_spec(sample, config.fallback_quality, options))?;
    let mime = if thumb.mime.is_empty() {
        "image/jpeg"
    } else {
        thumb.mime.as_str()
    };
    let uri = datauri::base64_data_uri(mime, &thumb.bytes);
    // No pixel access on this path, so no transparency probe; raw thumbnails
    // are treated as opaque
    Ok(wrap(&uri, sample, config.blur_radius, true))
}

fn sample_spec(sample: Resolved, quality: u32, options: &EffectiveOptions) -> ThumbSpec {
    ThumbSpec {
        width: sample.width,
        height: sample.height,
        crop: true,
        format: None,
        quality,
        blur: 0,
        grayscale: options.grayscale,
        auto_orient: true,
    }
}

fn wrap(bitmap_uri: &str, sample: Resolved, blur_radius: f32, opaque: bool) -> String {
    if blur_radius > 0.0 {
        datauri::blurred_svg_uri(bitmap_uri, sample.width, sample.height, blur_radius, opaque)
    } else {
        bitmap_uri.to_string()
    }
}
