//! Descriptor assembly.
//!
//! [`Engine`] composes the whole pipeline: option resolution → dimension
//! solving → srcset fan-out → placeholder generation → [`Descriptor`]. It
//! holds the three long-lived pieces — the immutable configuration, the
//! placeholder cache, and the optional perceptual-hash strategy — and is
//! `Sync`: one engine serves any number of concurrent `describe` calls, since
//! computations for different images are independent.
//!
//! Error policy: malformed breakpoints and failures of the *main* image
//! (srcset markup, canonical URL thumbnail) propagate as [`DescribeError`] —
//! a broken main image is not something the engine can paper over. The
//! placeholder has its own internal fallback chain and never fails.

use crate::config::EngineConfig;
use crate::descriptor::{Descriptor, SourceEntry};
use crate::dimensions;
use crate::options::{EffectiveOptions, Overrides};
use crate::placeholder::{self, MemoryCache, PerceptualHasher, PlaceholderCache};
use crate::source::{ImageSource, SourceError};
use crate::srcset::{self, SrcsetError, SrcsetMap, ThumbSpec};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescribeError {
    #[error(transparent)]
    Srcset(#[from] SrcsetError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// The assembled descriptor engine.
pub struct Engine {
    config: EngineConfig,
    cache: Arc<dyn PlaceholderCache>,
    hasher: Option<Arc<dyn PerceptualHasher>>,
}

impl Engine {
    /// Build an engine with an in-process placeholder cache and the builtin
    /// perceptual hasher (when the `thumbhash` feature is enabled).
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: Arc::new(MemoryCache::new()),
            hasher: placeholder::default_hasher(),
        }
    }

    /// Replace the placeholder cache, e.g. with a host-persistent store.
    pub fn with_cache(mut self, cache: Arc<dyn PlaceholderCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Inject a perceptual-hash strategy.
    pub fn with_hasher(mut self, hasher: Arc<dyn PerceptualHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Drop the perceptual hasher; placeholders use the raw base64 path.
    pub fn without_hasher(mut self) -> Self {
        self.hasher = None;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve per-call overrides against the configured defaults.
    pub fn options(&self, overrides: &Overrides) -> EffectiveOptions {
        EffectiveOptions::resolve(&self.config.defaults, overrides)
    }

    /// Build the per-format srcset map for a source.
    pub fn srcsets(
        &self,
        source: &dyn ImageSource,
        overrides: &Overrides,
    ) -> Result<SrcsetMap, SrcsetError> {
        let options = self.options(overrides);
        srcset::build((source.width(), source.height()), &options)
    }

    /// Generate (or fetch from cache) the placeholder URI for a source.
    pub fn placeholder(&self, source: &dyn ImageSource, overrides: &Overrides) -> String {
        let options = self.options(overrides);
        placeholder::generate(
            source,
            &options,
            &self.config.placeholder,
            self.cache.as_ref(),
            self.hasher.as_deref(),
        )
    }

    /// Assemble the complete render-ready descriptor for one image.
    pub fn describe(
        &self,
        source: &dyn ImageSource,
        overrides: &Overrides,
    ) -> Result<Descriptor, DescribeError> {
        let options = self.options(overrides);
        let dims = (source.width(), source.height());
        let canonical = dimensions::solve(dims, options.ratio, None);

        let map = srcset::build(dims, &options)?;
        let mut sources = Vec::with_capacity(map.formats.len());
        for format_srcset in &map.formats {
            let markup = source.srcset_markup(format_srcset)?;
            sources.push(SourceEntry {
                mime: format!("image/{}", format_srcset.format),
                srcset: markup,
            });
        }

        // Canonical URL: the whole image at the resolved dimensions, in the
        // source's own format. A failure here propagates — there is no
        // sensible fallback for the primary image.
        let url = source
            .request_thumbnail(&ThumbSpec::new(
                canonical.width,
                canonical.height,
                None,
                &options,
            ))?
            .url;

        let placeholder = placeholder::generate(
            source,
            &options,
            &self.config.placeholder,
            self.cache.as_ref(),
            self.hasher.as_deref(),
        );

        let alt = options
            .alt
            .clone()
            .or_else(|| source.alt())
            .unwrap_or_else(|| source.filename());

        Ok(Descriptor {
            width: canonical.width,
            height: canonical.height,
            url,
            alt,
            filename: source.filename(),
            placeholder,
            sources,
            focus: source.focus().unwrap_or_default(),
            object_fit: source.object_fit().unwrap_or_else(|| "cover".into()),
        })
    }

    /// Describe a collection of sources with shared options. Fails on the
    /// first broken source.
    pub fn describe_all(
        &self,
        sources: &[&dyn ImageSource],
        overrides: &Overrides,
    ) -> Result<Vec<Descriptor>, DescribeError> {
        sources
            .iter()
            .map(|source| self.describe(*source, overrides))
            .collect()
    }
}
