#![warn(missing_docs)]
//! # hero-gallery-media
//!
//! ## Purpose
//! Maps a raw media path to the ordered set of CDN URL variants a tile may
//! attempt, highest quality / intended use first.
//!
//! ## Responsibilities
//! - Hold the CDN base address and the tier path prefixes ([`CdnConfig`]).
//! - Build image variant sets (preview, processed, original).
//! - Build video variant sets (processed, original) plus the poster still
//!   variants (poster preview, poster processed, poster original).
//! - Pick the single URL used to warm caches for an upcoming page.
//!
//! ## Data flow
//! [`GalleryItem`] -> [`UrlVariantResolver::resolve`] -> [`MediaUrls`] seeding
//! one tile fallback controller.
//!
//! ## Error model
//! Resolution is pure string construction and cannot fail. Only
//! [`CdnConfig::new`] validates its base address and returns [`MediaError`].
//! Empty paths are a caller contract violation; items with unusable paths are
//! dropped during normalization before they reach this crate.

use hero_gallery_core::{GalleryItem, MediaKind};
use thiserror::Error;
use url::Url;

/// Default CDN base address.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.hero-gallery.test";

/// Path segment selecting the size-reduced preview tier.
pub const PREVIEW_PREFIX: &str = "/preview/";

/// Path segment selecting the processed mobile tier.
pub const PROCESSED_MOBILE_PREFIX: &str = "/processed/mobile/";

/// Path segment for the raw, unprocessed tier.
pub const ORIGINAL_PREFIX: &str = "/";

/// Still-image suffix appended to a video path to name its poster.
pub const POSTER_SUFFIX: &str = ".webp";

/// Quality tier of one CDN variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityTier {
    /// Low-resolution placeholder.
    Preview,
    /// Processed mobile rendition.
    Processed,
    /// Raw upload.
    Original,
}

/// CDN addressing used to derive every variant URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdnConfig {
    base: String,
}

impl CdnConfig {
    /// Creates a validated CDN configuration.
    ///
    /// Trailing slashes on `base` are dropped so tier prefixes join cleanly.
    ///
    /// # Errors
    /// Returns [`MediaError::InvalidBase`] when `base` does not parse as an
    /// absolute `http`/`https` URL.
    pub fn new(base: impl Into<String>) -> Result<Self, MediaError> {
        let base = base.into();
        let parsed = Url::parse(&base)
            .map_err(|error| MediaError::InvalidBase(format!("{base}: {error}")))?;

        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(MediaError::InvalidBase(format!(
                "{base}: scheme must be http or https"
            )));
        }

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the normalized base address.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Builds the URL of `name` at `tier`.
    pub fn tier_url(&self, tier: QualityTier, name: &str) -> String {
        let prefix = match tier {
            QualityTier::Preview => PREVIEW_PREFIX,
            QualityTier::Processed => PROCESSED_MOBILE_PREFIX,
            QualityTier::Original => ORIGINAL_PREFIX,
        };
        format!("{}{prefix}{name}", self.base)
    }
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_CDN_BASE.to_string(),
        }
    }
}

/// Candidate URLs for an image tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlSet {
    /// Low-resolution placeholder rendered under the main candidate.
    pub preview: String,
    /// First main candidate.
    pub processed: String,
    /// Last main candidate, also shown in the fullscreen carousel.
    pub original: String,
}

/// Candidate URLs for a video tile and its poster still.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoUrlSet {
    /// First playable source.
    pub processed: String,
    /// Last playable source.
    pub original: String,
    /// First poster candidate.
    pub poster_preview: String,
    /// Second poster candidate.
    pub poster_processed: String,
    /// Last poster candidate.
    pub poster_original: String,
}

/// Variant set resolved for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaUrls {
    /// Image variants.
    Image(ImageUrlSet),
    /// Video and poster variants.
    Video(VideoUrlSet),
}

/// Pure resolver from item path to variant URLs.
#[derive(Debug, Clone, Default)]
pub struct UrlVariantResolver {
    cdn: CdnConfig,
}

impl UrlVariantResolver {
    /// Creates a resolver bound to `cdn`.
    pub fn new(cdn: CdnConfig) -> Self {
        Self { cdn }
    }

    /// Returns the CDN configuration.
    pub fn cdn(&self) -> &CdnConfig {
        &self.cdn
    }

    /// Builds the image variants for `path`.
    pub fn image_urls(&self, path: &str) -> ImageUrlSet {
        let name = normalize_path(path);
        ImageUrlSet {
            preview: self.cdn.tier_url(QualityTier::Preview, name),
            processed: self.cdn.tier_url(QualityTier::Processed, name),
            original: self.cdn.tier_url(QualityTier::Original, name),
        }
    }

    /// Builds the playback and poster variants for `path`.
    pub fn video_urls(&self, path: &str) -> VideoUrlSet {
        let name = normalize_path(path);
        let poster = format!("{name}{POSTER_SUFFIX}");
        VideoUrlSet {
            processed: self.cdn.tier_url(QualityTier::Processed, name),
            original: self.cdn.tier_url(QualityTier::Original, name),
            poster_preview: self.cdn.tier_url(QualityTier::Preview, &poster),
            poster_processed: self.cdn.tier_url(QualityTier::Processed, &poster),
            poster_original: self.cdn.tier_url(QualityTier::Original, &poster),
        }
    }

    /// Resolves the variant set matching the item's kind.
    pub fn resolve(&self, item: &GalleryItem) -> MediaUrls {
        match item.kind {
            MediaKind::Image => MediaUrls::Image(self.image_urls(&item.path)),
            MediaKind::Video => MediaUrls::Video(self.video_urls(&item.path)),
        }
    }

    /// URL warmed in caches ahead of display: the processed image, or the
    /// processed poster for a video.
    pub fn preload_url(&self, item: &GalleryItem) -> String {
        match self.resolve(item) {
            MediaUrls::Image(urls) => urls.processed,
            MediaUrls::Video(urls) => urls.poster_processed,
        }
    }
}

/// Strips one leading `/` from a raw path.
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Media URL configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaError {
    /// CDN base is not an absolute http(s) URL.
    #[error("invalid cdn base: {0}")]
    InvalidBase(String),
}
