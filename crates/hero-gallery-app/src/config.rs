//! Runtime configuration from compile-time defaults and `HERO_GALLERY_*`
//! environment overrides.

use hero_gallery_media::{CdnConfig, UrlVariantResolver};
use hero_gallery_pages::{Lookahead, Viewport};
use hero_gallery_source::{DEFAULT_GALLERY_ENDPOINT, validate_gallery_endpoint};

use crate::AppError;

/// Overrides the gallery endpoint.
pub const ENV_ENDPOINT: &str = "HERO_GALLERY_ENDPOINT";
/// Overrides the CDN base address.
pub const ENV_CDN_BASE: &str = "HERO_GALLERY_CDN_BASE";
/// Overrides the video search window.
pub const ENV_LOOKAHEAD: &str = "HERO_GALLERY_LOOKAHEAD";
/// Overrides the page viewport, `<width>x<height>`.
pub const ENV_VIEWPORT: &str = "HERO_GALLERY_VIEWPORT";

/// Default viewport width in points.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 390.0;
/// Default viewport height in points.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 844.0;

/// Gallery runtime configuration.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Gallery item endpoint.
    pub endpoint: String,
    /// CDN base address for variant URLs.
    pub cdn: CdnConfig,
    /// Video search window.
    pub lookahead: Lookahead,
    /// Page viewport.
    pub viewport: Viewport,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GALLERY_ENDPOINT.to_string(),
            cdn: CdnConfig::default(),
            lookahead: Lookahead::default(),
            viewport: Viewport {
                width: DEFAULT_VIEWPORT_WIDTH,
                height: DEFAULT_VIEWPORT_HEIGHT,
            },
        }
    }
}

impl GalleryConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`AppError`] when an override is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, applying each non-blank value
    /// over the defaults.
    ///
    /// # Errors
    /// - [`AppError::Source`] for an endpoint that is not an http(s) URL.
    /// - [`AppError::Media`] for an unusable CDN base.
    /// - [`AppError::Config`] for unparseable numbers or viewport strings.
    /// - [`AppError::Pages`] for a zero lookahead or degenerate viewport.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(endpoint) = read(ENV_ENDPOINT) {
            validate_gallery_endpoint(&endpoint)?;
            config.endpoint = endpoint;
        }
        if let Some(base) = read(ENV_CDN_BASE) {
            config.cdn = CdnConfig::new(base)?;
        }
        if let Some(raw) = read(ENV_LOOKAHEAD) {
            let size = raw.parse::<usize>().map_err(|error| {
                AppError::Config(format!("{ENV_LOOKAHEAD}={raw:?} is not a count: {error}"))
            })?;
            config.lookahead = Lookahead::new(size)?;
        }
        if let Some(raw) = read(ENV_VIEWPORT) {
            config.viewport = parse_viewport(&raw)?;
        }

        tracing::debug!(
            endpoint = %config.endpoint,
            cdn = config.cdn.base(),
            lookahead = config.lookahead.get(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Builds the URL resolver for the configured CDN.
    pub fn resolver(&self) -> UrlVariantResolver {
        UrlVariantResolver::new(self.cdn.clone())
    }
}

/// Parses `<width>x<height>`, e.g. `390x844`.
///
/// # Errors
/// Returns [`AppError::Config`] for malformed input and [`AppError::Pages`]
/// for non-positive sides.
pub fn parse_viewport(raw: &str) -> Result<Viewport, AppError> {
    let malformed = || AppError::Config(format!("viewport {raw:?} is not <width>x<height>"));

    let (width, height) = raw
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(malformed)?;
    let width = width.trim().parse::<f32>().map_err(|_| malformed())?;
    let height = height.trim().parse::<f32>().map_err(|_| malformed())?;

    Ok(Viewport::new(width, height)?)
}

#[cfg(test)]
mod tests {
    use hero_gallery_media::DEFAULT_CDN_BASE;
    use hero_gallery_pages::DEFAULT_LOOKAHEAD;

    use super::*;

    #[test]
    fn defaults_match_library_constants() {
        let config = GalleryConfig::default();
        assert_eq!(config.endpoint, DEFAULT_GALLERY_ENDPOINT);
        assert_eq!(config.cdn.base(), DEFAULT_CDN_BASE);
        assert_eq!(config.lookahead.get(), DEFAULT_LOOKAHEAD);
    }

    #[test]
    fn viewport_accepts_either_separator_case() {
        assert_eq!(
            parse_viewport("428X926").map(|viewport| viewport.width).ok(),
            Some(428.0)
        );
        assert!(parse_viewport("428").is_err());
        assert!(parse_viewport("0x926").is_err());
    }
}
