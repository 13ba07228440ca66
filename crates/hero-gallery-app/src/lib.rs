#![warn(missing_docs)]
//! # hero-gallery-app
//!
//! ## Purpose
//! Glues item source, page builder, URL resolver, tile controllers and view
//! state into one gallery session.
//!
//! ## Responsibilities
//! - Own the fetched item list and the pages built from it.
//! - Track the current page from viewability reports and hide the first-page
//!   nudge once the user moves on.
//! - Request best-effort preloading of the next page's URLs, at most once per
//!   page index.
//! - Gate video mounting to the current page while the carousel is closed.
//! - Open the fullscreen carousel at a tapped item.
//!
//! ## Data flow
//! [`GalleryClient`] -> items -> `PageBuilder` -> pages -> viewability ->
//! current page -> preload requests and mount gates -> tile controllers.
//!
//! ## Ownership and lifetimes
//! The orchestrator owns items, pages and the carousel order. Accessors hand
//! out borrows; tile controllers are created as owned values for the caller
//! to drive.
//!
//! ## Error model
//! Fetch failures are recorded as a user-visible message and returned as
//! [`AppError`]; nothing is retried automatically. Preload failures are
//! logged at debug level and dropped.

pub mod config;

use std::collections::HashSet;
use std::sync::Arc;

use hero_gallery_core::GalleryItem;
use hero_gallery_core::PageLayout;
use hero_gallery_fallback::{ImageTileController, VideoSurface, VideoTileController};
use hero_gallery_media::{MediaError, MediaUrls, UrlVariantResolver};
use hero_gallery_pages::{PageBuildOutcome, PageBuilder, PageError, PageGeometry};
use hero_gallery_source::{GalleryClient, GalleryTransport, SourceError};
use hero_gallery_ui::{
    CarouselState, GalleryScreen, ViewabilityTracker, ViewableEntry, page_indicator_label,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

pub use config::{GalleryConfig, parse_viewport};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("HERO_GALLERY_VERSION");

/// Filter applied when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_DIRECTIVE: &str = "hero_gallery=info";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Installs the global `fmt` subscriber. `RUST_LOG` takes precedence over
/// [`DEFAULT_LOG_DIRECTIVE`]. Returns `false` when a subscriber was already
/// installed.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Fetch lifecycle of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Fetch in flight.
    Loading,
    /// Items were fetched and pages built.
    Ready,
    /// Last fetch failed with this message.
    Failed(String),
}

/// URLs to warm for one upcoming page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadRequest {
    /// Page whose items are warmed.
    pub page_index: usize,
    /// One URL per slot: processed image or processed poster.
    pub urls: Vec<String>,
}

/// Cache-warming sink. Implementations must not block on the result beyond
/// issuing the request.
pub trait Preloader {
    /// Starts warming `url`.
    ///
    /// # Errors
    /// Any error is logged and ignored by the caller.
    fn preload(&self, url: &str) -> Result<(), AppError>;
}

/// [`Preloader`] that issues a GET through a [`GalleryTransport`] and drops
/// the body.
#[derive(Clone)]
pub struct TransportPreloader {
    transport: Arc<dyn GalleryTransport>,
}

impl TransportPreloader {
    /// Wraps `transport`.
    pub fn new(transport: Arc<dyn GalleryTransport>) -> Self {
        Self { transport }
    }
}

impl Preloader for TransportPreloader {
    fn preload(&self, url: &str) -> Result<(), AppError> {
        let parsed =
            Url::parse(url).map_err(|error| AppError::Preload(format!("{url}: {error}")))?;
        let response = self.transport.get(&parsed)?;
        if !response.is_success() {
            return Err(AppError::Preload(format!(
                "{url}: status {}",
                response.status
            )));
        }
        Ok(())
    }
}

/// Tile controller matching an item's kind.
#[derive(Debug, Clone)]
pub enum TileController {
    /// Image tile.
    Image(ImageTileController),
    /// Video tile with its poster.
    Video(VideoTileController),
}

/// One gallery session.
#[derive(Debug, Clone)]
pub struct GalleryOrchestrator {
    builder: PageBuilder,
    resolver: UrlVariantResolver,
    geometry: PageGeometry,
    status: LoadStatus,
    items: Vec<GalleryItem>,
    pages: Vec<PageLayout>,
    ordered: Vec<GalleryItem>,
    tracker: ViewabilityTracker,
    current_page: usize,
    last_preload_page: Option<usize>,
    nudge_hidden: bool,
    carousel: CarouselState,
}

impl GalleryOrchestrator {
    /// Creates an orchestrator in the loading state with no pages.
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            builder: PageBuilder::new(config.lookahead),
            resolver: config.resolver(),
            geometry: PageGeometry::for_viewport(config.viewport),
            status: LoadStatus::Loading,
            items: Vec::new(),
            pages: Vec::new(),
            ordered: Vec::new(),
            tracker: ViewabilityTracker::new(),
            current_page: 0,
            last_preload_page: None,
            nudge_hidden: false,
            carousel: CarouselState::new(0),
        }
    }

    /// Fetches through `client` and rebuilds pages. Returns the page count.
    ///
    /// # Errors
    /// Returns [`AppError::Source`] when the fetch fails. The message is also
    /// kept for [`GalleryOrchestrator::screen`]; previous pages are retained.
    pub fn refresh(&mut self, client: &GalleryClient) -> Result<usize, AppError> {
        self.begin_refresh();
        let result = client.fetch_items();
        self.finish_refresh(result)
    }

    /// Enters the loading state and clears a previous error.
    pub fn begin_refresh(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Completes a refresh started with [`GalleryOrchestrator::begin_refresh`].
    ///
    /// # Errors
    /// Returns [`AppError::Source`] for a failed fetch.
    pub fn finish_refresh(
        &mut self,
        result: Result<Vec<GalleryItem>, SourceError>,
    ) -> Result<usize, AppError> {
        match result {
            Ok(items) => {
                let outcome = self.apply_items(items);
                Ok(outcome.pages.len())
            }
            Err(error) => {
                tracing::warn!(%error, "gallery refresh failed");
                self.status = LoadStatus::Failed(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Replaces the item list, rebuilds pages and resets page, preload and
    /// carousel state.
    pub fn apply_items(&mut self, items: Vec<GalleryItem>) -> PageBuildOutcome {
        let outcome = self.builder.build(&items);
        if !outcome.unplaced.is_empty() {
            tracing::info!(
                unplaced = outcome.unplaced.len(),
                stop = ?outcome.stop,
                "some gallery items could not be placed on a page"
            );
        }

        self.items = items;
        self.pages = outcome.pages.clone();
        self.ordered = unique_ordered_items(&self.pages);
        self.tracker.reset();
        self.current_page = 0;
        self.last_preload_page = None;
        self.carousel = CarouselState::new(self.ordered.len());
        self.status = LoadStatus::Ready;

        tracing::info!(
            items = self.items.len(),
            pages = self.pages.len(),
            "gallery pages rebuilt"
        );
        outcome
    }

    /// Current fetch lifecycle.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Items from the last successful fetch.
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Built pages.
    pub fn pages(&self) -> &[PageLayout] {
        &self.pages
    }

    /// Page currently on screen.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Tile rectangles for the configured viewport.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// URL resolver for the configured CDN.
    pub fn resolver(&self) -> &UrlVariantResolver {
        &self.resolver
    }

    /// Screen to render for the current status.
    pub fn screen(&self) -> GalleryScreen {
        let error = match &self.status {
            LoadStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        };
        GalleryScreen::project(
            self.status == LoadStatus::Loading,
            error,
            self.pages.len(),
        )
    }

    /// `n/total` label for the page indicator.
    pub fn page_indicator(&self) -> Option<String> {
        page_indicator_label(self.pages.len(), self.current_page)
    }

    /// Applies a viewability report from the page list. Returns the preload
    /// request for the page after the current one, if it was not issued yet.
    pub fn on_viewable_pages(&mut self, entries: &[ViewableEntry]) -> Option<PreloadRequest> {
        if let Some(index) = self.tracker.observe(entries) {
            self.current_page = index;
            if index > 0 {
                self.nudge_hidden = true;
            }
        }
        self.preload_request(self.current_page)
    }

    /// Preload request for the page after `page_index`. `None` when that page
    /// does not exist or `page_index` was already handled.
    pub fn preload_request(&mut self, page_index: usize) -> Option<PreloadRequest> {
        if self.last_preload_page == Some(page_index) {
            return None;
        }
        self.last_preload_page = Some(page_index);

        let next = self.pages.get(page_index + 1)?;
        let urls = next
            .items()
            .into_iter()
            .map(|item| self.resolver.preload_url(item))
            .collect();
        Some(PreloadRequest {
            page_index: page_index + 1,
            urls,
        })
    }

    /// Warms the page after `page_index` through `preloader`. Returns how many
    /// URLs were handed off successfully.
    pub fn preload_next(&mut self, page_index: usize, preloader: &dyn Preloader) -> usize {
        let Some(request) = self.preload_request(page_index) else {
            return 0;
        };

        request
            .urls
            .iter()
            .filter(|url| match preloader.preload(url) {
                Ok(()) => true,
                Err(error) => {
                    tracing::debug!(url = url.as_str(), %error, "preload failed");
                    false
                }
            })
            .count()
    }

    /// Returns `true` while the first-page nudge is shown.
    pub fn nudge_visible(&self) -> bool {
        !self.nudge_hidden && self.pages.len() >= 2
    }

    /// Handles a nudge tap: hides it and returns the page to scroll to.
    pub fn nudge(&mut self) -> Option<usize> {
        if self.pages.len() < 2 {
            return None;
        }
        self.nudge_hidden = true;
        Some(1)
    }

    /// Items of all pages in page order, first occurrence per id.
    pub fn ordered_items(&self) -> &[GalleryItem] {
        &self.ordered
    }

    /// Opens the carousel at `id`, or at the first slide when unknown.
    /// Returns the slide index.
    pub fn open_item(&mut self, id: &str) -> usize {
        let index = self
            .ordered
            .iter()
            .position(|item| item.id == id)
            .unwrap_or(0);
        self.carousel.open(index)
    }

    /// Dismisses the carousel.
    pub fn close_modal(&mut self) {
        self.carousel.close();
    }

    /// Carousel state.
    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    /// Mutable carousel state for swipe and arrow events.
    pub fn carousel_mut(&mut self) -> &mut CarouselState {
        &mut self.carousel
    }

    /// Grid video of `page_index` may be instantiated.
    pub fn tile_mounts_video(&self, page_index: usize) -> bool {
        page_index == self.current_page && !self.carousel.is_visible()
    }

    /// Grid video of `page_index` may play.
    pub fn tile_is_playable(&self, page_index: usize) -> bool {
        self.tile_mounts_video(page_index)
    }

    /// Creates the fallback controller for `item` on `surface`. Image slides
    /// in the fullscreen carousel use [`GalleryOrchestrator::slide_image_url`]
    /// instead.
    pub fn tile_controller(&self, item: &GalleryItem, surface: VideoSurface) -> TileController {
        match self.resolver.resolve(item) {
            MediaUrls::Image(urls) => TileController::Image(ImageTileController::new(urls)),
            MediaUrls::Video(urls) => TileController::Video(VideoTileController::new(surface, urls)),
        }
    }

    /// Full-resolution URL shown for an image slide in the carousel.
    pub fn slide_image_url(&self, item: &GalleryItem) -> String {
        self.resolver.image_urls(&item.path).original
    }
}

/// Flattens pages into slot order, keeping the first occurrence of each id.
pub fn unique_ordered_items(pages: &[PageLayout]) -> Vec<GalleryItem> {
    let mut seen = HashSet::new();
    pages
        .iter()
        .flat_map(PageLayout::items)
        .filter(|item| seen.insert(item.id.as_str()))
        .cloned()
        .collect()
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Item source failure.
    #[error("{0}")]
    Source(#[from] SourceError),
    /// Page builder configuration error.
    #[error("page error: {0}")]
    Pages(#[from] PageError),
    /// CDN configuration error.
    #[error("media error: {0}")]
    Media(#[from] MediaError),
    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),
    /// Preload request could not be issued.
    #[error("preload error: {0}")]
    Preload(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for carousel ordering.

    use hero_gallery_core::MediaKind;

    use super::*;

    fn image(id: &str) -> GalleryItem {
        GalleryItem::new(id, MediaKind::Image, format!("{id}.jpg")).expect("valid image")
    }

    #[test]
    fn unique_ordered_items_follows_slot_order() {
        let pages = vec![
            PageLayout::new(image("a"), image("b"), image("c")).expect("page"),
            PageLayout::new(image("d"), image("a"), image("e")).expect("page"),
        ];

        let ids: Vec<String> = unique_ordered_items(&pages)
            .into_iter()
            .map(|item| item.id)
            .collect();

        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn fresh_orchestrator_is_loading() {
        let orchestrator = GalleryOrchestrator::new(&GalleryConfig::default());
        assert_eq!(orchestrator.screen(), GalleryScreen::Loading);
        assert_eq!(orchestrator.page_indicator(), None);
    }
}
