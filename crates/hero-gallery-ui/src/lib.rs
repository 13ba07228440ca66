#![warn(missing_docs)]
//! # hero-gallery-ui
//!
//! ## Purpose
//! Toolkit-independent view state for the gallery surfaces.
//!
//! ## Responsibilities
//! - Reduce scroll-container viewability reports to one current index using
//!   the 60% coverage threshold.
//! - Track the fullscreen carousel: visibility, active slide, arrow targets.
//! - Project gallery load status into the screen to render.
//! - Format the page indicator.
//!
//! ## Data flow
//! Scroll/tap events from the rendering surface -> reducers in this crate ->
//! indices and flags consumed by the orchestrator and tile controllers.
//!
//! ## Error model
//! No recoverable errors. Out-of-range indices are clamped or ignored.

/// Minimum share of a page or slide that must be on screen for it to become
/// current.
pub const VIEWABILITY_THRESHOLD_PERCENT: f32 = 60.0;

/// One entry of a viewability report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewableEntry {
    /// Index of the page or slide.
    pub index: usize,
    /// Share of the entry currently on screen, in percent.
    pub coverage_percent: f32,
}

/// Debounces viewability reports to a single current index.
#[derive(Debug, Clone, Default)]
pub struct ViewabilityTracker {
    current: Option<usize>,
}

impl ViewabilityTracker {
    /// Creates a tracker with no current index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported index.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Forgets the current index.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Applies one report. Returns the new current index when the first
    /// entry crossing the threshold differs from the last one reported.
    /// Intermediate indices skipped by fast scrolling are never reported.
    pub fn observe(&mut self, entries: &[ViewableEntry]) -> Option<usize> {
        let index = entries
            .iter()
            .find(|entry| entry.coverage_percent >= VIEWABILITY_THRESHOLD_PERCENT)?
            .index;

        if self.current == Some(index) {
            return None;
        }
        self.current = Some(index);
        Some(index)
    }
}

/// Formats the `n/total` page indicator. `None` when there are no pages.
pub fn page_indicator_label(total: usize, current: usize) -> Option<String> {
    if total == 0 {
        return None;
    }
    let display = current.saturating_add(1).clamp(1, total);
    Some(format!("{display}/{total}"))
}

/// Index of the slide at horizontal scroll `offset_x`, rounded to the
/// nearest slide and clamped to `len`.
pub fn index_at_offset(offset_x: f32, slide_width: f32, len: usize) -> usize {
    if len == 0 || !(slide_width > 0.0) || !offset_x.is_finite() {
        return 0;
    }
    let index = (offset_x / slide_width).round().max(0.0) as usize;
    index.min(len - 1)
}

/// Fullscreen carousel state over the ordered gallery items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselState {
    visible: bool,
    len: usize,
    current: usize,
}

impl CarouselState {
    /// Creates a hidden carousel over `len` slides.
    pub fn new(len: usize) -> Self {
        Self {
            visible: false,
            len,
            current: 0,
        }
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when there are no slides.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` while the carousel is presented.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Active slide index.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Presents the carousel at `initial`. Returns the index the surface
    /// should jump to without animation.
    pub fn open(&mut self, initial: usize) -> usize {
        self.visible = true;
        self.current = initial.min(self.len.saturating_sub(1));
        tracing::debug!(index = self.current, "carousel opened");
        self.current
    }

    /// Dismisses the carousel.
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Applies a viewability-driven index change.
    pub fn on_viewable(&mut self, index: usize) {
        if index < self.len {
            self.current = index;
        }
    }

    /// Applies the final offset of a swipe.
    pub fn on_momentum_scroll_end(&mut self, offset_x: f32, slide_width: f32) {
        self.current = index_at_offset(offset_x, slide_width, self.len);
    }

    /// Scroll target of the previous-arrow, if any.
    pub fn prev_target(&self) -> Option<usize> {
        self.current.checked_sub(1)
    }

    /// Scroll target of the next-arrow, if any.
    pub fn next_target(&self) -> Option<usize> {
        let next = self.current + 1;
        (next < self.len).then_some(next)
    }

    /// Returns `true` for the active slide.
    pub fn is_slide_active(&self, index: usize) -> bool {
        self.current == index
    }

    /// A slide instantiates its video player only while the carousel is
    /// visible and the slide is active.
    pub fn slide_mounts_video(&self, index: usize) -> bool {
        self.visible && self.is_slide_active(index)
    }
}

/// Top-level screen projected from gallery load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryScreen {
    /// Initial fetch in flight.
    Loading,
    /// Fetch failed; a manual retry is offered.
    Error {
        /// Failure description.
        message: String,
    },
    /// Fetch succeeded but no page could be built.
    Empty,
    /// Pages are ready.
    Pages {
        /// Number of pages.
        count: usize,
    },
}

impl GalleryScreen {
    /// Projects load status into the screen to render. Loading wins over a
    /// stale error, and an error wins over stale pages.
    pub fn project(loading: bool, error: Option<&str>, page_count: usize) -> Self {
        if loading {
            return Self::Loading;
        }
        if let Some(message) = error {
            return Self::Error {
                message: message.to_string(),
            };
        }
        if page_count == 0 {
            return Self::Empty;
        }
        Self::Pages { count: page_count }
    }

    /// Headline text for non-page screens.
    pub fn headline(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading gallery..."),
            Self::Error { .. } => Some("Could not load gallery"),
            Self::Empty => Some("No pages could be built from this gallery."),
            Self::Pages { .. } => None,
        }
    }

    /// Returns `true` when the retry action should be offered.
    pub fn offers_retry(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
