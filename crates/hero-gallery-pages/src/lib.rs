#![warn(missing_docs)]
//! # hero-gallery-pages
//!
//! ## Purpose
//! Packs an ordered, mixed image/video item list into three-slot mosaic pages.
//!
//! ## Responsibilities
//! - Pick at most one video per page: the video inside the lookahead window
//!   whose aspect ratio is closest to 9:16.
//! - Fill the remaining slots with images in source order.
//! - Stop cleanly, without partial pages, when a page cannot be completed.
//! - Compute tile rectangles for a page at a given viewport ([`geometry`]).
//!
//! ## Data flow
//! Normalized `GalleryItem` list -> [`PageBuilder::build`] ->
//! [`PageBuildOutcome`] (pages plus the unplaced remainder) -> orchestrator.
//!
//! ## Ownership and lifetimes
//! The builder clones the input into a private working list and never mutates
//! the caller's slice. Pages own the items they hold.
//!
//! ## Error model
//! Building cannot fail. Running out of images mid-page is a normal stop
//! ([`StopReason::ImageShortage`]). Only configuration values
//! ([`Lookahead::new`], [`Viewport::new`]) are validated with [`PageError`].
//!
//! ## Complexity
//! `O(n * lookahead)` for the video search. Image picks scan the unbounded
//! remainder but are near the front in practice, and the working list is a
//! `VecDeque` so removing near the front stays cheap.
//!
//! ## Example
//! ```rust
//! use hero_gallery_core::{GalleryItem, MediaKind};
//! use hero_gallery_pages::build_pages;
//!
//! let items: Vec<GalleryItem> = (0..6)
//!     .map(|i| GalleryItem::new(format!("i{i}"), MediaKind::Image, format!("{i}.jpg")).unwrap())
//!     .collect();
//! assert_eq!(build_pages(&items).len(), 2);
//! ```

pub mod geometry;

use std::collections::VecDeque;

use hero_gallery_core::{GalleryItem, PAGE_SLOT_COUNT, PageLayout, TARGET_VIDEO_ASPECT_RATIO};
use thiserror::Error;

pub use geometry::{PageGeometry, TileRect, Viewport};

/// Default size of the video search window.
pub const DEFAULT_LOOKAHEAD: usize = 12;

/// Size of the window over the front of the remaining list that is searched
/// for a video. Bounds how far ahead a video may be pulled forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookahead(usize);

impl Lookahead {
    /// Creates a validated lookahead.
    ///
    /// # Errors
    /// Returns [`PageError::InvalidLookahead`] when `size == 0`.
    pub fn new(size: usize) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::InvalidLookahead);
        }
        Ok(Self(size))
    }

    /// Returns the window size.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for Lookahead {
    fn default() -> Self {
        Self(DEFAULT_LOOKAHEAD)
    }
}

/// Why page production stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Fewer than three items were left.
    TooFewItems,
    /// Not enough images were left to complete the next page.
    ImageShortage,
}

/// Result of one build run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageBuildOutcome {
    /// Completed pages in production order.
    pub pages: Vec<PageLayout>,
    /// Items never placed on a page. They are not displayed.
    pub unplaced: Vec<GalleryItem>,
    /// Terminal condition of the run.
    pub stop: StopReason,
}

/// Greedy page packer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageBuilder {
    lookahead: Lookahead,
}

impl PageBuilder {
    /// Creates a builder with the given video search window.
    pub fn new(lookahead: Lookahead) -> Self {
        Self { lookahead }
    }

    /// Returns the configured lookahead.
    pub fn lookahead(&self) -> Lookahead {
        self.lookahead
    }

    /// Builds pages until fewer than three items remain or a page cannot be
    /// completed.
    pub fn build(&self, items: &[GalleryItem]) -> PageBuildOutcome {
        let mut remaining: VecDeque<GalleryItem> = items.iter().cloned().collect();
        let mut pages = Vec::with_capacity(items.len() / PAGE_SLOT_COUNT);

        let stop = loop {
            if remaining.len() < PAGE_SLOT_COUNT {
                break StopReason::TooFewItems;
            }
            match self.build_page(&mut remaining) {
                Some(page) => pages.push(page),
                None => break StopReason::ImageShortage,
            }
        };

        tracing::debug!(
            pages = pages.len(),
            unplaced = remaining.len(),
            stop = ?stop,
            "page build finished"
        );

        PageBuildOutcome {
            pages,
            unplaced: remaining.into(),
            stop,
        }
    }

    fn build_page(&self, remaining: &mut VecDeque<GalleryItem>) -> Option<PageLayout> {
        let Some(video_index) = closest_video_index(remaining, self.lookahead) else {
            return take_image_page(remaining);
        };

        let video = remaining.remove(video_index)?;
        let right_top = take_first_image(remaining);
        let right_bottom = take_first_image(remaining);

        let (right_top, right_bottom) = match (right_top, right_bottom) {
            (Some(right_top), Some(right_bottom)) => {
                return Some(PageLayout {
                    left: video,
                    right_top,
                    right_bottom,
                });
            }
            pair => pair,
        };

        // Fewer than two images: move the video to the right column and put
        // an image on the left.
        let right = right_top
            .or(right_bottom)
            .or_else(|| take_first_image(remaining));
        let left = take_first_image(remaining);

        match (left, right) {
            (Some(left), Some(right)) => Some(PageLayout {
                left,
                right_top: video,
                right_bottom: right,
            }),
            (left, right) => {
                tracing::debug!(video = %video.id, "not enough images to place video, stopping");
                rewind(remaining, [Some(video), right, left]);
                None
            }
        }
    }
}

/// Builds pages with the default lookahead.
pub fn build_pages(items: &[GalleryItem]) -> Vec<PageLayout> {
    PageBuilder::default().build(items).pages
}

/// Builds pages with an explicit lookahead.
pub fn build_pages_with(items: &[GalleryItem], lookahead: Lookahead) -> Vec<PageLayout> {
    PageBuilder::new(lookahead).build(items).pages
}

/// Distance of a video's aspect ratio from the 9:16 target. Unknown ratios
/// score as worst possible.
pub fn video_score(item: &GalleryItem) -> f64 {
    item.aspect_ratio
        .filter(|ratio| ratio.is_finite())
        .map(|ratio| (ratio - TARGET_VIDEO_ASPECT_RATIO).abs())
        .unwrap_or(f64::INFINITY)
}

/// Index of the best video inside the window, first one winning ties.
fn closest_video_index(remaining: &VecDeque<GalleryItem>, lookahead: Lookahead) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, item) in remaining.iter().take(lookahead.get()).enumerate() {
        if !item.is_video() {
            continue;
        }
        let score = video_score(item);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    best.map(|(index, _)| index)
}

fn take_first_image(remaining: &mut VecDeque<GalleryItem>) -> Option<GalleryItem> {
    let index = remaining.iter().position(GalleryItem::is_image)?;
    remaining.remove(index)
}

fn take_image_page(remaining: &mut VecDeque<GalleryItem>) -> Option<PageLayout> {
    let left = take_first_image(remaining);
    let right_top = take_first_image(remaining);
    let right_bottom = take_first_image(remaining);

    match (left, right_top, right_bottom) {
        (Some(left), Some(right_top), Some(right_bottom)) => Some(PageLayout {
            left,
            right_top,
            right_bottom,
        }),
        (left, right_top, right_bottom) => {
            rewind(remaining, [left, right_top, right_bottom]);
            None
        }
    }
}

/// Puts items taken during a failed attempt back at the front, in the order
/// they were taken.
fn rewind<const N: usize>(remaining: &mut VecDeque<GalleryItem>, taken: [Option<GalleryItem>; N]) {
    for item in taken.into_iter().rev().flatten() {
        remaining.push_front(item);
    }
}

/// Page builder configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum PageError {
    /// Lookahead must be positive.
    #[error("lookahead must be greater than zero")]
    InvalidLookahead,
    /// Viewport dimensions must be finite and positive.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}
