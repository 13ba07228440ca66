#![warn(missing_docs)]
//! # hero-gallery-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `hero-gallery` workspace.
//!
//! ## Responsibilities
//! - Represent one media entry of the gallery collection ([`GalleryItem`]).
//! - Represent one three-slot mosaic page ([`PageLayout`]) and validate its
//!   invariants (distinct items, at most one video).
//! - Carry the canonical portrait hero aspect ratio used for video selection.
//!
//! ## Data flow
//! The item source normalizes raw API records into [`GalleryItem`] values.
//! The page builder consumes them and emits [`PageLayout`] values, which the
//! orchestrator and tile controllers read but never mutate.
//!
//! ## Ownership and lifetimes
//! Items own their strings; pages own clones of the items they hold so a page
//! list can outlive the item list it was built from.
//!
//! ## Error model
//! Construction-time validation failures (blank id or path, duplicate items
//! in a page, two videos in a page) return [`CoreError`].
//!
//! ## Example
//! ```rust
//! use hero_gallery_core::{GalleryItem, MediaKind, PageLayout};
//!
//! let a = GalleryItem::new("a", MediaKind::Image, "a.jpg").unwrap();
//! let b = GalleryItem::new("b", MediaKind::Video, "b.mp4").unwrap();
//! let c = GalleryItem::new("c", MediaKind::Image, "c.jpg").unwrap();
//! let page = PageLayout::new(b, a, c).expect("valid page");
//! assert_eq!(page.video_count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical "portrait hero" aspect ratio (9:16) that video selection targets.
pub const TARGET_VIDEO_ASPECT_RATIO: f64 = 9.0 / 16.0;

/// Number of slots in one mosaic page.
pub const PAGE_SLOT_COUNT: usize = 3;

/// Media kind of a gallery item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Playable video with a poster still.
    Video,
}

impl MediaKind {
    /// Parses the wire name used by the gallery API.
    ///
    /// Returns `None` for anything other than `image` or `video`.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }

    /// Returns the wire name used by the gallery API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// One piece of media in the gallery collection.
///
/// Items are immutable once created; `id` is the sole key used for
/// deduplication and lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Unique, stable identifier.
    pub id: String,
    /// Image or video.
    pub kind: MediaKind,
    /// Raw source path all URL variants are derived from.
    pub path: String,
    /// Optional accessibility label.
    pub alt_text: Option<String>,
    /// Width / height when known ahead of render. `None` means unknown.
    pub aspect_ratio: Option<f64>,
}

impl GalleryItem {
    /// Constructs a validated item with no alt text and unknown aspect ratio.
    ///
    /// # Errors
    /// Returns [`CoreError::BlankId`] or [`CoreError::BlankPath`] when the
    /// respective value is empty or whitespace.
    pub fn new(
        id: impl Into<String>,
        kind: MediaKind,
        path: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::BlankId);
        }

        let path = path.into();
        if path.trim().is_empty() {
            return Err(CoreError::BlankPath { id });
        }

        Ok(Self {
            id,
            kind,
            path,
            alt_text: None,
            aspect_ratio: None,
        })
    }

    /// Sets the accessibility label.
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    /// Sets the aspect ratio. Non-finite or non-positive values are stored as
    /// unknown.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = sanitize_aspect_ratio(Some(aspect_ratio));
        self
    }

    /// Returns `true` for video items.
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Returns `true` for image items.
    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }
}

/// Filters an optional aspect ratio down to a finite positive value.
pub fn sanitize_aspect_ratio(value: Option<f64>) -> Option<f64> {
    value.filter(|ratio| ratio.is_finite() && *ratio > 0.0)
}

/// Slot position inside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSlot {
    /// Large slot on the left column.
    Left,
    /// Upper tile of the right column.
    RightTop,
    /// Lower tile of the right column.
    RightBottom,
}

impl PageSlot {
    /// All slots in render order.
    pub const ALL: [PageSlot; PAGE_SLOT_COUNT] =
        [PageSlot::Left, PageSlot::RightTop, PageSlot::RightBottom];
}

/// One mosaic page: a large left slot and two stacked right slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Large left tile.
    pub left: GalleryItem,
    /// Upper right tile.
    pub right_top: GalleryItem,
    /// Lower right tile.
    pub right_bottom: GalleryItem,
}

impl PageLayout {
    /// Constructs a validated page.
    ///
    /// # Errors
    /// Returns [`CoreError::DuplicateItem`] when two slots hold the same id and
    /// [`CoreError::TooManyVideos`] when more than one slot holds a video.
    pub fn new(
        left: GalleryItem,
        right_top: GalleryItem,
        right_bottom: GalleryItem,
    ) -> Result<Self, CoreError> {
        let page = Self {
            left,
            right_top,
            right_bottom,
        };
        page.validate()?;
        Ok(page)
    }

    /// Checks page invariants.
    ///
    /// # Errors
    /// See [`PageLayout::new`].
    pub fn validate(&self) -> Result<(), CoreError> {
        let [a, b, c] = self.items();
        for (first, second) in [(a, b), (a, c), (b, c)] {
            if first.id == second.id {
                return Err(CoreError::DuplicateItem(first.id.clone()));
            }
        }

        let videos = self.video_count();
        if videos > 1 {
            return Err(CoreError::TooManyVideos(videos));
        }

        Ok(())
    }

    /// Returns the item held in `slot`.
    pub fn item(&self, slot: PageSlot) -> &GalleryItem {
        match slot {
            PageSlot::Left => &self.left,
            PageSlot::RightTop => &self.right_top,
            PageSlot::RightBottom => &self.right_bottom,
        }
    }

    /// Returns the three items in render order (left, right-top, right-bottom).
    pub fn items(&self) -> [&GalleryItem; PAGE_SLOT_COUNT] {
        [&self.left, &self.right_top, &self.right_bottom]
    }

    /// Number of video items on the page.
    pub fn video_count(&self) -> usize {
        self.items().iter().filter(|item| item.is_video()).count()
    }

    /// Slot holding the page's video, if any.
    pub fn video_slot(&self) -> Option<PageSlot> {
        PageSlot::ALL
            .into_iter()
            .find(|slot| self.item(*slot).is_video())
    }

    /// Returns `true` when any slot holds the item with `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.items().iter().any(|item| item.id == id)
    }
}

/// Error type for core model validation.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Item id is empty.
    #[error("item id is empty")]
    BlankId,
    /// Item path is empty.
    #[error("item {id} has an empty path")]
    BlankPath {
        /// Id of the offending item.
        id: String,
    },
    /// Same item placed in two slots of one page.
    #[error("item {0} appears more than once in a page")]
    DuplicateItem(String),
    /// More than one video in a page.
    #[error("page holds {0} videos, at most one is allowed")]
    TooManyVideos(usize),
}
