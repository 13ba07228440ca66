//! Tile rectangles for one mosaic page at a given viewport.
//!
//! A page spans the full viewport width. Inside an outer inset sits a
//! padded container split into two equal columns; the right column holds two
//! equal tiles stacked with the same gap.

use hero_gallery_core::PageSlot;

use crate::PageError;

/// Horizontal inset between the viewport edge and the page container.
pub const PAGE_INSET_X: f32 = 8.0;
/// Vertical inset between the viewport edge and the page container.
pub const PAGE_INSET_Y: f32 = 2.0;
/// Padding inside the page container.
pub const CONTAINER_PADDING: f32 = 6.0;
/// Gap between columns and between the two right tiles.
pub const TILE_GAP: f32 = 8.0;

/// Visible area a page is laid out in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

impl Viewport {
    /// Creates a validated viewport.
    ///
    /// # Errors
    /// Returns [`PageError::InvalidViewport`] unless both sides are finite and
    /// positive.
    pub fn new(width: f32, height: f32) -> Result<Self, PageError> {
        let valid = |side: f32| side.is_finite() && side > 0.0;
        if !valid(width) || !valid(height) {
            return Err(PageError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }
}

/// Axis-aligned rectangle relative to the page origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Slot rectangles of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Width of one page; also the horizontal scroll step.
    pub page_width: f32,
    /// Large left tile.
    pub left: TileRect,
    /// Upper right tile.
    pub right_top: TileRect,
    /// Lower right tile.
    pub right_bottom: TileRect,
}

impl PageGeometry {
    /// Lays out one page inside `viewport`. Sides that the insets consume
    /// entirely collapse to zero instead of going negative.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let origin_x = PAGE_INSET_X + CONTAINER_PADDING;
        let origin_y = PAGE_INSET_Y + CONTAINER_PADDING;
        let inner_width = (viewport.width - 2.0 * origin_x).max(0.0);
        let inner_height = (viewport.height - 2.0 * origin_y).max(0.0);

        let column_width = ((inner_width - TILE_GAP) / 2.0).max(0.0);
        let tile_height = ((inner_height - TILE_GAP) / 2.0).max(0.0);
        let right_x = origin_x + column_width + TILE_GAP;

        Self {
            page_width: viewport.width,
            left: TileRect {
                x: origin_x,
                y: origin_y,
                width: column_width,
                height: inner_height,
            },
            right_top: TileRect {
                x: right_x,
                y: origin_y,
                width: column_width,
                height: tile_height,
            },
            right_bottom: TileRect {
                x: right_x,
                y: origin_y + tile_height + TILE_GAP,
                width: column_width,
                height: tile_height,
            },
        }
    }

    /// Rectangle of `slot`.
    pub fn rect(&self, slot: PageSlot) -> TileRect {
        match slot {
            PageSlot::Left => self.left,
            PageSlot::RightTop => self.right_top,
            PageSlot::RightBottom => self.right_bottom,
        }
    }

    /// Horizontal scroll offset of page `index`.
    pub fn page_offset(&self, index: usize) -> f32 {
        self.page_width * index as f32
    }
}
