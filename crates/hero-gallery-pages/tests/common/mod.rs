//! Shared item fixtures for page builder tests.

use hero_gallery_core::{GalleryItem, MediaKind};

/// Image item with id `id`.
#[allow(dead_code)]
pub fn image(id: &str) -> GalleryItem {
    GalleryItem::new(id, MediaKind::Image, format!("{id}.jpg")).expect("image fixture should be valid")
}

/// Video item with id `id` and an optional aspect ratio.
#[allow(dead_code)]
pub fn video(id: &str, aspect_ratio: Option<f64>) -> GalleryItem {
    let item = GalleryItem::new(id, MediaKind::Video, format!("{id}.mp4"))
        .expect("video fixture should be valid");
    match aspect_ratio {
        Some(ratio) => item.with_aspect_ratio(ratio),
        None => item,
    }
}

/// Slot ids of a page in render order.
#[allow(dead_code)]
pub fn ids(page: &hero_gallery_core::PageLayout) -> [&str; 3] {
    let [left, right_top, right_bottom] = page.items();
    [left.id.as_str(), right_top.id.as_str(), right_bottom.id.as_str()]
}
