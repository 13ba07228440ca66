//! Integration tests for opening the fullscreen carousel from the grid.

mod common;

use common::{image, ready_orchestrator, video};
use hero_gallery_app::{TileController, unique_ordered_items};
use hero_gallery_fallback::VideoSurface;

fn mixed_items() -> Vec<hero_gallery_core::GalleryItem> {
    vec![
        image("i1"),
        video("v-wide", 1.2),
        image("i2"),
        video("v-portrait", 0.56),
        image("i3"),
        image("i4"),
        image("i5"),
        image("i6"),
    ]
}

#[test]
fn carousel_open_tests_opens_at_item_position_in_page_order() {
    let mut orchestrator = ready_orchestrator(mixed_items());
    let ids: Vec<&str> = orchestrator
        .ordered_items()
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(ids, vec!["v-portrait", "i1", "i2", "v-wide", "i3", "i4"]);

    assert_eq!(orchestrator.open_item("v-wide"), 3);
    assert!(orchestrator.carousel().is_visible());
    assert!(orchestrator.carousel().slide_mounts_video(3));
}

#[test]
fn carousel_open_tests_unknown_id_opens_first_slide() {
    let mut orchestrator = ready_orchestrator(mixed_items());

    assert_eq!(orchestrator.open_item("gone"), 0);
}

#[test]
fn carousel_open_tests_open_carousel_unmounts_grid_video() {
    let mut orchestrator = ready_orchestrator(mixed_items());
    assert!(orchestrator.tile_mounts_video(0));
    assert!(!orchestrator.tile_mounts_video(1));

    orchestrator.open_item("i1");
    assert!(!orchestrator.tile_mounts_video(0));
    assert!(!orchestrator.tile_is_playable(0));

    orchestrator.close_modal();
    assert!(orchestrator.tile_mounts_video(0));
}

#[test]
fn carousel_open_tests_swipe_moves_active_slide() {
    let mut orchestrator = ready_orchestrator(mixed_items());
    orchestrator.open_item("v-portrait");

    orchestrator.carousel_mut().on_momentum_scroll_end(780.0, 390.0);

    assert_eq!(orchestrator.carousel().current(), 2);
    assert_eq!(orchestrator.carousel().next_target(), Some(3));
}

#[test]
fn carousel_open_tests_slides_use_original_image_and_fullscreen_video() {
    let orchestrator = ready_orchestrator(mixed_items());
    let ordered = unique_ordered_items(orchestrator.pages());

    assert_eq!(
        orchestrator.slide_image_url(&ordered[1]),
        "https://cdn.hero-gallery.test/i1.jpg"
    );
    match orchestrator.tile_controller(&ordered[0], VideoSurface::Fullscreen) {
        TileController::Video(tile) => {
            assert_eq!(tile.surface(), VideoSurface::Fullscreen);
            assert!(tile.view().policy.controls);
        }
        TileController::Image(_) => panic!("v-portrait should get a video controller"),
    }
}
