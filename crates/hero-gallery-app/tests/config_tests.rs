//! Integration tests for environment configuration.

use std::collections::HashMap;

use hero_gallery_app::config::{ENV_CDN_BASE, ENV_ENDPOINT, ENV_LOOKAHEAD, ENV_VIEWPORT};
use hero_gallery_app::{AppError, GalleryConfig, GalleryOrchestrator};
use hero_gallery_core::{GalleryItem, MediaKind};

fn load(pairs: &[(&str, &str)]) -> Result<GalleryConfig, AppError> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    GalleryConfig::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn config_tests_applies_overrides() {
    let config = load(&[
        (ENV_ENDPOINT, "http://localhost:8080/gallery"),
        (ENV_CDN_BASE, "https://media.example.test/"),
        (ENV_LOOKAHEAD, " 4 "),
        (ENV_VIEWPORT, "428x926"),
    ])
    .expect("overrides should be valid");

    assert_eq!(config.endpoint, "http://localhost:8080/gallery");
    assert_eq!(config.cdn.base(), "https://media.example.test");
    assert_eq!(config.lookahead.get(), 4);
    assert_eq!(config.viewport.width, 428.0);
    assert_eq!(config.viewport.height, 926.0);
}

#[test]
fn config_tests_blank_values_keep_defaults() {
    let config = load(&[(ENV_LOOKAHEAD, "  "), (ENV_ENDPOINT, "")]).expect("blank is ignored");

    assert_eq!(config.lookahead.get(), 12);
    assert_eq!(
        config.endpoint,
        hero_gallery_source::DEFAULT_GALLERY_ENDPOINT
    );
}

#[test]
fn config_tests_rejects_invalid_values() {
    assert!(matches!(
        load(&[(ENV_LOOKAHEAD, "0")]),
        Err(AppError::Pages(_))
    ));
    assert!(matches!(
        load(&[(ENV_LOOKAHEAD, "many")]),
        Err(AppError::Config(_))
    ));
    assert!(matches!(
        load(&[(ENV_CDN_BASE, "ftp://media.example.test")]),
        Err(AppError::Media(_))
    ));
    assert!(matches!(
        load(&[(ENV_ENDPOINT, "gallery.json")]),
        Err(AppError::Source(_))
    ));
    assert!(matches!(
        load(&[(ENV_VIEWPORT, "wide")]),
        Err(AppError::Config(_))
    ));
}

#[test]
fn config_tests_lookahead_and_cdn_flow_into_orchestrator() {
    let config = load(&[(ENV_LOOKAHEAD, "2"), (ENV_CDN_BASE, "https://media.example.test")])
        .expect("valid config");
    let mut orchestrator = GalleryOrchestrator::new(&config);
    let items = vec![
        GalleryItem::new("i1", MediaKind::Image, "i1.jpg").expect("image"),
        GalleryItem::new("i2", MediaKind::Image, "i2.jpg").expect("image"),
        GalleryItem::new("v1", MediaKind::Video, "v1.mp4")
            .expect("video")
            .with_aspect_ratio(0.56),
        GalleryItem::new("i3", MediaKind::Image, "i3.jpg").expect("image"),
    ];

    orchestrator.apply_items(items);

    assert_eq!(orchestrator.pages().len(), 1);
    assert_eq!(orchestrator.pages()[0].left.id, "i1");
    assert_eq!(
        orchestrator.slide_image_url(&orchestrator.pages()[0].left),
        "https://media.example.test/i1.jpg"
    );
}
