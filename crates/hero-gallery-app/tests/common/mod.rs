//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use hero_gallery_app::{AppError, GalleryConfig, GalleryOrchestrator, Preloader};
use hero_gallery_core::{GalleryItem, MediaKind};
use hero_gallery_source::{GalleryClient, GalleryTransport, SourceError, TransportResponse};
use url::Url;

/// Endpoint used by every stub client.
#[allow(dead_code)]
pub const ENDPOINT: &str = "https://api.example.test/experience/gallery";

/// Transport returning one canned response and logging request URLs.
#[allow(dead_code)]
#[derive(Debug)]
pub struct StubTransport {
    response: Result<TransportResponse, String>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl StubTransport {
    /// Answers every request with `status` and `body`.
    pub fn answering(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Fails every request with a transport error.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// URLs requested so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log lock should work")
            .clone()
    }
}

impl GalleryTransport for StubTransport {
    fn get(&self, endpoint: &Url) -> Result<TransportResponse, SourceError> {
        self.requests
            .lock()
            .expect("request log lock should work")
            .push(endpoint.to_string());
        self.response.clone().map_err(SourceError::Transport)
    }
}

/// Preloader that records URLs and fails those containing `fail_marker`.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingPreloader {
    /// Substring that makes a preload fail.
    pub fail_marker: Option<String>,
    /// URLs handed to the preloader.
    pub seen: Mutex<Vec<String>>,
}

impl Preloader for RecordingPreloader {
    fn preload(&self, url: &str) -> Result<(), AppError> {
        self.seen
            .lock()
            .expect("preload log lock should work")
            .push(url.to_string());
        match &self.fail_marker {
            Some(marker) if url.contains(marker.as_str()) => {
                Err(AppError::Preload(format!("{url}: refused")))
            }
            _ => Ok(()),
        }
    }
}

/// Image item with id `id`.
#[allow(dead_code)]
pub fn image(id: &str) -> GalleryItem {
    GalleryItem::new(id, MediaKind::Image, format!("{id}.jpg")).expect("image fixture should be valid")
}

/// Video item with id `id` and aspect ratio `ratio`.
#[allow(dead_code)]
pub fn video(id: &str, ratio: f64) -> GalleryItem {
    GalleryItem::new(id, MediaKind::Video, format!("{id}.mp4"))
        .expect("video fixture should be valid")
        .with_aspect_ratio(ratio)
}

/// Nine images: three full pages.
#[allow(dead_code)]
pub fn nine_images() -> Vec<GalleryItem> {
    (1..=9).map(|index| image(&format!("i{index}"))).collect()
}

/// Orchestrator with default configuration and `items` applied.
#[allow(dead_code)]
pub fn ready_orchestrator(items: Vec<GalleryItem>) -> GalleryOrchestrator {
    let mut orchestrator = GalleryOrchestrator::new(&GalleryConfig::default());
    orchestrator.apply_items(items);
    orchestrator
}

/// Client bound to `transport`.
#[allow(dead_code)]
pub fn client(transport: Arc<StubTransport>) -> GalleryClient {
    GalleryClient::new(ENDPOINT, transport).expect("client fixture should build")
}
