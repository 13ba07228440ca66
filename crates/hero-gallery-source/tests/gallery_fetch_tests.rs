//! Integration tests for the gallery client over a stub transport.

use std::sync::{Arc, Mutex};

use hero_gallery_source::{GalleryClient, GalleryTransport, SourceError, TransportResponse};
use url::Url;

#[derive(Debug)]
struct StubTransport {
    response: Result<TransportResponse, String>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    fn answering(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
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

const ENDPOINT: &str = "https://api.example.test/experience/gallery";

#[test]
fn gallery_fetch_tests_normalizes_successful_response() {
    let body = r#"{"data":{"gallery":[
        {"_id":"a","src":"/a.jpg","type":"image","alt":"A"},
        {"src":"b.mp4","type":"video","aspectRatio":0.56}
    ]}}"#;
    let transport = StubTransport::answering(200, body);
    let client = GalleryClient::new(ENDPOINT, transport.clone()).expect("client should build");

    let items = client.fetch_items().expect("fetch should succeed");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "a");
    assert_eq!(items[0].alt_text.as_deref(), Some("A"));
    assert_eq!(items[1].id, "video-b.mp4-1");
    assert_eq!(items[1].aspect_ratio, Some(0.56));
    assert_eq!(
        transport.requests.lock().expect("lock").as_slice(),
        [ENDPOINT.to_string()]
    );
}

#[test]
fn gallery_fetch_tests_non_2xx_is_hard_failure() {
    let client = GalleryClient::new(ENDPOINT, StubTransport::answering(503, "busy"))
        .expect("client should build");

    let error = client.fetch_items().expect_err("503 must fail");

    assert!(matches!(error, SourceError::Status(503)));
    assert_eq!(error.to_string(), "gallery request failed: 503");
}

#[test]
fn gallery_fetch_tests_propagates_network_failure() {
    let client = GalleryClient::new(ENDPOINT, StubTransport::failing("connection refused"))
        .expect("client should build");

    let error = client.fetch_items().expect_err("network failure must fail");

    assert!(matches!(error, SourceError::Transport(message) if message == "connection refused"));
}

#[test]
fn gallery_fetch_tests_rejects_invalid_endpoint() {
    let result = GalleryClient::new("ftp://api.example.test", StubTransport::answering(200, "{}"));
    assert!(matches!(result, Err(SourceError::InvalidEndpoint(_))));
}
