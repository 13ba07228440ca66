#![warn(missing_docs)]
//! # hero-gallery-source
//!
//! ## Purpose
//! Fetches the raw gallery record list and normalizes it into
//! [`GalleryItem`] values.
//!
//! ## Responsibilities
//! - Validate the gallery endpoint (absolute http/https URL).
//! - Execute the GET through an injectable [`GalleryTransport`], with a
//!   blocking `reqwest` implementation in [`HttpTransport`].
//! - Treat non-2xx responses as fetch failures.
//! - Decode `{data:{gallery:[...]}}` and drop malformed records one by one.
//!
//! ## Data flow
//! Orchestrator refresh -> [`GalleryClient::fetch_items`] ->
//! [`GalleryTransport::get`] -> [`parse_gallery_response`] -> item list.
//!
//! ## Ownership and lifetimes
//! Decoded records and items are owned, so nothing borrows from the transient
//! response body.
//!
//! ## Error model
//! Only whole-fetch failures are errors ([`SourceError`]). A record missing
//! `src`, carrying an unknown `type`, failing to decode, or repeating an
//! earlier id is skipped and logged at debug level.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use hero_gallery_core::{GalleryItem, MediaKind, sanitize_aspect_ratio};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Default gallery endpoint.
pub const DEFAULT_GALLERY_ENDPOINT: &str = "https://api.hero-gallery.test/experience/gallery";

/// Default request timeout for [`HttpTransport`].
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// One raw gallery record as sent by the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GalleryRecord {
    /// Server id, synthesized when absent.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Source path.
    #[serde(default)]
    pub src: Option<String>,
    /// `image` or `video`; anything else is dropped.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Accessibility label.
    #[serde(default)]
    pub alt: Option<String>,
    /// Width / height when known.
    #[serde(rename = "aspectRatio", default)]
    pub aspect_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GalleryResponse {
    #[serde(default)]
    data: Option<GalleryData>,
}

#[derive(Debug, Deserialize)]
struct GalleryData {
    #[serde(default)]
    gallery: Option<Vec<Value>>,
}

/// Normalizes one record at position `index` of the raw list.
///
/// Returns `None` when `src` is missing or blank or `type` is unrecognized.
/// A missing or blank `_id` becomes `{type}-{src}-{index}`.
pub fn normalize_record(record: &GalleryRecord, index: usize) -> Option<GalleryItem> {
    let src = record.src.as_deref().filter(|src| !src.trim().is_empty())?;
    let kind_name = record.kind.as_deref()?;
    let kind = MediaKind::from_wire(kind_name)?;

    let id = match record.id.as_deref() {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => format!("{kind_name}-{src}-{index}"),
    };

    let mut item = GalleryItem::new(id, kind, src).ok()?;
    item.alt_text = record.alt.clone();
    item.aspect_ratio = sanitize_aspect_ratio(record.aspect_ratio);
    Some(item)
}

/// Decodes a gallery response body into normalized items.
///
/// A body without `data` or `data.gallery` yields an empty list.
///
/// # Errors
/// Returns [`SourceError::Decode`] when the body is not JSON of the expected
/// envelope shape.
pub fn parse_gallery_response(raw: &str) -> Result<Vec<GalleryItem>, SourceError> {
    let response: GalleryResponse = serde_json::from_str(raw)?;
    let records = response
        .data
        .and_then(|data| data.gallery)
        .unwrap_or_default();

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());

    for (index, value) in records.into_iter().enumerate() {
        let record = match serde_json::from_value::<GalleryRecord>(value) {
            Ok(record) => record,
            Err(error) => {
                tracing::debug!(index, %error, "skipping undecodable gallery record");
                continue;
            }
        };

        let Some(item) = normalize_record(&record, index) else {
            tracing::debug!(index, "skipping gallery record without usable src or type");
            continue;
        };

        if !seen.insert(item.id.clone()) {
            tracing::debug!(index, id = %item.id, "skipping duplicate gallery record");
            continue;
        }

        items.push(item);
    }

    Ok(items)
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl TransportResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by [`GalleryClient`].
pub trait GalleryTransport: Send + Sync {
    /// Issues a GET to `endpoint`.
    ///
    /// # Errors
    /// Returns [`SourceError::Transport`] on network failure.
    fn get(&self, endpoint: &Url) -> Result<TransportResponse, SourceError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Builds a transport with the given request timeout.
    ///
    /// # Errors
    /// Returns [`SourceError::Transport`] when the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hero-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| SourceError::Transport(format!("client setup failed: {error}")))?;
        Ok(Self { client })
    }
}

impl GalleryTransport for HttpTransport {
    fn get(&self, endpoint: &Url) -> Result<TransportResponse, SourceError> {
        let response = self
            .client
            .get(endpoint.as_str())
            .send()
            .map_err(|error| SourceError::Transport(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|error| SourceError::Transport(format!("reading body failed: {error}")))?;
        Ok(TransportResponse { status, body })
    }
}

/// Gallery client bound to one validated endpoint.
#[derive(Clone)]
pub struct GalleryClient {
    endpoint: Url,
    transport: Arc<dyn GalleryTransport>,
}

impl GalleryClient {
    /// Creates a validated client.
    ///
    /// # Errors
    /// Returns [`SourceError::InvalidEndpoint`] when `endpoint` is not an
    /// absolute http/https URL.
    pub fn new(endpoint: &str, transport: Arc<dyn GalleryTransport>) -> Result<Self, SourceError> {
        let endpoint = validate_gallery_endpoint(endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches and normalizes the gallery. No automatic retry.
    ///
    /// # Errors
    /// Returns [`SourceError::Status`] for non-2xx responses and propagates
    /// transport and decode failures.
    pub fn fetch_items(&self) -> Result<Vec<GalleryItem>, SourceError> {
        let response = self.transport.get(&self.endpoint).inspect_err(|error| {
            tracing::warn!(endpoint = %self.endpoint, %error, "gallery fetch failed");
        })?;

        if !response.is_success() {
            tracing::warn!(endpoint = %self.endpoint, status = response.status, "gallery fetch rejected");
            return Err(SourceError::Status(response.status));
        }

        let items = parse_gallery_response(&response.body)?;
        tracing::info!(endpoint = %self.endpoint, items = items.len(), "gallery fetched");
        Ok(items)
    }
}

/// Validates that `endpoint` is an absolute http/https URL.
///
/// # Errors
/// Returns [`SourceError::InvalidEndpoint`] otherwise.
pub fn validate_gallery_endpoint(endpoint: &str) -> Result<Url, SourceError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| SourceError::InvalidEndpoint(format!("invalid gallery url: {error}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SourceError::InvalidEndpoint(format!(
            "unsupported scheme {other}"
        ))),
    }
}

/// Item source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Endpoint is not usable.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Server answered with a non-2xx status.
    #[error("gallery request failed: {0}")]
    Status(u16),
    /// Network or client failure.
    #[error("gallery transport failure: {0}")]
    Transport(String),
    /// Body is not the expected JSON envelope.
    #[error("gallery decode failure: {0}")]
    Decode(#[from] serde_json::Error),
}
