#![warn(missing_docs)]
//! # hero-gallery binary
//!
//! Fetches the gallery once and prints the mosaic pages it produces.

use std::process::ExitCode;
use std::sync::Arc;

use hero_gallery_app::{AppError, GalleryConfig, GalleryOrchestrator, app_version, init_logging};
use hero_gallery_core::PageSlot;
use hero_gallery_source::{DEFAULT_FETCH_TIMEOUT, GalleryClient, HttpTransport};

/// CLI entry point.
fn main() -> ExitCode {
    init_logging();
    tracing::info!(version = app_version(), "hero-gallery starting");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "hero-gallery failed");
            eprintln!("hero-gallery: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = GalleryConfig::from_env()?;
    let transport = HttpTransport::new(DEFAULT_FETCH_TIMEOUT)?;
    let client = GalleryClient::new(&config.endpoint, Arc::new(transport))?;

    let mut orchestrator = GalleryOrchestrator::new(&config);
    orchestrator.refresh(&client)?;

    let screen = orchestrator.screen();
    if let Some(headline) = screen.headline() {
        println!("{headline}");
        return Ok(());
    }

    for (index, page) in orchestrator.pages().iter().enumerate() {
        let slots: Vec<String> = PageSlot::ALL
            .into_iter()
            .map(|slot| {
                let item = page.item(slot);
                format!("{slot:?}={}({})", item.id, item.kind.as_str())
            })
            .collect();
        println!("page {}: {}", index + 1, slots.join(" "));
    }

    if let Some(label) = orchestrator.page_indicator() {
        println!("{label}");
    }
    Ok(())
}
