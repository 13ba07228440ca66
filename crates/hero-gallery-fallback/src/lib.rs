#![warn(missing_docs)]
//! # hero-gallery-fallback
//!
//! ## Purpose
//! Per-tile state machines that walk a media item's URL variant chain when a
//! higher-quality source fails to load.
//!
//! ## Responsibilities
//! - Image tiles: preview placeholder plus a `processed -> original` main
//!   chain with a terminal exhausted state ([`ImageTileController`]).
//! - Video tiles: a poster chain and a playback chain running side by side,
//!   poster visibility, the terminal failed state and its retry
//!   ([`VideoTileController`]).
//! - Discard load events that refer to a URL the controller no longer
//!   targets.
//!
//! ## Data flow
//! `hero-gallery-media` variant set -> controller -> renderer attempts
//! `view()` URLs -> load/error events -> controller transition -> new `view()`.
//!
//! ## Ownership and lifetimes
//! One controller per realized tile (and one poster chain inside each video
//! controller). Controllers own their variant set; [`ImageTileController::retarget`]
//! and [`VideoTileController::retarget`] reset them when the tile is reused
//! for another item.
//!
//! ## Error model
//! Load failures are state transitions, never errors. Every event handler
//! returns a [`Transition`] describing what happened so callers and tests can
//! tell a downgrade from a terminal failure or a stale event.
//!
//! ## Concurrency
//! Controllers are plain values mutated through `&mut self`; events for one
//! tile are applied in arrival order by whoever owns it.

mod image;
mod video;

pub use image::{ImageTileController, ImageTileView, MainState, PreviewState};
pub use video::{
    PlaybackPolicy, PlaybackState, PosterVariant, VideoSurface, VideoTileController,
    VideoTileView,
};

/// Outcome of feeding one event to a tile controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A failure moved the chain to its next variant.
    Downgraded,
    /// A failure hit the last variant; no further automatic downgrade.
    Exhausted,
    /// A non-failure event (loaded, ready, retry, mount change) was applied.
    Updated,
    /// The event was valid for the current target but changed nothing.
    Unchanged,
    /// The event referred to a URL that is no longer targeted and was dropped.
    Stale,
}
