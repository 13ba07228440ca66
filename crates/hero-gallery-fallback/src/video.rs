//! Video tile fallback: poster chain, playback chain, and poster visibility.

use hero_gallery_media::VideoUrlSet;

use crate::Transition;

/// Poster still variant, in strict downgrade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterVariant {
    /// Size-reduced still.
    Preview,
    /// Processed mobile still.
    Processed,
    /// Raw still. Terminal.
    Original,
}

impl PosterVariant {
    fn next(self) -> Option<Self> {
        match self {
            Self::Preview => Some(Self::Processed),
            Self::Processed => Some(Self::Original),
            Self::Original => None,
        }
    }
}

/// Playback chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Playing (or loading) the processed rendition.
    Processed,
    /// Playing (or loading) the raw original.
    Original,
    /// Original failed: paused, poster forced, retry offered.
    Failed,
}

/// Surface a video tile is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSurface {
    /// Mosaic grid tile: muted, looping, no transport controls.
    Grid,
    /// Fullscreen carousel slide: sound, user controls, plays once.
    Fullscreen,
}

/// Player settings implied by a [`VideoSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPolicy {
    /// Audio muted.
    pub muted: bool,
    /// Restart at end.
    pub looping: bool,
    /// Show user transport controls.
    pub controls: bool,
}

impl VideoSurface {
    /// Returns the player settings for this surface.
    pub fn policy(self) -> PlaybackPolicy {
        match self {
            Self::Grid => PlaybackPolicy {
                muted: true,
                looping: true,
                controls: false,
            },
            Self::Fullscreen => PlaybackPolicy {
                muted: false,
                looping: false,
                controls: true,
            },
        }
    }
}

/// Render snapshot for a video tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTileView {
    /// Playable source to instantiate, `None` while the tile is not mounted.
    pub source_url: Option<String>,
    /// Whether the player is paused.
    pub paused: bool,
    /// Poster still URL.
    pub poster_url: String,
    /// Whether the poster layer is visible.
    pub show_poster: bool,
    /// Loading indicator overlay (shown with the poster).
    pub show_spinner: bool,
    /// "Tap to retry" overlay.
    pub show_retry: bool,
    /// Player settings for the surface.
    pub policy: PlaybackPolicy,
}

/// Fallback state machine for one video tile and its poster.
#[derive(Debug, Clone)]
pub struct VideoTileController {
    surface: VideoSurface,
    urls: VideoUrlSet,
    poster: PosterVariant,
    playback: PlaybackState,
    ready: bool,
    mounted: bool,
    playable: bool,
}

impl VideoTileController {
    /// Creates an unmounted controller at the top of both chains.
    pub fn new(surface: VideoSurface, urls: VideoUrlSet) -> Self {
        Self {
            surface,
            urls,
            poster: PosterVariant::Preview,
            playback: PlaybackState::Processed,
            ready: false,
            mounted: false,
            playable: false,
        }
    }

    /// Rebinds the controller to another variant set, resetting both chains
    /// together. Mount and playable inputs are kept.
    ///
    /// Returns `true` when the set differs and the controller was reset.
    pub fn retarget(&mut self, urls: VideoUrlSet) -> bool {
        if self.urls == urls {
            return false;
        }
        self.urls = urls;
        self.poster = PosterVariant::Preview;
        self.playback = PlaybackState::Processed;
        self.ready = false;
        true
    }

    /// Surface this tile renders on.
    pub fn surface(&self) -> VideoSurface {
        self.surface
    }

    /// Current poster variant.
    pub fn poster_variant(&self) -> PosterVariant {
        self.poster
    }

    /// Current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.playback
    }

    /// Returns `true` in the terminal failed state.
    pub fn is_failed(&self) -> bool {
        self.playback == PlaybackState::Failed
    }

    /// Returns `true` while the player element is instantiated.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Poster URL currently attempted.
    pub fn poster_url(&self) -> &str {
        match self.poster {
            PosterVariant::Preview => &self.urls.poster_preview,
            PosterVariant::Processed => &self.urls.poster_processed,
            PosterVariant::Original => &self.urls.poster_original,
        }
    }

    /// Playable source currently targeted.
    pub fn playback_url(&self) -> &str {
        match self.playback {
            PlaybackState::Processed => &self.urls.processed,
            PlaybackState::Original | PlaybackState::Failed => &self.urls.original,
        }
    }

    /// Updates the externally computed mount gate.
    ///
    /// Unmounting forces the poster. On the fullscreen surface, becoming
    /// mounted again clears a previous failure so the slide gets a fresh
    /// attempt at the original source.
    pub fn set_mounted(&mut self, mounted: bool) -> Transition {
        if self.mounted == mounted {
            return Transition::Unchanged;
        }
        self.mounted = mounted;

        if !mounted {
            self.ready = false;
            return Transition::Updated;
        }

        if self.surface == VideoSurface::Fullscreen && self.playback == PlaybackState::Failed {
            tracing::debug!(source = %self.urls.original, "slide reactivated, clearing failure");
            self.playback = PlaybackState::Original;
        }
        Transition::Updated
    }

    /// Updates whether the grid tile may play. Ignored on the fullscreen
    /// surface, where only failure pauses playback.
    pub fn set_playable(&mut self, playable: bool) -> Transition {
        if self.playable == playable {
            return Transition::Unchanged;
        }
        self.playable = playable;
        Transition::Updated
    }

    /// Applies a poster load failure.
    pub fn on_poster_error(&mut self, url: &str) -> Transition {
        if url != self.poster_url() {
            return Transition::Stale;
        }

        match self.poster.next() {
            Some(next) => {
                tracing::debug!(failed = url, to = ?next, "poster variant failed");
                self.poster = next;
                Transition::Downgraded
            }
            None => Transition::Exhausted,
        }
    }

    /// Applies the player's load-start signal. Only the fullscreen player
    /// reports it; the poster comes back until the new load is ready.
    pub fn on_load_start(&mut self, url: &str) -> Transition {
        if !self.accepts_player_event(url) {
            return Transition::Stale;
        }
        if self.surface != VideoSurface::Fullscreen || !self.ready {
            return Transition::Unchanged;
        }
        self.ready = false;
        Transition::Updated
    }

    /// Applies the player's loaded signal. Hides the poster and clears a
    /// failure if the player recovered on its own.
    pub fn on_loaded(&mut self, url: &str) -> Transition {
        if !self.accepts_player_event(url) {
            return Transition::Stale;
        }
        if self.playback == PlaybackState::Failed {
            self.playback = PlaybackState::Original;
        } else if self.ready {
            return Transition::Unchanged;
        }
        self.ready = true;
        Transition::Updated
    }

    /// Applies the player's ready-for-display signal.
    pub fn on_ready_for_display(&mut self, url: &str) -> Transition {
        if !self.accepts_player_event(url) {
            return Transition::Stale;
        }
        if self.ready {
            return Transition::Unchanged;
        }
        self.ready = true;
        Transition::Updated
    }

    /// Applies a playback failure.
    ///
    /// `processed` downgrades to `original`; a failure at `original` enters
    /// the failed state once. Further failures in that episode are no-ops.
    pub fn on_playback_error(&mut self, url: &str) -> Transition {
        if !self.accepts_player_event(url) {
            return Transition::Stale;
        }

        match self.playback {
            PlaybackState::Processed => {
                tracing::debug!(failed = url, "video source failed, trying original");
                self.playback = PlaybackState::Original;
                self.ready = false;
                Transition::Downgraded
            }
            PlaybackState::Original => {
                tracing::debug!(failed = url, "video sources exhausted");
                self.playback = PlaybackState::Failed;
                self.ready = false;
                Transition::Exhausted
            }
            PlaybackState::Failed => Transition::Unchanged,
        }
    }

    /// User retry: restarts the playback chain from `processed` with the
    /// poster forced until the new source is ready. The poster chain keeps
    /// its position.
    pub fn retry(&mut self) -> Transition {
        tracing::debug!(source = %self.urls.processed, "video retry requested");
        self.playback = PlaybackState::Processed;
        self.ready = false;
        Transition::Updated
    }

    fn accepts_player_event(&self, url: &str) -> bool {
        self.mounted && url == self.playback_url()
    }

    /// Poster shows until the mounted player signals readiness, and whenever
    /// the player is unmounted or has failed.
    pub fn poster_visible(&self) -> bool {
        !self.mounted || !self.ready || self.is_failed()
    }

    /// Returns `true` when the player should be paused.
    pub fn paused(&self) -> bool {
        match self.surface {
            VideoSurface::Grid => !self.playable || self.is_failed(),
            VideoSurface::Fullscreen => self.is_failed(),
        }
    }

    /// Returns the render snapshot.
    pub fn view(&self) -> VideoTileView {
        let show_poster = self.poster_visible();
        VideoTileView {
            source_url: self.mounted.then(|| self.playback_url().to_string()),
            paused: self.paused(),
            poster_url: self.poster_url().to_string(),
            show_poster,
            show_spinner: show_poster,
            show_retry: self.is_failed(),
            policy: self.surface.policy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(name: &str) -> VideoUrlSet {
        VideoUrlSet {
            processed: format!("https://cdn.test/processed/mobile/{name}"),
            original: format!("https://cdn.test/{name}"),
            poster_preview: format!("https://cdn.test/preview/{name}.webp"),
            poster_processed: format!("https://cdn.test/processed/mobile/{name}.webp"),
            poster_original: format!("https://cdn.test/{name}.webp"),
        }
    }

    #[test]
    fn poster_chain_stops_at_original() {
        let set = urls("v.mp4");
        let mut tile = VideoTileController::new(VideoSurface::Grid, set.clone());

        assert_eq!(tile.on_poster_error(&set.poster_preview), Transition::Downgraded);
        assert_eq!(tile.on_poster_error(&set.poster_processed), Transition::Downgraded);
        assert_eq!(tile.on_poster_error(&set.poster_original), Transition::Exhausted);
        assert_eq!(tile.poster_variant(), PosterVariant::Original);
    }

    #[test]
    fn events_while_unmounted_are_stale() {
        let set = urls("v.mp4");
        let mut tile = VideoTileController::new(VideoSurface::Grid, set.clone());

        assert_eq!(tile.on_loaded(&set.processed), Transition::Stale);
        assert_eq!(tile.on_playback_error(&set.processed), Transition::Stale);
        assert_eq!(tile.playback_state(), PlaybackState::Processed);
    }

    #[test]
    fn grid_pauses_when_not_playable() {
        let set = urls("v.mp4");
        let mut tile = VideoTileController::new(VideoSurface::Grid, set);
        tile.set_mounted(true);

        assert!(tile.paused());
        tile.set_playable(true);
        assert!(!tile.paused());
        assert!(tile.view().policy.muted);
    }
}
