//! Image tile fallback: preview placeholder plus a two-step main chain.

use hero_gallery_media::ImageUrlSet;

use crate::Transition;

/// Main candidate state, in strict downgrade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainState {
    /// Attempting the processed rendition.
    Processed,
    /// Attempting the raw original.
    Original,
    /// The original failed too. The tile keeps its placeholder and spinner.
    Exhausted,
}

impl MainState {
    fn after_failure(self) -> Self {
        match self {
            Self::Processed => Self::Original,
            Self::Original | Self::Exhausted => Self::Exhausted,
        }
    }
}

/// Single-shot state of the preview placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No outcome yet.
    Pending,
    /// Preview decoded.
    Loaded,
    /// Preview failed; it is never retried.
    Failed,
}

/// Render snapshot for an image tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTileView {
    /// Placeholder URL rendered under the main candidate.
    pub preview_url: String,
    /// Whether the placeholder layer is visible.
    pub show_preview: bool,
    /// Main candidate URL the renderer should attempt.
    pub main_url: String,
    /// Whether the main layer is visible.
    pub show_main: bool,
    /// Loading indicator overlay.
    pub show_spinner: bool,
}

/// Fallback state machine for one image tile.
#[derive(Debug, Clone)]
pub struct ImageTileController {
    urls: ImageUrlSet,
    main: MainState,
    main_loaded: bool,
    preview: PreviewState,
}

impl ImageTileController {
    /// Creates a controller targeting the processed rendition.
    pub fn new(urls: ImageUrlSet) -> Self {
        Self {
            urls,
            main: MainState::Processed,
            main_loaded: false,
            preview: PreviewState::Pending,
        }
    }

    /// Rebinds the controller to another variant set.
    ///
    /// Returns `true` when the set differs and the controller was reset.
    pub fn retarget(&mut self, urls: ImageUrlSet) -> bool {
        if self.urls == urls {
            return false;
        }
        *self = Self::new(urls);
        true
    }

    /// Current main candidate state.
    pub fn main_state(&self) -> MainState {
        self.main
    }

    /// Current preview state.
    pub fn preview_state(&self) -> PreviewState {
        self.preview
    }

    /// Returns `true` once any main candidate has loaded.
    pub fn main_loaded(&self) -> bool {
        self.main_loaded
    }

    /// URL of the main candidate currently attempted.
    pub fn main_url(&self) -> &str {
        match self.main {
            MainState::Processed => &self.urls.processed,
            MainState::Original | MainState::Exhausted => &self.urls.original,
        }
    }

    /// URL of the preview placeholder.
    pub fn preview_url(&self) -> &str {
        &self.urls.preview
    }

    /// Applies a main candidate load success.
    pub fn on_main_loaded(&mut self, url: &str) -> Transition {
        if url != self.main_url() {
            return Transition::Stale;
        }
        if self.main_loaded {
            return Transition::Unchanged;
        }
        self.main_loaded = true;
        Transition::Updated
    }

    /// Applies a main candidate load failure.
    pub fn on_main_error(&mut self, url: &str) -> Transition {
        if url != self.main_url() {
            return Transition::Stale;
        }

        let next = self.main.after_failure();
        let transition = match (self.main, next) {
            (MainState::Exhausted, _) => Transition::Unchanged,
            (_, MainState::Exhausted) => Transition::Exhausted,
            _ => Transition::Downgraded,
        };

        if transition != Transition::Unchanged {
            tracing::debug!(
                failed = url,
                from = ?self.main,
                to = ?next,
                "image main candidate failed"
            );
        }
        self.main = next;
        transition
    }

    /// Applies a preview load success.
    pub fn on_preview_loaded(&mut self, url: &str) -> Transition {
        self.settle_preview(url, PreviewState::Loaded)
    }

    /// Applies a preview load failure.
    pub fn on_preview_error(&mut self, url: &str) -> Transition {
        self.settle_preview(url, PreviewState::Failed)
    }

    fn settle_preview(&mut self, url: &str, outcome: PreviewState) -> Transition {
        if url != self.urls.preview {
            return Transition::Stale;
        }
        if self.preview == outcome {
            return Transition::Unchanged;
        }
        self.preview = outcome;
        Transition::Updated
    }

    /// Spinner stays until a main candidate has loaded at least once.
    pub fn show_spinner(&self) -> bool {
        !self.main_loaded
    }

    /// Returns the render snapshot.
    pub fn view(&self) -> ImageTileView {
        ImageTileView {
            preview_url: self.urls.preview.clone(),
            show_preview: self.preview == PreviewState::Loaded || self.main_loaded,
            main_url: self.main_url().to_string(),
            show_main: self.main_loaded,
            show_spinner: self.show_spinner(),
        }
    }
}
