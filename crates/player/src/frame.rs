//! Load/error bookkeeping for the embedded player frame.
//!
//! The frame's lifecycle is independent of the session: it only resets when
//! the URL it is pointed at changes identity.

use serde::Serialize;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load player. Try a different server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    Empty,
    Loading,
    Ready,
    Failed,
}

impl FrameStatus {
    /// User-facing text for the status, if any.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Failed => Some(LOAD_FAILED_MESSAGE),
            Self::Empty | Self::Loading | Self::Ready => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmbedFrame {
    url: Option<String>,
    loading: bool,
    failed: bool,
}

impl EmbedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Point the frame at `url`. Returns `true` if this is a new URL, in which
    /// case the frame is back to loading with no error.
    pub fn sync(&mut self, url: Option<&str>) -> bool {
        if self.url.as_deref() == url {
            return false;
        }
        self.url = url.map(str::to_string);
        self.loading = self.url.is_some();
        self.failed = false;
        true
    }

    pub fn on_load(&mut self) {
        self.loading = false;
    }

    pub fn on_error(&mut self) {
        self.loading = false;
        self.failed = true;
    }

    /// Message to show over the frame, set only after a load failure.
    pub fn error_message(&self) -> Option<&'static str> {
        self.status().message()
    }

    pub fn status(&self) -> FrameStatus {
        match (&self.url, self.loading, self.failed) {
            (None, _, _) => FrameStatus::Empty,
            (Some(_), true, _) => FrameStatus::Loading,
            (Some(_), false, true) => FrameStatus::Failed,
            (Some(_), false, false) => FrameStatus::Ready,
        }
    }
}
