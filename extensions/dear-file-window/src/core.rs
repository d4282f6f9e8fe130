use std::time::Duration;
use thiserror::Error;

/// Dialog mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogMode {
    /// Pick an existing file
    #[default]
    Open,
    /// Pick a file to write, asking before overwriting an existing one
    Save,
}

impl DialogMode {
    /// Label of the confirmation button.
    pub fn confirm_label(self) -> &'static str {
        match self {
            DialogMode::Open => "Open",
            DialogMode::Save => "Save",
        }
    }
}

/// How the host window is layered relative to the rest of the UI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowLayer {
    /// Blocks interaction with other windows until dismissed
    #[default]
    Modal,
    /// Regular floating window
    Floating,
}

/// Window geometry and timing knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FileWindowConfig {
    /// Initial window size in pixels
    pub size: [f32; 2],
    /// Initial window position in pixels (top-left)
    pub position: [f32; 2],
    /// Minimum time between two directory scans
    pub refresh_interval: Duration,
    /// Two clicks on the same entry closer than this confirm the selection
    pub double_click_window: Duration,
}

impl Default for FileWindowConfig {
    fn default() -> Self {
        Self {
            size: [600.0, 600.0],
            position: [100.0, 100.0],
            refresh_interval: Duration::from_secs(1),
            double_click_window: Duration::from_millis(250),
        }
    }
}

/// Errors returned while building a file window.
///
/// Runtime failures (unreadable directory, vanished entries) never surface
/// here; they degrade to an empty or shorter listing.
#[derive(Error, Debug)]
pub enum FileWindowError {
    /// No completion callback was configured
    #[error("a completion callback is required")]
    MissingCallback,
    /// Window title cannot be passed to Dear ImGui
    #[error("invalid window title: {0:?}")]
    InvalidTitle(String),
}
