use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use crate::core::{DialogMode, FileWindowConfig};
use crate::filter::ExtensionFilter;
use crate::fs::FileSystem;
use crate::listing::{DirectoryEntry, DirectoryListing};
use crate::refresh::RefreshTimer;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Where the window is in its open/confirm/close cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogPhase {
    /// Not drawn.
    Hidden,
    /// Visible, waiting for the user to pick a file.
    Browsing,
    /// Save mode: the chosen file exists and the next confirm overwrites it.
    ConfirmOverwrite,
}

/// Result of [`FileWindowCore::select_entry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The entry is now selected.
    Selected,
    /// Second click on the selected entry within the double-click window.
    RequestConfirm,
}

/// Result of [`FileWindowCore::confirm`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Nothing to confirm (empty name, a name that leaves the directory, or
    /// a directory in save mode).
    Ignored,
    /// The target exists; confirm again to overwrite it.
    ConfirmOverwrite,
    /// The window closed with this path.
    Completed(PathBuf),
}

/// UI-independent state of a file window.
///
/// Owns the scan timer, the cached listing and the transient selection state.
/// All time-dependent calls take `now` so the behaviour is deterministic.
#[derive(Clone, Debug)]
pub struct FileWindowCore {
    mode: DialogMode,
    dir: PathBuf,
    filter: ExtensionFilter,
    visible: bool,
    file_name: String,
    confirm_overwrite: bool,
    last_click: Option<(String, Instant)>,
    config: FileWindowConfig,
    timer: RefreshTimer,
    listing: DirectoryListing,
}

impl FileWindowCore {
    /// Create a hidden core for `dir` with the given filter and mode.
    pub fn new(
        mode: DialogMode,
        dir: impl Into<PathBuf>,
        filter: impl Into<ExtensionFilter>,
        config: FileWindowConfig,
    ) -> Self {
        Self {
            mode,
            dir: dir.into(),
            filter: filter.into(),
            visible: false,
            file_name: String::new(),
            confirm_overwrite: false,
            last_click: None,
            timer: RefreshTimer::new(config.refresh_interval),
            listing: DirectoryListing::new(),
            config,
        }
    }

    /// Dialog mode.
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// Directory being listed.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Active extension filter.
    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    /// Geometry and timing configuration.
    pub fn config(&self) -> &FileWindowConfig {
        &self.config
    }

    /// Cached entries, sorted case-insensitively by name.
    pub fn entries(&self) -> &[DirectoryEntry] {
        self.listing.entries()
    }

    /// Current file name text. May not name an existing entry.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Whether the next confirm overwrites an existing file.
    pub fn is_confirming_overwrite(&self) -> bool {
        self.confirm_overwrite
    }

    /// Whether the window is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current phase.
    pub fn phase(&self) -> DialogPhase {
        match (self.visible, self.confirm_overwrite) {
            (false, _) => DialogPhase::Hidden,
            (true, false) => DialogPhase::Browsing,
            (true, true) => DialogPhase::ConfirmOverwrite,
        }
    }

    /// Show the window and schedule an immediate rescan.
    pub fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.timer.force();
        }
    }

    /// Hide the window and drop transient selection state.
    pub fn hide(&mut self) {
        self.visible = false;
        self.reset_selection();
    }

    /// Rescan the directory if the debounce timer is due at `now`.
    pub fn refresh(&mut self, fs: &dyn FileSystem, now: Instant) -> bool {
        self.listing
            .refresh(fs, &self.dir, &self.filter, &mut self.timer, now)
    }

    /// Click on a listed entry at `now`.
    pub fn select_entry(&mut self, name: &str, now: Instant) -> SelectOutcome {
        let double_click = self.file_name == name
            && self.last_click.as_ref().is_some_and(|(last_name, at)| {
                last_name == name
                    && now.saturating_duration_since(*at) < self.config.double_click_window
            });
        self.set_file_name(name);
        if double_click {
            self.last_click = None;
            return SelectOutcome::RequestConfirm;
        }
        self.last_click = Some((name.to_owned(), now));
        SelectOutcome::Selected
    }

    /// Replace the file name text (typing in the name field).
    pub fn set_file_name(&mut self, text: &str) {
        if self.file_name != text {
            self.file_name = text.to_owned();
            self.confirm_overwrite = false;
        }
    }

    /// Path the current file name resolves to.
    ///
    /// `None` for a blank name and for names that are not a single entry of
    /// the listed directory (`/etc/passwd`, `../x`, `sub/a.txt`). The name is
    /// joined as typed; surrounding whitespace is part of it.
    pub fn target_path(&self) -> Option<PathBuf> {
        if self.file_name.trim().is_empty() || !is_plain_file_name(&self.file_name) {
            return None;
        }
        Some(self.dir.join(&self.file_name))
    }

    /// Confirm the current file name.
    ///
    /// In save mode an existing file must be confirmed twice. On completion
    /// the window hides itself and the caller receives the joined path.
    pub fn confirm(&mut self, fs: &dyn FileSystem) -> ConfirmOutcome {
        let Some(path) = self.target_path() else {
            if !self.file_name.trim().is_empty() {
                trace_confirm_rejected(
                    Path::new(&self.file_name),
                    "name is not a plain file name",
                );
            }
            return ConfirmOutcome::Ignored;
        };
        if matches!(self.mode, DialogMode::Save) && !self.confirm_overwrite {
            match fs.metadata(&path) {
                Ok(md) if md.is_dir => {
                    trace_confirm_rejected(&path, "save target is a directory");
                    return ConfirmOutcome::Ignored;
                }
                Ok(_) => {
                    self.confirm_overwrite = true;
                    trace_overwrite_requested(&path);
                    return ConfirmOutcome::ConfirmOverwrite;
                }
                Err(_) => {}
            }
        }
        trace_confirm_completed(&path);
        self.hide();
        ConfirmOutcome::Completed(path)
    }

    /// Cancel: hide without producing a path.
    pub fn cancel(&mut self) {
        if self.visible {
            trace_cancelled(&self.dir);
        }
        self.hide();
    }

    fn reset_selection(&mut self) {
        self.file_name.clear();
        self.confirm_overwrite = false;
        self.last_click = None;
    }
}

/// Exactly one normal path component, with no separator of any platform.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', std::path::MAIN_SEPARATOR]) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(feature = "tracing")]
fn trace_overwrite_requested(path: &Path) {
    debug!(
        event = "confirm.overwrite_requested",
        path = %path.display(),
        "target exists, asking before overwrite"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_overwrite_requested(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_confirm_rejected(path: &Path, reason: &'static str) {
    debug!(
        event = "confirm.rejected",
        path = %path.display(),
        reason,
        "confirm rejected"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_confirm_rejected(_path: &Path, _reason: &'static str) {}

#[cfg(feature = "tracing")]
fn trace_confirm_completed(path: &Path) {
    debug!(event = "confirm.completed", path = %path.display(), "file chosen");
}

#[cfg(not(feature = "tracing"))]
fn trace_confirm_completed(_path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_cancelled(dir: &Path) {
    debug!(event = "dialog.cancelled", dir = %dir.display(), "dialog cancelled");
}

#[cfg(not(feature = "tracing"))]
fn trace_cancelled(_dir: &Path) {}
