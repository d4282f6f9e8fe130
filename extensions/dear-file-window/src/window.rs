use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::{DialogMode, FileWindowConfig, FileWindowError, WindowLayer};
use crate::dialog_core::{ConfirmOutcome, FileWindowCore, SelectOutcome};
use crate::filter::ExtensionFilter;
use crate::fs::{FileSystem, StdFileSystem};

type DoneCallback = Box<dyn FnMut(&Path)>;

/// Open/save file window.
///
/// Built hidden; call [`show`](Self::show) to display it and
/// [`draw`](Self::draw) once per frame. When the user confirms a file, the
/// completion callback runs with the joined directory + file name path and the
/// window hides itself. Cancelling never runs the callback.
pub struct FileWindow {
    pub(crate) title: String,
    pub(crate) layer: WindowLayer,
    pub(crate) core: FileWindowCore,
    pub(crate) fs: Box<dyn FileSystem>,
    on_done: DoneCallback,
    /// Modal popups must be opened once from outside `BeginPopupModal`.
    pub(crate) popup_pending: bool,
}

impl fmt::Debug for FileWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWindow")
            .field("title", &self.title)
            .field("layer", &self.layer)
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl FileWindow {
    /// Start building a window titled `title` listing `dir`.
    ///
    /// The callback receives the chosen path. State the callback needs is
    /// captured by the closure.
    pub fn builder<F>(
        title: impl Into<String>,
        dir: impl Into<PathBuf>,
        on_done: F,
    ) -> FileWindowBuilder
    where
        F: FnMut(&Path) + 'static,
    {
        FileWindowBuilder::new(title, dir).on_done(on_done)
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Modal or floating.
    pub fn layer(&self) -> WindowLayer {
        self.layer
    }

    /// UI-independent state.
    pub fn core(&self) -> &FileWindowCore {
        &self.core
    }

    /// Whether the window is shown.
    pub fn is_visible(&self) -> bool {
        self.core.is_visible()
    }

    /// Show the window. The directory is rescanned on the next frame.
    pub fn show(&mut self) {
        if !self.core.is_visible() {
            self.popup_pending = true;
        }
        self.core.show();
    }

    /// Hide the window without running the callback.
    pub fn hide(&mut self) {
        self.core.cancel();
        self.popup_pending = false;
    }

    /// Rescan the directory if the debounce interval has elapsed.
    pub fn refresh(&mut self, now: Instant) -> bool {
        self.core.refresh(self.fs.as_ref(), now)
    }

    /// Click on a listed entry; a double click confirms.
    pub fn select_entry(&mut self, name: &str, now: Instant) -> SelectOutcome {
        let outcome = self.core.select_entry(name, now);
        if outcome == SelectOutcome::RequestConfirm {
            self.confirm();
        }
        outcome
    }

    /// Replace the file name text.
    pub fn set_file_name(&mut self, text: &str) {
        self.core.set_file_name(text);
    }

    /// Confirm the current file name, running the callback on completion.
    pub fn confirm(&mut self) -> ConfirmOutcome {
        let outcome = self.core.confirm(self.fs.as_ref());
        if let ConfirmOutcome::Completed(path) = &outcome {
            self.popup_pending = false;
            (self.on_done)(path);
        }
        outcome
    }

    /// Cancel: hide without running the callback.
    pub fn cancel(&mut self) {
        self.hide();
    }
}

/// Builder for [`FileWindow`].
pub struct FileWindowBuilder {
    title: String,
    dir: PathBuf,
    filter: ExtensionFilter,
    mode: DialogMode,
    layer: WindowLayer,
    config: FileWindowConfig,
    fs: Box<dyn FileSystem>,
    on_done: Option<DoneCallback>,
}

impl fmt::Debug for FileWindowBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWindowBuilder")
            .field("title", &self.title)
            .field("dir", &self.dir)
            .field("filter", &self.filter)
            .field("mode", &self.mode)
            .field("layer", &self.layer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FileWindowBuilder {
    /// Builder with no callback yet; [`build`](Self::build) fails until one is set.
    pub fn new(title: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            dir: dir.into(),
            filter: ExtensionFilter::any(),
            mode: DialogMode::Open,
            layer: WindowLayer::Modal,
            config: FileWindowConfig::default(),
            fs: Box::new(StdFileSystem),
            on_done: None,
        }
    }

    /// Semicolon-separated extension patterns, e.g. `"txt;png"`.
    pub fn filter(mut self, patterns: &str) -> Self {
        self.filter = ExtensionFilter::parse(patterns);
        self
    }

    /// Open or save.
    pub fn mode(mut self, mode: DialogMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(Save)` / `mode(Open)`.
    pub fn save(self, yes: bool) -> Self {
        self.mode(if yes { DialogMode::Save } else { DialogMode::Open })
    }

    /// Modal or floating host window.
    pub fn layer(mut self, layer: WindowLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Shorthand for `layer(Modal)` / `layer(Floating)`.
    pub fn modal(self, yes: bool) -> Self {
        self.layer(if yes {
            WindowLayer::Modal
        } else {
            WindowLayer::Floating
        })
    }

    /// Geometry and timing.
    pub fn config(mut self, config: FileWindowConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the listing source (defaults to [`StdFileSystem`]).
    pub fn file_system(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    /// Completion callback.
    pub fn on_done<F>(mut self, on_done: F) -> Self
    where
        F: FnMut(&Path) + 'static,
    {
        self.on_done = Some(Box::new(on_done));
        self
    }

    /// Build a hidden window.
    pub fn build(self) -> Result<FileWindow, FileWindowError> {
        if self.title.contains('\0') {
            return Err(FileWindowError::InvalidTitle(self.title));
        }
        let on_done = self.on_done.ok_or(FileWindowError::MissingCallback)?;
        Ok(FileWindow {
            title: self.title,
            layer: self.layer,
            core: FileWindowCore::new(self.mode, self.dir, self.filter, self.config),
            fs: self.fs,
            on_done,
            popup_pending: false,
        })
    }
}
