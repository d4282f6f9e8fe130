#![deny(missing_docs)]
//! Open/save file window for `dear-imgui-rs`.
//!
//! The window lists the regular files of a single directory that match a
//! semicolon-separated extension filter (e.g. `"txt;png"`), lets the user pick
//! or type a file name, and hands the joined path to a completion callback.
//! It is meant for hosts that own the render loop and only give you a
//! per-frame `Ui`, such as simulator plugins.
//!
//! The selection/confirmation state machine lives in [`FileWindowCore`] and
//! does not need an ImGui context, so hosts can drive it from their own
//! widgets and tests can exercise it directly.
//!
//! ```no_run
//! use dear_file_window::{DialogMode, FileWindow, WindowLayer};
//! # use dear_imgui_rs::*;
//! # let mut ctx = Context::create();
//! let mut window = FileWindow::builder("Load flight plan", "/tmp/plans", |path| {
//!     eprintln!("picked {}", path.display());
//! })
//! .filter("fms;fpl")
//! .mode(DialogMode::Open)
//! .layer(WindowLayer::Floating)
//! .build()
//! .expect("valid title");
//! window.show();
//!
//! // Every frame:
//! # let ui = ctx.frame();
//! window.draw(ui);
//! ```

mod core;
mod dialog_core;
mod filter;
mod fs;
mod listing;
mod refresh;
#[cfg(feature = "imgui")]
mod ui;
mod window;

pub use crate::core::{DialogMode, FileWindowConfig, FileWindowError, WindowLayer};
pub use dialog_core::{ConfirmOutcome, DialogPhase, FileWindowCore, SelectOutcome};
pub use filter::ExtensionFilter;
pub use fs::{FileSystem, FsEntry, FsMetadata, StdFileSystem};
pub use listing::{DirectoryEntry, DirectoryListing};
pub use refresh::RefreshTimer;
pub use window::{FileWindow, FileWindowBuilder};
