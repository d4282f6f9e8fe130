use std::time::{Instant, SystemTime};

use dear_imgui_rs::{Condition, Ui, WindowFlags, sys};

use crate::core::{DialogMode, WindowLayer};
use crate::dialog_core::DialogPhase;
use crate::listing::DirectoryEntry;
use crate::window::FileWindow;

/// Height reserved below the file list for the name field and buttons.
const FOOTER_HEIGHT: f32 = 65.0;
/// Width reserved at the right of the button row.
const BUTTONS_WIDTH: f32 = 178.0;

/// What the user did this frame.
#[derive(Debug, Default)]
struct FrameActions {
    clicked: Option<String>,
    edited_name: Option<String>,
    confirm: bool,
    cancel: bool,
}

impl FileWindow {
    /// Draw the window for this frame. Does nothing while hidden.
    ///
    /// Rescans the directory when the refresh interval has elapsed and runs
    /// the completion callback if the user confirmed a file.
    pub fn draw(&mut self, ui: &Ui) {
        if !self.is_visible() {
            return;
        }
        self.refresh(Instant::now());

        let title = self.title.clone();
        let size = self.core.config().size;
        let position = self.core.config().position;
        match self.layer {
            WindowLayer::Floating => {
                ui.window(title)
                    .size(size, Condition::FirstUseEver)
                    .position(position, Condition::FirstUseEver)
                    .flags(WindowFlags::NO_COLLAPSE)
                    .build(|| self.draw_contents(ui));
            }
            WindowLayer::Modal => {
                if self.popup_pending {
                    ui.open_popup(&title);
                    self.popup_pending = false;
                }
                set_next_window_geometry(position, size, Condition::Appearing);
                let mut open = true;
                if let Some(_token) = ui
                    .begin_modal_popup_config(&title)
                    .opened(&mut open)
                    .flags(WindowFlags::NO_COLLAPSE | WindowFlags::NO_SAVED_SETTINGS)
                    .begin()
                {
                    self.draw_contents(ui);
                    if !self.is_visible() {
                        ui.close_current_popup();
                    }
                }
                // Title-bar close button.
                if !open {
                    self.cancel();
                }
            }
        }
    }

    fn draw_contents(&mut self, ui: &Ui) {
        let actions = self.draw_widgets(ui);
        self.apply(actions);
    }

    fn draw_widgets(&self, ui: &Ui) -> FrameActions {
        let mut actions = FrameActions::default();
        let [width, height] = ui.window_size();
        let selected = self.core.file_name();

        ui.child_window("dirlist")
            .size([width - 16.0, height - FOOTER_HEIGHT])
            .build(ui, || {
                for entry in self.core.entries() {
                    let is_sel = entry.name == selected;
                    if ui.selectable_config(&entry.name).selected(is_sel).build() {
                        actions.clicked = Some(entry.name.clone());
                    }
                    if ui.is_item_hovered() {
                        ui.tooltip_text(entry_tooltip(entry));
                    }
                    if is_sel {
                        ui.set_item_default_focus();
                    }
                }
            });

        ui.set_next_item_width(width - 20.0);
        let mut buf = selected.to_owned();
        ui.input_text("##filename", &mut buf).build();
        if buf != selected {
            actions.edited_name = Some(buf);
        }

        ui.dummy([(width - BUTTONS_WIDTH).max(1.0), 1.0]);
        ui.same_line();
        let confirm_label = match (self.core.phase(), self.core.mode()) {
            (DialogPhase::ConfirmOverwrite, _) => "Overwrite?",
            (_, DialogMode::Open) => DialogMode::Open.confirm_label(),
            (_, DialogMode::Save) => DialogMode::Save.confirm_label(),
        };
        actions.confirm = ui.button_with_size(confirm_label, [80.0, 0.0]);
        ui.same_line();
        actions.cancel = ui.button_with_size("Cancel", [70.0, 0.0]);
        actions
    }

    fn apply(&mut self, actions: FrameActions) {
        if let Some(name) = actions.clicked {
            self.select_entry(&name, Instant::now());
        }
        if let Some(name) = actions.edited_name {
            self.set_file_name(&name);
        }
        if actions.cancel {
            self.cancel();
        } else if actions.confirm && self.is_visible() {
            self.confirm();
        }
    }
}

/// Popups have no builder for size and position; set them on the next window.
fn set_next_window_geometry(position: [f32; 2], size: [f32; 2], cond: Condition) {
    unsafe {
        sys::igSetNextWindowPos(
            sys::ImVec2 {
                x: position[0],
                y: position[1],
            },
            cond as i32,
            sys::ImVec2 { x: 0.0, y: 0.0 },
        );
        sys::igSetNextWindowSize(
            sys::ImVec2 {
                x: size[0],
                y: size[1],
            },
            cond as i32,
        );
    }
}

fn entry_tooltip(entry: &DirectoryEntry) -> String {
    let size = entry.size.map(format_size).unwrap_or_else(|| "-".into());
    match entry.modified {
        Some(t) => format!("{size}\nModified: {}", format_modified(t)),
        None => size,
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

fn format_modified(t: SystemTime) -> String {
    let dt: chrono::DateTime<chrono::Local> = t.into();
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileWindowConfig;
    use crate::fs::mem::MemFs;
    use dear_imgui_rs::Context;

    #[test]
    fn modal_opens_at_configured_geometry() {
        let mut ctx = Context::create();
        {
            let io = ctx.io_mut();
            io.set_display_size([800.0, 600.0]);
            io.set_delta_time(1.0 / 60.0);
        }
        let _ = ctx.font_atlas_mut().build();
        let _ = ctx.set_ini_filename::<std::path::PathBuf>(None);

        let config = FileWindowConfig {
            size: [420.0, 360.0],
            position: [40.0, 30.0],
            ..FileWindowConfig::default()
        };
        let mut w = FileWindow::builder("Pick##geometry", "/data", |_| {})
            .config(config)
            .file_system(MemFs::with_files("/data", &["a.txt"]))
            .build()
            .unwrap();
        w.show();

        let ui = ctx.frame();
        w.draw(ui);
        assert!(w.is_visible());
        // Appending to the popup reads back the geometry it opened with.
        let token = ui.begin_modal_popup_config("Pick##geometry").begin();
        assert!(token.is_some());
        assert_eq!(ui.window_pos(), [40.0, 30.0]);
        assert_eq!(ui.window_size(), [420.0, 360.0]);
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn tooltip_without_metadata() {
        let e = DirectoryEntry {
            name: "a.txt".into(),
            size: None,
            modified: None,
        };
        assert_eq!(entry_tooltip(&e), "-");
    }
}
