//! File pickers and message dialogs.
//!
//! File selection goes through `rfd`, which uses the desktop portal where
//! available and falls back to the toolkit's own chooser.

use gtk4::prelude::*;
use gtk4::{ButtonsType, MessageDialog, MessageType, Widget};
use regenesis_designer::serialization::FILE_EXTENSION;
use std::path::{Path, PathBuf};

const PROJECT_FILTER: &str = "ReGenesis Project";
const JSON_FILTER: &str = "JSON";

/// Asks for a project file to open.
pub fn pick_project_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Project")
        .add_filter(PROJECT_FILTER, &[FILE_EXTENSION])
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Asks where to save a project, suggesting `current` when known.
pub fn save_project_file(current: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Save Project As")
        .add_filter(PROJECT_FILTER, &[FILE_EXTENSION]);

    match current {
        Some(path) => {
            if let Some(dir) = path.parent() {
                dialog = dialog.set_directory(dir);
            }
            if let Some(name) = path.file_name() {
                dialog = dialog.set_file_name(name.to_string_lossy());
            }
        }
        None => {
            dialog = dialog.set_file_name(format!("{}.{}", default_name, FILE_EXTENSION));
        }
    }

    dialog.save_file().map(|path| with_extension(path, FILE_EXTENSION))
}

pub fn pick_json_file(title: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(JSON_FILTER, &["json"])
        .pick_file()
}

pub fn save_json_file(title: &str, default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter(JSON_FILTER, &["json"])
        .set_file_name(default_name)
        .save_file()
        .map(|path| with_extension(path, "json"))
}

/// Appends `extension` unless the path already carries it.
pub fn with_extension(path: PathBuf, extension: &str) -> PathBuf {
    let has_it = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if has_it {
        path
    } else {
        let mut raw = path.into_os_string();
        raw.push(".");
        raw.push(extension);
        PathBuf::from(raw)
    }
}

/// Try to obtain the parent `gtk4::Window` from any widget.
pub fn parent_window(widget: &impl IsA<Widget>) -> Option<gtk4::Window> {
    widget
        .root()
        .and_then(|r| r.downcast::<gtk4::Window>().ok())
}

/// Show a modal error dialog that closes itself on OK.
pub fn show_error_dialog(title: &str, message: &str, parent: Option<&gtk4::Window>) {
    let mut builder = MessageDialog::builder()
        .message_type(MessageType::Error)
        .buttons(ButtonsType::Ok)
        .text(title)
        .secondary_text(message);

    if let Some(win) = parent {
        builder = builder.transient_for(win).modal(true);
    }

    let dialog = builder.build();
    dialog.connect_response(|d, _| d.destroy());
    dialog.present();
}
