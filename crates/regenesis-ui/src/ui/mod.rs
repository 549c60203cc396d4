//! GTK widgets making up the main window.

pub mod console_panel;
pub mod file_dialog;
pub mod plants_dialog;
pub mod preferences_dialog;
pub mod project_tree;
pub mod properties_panel;
pub mod workspace_canvas;

pub use console_panel::ConsolePanel;
pub use project_tree::ProjectTreePanel;
pub use properties_panel::PropertiesPanel;
pub use workspace_canvas::WorkspaceCanvas;
