//! # ReGenesis UI
//!
//! GTK4/libadwaita front-end: the main window with the project tree,
//! properties panel, workspace canvas and console, plus the preferences and
//! plant database dialogs.

pub mod gtk_app;
pub mod helpers;
pub mod ui;

pub use regenesis_designer::WorkspaceState;
pub use regenesis_settings::PreferencesManager;
