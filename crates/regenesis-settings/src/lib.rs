//! ReGenesis Settings Crate
//!
//! User preferences persisted as a flat JSON document in
//! `~/.regenesis/preferences.json`, plus the list of selectable themes.

pub mod error;
pub mod preferences;
pub mod theme;

pub use error::{PreferencesError, PreferencesResult};
pub use preferences::PreferencesManager;
pub use theme::{is_dark_theme, DEFAULT_THEME, THEMES};
