//! # ReGenesis
//!
//! A native-plant garden layout designer:
//! - Projects with nested regions and their soil, moisture and sun attributes
//! - Editable region boundaries on a pan/zoom canvas with rulers
//! - A native plant database with height and colour filters
//!
//! ## Architecture
//!
//! ReGenesis is organized as a workspace with multiple crates:
//!
//! 1. **regenesis-core** - Error type, units, interaction constants, console log
//! 2. **regenesis-designer** - Project tree, region polygons, viewport, rulers,
//!    workspace controller and project files
//! 3. **regenesis-settings** - User preferences
//! 4. **regenesis-plants** - Plant database
//! 5. **regenesis-ui** - GTK4/libadwaita front-end (the `gui` feature)

pub use regenesis_core::{ConsoleLevel, ConsoleLog, Error, LengthUnit, Result};
pub use regenesis_designer as designer;
pub use regenesis_designer::{
    sample_project, NodeId, ProjectDocument, ProjectTree, RegionPolygon, Viewport,
    WorkspaceState,
};
pub use regenesis_plants::{Plant, PlantDatabase};
pub use regenesis_settings::PreferencesManager;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with pretty console output filtered by
/// `RUST_LOG` (INFO when unset). Release builds on Windows have no console
/// and log to `regenesis.log` next to the executable instead.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(all(target_os = "windows", not(debug_assertions)))]
    {
        use std::fs::OpenOptions;

        let log_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let log_file = log_dir.join("regenesis.log");

        match OpenOptions::new().create(true).append(true).open(&log_file) {
            Ok(file) => {
                let fmt_layer = fmt::layer()
                    .with_writer(file)
                    .with_target(true)
                    .with_line_number(true)
                    .pretty();
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt_layer)
                    .try_init()?;
            }
            Err(_) => {
                tracing_subscriber::registry().with(env_filter).try_init()?;
            }
        }
    }

    #[cfg(not(all(target_os = "windows", not(debug_assertions))))]
    {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_metadata() {
        assert!(!VERSION.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_init_logging_twice_fails_cleanly() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_err());
    }
}
