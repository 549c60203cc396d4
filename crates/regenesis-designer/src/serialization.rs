//! Project file format.
//!
//! A project file is pretty-printed JSON holding the whole tree, the region
//! boundaries keyed by node id and the last viewport.

use std::path::Path;

use chrono::{DateTime, Utc};
use regenesis_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::polygon::RegionPolygon;
use crate::project::{NodeId, ProjectTree};

/// Project file format version
pub const FILE_FORMAT_VERSION: &str = "1.0";

/// Default extension for project files.
pub const FILE_EXTENSION: &str = "regenesis";

/// Viewport state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Complete project file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub format_version: String,
    pub saved_at: DateTime<Utc>,
    pub tree: ProjectTree,
    #[serde(default)]
    pub polygons: Vec<(NodeId, RegionPolygon)>,
    #[serde(default)]
    pub viewport: ViewportState,
}

impl ProjectDocument {
    pub fn new(tree: ProjectTree, polygons: Vec<(NodeId, RegionPolygon)>) -> Self {
        Self {
            format_version: FILE_FORMAT_VERSION.to_string(),
            saved_at: Utc::now(),
            tree,
            polygons,
            viewport: ViewportState::default(),
        }
    }

    /// Save project to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        tracing::info!("Saved project to {}", path.as_ref().display());
        Ok(())
    }

    /// Load project from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parses a document, rejecting unknown format versions and project
    /// attributes out of range.
    pub fn from_json(content: &str) -> Result<Self> {
        let document: ProjectDocument = serde_json::from_str(content)?;
        if document.format_version != FILE_FORMAT_VERSION {
            return Err(Error::other(format!(
                "Unsupported project file version '{}' (expected {})",
                document.format_version, FILE_FORMAT_VERSION
            )));
        }
        document.tree.validate()?;
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::sample_project;

    #[test]
    fn test_rejects_unknown_version() {
        let mut doc = ProjectDocument::new(sample_project(), Vec::new());
        doc.format_version = "9.9".to_string();
        let json = serde_json::to_string(&doc).unwrap();
        let err = ProjectDocument::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("9.9"));
    }

    #[test]
    fn test_viewport_defaults_when_missing() {
        let doc = ProjectDocument::new(sample_project(), Vec::new());
        let mut value = serde_json::to_value(&doc).unwrap();
        value.as_object_mut().unwrap().remove("viewport");
        let back: ProjectDocument = serde_json::from_value(value).unwrap();
        assert_eq!(back.viewport, ViewportState::default());
    }
}
