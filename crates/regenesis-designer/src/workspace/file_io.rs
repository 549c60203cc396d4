//! File I/O operations (save, load) for workspace state.

use std::path::Path;

use regenesis_core::Result;

use super::{EditMode, WorkspaceState};
use crate::serialization::{ProjectDocument, ViewportState};

impl WorkspaceState {
    /// Snapshot of the tree, boundaries and view as a project document.
    pub fn to_document(&self) -> ProjectDocument {
        let mut polygons: Vec<_> = self
            .tree
            .walk()
            .into_iter()
            .filter_map(|(_, node)| {
                self.polygons
                    .get(&node.id)
                    .map(|polygon| (node.id, polygon.clone()))
            })
            .collect();
        // A boundary being redrawn is saved as it was before the redraw.
        if let (EditMode::DrawPolygon, Some(region), Some(previous)) =
            (self.mode, self.selected, self.replaced.as_ref())
        {
            polygons.push((region, previous.clone()));
        }

        let mut document = ProjectDocument::new(self.tree.clone(), polygons);
        document.viewport = ViewportState {
            zoom: self.viewport.zoom(),
            pan_x: self.viewport.pan_x(),
            pan_y: self.viewport.pan_y(),
        };
        document
    }

    /// Replaces the workspace contents with `document`.
    ///
    /// Boundaries keyed by nodes that are not regions of the tree are dropped
    /// with a warning. The first project is selected and the saved view
    /// restored. Nothing changes when a project's attributes are invalid.
    pub fn from_document(&mut self, document: ProjectDocument) -> Result<()> {
        document.tree.validate()?;
        let first = self.load_tree(document.tree);

        for (id, polygon) in document.polygons {
            match self.tree.get(id) {
                Some(node) if node.is_region() => {
                    self.polygons.insert(id, polygon);
                }
                _ => tracing::warn!("Dropping boundary for unknown region {}", id),
            }
        }

        if first.is_some() {
            self.select_node(first);
        }
        self.viewport.set_zoom(document.viewport.zoom);
        self.viewport
            .set_pan(document.viewport.pan_x, document.viewport.pan_y);
        self.is_modified = false;
        Ok(())
    }

    /// Save project to file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.to_document().save_to_file(&path)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Load project from file.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let document = ProjectDocument::load_from_file(&path)?;
        self.from_document(document)?;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        tracing::info!("Loaded project from {}", path.as_ref().display());
        Ok(())
    }

    /// Get display name for the window title.
    pub fn display_name(&self) -> String {
        let project_name = self
            .active_project
            .and_then(|id| self.tree.get(id))
            .map(|node| node.name.as_str());
        let name = self
            .current_file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|n| n.to_str())
            .or(project_name)
            .unwrap_or("Untitled");

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }
}
