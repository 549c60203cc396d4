//! Workspace state for UI integration.
//!
//! Owns the project tree, the region boundaries and the viewport, and turns
//! tree selection and pointer input into model edits. Split into:
//! - `interaction`: press / drag / release, clicks, scroll zoom, redraw
//! - `file_io`: project documents and save/load

mod file_io;
mod interaction;

use std::collections::HashMap;
use std::path::PathBuf;

use regenesis_core::{Error, Result};

use crate::model::{Bounds, Point};
use crate::polygon::RegionPolygon;
use crate::project::{NodeId, ProjectProperties, ProjectTree, RegionProperties};
use crate::viewport::Viewport;

pub use interaction::PointerOutcome;
use interaction::Gesture;

/// What pointer input currently does on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// A project (or nothing) is selected; clicks pick regions.
    #[default]
    Idle,
    /// A region is selected; its vertices can be dragged, inserted and deleted.
    EditPolygon,
    /// A region boundary is being redrawn point by point.
    DrawPolygon,
}

/// Workspace state shared by the tree, properties and canvas panels.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    tree: ProjectTree,
    polygons: HashMap<NodeId, RegionPolygon>,
    viewport: Viewport,
    selected: Option<NodeId>,
    active_project: Option<NodeId>,
    mode: EditMode,
    gesture: Option<Gesture>,
    drawing: Vec<Point>,
    /// Boundary replaced by an in-progress redraw, restored on cancel.
    replaced: Option<RegionPolygon>,
    current_file_path: Option<PathBuf>,
    is_modified: bool,
    /// Set once the widget has reported its real size.
    canvas_sized: bool,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            tree: ProjectTree::new(),
            polygons: HashMap::new(),
            viewport: Viewport::default(),
            selected: None,
            active_project: None,
            mode: EditMode::Idle,
            gesture: None,
            drawing: Vec::new(),
            replaced: None,
            current_file_path: None,
            is_modified: false,
            canvas_sized: false,
        }
    }

    pub fn tree(&self) -> &ProjectTree {
        &self.tree
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// True while a region is selected, whether editing or redrawing.
    pub fn drawing_mode(&self) -> bool {
        matches!(self.mode, EditMode::EditPolygon | EditMode::DrawPolygon)
    }

    /// True only while a boundary is being redrawn point by point.
    pub fn is_redrawing(&self) -> bool {
        self.mode == EditMode::DrawPolygon
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn active_project(&self) -> Option<NodeId> {
        self.active_project
    }

    /// Properties of the project currently shown on the canvas.
    pub fn active_project_properties(&self) -> Option<&ProjectProperties> {
        self.active_project
            .and_then(|id| self.tree.get(id))
            .and_then(|node| node.project_properties())
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn mark_modified(&mut self) {
        self.is_modified = true;
    }

    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    /// Replaces the whole tree, dropping boundaries and selection.
    ///
    /// Returns the first project, if any.
    pub fn load_tree(&mut self, tree: ProjectTree) -> Option<NodeId> {
        self.reset_interaction();
        self.tree = tree;
        self.polygons.clear();
        self.selected = None;
        self.active_project = None;
        self.mode = EditMode::Idle;
        self.current_file_path = None;
        self.is_modified = false;
        self.tree.roots().first().copied()
    }

    /// Starts over with a single default project, which becomes selected.
    pub fn new_project(&mut self, name: impl Into<String>) -> NodeId {
        let mut tree = ProjectTree::new();
        let id = tree.add_project(name, ProjectProperties::default());
        self.load_tree(tree);
        self.select_node(Some(id));
        id
    }

    /// Selects a tree node (or nothing) and switches the edit mode.
    ///
    /// Changing to another project re-fits the view. A region gets a default
    /// boundary the first time it is selected; later selections reuse it.
    pub fn select_node(&mut self, id: Option<NodeId>) {
        if self.mode == EditMode::DrawPolygon {
            self.cancel_drawing();
        }
        self.gesture = None;

        let Some(id) = id else {
            self.selected = None;
            self.mode = EditMode::Idle;
            return;
        };
        let Some(node) = self.tree.get(id) else {
            tracing::warn!("Ignoring selection of unknown node {}", id);
            return;
        };
        let is_region = node.is_region();

        let root = self.tree.find_root(id);
        if root != self.active_project {
            self.active_project = root;
            self.auto_zoom();
        }

        self.selected = Some(id);
        if is_region {
            if !self.polygons.contains_key(&id) {
                if let Some(polygon) = self.default_polygon_for(id) {
                    tracing::debug!("Created default boundary for region {}", id);
                    self.polygons.insert(id, polygon);
                }
            }
            self.mode = EditMode::EditPolygon;
        } else {
            self.mode = EditMode::Idle;
        }
    }

    /// Default boundary: a rectangle half the size of its container (the
    /// parent region's boundary, or the project rectangle), centred in it and
    /// shifted by the region's sibling index.
    pub fn default_polygon_for(&self, region: NodeId) -> Option<RegionPolygon> {
        let props = self.tree.project_of(region)?;
        let container = self
            .tree
            .parent(region)
            .and_then(|parent| self.polygons.get(&parent))
            .map(RegionPolygon::bounds)
            .unwrap_or_else(|| Bounds::new(0.0, 0.0, props.width, props.length));

        let index = self.tree.sibling_index(region).unwrap_or(0) as f64;
        let offset = index * container.width().min(container.height()) * 0.05;
        let center = container.center();
        let half_w = container.width() / 4.0;
        let half_h = container.height() / 4.0;
        Some(RegionPolygon::rectangle(Bounds::new(
            center.x - half_w + offset,
            center.y - half_h + offset,
            center.x + half_w + offset,
            center.y + half_h + offset,
        )))
    }

    /// Boundary of the selected region.
    pub fn active_polygon(&self) -> Option<&RegionPolygon> {
        let id = self.selected?;
        self.polygons.get(&id)
    }

    pub(crate) fn active_polygon_mut(&mut self) -> Option<&mut RegionPolygon> {
        let id = self.selected?;
        self.polygons.get_mut(&id)
    }

    pub fn polygon(&self, id: NodeId) -> Option<&RegionPolygon> {
        self.polygons.get(&id)
    }

    pub fn polygons(&self) -> &HashMap<NodeId, RegionPolygon> {
        &self.polygons
    }

    /// Boundaries belonging to the active project, in tree order.
    pub fn project_polygons(&self) -> Vec<(NodeId, &RegionPolygon)> {
        let Some(project) = self.active_project else {
            return Vec::new();
        };
        self.tree
            .walk()
            .into_iter()
            .filter(|(_, node)| self.tree.find_root(node.id) == Some(project))
            .filter_map(|(_, node)| self.polygons.get(&node.id).map(|p| (node.id, p)))
            .collect()
    }

    /// Points placed so far while redrawing a boundary.
    pub fn drawing_points(&self) -> &[Point] {
        &self.drawing
    }

    /// Fits the active project rectangle into the canvas.
    pub fn auto_zoom(&mut self) {
        let Some(props) = self.active_project_properties() else {
            return;
        };
        let bounds = Bounds::new(0.0, 0.0, props.width, props.length);
        self.viewport.fit_rect(bounds);
        tracing::debug!("Auto zoom: {}", self.viewport);
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    /// Size reported by the canvas widget.
    ///
    /// A project fitted before the widget was laid out is fitted again on
    /// the first report; later resizes keep the current view.
    pub fn canvas_resized(&mut self, width: f64, height: f64) {
        self.set_canvas_size(width, height);
        if width > 0.0 && height > 0.0 && !self.canvas_sized {
            self.canvas_sized = true;
            self.auto_zoom();
        }
    }

    /// Adds a region with default attributes under `parent`.
    pub fn add_region(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        let id = self
            .tree
            .add_region(parent, name, RegionProperties::default())?;
        self.is_modified = true;
        Ok(id)
    }

    /// Removes a node and its subtree, dropping their boundaries.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        if self.mode == EditMode::DrawPolygon {
            self.cancel_drawing();
        }
        let removed = self.tree.remove(id)?;
        for removed_id in &removed {
            self.polygons.remove(removed_id);
        }
        if self.selected.is_some_and(|s| removed.contains(&s)) {
            self.selected = None;
            self.mode = EditMode::Idle;
            self.gesture = None;
        }
        if self.active_project.is_some_and(|p| removed.contains(&p)) {
            self.active_project = None;
        }
        self.is_modified = true;
        Ok(removed)
    }

    /// Applies a properties-panel edit; resizing the active project re-fits
    /// the view.
    pub fn set_property(&mut self, id: NodeId, key: &str, raw: &str) -> Result<()> {
        self.tree.set_property(id, key, raw)?;
        self.is_modified = true;
        if Some(id) == self.active_project && matches!(key, "width" | "length") {
            self.auto_zoom();
        }
        Ok(())
    }

    /// Region of the active project whose boundary contains `world`.
    ///
    /// Deeper regions win over their ancestors.
    pub fn region_at(&self, world: Point) -> Option<NodeId> {
        let project = self.active_project?;
        self.tree
            .walk()
            .into_iter()
            .filter(|(_, node)| node.is_region())
            .filter(|(_, node)| self.tree.find_root(node.id) == Some(project))
            .filter(|(_, node)| {
                self.polygons
                    .get(&node.id)
                    .is_some_and(|polygon| polygon.contains(world))
            })
            .max_by_key(|(depth, _)| *depth)
            .map(|(_, node)| node.id)
    }

    fn require_selected_region(&self) -> Result<NodeId> {
        let id = self
            .selected
            .ok_or_else(|| Error::other("No region selected"))?;
        match self.tree.get(id) {
            Some(node) if node.is_region() => Ok(id),
            Some(_) => Err(Error::other("Selected node is not a region")),
            None => Err(Error::NodeNotFound(id.to_string())),
        }
    }

    fn reset_interaction(&mut self) {
        self.gesture = None;
        self.drawing.clear();
        self.replaced = None;
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}
