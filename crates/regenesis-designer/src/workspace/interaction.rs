//! Pointer interaction: vertex drags, pans, clicks and boundary redraw.
//!
//! All positions passed in are canvas pixels. A press only turns into a
//! drag once the pointer has moved more than [`DRAG_THRESHOLD_PX`] along
//! either axis; anything less is treated as a click on release.

use regenesis_core::constants::{DRAG_THRESHOLD_PX, EDGE_HIT_DISTANCE_PX, VERTEX_HIT_RADIUS_PX};
use regenesis_core::{Error, Result};

use super::{EditMode, WorkspaceState};
use crate::geometry::SegmentProjection;
use crate::model::Point;
use crate::polygon::RegionPolygon;
use crate::project::NodeId;

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureKind {
    /// Dragging vertex `index` of the active boundary.
    Vertex(usize),
    /// Panning the view, or a click once released without moving.
    Pan,
}

/// An in-progress press/drag/release sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Gesture {
    kind: GestureKind,
    start: (f64, f64),
    last: (f64, f64),
    dragging: bool,
}

/// What a completed press/release sequence did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// No press was in progress, or the click had no effect.
    Nothing,
    /// The view was panned.
    Panned,
    /// A vertex of a region boundary was moved.
    VertexMoved { region: NodeId, index: usize },
    /// A point was appended to the boundary being drawn.
    PointAdded { count: usize },
    /// The boundary being drawn was closed on its first point.
    DrawingClosed { region: NodeId },
    /// A click picked a region on the canvas.
    RegionSelected(NodeId),
}

impl WorkspaceState {
    /// Starts a gesture: a vertex drag when pressing on a vertex of the
    /// active boundary, otherwise a pending pan/click.
    pub fn pointer_pressed(&mut self, x: f64, y: f64) {
        let kind = match self.mode {
            EditMode::EditPolygon => self
                .hit_test_vertex(x, y)
                .map(GestureKind::Vertex)
                .unwrap_or(GestureKind::Pan),
            EditMode::Idle | EditMode::DrawPolygon => GestureKind::Pan,
        };
        self.gesture = Some(Gesture {
            kind,
            start: (x, y),
            last: (x, y),
            dragging: false,
        });
    }

    /// Updates the current gesture. Returns `true` when the view or the
    /// model changed and the canvas needs a redraw.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        let Some(mut gesture) = self.gesture else {
            return false;
        };

        if !gesture.dragging {
            let dx = (x - gesture.start.0).abs();
            let dy = (y - gesture.start.1).abs();
            if dx <= DRAG_THRESHOLD_PX && dy <= DRAG_THRESHOLD_PX {
                return false;
            }
            gesture.dragging = true;
        }

        match gesture.kind {
            GestureKind::Vertex(index) => {
                let world = self.viewport.screen_to_world(x, y);
                if let Some(polygon) = self.active_polygon_mut() {
                    if let Err(e) = polygon.move_vertex(index, world) {
                        tracing::warn!("Vertex drag failed: {}", e);
                    }
                }
            }
            GestureKind::Pan => {
                self.viewport
                    .pan_by(x - gesture.last.0, y - gesture.last.1);
            }
        }

        gesture.last = (x, y);
        self.gesture = Some(gesture);
        true
    }

    /// Ends the current gesture.
    ///
    /// A release without a drag is a click: in draw mode it places a point
    /// (or closes the boundary on its first point), in idle mode it selects
    /// the region under the cursor.
    pub fn pointer_released(&mut self, x: f64, y: f64) -> PointerOutcome {
        let Some(gesture) = self.gesture.take() else {
            return PointerOutcome::Nothing;
        };

        if gesture.dragging {
            return match gesture.kind {
                GestureKind::Vertex(index) => match self.selected {
                    Some(region) => {
                        self.is_modified = true;
                        PointerOutcome::VertexMoved { region, index }
                    }
                    None => PointerOutcome::Nothing,
                },
                GestureKind::Pan => PointerOutcome::Panned,
            };
        }

        match self.mode {
            EditMode::DrawPolygon => self.place_drawing_point(x, y),
            EditMode::Idle => {
                let world = self.viewport.screen_to_world(x, y);
                match self.region_at(world) {
                    Some(region) => {
                        self.select_node(Some(region));
                        PointerOutcome::RegionSelected(region)
                    }
                    None => PointerOutcome::Nothing,
                }
            }
            EditMode::EditPolygon => PointerOutcome::Nothing,
        }
    }

    /// Drops any in-progress gesture without applying a click.
    pub fn cancel_gesture(&mut self) {
        self.gesture = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some_and(|g| g.dragging)
    }

    fn place_drawing_point(&mut self, x: f64, y: f64) -> PointerOutcome {
        if self.drawing.len() >= regenesis_core::constants::MIN_POLYGON_VERTICES {
            let (fx, fy) = self.viewport.world_to_screen(self.drawing[0]);
            if (fx - x).hypot(fy - y) <= VERTEX_HIT_RADIUS_PX {
                return match (self.selected, self.finish_drawing()) {
                    (Some(region), Ok(())) => PointerOutcome::DrawingClosed { region },
                    (_, Err(e)) => {
                        tracing::warn!("Could not close boundary: {}", e);
                        PointerOutcome::Nothing
                    }
                    (None, Ok(())) => PointerOutcome::Nothing,
                };
            }
        }

        self.drawing.push(self.viewport.screen_to_world(x, y));
        PointerOutcome::PointAdded {
            count: self.drawing.len(),
        }
    }

    /// Inserts a vertex on the edge of the active boundary under the cursor.
    ///
    /// Returns the new vertex index. Double-clicking on an existing vertex
    /// does nothing.
    pub fn double_click(&mut self, x: f64, y: f64) -> Option<usize> {
        if self.mode != EditMode::EditPolygon || self.hit_test_vertex(x, y).is_some() {
            return None;
        }
        let (edge, projection) = self.hit_test_edge(x, y)?;
        let index = edge + 1;
        let polygon = self.active_polygon_mut()?;
        match polygon.insert_vertex(index, projection.closest) {
            Ok(()) => {
                self.is_modified = true;
                tracing::debug!("Inserted vertex {} at {:?}", index, projection.closest);
                Some(index)
            }
            Err(e) => {
                tracing::warn!("Vertex insert failed: {}", e);
                None
            }
        }
    }

    /// Deletes the vertex under the cursor (edit mode) or the last placed
    /// point (draw mode).
    ///
    /// Returns the removed point, `None` when nothing was under the cursor,
    /// or [`Error::TooFewVertices`] when the boundary is already a triangle.
    pub fn secondary_click(&mut self, x: f64, y: f64) -> Result<Option<Point>> {
        match self.mode {
            EditMode::EditPolygon => {
                let Some(index) = self.hit_test_vertex(x, y) else {
                    return Ok(None);
                };
                let polygon = self
                    .active_polygon_mut()
                    .ok_or_else(|| Error::other("No active boundary"))?;
                let removed = polygon.remove_vertex(index)?;
                self.is_modified = true;
                Ok(Some(removed))
            }
            EditMode::DrawPolygon => Ok(self.drawing.pop()),
            EditMode::Idle => Ok(None),
        }
    }

    /// Zooms one step around the cursor.
    pub fn scroll_zoom(&mut self, x: f64, y: f64, zoom_in: bool) {
        if zoom_in {
            self.viewport.zoom_in_at(x, y);
        } else {
            self.viewport.zoom_out_at(x, y);
        }
    }

    /// Index of the active boundary's vertex within the pick radius of the
    /// cursor, measured in pixels.
    pub fn hit_test_vertex(&self, x: f64, y: f64) -> Option<usize> {
        let polygon = self.active_polygon()?;
        polygon
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let (sx, sy) = self.viewport.world_to_screen(*v);
                (i, (sx - x).hypot(sy - y))
            })
            .filter(|(_, d)| *d <= VERTEX_HIT_RADIUS_PX)
            .min_by(|(_, l), (_, r)| l.total_cmp(r))
            .map(|(i, _)| i)
    }

    /// Edge of the active boundary within [`EDGE_HIT_DISTANCE_PX`] of the
    /// cursor, with the projected world point.
    pub fn hit_test_edge(&self, x: f64, y: f64) -> Option<(usize, SegmentProjection)> {
        let polygon = self.active_polygon()?;
        let world = self.viewport.screen_to_world(x, y);
        let tolerance = self.viewport.screen_distance_to_world(EDGE_HIT_DISTANCE_PX);
        polygon.nearest_edge(world, tolerance)
    }

    /// Clears the selected region's boundary and starts placing new points.
    pub fn begin_redraw(&mut self) -> Result<()> {
        let region = self.require_selected_region()?;
        if self.mode == EditMode::DrawPolygon {
            self.drawing.clear();
            return Ok(());
        }
        self.replaced = self.polygons.remove(&region);
        self.drawing.clear();
        self.gesture = None;
        self.mode = EditMode::DrawPolygon;
        tracing::debug!("Redrawing boundary of {}", region);
        Ok(())
    }

    /// Turns the placed points into the selected region's boundary.
    pub fn finish_drawing(&mut self) -> Result<()> {
        if self.mode != EditMode::DrawPolygon {
            return Err(Error::other("Not drawing a boundary"));
        }
        let region = self.require_selected_region()?;
        let polygon = RegionPolygon::new(self.drawing.clone())?;
        self.polygons.insert(region, polygon);
        self.drawing.clear();
        self.replaced = None;
        self.gesture = None;
        self.mode = EditMode::EditPolygon;
        self.is_modified = true;
        Ok(())
    }

    /// Abandons a redraw, restoring the previous boundary.
    pub fn cancel_drawing(&mut self) {
        if self.mode != EditMode::DrawPolygon {
            return;
        }
        if let (Some(region), Some(previous)) = (self.selected, self.replaced.take()) {
            self.polygons.insert(region, previous);
        }
        self.drawing.clear();
        self.gesture = None;
        self.mode = if self.selected.is_some() {
            EditMode::EditPolygon
        } else {
            EditMode::Idle
        };
    }
}
