//! Region boundary polygons.
//!
//! Vertices are stored in world units so a boundary stays attached to the
//! ground when the view is panned or zoomed.

use regenesis_core::constants::MIN_POLYGON_VERTICES;
use regenesis_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::{self, SegmentProjection};
use crate::model::{Bounds, Point};

/// Closed boundary of a region. Always holds at least three vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct RegionPolygon {
    vertices: Vec<Point>,
}

impl RegionPolygon {
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return Err(Error::TooFewVertices {
                count: vertices.len(),
                minimum: MIN_POLYGON_VERTICES,
            });
        }
        Ok(Self { vertices })
    }

    /// Four-corner polygon, clockwise on screen starting at the top-left.
    pub fn rectangle(bounds: Bounds) -> Self {
        Self {
            vertices: vec![
                Point::new(bounds.min_x, bounds.min_y),
                Point::new(bounds.max_x, bounds.min_y),
                Point::new(bounds.max_x, bounds.max_y),
                Point::new(bounds.min_x, bounds.max_y),
            ],
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.vertices.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Never true for a constructed polygon; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Whether a vertex may still be removed.
    pub fn can_remove_vertex(&self) -> bool {
        self.vertices.len() > MIN_POLYGON_VERTICES
    }

    pub fn bounds(&self) -> Bounds {
        // At least three vertices, so never empty.
        Bounds::from_points(&self.vertices).unwrap_or(Bounds::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.vertices)
    }

    pub fn perimeter(&self) -> f64 {
        geometry::polygon_perimeter(&self.vertices)
    }

    pub fn centroid(&self) -> Point {
        geometry::polygon_centroid(&self.vertices).unwrap_or_default()
    }

    pub fn contains(&self, p: Point) -> bool {
        geometry::point_in_polygon(&self.vertices, p)
    }

    pub fn flattened(&self) -> Vec<f64> {
        geometry::flatten(&self.vertices)
    }

    /// Inserts `point` so it becomes vertex `index`.
    pub fn insert_vertex(&mut self, index: usize, point: Point) -> Result<()> {
        if index > self.vertices.len() {
            return Err(Error::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        self.vertices.insert(index, point);
        Ok(())
    }

    pub fn remove_vertex(&mut self, index: usize) -> Result<Point> {
        if index >= self.vertices.len() {
            return Err(Error::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        if !self.can_remove_vertex() {
            return Err(Error::TooFewVertices {
                count: self.vertices.len() - 1,
                minimum: MIN_POLYGON_VERTICES,
            });
        }
        Ok(self.vertices.remove(index))
    }

    pub fn move_vertex(&mut self, index: usize, point: Point) -> Result<()> {
        let len = self.vertices.len();
        let vertex = self
            .vertices
            .get_mut(index)
            .ok_or(Error::VertexOutOfRange { index, len })?;
        *vertex = point;
        Ok(())
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            v.x += dx;
            v.y += dy;
        }
    }

    /// Nearest vertex within `max_distance` (world units).
    pub fn nearest_vertex(&self, p: Point, max_distance: f64) -> Option<usize> {
        geometry::nearest_vertex(&self.vertices, p)
            .filter(|(_, d)| *d <= max_distance)
            .map(|(i, _)| i)
    }

    /// Nearest edge within `max_distance` (world units).
    ///
    /// The returned index is the edge's start vertex; a vertex inserted on it
    /// goes to `index + 1`.
    pub fn nearest_edge(&self, p: Point, max_distance: f64) -> Option<(usize, SegmentProjection)> {
        geometry::nearest_segment(&self.vertices, p, true)
            .filter(|(_, proj)| proj.distance <= max_distance)
    }
}

impl TryFrom<Vec<Point>> for RegionPolygon {
    type Error = Error;

    fn try_from(vertices: Vec<Point>) -> Result<Self> {
        Self::new(vertices)
    }
}

impl From<RegionPolygon> for Vec<Point> {
    fn from(polygon: RegionPolygon) -> Self {
        polygon.vertices
    }
}
