//! 2D geometry helpers for boundary editing.
//!
//! All functions are unit-agnostic: they work the same on world points and on
//! screen points wrapped in [`Point`].

use crate::model::Point;

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Distance from the point to `closest`.
    pub distance: f64,
    /// Closest point on the segment.
    pub closest: Point,
    /// Position of `closest` along the segment, in `[0, 1]`.
    pub t: f64,
}

/// Distance from `p` to the segment `a`-`b`.
///
/// A degenerate segment (`a == b`) measures the distance to `a`.
pub fn distance_point_to_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq <= f64::EPSILON {
        return SegmentProjection {
            distance: p.distance_to(&a),
            closest: a,
            t: 0.0,
        };
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    SegmentProjection {
        distance: p.distance_to(&closest),
        closest,
        t,
    }
}

/// Finds the segment of `vertices` closest to `p`.
///
/// Segment `i` joins vertex `i` and vertex `i + 1`; when `closed` the last
/// segment wraps back to vertex 0. Returns `None` for fewer than two vertices.
pub fn nearest_segment(
    vertices: &[Point],
    p: Point,
    closed: bool,
) -> Option<(usize, SegmentProjection)> {
    if vertices.len() < 2 {
        return None;
    }

    let segment_count = if closed {
        vertices.len()
    } else {
        vertices.len() - 1
    };

    (0..segment_count)
        .map(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            (i, distance_point_to_segment(p, a, b))
        })
        .min_by(|(_, l), (_, r)| l.distance.total_cmp(&r.distance))
}

/// Index of the vertex nearest to `p`, with its distance.
pub fn nearest_vertex(vertices: &[Point], p: Point) -> Option<(usize, f64)> {
    vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.distance_to(&p)))
        .min_by(|(_, l), (_, r)| l.total_cmp(r))
}

fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Absolute polygon area (shoelace formula).
pub fn polygon_area(vertices: &[Point]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    signed_area(vertices).abs()
}

/// Length of the closed outline.
pub fn polygon_perimeter(vertices: &[Point]) -> f64 {
    match vertices.len() {
        0 | 1 => 0.0,
        n => (0..n)
            .map(|i| vertices[i].distance_to(&vertices[(i + 1) % n]))
            .sum(),
    }
}

/// Area-weighted centroid; degenerate polygons fall back to the vertex mean.
pub fn polygon_centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.is_empty() {
        return None;
    }

    let area = signed_area(vertices);
    if area.abs() < 1e-12 {
        let n = vertices.len() as f64;
        let (sx, sy) = vertices
            .iter()
            .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
        return Some(Point::new(sx / n, sy / n));
    }

    let n = vertices.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Even-odd ray casting test.
pub fn point_in_polygon(vertices: &[Point], p: Point) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if ((vi.y > p.y) != (vj.y > p.y))
            && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Flattens vertices into `[x0, y0, x1, y1, ...]` for drawing back-ends.
pub fn flatten(vertices: &[Point]) -> Vec<f64> {
    vertices.iter().flat_map(|v| [v.x, v.y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ]
    }

    #[test]
    fn test_distance_to_segment_interior() {
        let proj = distance_point_to_segment(
            Point::new(50.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((proj.distance - 10.0).abs() < 1e-9);
        assert_eq!(proj.closest, Point::new(50.0, 0.0));
        assert!((proj.t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_distance_to_segment_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        let before = distance_point_to_segment(Point::new(-3.0, 4.0), a, b);
        assert!((before.distance - 5.0).abs() < 1e-9);
        assert_eq!(before.closest, a);
        assert_eq!(before.t, 0.0);

        let after = distance_point_to_segment(Point::new(13.0, 4.0), a, b);
        assert!((after.distance - 5.0).abs() < 1e-9);
        assert_eq!(after.closest, b);
        assert_eq!(after.t, 1.0);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = Point::new(2.0, 2.0);
        let proj = distance_point_to_segment(Point::new(5.0, 6.0), a, a);
        assert!((proj.distance - 5.0).abs() < 1e-9);
        assert_eq!(proj.closest, a);
    }

    #[test]
    fn test_nearest_segment_wraps_when_closed() {
        let verts = square();
        // Close to the left edge, which is the closing segment (3 -> 0).
        let (idx, proj) = nearest_segment(&verts, Point::new(2.0, 50.0), true).unwrap();
        assert_eq!(idx, 3);
        assert!((proj.distance - 2.0).abs() < 1e-9);

        // Open polyline has no closing edge; nearest is the top or bottom edge.
        let (idx, _) = nearest_segment(&verts, Point::new(2.0, 50.0), false).unwrap();
        assert_ne!(idx, 3);
    }

    #[test]
    fn test_nearest_segment_needs_two_vertices() {
        assert!(nearest_segment(&[Point::new(0.0, 0.0)], Point::new(1.0, 1.0), true).is_none());
    }

    #[test]
    fn test_nearest_vertex() {
        let verts = square();
        let (idx, dist) = nearest_vertex(&verts, Point::new(2.0, 3.0)).unwrap();
        assert_eq!(idx, 0);
        assert!(dist < 10.0);
    }

    #[test]
    fn test_area_perimeter_centroid() {
        let verts = square();
        assert!((polygon_area(&verts) - 10_000.0).abs() < 1e-9);
        assert!((polygon_perimeter(&verts) - 400.0).abs() < 1e-9);
        assert_eq!(polygon_centroid(&verts), Some(Point::new(50.0, 50.0)));

        // Winding order does not change the absolute area.
        let mut reversed = verts.clone();
        reversed.reverse();
        assert!((polygon_area(&reversed) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_of_collinear_points_is_mean() {
        let verts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        assert_eq!(polygon_centroid(&verts), Some(Point::new(1.0, 0.0)));
        assert_eq!(polygon_area(&verts), 0.0);
    }

    #[test]
    fn test_point_in_polygon() {
        let verts = square();
        assert!(point_in_polygon(&verts, Point::new(50.0, 50.0)));
        assert!(!point_in_polygon(&verts, Point::new(150.0, 50.0)));
        assert!(!point_in_polygon(&verts[..2], Point::new(50.0, 0.0)));
    }

    #[test]
    fn test_flatten_coordinates() {
        let verts = vec![
            Point::new(10.0, 20.0),
            Point::new(30.0, 40.0),
            Point::new(50.0, 60.0),
        ];
        let flat = flatten(&verts);
        assert_eq!(flat, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
        assert_eq!(flat.len(), verts.len() * 2);
    }
}
