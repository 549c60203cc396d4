use regenesis_core::Error;
use regenesis_designer::model::{Bounds, Point};
use regenesis_designer::{distance_point_to_segment, RegionPolygon};

fn triangle() -> RegionPolygon {
    RegionPolygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ])
    .unwrap()
}

#[test]
fn test_triangle_cannot_lose_a_vertex() {
    let mut poly = triangle();
    assert!(!poly.can_remove_vertex());
    for index in 0..3 {
        assert!(matches!(
            poly.remove_vertex(index),
            Err(Error::TooFewVertices { .. })
        ));
    }
    assert_eq!(poly.len(), 3);
}

#[test]
fn test_insert_then_remove_restores_shape() {
    let original = RegionPolygon::rectangle(Bounds::new(0.0, 0.0, 20.0, 10.0));
    let mut poly = original.clone();

    let (edge, proj) = poly.nearest_edge(Point::new(20.5, 5.0), 1.0).unwrap();
    assert_eq!(edge, 1);
    assert_eq!(proj.closest, Point::new(20.0, 5.0));

    poly.insert_vertex(edge + 1, proj.closest).unwrap();
    assert_eq!(poly.len(), 5);
    assert!((poly.area() - original.area()).abs() < 1e-9);

    let removed = poly.remove_vertex(edge + 1).unwrap();
    assert_eq!(removed, Point::new(20.0, 5.0));
    assert_eq!(poly, original);
}

#[test]
fn test_closing_edge_is_considered() {
    let poly = RegionPolygon::rectangle(Bounds::new(0.0, 0.0, 10.0, 10.0));
    // The left side joins vertex 3 back to vertex 0.
    let (edge, _) = poly.nearest_edge(Point::new(-0.5, 5.0), 1.0).unwrap();
    assert_eq!(edge, 3);
    assert!(poly.nearest_edge(Point::new(5.0, 5.0), 1.0).is_none());
}

#[test]
fn test_dragged_vertex_changes_bounds() {
    let mut poly = triangle();
    poly.move_vertex(1, Point::new(30.0, -5.0)).unwrap();
    assert_eq!(poly.bounds(), Bounds::new(0.0, -5.0, 30.0, 10.0));
    assert!(poly.contains(Point::new(2.0, 2.0)));
    assert!(!poly.contains(Point::new(-1.0, 2.0)));
}

#[test]
fn test_point_to_segment_distance() {
    let proj = distance_point_to_segment(
        Point::new(3.0, 4.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
    );
    assert!((proj.distance - 5.0).abs() < 1e-12);

    let proj = distance_point_to_segment(
        Point::new(5.0, 5.0),
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
    );
    assert!((proj.distance - 5.0).abs() < 1e-12);
    assert_eq!(proj.closest, Point::new(5.0, 0.0));
}

#[test]
fn test_flattened_matches_vertices() {
    let poly = triangle();
    assert_eq!(poly.flattened(), vec![0.0, 0.0, 10.0, 0.0, 0.0, 10.0]);
    assert!((poly.perimeter() - (20.0 + 200f64.sqrt())).abs() < 1e-9);
}
