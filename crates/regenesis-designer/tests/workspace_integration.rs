//! Workspace controller integration tests: selection, vertex editing,
//! panning and boundary redraw driven through pointer events.

use regenesis_core::Error;
use regenesis_designer::model::{Bounds, Point};
use regenesis_designer::{sample_project, EditMode, NodeId, PointerOutcome, WorkspaceState};

fn workspace() -> (WorkspaceState, NodeId) {
    let mut ws = WorkspaceState::new();
    ws.set_canvas_size(800.0, 600.0);
    let project = ws.load_tree(sample_project()).unwrap();
    (ws, project)
}

fn region(ws: &WorkspaceState, name: &str) -> NodeId {
    ws.tree().find_by_name(name).unwrap()
}

fn screen_of(ws: &WorkspaceState, p: Point) -> (f64, f64) {
    ws.viewport().world_to_screen(p)
}

fn click(ws: &mut WorkspaceState, (x, y): (f64, f64)) -> PointerOutcome {
    ws.pointer_pressed(x, y);
    ws.pointer_released(x, y)
}

#[test]
fn test_selecting_project_fits_view() {
    let (mut ws, project) = workspace();
    ws.select_node(Some(project));

    assert_eq!(ws.mode(), EditMode::Idle);
    assert!(!ws.drawing_mode());
    assert_eq!(ws.active_project(), Some(project));
    assert!((ws.viewport().zoom() - 600.0 / 9000.0).abs() < 1e-12);
    assert_eq!(ws.viewport().focus(), Point::new(50.0, 75.0));
}

#[test]
fn test_region_gets_default_boundary_once() {
    let (mut ws, project) = workspace();
    let front = region(&ws, "Front Yard");

    ws.select_node(Some(front));
    assert_eq!(ws.mode(), EditMode::EditPolygon);
    assert!(ws.drawing_mode());
    let boundary = ws.active_polygon().unwrap().clone();
    assert_eq!(boundary.bounds(), Bounds::new(25.0, 37.5, 75.0, 112.5));

    // Selecting the region again keeps the (edited) boundary.
    let (x, y) = screen_of(&ws, boundary.vertex(0).unwrap());
    ws.pointer_pressed(x, y);
    ws.pointer_moved(x + 30.0, y);
    ws.pointer_released(x + 30.0, y);
    let edited = ws.active_polygon().unwrap().clone();
    assert_ne!(edited, boundary);

    ws.select_node(Some(project));
    assert!(ws.active_polygon().is_none());
    ws.select_node(Some(front));
    assert_eq!(ws.active_polygon(), Some(&edited));
}

#[test]
fn test_siblings_get_offset_boundaries() {
    let (mut ws, _) = workspace();
    let front = region(&ws, "Front Yard");
    let back = region(&ws, "Back Yard");
    ws.select_node(Some(front));
    ws.select_node(Some(back));

    let a = ws.polygon(front).unwrap().bounds();
    let b = ws.polygon(back).unwrap().bounds();
    assert_ne!(a, b);
    assert!((b.min_x - a.min_x - 5.0).abs() < 1e-9);
}

#[test]
fn test_vertex_drag_respects_threshold() {
    let (mut ws, _) = workspace();
    ws.select_node(Some(region(&ws, "Front Yard")));
    let original = ws.active_polygon().unwrap().vertex(0).unwrap();
    let (x, y) = screen_of(&ws, original);

    ws.pointer_pressed(x, y);
    // 4 px on both axes is more than 5 px diagonally but below the per-axis threshold.
    assert!(!ws.pointer_moved(x + 4.0, y + 4.0));
    assert!(!ws.is_dragging());
    assert_eq!(ws.active_polygon().unwrap().vertex(0), Some(original));

    assert!(ws.pointer_moved(x + 40.0, y + 20.0));
    let outcome = ws.pointer_released(x + 40.0, y + 20.0);
    assert!(matches!(outcome, PointerOutcome::VertexMoved { index: 0, .. }));

    let moved = ws.active_polygon().unwrap().vertex(0).unwrap();
    let expected = ws.viewport().screen_to_world(x + 40.0, y + 20.0);
    assert!(moved.distance_to(&expected) < 1e-9);
    assert!(ws.is_modified());
}

#[test]
fn test_press_away_from_vertices_pans() {
    let (mut ws, project) = workspace();
    ws.select_node(Some(project));

    ws.pointer_pressed(10.0, 10.0);
    ws.pointer_moved(40.0, 12.0);
    ws.pointer_moved(50.0, 22.0);
    assert_eq!(ws.pointer_released(50.0, 22.0), PointerOutcome::Panned);
    assert!((ws.viewport().pan_x() - 40.0).abs() < 1e-9);
    assert!((ws.viewport().pan_y() - 12.0).abs() < 1e-9);
}

#[test]
fn test_double_click_inserts_on_edge() {
    let (mut ws, _) = workspace();
    ws.select_node(Some(region(&ws, "Front Yard")));
    // Midpoint of the top edge (vertex 0 -> vertex 1).
    let (x, y) = screen_of(&ws, Point::new(50.0, 37.5));

    assert_eq!(ws.double_click(x, y + 3.0), Some(1));
    let boundary = ws.active_polygon().unwrap();
    assert_eq!(boundary.len(), 5);
    assert!(boundary.vertex(1).unwrap().distance_to(&Point::new(50.0, 37.5)) < 1e-9);

    // Far from every edge: nothing happens.
    let (cx, cy) = screen_of(&ws, Point::new(50.0, 75.0));
    assert_eq!(ws.double_click(cx, cy), None);
}

#[test]
fn test_secondary_click_stops_at_three_vertices() {
    let (mut ws, _) = workspace();
    ws.select_node(Some(region(&ws, "Front Yard")));

    let corner = ws.active_polygon().unwrap().vertex(3).unwrap();
    let (x, y) = screen_of(&ws, corner);
    assert_eq!(ws.secondary_click(x, y).unwrap(), Some(corner));
    assert_eq!(ws.active_polygon().unwrap().len(), 3);

    let corner = ws.active_polygon().unwrap().vertex(0).unwrap();
    let (x, y) = screen_of(&ws, corner);
    assert!(matches!(
        ws.secondary_click(x, y),
        Err(Error::TooFewVertices { .. })
    ));
    assert_eq!(ws.active_polygon().unwrap().len(), 3);

    // Nothing under the cursor.
    assert_eq!(ws.secondary_click(1.0, 1.0).unwrap(), None);
}

#[test]
fn test_redraw_closes_on_first_point() {
    let (mut ws, _) = workspace();
    let front = region(&ws, "Front Yard");
    ws.select_node(Some(front));
    ws.begin_redraw().unwrap();
    assert_eq!(ws.mode(), EditMode::DrawPolygon);
    assert!(ws.drawing_mode());
    assert!(ws.active_polygon().is_none());

    let points = [
        Point::new(10.0, 10.0),
        Point::new(60.0, 10.0),
        Point::new(60.0, 60.0),
    ];
    for (i, p) in points.iter().enumerate() {
        let at = screen_of(&ws, *p);
        let outcome = click(&mut ws, at);
        assert_eq!(outcome, PointerOutcome::PointAdded { count: i + 1 });
    }

    let (fx, fy) = screen_of(&ws, points[0]);
    let outcome = click(&mut ws, (fx + 2.0, fy - 2.0));
    assert_eq!(outcome, PointerOutcome::DrawingClosed { region: front });
    assert_eq!(ws.mode(), EditMode::EditPolygon);
    assert_eq!(ws.active_polygon().unwrap().len(), 3);
}

#[test]
fn test_finish_drawing_needs_three_points() {
    let (mut ws, _) = workspace();
    ws.select_node(Some(region(&ws, "Side Yard")));
    ws.begin_redraw().unwrap();
    click(&mut ws, (100.0, 100.0));
    click(&mut ws, (200.0, 100.0));
    assert!(matches!(
        ws.finish_drawing(),
        Err(Error::TooFewVertices { count: 2, .. })
    ));
    assert_eq!(ws.mode(), EditMode::DrawPolygon);
}

#[test]
fn test_cancel_drawing_restores_boundary() {
    let (mut ws, _) = workspace();
    ws.select_node(Some(region(&ws, "Back Yard")));
    let before = ws.active_polygon().unwrap().clone();

    ws.begin_redraw().unwrap();
    click(&mut ws, (100.0, 100.0));
    ws.cancel_drawing();

    assert_eq!(ws.mode(), EditMode::EditPolygon);
    assert_eq!(ws.active_polygon(), Some(&before));
    assert!(ws.drawing_points().is_empty());
}

#[test]
fn test_begin_redraw_requires_region() {
    let (mut ws, project) = workspace();
    assert!(ws.begin_redraw().is_err());
    ws.select_node(Some(project));
    assert!(ws.begin_redraw().is_err());
    assert_eq!(ws.mode(), EditMode::Idle);
}

#[test]
fn test_click_in_idle_selects_region() {
    let (mut ws, project) = workspace();
    let front = region(&ws, "Front Yard");
    ws.select_node(Some(front));
    ws.select_node(Some(project));

    let inside = screen_of(&ws, Point::new(27.0, 40.0));
    let outcome = click(&mut ws, inside);
    assert_eq!(outcome, PointerOutcome::RegionSelected(front));
    assert_eq!(ws.selected(), Some(front));
    assert_eq!(ws.mode(), EditMode::EditPolygon);

    ws.select_node(Some(project));
    let outside = screen_of(&ws, Point::new(95.0, 5.0));
    let outcome = click(&mut ws, outside);
    assert_eq!(outcome, PointerOutcome::Nothing);
}

#[test]
fn test_scroll_zoom_around_cursor() {
    let (mut ws, project) = workspace();
    ws.select_node(Some(project));
    let zoom = ws.viewport().zoom();
    let anchor = ws.viewport().screen_to_world(200.0, 150.0);

    ws.scroll_zoom(200.0, 150.0, true);
    assert!(ws.viewport().zoom() > zoom);
    let after = ws.viewport().screen_to_world(200.0, 150.0);
    assert!(anchor.distance_to(&after) < 1e-9);

    ws.scroll_zoom(200.0, 150.0, false);
    assert!((ws.viewport().zoom() - zoom).abs() < 1e-12);
}

#[test]
fn test_remove_node_drops_boundaries_and_selection() {
    let (mut ws, _) = workspace();
    let back = region(&ws, "Back Yard");
    let patio = region(&ws, "Patio");
    ws.select_node(Some(back));
    ws.select_node(Some(patio));
    assert!(ws.polygon(patio).is_some());

    let removed = ws.remove_node(back).unwrap();
    assert_eq!(removed, vec![back, patio]);
    assert!(ws.polygon(back).is_none());
    assert!(ws.polygon(patio).is_none());
    assert_eq!(ws.selected(), None);
    assert_eq!(ws.mode(), EditMode::Idle);
}

#[test]
fn test_nested_region_sits_inside_parent() {
    let (mut ws, _) = workspace();
    let back = region(&ws, "Back Yard");
    let patio = region(&ws, "Patio");
    ws.select_node(Some(back));
    ws.select_node(Some(patio));

    let outer = ws.polygon(back).unwrap().bounds();
    let inner = ws.polygon(patio).unwrap().bounds();
    assert!(outer.contains(&Point::new(inner.min_x, inner.min_y)));
    assert!(outer.contains(&Point::new(inner.max_x, inner.max_y)));
}

#[test]
fn test_resizing_project_refits() {
    let (mut ws, project) = workspace();
    ws.select_node(Some(project));
    ws.set_property(project, "length", "300").unwrap();
    assert!((ws.viewport().zoom() - 600.0 / 18000.0).abs() < 1e-12);
    assert_eq!(ws.viewport().focus(), Point::new(50.0, 150.0));

    assert!(ws.set_property(project, "latitude", "91").is_err());
}

#[test]
fn test_add_region_and_new_project() {
    let (mut ws, project) = workspace();
    let pond = ws.add_region(project, "Pond").unwrap();
    assert_eq!(ws.tree().parent(pond), Some(project));
    assert!(ws.is_modified());

    let fresh = ws.new_project("Untitled Project");
    assert_eq!(ws.tree().len(), 1);
    assert_eq!(ws.selected(), Some(fresh));
    assert!(!ws.is_modified());
}

#[test]
fn test_first_canvas_size_refits_project() {
    let (mut ws, project) = workspace();
    ws.select_node(Some(project));
    assert!((ws.viewport().zoom() - 600.0 / 9000.0).abs() < 1e-12);

    ws.canvas_resized(1600.0, 1200.0);
    assert!((ws.viewport().zoom() - 1200.0 / 9000.0).abs() < 1e-12);

    // Later resizes leave the user's view alone.
    ws.viewport_mut().zoom_in();
    let zoom = ws.viewport().zoom();
    ws.canvas_resized(800.0, 600.0);
    assert_eq!(ws.viewport().zoom(), zoom);
}

#[test]
fn test_redrawing_is_distinct_from_editing() {
    let (mut ws, _) = workspace();
    let front = region(&ws, "Front Yard");
    ws.select_node(Some(front));
    assert!(ws.drawing_mode());
    assert!(!ws.is_redrawing());

    ws.begin_redraw().unwrap();
    assert!(ws.is_redrawing());
    ws.cancel_drawing();
    assert!(!ws.is_redrawing());
    assert_eq!(ws.mode(), EditMode::EditPolygon);
}
