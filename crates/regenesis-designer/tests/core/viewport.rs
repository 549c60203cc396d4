use proptest::prelude::*;
use regenesis_designer::model::{Bounds, Point};
use regenesis_designer::viewport::Viewport;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::new(1200.0, 800.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 0.0);
    assert_eq!(vp.pan_y(), 0.0);
    assert_eq!(vp.pixels_per_unit(), 50.0);
}

#[test]
fn test_focus_maps_to_canvas_center() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_focus(Point::new(50.0, 75.0));
    let (px, py) = vp.world_to_screen(Point::new(50.0, 75.0));
    assert!((px - 400.0).abs() < 1e-9);
    assert!((py - 300.0).abs() < 1e-9);
}

#[test]
fn test_positive_y_goes_down() {
    let vp = Viewport::new(800.0, 600.0);
    let (_, py0) = vp.world_to_screen(Point::new(0.0, 0.0));
    let (_, py10) = vp.world_to_screen(Point::new(0.0, 10.0));
    assert!(py10 > py0);
    assert!((py10 - py0 - 500.0).abs() < 1e-9);
}

#[test]
fn test_zoom_constraints() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(0.001);
    assert_eq!(vp.zoom(), 0.01);
    vp.set_zoom(50.0);
    assert_eq!(vp.zoom(), 10.0);

    vp.set_zoom(1.0);
    vp.zoom_in();
    assert!((vp.zoom() - 1.1).abs() < 1e-12);
    vp.zoom_out();
    assert!((vp.zoom() - 1.0).abs() < 1e-12);
}

#[test]
fn test_zoom_at_keeps_cursor_point_fixed() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_pan(30.0, -20.0);
    let cursor = (620.0, 110.0);
    let before = vp.screen_to_world(cursor.0, cursor.1);

    vp.zoom_at(cursor.0, cursor.1, 1.1);
    let after = vp.screen_to_world(cursor.0, cursor.1);

    assert!((vp.zoom() - 1.1).abs() < 1e-12);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_pan_by_moves_content_with_pointer() {
    let mut vp = Viewport::new(800.0, 600.0);
    let p = Point::new(3.0, 4.0);
    let (x0, y0) = vp.world_to_screen(p);
    vp.pan_by(25.0, -10.0);
    let (x1, y1) = vp.world_to_screen(p);
    assert!((x1 - x0 - 25.0).abs() < 1e-9);
    assert!((y1 - y0 + 10.0).abs() < 1e-9);
    vp.reset_pan();
    assert_eq!(vp.world_to_screen(p), (x0, y0));
}

#[test]
fn test_auto_zoom_for_100_by_150_plot() {
    // 800/(100*50*1.2) = 0.1333, 600/(150*50*1.2) = 0.0667 -> 0.0667
    let vp = Viewport::new(800.0, 600.0);
    let zoom = vp.auto_zoom_for(100.0, 150.0);
    assert!((zoom - 600.0 / 9000.0).abs() < 1e-12);
}

#[test]
fn test_auto_zoom_for_degenerate_input_keeps_zoom() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(2.0);
    assert_eq!(vp.auto_zoom_for(0.0, 100.0), 2.0);
    assert_eq!(vp.auto_zoom_for(100.0, -1.0), 2.0);
    vp.set_canvas_size(0.0, 600.0);
    assert_eq!(vp.auto_zoom_for(100.0, 100.0), 2.0);
}

#[test]
fn test_auto_zoom_is_clamped() {
    let vp = Viewport::new(800.0, 600.0);
    // A 0.01 x 0.01 plot would need a zoom far above the maximum.
    assert_eq!(vp.auto_zoom_for(0.01, 0.01), 10.0);
    assert_eq!(vp.auto_zoom_for(1.0e7, 1.0e7), 0.01);
}

#[test]
fn test_fit_rect_centres_and_resets_pan() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_pan(123.0, 456.0);
    vp.fit_rect(Bounds::new(0.0, 0.0, 100.0, 150.0));

    assert_eq!((vp.pan_x(), vp.pan_y()), (0.0, 0.0));
    assert_eq!(vp.focus(), Point::new(50.0, 75.0));

    // The whole rectangle is on screen, with margin.
    let (x0, y0) = vp.world_to_screen(Point::new(0.0, 0.0));
    let (x1, y1) = vp.world_to_screen(Point::new(100.0, 150.0));
    assert!(x0 > 0.0 && y0 > 0.0);
    assert!(x1 < 800.0 && y1 < 600.0);
}

#[test]
fn test_vertex_radius_is_clamped() {
    let mut vp = Viewport::new(800.0, 600.0);
    assert_eq!(vp.vertex_radius(), 10.0);
    vp.set_zoom(0.5);
    assert_eq!(vp.vertex_radius(), 5.0);
    vp.set_zoom(0.1);
    assert_eq!(vp.vertex_radius(), 3.0);
    vp.set_zoom(4.0);
    assert_eq!(vp.vertex_radius(), 10.0);
}

#[test]
fn test_visible_world_bounds() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_focus(Point::new(8.0, 6.0));
    let visible = vp.visible_world_bounds();
    assert!((visible.min_x - 0.0).abs() < 1e-9);
    assert!((visible.min_y - 0.0).abs() < 1e-9);
    assert!((visible.max_x - 16.0).abs() < 1e-9);
    assert!((visible.max_y - 12.0).abs() < 1e-9);
}

#[test]
fn test_display_format() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(1.5);
    vp.set_pan(10.3, -3.0);
    assert_eq!(vp.to_string(), "Zoom: 1.50x | Pan: (10.3, -3.0)");
}

proptest! {
    #[test]
    fn prop_screen_world_roundtrip(
        zoom in 0.01f64..10.0,
        pan_x in -5000.0f64..5000.0,
        pan_y in -5000.0f64..5000.0,
        fx in -500.0f64..500.0,
        fy in -500.0f64..500.0,
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
    ) {
        let mut vp = Viewport::new(1024.0, 768.0);
        vp.set_zoom(zoom);
        vp.set_pan(pan_x, pan_y);
        vp.set_focus(Point::new(fx, fy));

        let (sx, sy) = vp.world_to_screen(Point::new(x, y));
        let back = vp.screen_to_world(sx, sy);
        prop_assert!((back.x - x).abs() < 1e-6);
        prop_assert!((back.y - y).abs() < 1e-6);
    }

    #[test]
    fn prop_zoom_at_fixes_anchor(
        factor in 0.5f64..2.0,
        sx in 0.0f64..1024.0,
        sy in 0.0f64..768.0,
    ) {
        let mut vp = Viewport::new(1024.0, 768.0);
        vp.set_focus(Point::new(20.0, 30.0));
        let before = vp.screen_to_world(sx, sy);
        vp.zoom_at(sx, sy, factor);
        let after = vp.screen_to_world(sx, sy);
        prop_assert!((before.x - after.x).abs() < 1e-6);
        prop_assert!((before.y - after.y).abs() < 1e-6);
    }
}
