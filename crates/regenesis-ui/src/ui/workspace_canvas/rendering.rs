//! Rendering methods for the workspace canvas

use super::*;
use gtk4::cairo::Context;
use gtk4::gdk::RGBA;
use regenesis_core::constants::RULER_THICKNESS_PX;
use regenesis_core::LengthUnit;
use regenesis_designer::{ruler_ticks, Point, RegionPolygon, RegionType, RulerAxis, Viewport};
use std::f64::consts::PI;

type Rgb = (f64, f64, f64);

/// Fill colour of a region by planting style.
pub(crate) fn region_color(region_type: RegionType) -> Rgb {
    match region_type {
        RegionType::Meadow => (0.74, 0.84, 0.42),
        RegionType::Layered => (0.42, 0.66, 0.38),
        RegionType::Pond => (0.36, 0.62, 0.86),
        RegionType::Stream => (0.45, 0.72, 0.90),
        RegionType::Woodland => (0.24, 0.48, 0.28),
        RegionType::Hedgerow => (0.52, 0.58, 0.30),
        RegionType::RainGarden => (0.50, 0.70, 0.78),
        RegionType::Prairie => (0.86, 0.76, 0.40),
        RegionType::Wetland => (0.38, 0.60, 0.56),
        RegionType::RockGarden => (0.66, 0.64, 0.60),
    }
}

const DEFAULT_REGION_COLOR: Rgb = (0.6, 0.6, 0.6);
const PROJECT_FILL: Rgb = (0.93, 0.96, 0.88);
const PROJECT_OUTLINE: Rgb = (0.18, 0.40, 0.16);
const RULER_BACKGROUND: Rgb = (0.92, 0.92, 0.90);

fn set_rgb(cr: &Context, (r, g, b): Rgb) {
    cr.set_source_rgb(r, g, b);
}

fn set_rgba(cr: &Context, color: &RGBA, alpha: f64) {
    cr.set_source_rgba(
        color.red() as f64,
        color.green() as f64,
        color.blue() as f64,
        alpha,
    );
}

/// Traces a closed path through `points` in screen space.
fn trace_polygon(cr: &Context, viewport: &Viewport, points: &[Point]) {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return;
    };
    let (x, y) = viewport.world_to_screen(*first);
    cr.move_to(x, y);
    for p in iter {
        let (x, y) = viewport.world_to_screen(*p);
        cr.line_to(x, y);
    }
    cr.close_path();
}

impl WorkspaceCanvas {
    pub(super) fn draw(
        cr: &Context,
        state: &WorkspaceState,
        width: f64,
        height: f64,
        mouse_pos: Option<(f64, f64)>,
        style_context: &gtk4::StyleContext,
    ) {
        let fg_color = style_context.color();
        let accent_color = style_context
            .lookup_color("accent_color")
            .unwrap_or(RGBA::new(0.21, 0.52, 0.89, 1.0));
        let viewport = state.viewport();

        let Some(project) = state.active_project_properties() else {
            Self::draw_placeholder(cr, width, height, &fg_color);
            return;
        };
        let unit = project.unit;

        Self::draw_project_area(cr, viewport, project.width, project.length);

        for (id, polygon) in state.project_polygons() {
            let node = state.tree().get(id);
            let color = node
                .and_then(|n| n.region_properties())
                .map(|r| region_color(r.region_type))
                .unwrap_or(DEFAULT_REGION_COLOR);
            let name = node.map(|n| n.name.as_str()).unwrap_or_default();
            Self::draw_region(cr, viewport, polygon, color, name, &fg_color);
        }

        // The active boundary goes on top so its handles are never covered.
        if let Some(polygon) = state.active_polygon() {
            Self::draw_active_region(cr, viewport, polygon, &accent_color);
        }

        if state.is_redrawing() {
            Self::draw_in_progress(cr, viewport, state.drawing_points(), mouse_pos, &accent_color);
        }

        Self::draw_rulers(cr, viewport, unit, width, height, &fg_color);
        Self::draw_readout(cr, viewport, unit, mouse_pos, width, height, &fg_color);
    }

    fn draw_placeholder(cr: &Context, width: f64, height: f64, fg: &RGBA) {
        let text = "Create or open a project to start";
        set_rgba(cr, fg, 0.5);
        cr.set_font_size(16.0);
        let extents_width = cr.text_extents(text).map(|e| e.width()).unwrap_or(0.0);
        cr.move_to((width - extents_width) / 2.0, height / 2.0);
        let _ = cr.show_text(text);
    }

    fn draw_project_area(cr: &Context, viewport: &Viewport, width: f64, length: f64) {
        let (x0, y0) = viewport.world_to_screen(Point::new(0.0, 0.0));
        let (x1, y1) = viewport.world_to_screen(Point::new(width, length));

        let _ = cr.save();
        cr.rectangle(x0, y0, x1 - x0, y1 - y0);
        set_rgb(cr, PROJECT_FILL);
        let _ = cr.fill_preserve();
        set_rgb(cr, PROJECT_OUTLINE);
        cr.set_line_width(2.0);
        let _ = cr.stroke();
        let _ = cr.restore();
    }

    fn draw_region(
        cr: &Context,
        viewport: &Viewport,
        polygon: &RegionPolygon,
        (r, g, b): Rgb,
        name: &str,
        fg: &RGBA,
    ) {
        let _ = cr.save();
        trace_polygon(cr, viewport, polygon.vertices());
        cr.set_source_rgba(r, g, b, 0.45);
        let _ = cr.fill_preserve();
        cr.set_source_rgb(r * 0.6, g * 0.6, b * 0.6);
        cr.set_line_width(1.5);
        let _ = cr.stroke();

        if !name.is_empty() {
            let (cx, cy) = viewport.world_to_screen(polygon.centroid());
            cr.set_font_size(12.0);
            let text_width = cr.text_extents(name).map(|e| e.width()).unwrap_or(0.0);
            set_rgba(cr, fg, 0.85);
            cr.move_to(cx - text_width / 2.0, cy + 4.0);
            let _ = cr.show_text(name);
        }
        let _ = cr.restore();
    }

    fn draw_active_region(
        cr: &Context,
        viewport: &Viewport,
        polygon: &RegionPolygon,
        accent: &RGBA,
    ) {
        let _ = cr.save();
        trace_polygon(cr, viewport, polygon.vertices());
        set_rgba(cr, accent, 1.0);
        cr.set_line_width(3.0);
        let _ = cr.stroke();

        let radius = viewport.vertex_radius();
        for vertex in polygon.vertices() {
            let (x, y) = viewport.world_to_screen(*vertex);
            cr.arc(x, y, radius, 0.0, 2.0 * PI);
            cr.set_source_rgb(1.0, 1.0, 1.0);
            let _ = cr.fill_preserve();
            set_rgba(cr, accent, 1.0);
            cr.set_line_width(2.0);
            let _ = cr.stroke();
        }
        let _ = cr.restore();
    }

    fn draw_in_progress(
        cr: &Context,
        viewport: &Viewport,
        points: &[Point],
        mouse_pos: Option<(f64, f64)>,
        accent: &RGBA,
    ) {
        let Some(first) = points.first() else {
            return;
        };

        let _ = cr.save();
        set_rgba(cr, accent, 1.0);
        cr.set_line_width(2.0);

        let (fx, fy) = viewport.world_to_screen(*first);
        cr.move_to(fx, fy);
        let mut last = (fx, fy);
        for p in &points[1..] {
            last = viewport.world_to_screen(*p);
            cr.line_to(last.0, last.1);
        }
        let _ = cr.stroke();

        // Rubber band to the cursor
        if let Some((mx, my)) = mouse_pos {
            cr.set_dash(&[4.0, 4.0], 0.0);
            cr.move_to(last.0, last.1);
            cr.line_to(mx, my);
            let _ = cr.stroke();
            cr.set_dash(&[], 0.0);
        }

        for p in points {
            let (x, y) = viewport.world_to_screen(*p);
            cr.arc(x, y, 4.0, 0.0, 2.0 * PI);
            let _ = cr.fill();
        }

        // Ring around the first point once the boundary can be closed.
        if points.len() >= regenesis_core::constants::MIN_POLYGON_VERTICES {
            cr.arc(
                fx,
                fy,
                regenesis_core::constants::VERTEX_HIT_RADIUS_PX,
                0.0,
                2.0 * PI,
            );
            cr.set_line_width(1.5);
            let _ = cr.stroke();
        }
        let _ = cr.restore();
    }

    fn draw_rulers(
        cr: &Context,
        viewport: &Viewport,
        unit: LengthUnit,
        width: f64,
        height: f64,
        fg: &RGBA,
    ) {
        let t = RULER_THICKNESS_PX;
        let _ = cr.save();

        set_rgb(cr, RULER_BACKGROUND);
        cr.rectangle(0.0, 0.0, width, t);
        cr.rectangle(0.0, 0.0, t, height);
        let _ = cr.fill();

        set_rgba(cr, fg, 0.8);
        cr.set_line_width(1.0);
        cr.set_font_size(10.0);

        for tick in ruler_ticks(RulerAxis::Horizontal, viewport, unit) {
            if tick.screen < t {
                continue;
            }
            let len = if tick.major { t * 0.5 } else { t * 0.25 };
            let x = tick.screen.round() + 0.5;
            cr.move_to(x, t);
            cr.line_to(x, t - len);
            let _ = cr.stroke();
            if let Some(label) = &tick.label {
                cr.move_to(x + 2.0, 11.0);
                let _ = cr.show_text(label);
            }
        }

        for tick in ruler_ticks(RulerAxis::Vertical, viewport, unit) {
            if tick.screen < t {
                continue;
            }
            let len = if tick.major { t * 0.5 } else { t * 0.25 };
            let y = tick.screen.round() + 0.5;
            cr.move_to(t, y);
            cr.line_to(t - len, y);
            let _ = cr.stroke();
            if let Some(label) = &tick.label {
                // Vertical labels read bottom to top.
                let _ = cr.save();
                cr.move_to(11.0, y - 2.0);
                cr.rotate(-PI / 2.0);
                let _ = cr.show_text(label);
                let _ = cr.restore();
            }
        }

        // Separator lines and the corner square
        cr.move_to(t, t);
        cr.line_to(width, t);
        cr.move_to(t, t);
        cr.line_to(t, height);
        let _ = cr.stroke();
        set_rgb(cr, RULER_BACKGROUND);
        cr.rectangle(0.0, 0.0, t, t);
        let _ = cr.fill();

        let _ = cr.restore();
    }

    fn draw_readout(
        cr: &Context,
        viewport: &Viewport,
        unit: LengthUnit,
        mouse_pos: Option<(f64, f64)>,
        width: f64,
        height: f64,
        fg: &RGBA,
    ) {
        let mut text = viewport.to_string();
        if let Some((x, y)) = mouse_pos {
            let world = viewport.screen_to_world(x, y);
            text.push_str(&format!(
                " | {:.1}, {:.1} {}",
                world.x,
                world.y,
                unit.abbreviation()
            ));
        }

        let _ = cr.save();
        cr.set_font_size(11.0);
        let text_width = cr.text_extents(&text).map(|e| e.width()).unwrap_or(0.0);
        let x = width - text_width - 10.0;
        let y = height - 10.0;

        cr.set_source_rgba(1.0, 1.0, 1.0, 0.75);
        cr.rectangle(x - 6.0, y - 14.0, text_width + 12.0, 20.0);
        let _ = cr.fill();

        set_rgba(cr, fg, 1.0);
        cr.move_to(x, y);
        let _ = cr.show_text(&text);
        let _ = cr.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_region_type_has_a_distinct_color() {
        let colors: Vec<Rgb> = RegionType::ALL.iter().map(|t| region_color(*t)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
