//! Viewport and coordinate transformation for the workspace canvas.
//!
//! Handles conversion between pixel coordinates (screen space) and world
//! coordinates (project feet or meters). Manages zoom and pan with the world
//! point under the cursor kept fixed while zooming.

use std::fmt;

use regenesis_core::constants::{
    AUTO_FIT_MARGIN, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_VERTEX_RADIUS_PX, MAX_ZOOM,
    MIN_VERTEX_RADIUS_PX, MIN_ZOOM, PIXELS_PER_UNIT, ZOOM_STEP,
};

use crate::model::{Bounds, Point};

/// Represents the viewport transformation state (zoom and pan).
///
/// With zero pan the `focus` world point sits in the middle of the canvas.
/// Both axes grow right/down on screen and in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    focus: Point,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            focus: Point::default(),
        }
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the widget resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 50 pixels per world unit).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pixels_per_unit(&self) -> f64 {
        PIXELS_PER_UNIT * self.zoom
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset in pixels.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a pixel delta; dragging right moves the content right.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn reset_pan(&mut self) {
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    pub fn focus(&self) -> Point {
        self.focus
    }

    /// World point shown at the canvas centre when the pan is zero.
    pub fn set_focus(&mut self, focus: Point) {
        self.focus = focus;
    }

    /// Converts world coordinates to pixel coordinates.
    ///
    /// ```text
    /// pixel_x = canvas_width / 2 + pan_x + (world_x - focus_x) * ppu
    /// pixel_y = canvas_height / 2 + pan_y + (world_y - focus_y) * ppu
    /// ```
    pub fn world_to_screen(&self, world: Point) -> (f64, f64) {
        let ppu = self.pixels_per_unit();
        (
            self.canvas_width / 2.0 + self.pan_x + (world.x - self.focus.x) * ppu,
            self.canvas_height / 2.0 + self.pan_y + (world.y - self.focus.y) * ppu,
        )
    }

    /// Converts pixel coordinates to world coordinates (inverse of
    /// [`Viewport::world_to_screen`]).
    pub fn screen_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let ppu = self.pixels_per_unit();
        Point::new(
            (pixel_x - self.canvas_width / 2.0 - self.pan_x) / ppu + self.focus.x,
            (pixel_y - self.canvas_height / 2.0 - self.pan_y) / ppu + self.focus.y,
        )
    }

    /// Converts a pixel distance into world units at the current zoom.
    pub fn screen_distance_to_world(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_unit()
    }

    /// Zooms by `factor`, keeping the world point under `(pixel_x, pixel_y)`
    /// fixed on screen.
    pub fn zoom_at(&mut self, pixel_x: f64, pixel_y: f64, factor: f64) {
        let anchor = self.screen_to_world(pixel_x, pixel_y);
        let previous = self.zoom;
        self.set_zoom(self.zoom * factor);
        if (self.zoom - previous).abs() < f64::EPSILON {
            return;
        }

        // Solve world_to_screen(anchor) == (pixel_x, pixel_y) for the pan.
        let ppu = self.pixels_per_unit();
        self.pan_x = pixel_x - self.canvas_width / 2.0 - (anchor.x - self.focus.x) * ppu;
        self.pan_y = pixel_y - self.canvas_height / 2.0 - (anchor.y - self.focus.y) * ppu;
    }

    pub fn zoom_in_at(&mut self, pixel_x: f64, pixel_y: f64) {
        self.zoom_at(pixel_x, pixel_y, ZOOM_STEP);
    }

    pub fn zoom_out_at(&mut self, pixel_x: f64, pixel_y: f64) {
        self.zoom_at(pixel_x, pixel_y, 1.0 / ZOOM_STEP);
    }

    /// Zoom at which a `width` × `length` world rectangle plus a 20% margin
    /// fits the canvas.
    ///
    /// Returns the current zoom when either the rectangle or the canvas has
    /// no area.
    pub fn auto_zoom_for(&self, width: f64, length: f64) -> f64 {
        if width <= 0.0 || length <= 0.0 || self.canvas_width <= 0.0 || self.canvas_height <= 0.0
        {
            return self.zoom;
        }

        let required_width = width * PIXELS_PER_UNIT * AUTO_FIT_MARGIN;
        let required_height = length * PIXELS_PER_UNIT * AUTO_FIT_MARGIN;

        let zoom_for_width = self.canvas_width / required_width;
        let zoom_for_height = self.canvas_height / required_height;
        zoom_for_width.min(zoom_for_height).clamp(MIN_ZOOM, MAX_ZOOM)
    }

    /// Centres `bounds` on the canvas at the auto-zoom level and clears the pan.
    pub fn fit_rect(&mut self, bounds: Bounds) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        self.zoom = self.auto_zoom_for(bounds.width(), bounds.height());
        self.focus = bounds.center();
        self.reset_pan();
    }

    /// Vertex handle radius: `10 * zoom` pixels, clamped to `[3, 10]`.
    pub fn vertex_radius(&self) -> f64 {
        (10.0 * self.zoom).clamp(MIN_VERTEX_RADIUS_PX, MAX_VERTEX_RADIUS_PX)
    }

    /// The world-space rectangle currently covered by the canvas.
    pub fn visible_world_bounds(&self) -> Bounds {
        let top_left = self.screen_to_world(0.0, 0.0);
        let bottom_right = self.screen_to_world(self.canvas_width, self.canvas_height);
        Bounds::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// Resets to 1:1 zoom with no pan, keeping the focus point.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.reset_pan();
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
