//! Interaction and rendering constants shared by the designer and the UI.

/// Screen pixels per world unit at zoom 1.0.
pub const PIXELS_PER_UNIT: f64 = 50.0;

/// Smallest allowed zoom level.
pub const MIN_ZOOM: f64 = 0.01;

/// Largest allowed zoom level.
pub const MAX_ZOOM: f64 = 10.0;

/// Multiplier applied per zoom-in step (and divided per zoom-out step).
pub const ZOOM_STEP: f64 = 1.1;

/// Auto-fit leaves 20% of the fitted rectangle as margin.
pub const AUTO_FIT_MARGIN: f64 = 1.2;

/// A press becomes a drag once either axis moves more than this many pixels.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Pick radius around polygon vertices, in pixels.
pub const VERTEX_HIT_RADIUS_PX: f64 = 10.0;

/// Maximum distance from an edge for vertex insertion, in pixels.
pub const EDGE_HIT_DISTANCE_PX: f64 = 8.0;

/// Smallest vertex handle radius, in pixels.
pub const MIN_VERTEX_RADIUS_PX: f64 = 3.0;

/// Largest vertex handle radius, in pixels.
pub const MAX_VERTEX_RADIUS_PX: f64 = 10.0;

/// Width of the horizontal ruler band / height of the vertical one.
pub const RULER_THICKNESS_PX: f64 = 30.0;

/// Minimum spacing between labelled ruler ticks, in pixels.
pub const MIN_TICK_SPACING_PX: f64 = 50.0;

/// Minor subdivisions between two major ruler ticks.
pub const RULER_MINOR_DIVISIONS: u32 = 5;

/// Smallest vertex count a region boundary may have.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Default canvas size before the widget is realized.
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;
