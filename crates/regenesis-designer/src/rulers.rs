//! Ruler tick layout.
//!
//! Major ticks fall on a "nice" world interval ({1, 2, 5} × 10^k) chosen so
//! labels stay at least [`MIN_TICK_SPACING_PX`] apart; each major interval is
//! split into [`RULER_MINOR_DIVISIONS`] minor ticks.

use regenesis_core::constants::{MIN_TICK_SPACING_PX, RULER_MINOR_DIVISIONS};
use regenesis_core::LengthUnit;

use crate::viewport::Viewport;

/// Upper bound on ticks produced for one ruler, guarding degenerate zooms.
const MAX_TICKS: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulerAxis {
    /// Along the top edge, measuring x.
    Horizontal,
    /// Along the left edge, measuring y.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RulerTick {
    /// Position in world units along the axis.
    pub world: f64,
    /// Position in pixels along the axis.
    pub screen: f64,
    pub major: bool,
    /// Only major ticks carry a label.
    pub label: Option<String>,
}

/// Smallest `{1, 2, 5} × 10^k` world interval whose on-screen spacing is at
/// least `min_spacing_px`.
pub fn nice_tick_interval(pixels_per_unit: f64, min_spacing_px: f64) -> f64 {
    if pixels_per_unit <= 0.0 || !pixels_per_unit.is_finite() || min_spacing_px <= 0.0 {
        return 1.0;
    }

    let raw = min_spacing_px / pixels_per_unit;
    let magnitude = 10f64.powf(raw.log10().floor());
    for step in [1.0, 2.0, 5.0, 10.0] {
        let candidate = step * magnitude;
        // Tolerate float noise so an exact fit is not pushed up a step.
        if candidate * pixels_per_unit >= min_spacing_px * (1.0 - 1e-9) {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Formats a tick value with as many decimals as the interval needs.
pub fn format_tick_label(value: f64, interval: f64) -> String {
    let decimals = if interval >= 1.0 || interval <= 0.0 {
        0
    } else {
        (-interval.log10()).ceil().max(0.0) as usize
    };
    let text = format!("{:.*}", decimals, value);
    // "-0" and "-0.0" read badly on a ruler.
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Lays out the ticks visible along `axis`.
///
/// The first labelled tick carries the unit suffix (`"10 ft"`); the rest are
/// plain numbers.
pub fn ruler_ticks(axis: RulerAxis, viewport: &Viewport, unit: LengthUnit) -> Vec<RulerTick> {
    let visible = viewport.visible_world_bounds();
    let (start, end) = match axis {
        RulerAxis::Horizontal => (visible.min_x, visible.max_x),
        RulerAxis::Vertical => (visible.min_y, visible.max_y),
    };

    let major = nice_tick_interval(viewport.pixels_per_unit(), MIN_TICK_SPACING_PX);
    let divisions = i64::from(RULER_MINOR_DIVISIONS.max(1));
    let minor = major / divisions as f64;

    // Integer indices avoid accumulating float error across the ruler.
    let first = (start / minor).floor() as i64;
    let last = (end / minor).ceil() as i64;
    if last < first || last - first > MAX_TICKS {
        return Vec::new();
    }

    let mut ticks = Vec::with_capacity((last - first + 1) as usize);
    let mut unit_shown = false;
    for i in first..=last {
        let world = i as f64 * minor;
        let screen = match axis {
            RulerAxis::Horizontal => viewport.world_to_screen((world, 0.0).into()).0,
            RulerAxis::Vertical => viewport.world_to_screen((0.0, world).into()).1,
        };
        let is_major = i.rem_euclid(divisions) == 0;
        let label = is_major.then(|| {
            let text = format_tick_label(world, major);
            if unit_shown {
                text
            } else {
                unit_shown = true;
                format!("{} {}", text, unit.abbreviation())
            }
        });
        ticks.push(RulerTick {
            world,
            screen,
            major: is_major,
            label,
        });
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_interval_values() {
        // 50 px per unit: one unit is exactly 50 px.
        assert_eq!(nice_tick_interval(50.0, 50.0), 1.0);
        // 20 px per unit: need 2.5 units -> 5.
        assert_eq!(nice_tick_interval(20.0, 50.0), 5.0);
        // 30 px per unit: need 1.67 units -> 2.
        assert_eq!(nice_tick_interval(30.0, 50.0), 2.0);
        // 0.5 px per unit: need 100 units -> 100.
        assert_eq!(nice_tick_interval(0.5, 50.0), 100.0);
    }

    #[test]
    fn test_nice_interval_fractional() {
        // 500 px per unit: need 0.1 units.
        let interval = nice_tick_interval(500.0, 50.0);
        assert!((interval - 0.1).abs() < 1e-12);
        // 300 px per unit: need 0.167 -> 0.2.
        let interval = nice_tick_interval(300.0, 50.0);
        assert!((interval - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_nice_interval_degenerate_input() {
        assert_eq!(nice_tick_interval(0.0, 50.0), 1.0);
        assert_eq!(nice_tick_interval(f64::INFINITY, 50.0), 1.0);
    }

    #[test]
    fn test_format_tick_label() {
        assert_eq!(format_tick_label(20.0, 10.0), "20");
        assert_eq!(format_tick_label(0.2, 0.1), "0.2");
        assert_eq!(format_tick_label(0.25, 0.05), "0.25");
        assert_eq!(format_tick_label(-0.0, 1.0), "0");
        assert_eq!(format_tick_label(-5.0, 5.0), "-5");
    }
}
