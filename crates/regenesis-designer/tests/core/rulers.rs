use regenesis_core::LengthUnit;
use regenesis_designer::model::Point;
use regenesis_designer::rulers::format_tick_label;
use regenesis_designer::{nice_tick_interval, ruler_ticks, RulerAxis, Viewport};

#[test]
fn test_interval_is_one_two_or_five() {
    for ppu in [0.3, 0.5, 1.7, 3.3, 10.0, 25.0, 50.0, 120.0, 499.0] {
        let interval = nice_tick_interval(ppu, 50.0);
        assert!(interval * ppu >= 50.0 - 1e-9, "ppu {}", ppu);

        let exponent = interval.log10().floor();
        let mantissa = (interval / 10f64.powf(exponent)).round();
        assert!(
            [1.0, 2.0, 5.0].contains(&mantissa),
            "interval {} for ppu {}",
            interval,
            ppu
        );
    }
}

#[test]
fn test_interval_is_smallest_that_fits() {
    // 10 px per unit: 5 units gives exactly 50 px; 2 units would be 20 px.
    assert_eq!(nice_tick_interval(10.0, 50.0), 5.0);
    // 9 px per unit: 5 units is only 45 px, so step up to 10.
    assert_eq!(nice_tick_interval(9.0, 50.0), 10.0);
}

#[test]
fn test_horizontal_ticks_cover_visible_range() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_focus(Point::new(8.0, 6.0));
    // Visible x range is 0..16 at 50 px per unit; major every 1, minor every 0.2.
    let ticks = ruler_ticks(RulerAxis::Horizontal, &vp, LengthUnit::Feet);

    let majors: Vec<_> = ticks.iter().filter(|t| t.major).collect();
    assert_eq!(majors.len(), 17);
    assert!(ticks.iter().all(|t| t.major == t.label.is_some()));
    assert_eq!(ticks.len(), 16 * 5 + 1);

    assert_eq!(majors[0].label.as_deref(), Some("0 ft"));
    assert_eq!(majors[1].label.as_deref(), Some("1"));
    assert!((majors[1].screen - 50.0).abs() < 1e-9);
}

#[test]
fn test_vertical_ticks_use_y_axis() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_focus(Point::new(8.0, 6.0));
    vp.set_pan(0.0, 100.0);
    let ticks = ruler_ticks(RulerAxis::Vertical, &vp, LengthUnit::Meters);
    let zero = ticks
        .iter()
        .find(|t| t.major && t.world == 0.0)
        .expect("origin tick visible");
    assert!((zero.screen - 100.0).abs() < 1e-9);
    assert!(ticks
        .iter()
        .filter_map(|t| t.label.as_deref())
        .any(|l| l.ends_with(" m")));
}

#[test]
fn test_labels_follow_interval_precision() {
    assert_eq!(format_tick_label(15.0, 5.0), "15");
    assert_eq!(format_tick_label(1.5, 0.5), "1.5");
    assert_eq!(format_tick_label(0.02, 0.01), "0.02");
}
