use super::*;

#[test]
fn trim_range_rejects_inverted_and_negative_bounds() {
    assert!(TrimRange::new(2.0, 1.0).is_err());
    assert!(TrimRange::new(-0.5, 1.0).is_err());
    assert!(TrimRange::new(0.0, f64::NAN).is_err());
    assert!(TrimRange::new(1.0, 1.0).is_ok());
}

#[test]
fn full_range_spans_the_source() {
    let r = TrimRange::full(12.4);
    assert_eq!(r.start, 0.0);
    assert_eq!(r.end, 12.4);
    assert!((r.span() - 12.4).abs() < 1e-12);
    assert!(r.contains(0.0));
    assert!(!r.contains(12.4));
}

#[test]
fn validity_enforces_minimum_span_only_for_long_sources() {
    assert!(TrimRange { start: 2.0, end: 3.0 }.is_valid_for(10.0));
    assert!(!TrimRange { start: 2.0, end: 2.5 }.is_valid_for(10.0));
    assert!(!TrimRange { start: 2.0, end: 11.0 }.is_valid_for(10.0));
    assert!(TrimRange { start: 0.0, end: 0.4 }.is_valid_for(0.4));
}

#[test]
fn cursor_reports_rounded_millis() {
    let c = PlaybackCursor {
        position_seconds: 1.2346,
        ..PlaybackCursor::default()
    };
    assert_eq!(c.position_millis(), 1235);
    assert_eq!(secs_to_millis(-3.0), 0);
}

#[test]
fn handle_side_opposite_round_trips() {
    assert_eq!(HandleSide::Left.opposite(), HandleSide::Right);
    assert_eq!(HandleSide::Right.opposite().opposite(), HandleSide::Right);
}

#[test]
fn track_layout_needs_a_positive_finite_width() {
    assert!(TrackLayout::new(360.0).is_usable());
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(!TrackLayout::new(bad).is_usable(), "{bad}");
    }
}
