use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn offset_then_pixels_round_trips_for_both_sides() {
    let metrics = TrackMetrics::default();
    let width = 400.0;
    let travel = metrics.travel_width(width);

    for &duration in &[1.0, 12.4, 37.0, 3600.0] {
        for step in 0..=10 {
            let t = duration * f64::from(step) / 10.0;

            let left = time_to_pixel_offset(duration, t, width, false);
            assert!(approx(pixels_to_time(duration, left, travel, false), t));

            let right = time_to_pixel_offset(duration, t, width, true);
            assert!(right <= 0.0);
            assert!(approx(pixels_to_time(duration, right, travel, true), t));
        }
    }
}

#[test]
fn zero_duration_maps_to_zero() {
    assert_eq!(pixels_to_time(0.0, 120.0, 320.0, false), 0.0);
    assert_eq!(pixels_to_time(0.0, 120.0, 320.0, true), 0.0);
    assert_eq!(time_to_pixel_offset(0.0, 5.0, 400.0, false), 0.0);
    assert_eq!(time_to_pixel_offset(0.0, 5.0, 400.0, true), 0.0);
}

#[test]
fn degenerate_track_width_maps_to_zero() {
    assert_eq!(pixels_to_time(10.0, 50.0, 0.0, false), 0.0);
}

#[test]
fn negative_delta_uses_magnitude() {
    assert!(approx(pixels_to_time(10.0, -32.0, 320.0, false), 1.0));
    assert!(approx(pixels_to_time(10.0, -32.0, 320.0, true), 9.0));
}

#[test]
fn edge_padding_centers_handle_in_padding() {
    assert_eq!(TrackMetrics::default().edge_padding(), 30.0);
}

#[test]
fn playhead_snaps_inside_left_handle() {
    assert_eq!(snap_playhead_offset(5.0, 0.0, 200.0, 20.0, 2.0), 18.0);
    // Trailing edge overlap counts too.
    assert_eq!(snap_playhead_offset(50.0, 60.0, 200.0, 20.0, 2.0), 78.0);
}

#[test]
fn playhead_snaps_inside_right_handle() {
    assert_eq!(snap_playhead_offset(205.0, 0.0, 200.0, 20.0, 2.0), 200.0);
    assert_eq!(snap_playhead_offset(185.0, 0.0, 200.0, 20.0, 2.0), 200.0);
}

#[test]
fn handle_footprint_excludes_its_far_edge() {
    // Left footprint is [0, 20): the far edge itself is outside.
    assert_eq!(snap_playhead_offset(20.0, 0.0, 200.0, 20.0, 2.0), 20.0);
    assert_eq!(snap_playhead_offset(19.5, 0.0, 200.0, 20.0, 2.0), 18.0);
    // offset + handle_width landing on the near edge is inside.
    assert_eq!(snap_playhead_offset(-20.0, 0.0, 200.0, 20.0, 2.0), 18.0);
    // Right footprint is [200, 220).
    assert_eq!(snap_playhead_offset(220.0, 0.0, 200.0, 20.0, 2.0), 220.0);
    assert_eq!(snap_playhead_offset(180.0, 0.0, 200.0, 20.0, 2.0), 200.0);
}

#[test]
fn playhead_away_from_handles_is_untouched() {
    assert_eq!(snap_playhead_offset(100.0, 0.0, 200.0, 20.0, 2.0), 100.0);
    assert_eq!(
        TrackMetrics::default().snap_playhead_offset(100.0, 0.0, 200.0),
        100.0
    );
}
