//! Pixel/time mapping for a trim track of known width and duration.
//!
//! All functions are pure. A zero duration (or a degenerate track) maps to `0.0` instead of
//! dividing by zero.

/// Horizontal space reserved around the track for the two handles.
pub const TRACK_PADDING: f64 = 80.0;
/// Visible width of a drag handle.
pub const HANDLE_WIDTH: f64 = 20.0;
/// Width of the enlarged touch target beside each handle.
pub const RESPONDER_WIDTH: f64 = 40.0;
/// Width of the playhead indicator.
pub const POINTER_WIDTH: f64 = 2.0;

/// Layout constants of the trim track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackMetrics {
    /// Total padding subtracted from the track width for handle travel.
    pub padding: f64,
    /// Visible handle width.
    pub handle_width: f64,
    /// Touch target width beside each handle.
    pub responder_width: f64,
    /// Playhead width.
    pub pointer_width: f64,
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self {
            padding: TRACK_PADDING,
            handle_width: HANDLE_WIDTH,
            responder_width: RESPONDER_WIDTH,
            pointer_width: POINTER_WIDTH,
        }
    }
}

impl TrackMetrics {
    /// Inset applied on each side of the track so a handle centers on the padding.
    pub fn edge_padding(&self) -> f64 {
        self.padding / 2.0 - self.handle_width / 2.0
    }

    /// Width available to handle travel.
    pub fn travel_width(&self, track_width: f64) -> f64 {
        track_width - self.padding
    }

    /// Signed pixel offset of a handle placed at `time`.
    ///
    /// Left-anchored offsets grow from `0`; right-anchored offsets are `<= 0` and measured back
    /// from the right edge.
    pub fn time_to_pixel_offset(
        &self,
        duration: f64,
        time: f64,
        track_width: f64,
        from_right: bool,
    ) -> f64 {
        if duration == 0.0 {
            return 0.0;
        }
        let travel = self.travel_width(track_width);
        let offset = (time * travel / duration).abs();
        if from_right { offset - travel } else { offset }
    }

    /// Snap a playhead offset so it does not overlap either handle.
    pub fn snap_playhead_offset(&self, offset: f64, left_offset: f64, right_offset: f64) -> f64 {
        snap_playhead_offset(
            offset,
            left_offset,
            right_offset,
            self.handle_width,
            self.pointer_width,
        )
    }
}

/// Time value for a handle dragged `pixel_delta` pixels across a track `track_width` wide.
///
/// Right-anchored deltas are measured back from the end. Callers clamp to `[0, duration]`.
pub fn pixels_to_time(duration: f64, pixel_delta: f64, track_width: f64, from_right: bool) -> f64 {
    if duration == 0.0 || track_width <= 0.0 {
        return 0.0;
    }
    let t = duration * pixel_delta.abs() / track_width;
    if from_right { duration - t } else { t }
}

/// [`TrackMetrics::time_to_pixel_offset`] with the default layout constants.
pub fn time_to_pixel_offset(duration: f64, time: f64, track_width: f64, from_right: bool) -> f64 {
    TrackMetrics::default().time_to_pixel_offset(duration, time, track_width, from_right)
}

/// Move the playhead just inside a handle when its footprint touches that handle.
///
/// `right_offset` is the absolute left edge of the right handle.
pub fn snap_playhead_offset(
    offset: f64,
    left_offset: f64,
    right_offset: f64,
    handle_width: f64,
    pointer_width: f64,
) -> f64 {
    let touches = |edge: f64| {
        in_range(offset, edge, edge + handle_width)
            || in_range(offset + handle_width, edge, edge + handle_width)
    };

    if touches(left_offset) {
        return left_offset + handle_width - 2.0;
    }
    if touches(right_offset) {
        return right_offset - pointer_width + 2.0;
    }
    offset
}

// Half-open `[lo, hi)`, tolerant of swapped bounds.
fn in_range(x: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo <= x && x < hi
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/time.rs"]
mod tests;
