use std::path::PathBuf;

use crate::foundation::error::{TrimError, TrimResult};

/// Shortest selectable range, in seconds, for sources at least this long.
pub const MIN_TRIM_SPAN_SECS: f64 = 1.0;

/// Intrinsic metadata of the video being edited.
///
/// `uri` points at the locally playable copy; width, height and duration were probed from the
/// original source reference.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoMetadata {
    /// Local playable copy (or the source itself for local sources).
    pub uri: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Duration in seconds.
    pub duration: f64,
}

/// Selected `[start, end]` interval in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrimRange {
    /// Inclusive start, seconds.
    pub start: f64,
    /// End, seconds.
    pub end: f64,
}

impl TrimRange {
    /// Build a range, rejecting negative or inverted bounds.
    pub fn new(start: f64, end: f64) -> TrimResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TrimError::validation("TrimRange bounds must be finite"));
        }
        if start < 0.0 {
            return Err(TrimError::validation("TrimRange start must be >= 0"));
        }
        if start > end {
            return Err(TrimError::validation("TrimRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// The whole source.
    pub fn full(duration: f64) -> Self {
        Self {
            start: 0.0,
            end: duration.max(0.0),
        }
    }

    /// Selected length in seconds.
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// `true` when `t` lies inside `[start, end)`.
    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// `true` when the range respects bounds and the minimum span for a source of `duration`.
    pub fn is_valid_for(self, duration: f64) -> bool {
        let in_bounds = 0.0 <= self.start && self.start <= self.end && self.end <= duration;
        if duration >= MIN_TRIM_SPAN_SECS {
            in_bounds && self.span() >= MIN_TRIM_SPAN_SECS - 1e-9
        } else {
            in_bounds
        }
    }
}

/// Pixel width of the trim track as laid out by the host UI.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackLayout {
    /// Full track width in pixels, including edge padding.
    pub pixel_width: f64,
}

impl TrackLayout {
    /// Layout of a track `pixel_width` pixels wide.
    pub fn new(pixel_width: f64) -> Self {
        Self { pixel_width }
    }

    /// `true` when the width can drive pixel/time conversion.
    pub fn is_usable(self) -> bool {
        self.pixel_width.is_finite() && self.pixel_width > 0.0
    }
}

/// Player status as last reported by the external player.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackCursor {
    /// Current position, seconds.
    pub position_seconds: f64,
    /// Whether playback is running.
    pub is_playing: bool,
    /// Whether the player output is muted.
    pub is_muted: bool,
}

impl PlaybackCursor {
    /// Position in whole milliseconds, as the player reports and accepts it.
    pub fn position_millis(self) -> u64 {
        secs_to_millis(self.position_seconds)
    }
}

/// One boundary of the trim range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    /// Start boundary.
    Left,
    /// End boundary.
    Right,
}

impl HandleSide {
    /// The other boundary.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

pub(crate) fn secs_to_millis(secs: f64) -> u64 {
    (secs.max(0.0) * 1000.0).round() as u64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
