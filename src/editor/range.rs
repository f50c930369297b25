use crate::foundation::core::{
    HandleSide, MIN_TRIM_SPAN_SECS, PlaybackCursor, TrimRange, secs_to_millis,
};
use crate::foundation::error::{TrimError, TrimResult};
use crate::geometry::time::{TrackMetrics, pixels_to_time};
use crate::player::command::PlayerCommand;

/// How drag hit-targets can be laid out for the current handle positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponderLayout {
    /// Independent hit-targets; each flag says whether that side's enlarged target is shown.
    Split {
        /// Left enlarged target visible.
        left: bool,
        /// Right enlarged target visible.
        right: bool,
    },
    /// Not enough room between the handles; a single merged region must be used.
    Merged,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct HandleDrag {
    // Offset at the start of the current drag (signed, see `TrackMetrics::time_to_pixel_offset`).
    base: f64,
    // Cumulative delta reported by the in-progress gesture.
    delta: f64,
}

impl HandleDrag {
    fn position(self) -> f64 {
        self.base + self.delta
    }

    fn settle(&mut self, base: f64) {
        self.base = base;
        self.delta = 0.0;
    }
}

/// Owns the trim range and turns handle gestures into committed boundaries.
///
/// Drags move a displayed candidate only; [`RangeEditor::on_handle_release`] commits it.
/// Committed ranges always satisfy `0 <= start <= end <= duration` and
/// `end - start >= min(1s, duration)`.
#[derive(Clone, Debug)]
pub struct RangeEditor {
    metrics: TrackMetrics,
    duration: f64,
    track_width: f64,
    committed: TrimRange,
    candidate: TrimRange,
    left: HandleDrag,
    right: HandleDrag,
    active: Option<HandleSide>,
    cursor: PlaybackCursor,
}

impl RangeEditor {
    /// Editor over a source of `duration` seconds on a track `track_width` pixels wide.
    pub fn new(duration: f64, track_width: f64) -> Self {
        Self::with_metrics(duration, track_width, TrackMetrics::default())
    }

    /// Editor with explicit layout constants.
    pub fn with_metrics(duration: f64, track_width: f64, metrics: TrackMetrics) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        let full = TrimRange::full(duration);
        Self {
            metrics,
            duration,
            track_width,
            committed: full,
            candidate: full,
            left: HandleDrag::default(),
            right: HandleDrag::default(),
            active: None,
            cursor: PlaybackCursor::default(),
        }
    }

    /// Source duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current track width in pixels.
    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    /// Layout constants.
    pub fn metrics(&self) -> &TrackMetrics {
        &self.metrics
    }

    /// The range that processing will use.
    pub fn committed_range(&self) -> TrimRange {
        self.committed
    }

    /// The range to render: the drag candidate while a handle is held, else the committed one.
    pub fn displayed_range(&self) -> TrimRange {
        self.candidate
    }

    /// Handle currently being dragged.
    pub fn active_handle(&self) -> Option<HandleSide> {
        self.active
    }

    /// Last known player status.
    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// Shortest committed span for this source.
    pub fn min_span(&self) -> f64 {
        MIN_TRIM_SPAN_SECS.min(self.duration)
    }

    /// Host layout changed. Handle offsets are re-derived from the committed times.
    pub fn set_track_width(&mut self, track_width: f64) {
        self.track_width = track_width;
        self.resync_bases();
    }

    /// Apply a drag of `pixel_delta` (cumulative since the gesture started) to `side`.
    ///
    /// Returns a best-effort preview seek to the candidate boundary. Drags on the other
    /// handle are ignored until the active one is released.
    pub fn on_handle_drag(&mut self, side: HandleSide, pixel_delta: f64) -> Option<PlayerCommand> {
        if self.duration <= 0.0 || !pixel_delta.is_finite() {
            return None;
        }
        if self.active.is_some_and(|a| a != side) {
            return None;
        }
        self.active = Some(side);

        let travel = self.metrics.travel_width(self.track_width);
        match side {
            HandleSide::Left => {
                self.left.delta = pixel_delta;
                let pos = self.left.position();
                let start = if pos <= 0.0 {
                    0.0
                } else {
                    pixels_to_time(self.duration, pos, travel, false)
                };
                self.candidate.start = start.clamp(0.0, self.duration);
                Some(PlayerCommand::seek_exact(secs_to_millis(self.candidate.start)))
            }
            HandleSide::Right => {
                self.right.delta = pixel_delta;
                let pos = self.right.position();
                let end = if pos >= 0.0 {
                    self.duration
                } else {
                    pixels_to_time(self.duration, pos, travel, true)
                };
                self.candidate.end = end.clamp(0.0, self.duration);
                Some(PlayerCommand::seek_exact(secs_to_millis(self.candidate.end)))
            }
        }
    }

    /// Commit the candidate for `side`.
    ///
    /// Past the track edge the boundary clamps to `0`/`duration`. A candidate closer than the
    /// minimum span to the committed opposite boundary is pulled back to exactly the minimum
    /// span; the opposite boundary moves only when the dragged one would leave the track.
    /// Returns a seek to the committed boundary so a dropped preview heals.
    pub fn on_handle_release(&mut self, side: HandleSide) -> Option<PlayerCommand> {
        if self.active != Some(side) {
            return None;
        }
        self.active = None;

        let min_span = self.min_span();
        let position = match side {
            HandleSide::Left => self.left.position(),
            HandleSide::Right => self.right.position(),
        };

        match side {
            HandleSide::Left => {
                if position < 0.0 {
                    self.committed.start = 0.0;
                    self.left.settle(0.0);
                } else if self.committed.end - self.candidate.start < min_span {
                    let mut start = self.committed.end - min_span;
                    if start < 0.0 {
                        start = 0.0;
                        self.committed.end = min_span;
                        let base = self.offset_of(self.committed.end, true);
                        self.right.settle(base);
                    }
                    self.committed.start = start;
                    let base = self.offset_of(start, false);
                    self.left.settle(base);
                } else {
                    self.committed.start = self.candidate.start;
                    self.left.settle(position);
                }
            }
            HandleSide::Right => {
                if position > 0.0 {
                    self.committed.end = self.duration;
                    self.right.settle(0.0);
                } else if self.candidate.end - self.committed.start < min_span {
                    let mut end = self.committed.start + min_span;
                    if end > self.duration {
                        end = self.duration;
                        self.committed.start = self.duration - min_span;
                        let base = self.offset_of(self.committed.start, false);
                        self.left.settle(base);
                    }
                    self.committed.end = end;
                    let base = self.offset_of(end, true);
                    self.right.settle(base);
                } else {
                    self.committed.end = self.candidate.end;
                    self.right.settle(position);
                }
            }
        }

        self.candidate = self.committed;
        tracing::debug!(
            ?side,
            start = self.committed.start,
            end = self.committed.end,
            "trim boundary committed"
        );

        let boundary = match side {
            HandleSide::Left => self.committed.start,
            HandleSide::Right => self.committed.end,
        };
        Some(PlayerCommand::seek_exact(secs_to_millis(boundary)))
    }

    /// Commit an exact range, applying the same bounds and minimum-span rules as release.
    pub fn commit_range(&mut self, start: f64, end: f64) -> TrimResult<TrimRange> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TrimError::validation("trim bounds must be finite"));
        }
        if end < start {
            return Err(TrimError::validation("trim end must not precede start"));
        }

        let min_span = self.min_span();
        let mut start = start.clamp(0.0, self.duration);
        let mut end = end.clamp(0.0, self.duration);
        if end - start < min_span {
            end = start + min_span;
            if end > self.duration {
                end = self.duration;
                start = self.duration - min_span;
            }
        }

        self.committed = TrimRange { start, end };
        self.candidate = self.committed;
        self.active = None;
        self.resync_bases();
        Ok(self.committed)
    }

    /// Reset to the full range of a new source.
    pub fn reset(&mut self, duration: f64) {
        *self = Self::with_metrics(duration, self.track_width, self.metrics);
    }

    /// Signed offsets of the left and right handles for the displayed range.
    pub fn handle_offsets(&self) -> (f64, f64) {
        (
            self.offset_of(self.candidate.start, false),
            self.offset_of(self.candidate.end, true),
        )
    }

    /// Whether independent hit-targets fit between the handles.
    pub fn responder_layout(&self) -> ResponderLayout {
        let (left, right) = self.handle_offsets();
        let m = &self.metrics;
        let room = self.track_width
            - m.edge_padding() * 2.0
            - m.handle_width * 2.0
            - right.abs()
            - left.abs()
            - m.responder_width * 2.0;

        if room > 0.0 {
            ResponderLayout::Split {
                left: left < m.responder_width,
                right: right > -m.responder_width,
            }
        } else {
            ResponderLayout::Merged
        }
    }

    /// Width of the enlarged hit-target beside `side`, or `0.0` when it is hidden.
    pub fn visible_handle_responder_width(&self, side: HandleSide) -> f64 {
        let shown = match (self.responder_layout(), side) {
            (ResponderLayout::Split { left, .. }, HandleSide::Left) => left,
            (ResponderLayout::Split { right, .. }, HandleSide::Right) => right,
            (ResponderLayout::Merged, _) => false,
        };
        if shown { self.metrics.responder_width } else { 0.0 }
    }

    /// Playhead offset from the left edge, kept clear of both handles.
    pub fn playhead_offset(&self) -> f64 {
        let (left, right) = self.handle_offsets();
        let m = &self.metrics;
        let raw = self.offset_of(self.cursor.position_seconds, false);
        let right_edge = self.track_width - m.edge_padding() * 2.0 - m.handle_width + right;
        m.snap_playhead_offset(raw, left, right_edge)
    }

    /// Length of the displayed range.
    pub fn trimmed_duration(&self) -> f64 {
        self.candidate.span()
    }

    /// Playback position relative to the displayed start.
    pub fn trimmed_current_time(&self) -> f64 {
        self.cursor.position_seconds - self.candidate.start
    }

    /// `true` once the cursor is at or past the committed end.
    pub fn reached_trim_end(&self) -> bool {
        self.cursor.position_seconds >= self.committed.end
    }

    /// Record a player status update. Loops playback back to the start once it runs past the
    /// committed end.
    pub fn on_playback_status(&mut self, position_millis: u64) -> Option<PlayerCommand> {
        self.cursor.position_seconds = position_millis as f64 / 1000.0;
        if self.cursor.is_playing && self.active.is_none() && self.reached_trim_end() {
            return Some(PlayerCommand::play_from_exact(secs_to_millis(
                self.committed.start,
            )));
        }
        None
    }

    /// Flip play/pause. Starting outside the committed range restarts from its start.
    pub fn toggle_playback(&mut self) -> PlayerCommand {
        if self.cursor.is_playing {
            self.cursor.is_playing = false;
            return PlayerCommand::Pause;
        }
        self.cursor.is_playing = true;
        if self.committed.contains(self.cursor.position_seconds) {
            PlayerCommand::Play
        } else {
            PlayerCommand::play_from_exact(secs_to_millis(self.committed.start))
        }
    }

    /// Set the mute flag that processing will honor.
    pub fn set_muted(&mut self, muted: bool) -> PlayerCommand {
        self.cursor.is_muted = muted;
        PlayerCommand::SetMuted(muted)
    }

    /// Flip the mute flag.
    pub fn toggle_mute(&mut self) -> PlayerCommand {
        self.set_muted(!self.cursor.is_muted)
    }

    fn offset_of(&self, time: f64, from_right: bool) -> f64 {
        self.metrics
            .time_to_pixel_offset(self.duration, time, self.track_width, from_right)
    }

    fn resync_bases(&mut self) {
        let left = self.offset_of(self.committed.start, false);
        let right = self.offset_of(self.committed.end, true);
        self.left.settle(left);
        self.right.settle(right);
    }
}

/// `m:ss` readout; negative spans get a leading `-`.
pub fn format_time_span(secs: f64) -> String {
    let sign = if secs < 0.0 { "-" } else { "" };
    let total = secs.abs().floor() as u64;
    format!("{sign}{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/range.rs"]
mod tests;
