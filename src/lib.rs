//! vidtrim is an embeddable video trim editing engine.
//!
//! A host application opens a session for a source video, lets the user drag two handles to
//! select a sub-range, and confirms to receive a re-encoded clip. The crate owns the parts with
//! real invariants and leaves presentation to the host.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: copy a remote source into the cache while probing its metadata
//!    ([`IngestionPipeline`])
//! 2. **Edit**: map handle drags to times and keep the committed range valid ([`RangeEditor`]),
//!    sending preview commands to the player through a single-flight gate
//!    ([`PlaybackBusyGuard`])
//! 3. **Process**: trim, scale and optionally mute the committed range with the system
//!    `ffmpeg` binary ([`ProcessingPipeline`]), or extract a still frame ([`SnapshotPipeline`])
//!
//! [`EditorLifecycle`] ties these together behind open, confirm and close.
//!
//! # Collaborators
//!
//! The media engine, remote fetcher, player and host view are traits ([`MediaEngine`],
//! [`Fetcher`], [`Player`], [`EditorHost`]). [`FfmpegEngine`], [`HttpFetcher`], [`NullPlayer`]
//! and [`HeadlessHost`] are the bundled implementations used by the `vidtrim` CLI.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod editor;
mod foundation;
mod geometry;
mod media;
mod pipeline;
mod player;
mod session;

#[cfg(test)]
mod test_support;

pub use editor::range::{RangeEditor, ResponderLayout, format_time_span};
pub use foundation::core::{
    HandleSide, MIN_TRIM_SPAN_SECS, PlaybackCursor, TrackLayout, TrimRange, VideoMetadata,
};
pub use foundation::error::{TrimError, TrimResult};
pub use geometry::time::{
    HANDLE_WIDTH, POINTER_WIDTH, RESPONDER_WIDTH, TRACK_PADDING, TrackMetrics, pixels_to_time,
    snap_playhead_offset, time_to_pixel_offset,
};
pub use media::cache::CacheDir;
pub use media::command::{
    Directive, EncodeCommand, OUTPUT_VIDEO_CODEC, SNAPSHOT_CODEC, SNAPSHOT_QUALITY,
    format_seconds, scale_filter,
};
pub use media::engine::{
    EngineConfig, ExecOutcome, FfmpegEngine, Invocation, MediaEngine, ReturnCode, Tool,
};
pub use media::fetch::{Fetcher, HttpFetcher};
pub use media::probe::{
    StreamProbe, duration_probe_invocation, parse_duration_probe, parse_stream_probe,
    probe_duration, probe_stream, stream_probe_invocation,
};
pub use pipeline::ingest::IngestionPipeline;
pub use pipeline::process::{ProcessRequest, ProcessingPipeline, build_trim_command};
pub use pipeline::snapshot::{
    DEFAULT_SNAPSHOT_FRACTION, SnapshotPipeline, build_snapshot_command, default_snapshot_time,
};
pub use player::command::{NullPlayer, Player, PlayerCommand, SeekTolerance};
pub use player::guard::{Dispatch, PlaybackBusyGuard};
pub use session::config::{DEFAULT_SNAPSHOT_MAX_SIZE, EditorSessionConfig};
pub use session::host::{EditorHost, HeadlessHost};
pub use session::lifecycle::{
    DEFAULT_TRACK_WIDTH, EditedClip, EditorLifecycle, EditorPhase, OpenOutcome,
};
