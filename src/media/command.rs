use std::path::{Path, PathBuf};

use crate::media::engine::{Invocation, Tool};

/// Video codec used for trimmed output.
pub const OUTPUT_VIDEO_CODEC: &str = "libx264";
/// Codec used for still-frame output.
pub const SNAPSHOT_CODEC: &str = "mjpeg";
/// JPEG quality scale for still frames (lower is better).
pub const SNAPSHOT_QUALITY: u32 = 2;

/// One semantic step of an encode command. Order is significant.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// Source to read.
    Input(String),
    /// Cap the longer dimension, keeping aspect ratio and even dimensions.
    ScaleToFit(u32),
    /// Skip this many seconds of input.
    StartOffset(f64),
    /// Stop after this many seconds of output.
    DurationLimit(f64),
    /// Video codec.
    VideoCodec(String),
    /// Drop all audio streams.
    RemoveAudio,
    /// Codec quality scale.
    Quality(u32),
    /// Emit at most this many video frames.
    FrameLimit(u32),
    /// Force the output muxer.
    Format(String),
    /// Destination file.
    Output(PathBuf),
}

/// Ordered list of [`Directive`]s rendered to `ffmpeg` arguments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodeCommand {
    directives: Vec<Directive>,
}

impl EncodeCommand {
    /// Empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a directive.
    pub fn push(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Append `directive` only when `Some`.
    pub fn push_opt(self, directive: Option<Directive>) -> Self {
        match directive {
            Some(d) => self.push(d),
            None => self,
        }
    }

    /// Directives in order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Start offset, if the command has one.
    pub fn start_offset(&self) -> Option<f64> {
        self.directives.iter().find_map(|d| match d {
            Directive::StartOffset(s) => Some(*s),
            _ => None,
        })
    }

    /// Duration limit, if the command has one.
    pub fn duration_limit(&self) -> Option<f64> {
        self.directives.iter().find_map(|d| match d {
            Directive::DurationLimit(s) => Some(*s),
            _ => None,
        })
    }

    /// Output path, if the command has one.
    pub fn output(&self) -> Option<&Path> {
        self.directives.iter().find_map(|d| match d {
            Directive::Output(p) => Some(p.as_path()),
            _ => None,
        })
    }

    /// Render to `ffmpeg` arguments.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.directives.len() * 2);
        for d in &self.directives {
            match d {
                Directive::Input(src) => args.extend(["-i".to_owned(), src.clone()]),
                Directive::ScaleToFit(max) => args.extend(["-vf".to_owned(), scale_filter(*max)]),
                Directive::StartOffset(s) => args.extend(["-ss".to_owned(), format_seconds(*s)]),
                Directive::DurationLimit(s) => args.extend(["-t".to_owned(), format_seconds(*s)]),
                Directive::VideoCodec(c) => args.extend(["-c:v".to_owned(), c.clone()]),
                Directive::RemoveAudio => args.push("-an".to_owned()),
                Directive::Quality(q) => args.extend(["-qscale:v".to_owned(), q.to_string()]),
                Directive::FrameLimit(n) => args.extend(["-frames:v".to_owned(), n.to_string()]),
                Directive::Format(f) => args.extend(["-f".to_owned(), f.clone()]),
                Directive::Output(p) => args.push(p.to_string_lossy().into_owned()),
            }
        }
        args
    }

    /// `ffmpeg` invocation for this command.
    pub fn invocation(&self) -> Invocation {
        Invocation::new(Tool::Ffmpeg, self.to_args())
    }
}

/// `scale` filter capping the longer side at `max` and letting `ffmpeg` pick an even
/// proportional value (`-2`) for the shorter side.
pub fn scale_filter(max: u32) -> String {
    format!(
        "scale=if(gt(iw\\,ih)\\,min({max}\\,iw)\\,-2):if(gt(iw\\,ih)\\,-2\\,min({max}\\,ih))"
    )
}

/// Seconds rendered with millisecond precision and no trailing zeros.
pub fn format_seconds(secs: f64) -> String {
    let ms = (secs * 1000.0).round() / 1000.0;
    format!("{ms}")
}

#[cfg(test)]
#[path = "../../tests/unit/media/command.rs"]
mod tests;
