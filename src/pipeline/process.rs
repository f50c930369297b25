use std::path::PathBuf;

use crate::foundation::core::TrimRange;
use crate::foundation::error::{TrimError, TrimResult};
use crate::media::cache::CacheDir;
use crate::media::command::{Directive, EncodeCommand, OUTPUT_VIDEO_CODEC};
use crate::media::engine::MediaEngine;

/// Everything that determines a trimmed output.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRequest {
    /// Source to read (the local playable copy).
    pub source: String,
    /// Selected range.
    pub range: TrimRange,
    /// Drop audio from the output.
    pub mute: bool,
    /// Cap for the longer output dimension.
    pub max_output_size: Option<u32>,
    /// Cap for the output duration.
    pub max_duration_seconds: Option<u32>,
}

impl ProcessRequest {
    /// Selected span, capped by `max_duration_seconds` when that is set and non-zero.
    pub fn effective_duration(&self) -> f64 {
        let span = self.range.span();
        match self.max_duration_seconds {
            Some(cap) if cap > 0 => span.min(f64::from(cap)),
            _ => span,
        }
    }

    /// Start offset, omitted when the range starts at zero.
    pub fn effective_start(&self) -> Option<f64> {
        (self.range.start > 0.0).then_some(self.range.start)
    }
}

/// Deterministic trim command for `req` writing to `output`.
pub fn build_trim_command(req: &ProcessRequest, output: PathBuf) -> EncodeCommand {
    let duration = req.effective_duration();
    EncodeCommand::new()
        .push(Directive::Input(req.source.clone()))
        .push_opt(req.max_output_size.map(Directive::ScaleToFit))
        .push_opt(req.effective_start().map(Directive::StartOffset))
        .push_opt((duration > 0.0).then_some(Directive::DurationLimit(duration)))
        .push(Directive::VideoCodec(OUTPUT_VIDEO_CODEC.to_owned()))
        .push_opt(req.mute.then_some(Directive::RemoveAudio))
        .push(Directive::Output(output))
}

/// Re-encodes the selected range into a new file in the cache.
pub struct ProcessingPipeline<'a, E> {
    engine: &'a E,
    cache: &'a CacheDir,
}

impl<'a, E: MediaEngine> ProcessingPipeline<'a, E> {
    /// Pipeline over the given collaborators.
    pub fn new(engine: &'a E, cache: &'a CacheDir) -> Self {
        Self { engine, cache }
    }

    /// Produce the trimmed artifact and return its path.
    #[tracing::instrument(skip(self))]
    pub async fn process(&self, req: &ProcessRequest) -> TrimResult<PathBuf> {
        if req.max_output_size == Some(0) {
            return Err(TrimError::validation("max_output_size must be non-zero"));
        }
        self.cache.ensure().await?;

        let output = self.cache.unique_path("mp4");
        let cmd = build_trim_command(req, output.clone());
        let outcome = self
            .engine
            .execute(&cmd.invocation())
            .await
            .map_err(|e| TrimError::encode(e.to_string()))?;

        if !outcome.return_code.is_success() {
            return Err(TrimError::encode(format!(
                "ffmpeg failed ({:?}): {}",
                outcome.return_code,
                outcome.log.trim()
            )));
        }

        tracing::info!(output = %output.display(), "trimmed clip written");
        Ok(output)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/process.rs"]
mod tests;
