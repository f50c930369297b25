use std::path::PathBuf;

use crate::foundation::error::{TrimError, TrimResult};
use crate::media::cache::CacheDir;
use crate::media::command::{Directive, EncodeCommand, SNAPSHOT_CODEC, SNAPSHOT_QUALITY};
use crate::media::engine::MediaEngine;
use crate::media::probe::probe_duration;

/// Fraction of the clip at which a snapshot is taken when no time is given.
pub const DEFAULT_SNAPSHOT_FRACTION: f64 = 0.25;

/// Default snapshot time for a clip of `duration` seconds, rounded up to a whole second.
pub fn default_snapshot_time(duration: f64) -> f64 {
    (duration * DEFAULT_SNAPSHOT_FRACTION).ceil()
}

/// Single-frame JPEG extraction command.
pub fn build_snapshot_command(
    source: &str,
    max_image_size: u32,
    time_secs: f64,
    output: PathBuf,
) -> EncodeCommand {
    EncodeCommand::new()
        .push(Directive::Input(source.to_owned()))
        .push(Directive::StartOffset(time_secs))
        .push(Directive::ScaleToFit(max_image_size))
        .push(Directive::Quality(SNAPSHOT_QUALITY))
        .push(Directive::FrameLimit(1))
        .push(Directive::Format("image2".to_owned()))
        .push(Directive::VideoCodec(SNAPSHOT_CODEC.to_owned()))
        .push(Directive::Output(output))
}

/// Extracts one still frame. Failures never propagate: they are logged and yield `None`.
pub struct SnapshotPipeline<'a, E> {
    engine: &'a E,
    cache: &'a CacheDir,
}

impl<'a, E: MediaEngine> SnapshotPipeline<'a, E> {
    /// Pipeline over the given collaborators.
    pub fn new(engine: &'a E, cache: &'a CacheDir) -> Self {
        Self { engine, cache }
    }

    /// Capture a frame of `source` at `time_secs`, or at [`default_snapshot_time`] of the
    /// probed duration when `None`.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(
        &self,
        source: &str,
        max_image_size: u32,
        time_secs: Option<f64>,
    ) -> Option<PathBuf> {
        match self.try_snapshot(source, max_image_size, time_secs).await {
            Ok(path) => {
                tracing::info!(output = %path.display(), "snapshot written");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "snapshot failed");
                None
            }
        }
    }

    async fn try_snapshot(
        &self,
        source: &str,
        max_image_size: u32,
        time_secs: Option<f64>,
    ) -> TrimResult<PathBuf> {
        if max_image_size == 0 {
            return Err(TrimError::snapshot("max image size must be non-zero"));
        }
        let time_secs = match time_secs {
            Some(t) if t.is_finite() && t >= 0.0 => t,
            Some(t) => return Err(TrimError::snapshot(format!("invalid snapshot time {t}"))),
            None => default_snapshot_time(probe_duration(self.engine, source).await?),
        };

        self.cache.ensure().await?;
        let output = self.cache.unique_path("jpg");
        let cmd = build_snapshot_command(source, max_image_size, time_secs, output.clone());
        let outcome = self.engine.execute(&cmd.invocation()).await?;

        if !outcome.return_code.is_success() {
            return Err(TrimError::snapshot(format!(
                "ffmpeg failed ({:?}): {}",
                outcome.return_code,
                outcome.log.trim()
            )));
        }
        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(TrimError::snapshot(format!(
                "no frame written at {time_secs}s"
            )));
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/snapshot.rs"]
mod tests;
