use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::editor::range::RangeEditor;
use crate::foundation::core::{HandleSide, TrackLayout, TrimRange, VideoMetadata, secs_to_millis};
use crate::foundation::error::{TrimError, TrimResult};
use crate::geometry::time::TrackMetrics;
use crate::media::cache::CacheDir;
use crate::media::engine::MediaEngine;
use crate::media::fetch::Fetcher;
use crate::pipeline::ingest::IngestionPipeline;
use crate::pipeline::process::{ProcessRequest, ProcessingPipeline};
use crate::pipeline::snapshot::{SnapshotPipeline, default_snapshot_time};
use crate::player::command::{Player, PlayerCommand};
use crate::player::guard::{Dispatch, PlaybackBusyGuard};
use crate::session::config::EditorSessionConfig;
use crate::session::host::EditorHost;

/// Track width assumed until the host reports a layout.
pub const DEFAULT_TRACK_WIDTH: f64 = 360.0;

/// Where an editing session is in its life.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorPhase {
    /// No session.
    #[default]
    Closed,
    /// Ingesting the source.
    Opening,
    /// Interactive editing.
    Ready,
    /// Producing the trimmed clip.
    Confirming,
    /// Tearing the session down.
    Closing,
}

/// Artifact handed to the completion callback.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditedClip {
    /// Trimmed file in the cache directory.
    pub uri: PathBuf,
    /// Output duration in seconds, after the duration cap.
    pub duration: f64,
    /// Whether audio was removed.
    pub muted: bool,
}

/// Result of [`EditorLifecycle::open`].
#[derive(Debug)]
pub enum OpenOutcome {
    /// A session was already open; nothing happened.
    Ignored,
    /// The editor is interactive.
    Ready(VideoMetadata),
    /// Ingestion failed. The session stays non-interactive until closed.
    Failed(TrimError),
    /// The session was closed before ingestion finished; its result was dropped.
    Discarded,
}

type CompletionCallback = Box<dyn FnOnce(EditedClip) + Send>;

#[derive(Default)]
struct Session {
    phase: EditorPhase,
    generation: u64,
    config: Option<EditorSessionConfig>,
    metadata: Option<VideoMetadata>,
    editor: Option<RangeEditor>,
    failure: Option<String>,
    on_complete: Option<CompletionCallback>,
}

impl Session {
    fn interactive_editor_mut(&mut self) -> Option<&mut RangeEditor> {
        if self.phase != EditorPhase::Ready || self.failure.is_some() {
            return None;
        }
        self.editor.as_mut()
    }
}

/// Coordinator for one editing session at a time: open, edit, confirm, close.
///
/// All methods take `&self`; asynchronous steps never hold the session lock across an
/// await. Results of an ingestion or encode that finishes after the session moved on are
/// discarded.
pub struct EditorLifecycle<E, F, P, H> {
    engine: E,
    fetcher: F,
    guard: PlaybackBusyGuard<P>,
    host: H,
    cache: CacheDir,
    metrics: TrackMetrics,
    track_width: Mutex<f64>,
    session: Mutex<Session>,
}

impl<E, F, P, H> EditorLifecycle<E, F, P, H>
where
    E: MediaEngine,
    F: Fetcher,
    P: Player,
    H: EditorHost,
{
    /// Closed lifecycle over the given collaborators.
    pub fn new(engine: E, fetcher: F, player: P, host: H, cache: CacheDir) -> Self {
        Self {
            engine,
            fetcher,
            guard: PlaybackBusyGuard::new(player),
            host,
            cache,
            metrics: TrackMetrics::default(),
            track_width: Mutex::new(DEFAULT_TRACK_WIDTH),
            session: Mutex::new(Session::default()),
        }
    }

    /// Replace the track layout constants used by new sessions.
    pub fn with_metrics(mut self, metrics: TrackMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> EditorPhase {
        self.lock().phase
    }

    /// `true` while the editor accepts editing input.
    pub fn is_interactive(&self) -> bool {
        self.lock().interactive_editor_mut().is_some()
    }

    /// Configuration of the open session.
    pub fn config(&self) -> Option<EditorSessionConfig> {
        self.lock().config.clone()
    }

    /// Metadata of the ingested source.
    pub fn metadata(&self) -> Option<VideoMetadata> {
        self.lock().metadata.clone()
    }

    /// Message of the ingestion failure, if the session failed to open.
    pub fn failure(&self) -> Option<String> {
        self.lock().failure.clone()
    }

    /// Committed trim range of the open session.
    pub fn committed_range(&self) -> Option<TrimRange> {
        self.lock().editor.as_ref().map(RangeEditor::committed_range)
    }

    /// Read the range editor of the open session.
    pub fn with_editor<R>(&self, f: impl FnOnce(&RangeEditor) -> R) -> Option<R> {
        self.lock().editor.as_ref().map(f)
    }

    /// Busy guard in front of the player.
    pub fn guard(&self) -> &PlaybackBusyGuard<P> {
        &self.guard
    }

    /// Media engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Remote fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Host collaborator.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Cache directory for copies and artifacts.
    pub fn cache(&self) -> &CacheDir {
        &self.cache
    }

    /// Open a session for `config`. Ignored unless the lifecycle is closed.
    ///
    /// `on_complete` runs once with the trimmed clip when [`Self::confirm`] succeeds.
    /// An invalid config is rejected before any phase change.
    pub async fn open(
        &self,
        config: EditorSessionConfig,
        on_complete: impl FnOnce(EditedClip) + Send + 'static,
    ) -> TrimResult<OpenOutcome> {
        let generation = {
            let mut s = self.lock();
            if s.phase != EditorPhase::Closed {
                tracing::debug!(phase = ?s.phase, "open ignored, session already active");
                return Ok(OpenOutcome::Ignored);
            }
            config.validate()?;
            s.generation += 1;
            s.phase = EditorPhase::Opening;
            s.config = Some(config.clone());
            s.on_complete = Some(Box::new(on_complete));
            tracing::info!(source = %config.source_uri, "editor opening");
            s.generation
        };

        self.host.present().await;

        let ingested = IngestionPipeline::new(&self.engine, &self.fetcher, &self.cache)
            .ingest(&config.source_uri, config.is_local_source)
            .await;

        let metadata = {
            let mut s = self.lock();
            if s.generation != generation || s.phase != EditorPhase::Opening {
                drop(s);
                if let Ok(metadata) = &ingested
                    && !config.is_local_source
                {
                    self.cache.discard(&metadata.uri).await;
                }
                tracing::info!("ingestion finished after close, result discarded");
                return Ok(OpenOutcome::Discarded);
            }
            match ingested {
                Ok(metadata) => {
                    let width = *lock(&self.track_width);
                    s.editor = Some(RangeEditor::with_metrics(
                        metadata.duration,
                        width,
                        self.metrics,
                    ));
                    s.metadata = Some(metadata.clone());
                    s.phase = EditorPhase::Ready;
                    metadata
                }
                Err(err) => {
                    tracing::warn!(error = %err, "ingestion failed");
                    s.failure = Some(err.to_string());
                    drop(s);
                    self.host.failed(&err);
                    return Ok(OpenOutcome::Failed(err));
                }
            }
        };

        tracing::info!(duration = metadata.duration, "editor ready");
        self.host.ready(&metadata);
        self.guard
            .dispatch(PlayerCommand::Load {
                uri: metadata.uri.clone(),
            })
            .await;
        self.guard.dispatch(PlayerCommand::seek_exact(0)).await;

        Ok(OpenOutcome::Ready(metadata))
    }

    /// Encode the committed range, hand the clip to the completion callback, then close.
    ///
    /// On encode failure the session returns to [`EditorPhase::Ready`] with its range intact.
    pub async fn confirm(&self) -> TrimResult<EditedClip> {
        let (generation, request) = {
            let mut s = self.lock();
            let Some(editor) = s.interactive_editor_mut() else {
                return Err(TrimError::invalid_phase(format!(
                    "confirm requires an interactive session (phase {:?})",
                    s.phase
                )));
            };
            let range = editor.committed_range();
            let mute = editor.cursor().is_muted;
            let (Some(metadata), Some(config)) = (&s.metadata, &s.config) else {
                return Err(TrimError::invalid_phase("session has no source"));
            };
            let request = ProcessRequest {
                source: metadata.uri.to_string_lossy().into_owned(),
                range,
                mute,
                max_output_size: config.max_output_size,
                max_duration_seconds: config.max_duration_seconds,
            };
            s.phase = EditorPhase::Confirming;
            (s.generation, request)
        };
        tracing::info!(start = request.range.start, end = request.range.end, "confirming");

        let processed = ProcessingPipeline::new(&self.engine, &self.cache)
            .process(&request)
            .await;

        let (clip, callback) = {
            let mut s = self.lock();
            if s.generation != generation || s.phase != EditorPhase::Confirming {
                drop(s);
                if let Ok(uri) = &processed {
                    self.cache.discard(uri).await;
                }
                tracing::info!("processing finished after close, result discarded");
                return Err(TrimError::invalid_phase("session closed while processing"));
            }
            match processed {
                Ok(uri) => {
                    let clip = EditedClip {
                        uri,
                        duration: request.effective_duration(),
                        muted: request.mute,
                    };
                    (clip, s.on_complete.take())
                }
                Err(err) => {
                    s.phase = EditorPhase::Ready;
                    drop(s);
                    tracing::warn!(error = %err, "processing failed");
                    self.host.failed(&err);
                    return Err(err);
                }
            }
        };

        if let Some(callback) = callback {
            callback(clip.clone());
        }
        self.close().await;
        Ok(clip)
    }

    /// Capture a still frame of the loaded source without changing phase.
    ///
    /// `time_secs` defaults to a quarter of the clip. Extraction failures yield `Ok(None)`.
    pub async fn capture_snapshot(&self, time_secs: Option<f64>) -> TrimResult<Option<PathBuf>> {
        let (source, max_size, time_secs) = {
            let mut s = self.lock();
            if s.interactive_editor_mut().is_none() {
                return Err(TrimError::invalid_phase(format!(
                    "snapshot requires an interactive session (phase {:?})",
                    s.phase
                )));
            }
            let (Some(metadata), Some(config)) = (&s.metadata, &s.config) else {
                return Err(TrimError::invalid_phase("session has no source"));
            };
            if !config.allow_snapshot {
                return Err(TrimError::validation("snapshots are disabled for this session"));
            }
            (
                metadata.uri.to_string_lossy().into_owned(),
                config.effective_snapshot_max_size(),
                time_secs.unwrap_or_else(|| default_snapshot_time(metadata.duration)),
            )
        };

        let snapshot = SnapshotPipeline::new(&self.engine, &self.cache)
            .snapshot(&source, max_size, Some(time_secs))
            .await;
        if snapshot.is_none() {
            self.host
                .failed(&TrimError::snapshot(format!("no frame captured at {time_secs}s")));
        }
        Ok(snapshot)
    }

    /// Tear the session down and dismiss the host view. Returns `false` when already closed
    /// or closing.
    pub async fn close(&self) -> bool {
        {
            let mut s = self.lock();
            match s.phase {
                EditorPhase::Closed | EditorPhase::Closing => {
                    tracing::debug!(phase = ?s.phase, "close ignored");
                    return false;
                }
                EditorPhase::Opening | EditorPhase::Ready | EditorPhase::Confirming => {
                    s.phase = EditorPhase::Closing;
                }
            }
        }
        tracing::info!("editor closing");

        {
            let mut s = self.lock();
            let generation = s.generation;
            *s = Session {
                generation,
                ..Session::default()
            };
        }

        self.host.dismiss().await;
        tracing::info!("editor closed");
        true
    }

    /// Hardware/gesture back action. Routed through [`Self::close`].
    pub async fn back(&self) -> bool {
        self.close().await
    }

    /// Apply the host's latest track layout. Non-positive or non-finite widths are ignored.
    pub fn set_track_layout(&self, layout: TrackLayout) {
        if !layout.is_usable() {
            tracing::debug!(width = layout.pixel_width, "unusable track layout ignored");
            return;
        }
        *lock(&self.track_width) = layout.pixel_width;
        if let Some(editor) = self.lock().editor.as_mut() {
            editor.set_track_width(layout.pixel_width);
        }
    }

    /// Track layout new sessions start from.
    pub fn track_layout(&self) -> TrackLayout {
        TrackLayout::new(*lock(&self.track_width))
    }

    /// Forward a handle drag; previews the candidate boundary when the player is free.
    pub async fn drag_handle(&self, side: HandleSide, pixel_delta: f64) -> Option<Dispatch> {
        self.edit(|editor| editor.on_handle_drag(side, pixel_delta))
            .await
    }

    /// Forward a handle release; seeks to the committed boundary.
    pub async fn release_handle(&self, side: HandleSide) -> Option<Dispatch> {
        self.edit(|editor| editor.on_handle_release(side)).await
    }

    /// Set the committed range directly and seek to its start.
    pub async fn commit_range(&self, start: f64, end: f64) -> TrimResult<TrimRange> {
        let range = {
            let mut s = self.lock();
            let editor = s
                .interactive_editor_mut()
                .ok_or_else(|| TrimError::invalid_phase("no interactive session"))?;
            editor.commit_range(start, end)?
        };
        self.guard
            .dispatch(PlayerCommand::seek_exact(secs_to_millis(range.start)))
            .await;
        Ok(range)
    }

    /// Forward a player status update.
    pub async fn on_playback_status(&self, position_millis: u64) -> Option<Dispatch> {
        self.edit(|editor| editor.on_playback_status(position_millis))
            .await
    }

    /// Flip play/pause.
    pub async fn toggle_playback(&self) -> Option<Dispatch> {
        self.edit(|editor| Some(editor.toggle_playback())).await
    }

    /// Flip the mute flag used for processing and preview.
    pub async fn toggle_mute(&self) -> Option<Dispatch> {
        self.edit(|editor| Some(editor.toggle_mute())).await
    }

    async fn edit(
        &self,
        f: impl FnOnce(&mut RangeEditor) -> Option<PlayerCommand>,
    ) -> Option<Dispatch> {
        let command = {
            let mut s = self.lock();
            f(s.interactive_editor_mut()?)?
        };
        Some(self.guard.dispatch(command).await)
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../../tests/unit/session/lifecycle.rs"]
mod tests;
