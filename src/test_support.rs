//! Scripted collaborators shared by the unit tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::foundation::core::VideoMetadata;
use crate::foundation::error::{TrimError, TrimResult};
use crate::media::engine::{ExecOutcome, Invocation, MediaEngine, Tool};
use crate::media::fetch::Fetcher;
use crate::player::command::{Player, PlayerCommand};
use crate::session::host::EditorHost;

type Script = Box<dyn Fn(&Invocation) -> TrimResult<ExecOutcome> + Send + Sync>;

/// Engine answering each invocation from a closure and recording what it was asked.
pub(crate) struct ScriptedEngine {
    script: Script,
    calls: Mutex<Vec<Invocation>>,
    write_outputs: bool,
    gate: Option<Arc<Notify>>,
}

impl ScriptedEngine {
    pub(crate) fn new(
        script: impl Fn(&Invocation) -> TrimResult<ExecOutcome> + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            calls: Mutex::new(Vec::new()),
            write_outputs: false,
            gate: None,
        }
    }

    /// Probes report `width x height x duration`; ffmpeg runs succeed and write their output.
    pub(crate) fn media(width: u32, height: u32, duration: f64) -> Self {
        Self::new(move |inv| {
            Ok(match inv.tool {
                Tool::Ffprobe if inv.args.iter().any(|a| a == "format=duration") => {
                    ExecOutcome::success(format!("{duration}\n"))
                }
                Tool::Ffprobe => ExecOutcome::success(format!("{width}x{height}x{duration}\n")),
                Tool::Ffmpeg => ExecOutcome::success(""),
            })
        })
        .writing_outputs()
    }

    /// Successful ffmpeg runs create an empty file at their last argument.
    pub(crate) fn writing_outputs(mut self) -> Self {
        self.write_outputs = true;
        self
    }

    /// Every invocation waits for a permit on `gate` before answering.
    pub(crate) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn ffmpeg_invocations(&self) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.tool == Tool::Ffmpeg)
            .collect()
    }
}

impl MediaEngine for ScriptedEngine {
    async fn execute(&self, invocation: &Invocation) -> TrimResult<ExecOutcome> {
        self.calls.lock().unwrap().push(invocation.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let outcome = (self.script)(invocation)?;
        if self.write_outputs
            && invocation.tool == Tool::Ffmpeg
            && outcome.return_code.is_success()
            && let Some(out) = invocation.args.last()
        {
            std::fs::write(out, b"").map_err(|e| TrimError::Other(e.into()))?;
        }
        Ok(outcome)
    }
}

/// Fetcher recording `(remote, local)` pairs. Writes an empty file unless failing.
#[derive(Default)]
pub(crate) struct RecordingFetcher {
    calls: Mutex<Vec<(String, PathBuf)>>,
    fail: bool,
}

impl RecordingFetcher {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for RecordingFetcher {
    async fn fetch(&self, remote: &str, local: &Path) -> TrimResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((remote.to_owned(), local.to_path_buf()));
        if self.fail {
            return Err(TrimError::media_fetch(format!("{remote}: connection reset")));
        }
        tokio::fs::write(local, b"")
            .await
            .map_err(|e| TrimError::media_fetch(e.to_string()))
    }
}

/// Player recording every command it applies.
#[derive(Default)]
pub(crate) struct RecordingPlayer {
    commands: Mutex<Vec<PlayerCommand>>,
}

impl RecordingPlayer {
    pub(crate) fn commands(&self) -> Vec<PlayerCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl Player for RecordingPlayer {
    async fn execute(&self, command: &PlayerCommand) -> anyhow::Result<()> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(())
    }
}

/// Host counting presentations and dismissals.
#[derive(Default)]
pub(crate) struct RecordingHost {
    pub(crate) presented: AtomicUsize,
    pub(crate) dismissed: AtomicUsize,
    pub(crate) ready: Mutex<Vec<VideoMetadata>>,
    pub(crate) failures: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub(crate) fn presented(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }

    pub(crate) fn dismissed(&self) -> usize {
        self.dismissed.load(Ordering::SeqCst)
    }

    pub(crate) fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }
}

impl EditorHost for RecordingHost {
    async fn present(&self) {
        self.presented.fetch_add(1, Ordering::SeqCst);
    }

    async fn dismiss(&self) {
        self.dismissed.fetch_add(1, Ordering::SeqCst);
    }

    fn ready(&self, metadata: &VideoMetadata) {
        self.ready.lock().unwrap().push(metadata.clone());
    }

    fn failed(&self, error: &TrimError) {
        self.failures.lock().unwrap().push(error.to_string());
    }
}
