use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use crate::foundation::error::{TrimError, TrimResult};

/// Which media tool an [`Invocation`] targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Transcoder (`ffmpeg`).
    Ffmpeg,
    /// Metadata prober (`ffprobe`).
    Ffprobe,
}

/// One run of a media tool: the tool plus its ordered argument list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Target tool.
    pub tool: Tool,
    /// Arguments, without the program name.
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation of `tool` with `args`.
    pub fn new(tool: Tool, args: Vec<String>) -> Self {
        Self { tool, args }
    }

    /// Space-joined rendering for logs.
    pub fn display_args(&self) -> String {
        self.args.join(" ")
    }
}

/// Success/failure as reported by the engine. There is no partial success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnCode {
    /// Tool exited successfully.
    Success,
    /// Tool failed; carries the exit code when one was reported.
    Failure(Option<i32>),
}

impl ReturnCode {
    /// `true` for [`ReturnCode::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of running an [`Invocation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Success or failure.
    pub return_code: ReturnCode,
    /// Captured standard output.
    pub output: String,
    /// Captured diagnostics (standard error).
    pub log: String,
}

impl ExecOutcome {
    /// Successful outcome with `output`.
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            return_code: ReturnCode::Success,
            output: output.into(),
            log: String::new(),
        }
    }

    /// Failed outcome with `log`.
    pub fn failure(log: impl Into<String>) -> Self {
        Self {
            return_code: ReturnCode::Failure(Some(1)),
            output: String::new(),
            log: log.into(),
        }
    }
}

/// External media engine: runs a tool invocation and reports its return code and output.
///
/// `Err` means the tool could not be run at all; a tool that ran and failed is an `Ok` with a
/// failing [`ReturnCode`].
pub trait MediaEngine {
    /// Run `invocation` to completion.
    fn execute(&self, invocation: &Invocation) -> impl Future<Output = TrimResult<ExecOutcome>>;
}

/// Locations of the media tool binaries.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `ffmpeg` executable, resolved through `PATH` when relative.
    pub ffmpeg_bin: PathBuf,
    /// `ffprobe` executable, resolved through `PATH` when relative.
    pub ffprobe_bin: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            ffprobe_bin: PathBuf::from("ffprobe"),
        }
    }
}

impl EngineConfig {
    fn program(&self, tool: Tool) -> &PathBuf {
        match tool {
            Tool::Ffmpeg => &self.ffmpeg_bin,
            Tool::Ffprobe => &self.ffprobe_bin,
        }
    }
}

/// [`MediaEngine`] backed by the system `ffmpeg`/`ffprobe` binaries.
#[derive(Clone, Debug, Default)]
pub struct FfmpegEngine {
    cfg: EngineConfig,
}

impl FfmpegEngine {
    /// Engine using the binaries named in `cfg`.
    pub fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// `true` when both tools can be invoked.
    pub async fn is_available(&self) -> bool {
        self.tool_runs(Tool::Ffmpeg).await && self.tool_runs(Tool::Ffprobe).await
    }

    async fn tool_runs(&self, tool: Tool) -> bool {
        tokio::process::Command::new(self.cfg.program(tool))
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl MediaEngine for FfmpegEngine {
    async fn execute(&self, invocation: &Invocation) -> TrimResult<ExecOutcome> {
        let program = self.cfg.program(invocation.tool);
        tracing::debug!(
            program = %program.display(),
            args = %invocation.display_args(),
            "running media tool"
        );

        let out = tokio::process::Command::new(program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                TrimError::Other(anyhow::anyhow!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    program.display()
                ))
            })?;

        let return_code = if out.status.success() {
            ReturnCode::Success
        } else {
            ReturnCode::Failure(out.status.code())
        };

        Ok(ExecOutcome {
            return_code,
            output: String::from_utf8_lossy(&out.stdout).into_owned(),
            log: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/engine.rs"]
mod tests;
