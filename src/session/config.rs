use std::path::Path;

use crate::foundation::error::{TrimError, TrimResult};

/// Longer-side cap for snapshots when neither a snapshot nor an output cap is configured.
pub const DEFAULT_SNAPSHOT_MAX_SIZE: u32 = 1080;

/// Options for one editing session. Immutable once the session opens.
///
/// Every field has a default so partial JSON documents deserialize:
///
/// ```json
/// { "source_uri": "https://cdn.example/clip.mp4", "max_duration_seconds": 30 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorSessionConfig {
    /// Video to edit: a path, `file://` URI, or `http(s)://` URL.
    pub source_uri: String,
    /// Play and probe `source_uri` in place instead of copying it into the cache first.
    pub is_local_source: bool,
    /// Cap for the longer dimension of the trimmed output.
    pub max_output_size: Option<u32>,
    /// Cap for the trimmed output duration.
    pub max_duration_seconds: Option<u32>,
    /// Whether snapshot capture is offered.
    pub allow_snapshot: bool,
    /// Cap for the longer dimension of snapshots.
    pub snapshot_max_size: Option<u32>,
}

impl EditorSessionConfig {
    /// Config for `source_uri` with every option at its default.
    pub fn new(source_uri: impl Into<String>) -> Self {
        Self {
            source_uri: source_uri.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> TrimResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TrimError::validation(format!("failed to read '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_str(&text).map_err(|e| {
            TrimError::validation(format!("invalid session config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations no session can run with.
    pub fn validate(&self) -> TrimResult<()> {
        if self.source_uri.trim().is_empty() {
            return Err(TrimError::validation("source_uri must not be empty"));
        }
        for (name, value) in [
            ("max_output_size", self.max_output_size),
            ("max_duration_seconds", self.max_duration_seconds),
            ("snapshot_max_size", self.snapshot_max_size),
        ] {
            if value == Some(0) {
                return Err(TrimError::validation(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }

    /// Set [`Self::is_local_source`].
    pub fn with_local_source(mut self, is_local: bool) -> Self {
        self.is_local_source = is_local;
        self
    }

    /// Set [`Self::max_output_size`].
    pub fn with_max_output_size(mut self, size: Option<u32>) -> Self {
        self.max_output_size = size;
        self
    }

    /// Set [`Self::max_duration_seconds`].
    pub fn with_max_duration_seconds(mut self, secs: Option<u32>) -> Self {
        self.max_duration_seconds = secs;
        self
    }

    /// Enable or disable snapshots and set their size cap.
    pub fn with_snapshot(mut self, allow: bool, max_size: Option<u32>) -> Self {
        self.allow_snapshot = allow;
        self.snapshot_max_size = max_size;
        self
    }

    /// Snapshot cap, falling back to the output cap and then [`DEFAULT_SNAPSHOT_MAX_SIZE`].
    pub fn effective_snapshot_max_size(&self) -> u32 {
        self.snapshot_max_size
            .or(self.max_output_size)
            .unwrap_or(DEFAULT_SNAPSHOT_MAX_SIZE)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
