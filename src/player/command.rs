use std::future::Future;
use std::path::PathBuf;

/// Allowed seek imprecision around a target position, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeekTolerance {
    /// Milliseconds the player may land before the target.
    pub before_ms: u64,
    /// Milliseconds the player may land after the target.
    pub after_ms: u64,
}

impl SeekTolerance {
    /// Frame-exact seeking.
    pub const EXACT: Self = Self {
        before_ms: 0,
        after_ms: 0,
    };
}

/// Commands accepted by the external player component.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// Load a local playable file.
    Load {
        /// File to load.
        uri: PathBuf,
    },
    /// Move the position without changing the play state.
    SeekTo {
        /// Target position.
        position_ms: u64,
        /// Allowed imprecision.
        tolerance: SeekTolerance,
    },
    /// Resume playback from the current position.
    Play,
    /// Seek and start playback.
    PlayFrom {
        /// Target position.
        position_ms: u64,
        /// Allowed imprecision.
        tolerance: SeekTolerance,
    },
    /// Stop playback, keeping the position.
    Pause,
    /// Mute or unmute output.
    SetMuted(bool),
}

impl PlayerCommand {
    /// Exact seek to `position_ms`.
    pub fn seek_exact(position_ms: u64) -> Self {
        Self::SeekTo {
            position_ms,
            tolerance: SeekTolerance::EXACT,
        }
    }

    /// Exact seek to `position_ms` followed by playback.
    pub fn play_from_exact(position_ms: u64) -> Self {
        Self::PlayFrom {
            position_ms,
            tolerance: SeekTolerance::EXACT,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::SeekTo { .. } => "seek_to",
            Self::Play => "play",
            Self::PlayFrom { .. } => "play_from",
            Self::Pause => "pause",
            Self::SetMuted(_) => "set_muted",
        }
    }
}

/// The external, stateful playback component.
///
/// Implementations are not required to tolerate overlapping calls; route every command
/// through [`crate::PlaybackBusyGuard`].
pub trait Player {
    /// Execute one command, resolving once the player has applied (or rejected) it.
    fn execute(&self, command: &PlayerCommand) -> impl Future<Output = anyhow::Result<()>>;
}

/// Player that accepts every command immediately. Used by headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPlayer;

impl Player for NullPlayer {
    async fn execute(&self, command: &PlayerCommand) -> anyhow::Result<()> {
        tracing::trace!(command = command.name(), "null player accepted command");
        Ok(())
    }
}
