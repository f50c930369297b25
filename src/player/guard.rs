use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::player::command::{Player, PlayerCommand};

/// Outcome of [`PlaybackBusyGuard::dispatch`]. Never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The player applied the command.
    Completed,
    /// The player was invoked and rejected the command.
    Rejected,
    /// Another command was in flight; this one was discarded without reaching the player.
    Dropped,
}

/// Single-flight gate in front of a [`Player`].
///
/// At most one command is in flight. A dispatch that finds the gate held is dropped, not
/// queued: callers re-derive the desired player state from model state on the next change.
pub struct PlaybackBusyGuard<P> {
    player: P,
    pending: Mutex<Option<PlayerCommand>>,
}

/// Held while a command is in flight; releases the gate on every exit path, including
/// rejection, unwinding, and the dispatch future being dropped.
struct BusyToken<'a> {
    slot: &'a Mutex<Option<PlayerCommand>>,
}

impl Drop for BusyToken<'_> {
    fn drop(&mut self) {
        *lock(self.slot) = None;
    }
}

impl<P: Player> PlaybackBusyGuard<P> {
    /// Wrap `player`. The gate starts free.
    pub fn new(player: P) -> Self {
        Self {
            player,
            pending: Mutex::new(None),
        }
    }

    /// Send `command` to the player unless another command is in flight.
    pub async fn dispatch(&self, command: PlayerCommand) -> Dispatch {
        let Some(_token) = self.try_acquire(&command) else {
            tracing::debug!(command = command.name(), "player busy, command dropped");
            return Dispatch::Dropped;
        };

        match self.player.execute(&command).await {
            Ok(()) => Dispatch::Completed,
            Err(err) => {
                tracing::debug!(command = command.name(), error = %err, "player rejected command");
                Dispatch::Rejected
            }
        }
    }

    /// `true` while a command is in flight.
    pub fn is_busy(&self) -> bool {
        lock(&self.pending).is_some()
    }

    /// The in-flight command, if any.
    pub fn pending_command(&self) -> Option<PlayerCommand> {
        lock(&self.pending).clone()
    }

    /// The wrapped player.
    pub fn player(&self) -> &P {
        &self.player
    }

    fn try_acquire(&self, command: &PlayerCommand) -> Option<BusyToken<'_>> {
        let mut slot = lock(&self.pending);
        if slot.is_some() {
            return None;
        }
        *slot = Some(command.clone());
        Some(BusyToken {
            slot: &self.pending,
        })
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "../../tests/unit/player/guard.rs"]
mod tests;
