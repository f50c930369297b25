use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use super::*;

#[derive(Default)]
struct GatedPlayer {
    calls: AtomicUsize,
    gate: Notify,
    reject: bool,
}

impl Player for GatedPlayer {
    async fn execute(&self, _command: &PlayerCommand) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        if self.reject {
            anyhow::bail!("player refused");
        }
        Ok(())
    }
}

#[tokio::test]
async fn overlapping_dispatch_is_dropped() {
    let guard = PlaybackBusyGuard::new(GatedPlayer::default());

    let (first, second, ()) = tokio::join!(
        guard.dispatch(PlayerCommand::seek_exact(1_000)),
        guard.dispatch(PlayerCommand::seek_exact(2_000)),
        async {
            tokio::task::yield_now().await;
            assert!(guard.is_busy());
            assert_eq!(
                guard.pending_command(),
                Some(PlayerCommand::seek_exact(1_000))
            );
            guard.player().gate.notify_one();
        }
    );

    assert_eq!(first, Dispatch::Completed);
    assert_eq!(second, Dispatch::Dropped);
    assert_eq!(guard.player().calls.load(Ordering::SeqCst), 1);
    assert!(!guard.is_busy());
}

#[tokio::test]
async fn sequential_dispatches_both_reach_player() {
    let guard = PlaybackBusyGuard::new(GatedPlayer::default());

    guard.player().gate.notify_one();
    assert_eq!(guard.dispatch(PlayerCommand::Play).await, Dispatch::Completed);
    guard.player().gate.notify_one();
    assert_eq!(guard.dispatch(PlayerCommand::Pause).await, Dispatch::Completed);

    assert_eq!(guard.player().calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rejection_releases_the_gate() {
    let guard = PlaybackBusyGuard::new(GatedPlayer {
        reject: true,
        ..GatedPlayer::default()
    });

    guard.player().gate.notify_one();
    assert_eq!(
        guard.dispatch(PlayerCommand::SetMuted(true)).await,
        Dispatch::Rejected
    );
    assert!(!guard.is_busy());
    assert_eq!(guard.pending_command(), None);
}

#[tokio::test]
async fn abandoned_dispatch_releases_the_gate() {
    let guard = PlaybackBusyGuard::new(GatedPlayer::default());

    tokio::select! {
        biased;
        _ = guard.dispatch(PlayerCommand::Play) => panic!("player gate was never opened"),
        _ = tokio::task::yield_now() => {}
    }

    assert!(!guard.is_busy());
    assert_eq!(guard.player().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn null_player_completes_everything() {
    let guard = PlaybackBusyGuard::new(crate::player::command::NullPlayer);
    assert_eq!(
        guard
            .dispatch(PlayerCommand::Load {
                uri: "clip.mp4".into()
            })
            .await,
        Dispatch::Completed
    );
}
