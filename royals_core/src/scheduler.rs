use std::{
    future::Future,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use log::debug;
use tokio_util::sync::CancellationToken;

pub type Generation = u64;

/// A delayed poll that has been scheduled and may still be cancelled.
#[derive(Debug, Clone)]
pub struct PendingHandle {
    pub id: u64,
    pub generation: Generation,
    token: CancellationToken,
}

impl PendingHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl PartialEq for PendingHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.generation == other.generation
    }
}

/// Inputs of the polling decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnView {
    pub game_over: bool,
    pub human_active: bool,
    pub human_turn: bool,
    pub watching: bool,
}

/// An automated step is polled while the game runs and either the human is
/// watching or an active human is waiting for another seat to move.
pub fn should_poll(view: TurnView) -> bool {
    !view.game_over && (view.watching || (view.human_active && !view.human_turn))
}

#[derive(Debug, Default)]
pub struct HandleIds(AtomicU64);

impl HandleIds {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Runs `task` once `delay` has elapsed unless the returned handle is
/// cancelled first.
pub fn schedule_after<F>(
    id: u64,
    generation: Generation,
    delay: Duration,
    task: F,
) -> PendingHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let token = CancellationToken::new();
    let watched = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = watched.cancelled() => debug!("scheduled poll {id} cancelled"),
            _ = tokio::time::sleep(delay) => task.await,
        }
    });
    PendingHandle {
        id,
        generation,
        token,
    }
}
