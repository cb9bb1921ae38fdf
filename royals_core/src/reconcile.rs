use log::debug;

use crate::{game_state::GameState, player::Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    FullReset,
    IncrementalUpdate,
}

/// Merges an incoming snapshot with the win counters the client has kept for
/// each seat. Counters are keyed by position in both modes; a position seen
/// for the first time starts at zero. Every occurrence of a position in the
/// incoming winners adds one win, duplicates included.
pub fn reconcile(prior: &[Player], mut incoming: GameState, mode: ReconcileMode) -> GameState {
    for player in incoming.players.iter_mut() {
        player.wins = prior
            .iter()
            .find(|p| p.position == player.position)
            .map(|p| p.wins)
            .unwrap_or(0);
    }

    let winners = incoming.winners.clone();
    for position in winners {
        match incoming.player_mut(position) {
            Some(player) => player.wins += 1,
            None => debug!("winner {position} is not seated, ignoring ({mode:?})"),
        }
    }

    incoming
}
