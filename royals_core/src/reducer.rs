use log::{debug, warn};

use crate::{
    action::{ClientAction, InternalAction},
    reconcile::{reconcile, ReconcileMode},
    state::ClientState,
};

fn cancel_pending(state: &mut ClientState) {
    for handle in state.pending.drain(..) {
        handle.cancel();
    }
}

pub fn reducer(mut state: ClientState, action: ClientAction) -> ClientState {
    let action = match action {
        ClientAction::Internal(i) => i,
        ClientAction::Ui(ui) => {
            warn!("only internal actions should arrive at the reducer, got {:?}", ui);
            return state;
        }
    };

    match action {
        InternalAction::CardChosen(card) => ClientState {
            selection: state.selection.with_card(card),
            ..state
        },
        InternalAction::GuessChosen(guess) => ClientState {
            selection: state.selection.with_guess(guess),
            ..state
        },
        InternalAction::TargetChosen(target) => ClientState {
            selection: state.selection.with_target(target),
            ..state
        },
        InternalAction::PendingRegistered(handle) => {
            if handle.generation == state.generation {
                state.pending.push(handle);
            } else {
                debug!(
                    "cancelling poll {} from generation {} (now {})",
                    handle.id, handle.generation, state.generation
                );
                handle.cancel();
            }
            state
        }
        InternalAction::ResetIssued => {
            cancel_pending(&mut state);
            ClientState {
                generation: state.generation + 1,
                ..state
            }
        }
        InternalAction::FullReset(game, generation) => {
            if generation != state.generation {
                warn!(
                    "dropping reset from generation {} (now {})",
                    generation, state.generation
                );
                return state;
            }
            cancel_pending(&mut state);
            ClientState {
                game: reconcile(&state.game.players, game, ReconcileMode::FullReset),
                running: true,
                generation: state.generation,
                ..ClientState::default()
            }
        }
        InternalAction::IncrementalUpdate(game, generation) => {
            if generation != state.generation {
                warn!(
                    "dropping update from generation {} (now {})",
                    generation, state.generation
                );
                return state;
            }
            ClientState {
                game: reconcile(&state.game.players, game, ReconcileMode::IncrementalUpdate),
                ..state
            }
        }
        InternalAction::WatchEntered => ClientState {
            watching: true,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        action::{ClientAction, InternalAction, UiAction},
        card::Card,
        game_state::GameState,
        player::Player,
        reducer::reducer,
        scheduler::schedule_after,
        selection::Selection,
        state::ClientState,
    };

    #[test]
    fn reducer_should_replace_selection_fields_independently() {
        let state = apply(
            ClientState::default(),
            vec![
                InternalAction::CardChosen(Some(Card::Guard)),
                InternalAction::TargetChosen(Some(1)),
                InternalAction::GuessChosen(Some(Card::Priest)),
                InternalAction::GuessChosen(Some(Card::Baron)),
            ],
        );

        assert_eq!(
            state.selection,
            Selection {
                card: Some(Card::Guard),
                guess: Some(Card::Baron),
                target: Some(1),
            }
        );
    }

    #[test]
    fn reducer_should_ignore_presentation_actions() {
        let state = reducer(
            ClientState::default(),
            ClientAction::Ui(UiAction::ChooseCard(Some(Card::King))),
        );

        assert!(state.selection.is_empty());
    }

    #[test]
    fn full_reset_should_install_the_game_and_clear_client_fields() {
        let mut prior = ClientState {
            watching: true,
            selection: Selection::default().with_card(Some(Card::King)),
            ..Default::default()
        };
        prior.game.players = vec![seat(0, 2), seat(1, 1)];

        let state = apply(
            prior,
            vec![
                InternalAction::ResetIssued,
                InternalAction::FullReset(game(&[0, 1], &[]), 1),
            ],
        );

        assert!(state.running);
        assert!(!state.watching);
        assert!(state.selection.is_empty());
        assert_eq!(state.generation, 1);
        assert_eq!(wins(&state), vec![2, 1]);
    }

    #[test]
    fn full_reset_then_update_should_keep_seeded_wins() {
        let mut prior = ClientState::default();
        prior.game.players = vec![seat(0, 4), seat(1, 0)];

        let state = apply(
            prior,
            vec![
                InternalAction::ResetIssued,
                InternalAction::FullReset(game(&[0, 1], &[]), 1),
                InternalAction::IncrementalUpdate(game(&[0, 1], &[]), 1),
            ],
        );

        assert_eq!(wins(&state), vec![4, 0]);
    }

    #[test]
    fn incremental_update_should_count_winners() {
        let state = apply(
            ClientState::default(),
            vec![
                InternalAction::IncrementalUpdate(game(&[0, 1], &[]), 0),
                InternalAction::IncrementalUpdate(game(&[0, 1], &[1]), 0),
                InternalAction::IncrementalUpdate(game(&[0, 1], &[1]), 0),
            ],
        );

        assert_eq!(wins(&state), vec![0, 2]);
    }

    #[test]
    fn incremental_update_should_keep_selection_and_watching() {
        let prior = ClientState {
            watching: true,
            selection: Selection::default().with_card(Some(Card::Baron)),
            ..Default::default()
        };

        let state = apply(
            prior,
            vec![InternalAction::IncrementalUpdate(game(&[0, 1], &[]), 0)],
        );

        assert!(state.watching);
        assert_eq!(state.selection.card, Some(Card::Baron));
    }

    #[test]
    fn stale_update_should_be_dropped() {
        let state = apply(
            ClientState::default(),
            vec![
                InternalAction::ResetIssued,
                InternalAction::FullReset(game(&[0, 1], &[]), 1),
                InternalAction::IncrementalUpdate(game(&[0, 1, 2], &[1]), 0),
            ],
        );

        assert_eq!(state.game.players.len(), 2);
        assert_eq!(wins(&state), vec![0, 0]);
    }

    #[test]
    fn stale_reset_should_be_dropped() {
        let state = apply(
            ClientState::default(),
            vec![
                InternalAction::ResetIssued,
                InternalAction::ResetIssued,
                InternalAction::FullReset(game(&[0, 1, 2], &[]), 1),
            ],
        );

        assert!(!state.running);
        assert_eq!(state.generation, 2);
    }

    #[tokio::test]
    async fn reset_issued_should_cancel_every_pending_handle() {
        let handles = (0..3)
            .map(|id| schedule_after(id, 0, Duration::from_secs(60), async {}))
            .collect::<Vec<_>>();
        let registrations = handles
            .iter()
            .cloned()
            .map(InternalAction::PendingRegistered)
            .collect::<Vec<_>>();

        let state = apply(ClientState::default(), registrations);
        assert_eq!(state.pending.len(), 3);

        let state = apply(state, vec![InternalAction::ResetIssued]);

        assert!(state.pending.is_empty());
        assert!(handles.iter().all(|h| h.is_cancelled()));
    }

    #[tokio::test]
    async fn pending_registered_should_cancel_handles_of_an_old_generation() {
        let handle = schedule_after(0, 0, Duration::from_secs(60), async {});

        let state = apply(
            ClientState::default(),
            vec![
                InternalAction::ResetIssued,
                InternalAction::PendingRegistered(handle.clone()),
            ],
        );

        assert!(state.pending.is_empty());
        assert!(handle.is_cancelled());
    }

    #[test]
    fn watch_entered_should_set_watching() {
        let state = apply(ClientState::default(), vec![InternalAction::WatchEntered]);

        assert!(state.watching);
    }

    // Infra ----------------------------------------------------------------

    fn apply(state: ClientState, actions: Vec<InternalAction>) -> ClientState {
        actions
            .into_iter()
            .fold(state, |s, a| reducer(s, ClientAction::Internal(a)))
    }

    fn seat(position: usize, wins: u32) -> Player {
        Player {
            position,
            name: format!("P{position}"),
            active: true,
            protected: false,
            hand: None,
            wins,
        }
    }

    fn game(positions: &[usize], winners: &[usize]) -> GameState {
        GameState {
            players: positions.iter().map(|&p| seat(p, 0)).collect(),
            winners: winners.to_vec(),
            ..Default::default()
        }
    }

    fn wins(state: &ClientState) -> Vec<u32> {
        state.game.players.iter().map(|p| p.wins).collect()
    }
}
