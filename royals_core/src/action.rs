use crate::{
    card::Card,
    game_state::GameState,
    play::GameAction,
    player::PlayerPosition,
    scheduler::{Generation, PendingHandle},
};

#[derive(Debug, Clone)]
pub enum ClientAction {
    Ui(UiAction),
    Internal(InternalAction),
}

/// Operations the presentation layer may dispatch.
#[derive(Debug, Clone)]
pub enum UiAction {
    ChooseCard(Option<Card>),
    ChooseGuess(Option<Card>),
    ChooseTarget(Option<PlayerPosition>),
    SubmitMove(GameAction),
    ResetGame,
    EnterWatchMode,
}

/// Transitions applied by the reducer.
#[derive(Debug, Clone)]
pub enum InternalAction {
    CardChosen(Option<Card>),
    GuessChosen(Option<Card>),
    TargetChosen(Option<PlayerPosition>),
    PendingRegistered(PendingHandle),
    ResetIssued,
    FullReset(GameState, Generation),
    IncrementalUpdate(GameState, Generation),
    WatchEntered,
}

impl From<UiAction> for ClientAction {
    fn from(action: UiAction) -> Self {
        ClientAction::Ui(action)
    }
}

impl From<InternalAction> for ClientAction {
    fn from(action: InternalAction) -> Self {
        ClientAction::Internal(action)
    }
}

impl ClientAction {
    /// One-line form for logs; snapshots are summarized instead of dumped.
    pub fn describe(&self) -> String {
        match self {
            ClientAction::Internal(InternalAction::FullReset(game, generation)) => format!(
                "FullReset(gen {}, {} players, current {:?})",
                generation,
                game.players.len(),
                game.current_player
            ),
            ClientAction::Internal(InternalAction::IncrementalUpdate(game, generation)) => format!(
                "IncrementalUpdate(gen {}, {} plays, current {:?}, over {})",
                generation,
                game.plays.len(),
                game.current_player,
                game.game_over
            ),
            other => format!("{:?}", other),
        }
    }
}
