use crate::{
    card::Card,
    game_state::GameState,
    play::GameAction,
    player::{Player, HUMAN_POSITION},
    scheduler::{self, Generation, PendingHandle, TurnView},
    selection::{self, Selection, SelectionStage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
}

#[derive(Default, Debug, Clone)]
pub struct ClientState {
    pub game: GameState,
    pub selection: Selection,
    pub watching: bool,
    /// False until the first game has been installed.
    pub running: bool,
    pub pending: Vec<PendingHandle>,
    pub generation: Generation,
}

impl ClientState {
    pub fn human_player(&self) -> Option<&Player> {
        self.game.human()
    }

    pub fn human_active(&self) -> bool {
        self.human_player().map(|p| p.active).unwrap_or(false)
    }

    pub fn is_human_turn(&self) -> bool {
        self.game.current_player == Some(HUMAN_POSITION)
    }

    pub fn chosen_action(&self) -> Option<&GameAction> {
        selection::resolve(&self.selection, &self.game.valid_actions)
    }

    pub fn selection_stage(&self) -> SelectionStage {
        selection::stage(&self.selection, &self.game.valid_actions)
    }

    pub fn valid_targets_exist(&self) -> bool {
        selection::valid_targets_exist(&self.selection, &self.game.players)
    }

    pub fn guess_options(&self) -> Vec<Card> {
        Card::guess_options()
    }

    pub fn turn_view(&self) -> TurnView {
        TurnView {
            game_over: self.game.game_over,
            human_active: self.human_active(),
            human_turn: self.is_human_turn(),
            watching: self.watching,
        }
    }

    pub fn should_poll(&self) -> bool {
        scheduler::should_poll(self.turn_view())
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.running || self.watching {
            return None;
        }
        let human_out = !self.human_active();
        if !self.game.game_over && !human_out {
            return None;
        }
        if self.game.winners.contains(&HUMAN_POSITION) {
            Some(Outcome::Victory)
        } else {
            Some(Outcome::Defeat)
        }
    }
}
