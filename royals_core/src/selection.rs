use crate::{
    card::Card,
    play::GameAction,
    player::{Player, PlayerPosition, HUMAN_POSITION},
    utils::SliceExtensions,
};

/// The move the human is putting together. Fields are set independently and
/// only checked as a whole by [`resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub card: Option<Card>,
    pub guess: Option<Card>,
    pub target: Option<PlayerPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStage {
    Idle,
    CardChosen,
    AwaitingTarget,
    AwaitingGuess,
    Resolved,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self == &Selection::default()
    }

    pub fn with_card(self, card: Option<Card>) -> Self {
        Selection { card, ..self }
    }

    pub fn with_guess(self, guess: Option<Card>) -> Self {
        Selection { guess, ..self }
    }

    pub fn with_target(self, target: Option<PlayerPosition>) -> Self {
        Selection { target, ..self }
    }
}

/// Finds the legal move the selection spells out. More than one candidate
/// counts as no match.
pub fn resolve<'a>(selection: &Selection, legal_moves: &'a [GameAction]) -> Option<&'a GameAction> {
    let card = selection.card?;
    let candidates = legal_moves
        .iter()
        .filter(|m| m.key() == (card, selection.guess, selection.target))
        .collect::<Vec<_>>();
    candidates.single_element().copied()
}

pub fn valid_targets_exist(selection: &Selection, players: &[Player]) -> bool {
    let Some(card) = selection.card else {
        return false;
    };
    if !card.requires_target() {
        return false;
    }
    players
        .iter()
        .filter(|p| card.can_target_self() || p.position != HUMAN_POSITION)
        .any(|p| p.is_targetable())
}

pub fn stage(selection: &Selection, legal_moves: &[GameAction]) -> SelectionStage {
    let Some(card) = selection.card else {
        return SelectionStage::Idle;
    };
    if resolve(selection, legal_moves).is_some() {
        return SelectionStage::Resolved;
    }
    if card.requires_target() && selection.target.is_none() {
        SelectionStage::AwaitingTarget
    } else if card.requires_guess() && selection.guess.is_none() {
        SelectionStage::AwaitingGuess
    } else {
        SelectionStage::CardChosen
    }
}
