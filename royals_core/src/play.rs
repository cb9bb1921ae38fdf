use crate::{card::Card, player::PlayerPosition};

pub type ActionId = u32;

/// A move the server currently permits. Equality ignores nothing: two moves
/// are the same only if card, guess, target and id all match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAction {
    pub card: Card,
    pub guess: Option<Card>,
    pub target: Option<PlayerPosition>,
    pub id: ActionId,
}

impl GameAction {
    /// The value used to match a move against a selection. The id is only
    /// carried for submission.
    pub fn key(&self) -> (Card, Option<Card>, Option<PlayerPosition>) {
        (self.card, self.guess, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Play {
    pub player: PlayerPosition,
    pub action: GameAction,
    pub discard: Option<(Card, PlayerPosition)>,
}
