use crate::card::Card;

pub type PlayerPosition = usize;

/// Seat of the local human.
pub const HUMAN_POSITION: PlayerPosition = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub position: PlayerPosition,
    pub name: String,
    pub active: bool,
    pub protected: bool,
    pub hand: Option<Vec<Card>>,
    /// Counted by the client, the server never reports it.
    pub wins: u32,
}

impl Player {
    pub fn is_human(&self) -> bool {
        self.position == HUMAN_POSITION
    }

    pub fn is_targetable(&self) -> bool {
        self.active && !self.protected
    }
}
