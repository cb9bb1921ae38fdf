use std::collections::BTreeMap;

use crate::{
    card::Card,
    play::{GameAction, Play},
    player::{Player, PlayerPosition, HUMAN_POSITION},
};

/// Authoritative picture of the game as last reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub cards_remaining: usize,
    pub current_player: Option<PlayerPosition>,
    pub discard: Vec<Card>,
    pub game_over: bool,
    pub hand: Vec<Card>,
    pub players: Vec<Player>,
    pub plays: Vec<Play>,
    pub priest_info: BTreeMap<PlayerPosition, Card>,
    pub valid_actions: Vec<GameAction>,
    pub winners: Vec<PlayerPosition>,
}

impl GameState {
    pub fn player(&self, position: PlayerPosition) -> Option<&Player> {
        self.players.iter().find(|p| p.position == position)
    }

    pub fn player_mut(&mut self, position: PlayerPosition) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.position == position)
    }

    pub fn human(&self) -> Option<&Player> {
        self.player(HUMAN_POSITION)
    }

    pub fn revealed_card(&self, position: PlayerPosition) -> Option<Card> {
        self.priest_info.get(&position).copied()
    }
}
