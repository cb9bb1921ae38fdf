//! JSON shapes returned by the game server and their translation into the
//! client's model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, Rank},
    error::UnknownCard,
    game_state::GameState,
    play::{ActionId, GameAction, Play},
    player::{Player, PlayerPosition},
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawGameAction {
    pub card: Rank,
    #[serde(default)]
    pub guess: Option<Rank>,
    pub id: ActionId,
    #[serde(default)]
    pub target: Option<PlayerPosition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlay {
    pub action: RawGameAction,
    pub player: PlayerPosition,
    #[serde(default)]
    pub discard: Option<Rank>,
    #[serde(default)]
    pub discarding_player: Option<PlayerPosition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPlayer {
    pub active: bool,
    #[serde(default)]
    pub hand: Option<Vec<Rank>>,
    pub name: String,
    pub position: PlayerPosition,
    pub safe: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGameState {
    pub cards_remaining: usize,
    pub current_player: Option<PlayerPosition>,
    pub discard: Vec<Rank>,
    pub game_over: bool,
    pub hand: Vec<Rank>,
    pub players: Vec<RawPlayer>,
    pub plays: Vec<RawPlay>,
    #[serde(default)]
    pub priest_info: BTreeMap<PlayerPosition, Rank>,
    pub valid_actions: Vec<RawGameAction>,
    pub winners: Vec<PlayerPosition>,
}

/// `null` and the server's empty slot (0) both mean "no card".
fn optional_card(rank: Option<Rank>) -> Result<Option<Card>, UnknownCard> {
    match rank {
        None | Some(0) => Ok(None),
        Some(r) => Card::try_from(r).map(Some),
    }
}

fn cards(ranks: &[Rank]) -> Result<Vec<Card>, UnknownCard> {
    ranks.iter().map(|&r| Card::try_from(r)).collect()
}

impl TryFrom<RawGameAction> for GameAction {
    type Error = UnknownCard;

    fn try_from(raw: RawGameAction) -> Result<Self, Self::Error> {
        Ok(GameAction {
            card: Card::try_from(raw.card)?,
            guess: optional_card(raw.guess)?,
            target: raw.target,
            id: raw.id,
        })
    }
}

impl TryFrom<RawPlay> for Play {
    type Error = UnknownCard;

    fn try_from(raw: RawPlay) -> Result<Self, Self::Error> {
        let discard = optional_card(raw.discard)?.zip(raw.discarding_player);
        Ok(Play {
            player: raw.player,
            action: GameAction::try_from(raw.action)?,
            discard,
        })
    }
}

impl TryFrom<RawPlayer> for Player {
    type Error = UnknownCard;

    fn try_from(raw: RawPlayer) -> Result<Self, Self::Error> {
        let hand = raw.hand.as_deref().map(cards).transpose()?;
        Ok(Player {
            position: raw.position,
            name: raw.name,
            active: raw.active,
            protected: raw.safe,
            hand,
            wins: 0,
        })
    }
}

impl TryFrom<RawGameState> for GameState {
    type Error = UnknownCard;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        Ok(GameState {
            cards_remaining: raw.cards_remaining,
            current_player: raw.current_player,
            discard: cards(&raw.discard)?,
            game_over: raw.game_over,
            hand: cards(&raw.hand)?,
            players: raw
                .players
                .into_iter()
                .map(Player::try_from)
                .collect::<Result<_, _>>()?,
            plays: raw
                .plays
                .into_iter()
                .map(Play::try_from)
                .collect::<Result<_, _>>()?,
            priest_info: raw
                .priest_info
                .into_iter()
                .map(|(position, rank)| Card::try_from(rank).map(|c| (position, c)))
                .collect::<Result<_, _>>()?,
            valid_actions: raw
                .valid_actions
                .into_iter()
                .map(GameAction::try_from)
                .collect::<Result<_, _>>()?,
            winners: raw.winners,
        })
    }
}
