use itertools::Itertools;
use strum::{EnumMessage, IntoEnumIterator};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString};

use crate::error::UnknownCard;

pub type Rank = u8;

#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord, Display, EnumIter, EnumString, EnumMessage,
)]
#[strum(ascii_case_insensitive)]
pub enum Card {
    #[strum(
        message = "If you play this card, you may choose an opponent and attempt to guess their card. If you guess right they drop out of the game. You may not guess the Guard."
    )]
    Guard = 1,
    #[strum(message = "If you play this card, you may choose an opponent and see their card.")]
    Priest = 2,
    #[strum(
        message = "If you play this card, you may compare your other card against the card of an opponent. The one with the lower card drops out of the game. If they are equal no one drops out."
    )]
    Baron = 3,
    #[strum(
        message = "If you play this card, you are protected against all forms of attack until your next turn."
    )]
    Handmaid = 4,
    #[strum(
        message = "If you play this card, you may force any player, yourself included, to fold their card and fetch a new one from the deck."
    )]
    Prince = 5,
    #[strum(
        message = "If you play this card, you may choose an opponent and exchange your other card with theirs."
    )]
    King = 6,
    #[strum(
        message = "If you in addition to this card hold either Prince or King, you must play it instead of the King or Prince."
    )]
    Countess = 7,
    #[strum(
        message = "You must never play this card. If you are forced to fold this card by any means, you drop out."
    )]
    Princess = 8,
}

impl Card {
    pub fn rules() -> String {
        Card::iter().map(|c| c.rule()).join("\n")
    }

    pub fn rank(&self) -> Rank {
        *self as Rank
    }

    pub fn requires_guess(&self) -> bool {
        self == &Card::Guard
    }

    pub fn requires_target(&self) -> bool {
        matches!(
            self,
            Card::Guard | Card::Priest | Card::Baron | Card::Prince | Card::King
        )
    }

    /// The only rank whose effect may be aimed at the acting player.
    pub fn can_target_self(&self) -> bool {
        self == &Card::Prince
    }

    /// Ranks a Guard may name.
    pub fn guess_options() -> Vec<Card> {
        Card::iter().filter(|c| !c.requires_guess()).collect()
    }

    pub fn rule(&self) -> String {
        format!(
            "{} [value = {}]: {}",
            self,
            self.rank(),
            self.get_message().unwrap_or("No rule")
        )
    }
}

impl TryFrom<Rank> for Card {
    type Error = UnknownCard;

    fn try_from(rank: Rank) -> Result<Self, Self::Error> {
        Card::iter()
            .find(|c| c.rank() == rank)
            .ok_or(UnknownCard(rank))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::{card::Card, error::UnknownCard};

    #[test]
    fn try_from_should_map_every_wire_rank() {
        let cards = (1..=8)
            .map(|r| Card::try_from(r).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            cards,
            vec![
                Card::Guard,
                Card::Priest,
                Card::Baron,
                Card::Handmaid,
                Card::Prince,
                Card::King,
                Card::Countess,
                Card::Princess,
            ]
        );
    }

    #[test]
    fn try_from_should_reject_ranks_outside_the_deck() {
        assert_eq!(Card::try_from(0), Err(UnknownCard(0)));
        assert_eq!(Card::try_from(9), Err(UnknownCard(9)));
    }

    #[test]
    fn requires_target_should_hold_for_attacking_cards_only() {
        let targeted = [Card::Guard, Card::Priest, Card::Baron, Card::Prince, Card::King];
        for card in targeted {
            assert!(card.requires_target(), "{card} should require a target");
        }
        for card in [Card::Handmaid, Card::Countess, Card::Princess] {
            assert!(!card.requires_target(), "{card} should not require a target");
        }
    }

    #[test]
    fn guess_options_should_exclude_the_guard() {
        let options = Card::guess_options();

        assert_eq!(options.len(), 7);
        assert!(!options.contains(&Card::Guard));
    }

    #[test]
    fn from_str_should_ignore_case() {
        assert_eq!(Card::from_str("handmaid"), Ok(Card::Handmaid));
        assert_eq!(Card::from_str("KING"), Ok(Card::King));
    }

    #[test]
    fn rule_should_contain_name_and_value() {
        assert!(Card::Baron.rule().starts_with("Baron [value = 3]: "));
    }
}
