use std::str::FromStr;

use itertools::Itertools;

use royals_core::{
    card::Card,
    game_state::GameState,
    play::Play,
    player::{PlayerPosition, HUMAN_POSITION},
    selection::SelectionStage,
    state::{ClientState, Outcome},
};

pub static RULES: &str = "
*** Royals ***
Every player holds one hidden card. On your turn you draw a second card and play one of the two.
Most cards act on another player: you pick a target and, for the Guard, name the card you think
they hold. A player who drops out is out of the round. The round ends when the deck runs dry or a
single player is left; the highest card among the remaining players wins. Press c to see what
card does what.
If every opponent is protected, a card that needs a target may be played without any effect.";

#[derive(Debug, PartialEq)]
pub enum CliAction {
    Quit,
    Rules,
    CardEffects,
    NewGame,
    Watch,
    Cancel,
    Play,
    Card(Card),
    Player(PlayerPosition),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseActionError;

impl CliAction {
    fn info(&self, game: &GameState) -> String {
        match self {
            CliAction::Quit => "quit".to_string(),
            CliAction::Rules => "display rules".to_string(),
            CliAction::CardEffects => "display card effects".to_string(),
            CliAction::NewGame => "start a new game".to_string(),
            CliAction::Watch => "keep watching the others".to_string(),
            CliAction::Cancel => "start the move over".to_string(),
            CliAction::Play => "play the move".to_string(),
            CliAction::Card(c) => c.rule(),
            CliAction::Player(position) => seat_name(game, *position),
        }
    }

    fn cmd_str(&self) -> String {
        match self {
            CliAction::Quit => "q".to_string(),
            CliAction::Rules => "r".to_string(),
            CliAction::CardEffects => "c".to_string(),
            CliAction::NewGame => "n".to_string(),
            CliAction::Watch => "w".to_string(),
            CliAction::Cancel => "x".to_string(),
            CliAction::Play => "p".to_string(),
            CliAction::Card(c) => c.to_string(),
            CliAction::Player(position) => position.to_string(),
        }
    }
}

impl FromStr for CliAction {
    type Err = ParseActionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "q" => Ok(CliAction::Quit),
            "r" => Ok(CliAction::Rules),
            "c" => Ok(CliAction::CardEffects),
            "n" => Ok(CliAction::NewGame),
            "w" => Ok(CliAction::Watch),
            "x" => Ok(CliAction::Cancel),
            "p" => Ok(CliAction::Play),
            _ => {
                if let Ok(c) = Card::from_str(s) {
                    Ok(CliAction::Card(c))
                } else if let Ok(p) = PlayerPosition::from_str(s) {
                    Ok(CliAction::Player(p))
                } else {
                    Err(ParseActionError)
                }
            }
        }
    }
}

pub fn seat_name(game: &GameState, position: PlayerPosition) -> String {
    game.player(position)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Seat {position}"))
}

pub fn format_play(play: &Play, game: &GameState) -> String {
    let target_str = play
        .action
        .target
        .map(|t| format!(" on {}", seat_name(game, t)));
    let guess_str = play.action.guess.map(|g| format!(", guessing {g}"));
    let discard_str = play
        .discard
        .map(|(card, by)| format!(", {} discarded {card}", seat_name(game, by)));
    format!(
        "~ {} played {}{}{}{}",
        seat_name(game, play.player),
        play.action.card,
        target_str.unwrap_or_default(),
        guess_str.unwrap_or_default(),
        discard_str.unwrap_or_default()
    )
}

pub fn render_table(state: &ClientState) -> String {
    let game = &state.game;
    let mut lines = vec![
        "================================================".to_string(),
        format!(
            "Deck: {} cards | Discard pile: {}",
            game.cards_remaining,
            game.discard.iter().join(", ")
        ),
    ];

    for player in game.players.iter().filter(|p| !p.is_human()) {
        let mut flags = vec![format!("wins: {}", player.wins)];
        if !player.active {
            flags.push("out".to_string());
        }
        if player.protected {
            flags.push("protected".to_string());
        }
        if let Some(card) = game.revealed_card(player.position) {
            flags.push(format!("holds {card}"));
        }
        if let Some(hand) = &player.hand {
            flags.push(format!("hand: {}", hand.iter().join(", ")));
        }
        lines.push(format!(
            "  [{}] {} ({})",
            player.position,
            player.name,
            flags.join(", ")
        ));
    }

    if let Some(human) = state.human_player() {
        lines.push(format!(
            "You: {} (wins: {}) | Hand: {}",
            human.name,
            human.wins,
            game.hand.iter().join(", ")
        ));
    }

    if !game.plays.is_empty() {
        lines.push("Plays, newest first:".to_string());
        lines.extend(game.plays.iter().rev().map(|p| format!("  {}", format_play(p, game))));
    }

    lines.join("\n")
}

fn commands(actions: Vec<CliAction>, game: &GameState) -> String {
    actions
        .iter()
        .map(|a| format!("- [{}]: {}", a.cmd_str(), a.info(game)))
        .join("\n")
}

/// What the human can do next, given the wizard stage and the game phase.
pub fn prompt(state: &ClientState) -> String {
    let game = &state.game;

    if !state.running {
        return format!(
            "No game yet.\n{}",
            commands(vec![CliAction::NewGame, CliAction::Quit], game)
        );
    }

    if let Some(outcome) = state.outcome() {
        let banner = match outcome {
            Outcome::Victory => "*** You won! ***",
            Outcome::Defeat => "*** You lost. ***",
        };
        let mut options = vec![CliAction::NewGame];
        if !game.game_over {
            options.push(CliAction::Watch);
        }
        options.push(CliAction::Quit);
        return format!("{}\n{}", banner, commands(options, game));
    }

    if game.game_over {
        let winners = game.winners.iter().map(|&w| seat_name(game, w)).join(", ");
        return format!(
            "Game over, won by {}.\n{}",
            winners,
            commands(vec![CliAction::NewGame, CliAction::Quit], game)
        );
    }

    if state.watching || !state.is_human_turn() {
        let waiting_on = game
            .current_player
            .map(|p| seat_name(game, p))
            .unwrap_or_else(|| "the server".to_string());
        return format!(
            "Waiting for {}...\n{}",
            waiting_on,
            commands(vec![CliAction::NewGame, CliAction::Quit], game)
        );
    }

    let selection = state.selection;
    match (state.selection_stage(), selection.card) {
        (SelectionStage::Idle, _) | (_, None) => {
            let mut options = game
                .hand
                .iter()
                .unique()
                .map(|&c| CliAction::Card(c))
                .collect::<Vec<_>>();
            options.extend([CliAction::Rules, CliAction::CardEffects, CliAction::Quit]);
            format!("Choose the card you want to play:\n{}", commands(options, game))
        }
        (SelectionStage::AwaitingTarget, Some(card)) => {
            let mut options = game
                .valid_actions
                .iter()
                .filter(|a| a.card == card)
                .filter_map(|a| a.target)
                .unique()
                .map(CliAction::Player)
                .collect::<Vec<_>>();
            options.push(CliAction::Cancel);
            format!(
                "Choose the player you want to play {} against:\n{}",
                card,
                commands(options, game)
            )
        }
        (SelectionStage::AwaitingGuess, Some(card)) => {
            let target = selection
                .target
                .map(|t| seat_name(game, t))
                .unwrap_or_default();
            let mut options = state
                .guess_options()
                .into_iter()
                .map(CliAction::Card)
                .collect::<Vec<_>>();
            options.push(CliAction::Cancel);
            format!(
                "Which card do you think {} holds? ({})\n{}",
                target,
                card,
                commands(options, game)
            )
        }
        (SelectionStage::Resolved, Some(card)) => {
            let headline = if card.requires_target()
                && selection.target.is_none()
                && !state.valid_targets_exist()
            {
                format!("No legal target, {} would be discarded with no effect.", card)
            } else {
                let target_str = selection
                    .target
                    .filter(|&t| t != HUMAN_POSITION)
                    .map(|t| format!(" against {}", seat_name(game, t)))
                    .or(selection.target.map(|_| " against yourself".to_string()));
                let guess_str = selection.guess.map(|g| format!(", guessing {g}"));
                format!(
                    "Play {}{}{}?",
                    card,
                    target_str.unwrap_or_default(),
                    guess_str.unwrap_or_default()
                )
            };
            format!(
                "{}\n{}",
                headline,
                commands(vec![CliAction::Play, CliAction::Cancel], game)
            )
        }
        (SelectionStage::CardChosen, Some(card)) => format!(
            "That is not a legal way to play {}.\n{}",
            card,
            commands(vec![CliAction::Cancel], game)
        ),
    }
}
