use std::{str::FromStr, sync::Mutex, time::Duration};

use clap::Parser;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use royals_core::{
    api::HttpGameApi,
    card::Card,
    config::{ClientConfig, DEFAULT_BASE_URL, MOVE_DELAY},
    connect,
    game_state::GameState,
    selection::SelectionStage,
    state::ClientState,
};

use console::{format_play, prompt, render_table, CliAction, RULES};

mod console;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for a Royals game server")]
struct Args {
    /// Base URL of the game server's api
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    server: String,

    /// Pause before each automated turn, in milliseconds
    #[arg(long, default_value_t = MOVE_DELAY.as_millis() as u64)]
    delay_ms: u64,
}

/// Prints the plays of every newly installed snapshot.
fn snapshot_notifier() -> impl Fn(&ClientState) + Send + 'static {
    let last_seen = Mutex::new(GameState::default());
    move |state: &ClientState| {
        let Ok(mut last) = last_seen.lock() else {
            return;
        };
        if *last == state.game {
            return;
        }
        let plays = &state.game.plays;
        let fresh = if plays.starts_with(&last.plays) {
            &plays[last.plays.len()..]
        } else {
            &plays[..]
        };
        for play in fresh {
            println!("{}", format_play(play, &state.game));
        }
        if state.is_human_turn() || state.game.game_over || state.outcome().is_some() {
            println!("-- press Enter --");
        }
        *last = state.game.clone();
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = ClientConfig {
        base_url: args.server,
        move_delay: Duration::from_millis(args.delay_ms),
    };
    info!("Connecting to {}", config.base_url);

    let controller = connect(HttpGameApi::new(&config.base_url), &config).await;
    controller.subscribe(snapshot_notifier()).await;

    println!("{}", RULES);
    controller.reset_game().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let state = controller.state().await;
        println!("{}", render_table(&state));
        println!("\n{}", prompt(&state));

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("reading input failed: {}", e);
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(action) = CliAction::from_str(line) else {
            println!("Unknown command: {}", line);
            continue;
        };

        let state = controller.state().await;
        match action {
            CliAction::Quit => break,
            CliAction::Rules => println!("{}", RULES),
            CliAction::CardEffects => println!("{}", Card::rules()),
            CliAction::NewGame => controller.reset_game().await,
            CliAction::Watch => controller.enter_watch_mode().await,
            CliAction::Cancel => controller.cancel_selection().await,
            CliAction::Play => match state.chosen_action() {
                Some(action) => controller.submit_move(action.clone()).await,
                None => println!("Your move is not complete yet."),
            },
            CliAction::Card(card) => {
                if state.selection_stage() == SelectionStage::AwaitingGuess {
                    controller.choose_guess(Some(card)).await;
                } else {
                    controller.cancel_selection().await;
                    controller.choose_card(Some(card)).await;
                }
            }
            CliAction::Player(position) => controller.choose_target(Some(position)).await,
        }
    }
}
