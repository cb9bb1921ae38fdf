pub mod action;
pub mod api;
pub mod card;
pub mod config;
pub mod error;
pub mod game_state;
mod middleware;
pub mod play;
pub mod player;
mod reconcile;
mod reducer;
pub mod scheduler;
pub mod selection;
pub mod state;
mod store;
pub mod utils;
mod wire;

pub use store::{connect, Controller};
