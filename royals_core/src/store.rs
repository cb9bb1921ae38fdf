use log::Level;
use redux_rs::{Store, StoreApi};

use crate::{
    action::{ClientAction, UiAction},
    api::GameApi,
    card::Card,
    config::ClientConfig,
    middleware::{ExchangeMiddleware, LogMiddleware, ValidatorMiddleware},
    play::GameAction,
    player::PlayerPosition,
    reducer::reducer,
    state::ClientState,
};

/// Builds the store around `api` and returns the handle the presentation
/// layer drives it with.
pub async fn connect<A: GameApi>(
    api: A,
    config: &ClientConfig,
) -> Controller<impl StoreApi<ClientState, ClientAction> + Send + Sync + 'static> {
    let store = Store::new_with_state(reducer, ClientState::default())
        .wrap(LogMiddleware::new(Level::Debug))
        .await
        .wrap(ExchangeMiddleware::new(api, config.move_delay))
        .await
        .wrap(ValidatorMiddleware)
        .await
        .wrap(LogMiddleware::new(Level::Info))
        .await;

    Controller { store }
}

pub struct Controller<S> {
    store: S,
}

impl<S> Controller<S>
where
    S: StoreApi<ClientState, ClientAction> + Send + Sync,
{
    pub async fn state(&self) -> ClientState {
        self.store.state_cloned().await
    }

    /// Calls `subscriber` after every transition.
    pub async fn subscribe<F>(&self, subscriber: F)
    where
        F: Fn(&ClientState) + Send + 'static,
    {
        self.store.subscribe(subscriber).await;
    }

    pub async fn choose_card(&self, card: Option<Card>) {
        self.dispatch(UiAction::ChooseCard(card)).await;
    }

    pub async fn choose_guess(&self, guess: Option<Card>) {
        self.dispatch(UiAction::ChooseGuess(guess)).await;
    }

    pub async fn choose_target(&self, target: Option<PlayerPosition>) {
        self.dispatch(UiAction::ChooseTarget(target)).await;
    }

    pub async fn cancel_selection(&self) {
        self.choose_card(None).await;
        self.choose_guess(None).await;
        self.choose_target(None).await;
    }

    pub async fn submit_move(&self, action: GameAction) {
        self.dispatch(UiAction::SubmitMove(action)).await;
    }

    pub async fn reset_game(&self) {
        self.dispatch(UiAction::ResetGame).await;
    }

    pub async fn enter_watch_mode(&self) {
        self.dispatch(UiAction::EnterWatchMode).await;
    }

    async fn dispatch(&self, action: UiAction) {
        self.store.dispatch(ClientAction::Ui(action)).await;
    }
}
