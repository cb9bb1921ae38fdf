use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::future::BoxFuture;
use log::{debug, log, warn, Level};
use redux_rs::{MiddleWare, StoreApi};

use crate::{
    action::{ClientAction, InternalAction, UiAction},
    api::GameApi,
    play::GameAction,
    scheduler::{schedule_after, Generation, HandleIds},
    selection::SelectionStage,
    state::ClientState,
};

pub struct LogMiddleware {
    level: Level,
}

impl LogMiddleware {
    pub fn new(level: Level) -> Self {
        LogMiddleware { level }
    }
}

#[async_trait]
impl<Inner> MiddleWare<ClientState, ClientAction, Inner> for LogMiddleware
where
    Inner: StoreApi<ClientState, ClientAction> + Send + Sync,
{
    async fn dispatch(&self, action: ClientAction, inner: &Arc<Inner>) {
        log!(self.level, "dispatch {}", action.describe());
        inner.dispatch(action).await;
    }
}

pub struct ValidatorMiddleware;

#[async_trait]
impl<Inner> MiddleWare<ClientState, ClientAction, Inner> for ValidatorMiddleware
where
    Inner: StoreApi<ClientState, ClientAction> + Send + Sync,
{
    async fn dispatch(&self, action: ClientAction, inner: &Arc<Inner>) {
        let state = inner.state_cloned().await;

        let valid = match &action {
            ClientAction::Ui(ui) => match ui {
                UiAction::SubmitMove(submitted) => {
                    state.selection_stage() == SelectionStage::Resolved
                        && state.chosen_action() == Some(submitted)
                }
                UiAction::EnterWatchMode => {
                    state.running
                        && !state.watching
                        && (state.game.game_over || !state.human_active())
                }
                UiAction::ChooseCard(_)
                | UiAction::ChooseGuess(_)
                | UiAction::ChooseTarget(_)
                | UiAction::ResetGame => true,
            },
            ClientAction::Internal(_) => true,
        };

        if !valid {
            warn!("Ignoring invalid action: {:?}", action);
        } else {
            inner.dispatch(action).await;
        }
    }
}

/// Turns presentation operations into reducer transitions, performing the
/// server round-trips and scheduling automated steps on the way.
pub struct ExchangeMiddleware<A> {
    api: Arc<A>,
    move_delay: Duration,
    ids: Arc<HandleIds>,
}

impl<A: GameApi> ExchangeMiddleware<A> {
    pub fn new(api: A, move_delay: Duration) -> Self {
        ExchangeMiddleware {
            api: Arc::new(api),
            move_delay,
            ids: Arc::new(HandleIds::default()),
        }
    }
}

#[async_trait]
impl<A, Inner> MiddleWare<ClientState, ClientAction, Inner> for ExchangeMiddleware<A>
where
    A: GameApi,
    Inner: StoreApi<ClientState, ClientAction> + Send + Sync + 'static,
{
    async fn dispatch(&self, action: ClientAction, inner: &Arc<Inner>) {
        let ui = match action {
            ClientAction::Ui(ui) => ui,
            internal @ ClientAction::Internal(_) => {
                inner.dispatch(internal).await;
                return;
            }
        };

        let exchange = Exchange {
            api: self.api.clone(),
            inner: inner.clone(),
            move_delay: self.move_delay,
            ids: self.ids.clone(),
        };

        match ui {
            UiAction::ChooseCard(card) => exchange.apply(InternalAction::CardChosen(card)).await,
            UiAction::ChooseGuess(guess) => {
                exchange.apply(InternalAction::GuessChosen(guess)).await
            }
            UiAction::ChooseTarget(target) => {
                exchange.apply(InternalAction::TargetChosen(target)).await
            }
            UiAction::SubmitMove(action) => exchange.submit(action).await,
            UiAction::ResetGame => exchange.reset().await,
            UiAction::EnterWatchMode => exchange.watch().await,
        }
    }
}

struct Exchange<A, Inner> {
    api: Arc<A>,
    inner: Arc<Inner>,
    move_delay: Duration,
    ids: Arc<HandleIds>,
}

impl<A, Inner> Clone for Exchange<A, Inner> {
    fn clone(&self) -> Self {
        Exchange {
            api: self.api.clone(),
            inner: self.inner.clone(),
            move_delay: self.move_delay,
            ids: self.ids.clone(),
        }
    }
}

impl<A, Inner> Exchange<A, Inner>
where
    A: GameApi,
    Inner: StoreApi<ClientState, ClientAction> + Send + Sync + 'static,
{
    async fn apply(&self, action: InternalAction) {
        self.inner.dispatch(ClientAction::Internal(action)).await;
    }

    async fn generation(&self) -> Generation {
        self.inner.state_cloned().await.generation
    }

    async fn submit(&self, action: GameAction) {
        self.apply(InternalAction::CardChosen(None)).await;
        self.apply(InternalAction::GuessChosen(None)).await;
        self.apply(InternalAction::TargetChosen(None)).await;

        let generation = self.generation().await;
        match self.api.play(action.id).await {
            Ok(game) => {
                self.apply(InternalAction::IncrementalUpdate(game, generation))
                    .await;
                self.schedule_if_needed(generation).await;
            }
            Err(e) => warn!("submitting move {} failed: {}", action.id, e),
        }
    }

    async fn reset(&self) {
        self.apply(InternalAction::ResetIssued).await;

        let generation = self.generation().await;
        match self.api.reset().await {
            Ok(game) => {
                self.apply(InternalAction::FullReset(game, generation)).await;
                self.schedule_if_needed(generation).await;
            }
            Err(e) => warn!("starting a new game failed: {}", e),
        }
    }

    async fn watch(&self) {
        self.apply(InternalAction::WatchEntered).await;
        let generation = self.generation().await;
        self.schedule_if_needed(generation).await;
    }

    async fn step(&self, generation: Generation) {
        if self.generation().await != generation {
            debug!("skipping step of superseded generation {}", generation);
            return;
        }
        match self.api.step().await {
            Ok(game) => {
                self.apply(InternalAction::IncrementalUpdate(game, generation))
                    .await;
                self.schedule_if_needed(generation).await;
            }
            Err(e) => warn!("polling the next step failed: {}", e),
        }
    }

    fn schedule_if_needed(&self, generation: Generation) -> BoxFuture<'static, ()> {
        let exchange = self.clone();
        Box::pin(async move {
            let state = exchange.inner.state_cloned().await;
            if state.generation != generation {
                return;
            }
            if !state.should_poll() {
                debug!("not polling: {:?}", state.turn_view());
                return;
            }

            let id = exchange.ids.next();
            let poll = exchange.clone();
            let handle = schedule_after(id, generation, exchange.move_delay, async move {
                poll.step(generation).await;
            });
            debug!("scheduled poll {} in {:?}", id, exchange.move_delay);
            exchange
                .apply(InternalAction::PendingRegistered(handle))
                .await;
        })
    }
}
