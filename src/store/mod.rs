//! Application state store.
//!
//! One task owns the state and applies actions strictly in dispatch order.
//! After each action it publishes a new [`AppState`] snapshot and starts the
//! action's effects, whose follow-up actions re-enter the same queue.
//! Slices an action did not change keep their `Arc`, so observers can detect
//! changes by pointer identity.

pub mod chat;
pub mod document_detail;
pub mod documents_list;
pub mod effect;
pub mod mvi;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::service::{ChatApi, DocumentApi};

use chat::{ChatAction, ChatReducer, ChatState};
use document_detail::{DocumentDetailAction, DocumentDetailReducer, DocumentDetailState};
use documents_list::{DocumentsListAction, DocumentsListReducer, DocumentsListState};
use effect::{EffectContext, EffectRunner};
use mvi::{Action, Reducer};

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    DocumentsList(DocumentsListAction),
    DocumentDetail(DocumentDetailAction),
    Chat(ChatAction),
}

impl Action for AppAction {
    fn name(&self) -> &'static str {
        match self {
            Self::DocumentsList(action) => action.name(),
            Self::DocumentDetail(action) => action.name(),
            Self::Chat(action) => action.name(),
        }
    }
}

impl From<DocumentsListAction> for AppAction {
    fn from(action: DocumentsListAction) -> Self {
        Self::DocumentsList(action)
    }
}

impl From<DocumentDetailAction> for AppAction {
    fn from(action: DocumentDetailAction) -> Self {
        Self::DocumentDetail(action)
    }
}

impl From<ChatAction> for AppAction {
    fn from(action: ChatAction) -> Self {
        Self::Chat(action)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Number of actions reduced so far.
    pub revision: u64,
    pub documents_list: Arc<DocumentsListState>,
    pub document_detail: Arc<DocumentDetailState>,
    pub chat: Arc<ChatState>,
}

/// Applies one action to the root state.
pub fn reduce(state: &AppState, action: AppAction) -> AppState {
    let mut next = AppState {
        revision: state.revision + 1,
        ..state.clone()
    };
    match action {
        AppAction::DocumentsList(action) => {
            next.documents_list =
                reduce_slice::<DocumentsListReducer>(&state.documents_list, action);
        }
        AppAction::DocumentDetail(action) => {
            next.document_detail =
                reduce_slice::<DocumentDetailReducer>(&state.document_detail, action);
        }
        AppAction::Chat(action) => {
            next.chat = reduce_slice::<ChatReducer>(&state.chat, action);
        }
    }
    next
}

fn reduce_slice<R: Reducer>(slice: &Arc<R::State>, action: R::Action) -> Arc<R::State> {
    let reduced = R::reduce(R::State::clone(slice), action);
    if reduced == **slice {
        Arc::clone(slice)
    } else {
        Arc::new(reduced)
    }
}

fn run_effects(action: &AppAction, state: &AppState, ctx: &EffectContext) {
    match action {
        AppAction::DocumentsList(action) => documents_list::effects::run(action, ctx),
        AppAction::DocumentDetail(action) => document_detail::effects::run(action, ctx),
        AppAction::Chat(action) => chat::effects::run(action, state, ctx),
    }
}

/// Queue entry. `ack` receives the revision produced by this action.
pub(crate) struct Envelope {
    pub(crate) action: AppAction,
    ack: Option<oneshot::Sender<u64>>,
}

impl From<AppAction> for Envelope {
    fn from(action: AppAction) -> Self {
        Self { action, ack: None }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store loop has stopped")]
    Closed,
}

pub struct Store {
    tx: UnboundedSender<Envelope>,
    state: Arc<watch::Sender<Arc<AppState>>>,
    runner: EffectRunner,
    loop_handle: JoinHandle<()>,
}

impl Store {
    /// Starts the reducer loop. Must be called inside a Tokio runtime.
    pub fn new(documents: Arc<dyn DocumentApi>, chat: Arc<dyn ChatApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, _) = watch::channel(Arc::new(AppState::default()));
        let state = Arc::new(state_tx);
        let runner = EffectRunner::new(tx.clone());
        let ctx = EffectContext::new(documents, chat, runner.clone());
        let loop_handle = tokio::spawn(run_loop(rx, Arc::clone(&state), ctx));

        Self {
            tx,
            state,
            runner,
            loop_handle,
        }
    }

    /// Queues an action. Never blocks.
    pub fn dispatch(&self, action: impl Into<AppAction>) {
        let _ = self.tx.send(Envelope::from(action.into()));
    }

    /// Queues an action and waits for the first snapshot, at or after the one
    /// this action produced, that satisfies `predicate`.
    pub async fn dispatch_and_wait<P>(
        &self,
        action: impl Into<AppAction>,
        mut predicate: P,
    ) -> Result<Arc<AppState>, StoreError>
    where
        P: FnMut(&AppState) -> bool,
    {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                action: action.into(),
                ack: Some(ack_tx),
            })
            .map_err(|_| StoreError::Closed)?;
        let revision = ack_rx.await.map_err(|_| StoreError::Closed)?;
        self.wait_for(move |state| state.revision >= revision && predicate(state))
            .await
    }

    /// Waits for the first snapshot, the current one included, that
    /// satisfies `predicate`.
    pub async fn wait_for<P>(&self, mut predicate: P) -> Result<Arc<AppState>, StoreError>
    where
        P: FnMut(&AppState) -> bool,
    {
        let mut rx = self.state.subscribe();
        let snapshot = rx
            .wait_for(|state| predicate(&**state))
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(Arc::clone(&snapshot))
    }

    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state.borrow())
    }

    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.snapshot())
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.state.subscribe(),
        }
    }

    /// Live [`Subscription`]s and pending waits.
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    pub fn effects(&self) -> &EffectRunner {
        &self.runner
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        self.loop_handle.abort();
    }
}

/// Snapshot stream. Dropping it unsubscribes.
pub struct Subscription {
    rx: watch::Receiver<Arc<AppState>>,
}

impl Subscription {
    pub fn current(&self) -> Arc<AppState> {
        Arc::clone(&self.rx.borrow())
    }

    /// Waits for the next snapshot. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Arc<AppState>> {
        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update()))
    }
}

async fn run_loop(
    mut rx: UnboundedReceiver<Envelope>,
    state: Arc<watch::Sender<Arc<AppState>>>,
    ctx: EffectContext,
) {
    while let Some(Envelope { action, ack }) = rx.recv().await {
        debug!(action = action.name(), "Reducing");
        let current = Arc::clone(&state.borrow());
        let next = Arc::new(reduce(&current, action.clone()));
        state.send_replace(Arc::clone(&next));
        if let Some(ack) = ack {
            let _ = ack.send(next.revision);
        }
        run_effects(&action, &next, &ctx);
    }
}
