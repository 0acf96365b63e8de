//! Effect execution.
//!
//! Every async intent spawns one worker task that resolves to exactly one
//! follow-up action. Two concurrency strategies are supported:
//!
//! - [`Strategy::Merge`]: workers run side by side and each result is
//!   delivered in completion order.
//! - [`Strategy::Switch`]: a new worker for the same key aborts the previous
//!   one. A generation counter guards delivery, so a superseded worker that
//!   already finished still never reaches the reducer.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{AbortHandle, JoinError};
use tracing::{trace, warn};

use crate::service::{ChatApi, DocumentApi};

use super::{AppAction, Envelope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Merge,
    Switch,
}

#[derive(Default)]
struct SwitchSlot {
    generation: u64,
    inflight: Option<AbortHandle>,
}

#[derive(Clone)]
pub struct EffectRunner {
    tx: UnboundedSender<Envelope>,
    slots: Arc<Mutex<HashMap<&'static str, SwitchSlot>>>,
}

impl EffectRunner {
    pub(crate) fn new(tx: UnboundedSender<Envelope>) -> Self {
        Self {
            tx,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs `work` and feeds its action back into the store.
    ///
    /// `on_panic` builds the failure action delivered when the worker panics.
    pub fn spawn<F>(
        &self,
        key: &'static str,
        strategy: Strategy,
        work: F,
        on_panic: fn(String) -> AppAction,
    ) where
        F: Future<Output = AppAction> + Send + 'static,
    {
        let worker = tokio::spawn(work);

        match strategy {
            Strategy::Merge => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    if let Some(action) = settle(key, worker.await, on_panic) {
                        let _ = tx.send(Envelope::from(action));
                    }
                });
            }
            Strategy::Switch => {
                let generation = {
                    let mut slots = self.slots.lock();
                    let slot = slots.entry(key).or_default();
                    if let Some(previous) = slot.inflight.replace(worker.abort_handle()) {
                        trace!(effect = key, "Superseding in-flight effect");
                        previous.abort();
                    }
                    slot.generation += 1;
                    slot.generation
                };

                let tx = self.tx.clone();
                let slots = Arc::clone(&self.slots);
                tokio::spawn(async move {
                    let outcome = settle(key, worker.await, on_panic);
                    let mut slots = slots.lock();
                    let Some(slot) = slots.get_mut(key) else {
                        return;
                    };
                    if slot.generation != generation {
                        trace!(effect = key, generation, "Dropping stale effect result");
                        return;
                    }
                    slot.inflight = None;
                    if let Some(action) = outcome {
                        let _ = tx.send(Envelope::from(action));
                    }
                });
            }
        }
    }

    /// Number of switch keys with a worker still running.
    pub fn inflight_switches(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.inflight.is_some())
            .count()
    }
}

fn settle(
    key: &'static str,
    result: Result<AppAction, JoinError>,
    on_panic: fn(String) -> AppAction,
) -> Option<AppAction> {
    match result {
        Ok(action) => Some(action),
        Err(err) if err.is_panic() => {
            let message = panic_message(err.into_panic());
            warn!(effect = key, error = %message, "Effect panicked");
            Some(on_panic(message))
        }
        Err(_) => None,
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("effect panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("effect panicked: {s}")
    } else {
        "effect panicked".to_string()
    }
}

/// Collaborators available to effects.
#[derive(Clone)]
pub struct EffectContext {
    documents: Arc<dyn DocumentApi>,
    chat: Arc<dyn ChatApi>,
    runner: EffectRunner,
}

impl EffectContext {
    pub(crate) fn new(
        documents: Arc<dyn DocumentApi>,
        chat: Arc<dyn ChatApi>,
        runner: EffectRunner,
    ) -> Self {
        Self {
            documents,
            chat,
            runner,
        }
    }

    pub fn documents(&self) -> Arc<dyn DocumentApi> {
        Arc::clone(&self.documents)
    }

    pub fn chat(&self) -> Arc<dyn ChatApi> {
        Arc::clone(&self.chat)
    }

    pub fn runner(&self) -> &EffectRunner {
        &self.runner
    }
}
