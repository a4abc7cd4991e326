//! Debounced query evaluation
//!
//! Raw input is echoed immediately through `pending`. Evaluation waits for a
//! quiet period with no further input; every new input aborts the previous
//! timer. Results are published on a watch channel tagged with the
//! generation that produced them, and a result whose generation is no longer
//! current is dropped under the channel lock, so a superseded evaluation can
//! never overwrite a newer one.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Output of an evaluation that was still current when it finished
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<T> {
    pub generation: u64,
    pub query: String,
    pub output: T,
}

/// Everything a subscriber can observe
#[derive(Debug, Clone, PartialEq)]
pub struct DebounceState<T> {
    /// Latest raw input, updated on every push
    pub pending: String,
    /// Bumped on every push
    pub generation: u64,
    pub settled: Option<Settled<T>>,
}

impl<T> Default for DebounceState<T> {
    fn default() -> Self {
        Self {
            pending: String::new(),
            generation: 0,
            settled: None,
        }
    }
}

type Evaluator<T> = Arc<dyn Fn(&str) -> T + Send + Sync>;

/// Cancel-on-supersede debouncer
pub struct Debouncer<T> {
    quiet: Duration,
    eval: Evaluator<T>,
    tx: Arc<watch::Sender<DebounceState<T>>>,
    timer: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F>(quiet: Duration, eval: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        let (tx, _) = watch::channel(DebounceState::default());
        Self {
            quiet,
            eval: Arc::new(eval),
            tx: Arc::new(tx),
            timer: None,
        }
    }

    /// Record new input and restart the quiet period.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn push(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.pending = raw.clone();
            generation = state.generation;
        });

        self.cancel();

        let tx = Arc::clone(&self.tx);
        let eval = Arc::clone(&self.eval);
        let quiet = self.quiet;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let output = eval(&raw);
            publish(&tx, generation, raw, output);
        }));
    }

    /// Number of pushes so far
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// Latest raw input
    pub fn pending(&self) -> String {
        self.tx.borrow().pending.clone()
    }

    /// Most recent settled evaluation, if any
    pub fn latest(&self) -> Option<Settled<T>> {
        self.tx.borrow().settled.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DebounceState<T>> {
        self.tx.subscribe()
    }

    /// Evaluate the pending input now instead of waiting
    pub fn flush(&mut self) -> bool {
        self.cancel();

        let (generation, query) = {
            let state = self.tx.borrow();
            (state.generation, state.pending.clone())
        };
        if generation == 0 {
            return false;
        }

        let output = (self.eval)(&query);
        publish(&self.tx, generation, query, output)
    }

    /// Drop the pending timer without evaluating
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Store `output` unless a newer push has happened since `generation`
fn publish<T>(
    tx: &watch::Sender<DebounceState<T>>,
    generation: u64,
    query: String,
    output: T,
) -> bool {
    tx.send_if_modified(|state| {
        if state.generation != generation {
            debug!(
                "Discarding stale result for '{}' (generation {} < {})",
                query, generation, state.generation
            );
            return false;
        }

        state.settled = Some(Settled {
            generation,
            query,
            output,
        });
        true
    })
}
