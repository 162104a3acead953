//! Background task plumbing for the selector.
//!
//! Fetches and debounce timers run as tokio tasks. They never touch the
//! selector directly; they report back through an unbounded channel that the
//! host event loop drains with `try_recv()` and hands to
//! `MultiSelector::handle_message`.

use std::future::Future;

use tokio::sync::mpsc;

use super::error::FetchError;
use super::option::{QueryState, SelectOption};
use super::source::OptionSource;

/// Messages sent from background tasks to the event loop.
#[derive(Debug)]
pub enum SelectorMessage {
    /// The debounce window for a typed query elapsed.
    SearchReady {
        query: QueryState,
        /// Identifies the keystroke that scheduled this search.
        ticket: u64,
    },

    /// A fetch settled.
    OptionsFetched {
        request_id: u64,
        query: QueryState,
        result: Result<Vec<SelectOption>, FetchError>,
    },
}

/// Spawns selector background tasks.
#[derive(Debug, Clone)]
pub struct SelectorTasks {
    tx: mpsc::UnboundedSender<SelectorMessage>,
}

impl SelectorTasks {
    /// Create a spawner around the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<SelectorMessage>) -> Self {
        Self { tx }
    }

    /// Issue a fetch and spawn a task that reports its result.
    ///
    /// The request is issued synchronously; only the wait happens in the
    /// background.
    pub fn spawn_fetch(&self, source: &dyn OptionSource, query: QueryState, request_id: u64) {
        let tx = self.tx.clone();
        let pending = source.fetch(query.clone());
        tokio::spawn(async move {
            let result = pending.await;
            let _ = tx.send(SelectorMessage::OptionsFetched {
                request_id,
                query,
                result,
            });
        });
    }

    /// Build the action a debounce timer runs when its window elapses.
    pub fn search_ready(
        &self,
        query: QueryState,
        ticket: u64,
    ) -> impl Future<Output = ()> + Send + 'static {
        let tx = self.tx.clone();
        async move {
            let _ = tx.send(SelectorMessage::SearchReady { query, ticket });
        }
    }
}

/// Create a new selector task channel.
///
/// Returns a tuple of (receiver, spawner). Poll the receiver in the event
/// loop and give the spawner to the selector.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<SelectorMessage>, SelectorTasks) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, SelectorTasks::new(tx))
}
