//! The session's single owned snapshot and its dispatcher.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kanban_domain::{compute_recommendation, reduce, reduce_envelope, Action, ActionEnvelope};
use kanban_domain::{KanbanState, Task};
use tokio::sync::watch;

/// Holds the current [`KanbanState`] and applies actions to it.
///
/// Every dispatch runs the reducer under the channel's write lock and
/// publishes a fresh `Arc`, so readers only ever see whole snapshots.
/// Local edits and merged remote events go through the same `dispatch`.
pub struct Store {
    state: watch::Sender<Arc<KanbanState>>,
}

impl Store {
    pub fn new(initial: KanbanState) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self { state }
    }

    pub fn snapshot(&self) -> Arc<KanbanState> {
        Arc::clone(&self.state.borrow())
    }

    pub fn dispatch(&self, action: impl Into<Action>) -> Arc<KanbanState> {
        let action = action.into();
        self.apply(|state| reduce(state, &action))
    }

    /// Dispatch an untyped action; unknown or malformed ones change nothing.
    pub fn dispatch_envelope(&self, envelope: &ActionEnvelope) -> Arc<KanbanState> {
        self.apply(|state| reduce_envelope(state, envelope))
    }

    /// Receive every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<KanbanState>> {
        self.state.subscribe()
    }

    /// Recommended next task on the current board, computed from the latest
    /// snapshot on every call.
    pub fn recommendation(&self, now: DateTime<Utc>) -> Option<Task> {
        let snapshot = self.snapshot();
        let board = snapshot.current_board()?;
        compute_recommendation(board, now).cloned()
    }

    fn apply<F>(&self, transition: F) -> Arc<KanbanState>
    where
        F: FnOnce(&KanbanState) -> KanbanState,
    {
        let mut published = None;
        self.state.send_modify(|current| {
            let next = Arc::new(transition(current));
            published = Some(Arc::clone(&next));
            *current = next;
        });
        published.unwrap_or_else(|| self.snapshot())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(KanbanState::new())
    }
}
