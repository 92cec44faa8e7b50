use async_trait::async_trait;
use kanban_core::KanbanResult;
use kanban_domain::BoardId;
use tokio::sync::mpsc;

use crate::events::{TaskCreated, TaskDeleted, TaskUpdated};

/// A live stream from one remote subscription.
///
/// An `Err` item reports a transport failure; the stream ends when the
/// sending side goes away.
pub struct Subscription<T> {
    rx: mpsc::Receiver<KanbanResult<T>>,
}

impl<T> Subscription<T> {
    /// Create a subscription together with the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<KanbanResult<T>>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self { rx })
    }

    pub async fn next(&mut self) -> Option<KanbanResult<T>> {
        self.rx.recv().await
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// Transport for the three task subscriptions.
///
/// `board_id` scopes a subscription to one board; `None` receives events
/// for every board.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteEventSource: Send + Sync {
    async fn subscribe_created(
        &self,
        board_id: Option<BoardId>,
    ) -> KanbanResult<Subscription<TaskCreated>>;

    async fn subscribe_updated(
        &self,
        board_id: Option<BoardId>,
    ) -> KanbanResult<Subscription<TaskUpdated>>;

    async fn subscribe_deleted(
        &self,
        board_id: Option<BoardId>,
    ) -> KanbanResult<Subscription<TaskDeleted>>;
}
