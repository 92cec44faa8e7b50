//! In-process [`RemoteEventSource`] backed by tokio channels.

use async_trait::async_trait;
use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::BoardId;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::events::{EventChannel, RemoteEvent, TaskCreated, TaskDeleted, TaskUpdated};
use crate::source::{RemoteEventSource, Subscription};

struct Subscriber<T> {
    scope: Option<BoardId>,
    tx: mpsc::Sender<KanbanResult<T>>,
}

impl<T> Subscriber<T> {
    /// Events without a board id reach every subscriber.
    fn wants(&self, board_id: Option<BoardId>) -> bool {
        match (self.scope, board_id) {
            (Some(scope), Some(board_id)) => scope == board_id,
            _ => true,
        }
    }
}

struct Topic<T> {
    subscribers: Mutex<Vec<Subscriber<T>>>,
}

impl<T: RemoteEvent> Topic<T> {
    fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn subscribe(&self, scope: Option<BoardId>, buffer: usize) -> Subscription<T> {
        let (tx, subscription) = Subscription::channel(buffer);
        self.subscribers.lock().push(Subscriber { scope, tx });
        subscription
    }

    /// Live senders matching `board_id`, pruning closed ones.
    fn targets(&self, board_id: Option<BoardId>) -> Vec<mpsc::Sender<KanbanResult<T>>> {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|s| !s.tx.is_closed());
        subscribers
            .iter()
            .filter(|s| s.wants(board_id))
            .map(|s| s.tx.clone())
            .collect()
    }

    async fn publish(&self, event: T) -> usize {
        let mut delivered = 0;
        for tx in self.targets(event.board_id()) {
            if tx.send(Ok(event.clone())).await.is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    async fn fail(&self, message: &str) {
        for tx in self.targets(None) {
            let _ = tx
                .send(Err(KanbanError::subscription(T::CHANNEL, message)))
                .await;
        }
    }

    fn len(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|s| !s.tx.is_closed());
        subscribers.len()
    }
}

/// Fans published events out to every matching subscriber.
///
/// Used for local sessions and tests; a networked transport implements
/// [`RemoteEventSource`] the same way.
pub struct ChannelEventSource {
    buffer: usize,
    created: Topic<TaskCreated>,
    updated: Topic<TaskUpdated>,
    deleted: Topic<TaskDeleted>,
}

impl ChannelEventSource {
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer,
            created: Topic::new(),
            updated: Topic::new(),
            deleted: Topic::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.sync.event_buffer)
    }

    /// Returns how many subscribers received the event.
    pub async fn publish_created(&self, event: TaskCreated) -> usize {
        self.created.publish(event).await
    }

    pub async fn publish_updated(&self, event: TaskUpdated) -> usize {
        self.updated.publish(event).await
    }

    pub async fn publish_deleted(&self, event: TaskDeleted) -> usize {
        self.deleted.publish(event).await
    }

    /// Deliver a transport error to every subscriber of `channel`.
    pub async fn fail(&self, channel: EventChannel, message: &str) {
        match channel {
            EventChannel::Created => self.created.fail(message).await,
            EventChannel::Updated => self.updated.fail(message).await,
            EventChannel::Deleted => self.deleted.fail(message).await,
        }
    }

    pub fn subscriber_count(&self, channel: EventChannel) -> usize {
        match channel {
            EventChannel::Created => self.created.len(),
            EventChannel::Updated => self.updated.len(),
            EventChannel::Deleted => self.deleted.len(),
        }
    }
}

impl Default for ChannelEventSource {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[async_trait]
impl RemoteEventSource for ChannelEventSource {
    async fn subscribe_created(
        &self,
        board_id: Option<BoardId>,
    ) -> KanbanResult<Subscription<TaskCreated>> {
        Ok(self.created.subscribe(board_id, self.buffer))
    }

    async fn subscribe_updated(
        &self,
        board_id: Option<BoardId>,
    ) -> KanbanResult<Subscription<TaskUpdated>> {
        Ok(self.updated.subscribe(board_id, self.buffer))
    }

    async fn subscribe_deleted(
        &self,
        board_id: Option<BoardId>,
    ) -> KanbanResult<Subscription<TaskDeleted>> {
        Ok(self.deleted.subscribe(board_id, self.buffer))
    }
}
