//! Merges the three remote task subscriptions into a [`Store`].
//!
//! Each subscription runs on its own tokio task and dispatches one local
//! action per event. Events are applied in arrival order per channel; the
//! last one applied wins. A subscription that reports an error keeps that
//! first error and stops listening.

use std::sync::Arc;

use kanban_core::{AppConfig, KanbanError, KanbanResult};
use kanban_domain::BoardId;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::events::{EventChannel, RemoteEvent, TaskCreated, TaskDeleted, TaskUpdated};
use crate::source::{RemoteEventSource, Subscription};
use crate::store::Store;

pub type EventCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Optional hooks run after an event has been merged into the store.
#[derive(Clone, Default)]
pub struct MergeCallbacks {
    pub on_created: Option<EventCallback<TaskCreated>>,
    pub on_updated: Option<EventCallback<TaskUpdated>>,
    pub on_deleted: Option<EventCallback<TaskDeleted>>,
}

impl std::fmt::Debug for MergeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeCallbacks")
            .field("on_created", &self.on_created.is_some())
            .field("on_updated", &self.on_updated.is_some())
            .field("on_deleted", &self.on_deleted.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Only receive events for this board.
    pub board_id: Option<BoardId>,
    /// Do not subscribe at all.
    pub skip: bool,
    pub callbacks: MergeCallbacks,
}

impl MergeOptions {
    /// Scope and skip flag from the `[sync]` table.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            board_id: config.sync.board_id,
            skip: config.sync.skip,
            callbacks: MergeCallbacks::default(),
        }
    }

    pub fn with_callbacks(mut self, callbacks: MergeCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionError {
    pub channel: EventChannel,
    pub message: String,
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.channel, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionStatus {
    /// True until the transport has accepted the subscription.
    pub loading: bool,
    pub skip: bool,
    pub error: Option<ConnectionError>,
}

impl SubscriptionStatus {
    fn initial(skip: bool) -> Self {
        Self {
            loading: !skip,
            skip,
            error: None,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.loading && !self.skip && self.error.is_none()
    }
}

/// Combined state of the three subscriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub created: SubscriptionStatus,
    pub updated: SubscriptionStatus,
    pub deleted: SubscriptionStatus,
}

impl ConnectionStatus {
    fn initial(skip: bool) -> Self {
        Self {
            created: SubscriptionStatus::initial(skip),
            updated: SubscriptionStatus::initial(skip),
            deleted: SubscriptionStatus::initial(skip),
        }
    }

    pub fn channel(&self, channel: EventChannel) -> &SubscriptionStatus {
        match channel {
            EventChannel::Created => &self.created,
            EventChannel::Updated => &self.updated,
            EventChannel::Deleted => &self.deleted,
        }
    }

    fn channel_mut(&mut self, channel: EventChannel) -> &mut SubscriptionStatus {
        match channel {
            EventChannel::Created => &mut self.created,
            EventChannel::Updated => &mut self.updated,
            EventChannel::Deleted => &mut self.deleted,
        }
    }

    /// All three subscriptions are established and healthy.
    pub fn connected(&self) -> bool {
        EventChannel::ALL
            .iter()
            .all(|&channel| self.channel(channel).is_live())
    }

    pub fn is_loading(&self) -> bool {
        EventChannel::ALL
            .iter()
            .any(|&channel| self.channel(channel).loading)
    }

    /// First error in created, updated, deleted order.
    pub fn error(&self) -> Option<&ConnectionError> {
        EventChannel::ALL
            .iter()
            .find_map(|&channel| self.channel(channel).error.as_ref())
    }
}

/// Starts the merge tasks.
pub struct RemoteMerge;

impl RemoteMerge {
    /// Subscribe to all three channels and merge their events into `store`.
    ///
    /// Must be called from within a tokio runtime. With `options.skip` set no
    /// task is spawned and the handle reports a skipped connection.
    pub fn start<S>(store: Arc<Store>, source: Arc<S>, options: MergeOptions) -> MergeHandle
    where
        S: RemoteEventSource + ?Sized + 'static,
    {
        let status = Arc::new(watch::Sender::new(ConnectionStatus::initial(options.skip)));
        let receiver = status.subscribe();

        if options.skip {
            tracing::info!("Remote merge skipped");
            return MergeHandle {
                status,
                receiver,
                tasks: Vec::new(),
            };
        }

        let scope = options.board_id;
        let callbacks = options.callbacks;
        tracing::info!(board_id = ?scope, "Starting remote merge");

        let created = {
            let (store, source, status) = (store.clone(), source.clone(), status.clone());
            let callback = callbacks.on_created;
            tokio::spawn(async move {
                let subscription = source.subscribe_created(scope).await;
                merge_events(store, status, subscription, callback).await;
            })
        };
        let updated = {
            let (store, source, status) = (store.clone(), source.clone(), status.clone());
            let callback = callbacks.on_updated;
            tokio::spawn(async move {
                let subscription = source.subscribe_updated(scope).await;
                merge_events(store, status, subscription, callback).await;
            })
        };
        let deleted = {
            let status = status.clone();
            let callback = callbacks.on_deleted;
            tokio::spawn(async move {
                let subscription = source.subscribe_deleted(scope).await;
                merge_events(store, status, subscription, callback).await;
            })
        };

        MergeHandle {
            status,
            receiver,
            tasks: vec![created, updated, deleted],
        }
    }
}

async fn merge_events<T: RemoteEvent>(
    store: Arc<Store>,
    status: Arc<watch::Sender<ConnectionStatus>>,
    subscription: KanbanResult<Subscription<T>>,
    callback: Option<EventCallback<T>>,
) {
    let channel = T::CHANNEL;
    let mut subscription = match subscription {
        Ok(subscription) => {
            status.send_modify(|s| s.channel_mut(channel).loading = false);
            tracing::debug!(%channel, "Subscription established");
            subscription
        }
        Err(e) => {
            record_error(&status, channel, &e);
            return;
        }
    };

    while let Some(message) = subscription.next().await {
        match message {
            Ok(event) => {
                let action = event.to_action();
                tracing::debug!(%channel, action = action.name(), "Merging remote event");
                store.dispatch(action);
                if let Some(callback) = &callback {
                    callback(&event);
                }
            }
            Err(e) => {
                record_error(&status, channel, &e);
                return;
            }
        }
    }

    tracing::debug!(%channel, "Subscription closed");
}

fn record_error(
    status: &watch::Sender<ConnectionStatus>,
    channel: EventChannel,
    error: &KanbanError,
) {
    if error.is_remote() {
        tracing::warn!(%channel, "Subscription failed: {}", error);
    } else {
        tracing::error!(%channel, "Subscription failed: {}", error);
    }
    status.send_modify(|s| {
        let sub = s.channel_mut(channel);
        sub.loading = false;
        if sub.error.is_none() {
            sub.error = Some(ConnectionError {
                channel,
                message: error.to_string(),
            });
        }
    });
}

/// Running merge. Dropping it stops all three subscriptions.
pub struct MergeHandle {
    status: Arc<watch::Sender<ConnectionStatus>>,
    receiver: watch::Receiver<ConnectionStatus>,
    tasks: Vec<JoinHandle<()>>,
}

impl MergeHandle {
    pub fn status(&self) -> ConnectionStatus {
        self.status.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status.borrow().connected()
    }

    pub fn error(&self) -> Option<ConnectionError> {
        self.status.borrow().error().cloned()
    }

    pub fn watch_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.receiver.clone()
    }

    /// Wait until the status satisfies `predicate` and return it.
    pub async fn wait_for<F>(&self, mut predicate: F) -> KanbanResult<ConnectionStatus>
    where
        F: FnMut(&ConnectionStatus) -> bool,
    {
        let mut receiver = self.receiver.clone();
        let status = receiver
            .wait_for(|s| predicate(s))
            .await
            .map_err(|e| KanbanError::Connection(e.to_string()))?;
        Ok(status.clone())
    }

    /// Wait until every subscription has left the loading state.
    pub async fn settled(&self) -> KanbanResult<ConnectionStatus> {
        self.wait_for(|s| !s.is_loading()).await
    }

    pub fn stop(self) {
        tracing::info!("Stopping remote merge");
    }
}

impl Drop for MergeHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
