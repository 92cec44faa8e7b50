pub mod channel_source;
pub mod events;
pub mod merge;
pub mod source;
pub mod store;

pub use channel_source::ChannelEventSource;
pub use events::{EventChannel, RemoteEvent, TaskCreated, TaskDeleted, TaskUpdated};
pub use merge::{
    ConnectionError, ConnectionStatus, EventCallback, MergeCallbacks, MergeHandle, MergeOptions,
    RemoteMerge, SubscriptionStatus,
};
pub use source::{RemoteEventSource, Subscription};
pub use store::Store;
