use thiserror::Error;

#[derive(Error, Debug)]
pub enum KanbanError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Subscription error on {channel}: {message}")]
    Subscription { channel: String, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl KanbanError {
    pub fn subscription(channel: impl std::fmt::Display, message: impl Into<String>) -> Self {
        Self::Subscription {
            channel: channel.to_string(),
            message: message.into(),
        }
    }

    /// Errors raised by a remote transport rather than by local input.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Subscription { .. })
    }
}
