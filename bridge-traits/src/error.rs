use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The host raised while constructing, cloning or reading an object.
    /// The message is the host's own, unchanged.
    #[error("Host platform error: {0}")]
    Platform(String),

    #[error("Message body has already been consumed")]
    BodyUsed,
}

pub type Result<T> = std::result::Result<T, BridgeError>;
