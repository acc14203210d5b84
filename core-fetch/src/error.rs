use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// The host raised while cloning, reading or constructing an object.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Config(#[from] core_runtime::Error),

    #[error("Body read timed out after {timeout_ms} ms")]
    BodyTimedOut { timeout_ms: u64 },

    #[error("Body read cancelled")]
    BodyCancelled,

    #[error("Host dropped the body continuation without delivering a body")]
    BodyAbandoned,

    #[error("Blocking conversion called on a current-thread async runtime; use the async variant")]
    BlockingInsideRuntime,
}

pub type Result<T> = std::result::Result<T, FetchError>;
