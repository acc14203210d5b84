//! Synchronization primitives.
//!
//! - Native: `tokio::sync::oneshot` and `tokio_util::sync::CancellationToken`
//! - WASM: `futures::channel::oneshot` and a single-threaded token
//!
//! Both `oneshot` flavours share the surface the bridge relies on:
//! `channel()`, `Sender::send(value) -> Result<(), T>`, and a `Receiver`
//! that resolves to `Err(_)` once the sender is dropped unused.

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::sync::oneshot;

#[cfg(not(target_arch = "wasm32"))]
pub use tokio_util::sync::CancellationToken;

#[cfg(target_arch = "wasm32")]
pub use futures::channel::oneshot;

#[cfg(target_arch = "wasm32")]
pub use crate::wasm::cancellation_token::CancellationToken;
