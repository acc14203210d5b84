//! Runtime-agnostic async primitives for the fetch message bridge.
//!
//! The bridge needs a very small slice of an async runtime: a way to block a
//! synchronous caller on a future, a single-slot channel, a cancellation
//! token, a timer, and cooperative task spawning. This crate picks the right
//! implementation per target:
//! - Native platforms: Tokio (current-thread runtime for `block_on`)
//! - WebAssembly: `futures` executors plus `wasm-bindgen-futures`
//!
//! Downstream crates depend on this crate instead of Tokio directly.
//!
//! # Modules
//!
//! - `runtime`: `block_on` and the native runtime handle
//! - `sync`: `oneshot` channels and `CancellationToken`
//! - `task`: `spawn` and `yield_now`
//! - `time`: `sleep`, `timeout`, `Duration`

pub mod runtime;
pub mod sync;
pub mod task;
pub mod time;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use runtime::block_on;
pub use task::{spawn, yield_now};
pub use time::Duration;
