//! Blocking entry point into async code.
//!
//! On native targets `block_on` drives the future on a fresh current-thread
//! Tokio runtime, so tasks spawned while it runs (for example by a host that
//! delivers a body from a background task) make progress on the same thread.
//! Calling it from a thread that drives another Tokio runtime panics; async
//! callers should await the future instead. [`try_block_on`] checks the
//! calling thread first and only blocks where that is allowed.
//!
//! On WebAssembly the future is driven by a `LocalPool`. The browser event
//! loop cannot turn while the pool runs, so futures waiting on promises or
//! timers never complete there.

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

/// Runs the provided future to completion on the current thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("core_async::runtime::block_on: failed to build Tokio runtime")
        .block_on(future)
}

/// Returns `true` when a Tokio runtime is reachable from this thread, so
/// tasks can be spawned onto it.
#[cfg(not(target_arch = "wasm32"))]
pub fn inside_runtime() -> bool {
    Handle::try_current().is_ok()
}

/// Runs `future` to completion from synchronous code where this thread may
/// block.
///
/// - Outside any runtime the future runs through [`block_on`].
/// - Under a multi-thread runtime the call goes through
///   `tokio::task::block_in_place`. Worker threads hand their queue off
///   first; `spawn_blocking` threads block directly.
/// - Under a current-thread runtime this returns `None` without polling
///   `future`, since the thread may be the one driving that runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn try_block_on<F>(future: F) -> Option<F::Output>
where
    F: std::future::Future,
{
    match Handle::try_current() {
        Err(_) => Some(block_on(future)),
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Some(tokio::task::block_in_place(|| block_on(future)))
        }
        Ok(_) => None,
    }
}

/// Runs the provided future to completion on a local pool.
///
/// Only futures that complete without the browser event loop finish here:
/// already-resolved values, channels fed synchronously, pure computation.
#[cfg(target_arch = "wasm32")]
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    futures::executor::LocalPool::new().run_until(future)
}

#[cfg(target_arch = "wasm32")]
pub fn inside_runtime() -> bool {
    false
}

#[cfg(target_arch = "wasm32")]
pub fn try_block_on<F>(future: F) -> Option<F::Output>
where
    F: std::future::Future,
{
    Some(block_on(future))
}

#[cfg(target_arch = "wasm32")]
pub use wasm_bindgen_futures::spawn_local;
