//! Task spawning.
//!
//! - Native: `tokio::task::spawn` (requires a running runtime)
//! - WASM: `wasm_bindgen_futures::spawn_local`, with an awaitable handle

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::task::{yield_now, JoinError, JoinHandle};

/// Spawns a task onto the current Tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}

#[cfg(target_arch = "wasm32")]
pub use self::local::{spawn, yield_now, JoinError, JoinHandle};

#[cfg(target_arch = "wasm32")]
mod local {
    use futures::channel::oneshot;
    use std::fmt;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// The spawned task was dropped before producing a value.
    #[derive(Debug, Clone)]
    pub struct JoinError;

    impl fmt::Display for JoinError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "task was cancelled")
        }
    }

    impl std::error::Error for JoinError {}

    /// Awaitable handle to a task started with [`spawn`].
    pub struct JoinHandle<T> {
        receiver: oneshot::Receiver<T>,
    }

    impl<T> Future for JoinHandle<T> {
        type Output = Result<T, JoinError>;

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
            Pin::new(&mut self.receiver)
                .poll(cx)
                .map(|result| result.map_err(|_| JoinError))
        }
    }

    /// Spawns a task on the browser event loop.
    pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        let (sender, receiver) = oneshot::channel();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = sender.send(future.await);
        });
        JoinHandle { receiver }
    }

    /// Yields to the browser event loop with a zero-delay timer.
    pub async fn yield_now() {
        gloo_timers::future::TimeoutFuture::new(0).await;
    }
}
