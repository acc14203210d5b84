//! Async-to-sync body bridge.
//!
//! Hosts deliver a message body through a continuation once their
//! asynchronous text read settles. [`BodyBridge`] issues that read, has the
//! continuation drop the text into a single-slot `oneshot` channel, and
//! performs exactly one receive on it. [`BodyBridge::receive`] awaits the
//! receive; [`BodyBridge::read`] blocks the calling thread on it.
//!
//! # Limits
//!
//! - With no timeout and no cancellation token, a host that never runs the
//!   continuation suspends the caller forever.
//! - One bridge call issues one host read. Two concurrent calls on the same
//!   message race for a single-read body; callers must not do that.
//! - [`BodyBridge::read`] blocks through `block_in_place` on a multi-thread
//!   Tokio runtime and directly on `spawn_blocking` threads. On a
//!   current-thread runtime it returns [`FetchError::BlockingInsideRuntime`].
//! - On native targets a bridge with a timeout must be awaited inside a
//!   Tokio runtime, because its timer is a Tokio timer.
//! - On `wasm32`, [`BodyBridge::read`] cannot wait for the browser event
//!   loop; real fetch objects need [`BodyBridge::receive`].

use crate::error::{FetchError, Result};
use bridge_traits::HostMessage;
use bytes::Bytes;
use core_async::sync::{oneshot, CancellationToken};
use core_async::{runtime, time};
use futures::future::{select, Either};
use std::future::Future;
use std::time::Duration;
use tracing::{trace, warn};

/// One-shot rendezvous between a host body read and its consumer.
#[derive(Debug, Clone, Default)]
pub struct BodyBridge {
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl BodyBridge {
    /// A bridge that waits indefinitely.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Reads the full body of `message`, blocking the current thread.
    ///
    /// # Errors
    ///
    /// Everything [`receive`](Self::receive) returns, plus
    /// [`FetchError::BlockingInsideRuntime`] when called on a current-thread
    /// runtime.
    pub fn read<M: HostMessage>(&self, message: &M) -> Result<Bytes> {
        block(self.receive(message))
    }

    /// Reads the full body of `message`.
    ///
    /// The host read is issued on the first poll of the returned future.
    ///
    /// On native targets a configured timeout uses a Tokio timer, so the
    /// future must then be polled inside a Tokio runtime; Tokio panics
    /// otherwise. Without a timeout any executor can drive it.
    pub async fn receive<M: HostMessage>(&self, message: &M) -> Result<Bytes> {
        let (tx, rx) = oneshot::channel();

        message.read_text(Box::new(move |text| {
            // The receiver is gone if the caller timed out or was cancelled.
            let _ = tx.send(text.map(|text| Bytes::from(text.into_bytes())));
        }));

        let delivered = match self.timeout {
            Some(limit) => match self.until_cancelled(time::timeout(limit, rx)).await? {
                Ok(delivered) => delivered,
                Err(_) => {
                    let timeout_ms = millis(limit);
                    warn!(timeout_ms, "Body read timed out");
                    return Err(FetchError::BodyTimedOut { timeout_ms });
                }
            },
            None => self.until_cancelled(rx).await?,
        };

        let body = delivered.map_err(|_| FetchError::BodyAbandoned)??;
        trace!(body_len = body.len(), "Body delivered");
        Ok(body)
    }

    async fn until_cancelled<F: Future>(&self, future: F) -> Result<F::Output> {
        let Some(token) = &self.cancellation else {
            return Ok(future.await);
        };

        let cancelled = token.cancelled();
        futures::pin_mut!(future);
        futures::pin_mut!(cancelled);

        match select(future, cancelled).await {
            Either::Left((output, _)) => Ok(output),
            Either::Right(_) => {
                warn!("Body read cancelled");
                Err(FetchError::BodyCancelled)
            }
        }
    }
}

fn millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}

/// Drives `future` to completion on the current thread.
pub(crate) fn block<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    runtime::try_block_on(future).unwrap_or_else(|| Err(FetchError::BlockingInsideRuntime))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use bridge_native::MemoryResponse;
    use bridge_traits::BridgeError;

    #[test]
    fn test_read_delivers_text_after_yields() {
        let response = MemoryResponse::builder(200)
            .body("hello")
            .delivery_yields(25)
            .build();

        let body = BodyBridge::new().read(&response).unwrap();

        assert_eq!(body, Bytes::from_static(b"hello"));
        assert_eq!(response.read_count(), 1);
    }

    #[test]
    fn test_read_consumes_the_host_body() {
        let response = MemoryResponse::builder(200).body("once").build();

        BodyBridge::new().read(&response).unwrap();
        let second = BodyBridge::new().read(&response);

        assert!(response.body_used());
        assert!(matches!(
            second,
            Err(FetchError::Bridge(BridgeError::BodyUsed))
        ));
    }

    #[test]
    fn test_timeout_when_host_never_delivers() {
        let response = MemoryResponse::builder(200).body("lost").stalled().build();
        let bridge = BodyBridge::new().with_timeout(Duration::from_millis(20));

        let result = bridge.read(&response);

        assert!(matches!(
            result,
            Err(FetchError::BodyTimedOut { timeout_ms: 20 })
        ));
    }

    #[test]
    fn test_cancellation_releases_waiter() {
        let response = MemoryResponse::builder(200).stalled().build();
        let token = CancellationToken::new();
        token.cancel();

        let result = BodyBridge::new().with_cancellation(token).read(&response);

        assert!(matches!(result, Err(FetchError::BodyCancelled)));
    }

    #[test]
    fn test_abandoned_continuation_is_reported() {
        let response = MemoryResponse::builder(200).abandoned().build();

        let result = BodyBridge::new().read(&response);

        assert!(matches!(result, Err(FetchError::BodyAbandoned)));
    }

    #[tokio::test]
    async fn test_blocking_read_inside_runtime_is_rejected() {
        let response = MemoryResponse::builder(200).body("x").build();

        let result = BodyBridge::new().read(&response);

        assert!(matches!(result, Err(FetchError::BlockingInsideRuntime)));
        assert_eq!(response.read_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_blocking_read_from_spawn_blocking() {
        let response = MemoryResponse::builder(200)
            .body("hello")
            .delivery_yields(4)
            .build();

        let body = tokio::task::spawn_blocking(move || BodyBridge::new().read(&response))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_blocking_read_on_multi_thread_worker() {
        let response = MemoryResponse::builder(200).body("worker").build();

        let body = BodyBridge::new().read(&response).unwrap();

        assert_eq!(&body[..], b"worker");
    }

    #[test]
    fn test_receive_without_timeout_on_any_executor() {
        let response = MemoryResponse::builder(200).body("plain").build();

        let body = futures::executor::block_on(BodyBridge::new().receive(&response)).unwrap();

        assert_eq!(&body[..], b"plain");
    }

    #[test]
    fn test_timeout_millis_saturate() {
        assert_eq!(millis(Duration::from_millis(20)), 20);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test]
    async fn test_receive_inside_runtime() {
        let response = MemoryResponse::builder(200)
            .body("async body")
            .delivery_yields(3)
            .build();

        let body = BodyBridge::new().receive(&response).await.unwrap();

        assert_eq!(&body[..], b"async body");
    }
}
