//! Single-read in-memory bodies.
//!
//! A body is consumed by its first text read. The text is delivered to the
//! continuation on a spawned task after a number of cooperative yields when
//! a runtime is running, or inline when none is.

use bridge_traits::{error::Result, BridgeError, TextContinuation};
use core_async::{runtime, task};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// How a body read hands its text to the continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Deliver after `yields` cooperative yields.
    Deferred { yields: usize },
    /// Keep the continuation and never call it.
    Stalled,
    /// Drop the continuation without calling it.
    Abandoned,
}

impl Default for Delivery {
    fn default() -> Self {
        Delivery::Deferred { yields: 1 }
    }
}

struct BodyState {
    text: Option<String>,
    used: bool,
    reads: usize,
}

pub(crate) struct MemoryBody {
    state: Mutex<BodyState>,
    delivery: Delivery,
    parked: Mutex<Vec<TextContinuation>>,
}

impl MemoryBody {
    pub(crate) fn new(text: Option<String>, delivery: Delivery) -> Self {
        Self {
            state: Mutex::new(BodyState {
                text,
                used: false,
                reads: 0,
            }),
            delivery,
            parked: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn has_body(&self) -> bool {
        self.lock().text.is_some()
    }

    pub(crate) fn is_used(&self) -> bool {
        self.lock().used
    }

    pub(crate) fn read_count(&self) -> usize {
        self.lock().reads
    }

    /// A second body with the same unread content.
    pub(crate) fn tee(&self) -> Result<Self> {
        let state = self.lock();
        if state.used {
            return Err(BridgeError::BodyUsed);
        }
        Ok(Self::new(state.text.clone(), self.delivery))
    }

    pub(crate) fn read_text(&self, on_complete: TextContinuation) {
        let result = {
            let mut state = self.lock();
            state.reads += 1;
            if state.used {
                Err(BridgeError::BodyUsed)
            } else {
                // A null body reads as "" and stays unused.
                let text = state.text.take();
                state.used = text.is_some();
                Ok(text.unwrap_or_default())
            }
        };

        trace!(delivery = ?self.delivery, ok = result.is_ok(), "Body read issued");

        match self.delivery {
            Delivery::Deferred { yields } => schedule(yields, on_complete, result),
            Delivery::Stalled => self
                .parked
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(on_complete),
            Delivery::Abandoned => drop(on_complete),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BodyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn schedule(yields: usize, on_complete: TextContinuation, result: Result<String>) {
    if !runtime::inside_runtime() {
        on_complete(result);
        return;
    }

    task::spawn(async move {
        for _ in 0..yields {
            task::yield_now().await;
        }
        on_complete(result);
    });
}

impl fmt::Debug for MemoryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("MemoryBody")
            .field("has_body", &state.text.is_some())
            .field("used", &state.used)
            .field("reads", &state.reads)
            .field("delivery", &self.delivery)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn read_inline(body: &MemoryBody) -> Result<String> {
        let (tx, rx) = mpsc::channel();
        body.read_text(Box::new(move |text| {
            let _ = tx.send(text);
        }));
        rx.recv().unwrap()
    }

    #[test]
    fn test_read_without_runtime_is_inline() {
        let body = MemoryBody::new(Some("inline".to_string()), Delivery::default());

        assert_eq!(read_inline(&body).unwrap(), "inline");
        assert!(body.is_used());
        assert_eq!(body.read_count(), 1);
    }

    #[test]
    fn test_second_read_reports_body_used() {
        let body = MemoryBody::new(Some("once".to_string()), Delivery::default());
        read_inline(&body).unwrap();

        assert_eq!(read_inline(&body), Err(BridgeError::BodyUsed));
        assert!(matches!(body.tee(), Err(BridgeError::BodyUsed)));
    }

    #[test]
    fn test_null_body_reads_empty_and_stays_unused() {
        let body = MemoryBody::new(None, Delivery::default());

        assert_eq!(read_inline(&body).unwrap(), "");
        assert!(!body.is_used());
        assert!(!body.has_body());
    }

    #[test]
    fn test_tee_is_independent() {
        let body = MemoryBody::new(Some("shared".to_string()), Delivery::default());
        let copy = body.tee().unwrap();

        assert_eq!(read_inline(&copy).unwrap(), "shared");
        assert!(!body.is_used());
        assert_eq!(read_inline(&body).unwrap(), "shared");
    }

    #[test]
    fn test_abandoned_drops_continuation() {
        let body = MemoryBody::new(Some("x".to_string()), Delivery::Abandoned);
        let (tx, rx) = mpsc::channel::<Result<String>>();

        body.read_text(Box::new(move |text| {
            let _ = tx.send(text);
        }));

        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_stalled_keeps_continuation_alive() {
        let body = MemoryBody::new(Some("x".to_string()), Delivery::Stalled);
        let (tx, rx) = mpsc::channel::<Result<String>>();

        body.read_text(Box::new(move |text| {
            let _ = tx.send(text);
        }));

        assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_deferred_delivery_inside_runtime() {
        let body = MemoryBody::new(Some("later".to_string()), Delivery::Deferred { yields: 5 });
        let (tx, rx) = tokio::sync::oneshot::channel();

        body.read_text(Box::new(move |text| {
            let _ = tx.send(text);
        }));

        assert_eq!(rx.await.unwrap().unwrap(), "later");
    }
}
