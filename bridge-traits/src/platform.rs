//! Helper bounds that follow the threading model of each target.
//!
//! Native hosts hand body text back from background tasks, so handles and
//! continuations must be `Send`. Browser objects (`web_sys` types) are bound
//! to the single JS thread and can never satisfy that bound; on `wasm32` the
//! markers below are empty.

use crate::error::Result;

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}

/// Continuation handed to [`HostMessage::read_text`](crate::host::HostMessage::read_text).
///
/// The host calls it exactly once with the full body text, or with the
/// error the host's read raised.
#[cfg(not(target_arch = "wasm32"))]
pub type TextContinuation = Box<dyn FnOnce(Result<String>) + Send + 'static>;

#[cfg(target_arch = "wasm32")]
pub type TextContinuation = Box<dyn FnOnce(Result<String>) + 'static>;
