//! # Native Bridge Implementation
//!
//! In-memory fetch host objects for native targets: requests, responses,
//! header collections and a [`MemoryPlatform`] that constructs them.
//!
//! ## Overview
//!
//! The objects behave like their web counterparts where the adapter can
//! observe it:
//! - `Clone` is a handle copy; `clone_message` creates a new object
//! - bodies are consumed by the first text read
//! - text arrives through a continuation, after a configurable number of
//!   cooperative yields when a Tokio runtime is running
//! - construction rejects what browsers reject (a body on GET/HEAD, a body
//!   on a null-body status, a status outside 200..=599, invalid headers)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_native::{MemoryPlatform, MemoryResponse};
//! use core_fetch::FetchAdapter;
//!
//! let response = MemoryResponse::builder(200)
//!     .header("Content-Type", "text/plain")
//!     .body("hello")
//!     .build();
//!
//! let adapter = FetchAdapter::new(MemoryPlatform::new());
//! let record = adapter.response_from_host(&response)?;
//! assert_eq!(record.text()?, "hello");
//! ```

#![cfg(not(target_arch = "wasm32"))]

mod body;
mod headers;
mod platform;
mod request;
mod response;

pub use body::Delivery;
pub use headers::MemoryHeaders;
pub use platform::{MemoryBlob, MemoryPlatform};
pub use request::{MemoryRequest, MemoryRequestBuilder};
pub use response::{MemoryResponse, MemoryResponseBuilder};
