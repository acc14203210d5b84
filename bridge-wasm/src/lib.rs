//! WebAssembly Bridge Implementations
//!
//! Browser fetch objects behind the traits defined in `bridge-traits`,
//! through `web-sys` and `wasm-bindgen`.
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Implementations
//!
//! - [`WasmRequest`] / [`WasmResponse`]: `Request` and `Response` handles
//! - [`WasmHeaders`]: `Headers` as an enumerable host collection
//! - [`WasmArray`]: a JS array of requests, responses or plain values
//! - [`WasmPlatform`]: `Headers`, `Blob`, `Request` and `Response` constructors
//!
//! Body text is read through the browser's `text()` promise, which settles
//! on the JS event loop. Use the `_async` conversions of `core-fetch`; the
//! blocking ones cannot wait for the event loop on this target.
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::{WasmPlatform, WasmResponse};
//! use core_fetch::FetchAdapter;
//!
//! let adapter = FetchAdapter::new(WasmPlatform::new());
//! let record = adapter
//!     .response_from_host_async(&WasmResponse::new(fetched))
//!     .await?;
//! ```

#![cfg(target_arch = "wasm32")]
#![warn(missing_docs)]

pub mod error;
pub mod headers;
pub mod message;
pub mod platform;

pub use error::{js_error, WasmError};
pub use headers::{FromJsElement, WasmArray, WasmHeaders};
pub use message::{WasmRequest, WasmResponse};
pub use platform::WasmPlatform;
