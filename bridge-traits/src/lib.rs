//! # Host Bridge Traits
//!
//! Capability traits a host platform implements so the core can translate
//! its fetch-style network objects into plain message records and back.
//!
//! ## Traits
//!
//! ### Collections
//! - [`HostCollection`](collection::HostCollection) - `length` + index access
//! - [`HostHeaders`](collection::HostHeaders) - header bag with `get`/`set` by name
//!
//! ### Messages
//! - [`HostMessage`](host::HostMessage) - `clone`, asynchronous `text()`, headers
//! - [`HostRequest`](host::HostRequest) / [`HostResponse`](host::HostResponse) - scalar getters
//! - [`HostPlatform`](host::HostPlatform) - constructors for headers, bodies and messages
//!
//! ## Implementations
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Native (in-memory) | `bridge-native` |
//! | Web      | `bridge-wasm`       |
//!
//! ## Error Handling
//!
//! Host failures surface as [`BridgeError`](error::BridgeError). Platform
//! implementations convert their native error values into
//! `BridgeError::Platform` carrying the host's message verbatim.
//!
//! ## Thread Safety
//!
//! On native targets messages and platforms must be `Send + Sync` (see
//! [`platform::PlatformSendSync`]); on `wasm32` there is no bound because
//! browser objects are tied to the JS thread.

pub mod collection;
pub mod error;
pub mod host;
pub mod platform;

pub use error::{BridgeError, Result};

pub use collection::{HostCollection, HostHeaders};
pub use host::{HostMessage, HostPlatform, HostRequest, HostResponse, RequestInit, ResponseInit};
pub use platform::{PlatformSendSync, TextContinuation};
