//! # Core Fetch Module
//!
//! Translates fetch-style host request/response objects into plain message
//! records and back.
//!
//! ## Overview
//!
//! Host objects expose their fields through getters and their body only
//! through an asynchronous, one-time read. This crate turns them into
//! [`WebRequest`] / [`WebResponse`] records that hold everything up front,
//! and can rebuild host objects from records.
//!
//! - [`model`] - the record types
//! - [`convert`] - host collection to `HeaderMap` / `Vec` converters
//! - [`body`] - async-to-sync body bridge
//! - [`adapter`] - [`FetchAdapter`], inbound and outbound conversion
//! - [`batch`] - array conversions on [`FetchAdapter`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_fetch::FetchAdapter;
//! use core_runtime::config::AdapterConfig;
//! use std::time::Duration;
//!
//! let config = AdapterConfig::builder()
//!     .body_timeout(Duration::from_secs(10))
//!     .build()?;
//! let adapter = FetchAdapter::with_config(platform, config)?;
//!
//! let records = adapter.responses_from_host(&host_responses)?;
//! for record in &records {
//!     println!("{} {}", record.status, record.final_url);
//! }
//! ```
//!
//! ## Blocking vs async
//!
//! The plain conversions block the calling thread on the body read. They
//! work outside any runtime, on `spawn_blocking` threads and on multi-thread
//! Tokio workers, and refuse to run on a current-thread runtime. Async code,
//! and every caller on `wasm32`, uses the `_async` forms.

pub mod adapter;
pub mod batch;
pub mod body;
pub mod convert;
pub mod error;
pub mod model;

pub use adapter::FetchAdapter;
pub use body::BodyBridge;
pub use error::{FetchError, Result};
pub use model::{CacheStrategy, HeaderMap, WebRequest, WebResponse};
