//! # Core Runtime Module
//!
//! Ambient infrastructure shared by the fetch message bridge crates:
//! - Logging and tracing setup
//! - Adapter configuration
//! - The runtime error type
//!
//! ## Overview
//!
//! Nothing here touches host objects. The adapter in `core-fetch` reads an
//! [`AdapterConfig`](config::AdapterConfig) and emits `tracing` events; the
//! host application decides where those events go through
//! [`init_logging`](logging::init_logging).

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AdapterConfig, AdapterConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
