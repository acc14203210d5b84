//! # Adapter Configuration
//!
//! Settings for the fetch message adapter, assembled with a builder and
//! validated once in [`AdapterConfigBuilder::build`].
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::AdapterConfig;
//! use std::time::Duration;
//!
//! let config = AdapterConfig::builder()
//!     .body_timeout(Duration::from_secs(5))
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.body_timeout, Some(Duration::from_secs(5)));
//! ```
//!
//! Without a body timeout, a body read whose host never completes blocks
//! forever. That matches how the host primitive behaves and stays the
//! default; set a timeout (or pass a cancellation token to the adapter) to
//! bound it.

use crate::error::{Error, Result};
use crate::logging::LoggingConfig;
use std::time::Duration;

/// Upper bound accepted for `body_timeout`.
pub const MAX_BODY_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Configuration consumed by the fetch message adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Deadline for one body read. `None` waits indefinitely.
    pub body_timeout: Option<Duration>,

    /// Materialize records whose body is empty without a body container.
    /// Hosts reject GET/HEAD requests and null-body statuses (204, 304)
    /// carrying any body, even an empty one.
    pub empty_body_as_none: bool,

    /// Logging setup the host application may install.
    pub logging: LoggingConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            body_timeout: None,
            empty_body_as_none: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl AdapterConfig {
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.body_timeout {
            if timeout.is_zero() {
                return Err(Error::Config(
                    "Body timeout must be greater than 0ms. \
                     Omit the timeout to wait indefinitely."
                        .to_string(),
                ));
            }

            if timeout > MAX_BODY_TIMEOUT {
                return Err(Error::Config(format!(
                    "Body timeout exceeds maximum of {} seconds",
                    MAX_BODY_TIMEOUT.as_secs()
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`AdapterConfig`].
#[derive(Debug, Default)]
pub struct AdapterConfigBuilder {
    body_timeout: Option<Duration>,
    empty_body_as_none: Option<bool>,
    logging: Option<LoggingConfig>,
}

impl AdapterConfigBuilder {
    pub fn body_timeout(mut self, timeout: Duration) -> Self {
        self.body_timeout = Some(timeout);
        self
    }

    pub fn body_timeout_ms(self, millis: u64) -> Self {
        self.body_timeout(Duration::from_millis(millis))
    }

    pub fn empty_body_as_none(mut self, enabled: bool) -> Self {
        self.empty_body_as_none = Some(enabled);
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero or oversized body timeout.
    pub fn build(self) -> Result<AdapterConfig> {
        let defaults = AdapterConfig::default();
        let config = AdapterConfig {
            body_timeout: self.body_timeout,
            empty_body_as_none: self
                .empty_body_as_none
                .unwrap_or(defaults.empty_body_as_none),
            logging: self.logging.unwrap_or(defaults.logging),
        };

        config.validate()?;
        Ok(config)
    }
}
