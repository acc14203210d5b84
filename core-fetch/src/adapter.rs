//! # Platform Object Adapter
//!
//! Converts host request/response objects into [`WebRequest`] /
//! [`WebResponse`] records and materializes records back into host objects.
//!
//! ## Inbound
//!
//! The source is cloned before anything is read. One clone is cached in the
//! record's `underline`; a second, throwaway clone feeds the body read. The
//! caller's object and the cached clone both keep their bodies.
//!
//! Bodies are read through the host's text read. A body that is not valid
//! UTF-8 comes back with each invalid sequence replaced by U+FFFD, so round
//! trips preserve bodies byte for byte only when they are UTF-8.
//!
//! ## Outbound
//!
//! A record that already has an `underline` hands that object back. Any
//! other record is built into a new host object, which is then cached, so
//! converting the same record twice returns the same host object.
//!
//! ## Blocking forms
//!
//! The blocking conversions may be called outside any runtime, from a
//! `spawn_blocking` thread, or on a multi-thread Tokio worker. On a
//! current-thread runtime they return
//! [`FetchError::BlockingInsideRuntime`](crate::FetchError::BlockingInsideRuntime)
//! without touching the host object.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_fetch::FetchAdapter;
//!
//! let adapter = FetchAdapter::new(platform);
//! let mut record = adapter.request_from_host(&host_request)?;
//! record.url = "https://example.com/rewritten".to_string();
//! record.underline = None;
//! let rebuilt = adapter.request_to_host(&mut record)?;
//! ```

use crate::body::{block, BodyBridge};
use crate::convert;
use crate::error::Result;
use crate::model::{HeaderMap, WebRequest, WebResponse};
use bridge_traits::{
    HostHeaders, HostMessage, HostPlatform, HostRequest, HostResponse, RequestInit, ResponseInit,
};
use bytes::Bytes;
use core_async::sync::CancellationToken;
use core_runtime::config::AdapterConfig;
use core_runtime::logging::redact_header;
use tracing::{debug, instrument, trace, Level};

pub struct FetchAdapter<P: HostPlatform> {
    platform: P,
    config: AdapterConfig,
    bridge: BodyBridge,
}

impl<P: HostPlatform> FetchAdapter<P> {
    /// Adapter with the default configuration: no body timeout, empty
    /// bodies materialized as "no body".
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            config: AdapterConfig::default(),
            bridge: BodyBridge::new(),
        }
    }

    /// # Errors
    ///
    /// [`FetchError::Config`](crate::FetchError::Config) when `config` does
    /// not validate.
    pub fn with_config(platform: P, config: AdapterConfig) -> Result<Self> {
        config.validate()?;

        let mut bridge = BodyBridge::new();
        if let Some(timeout) = config.body_timeout {
            bridge = bridge.with_timeout(timeout);
        }

        Ok(Self {
            platform,
            config,
            bridge,
        })
    }

    /// Every body read fails with `BodyCancelled` once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.bridge = self.bridge.with_cancellation(token);
        self
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn body_bridge(&self) -> &BodyBridge {
        &self.bridge
    }

    // ========================================================================
    // Inbound
    // ========================================================================

    /// Blocking form of [`request_from_host_async`](Self::request_from_host_async).
    pub fn request_from_host(&self, host: &P::Request) -> Result<WebRequest<P::Request>> {
        block(self.request_from_host_async(host))
    }

    /// Blocking form of [`response_from_host_async`](Self::response_from_host_async).
    pub fn response_from_host(&self, host: &P::Response) -> Result<WebResponse<P::Response>> {
        block(self.response_from_host_async(host))
    }

    /// Reads a host request into a record.
    ///
    /// `body_used` reflects the source as it was before this call.
    ///
    /// # Errors
    ///
    /// Fails with [`BridgeError::BodyUsed`](bridge_traits::BridgeError::BodyUsed)
    /// when the source body was already consumed, plus any body read error
    /// from [`BodyBridge::receive`].
    #[instrument(level = "debug", skip_all)]
    pub async fn request_from_host_async(
        &self,
        host: &P::Request,
    ) -> Result<WebRequest<P::Request>> {
        let body_used = host.body_used();
        let underline = host.clone_message()?;
        let reader = host.clone_message()?;

        let mut record = WebRequest {
            body: Bytes::new(),
            url: host.url(),
            method: host.method(),
            mode: host.mode(),
            cache: host.cache().into(),
            credentials: host.credentials(),
            referrer_policy: host.referrer_policy(),
            referrer: host.referrer(),
            headers: convert::header_map(&host.headers()),
            body_used,
            underline: None,
        };

        self.trace_headers(&record.headers);
        record.body = self.bridge.receive(&reader).await?;
        record.underline = Some(underline);

        debug!(
            url = %record.url,
            method = %record.method,
            headers = record.headers.len(),
            body_len = record.body.len(),
            "Request read from host"
        );
        Ok(record)
    }

    /// Reads a host response into a record. The host's `url` becomes
    /// `final_url`.
    #[instrument(level = "debug", skip_all)]
    pub async fn response_from_host_async(
        &self,
        host: &P::Response,
    ) -> Result<WebResponse<P::Response>> {
        let underline = host.clone_message()?;
        let reader = host.clone_message()?;

        let mut record = WebResponse {
            body: Bytes::new(),
            ok: host.ok(),
            status: host.status(),
            status_text: host.status_text(),
            response_type: host.response_type(),
            redirected: host.redirected(),
            final_url: host.url(),
            headers: convert::header_map(&host.headers()),
            underline: None,
        };

        self.trace_headers(&record.headers);
        record.body = self.bridge.receive(&reader).await?;
        record.underline = Some(underline);

        debug!(
            status = record.status,
            url = %record.final_url,
            headers = record.headers.len(),
            body_len = record.body.len(),
            "Response read from host"
        );
        Ok(record)
    }

    // ========================================================================
    // Outbound
    // ========================================================================

    /// Builds a host header collection holding every entry of `headers`.
    ///
    /// Entries are set in map iteration order. The host's own validation
    /// of names and values applies; its first rejection is returned.
    pub fn headers_to_host(&self, headers: &HeaderMap) -> Result<P::Headers> {
        let collection = self.platform.new_headers()?;
        for (name, value) in headers {
            collection.set(name, value)?;
        }
        Ok(collection)
    }

    /// Returns the host object for `record`, building and caching it on
    /// first use.
    #[instrument(level = "debug", skip_all, fields(url = %record.url))]
    pub fn request_to_host(&self, record: &mut WebRequest<P::Request>) -> Result<P::Request> {
        if let Some(existing) = &record.underline {
            return Ok(existing.clone());
        }

        let body = self.body_to_host(&record.body)?;
        let headers = self.headers_to_host(&record.headers)?;
        let cache = record.cache.as_str();

        let request = self.platform.new_request(RequestInit {
            url: &record.url,
            method: &record.method,
            mode: &record.mode,
            cache,
            credentials: &record.credentials,
            referrer: &record.referrer,
            referrer_policy: &record.referrer_policy,
            body,
            headers,
        })?;

        debug!(
            method = %record.method,
            body_len = record.body.len(),
            "Request materialized"
        );
        record.underline = Some(request.clone());
        Ok(request)
    }

    /// Response counterpart of [`request_to_host`](Self::request_to_host).
    ///
    /// Web hosts only take `status`, `status_text` and the headers from a
    /// record; `ok`, `type`, `redirected` and `final_url` are then derived
    /// by the host.
    #[instrument(level = "debug", skip_all, fields(status = record.status))]
    pub fn response_to_host(&self, record: &mut WebResponse<P::Response>) -> Result<P::Response> {
        if let Some(existing) = &record.underline {
            return Ok(existing.clone());
        }

        let body = self.body_to_host(&record.body)?;
        let headers = self.headers_to_host(&record.headers)?;

        let response = self.platform.new_response(ResponseInit {
            status: record.status,
            status_text: &record.status_text,
            ok: record.ok,
            response_type: &record.response_type,
            redirected: record.redirected,
            url: &record.final_url,
            body,
            headers,
        })?;

        debug!(body_len = record.body.len(), "Response materialized");
        record.underline = Some(response.clone());
        Ok(response)
    }

    fn trace_headers(&self, headers: &HeaderMap) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        for (name, value) in headers {
            let value = if self.config.logging.redact_headers {
                redact_header(name, value)
            } else {
                value
            };
            trace!(header = %name, value, "Header read");
        }
    }

    fn body_to_host(&self, body: &Bytes) -> Result<Option<P::Body>> {
        if body.is_empty() && self.config.empty_body_as_none {
            return Ok(None);
        }
        Ok(Some(self.platform.new_body(body)?))
    }
}

impl<P: HostPlatform + Clone> Clone for FetchAdapter<P> {
    fn clone(&self) -> Self {
        Self {
            platform: self.platform.clone(),
            config: self.config.clone(),
            bridge: self.bridge.clone(),
        }
    }
}

impl<P: HostPlatform + std::fmt::Debug> std::fmt::Debug for FetchAdapter<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchAdapter")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .field("bridge", &self.bridge)
            .finish()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use bridge_native::{MemoryPlatform, MemoryRequest, MemoryResponse};
    use bridge_traits::BridgeError;
    use std::time::Duration;

    fn adapter() -> FetchAdapter<MemoryPlatform> {
        FetchAdapter::new(MemoryPlatform::new())
    }

    #[test]
    fn test_request_from_host_reads_every_field() {
        let host = MemoryRequest::builder("https://example.com/upload")
            .method("POST")
            .mode("same-origin")
            .cache("no-store")
            .credentials("include")
            .referrer("https://example.com/")
            .referrer_policy("no-referrer")
            .header("Content-Type", "text/plain")
            .body("payload")
            .build();

        let record = adapter().request_from_host(&host).unwrap();

        assert_eq!(record.url, "https://example.com/upload");
        assert_eq!(record.method, "POST");
        assert_eq!(record.mode, "same-origin");
        assert_eq!(record.cache, crate::CacheStrategy::NoStore);
        assert_eq!(record.credentials, "include");
        assert_eq!(record.referrer, "https://example.com/");
        assert_eq!(record.referrer_policy, "no-referrer");
        assert_eq!(record.headers["Content-Type"], "text/plain");
        assert_eq!(record.text().unwrap(), "payload");
        assert!(!record.body_used);
    }

    #[test]
    fn test_inbound_keeps_source_and_underline_readable() {
        let host = MemoryResponse::builder(200).body("still here").build();

        let record = adapter().response_from_host(&host).unwrap();

        assert!(!host.body_used());
        assert_eq!(host.read_count(), 0);
        let cached = record.underline.as_ref().unwrap();
        assert!(!cached.same_object(&host));
        assert!(!cached.body_used());
    }

    #[test]
    fn test_inbound_of_consumed_source_fails() {
        let host = MemoryResponse::builder(200).body("gone").build();
        BodyBridge::new().read(&host).unwrap();

        let result = adapter().response_from_host(&host);

        assert!(matches!(
            result,
            Err(FetchError::Bridge(BridgeError::BodyUsed))
        ));
    }

    #[test]
    fn test_response_to_host_is_idempotent() {
        let adapter = adapter();
        let mut record = WebResponse::new(201).with_body("created");

        let first = adapter.response_to_host(&mut record).unwrap();
        let second = adapter.response_to_host(&mut record).unwrap();

        assert!(first.same_object(&second));
        assert_eq!(adapter.platform().responses_built(), 1);
    }

    #[test]
    fn test_request_to_host_reuses_inbound_underline() {
        let adapter = adapter();
        let host = MemoryRequest::builder("https://example.com/").build();
        let mut record = adapter.request_from_host(&host).unwrap();
        let cached = record.underline.clone().unwrap();

        let out = adapter.request_to_host(&mut record).unwrap();

        assert!(out.same_object(&cached));
        assert_eq!(adapter.platform().requests_built(), 0);
    }

    #[test]
    fn test_empty_get_body_materializes_without_body() {
        let adapter = adapter();
        let mut record = WebRequest::new("https://example.com/");

        let host = adapter.request_to_host(&mut record).unwrap();

        assert!(!host.has_body());
    }

    #[test]
    fn test_empty_body_kept_when_configured() {
        let config = AdapterConfig::builder()
            .empty_body_as_none(false)
            .build()
            .unwrap();
        let adapter = FetchAdapter::with_config(MemoryPlatform::new(), config).unwrap();
        let mut record = WebRequest::new("https://example.com/").with_method("PUT");

        let host = adapter.request_to_host(&mut record).unwrap();

        assert!(host.has_body());
    }

    #[test]
    fn test_host_rejection_propagates_and_leaves_record_unmaterialized() {
        let adapter = adapter();
        let mut record = WebRequest::new("https://example.com/").with_body("not allowed");

        let result = adapter.request_to_host(&mut record);

        assert!(matches!(
            result,
            Err(FetchError::Bridge(BridgeError::Platform(_)))
        ));
        assert!(!record.is_materialized());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AdapterConfig {
            body_timeout: Some(Duration::ZERO),
            ..AdapterConfig::default()
        };

        let result = FetchAdapter::with_config(MemoryPlatform::new(), config);

        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn test_configured_timeout_reaches_body_reads() {
        let config = AdapterConfig::builder()
            .body_timeout(Duration::from_millis(15))
            .build()
            .unwrap();
        let adapter = FetchAdapter::with_config(MemoryPlatform::new(), config).unwrap();
        let host = MemoryResponse::builder(200).body("never").stalled().build();

        let result = adapter.response_from_host(&host);

        assert!(matches!(
            result,
            Err(FetchError::BodyTimedOut { timeout_ms: 15 })
        ));
    }

    #[test]
    fn test_headers_to_host_sets_every_entry() {
        let adapter = adapter();
        let mut headers = HeaderMap::new();
        headers.insert("Accept".to_string(), "text/html".to_string());
        headers.insert("X-Id".to_string(), "7".to_string());

        let host = adapter.headers_to_host(&headers).unwrap();

        assert_eq!(host.get("accept").as_deref(), Some("text/html"));
        assert_eq!(host.get("X-Id").as_deref(), Some("7"));
        assert_eq!(convert::header_map(&host), headers);
    }

    #[tokio::test]
    async fn test_async_inbound_inside_runtime() {
        let host = MemoryResponse::builder(404)
            .status_text("Not Found")
            .body("missing")
            .delivery_yields(4)
            .build();

        let record = adapter().response_from_host_async(&host).await.unwrap();

        assert_eq!(record.status, 404);
        assert!(!record.ok);
        assert_eq!(record.status_text, "Not Found");
        assert_eq!(record.text().unwrap(), "missing");
    }
}
