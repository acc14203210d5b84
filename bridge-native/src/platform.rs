//! Constructors for in-memory host objects.
//!
//! Construction applies the checks a browser makes when building fetch
//! objects, so adapter code sees the same rejections it would on the web.

use crate::body::Delivery;
use crate::headers::MemoryHeaders;
use crate::request::{MemoryRequest, RequestMeta};
use crate::response::{MemoryResponse, ResponseMeta};
use bridge_traits::{
    error::{BridgeError, Result},
    HostPlatform, RequestInit, ResponseInit,
};
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Byte-buffer body container, the in-memory `Blob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlob(Bytes);

impl MemoryBlob {
    pub fn bytes(&self) -> &Bytes {
        &self.0
    }

    fn into_text(self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicUsize,
    responses: AtomicUsize,
}

/// In-memory [`HostPlatform`].
///
/// Objects it builds deliver their body text with the platform's
/// [`Delivery`] mode.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlatform {
    delivery: Delivery,
    counters: Arc<Counters>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    /// Requests successfully built by this platform and its clones.
    pub fn requests_built(&self) -> usize {
        self.counters.requests.load(Ordering::SeqCst)
    }

    pub fn responses_built(&self) -> usize {
        self.counters.responses.load(Ordering::SeqCst)
    }
}

impl HostPlatform for MemoryPlatform {
    type Headers = MemoryHeaders;
    type Body = MemoryBlob;
    type Request = MemoryRequest;
    type Response = MemoryResponse;

    fn new_headers(&self) -> Result<MemoryHeaders> {
        Ok(MemoryHeaders::new())
    }

    fn new_body(&self, bytes: &[u8]) -> Result<MemoryBlob> {
        Ok(MemoryBlob(Bytes::copy_from_slice(bytes)))
    }

    fn new_request(&self, init: RequestInit<'_, MemoryBlob, MemoryHeaders>) -> Result<MemoryRequest> {
        if init.body.is_some()
            && (init.method.eq_ignore_ascii_case("GET") || init.method.eq_ignore_ascii_case("HEAD"))
        {
            return Err(BridgeError::Platform(
                "Failed to construct 'Request': Request with GET/HEAD method cannot have body."
                    .to_string(),
            ));
        }

        let meta = RequestMeta {
            url: init.url.to_string(),
            method: init.method.to_string(),
            mode: init.mode.to_string(),
            cache: init.cache.to_string(),
            credentials: init.credentials.to_string(),
            referrer: init.referrer.to_string(),
            referrer_policy: init.referrer_policy.to_string(),
        };
        let request = MemoryRequest::from_parts(
            meta,
            init.headers,
            init.body.map(MemoryBlob::into_text),
            self.delivery,
        );

        self.counters.requests.fetch_add(1, Ordering::SeqCst);
        debug!(url = init.url, method = init.method, "Built memory request");
        Ok(request)
    }

    fn new_response(
        &self,
        init: ResponseInit<'_, MemoryBlob, MemoryHeaders>,
    ) -> Result<MemoryResponse> {
        if !(200..=599).contains(&init.status) {
            return Err(BridgeError::Platform(format!(
                "Failed to construct 'Response': The status provided ({}) is outside the range [200, 599].",
                init.status
            )));
        }
        if init.body.is_some() && matches!(init.status, 204 | 205 | 304) {
            return Err(BridgeError::Platform(
                "Failed to construct 'Response': Response with null body status cannot have body"
                    .to_string(),
            ));
        }

        let meta = ResponseMeta {
            ok: init.ok,
            status: init.status,
            status_text: init.status_text.to_string(),
            response_type: init.response_type.to_string(),
            redirected: init.redirected,
            url: init.url.to_string(),
        };
        let response = MemoryResponse::from_parts(
            meta,
            init.headers,
            init.body.map(MemoryBlob::into_text),
            self.delivery,
        );

        self.counters.responses.fetch_add(1, Ordering::SeqCst);
        debug!(status = init.status, "Built memory response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::{HostMessage, HostRequest, HostResponse};

    fn request_init<'a>(
        method: &'a str,
        body: Option<MemoryBlob>,
    ) -> RequestInit<'a, MemoryBlob, MemoryHeaders> {
        RequestInit {
            url: "https://example.com/",
            method,
            mode: "cors",
            cache: "default",
            credentials: "same-origin",
            referrer: "about:client",
            referrer_policy: "",
            body,
            headers: MemoryHeaders::new(),
        }
    }

    fn response_init(status: u16, body: Option<MemoryBlob>) -> ResponseInit<'static, MemoryBlob, MemoryHeaders> {
        ResponseInit {
            status,
            status_text: "",
            ok: (200..300).contains(&status),
            response_type: "default",
            redirected: false,
            url: "",
            body,
            headers: MemoryHeaders::new(),
        }
    }

    #[test]
    fn test_get_with_body_is_rejected() {
        let platform = MemoryPlatform::new();
        let body = platform.new_body(b"x").unwrap();

        let result = platform.new_request(request_init("get", Some(body)));

        assert!(matches!(result, Err(BridgeError::Platform(_))));
        assert_eq!(platform.requests_built(), 0);
    }

    #[test]
    fn test_post_keeps_body_and_fields() {
        let platform = MemoryPlatform::new();
        let body = platform.new_body(b"form=1").unwrap();

        let request = platform.new_request(request_init("POST", Some(body))).unwrap();

        assert_eq!(request.method(), "POST");
        assert!(request.has_body());
        assert!(!request.body_used());
        assert_eq!(platform.requests_built(), 1);
    }

    #[test]
    fn test_status_outside_range_is_rejected() {
        let platform = MemoryPlatform::new();

        assert!(platform.new_response(response_init(199, None)).is_err());
        assert!(platform.new_response(response_init(600, None)).is_err());
        assert!(platform.new_response(response_init(599, None)).is_ok());
    }

    #[test]
    fn test_null_body_status_rejects_body() {
        let platform = MemoryPlatform::new();
        let body = platform.new_body(b"").unwrap();

        assert!(platform.new_response(response_init(204, Some(body))).is_err());
        let response = platform.new_response(response_init(204, None)).unwrap();
        assert_eq!(response.status(), 204);
        assert!(!response.has_body());
    }

    #[test]
    fn test_clones_share_counters() {
        let platform = MemoryPlatform::new();
        let other = platform.clone();

        other.new_response(response_init(200, None)).unwrap();

        assert_eq!(platform.responses_built(), 1);
    }
}
