//! In-memory host request.

use crate::body::{Delivery, MemoryBody};
use crate::headers::MemoryHeaders;
use bridge_traits::{error::Result, HostHeaders, HostMessage, HostRequest, TextContinuation};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) struct RequestMeta {
    pub url: String,
    pub method: String,
    pub mode: String,
    pub cache: String,
    pub credentials: String,
    pub referrer: String,
    pub referrer_policy: String,
}

#[derive(Debug)]
struct Shared {
    meta: RequestMeta,
    headers: MemoryHeaders,
    body: MemoryBody,
    clones: AtomicUsize,
}

/// Handle to an in-memory request. `Clone` yields another handle to the
/// same request; [`HostMessage::clone_message`] makes a new one.
#[derive(Clone)]
pub struct MemoryRequest {
    shared: Arc<Shared>,
}

impl MemoryRequest {
    pub fn builder(url: impl Into<String>) -> MemoryRequestBuilder {
        MemoryRequestBuilder::new(url.into())
    }

    pub(crate) fn from_parts(
        meta: RequestMeta,
        headers: MemoryHeaders,
        body: Option<String>,
        delivery: Delivery,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                meta,
                headers,
                body: MemoryBody::new(body, delivery),
                clones: AtomicUsize::new(0),
            }),
        }
    }

    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Text reads issued against this request.
    pub fn read_count(&self) -> usize {
        self.shared.body.read_count()
    }

    /// `clone_message` calls that succeeded on this request.
    pub fn clones_made(&self) -> usize {
        self.shared.clones.load(Ordering::SeqCst)
    }

    /// `false` for a null body.
    pub fn has_body(&self) -> bool {
        self.shared.body.has_body()
    }
}

impl HostMessage for MemoryRequest {
    type Headers = MemoryHeaders;

    fn clone_message(&self) -> Result<Self> {
        let body = self.shared.body.tee()?;
        self.shared.clones.fetch_add(1, Ordering::SeqCst);

        Ok(Self {
            shared: Arc::new(Shared {
                meta: self.shared.meta.clone(),
                headers: self.shared.headers.deep_copy(),
                body,
                clones: AtomicUsize::new(0),
            }),
        })
    }

    fn read_text(&self, on_complete: TextContinuation) {
        self.shared.body.read_text(on_complete);
    }

    fn headers(&self) -> MemoryHeaders {
        self.shared.headers.clone()
    }

    fn body_used(&self) -> bool {
        self.shared.body.is_used()
    }
}

impl HostRequest for MemoryRequest {
    fn url(&self) -> String {
        self.shared.meta.url.clone()
    }

    fn method(&self) -> String {
        self.shared.meta.method.clone()
    }

    fn mode(&self) -> String {
        self.shared.meta.mode.clone()
    }

    fn cache(&self) -> String {
        self.shared.meta.cache.clone()
    }

    fn credentials(&self) -> String {
        self.shared.meta.credentials.clone()
    }

    fn referrer(&self) -> String {
        self.shared.meta.referrer.clone()
    }

    fn referrer_policy(&self) -> String {
        self.shared.meta.referrer_policy.clone()
    }
}

impl fmt::Debug for MemoryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryRequest")
            .field("method", &self.shared.meta.method)
            .field("url", &self.shared.meta.url)
            .field("body", &self.shared.body)
            .finish()
    }
}

/// Host string coercion, as array elements are stringified.
impl fmt::Display for MemoryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[object Request]")
    }
}

/// Builder for [`MemoryRequest`]. Unset fields take the web defaults.
#[derive(Debug, Clone)]
pub struct MemoryRequestBuilder {
    meta: RequestMeta,
    headers: Vec<(String, String)>,
    body: Option<String>,
    delivery: Delivery,
}

impl MemoryRequestBuilder {
    fn new(url: String) -> Self {
        Self {
            meta: RequestMeta {
                url,
                method: "GET".to_string(),
                mode: "cors".to_string(),
                cache: "default".to_string(),
                credentials: "same-origin".to_string(),
                referrer: "about:client".to_string(),
                referrer_policy: String::new(),
            },
            headers: Vec::new(),
            body: None,
            delivery: Delivery::default(),
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.meta.method = method.into();
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.meta.mode = mode.into();
        self
    }

    pub fn cache(mut self, cache: impl Into<String>) -> Self {
        self.meta.cache = cache.into();
        self
    }

    pub fn credentials(mut self, credentials: impl Into<String>) -> Self {
        self.meta.credentials = credentials.into();
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.meta.referrer = referrer.into();
        self
    }

    pub fn referrer_policy(mut self, policy: impl Into<String>) -> Self {
        self.meta.referrer_policy = policy.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = Some(text.into());
        self
    }

    pub fn delivery_yields(mut self, yields: usize) -> Self {
        self.delivery = Delivery::Deferred { yields };
        self
    }

    pub fn stalled(mut self) -> Self {
        self.delivery = Delivery::Stalled;
        self
    }

    pub fn abandoned(mut self) -> Self {
        self.delivery = Delivery::Abandoned;
        self
    }

    /// # Panics
    ///
    /// On a header name or value the host would reject.
    pub fn build(self) -> MemoryRequest {
        let headers = MemoryHeaders::new();
        for (name, value) in &self.headers {
            if let Err(e) = headers.set(name, value) {
                panic!("invalid header for MemoryRequest: {e}");
            }
        }
        MemoryRequest::from_parts(self.meta, headers, self.body, self.delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::BridgeError;

    #[test]
    fn test_builder_defaults() {
        let request = MemoryRequest::builder("https://example.com/").build();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.mode(), "cors");
        assert_eq!(request.cache(), "default");
        assert_eq!(request.credentials(), "same-origin");
        assert!(!request.has_body());
    }

    #[test]
    fn test_clone_message_is_a_new_object() {
        let request = MemoryRequest::builder("https://example.com/")
            .method("POST")
            .header("X-Id", "1")
            .body("data")
            .build();

        let copy = request.clone_message().unwrap();

        assert!(!copy.same_object(&request));
        assert!(request.clone().same_object(&request));
        assert!(!copy.headers().same_object(&request.headers()));
        assert_eq!(copy.headers().get("x-id").as_deref(), Some("1"));
        assert_eq!(request.clones_made(), 1);
    }

    #[test]
    fn test_clone_after_read_fails() {
        let request = MemoryRequest::builder("https://example.com/")
            .method("PUT")
            .body("data")
            .build();
        request.read_text(Box::new(|_| {}));

        assert!(request.body_used());
        assert_eq!(request.clone_message().err(), Some(BridgeError::BodyUsed));
        assert_eq!(request.clones_made(), 0);
    }

    #[test]
    fn test_displays_as_host_object() {
        let request = MemoryRequest::builder("https://example.com/").build();
        assert_eq!(request.to_string(), "[object Request]");
    }
}
