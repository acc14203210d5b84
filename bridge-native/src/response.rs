//! In-memory host response.

use crate::body::{Delivery, MemoryBody};
use crate::headers::MemoryHeaders;
use bridge_traits::{error::Result, HostHeaders, HostMessage, HostResponse, TextContinuation};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) struct ResponseMeta {
    pub ok: bool,
    pub status: u16,
    pub status_text: String,
    pub response_type: String,
    pub redirected: bool,
    pub url: String,
}

#[derive(Debug)]
struct Shared {
    meta: ResponseMeta,
    headers: MemoryHeaders,
    body: MemoryBody,
    clones: AtomicUsize,
}

/// Handle to an in-memory response; see [`MemoryRequest`](crate::MemoryRequest)
/// for the handle semantics.
#[derive(Clone)]
pub struct MemoryResponse {
    shared: Arc<Shared>,
}

impl MemoryResponse {
    pub fn builder(status: u16) -> MemoryResponseBuilder {
        MemoryResponseBuilder::new(status)
    }

    pub(crate) fn from_parts(
        meta: ResponseMeta,
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

    pub fn read_count(&self) -> usize {
        self.shared.body.read_count()
    }

    pub fn clones_made(&self) -> usize {
        self.shared.clones.load(Ordering::SeqCst)
    }

    pub fn has_body(&self) -> bool {
        self.shared.body.has_body()
    }
}

impl HostMessage for MemoryResponse {
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

impl HostResponse for MemoryResponse {
    fn ok(&self) -> bool {
        self.shared.meta.ok
    }

    fn status(&self) -> u16 {
        self.shared.meta.status
    }

    fn status_text(&self) -> String {
        self.shared.meta.status_text.clone()
    }

    fn response_type(&self) -> String {
        self.shared.meta.response_type.clone()
    }

    fn redirected(&self) -> bool {
        self.shared.meta.redirected
    }

    fn url(&self) -> String {
        self.shared.meta.url.clone()
    }
}

impl fmt::Debug for MemoryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryResponse")
            .field("status", &self.shared.meta.status)
            .field("url", &self.shared.meta.url)
            .field("body", &self.shared.body)
            .finish()
    }
}

impl fmt::Display for MemoryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[object Response]")
    }
}

/// Builder for [`MemoryResponse`]. `ok` follows the status unless set.
#[derive(Debug, Clone)]
pub struct MemoryResponseBuilder {
    meta: ResponseMeta,
    headers: Vec<(String, String)>,
    body: Option<String>,
    delivery: Delivery,
}

impl MemoryResponseBuilder {
    fn new(status: u16) -> Self {
        Self {
            meta: ResponseMeta {
                ok: (200..300).contains(&status),
                status,
                status_text: String::new(),
                response_type: "default".to_string(),
                redirected: false,
                url: String::new(),
            },
            headers: Vec::new(),
            body: None,
            delivery: Delivery::default(),
        }
    }

    pub fn ok(mut self, ok: bool) -> Self {
        self.meta.ok = ok;
        self
    }

    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.meta.status_text = text.into();
        self
    }

    pub fn response_type(mut self, response_type: impl Into<String>) -> Self {
        self.meta.response_type = response_type.into();
        self
    }

    pub fn redirected(mut self, redirected: bool) -> Self {
        self.meta.redirected = redirected;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.meta.url = url.into();
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
    pub fn build(self) -> MemoryResponse {
        let headers = MemoryHeaders::new();
        for (name, value) in &self.headers {
            if let Err(e) = headers.set(name, value) {
                panic!("invalid header for MemoryResponse: {e}");
            }
        }
        MemoryResponse::from_parts(self.meta, headers, self.body, self.delivery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_follows_status() {
        assert!(MemoryResponse::builder(200).build().ok());
        assert!(MemoryResponse::builder(299).build().ok());
        assert!(!MemoryResponse::builder(304).build().ok());
        assert!(!MemoryResponse::builder(200).ok(false).build().ok());
    }

    #[test]
    fn test_clone_message_copies_scalars_and_headers() {
        let response = MemoryResponse::builder(301)
            .status_text("Moved Permanently")
            .response_type("cors")
            .redirected(true)
            .url("https://example.com/new")
            .header("Location", "/new")
            .build();

        let copy = response.clone_message().unwrap();

        assert_eq!(copy.status(), 301);
        assert_eq!(copy.status_text(), "Moved Permanently");
        assert_eq!(copy.response_type(), "cors");
        assert!(copy.redirected());
        assert_eq!(copy.url(), "https://example.com/new");
        assert_eq!(copy.headers().get("location").as_deref(), Some("/new"));
    }

    #[tokio::test]
    async fn test_read_inside_runtime_is_deferred() {
        let response = MemoryResponse::builder(200)
            .body("deferred")
            .delivery_yields(2)
            .build();
        let (tx, rx) = tokio::sync::oneshot::channel();

        response.read_text(Box::new(move |text| {
            let _ = tx.send(text);
        }));

        assert!(response.body_used());
        assert_eq!(rx.await.unwrap().unwrap(), "deferred");
        assert_eq!(response.read_count(), 1);
    }
}
