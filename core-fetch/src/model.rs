//! Message records.
//!
//! Plain, synchronous snapshots of fetch requests and responses. A record
//! owns its body bytes and headers outright; the only link back to the host
//! is `underline`, a handle to the host object the record came from or was
//! last materialized into.
//!
//! Records serialize with serde. `underline` is never serialized, so a
//! deserialized record always materializes a fresh host object.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Header name to value, names exactly as the host enumerated them.
///
/// Iteration order is unspecified; host header collections make no ordering
/// promise either.
pub type HeaderMap = HashMap<String, String>;

/// Request cache mode.
///
/// Values outside the recognized vocabulary are kept verbatim in
/// [`CacheStrategy::Other`] and handed back to the host unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CacheStrategy {
    #[default]
    Default,
    NoStore,
    Reload,
    NoCache,
    ForceCache,
    OnlyIfCached,
    Other(String),
}

impl CacheStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            CacheStrategy::Default => "default",
            CacheStrategy::NoStore => "no-store",
            CacheStrategy::Reload => "reload",
            CacheStrategy::NoCache => "no-cache",
            CacheStrategy::ForceCache => "force-cache",
            CacheStrategy::OnlyIfCached => "only-if-cached",
            CacheStrategy::Other(raw) => raw,
        }
    }

    /// `false` for values carried through as [`CacheStrategy::Other`].
    pub fn is_recognized(&self) -> bool {
        !matches!(self, CacheStrategy::Other(_))
    }
}

impl From<&str> for CacheStrategy {
    fn from(value: &str) -> Self {
        match value {
            "default" => CacheStrategy::Default,
            "no-store" => CacheStrategy::NoStore,
            "reload" => CacheStrategy::Reload,
            "no-cache" => CacheStrategy::NoCache,
            "force-cache" => CacheStrategy::ForceCache,
            "only-if-cached" => CacheStrategy::OnlyIfCached,
            other => CacheStrategy::Other(other.to_string()),
        }
    }
}

impl From<String> for CacheStrategy {
    fn from(value: String) -> Self {
        match CacheStrategy::from(value.as_str()) {
            CacheStrategy::Other(_) => CacheStrategy::Other(value),
            known => known,
        }
    }
}

impl From<CacheStrategy> for String {
    fn from(value: CacheStrategy) -> Self {
        match value {
            CacheStrategy::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully materialized request.
///
/// `H` is the host's request handle type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct WebRequest<H> {
    /// Full body. Hosts read bodies back as text, so bytes that are not
    /// valid UTF-8 return with U+FFFD replacements after a round trip.
    pub body: Bytes,
    pub url: String,
    pub method: String,
    pub mode: String,
    pub cache: CacheStrategy,
    pub credentials: String,
    pub referrer_policy: String,
    pub referrer: String,
    pub headers: HeaderMap,
    pub body_used: bool,
    /// Host object this record was read from or last materialized into.
    #[serde(skip)]
    pub underline: Option<H>,
}

impl<H> WebRequest<H> {
    /// A `GET` request for `url` with the host defaults for the other fields.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            body: Bytes::new(),
            url: url.into(),
            method: "GET".to_string(),
            mode: "cors".to_string(),
            cache: CacheStrategy::Default,
            credentials: "same-origin".to_string(),
            referrer_policy: String::new(),
            referrer: "about:client".to_string(),
            headers: HeaderMap::new(),
            body_used: false,
            underline: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_cache(mut self, cache: impl Into<CacheStrategy>) -> Self {
        self.cache = cache.into();
        self
    }

    pub fn with_credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = credentials.into();
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    pub fn with_referrer_policy(mut self, policy: impl Into<String>) -> Self {
        self.referrer_policy = policy.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Body decoded as UTF-8.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Whether a host object is cached in `underline`.
    pub fn is_materialized(&self) -> bool {
        self.underline.is_some()
    }

    /// Compares every field except `underline`.
    pub fn content_eq<G>(&self, other: &WebRequest<G>) -> bool {
        self.body == other.body
            && self.url == other.url
            && self.method == other.method
            && self.mode == other.mode
            && self.cache == other.cache
            && self.credentials == other.credentials
            && self.referrer_policy == other.referrer_policy
            && self.referrer == other.referrer
            && self.headers == other.headers
            && self.body_used == other.body_used
    }
}

/// A fully materialized response.
///
/// `H` is the host's response handle type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct WebResponse<H> {
    /// Full body. Hosts read bodies back as text, so bytes that are not
    /// valid UTF-8 return with U+FFFD replacements after a round trip.
    pub body: Bytes,
    pub ok: bool,
    pub status: u16,
    pub status_text: String,
    /// Host response type (`basic`, `cors`, `default`, `error`, `opaque`, ...).
    #[serde(rename = "type")]
    pub response_type: String,
    pub redirected: bool,
    /// URL the response was finally served from, after redirects.
    pub final_url: String,
    pub headers: HeaderMap,
    /// Host object this record was read from or last materialized into.
    #[serde(skip)]
    pub underline: Option<H>,
}

impl<H> WebResponse<H> {
    /// A response with `status`; `ok` follows the 2xx rule.
    pub fn new(status: u16) -> Self {
        Self {
            body: Bytes::new(),
            ok: (200..300).contains(&status),
            status,
            status_text: String::new(),
            response_type: "default".to_string(),
            redirected: false,
            final_url: String::new(),
            headers: HeaderMap::new(),
            underline: None,
        }
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    pub fn with_type(mut self, response_type: impl Into<String>) -> Self {
        self.response_type = response_type.into();
        self
    }

    pub fn with_final_url(mut self, url: impl Into<String>) -> Self {
        self.final_url = url.into();
        self
    }

    pub fn with_redirected(mut self, redirected: bool) -> Self {
        self.redirected = redirected;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    pub fn is_materialized(&self) -> bool {
        self.underline.is_some()
    }

    /// Compares every field except `underline`.
    pub fn content_eq<G>(&self, other: &WebResponse<G>) -> bool {
        self.body == other.body
            && self.ok == other.ok
            && self.status == other.status
            && self.status_text == other.status_text
            && self.response_type == other.response_type
            && self.redirected == other.redirected
            && self.final_url == other.final_url
            && self.headers == other.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Stand-in handle type; records never serialize it.
    #[derive(Debug, Clone)]
    struct Handle;

    #[test]
    fn test_cache_strategy_recognized_values() {
        for raw in [
            "default",
            "no-store",
            "reload",
            "no-cache",
            "force-cache",
            "only-if-cached",
        ] {
            let strategy = CacheStrategy::from(raw);
            assert!(strategy.is_recognized(), "{raw} should be recognized");
            assert_eq!(strategy.as_str(), raw);
        }
    }

    #[test]
    fn test_cache_strategy_passes_unknown_values_through() {
        let strategy = CacheStrategy::from("Stale-While-Offline".to_string());

        assert_eq!(
            strategy,
            CacheStrategy::Other("Stale-While-Offline".to_string())
        );
        assert!(!strategy.is_recognized());
        assert_eq!(String::from(strategy), "Stale-While-Offline");
    }

    #[test]
    fn test_cache_strategy_serializes_as_plain_string() {
        let json = serde_json::to_string(&CacheStrategy::OnlyIfCached).unwrap();
        assert_eq!(json, "\"only-if-cached\"");

        let parsed: CacheStrategy = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(parsed, CacheStrategy::Other("custom".to_string()));
    }

    #[test]
    fn test_request_defaults() {
        let request = WebRequest::<Handle>::new("https://example.com/a");

        assert_eq!(request.method, "GET");
        assert_eq!(request.mode, "cors");
        assert_eq!(request.cache, CacheStrategy::Default);
        assert!(request.body.is_empty());
        assert!(!request.is_materialized());
    }

    #[test]
    fn test_response_ok_follows_status() {
        assert!(WebResponse::<Handle>::new(204).ok);
        assert!(!WebResponse::<Handle>::new(301).ok);
        assert!(!WebResponse::<Handle>::new(500).ok);
    }

    #[test]
    fn test_request_serde_skips_underline() {
        let mut request = WebRequest::<Handle>::new("https://example.com/upload")
            .with_method("POST")
            .with_header("Content-Type", "text/plain")
            .with_body("payload");
        request.underline = Some(Handle);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("underline").is_none());
        assert_eq!(json["cache"], "default");

        let restored: WebRequest<Handle> = serde_json::from_value(json).unwrap();
        assert!(restored.underline.is_none());
        assert!(restored.content_eq(&request));
        assert_eq!(restored.text().unwrap(), "payload");
    }

    #[test]
    fn test_response_serde_uses_type_key() {
        let response = WebResponse::<Handle>::new(404)
            .with_status_text("Not Found")
            .with_type("cors");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "cors");
        assert_eq!(json["status"], 404);
    }

    #[test]
    fn test_content_eq_ignores_underline() {
        let plain = WebResponse::<Handle>::new(200).with_body("x");
        let mut cached = plain.clone();
        cached.underline = Some(Handle);

        assert!(plain.content_eq(&cached));
        assert!(!plain.content_eq(&WebResponse::<Handle>::new(200)));
    }
}
