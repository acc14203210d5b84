//! Host Message Abstraction
//!
//! Fetch-style request and response objects as the host platform exposes
//! them: lazily computed scalar properties, a header collection, a one-time
//! readable body, and a `clone` that tees the body. [`HostPlatform`] is the
//! matching set of constructors used to materialize new objects.
//!
//! Implementations must give handle semantics to `Clone`: cloning a value of
//! a `HostMessage` type yields another reference to the *same* host object.
//! A copy with its own body stream comes from [`HostMessage::clone_message`].

use crate::{
    collection::HostHeaders,
    error::Result,
    platform::{PlatformSendSync, TextContinuation},
};

/// Behaviour shared by host requests and responses.
pub trait HostMessage: Clone + PlatformSendSync + 'static {
    type Headers: HostHeaders;

    /// Host `clone()`: an independent object whose body can be read without
    /// consuming this one. Fails if this body has already been read.
    fn clone_message(&self) -> Result<Self>;

    /// Starts an asynchronous read of the full body as text.
    ///
    /// Returns immediately; `on_complete` runs later, exactly once, unless
    /// the host never settles the read. Reading consumes the body.
    fn read_text(&self, on_complete: TextContinuation);

    fn headers(&self) -> Self::Headers;

    fn body_used(&self) -> bool;
}

pub trait HostRequest: HostMessage {
    fn url(&self) -> String;
    fn method(&self) -> String;
    fn mode(&self) -> String;
    fn cache(&self) -> String;
    fn credentials(&self) -> String;
    fn referrer(&self) -> String;
    fn referrer_policy(&self) -> String;
}

pub trait HostResponse: HostMessage {
    fn ok(&self) -> bool;
    fn status(&self) -> u16;
    fn status_text(&self) -> String;
    /// The response `type` (`basic`, `cors`, `default`, `opaque`, ...).
    fn response_type(&self) -> String;
    fn redirected(&self) -> bool;
    /// Final URL after redirects.
    fn url(&self) -> String;
}

/// Option bag for [`HostPlatform::new_request`].
#[derive(Debug)]
pub struct RequestInit<'a, B, H> {
    pub url: &'a str,
    pub method: &'a str,
    pub mode: &'a str,
    pub cache: &'a str,
    pub credentials: &'a str,
    pub referrer: &'a str,
    pub referrer_policy: &'a str,
    pub body: Option<B>,
    pub headers: H,
}

/// Option bag for [`HostPlatform::new_response`].
///
/// Browsers only honour `status`, `status_text` and `headers` when building
/// a response; the remaining fields are for hosts that can set them.
#[derive(Debug)]
pub struct ResponseInit<'a, B, H> {
    pub status: u16,
    pub status_text: &'a str,
    pub ok: bool,
    pub response_type: &'a str,
    pub redirected: bool,
    pub url: &'a str,
    pub body: Option<B>,
    pub headers: H,
}

/// Constructors for host objects.
///
/// Errors raised by the host while constructing are returned unchanged as
/// [`BridgeError::Platform`](crate::error::BridgeError::Platform); nothing
/// here validates names, values or vocabularies.
pub trait HostPlatform: PlatformSendSync {
    type Headers: HostHeaders;
    type Body;
    type Request: HostRequest<Headers = Self::Headers>;
    type Response: HostResponse<Headers = Self::Headers>;

    fn new_headers(&self) -> Result<Self::Headers>;

    /// A byte-buffer backed body container.
    fn new_body(&self, bytes: &[u8]) -> Result<Self::Body>;

    fn new_request(&self, init: RequestInit<'_, Self::Body, Self::Headers>)
        -> Result<Self::Request>;

    fn new_response(
        &self,
        init: ResponseInit<'_, Self::Body, Self::Headers>,
    ) -> Result<Self::Response>;
}
