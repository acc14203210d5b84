//! Browser `Request` / `Response` handles.
//!
//! `Clone` on the wrappers copies the JS reference; the host `clone()` that
//! tees the body is [`HostMessage::clone_message`]. Properties without a
//! typed enum in `web-sys` (`mode`, `cache`, `credentials`,
//! `referrerPolicy`, `type`) are read as plain strings so values newer than
//! the bindings pass through untouched.

use crate::error::js_error;
use crate::headers::WasmHeaders;
use bridge_traits::{
    error::{BridgeError, Result},
    HostMessage, HostRequest, HostResponse, TextContinuation,
};
use core_async::task;
use js_sys::{Promise, Reflect};
use std::fmt;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

fn string_property(target: &JsValue, name: &str) -> String {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

/// Settles a `text()` promise into `on_complete` on a local task.
fn deliver_text(context: &'static str, promise: Result<Promise>, on_complete: TextContinuation) {
    task::spawn(async move {
        let result: Result<String> = match promise {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map(|text| text.as_string().unwrap_or_default())
                .map_err(|err| js_error(context, err).into()),
            Err(err) => Err(err),
        };
        on_complete(result);
    });
}

/// A `web_sys::Request` handle.
#[derive(Clone)]
pub struct WasmRequest(web_sys::Request);

impl WasmRequest {
    /// Wraps a browser request.
    pub fn new(inner: web_sys::Request) -> Self {
        Self(inner)
    }

    /// The wrapped browser object.
    pub fn as_web(&self) -> &web_sys::Request {
        &self.0
    }

    /// Whether both handles reference the same JS object.
    pub fn same_object(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl From<web_sys::Request> for WasmRequest {
    fn from(inner: web_sys::Request) -> Self {
        Self(inner)
    }
}

impl HostMessage for WasmRequest {
    type Headers = WasmHeaders;

    fn clone_message(&self) -> Result<Self> {
        if self.0.body_used() {
            return Err(BridgeError::BodyUsed);
        }
        // Host clone(), not the handle copy.
        let copy = self.0.clone().map_err(|err| js_error("Request.clone", err))?;
        Ok(Self(copy))
    }

    fn read_text(&self, on_complete: TextContinuation) {
        let promise: Result<Promise> = if self.0.body_used() {
            Err(BridgeError::BodyUsed)
        } else {
            self.0
                .text()
                .map_err(|err| js_error("Request.text", err).into())
        };
        deliver_text("Request.text", promise, on_complete);
    }

    fn headers(&self) -> WasmHeaders {
        WasmHeaders::new(self.0.headers())
    }

    fn body_used(&self) -> bool {
        self.0.body_used()
    }
}

impl HostRequest for WasmRequest {
    fn url(&self) -> String {
        self.0.url()
    }

    fn method(&self) -> String {
        self.0.method()
    }

    fn mode(&self) -> String {
        string_property(&self.0, "mode")
    }

    fn cache(&self) -> String {
        string_property(&self.0, "cache")
    }

    fn credentials(&self) -> String {
        string_property(&self.0, "credentials")
    }

    fn referrer(&self) -> String {
        self.0.referrer()
    }

    fn referrer_policy(&self) -> String {
        string_property(&self.0, "referrerPolicy")
    }
}

impl fmt::Debug for WasmRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasmRequest")
            .field("method", &self.0.method())
            .field("url", &self.0.url())
            .finish()
    }
}

/// A `web_sys::Response` handle.
#[derive(Clone)]
pub struct WasmResponse(web_sys::Response);

impl WasmResponse {
    /// Wraps a browser response.
    pub fn new(inner: web_sys::Response) -> Self {
        Self(inner)
    }

    /// The wrapped browser object.
    pub fn as_web(&self) -> &web_sys::Response {
        &self.0
    }

    /// Whether both handles reference the same JS object.
    pub fn same_object(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl From<web_sys::Response> for WasmResponse {
    fn from(inner: web_sys::Response) -> Self {
        Self(inner)
    }
}

impl HostMessage for WasmResponse {
    type Headers = WasmHeaders;

    fn clone_message(&self) -> Result<Self> {
        if self.0.body_used() {
            return Err(BridgeError::BodyUsed);
        }
        // Host clone(), not the handle copy.
        let copy = self.0.clone().map_err(|err| js_error("Response.clone", err))?;
        Ok(Self(copy))
    }

    fn read_text(&self, on_complete: TextContinuation) {
        let promise: Result<Promise> = if self.0.body_used() {
            Err(BridgeError::BodyUsed)
        } else {
            self.0
                .text()
                .map_err(|err| js_error("Response.text", err).into())
        };
        deliver_text("Response.text", promise, on_complete);
    }

    fn headers(&self) -> WasmHeaders {
        WasmHeaders::new(self.0.headers())
    }

    fn body_used(&self) -> bool {
        self.0.body_used()
    }
}

impl HostResponse for WasmResponse {
    fn ok(&self) -> bool {
        self.0.ok()
    }

    fn status(&self) -> u16 {
        self.0.status()
    }

    fn status_text(&self) -> String {
        self.0.status_text()
    }

    fn response_type(&self) -> String {
        string_property(&self.0, "type")
    }

    fn redirected(&self) -> bool {
        self.0.redirected()
    }

    fn url(&self) -> String {
        self.0.url()
    }
}

impl fmt::Debug for WasmResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasmResponse")
            .field("status", &self.0.status())
            .field("url", &self.0.url())
            .finish()
    }
}
