//! `HostPlatform` over the browser's fetch constructors.

use crate::error::js_error;
use crate::headers::WasmHeaders;
use crate::message::{WasmRequest, WasmResponse};
use bridge_traits::{error::Result, HostPlatform, RequestInit, ResponseInit};
use js_sys::{Array, Reflect, Uint8Array};
use tracing::debug;
use wasm_bindgen::JsValue;
use web_sys::Blob;

/// Builds `Headers`, `Blob`, `Request` and `Response` objects.
///
/// Browsers decide what they accept; every constructor error is passed on
/// with the browser's message.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmPlatform;

impl WasmPlatform {
    /// Creates the platform.
    pub fn new() -> Self {
        Self
    }
}

fn set_string(target: &JsValue, key: &str, value: &str) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), &JsValue::from_str(value))
        .map_err(|err| js_error("RequestInit", err))?;
    Ok(())
}

impl HostPlatform for WasmPlatform {
    type Headers = WasmHeaders;
    type Body = Blob;
    type Request = WasmRequest;
    type Response = WasmResponse;

    fn new_headers(&self) -> Result<WasmHeaders> {
        let headers = web_sys::Headers::new().map_err(|err| js_error("new Headers", err))?;
        Ok(WasmHeaders::new(headers))
    }

    fn new_body(&self, bytes: &[u8]) -> Result<Blob> {
        let parts = Array::of1(&Uint8Array::from(bytes));
        let blob = Blob::new_with_u8_array_sequence(&parts).map_err(|err| js_error("new Blob", err))?;
        Ok(blob)
    }

    fn new_request(&self, init: RequestInit<'_, Blob, WasmHeaders>) -> Result<WasmRequest> {
        let options = web_sys::RequestInit::new();
        options.set_method(init.method);
        options.set_headers(init.headers.as_web());
        if let Some(body) = &init.body {
            options.set_body(body);
        }

        // Passed through as strings; the browser validates them.
        set_string(&options, "mode", init.mode)?;
        set_string(&options, "cache", init.cache)?;
        set_string(&options, "credentials", init.credentials)?;
        set_string(&options, "referrer", init.referrer)?;
        set_string(&options, "referrerPolicy", init.referrer_policy)?;

        let request = web_sys::Request::new_with_str_and_init(init.url, &options)
            .map_err(|err| js_error("new Request", err))?;

        debug!(url = init.url, method = init.method, "Built browser request");
        Ok(WasmRequest::new(request))
    }

    fn new_response(&self, init: ResponseInit<'_, Blob, WasmHeaders>) -> Result<WasmResponse> {
        let options = web_sys::ResponseInit::new();
        options.set_status(init.status);
        options.set_status_text(init.status_text);
        options.set_headers(init.headers.as_web());

        let response = web_sys::Response::new_with_opt_blob_and_init(init.body.as_ref(), &options)
            .map_err(|err| js_error("new Response", err))?;

        debug!(status = init.status, "Built browser response");
        Ok(WasmResponse::new(response))
    }
}
