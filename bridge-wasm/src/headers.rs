//! Browser `Headers` and JS arrays as host collections.

use crate::error::js_error;
use crate::message::{WasmRequest, WasmResponse};
use bridge_traits::{error::Result, HostCollection, HostHeaders};
use js_sys::Array;
use std::cell::RefCell;
use std::marker::PhantomData;
use wasm_bindgen::{JsCast, JsValue};

/// A `web_sys::Headers` handle.
///
/// Browsers enumerate headers as lowercased, sorted, combined names. The
/// name list is read once and re-read after every `set`.
#[derive(Debug, Clone)]
pub struct WasmHeaders {
    inner: web_sys::Headers,
    names: RefCell<Option<Vec<String>>>,
}

impl WasmHeaders {
    /// Wraps an existing browser header collection.
    pub fn new(inner: web_sys::Headers) -> Self {
        Self {
            inner,
            names: RefCell::new(None),
        }
    }

    /// The wrapped browser object.
    pub fn as_web(&self) -> &web_sys::Headers {
        &self.inner
    }

    fn with_names<R>(&self, f: impl FnOnce(&[String]) -> R) -> R {
        let mut names = self.names.borrow_mut();
        let names = names.get_or_insert_with(|| enumerate_names(&self.inner));
        f(names)
    }
}

fn enumerate_names(headers: &web_sys::Headers) -> Vec<String> {
    let Ok(Some(entries)) = js_sys::try_iter(headers.as_ref()) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| Array::from(&entry).get(0).as_string())
        .collect()
}

impl HostCollection for WasmHeaders {
    type Item = String;

    fn length(&self) -> u32 {
        self.with_names(|names| names.len() as u32)
    }

    fn item(&self, index: u32) -> String {
        self.with_names(|names| names[index as usize].clone())
    }

    fn item_string(&self, index: u32) -> String {
        self.item(index)
    }
}

impl HostHeaders for WasmHeaders {
    fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name).ok().flatten()
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        self.inner
            .set(name, value)
            .map_err(|err| js_error("Headers.set", err))?;
        self.names.replace(None);
        Ok(())
    }
}

/// Element conversion for [`WasmArray`].
pub trait FromJsElement {
    /// Wraps an array element without type checks.
    fn from_element(value: JsValue) -> Self;
}

impl FromJsElement for WasmRequest {
    fn from_element(value: JsValue) -> Self {
        WasmRequest::new(value.unchecked_into())
    }
}

impl FromJsElement for WasmResponse {
    fn from_element(value: JsValue) -> Self {
        WasmResponse::new(value.unchecked_into())
    }
}

impl FromJsElement for JsValue {
    fn from_element(value: JsValue) -> Self {
        value
    }
}

/// A JS `Array` whose elements are read as `T`.
#[derive(Debug, Clone)]
pub struct WasmArray<T> {
    array: Array,
    _item: PhantomData<T>,
}

impl<T> WasmArray<T> {
    /// Wraps `array`; elements are trusted to be `T`.
    pub fn new(array: Array) -> Self {
        Self {
            array,
            _item: PhantomData,
        }
    }
}

impl<T: FromJsElement> HostCollection for WasmArray<T> {
    type Item = T;

    fn length(&self) -> u32 {
        self.array.length()
    }

    fn item(&self, index: u32) -> T {
        T::from_element(self.array.get(index))
    }

    /// JS string coercion, as `Array.prototype.join` applies it.
    fn item_string(&self, index: u32) -> String {
        String::from(Array::of1(&self.array.get(index)).join(""))
    }
}
