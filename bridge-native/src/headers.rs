//! In-memory header collection.

use bridge_traits::{
    error::{BridgeError, Result},
    HostCollection, HostHeaders,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Header bag shared between handles.
///
/// Names compare case-insensitively, like web `Headers`, but keep the
/// spelling they were first set with. Enumeration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryHeaders {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from `(name, value)` pairs, later names
    /// overwriting earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let headers = Self::new();
        for (name, value) in pairs {
            headers.set(name.as_ref(), value.as_ref())?;
        }
        Ok(headers)
    }

    /// Whether both handles refer to the same collection.
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// An independent collection with the same entries.
    pub(crate) fn deep_copy(&self) -> Self {
        Self {
            entries: Arc::new(Mutex::new(self.lock().clone())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostCollection for MemoryHeaders {
    type Item = String;

    fn length(&self) -> u32 {
        self.lock().len() as u32
    }

    fn item(&self, index: u32) -> String {
        self.lock()[index as usize].0.clone()
    }

    fn item_string(&self, index: u32) -> String {
        self.item(index)
    }
}

impl HostHeaders for MemoryHeaders {
    fn get(&self, name: &str) -> Option<String> {
        self.lock()
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    fn set(&self, name: &str, value: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(BridgeError::Platform(format!(
                "Failed to execute 'set' on 'Headers': Invalid name: '{name}'"
            )));
        }
        if value.contains(&['\r', '\n', '\0'][..]) {
            return Err(BridgeError::Platform(format!(
                "Failed to execute 'set' on 'Headers': Invalid value for '{name}'"
            )));
        }

        let mut entries = self.lock();
        match entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(index) => entries[index].1 = value.to_string(),
            None => entries.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }
}

/// RFC 9110 token characters.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
        })
}
