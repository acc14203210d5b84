//! Indexable host collections.
//!
//! Hosts expose header bags, string lists and object arrays as objects with
//! a `length` and index access. These traits capture exactly that, plus the
//! by-name lookup header collections offer, without tying the core to any
//! particular binding.

use crate::error::Result;

/// An object with an integer `length` and index-based access.
///
/// Indices outside `0..length()` are never requested by the converters;
/// implementations may panic on them.
pub trait HostCollection {
    /// Opaque element handle returned by [`item`](Self::item).
    type Item;

    fn length(&self) -> u32;

    fn item(&self, index: u32) -> Self::Item;

    /// The element at `index` coerced to a string by the host.
    fn item_string(&self, index: u32) -> String;
}

/// A header collection: enumerable names plus lookup and mutation by name.
///
/// Name comparison (case sensitivity, duplicate merging) is whatever the
/// host does; the bridge never normalizes names.
pub trait HostHeaders: HostCollection {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: &str) -> Result<()>;
}

impl<T> HostCollection for [T]
where
    T: Clone + ToString,
{
    type Item = T;

    fn length(&self) -> u32 {
        self.len() as u32
    }

    fn item(&self, index: u32) -> T {
        self[index as usize].clone()
    }

    fn item_string(&self, index: u32) -> String {
        self[index as usize].to_string()
    }
}

impl<T> HostCollection for Vec<T>
where
    T: Clone + ToString,
{
    type Item = T;

    fn length(&self) -> u32 {
        self.as_slice().length()
    }

    fn item(&self, index: u32) -> T {
        self.as_slice().item(index)
    }

    fn item_string(&self, index: u32) -> String {
        self.as_slice().item_string(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_collection_indexes_in_order() {
        let items = vec![10u16, 20, 30];

        assert_eq!(items.length(), 3);
        assert_eq!(items.item(1), 20);
        assert_eq!(items.item_string(2), "30");
    }

    #[test]
    fn test_empty_slice_has_zero_length() {
        let items: &[String] = &[];
        assert_eq!(items.length(), 0);
    }
}
