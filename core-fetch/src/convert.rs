//! Host collection converters.
//!
//! Walk an indexable host object from `0` to `length - 1` and copy what it
//! holds into ordinary Rust values. The converters trust the host: no
//! bounds checks beyond the stated range and no error path.

use crate::model::HeaderMap;
use bridge_traits::{HostCollection, HostHeaders};

/// Copies a header collection into a [`HeaderMap`].
///
/// Each entry costs two host lookups: the name at the index, then the value
/// fetched by that name. A name the host cannot resolve maps to `""`.
/// Names are kept exactly as enumerated; if the host enumerates two
/// spellings of one name, both appear with whatever `get` returns for each.
pub fn header_map<C>(headers: &C) -> HeaderMap
where
    C: HostHeaders + ?Sized,
{
    let length = headers.length();
    let mut map = HeaderMap::with_capacity(length as usize);

    for index in 0..length {
        let name = headers.item_string(index);
        let value = headers.get(&name).unwrap_or_default();
        map.insert(name, value);
    }

    map
}

/// Copies every element of `collection` as a string, in index order.
pub fn string_list<C>(collection: &C) -> Vec<String>
where
    C: HostCollection + ?Sized,
{
    (0..collection.length())
        .map(|index| collection.item_string(index))
        .collect()
}

/// Copies every element handle of `collection`, in index order.
pub fn object_list<C>(collection: &C) -> Vec<C::Item>
where
    C: HostCollection + ?Sized,
{
    (0..collection.length())
        .map(|index| collection.item(index))
        .collect()
}
