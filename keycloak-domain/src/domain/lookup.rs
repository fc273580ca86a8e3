//! Multi-key resolution over a full collection listing.
//!
//! The admin API has no batch lookup for users or clients, so bulk reads
//! fetch the whole collection once and resolve the requested keys in memory.
//! Cost grows with realm size, not with the number of keys requested.

use std::collections::HashMap;

/// Entries for the requested keys, in request order. Keys with no match are
/// skipped.
pub fn select_present<T, F>(items: Vec<T>, keys: &[String], key_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let index = index_by(&items, key_of);
    keys.iter()
        .filter_map(|key| index.get(key.as_str()).map(|&pos| items[pos].clone()))
        .collect()
}

/// One entry per requested key, in request order. Keys with no match yield
/// `T::default()`.
pub fn select_or_default<T, F>(items: Vec<T>, keys: &[String], key_of: F) -> Vec<T>
where
    T: Clone + Default,
    F: Fn(&T) -> &str,
{
    let index = index_by(&items, key_of);
    keys.iter()
        .map(|key| {
            index
                .get(key.as_str())
                .map(|&pos| items[pos].clone())
                .unwrap_or_default()
        })
        .collect()
}

// Later entries win on duplicate keys.
fn index_by<T, F>(items: &[T], key_of: F) -> HashMap<&str, usize>
where
    F: Fn(&T) -> &str,
{
    items
        .iter()
        .enumerate()
        .map(|(pos, item)| (key_of(item), pos))
        .collect()
}
