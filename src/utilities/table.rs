// Bidirectional Table
// Immutable one-to-one map that can be looked up by key or by value

use std::collections::BTreeMap;

use crate::errors::{ToolsError, ToolsResult};

/// One-to-one table, fixed at construction
///
/// The reverse index stores positions into the key-ordered entry list, so
/// each key and value is held once.
#[derive(Debug, Clone)]
pub struct BiTable<K, V> {
    entries: Vec<(K, V)>,
    by_value: BTreeMap<V, usize>,
}

impl<K, V> BiTable<K, V>
where
    K: Ord,
    V: Ord + Clone,
{
    /// Build the table, rejecting maps where two keys share a value
    pub fn new(map: BTreeMap<K, V>) -> ToolsResult<Self> {
        let entries: Vec<(K, V)> = map.into_iter().collect();
        let mut by_value = BTreeMap::new();

        for (index, (_, value)) in entries.iter().enumerate() {
            if by_value.insert(value.clone(), index).is_some() {
                return Err(ToolsError::DuplicateValue);
            }
        }

        Ok(Self { entries, by_value })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value stored under `key`
    pub fn value(&self, key: &K) -> ToolsResult<&V> {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(key))
            .map(|index| &self.entries[index].1)
            .map_err(|_| ToolsError::KeyNotFound)
    }

    /// Key whose value is `value`
    pub fn key(&self, value: &V) -> ToolsResult<&K> {
        self.by_value
            .get(value)
            .map(|&index| &self.entries[index].0)
            .ok_or(ToolsError::ValueNotFound)
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}
