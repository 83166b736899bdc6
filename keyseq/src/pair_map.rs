//! [`PairMap`] and related items.

use core::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{Key, Pair};

/// A materialized, insertion-ordered mapping of pairs.
///
/// [`Key::Name`] keys are unique: inserting an existing name overwrites the value in its original position.
/// [`Key::Index`] keys carry no uniqueness constraint and are always appended.
#[derive(Clone)]
pub struct PairMap<V> {
    entries: Vec<Pair<V>>,
    /// Position of each named entry in `entries`.
    names: FxHashMap<String, usize>,
}

impl<V> Default for PairMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            names: FxHashMap::default(),
        }
    }
}

impl<V> PairMap<V> {
    /// Creates an empty `PairMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty `PairMap` with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            names: FxHashMap::default(),
        }
    }

    /// Inserts a pair, returning the overwritten value if `key` is a name already present.
    pub fn insert(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        match key.into() {
            Key::Name(name) => {
                if let Some(&pos) = self.names.get(&name) {
                    Some(core::mem::replace(&mut self.entries[pos].1, value))
                } else {
                    self.names.insert(name.clone(), self.entries.len());
                    self.entries.push((Key::Name(name), value));
                    None
                }
            }
            key @ Key::Index(_) => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value of the first pair with the given key.
    pub fn get(&self, key: &Key) -> Option<&V> {
        match key {
            Key::Name(name) => self.get_name(name),
            Key::Index(_) => self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
        }
    }

    /// Returns the value stored under the name `name`.
    pub fn get_name(&self, name: &str) -> Option<&V> {
        self.names.get(name).map(|&pos| &self.entries[pos].1)
    }

    /// Returns the pair at traversal position `pos`.
    pub fn get_at(&self, pos: usize) -> Option<&Pair<V>> {
        self.entries.get(pos)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates pairs by reference, in insertion order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &V)> + ExactSizeIterator {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Consumes the map, returning its values in insertion order.
    pub fn into_values(self) -> Vec<V> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }

    /// Consumes the map, returning its pairs in insertion order.
    pub fn into_pairs(self) -> Vec<Pair<V>> {
        self.entries
    }
}

impl<V> From<Vec<V>> for PairMap<V> {
    /// Keys the values positionally, `0..n`.
    fn from(values: Vec<V>) -> Self {
        Self {
            entries: values.into_iter().enumerate().map(|(i, v)| (Key::Index(i), v)).collect(),
            names: FxHashMap::default(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for PairMap<V>
where
    K: Into<Key>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for PairMap<V>
where
    K: Into<Key>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> IntoIterator for PairMap<V> {
    type Item = Pair<V>;
    type IntoIter = std::vec::IntoIter<Pair<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: PartialEq> PartialEq for PairMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
impl<V: Eq> Eq for PairMap<V> {}

impl<V: fmt::Debug> fmt::Debug for PairMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for PairMap<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Replays the pairs of a shared [`PairMap`] by cloning, so the map may be traversed any number of times.
pub(crate) struct SharedIter<V> {
    map: Rc<PairMap<V>>,
    replay_idx: usize,
}

impl<V> SharedIter<V> {
    pub(crate) fn new(map: Rc<PairMap<V>>) -> Self {
        Self { map, replay_idx: 0 }
    }
}

impl<V: Clone> Iterator for SharedIter<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.map.get_at(self.replay_idx)?.clone();
        self.replay_idx += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.map.len() - self.replay_idx;
        (remaining, Some(remaining))
    }
}

impl<V: Clone> ExactSizeIterator for SharedIter<V> {}
