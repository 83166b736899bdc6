//! Lazy sequence-to-sequence combinators.
//!
//! Building a combinator never touches the source. Every traversal of the result re-drives the source from its own
//! start, so callbacks run once per element per traversal.

use core::hash::Hash;
use std::rc::Rc;

use crate::pull::{Append, Merge, Unique};
use crate::traits::Nullable;
use crate::{Input, Key, Sequence};

impl<V> Sequence<V>
where
    V: Clone + 'static,
{
    /// Replaces each value with `mapper(&value, &key)`, keeping keys.
    pub fn map<U, F>(&self, mapper: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: Fn(&V, &Key) -> U + 'static,
    {
        let mapper = Rc::new(mapper);
        self.derive(move |pairs| {
            let mapper = Rc::clone(&mapper);
            pairs.map(move |(key, value)| {
                let value = (mapper)(&value, &key);
                (key, value)
            })
        })
    }

    /// Replaces each pair with `(key_mapper(&value, &key), mapper(&value, &key))`.
    ///
    /// Both functions see the original pair.
    pub fn map_with_keys<U, K, F, G>(&self, mapper: F, key_mapper: G) -> Sequence<U>
    where
        U: Clone + 'static,
        K: Into<Key>,
        F: Fn(&V, &Key) -> U + 'static,
        G: Fn(&V, &Key) -> K + 'static,
    {
        let mappers = Rc::new((mapper, key_mapper));
        self.derive(move |pairs| {
            let mappers = Rc::clone(&mappers);
            pairs.map(move |(key, value)| {
                let (mapper, key_mapper) = &*mappers;
                (key_mapper(&value, &key).into(), mapper(&value, &key))
            })
        })
    }

    /// Replaces each key with `key_mapper(&value, &key)`, keeping values.
    pub fn map_keys<K, G>(&self, key_mapper: G) -> Self
    where
        K: Into<Key>,
        G: Fn(&V, &Key) -> K + 'static,
    {
        let key_mapper = Rc::new(key_mapper);
        self.derive(move |pairs| {
            let key_mapper = Rc::clone(&key_mapper);
            pairs.map(move |(key, value)| (key_mapper(&value, &key).into(), value))
        })
    }

    /// Drops the keys, re-keying values positionally.
    pub fn values(&self) -> Self {
        self.derive(|pairs| {
            pairs
                .enumerate()
                .map(|(i, (_, value))| (Key::Index(i), value))
        })
    }

    /// The keys of this sequence, keyed positionally.
    pub fn keys(&self) -> Sequence<Key> {
        self.derive(|pairs| pairs.enumerate().map(|(i, (key, _))| (Key::Index(i), key)))
    }

    /// Maps each pair to an iterable and flattens the results, keyed positionally.
    pub fn flat_map<U, F, I>(&self, mapper: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: Fn(&V, &Key) -> I + 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
    {
        let mapper = Rc::new(mapper);
        self.derive(move |pairs| {
            let mapper = Rc::clone(&mapper);
            pairs
                .flat_map(move |(key, value)| (mapper)(&value, &key))
                .enumerate()
                .map(|(i, value)| (Key::Index(i), value))
        })
    }

    /// All of `self`, then the pairs of `other` whose name `self` did not emit.
    ///
    /// `other` is not begun until `self` is exhausted, so a traversal that stops early never touches it.
    ///
    /// Index-keyed pairs from both sides are always emitted and keep their keys; use [`Sequence::values`] afterwards
    /// if contiguous `0..n` keys are needed.
    pub fn merge(&self, other: impl Into<Input<V>>) -> Self {
        let first = self.clone();
        let second = Self::new(other);
        Self::try_lazy(move || {
            let pairs = Merge::new(first.iterate()?, second.clone());
            Ok(Input::Cursor(pairs.into_pair_iter()))
        })
    }

    /// All of `self`, then `element` keyed by the next free index.
    pub fn append(&self, element: V) -> Self {
        self.derive(move |pairs| Append::new(pairs, element.clone()))
    }

    /// Keeps the pairs for which `predicate(&value, &key)` holds. Keys are preserved.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |pairs| {
            let predicate = Rc::clone(&predicate);
            pairs.filter(move |(key, value)| predicate(value, key))
        })
    }

    /// Drops the pairs for which `predicate(&value, &key)` holds. Keys are preserved.
    pub fn reject<P>(&self, predicate: P) -> Self
    where
        P: Fn(&V, &Key) -> bool + 'static,
    {
        self.filter(move |value, key| !predicate(value, key))
    }

    /// Keeps the first pair of each distinct value.
    pub fn unique(&self) -> Self
    where
        V: Eq + Hash,
    {
        self.unique_by(|value, _| value.clone())
    }

    /// Keeps the first pair for each distinct `hasher(&value, &key)`.
    pub fn unique_by<H, F>(&self, hasher: F) -> Self
    where
        H: Eq + Hash + 'static,
        F: Fn(&V, &Key) -> H + 'static,
    {
        let hasher = Rc::new(hasher);
        self.derive(move |pairs| {
            let hasher = Rc::clone(&hasher);
            Unique::new(pairs, move |value: &V, key: &Key| hasher(value, key))
        })
    }

    /// The first `n` pairs in traversal order. Keys are preserved.
    pub fn take(&self, n: usize) -> Self {
        self.derive(move |pairs| pairs.take(n))
    }

    /// All but the first `n` pairs in traversal order. Keys are preserved.
    pub fn skip(&self, n: usize) -> Self {
        self.derive(move |pairs| pairs.skip(n))
    }

    /// Calls `inspector(&value, &key)` on each pair as it passes through.
    pub fn inspect<F>(&self, inspector: F) -> Self
    where
        F: Fn(&V, &Key) + 'static,
    {
        let inspector = Rc::new(inspector);
        self.derive(move |pairs| {
            let inspector = Rc::clone(&inspector);
            pairs.inspect(move |(key, value)| inspector(value, key))
        })
    }
}

impl<V> Sequence<V>
where
    V: Nullable + Clone + 'static,
    V::Present: Clone + 'static,
{
    /// Drops absent values (`None`, JSON `null`), unwrapping the rest. Keys are preserved.
    pub fn compact(&self) -> Sequence<V::Present> {
        self.derive(|pairs| {
            pairs.filter_map(|(key, value)| value.into_present().map(|value| (key, value)))
        })
    }
}
