//! Terminal operations, which drive a [`Sequence`] and return a concrete result.

use core::fmt::Display;

use crate::traits::Numeric;
use crate::{Error, Key, Result, Sequence};

impl<V> Sequence<V>
where
    V: Clone + 'static,
{
    /// The first value. Fails with [`Error::EmptySequence`] if there is none.
    pub fn first(&self) -> Result<V> {
        self.first_or_none()?.ok_or(Error::EmptySequence)
    }

    /// The first value for which `predicate(&value, &key)` holds. Fails with [`Error::NoMatch`] if there is none.
    pub fn first_where<P>(&self, predicate: P) -> Result<V>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.first_where_or_none(predicate)?.ok_or(Error::NoMatch)
    }

    /// The first value, or `None` if the sequence is empty.
    pub fn first_or_none(&self) -> Result<Option<V>> {
        self.drive(|pairs| pairs.next().map(|(_, value)| value))
    }

    /// The first value for which `predicate(&value, &key)` holds, or `None`.
    pub fn first_where_or_none<P>(&self, mut predicate: P) -> Result<Option<V>>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.drive(|pairs| {
            pairs
                .find(|(key, value)| predicate(value, key))
                .map(|(_, value)| value)
        })
    }

    /// The last value. Fails with [`Error::EmptySequence`] if there is none.
    pub fn last(&self) -> Result<V> {
        self.last_or_none()?.ok_or(Error::EmptySequence)
    }

    /// The last value for which `predicate(&value, &key)` holds. Fails with [`Error::NoMatch`] if there is none.
    pub fn last_where<P>(&self, predicate: P) -> Result<V>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.last_where_or_none(predicate)?.ok_or(Error::NoMatch)
    }

    /// The last value, or `None` if the sequence is empty.
    pub fn last_or_none(&self) -> Result<Option<V>> {
        self.drive(|pairs| pairs.last().map(|(_, value)| value))
    }

    /// The last value for which `predicate(&value, &key)` holds, or `None`.
    pub fn last_where_or_none<P>(&self, mut predicate: P) -> Result<Option<V>>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.drive(|pairs| {
            pairs
                .filter(|(key, value)| predicate(value, key))
                .last()
                .map(|(_, value)| value)
        })
    }

    /// Returns `true` if `predicate(&value, &key)` holds for some pair. Stops at the first match.
    pub fn any<P>(&self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.drive(|pairs| pairs.any(|(key, value)| predicate(&value, &key)))
    }

    /// Returns `true` if `predicate(&value, &key)` holds for every pair, including when there are none. Stops at
    /// the first failure.
    pub fn all<P>(&self, mut predicate: P) -> Result<bool>
    where
        P: FnMut(&V, &Key) -> bool,
    {
        self.drive(|pairs| pairs.all(|(key, value)| predicate(&value, &key)))
    }

    /// Left fold over the values, starting from `seed`. Keys are not passed to `operator`.
    pub fn reduce<A, F>(&self, operator: F, seed: A) -> Result<A>
    where
        F: FnMut(A, V) -> A,
    {
        self.drive(|pairs| pairs.map(|(_, value)| value).fold(seed, operator))
    }

    /// Concatenates the values, each one preceded by `separator`.
    ///
    /// The result starts with `separator` whenever the sequence is non-empty: `[a, b]` with `","` gives `",a,b"`.
    pub fn implode(&self, separator: &str) -> Result<String>
    where
        V: Display,
    {
        self.drive(|pairs| {
            pairs.fold(String::new(), |mut out, (_, value)| {
                out.push_str(separator);
                out.push_str(&value.to_string());
                out
            })
        })
    }

    /// Sums the values as `f64`.
    pub fn sum(&self) -> Result<f64>
    where
        V: Numeric,
    {
        self.drive(|pairs| pairs.map(|(_, value)| value.to_f64()).sum())
    }

    /// Calls `func(&value, &key)` for every pair.
    pub fn for_each<F>(&self, mut func: F) -> Result<()>
    where
        F: FnMut(&V, &Key),
    {
        self.drive(|pairs| {
            for (key, value) in pairs {
                func(&value, &key);
            }
        })
    }
}
