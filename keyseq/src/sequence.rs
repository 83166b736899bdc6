//! [`Sequence`], the core re-traversable pair source.

use core::fmt;
use std::rc::Rc;

use crate::lazy::{Cursor, LazyPairs};
use crate::pair_map::SharedIter;
use crate::pull::Unfold;
use crate::{Input, Key, Pair, PairIter, PairMap, PairSource, Result};

enum Source<V> {
    Materialized(Rc<PairMap<V>>),
    Lazy(LazyPairs<V>),
    Cursor(Cursor<V>),
}

/// A lazily driven, immutable sequence of `(key, value)` pairs.
///
/// Cloning is cheap; clones share the same underlying source. Nothing is evaluated until the sequence is
/// traversed, either explicitly with [`Sequence::iterate`] or by a terminal operation such as
/// [`Sequence::to_array`]. Whether a sequence can be traversed more than once depends on its source:
/// materialized pairs and producers can, a bare single-pass cursor cannot (see
/// [`Error::NotRewindable`](crate::Error::NotRewindable)).
pub struct Sequence<V> {
    source: Rc<Source<V>>,
}

impl<V> Clone for Sequence<V> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<V> Sequence<V>
where
    V: Clone + 'static,
{
    fn from_source_kind(source: Source<V>) -> Self {
        Self {
            source: Rc::new(source),
        }
    }

    /// Builds a sequence from any [`Input`]. An existing sequence is returned as-is, not re-wrapped.
    pub fn new(input: impl Into<Input<V>>) -> Self {
        match input.into() {
            Input::Pairs(pairs) => Self::materialized(pairs),
            Input::Cursor(iter) => Self::from_source_kind(Source::Cursor(Cursor::new(iter))),
            Input::Sequence(sequence) => sequence,
        }
    }

    /// A sequence over already-materialized pairs.
    pub fn materialized(pairs: PairMap<V>) -> Self {
        Self::from_source_kind(Source::Materialized(Rc::new(pairs)))
    }

    /// A fresh empty sequence.
    pub fn empty() -> Self {
        Self::materialized(PairMap::new())
    }

    /// Wraps a zero-argument factory. The factory is not called until the sequence is traversed.
    ///
    /// If the factory returns materialized pairs (or a re-iterable sequence) the result is cached and later
    /// traversals restart it in place. If it returns a single-pass cursor, every traversal calls the factory again.
    pub fn lazy<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: Into<Input<V>>,
    {
        Self::try_lazy(move || Ok(producer().into()))
    }

    /// Like [`Sequence::lazy`], for factories that can fail.
    pub fn try_lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Result<Input<V>> + 'static,
    {
        Self::from_source_kind(Source::Lazy(LazyPairs::new(Box::new(producer))))
    }

    /// Wraps a user [`PairSource`], asking it for pairs on each traversal.
    pub fn from_source<S>(source: S) -> Self
    where
        S: PairSource<V> + 'static,
    {
        Self::try_lazy(move || Ok(source.pairs()))
    }

    /// An infinite sequence `seed, step(&seed, 0), step(&that, 1), ...`, keyed positionally.
    ///
    /// Each step runs only when its element is pulled, so this must be bounded with [`Sequence::take`], a
    /// short-circuiting terminal such as [`Sequence::first_where`], or early exit from [`Sequence::iterate`].
    pub fn unfold<F>(seed: V, step: F) -> Self
    where
        F: Fn(&V, usize) -> V + 'static,
    {
        let step = Rc::new(step);
        Self::lazy(move || {
            let step = Rc::clone(&step);
            Input::Cursor(PairIter::new(
                Unfold::new(seed.clone(), move |prev: &V, i| step(prev, i))
                    .enumerate()
                    .map(|(i, value)| (Key::Index(i), value)),
            ))
        })
    }

    /// Begins a traversal.
    ///
    /// Fails with [`Error::NotRewindable`](crate::Error::NotRewindable) if this sequence (or one it is derived from)
    /// reads a single-pass cursor that was already handed out. Failures that can only surface part way through, such
    /// as the second side of a [`Sequence::merge`], end the iterator early and are reported by
    /// [`PairIter::take_error`].
    pub fn iterate(&self) -> Result<PairIter<V>> {
        match &*self.source {
            Source::Materialized(pairs) => Ok(PairIter::new(SharedIter::new(Rc::clone(pairs)))),
            Source::Lazy(lazy) => lazy.begin(),
            Source::Cursor(cursor) => cursor.take(),
        }
    }

    /// Drives the sequence to completion, collecting a [`PairMap`].
    ///
    /// Later pairs overwrite earlier ones with the same [`Key::Name`]; index keys never collapse.
    pub fn to_array(&self) -> Result<PairMap<V>> {
        if let Source::Materialized(pairs) = &*self.source {
            return Ok(PairMap::clone(pairs));
        }
        self.drive(|pairs| pairs.collect())
    }

    /// Returns a materialized sequence with the same pairs, traversing this one at most once.
    pub fn evaluate(&self) -> Result<Self> {
        if self.is_materialized() {
            return Ok(self.clone());
        }
        Ok(Self::materialized(self.to_array()?))
    }

    /// Number of pairs. Constant time for materialized sources, otherwise a full traversal.
    pub fn count(&self) -> Result<usize> {
        match &*self.source {
            Source::Materialized(pairs) => Ok(pairs.len()),
            Source::Lazy(lazy) => match lazy.reusable() {
                Some(reusable) => reusable.count(),
                None => self.drive(|pairs| pairs.count()),
            },
            Source::Cursor(_) => self.drive(|pairs| pairs.count()),
        }
    }

    /// Returns `true` if this sequence is backed by materialized pairs.
    pub fn is_materialized(&self) -> bool {
        matches!(&*self.source, Source::Materialized(_))
    }

    /// Returns `false` only for sequences over a bare single-pass cursor.
    pub fn is_regenerative(&self) -> bool {
        !matches!(&*self.source, Source::Cursor(_))
    }

    /// Runs one traversal through `consume`, then fails with the error that ended it early, if any.
    pub(crate) fn drive<R, F>(&self, consume: F) -> Result<R>
    where
        F: FnOnce(&mut PairIter<V>) -> R,
    {
        let mut pairs = self.iterate()?;
        let out = consume(&mut pairs);
        match pairs.take_error() {
            Some(err) => Err(err),
            None => Ok(out),
        }
    }

    /// Builds a derived lazy sequence: each traversal re-drives `self` and passes its pairs through `adapt`.
    pub(crate) fn derive<U, F, I>(&self, adapt: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: Fn(PairIter<V>) -> I + 'static,
        I: Iterator<Item = Pair<U>> + 'static,
    {
        let upstream = self.clone();
        Sequence::try_lazy(move || {
            let pairs = upstream.iterate()?;
            let fault = pairs.fault();
            Ok(Input::Cursor(PairIter::with_fault(adapt(pairs), fault)))
        })
    }
}

impl<V> Default for Sequence<V>
where
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> From<PairMap<V>> for Sequence<V>
where
    V: Clone + 'static,
{
    fn from(pairs: PairMap<V>) -> Self {
        Self::materialized(pairs)
    }
}

impl<V> From<Vec<V>> for Sequence<V>
where
    V: Clone + 'static,
{
    fn from(values: Vec<V>) -> Self {
        Self::materialized(PairMap::from(values))
    }
}

impl<V> fmt::Debug for Sequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.source {
            Source::Materialized(pairs) => f
                .debug_struct("Sequence")
                .field("materialized", &pairs.len())
                .finish(),
            Source::Lazy(_) => f.write_str("Sequence(lazy)"),
            Source::Cursor(cursor) if cursor.is_taken() => f.write_str("Sequence(cursor, consumed)"),
            Source::Cursor(_) => f.write_str("Sequence(cursor)"),
        }
    }
}

impl<V> PartialEq for Sequence<V> {
    /// Two handles are equal if they share the same source.
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.source, &other.source)
    }
}
