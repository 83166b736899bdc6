//! [`Input`], [`PairIter`], and [`PairSource`].

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::{Error, Key, OrderedSequence, Pair, PairMap, Sequence};

/// Error slot shared by every adaptor of one traversal.
///
/// A source that fails after the traversal has begun raises here and ends its iterator.
#[derive(Clone, Default)]
pub(crate) struct Fault(Rc<RefCell<Option<Error>>>);

impl Fault {
    /// Records `err`, keeping an earlier one if already raised.
    pub(crate) fn raise(&self, err: Error) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    pub(crate) fn is_raised(&self) -> bool {
        self.0.borrow().is_some()
    }

    fn take(&self) -> Option<Error> {
        self.0.borrow_mut().take()
    }
}

/// A type-erased, single-pass iterator of pairs.
///
/// Returned by [`Sequence::iterate`]. Dropping it releases whatever the producer holds.
///
/// A traversal can fail part way through, for example when a [`Sequence::merge`] reaches a second side that can no
/// longer be traversed. The iterator then ends early and [`PairIter::take_error`] returns the cause.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PairIter<V> {
    inner: Box<dyn Iterator<Item = Pair<V>>>,
    fault: Fault,
}

impl<V> PairIter<V> {
    /// Boxes `iter`.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = Pair<V>> + 'static,
    {
        Self::with_fault(iter, Fault::default())
    }

    /// Boxes `iter`, reporting through an existing traversal's error slot.
    pub(crate) fn with_fault<I>(iter: I, fault: Fault) -> Self
    where
        I: Iterator<Item = Pair<V>> + 'static,
    {
        Self {
            inner: Box::new(iter),
            fault,
        }
    }

    pub(crate) fn fault(&self) -> Fault {
        self.fault.clone()
    }

    /// Takes the error that ended this traversal early, if there was one.
    pub fn take_error(&mut self) -> Option<Error> {
        self.fault.take()
    }
}

impl<V> Iterator for PairIter<V> {
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> fmt::Debug for PairIter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairIter").finish_non_exhaustive()
    }
}

/// Everything a [`Sequence`] can be built from, resolved once at construction.
pub enum Input<V> {
    /// Materialized pairs; re-iterable at no cost.
    Pairs(PairMap<V>),
    /// A single-pass cursor; can only be traversed once.
    Cursor(PairIter<V>),
    /// An existing sequence, used as-is.
    Sequence(Sequence<V>),
}

impl<V> Input<V> {
    /// Single-pass input from `(key, value)` pairs.
    pub fn cursor<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'static,
        K: Into<Key> + 'static,
        V: 'static,
    {
        Self::Cursor(PairIter::new(
            pairs.into_iter().map(|(key, value)| (key.into(), value)),
        ))
    }

    /// Single-pass input from bare values, keyed positionally.
    pub fn values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'static,
        V: 'static,
    {
        Self::Cursor(PairIter::new(
            values.into_iter().enumerate().map(|(i, value)| (Key::Index(i), value)),
        ))
    }
}

impl<V> From<PairMap<V>> for Input<V> {
    fn from(pairs: PairMap<V>) -> Self {
        Self::Pairs(pairs)
    }
}

impl<V> From<Vec<V>> for Input<V> {
    fn from(values: Vec<V>) -> Self {
        Self::Pairs(PairMap::from(values))
    }
}

impl<V> From<Sequence<V>> for Input<V> {
    fn from(sequence: Sequence<V>) -> Self {
        Self::Sequence(sequence)
    }
}

impl<V> From<&Sequence<V>> for Input<V> {
    fn from(sequence: &Sequence<V>) -> Self {
        Self::Sequence(sequence.clone())
    }
}

impl<V> From<OrderedSequence<V>> for Input<V> {
    fn from(ordered: OrderedSequence<V>) -> Self {
        Self::Sequence(ordered.into_sequence())
    }
}

impl<V> From<PairIter<V>> for Input<V> {
    fn from(iter: PairIter<V>) -> Self {
        Self::Cursor(iter)
    }
}

impl<V> fmt::Debug for Input<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pairs(pairs) => f.debug_tuple("Pairs").field(&pairs.len()).finish(),
            Self::Cursor(_) => f.write_str("Cursor"),
            Self::Sequence(sequence) => f.debug_tuple("Sequence").field(sequence).finish(),
        }
    }
}

/// A user collection that can hand out its pairs repeatedly.
///
/// Wrap one with [`Sequence::from_source`] to give it the whole combinator surface.
pub trait PairSource<V> {
    /// Returns the pairs for one traversal.
    fn pairs(&self) -> Input<V>;
}
