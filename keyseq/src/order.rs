//! [`OrderedSequence`] and the multi-key ordering passes behind [`Sequence::order_by`].

use core::cmp::Ordering;
use core::fmt;
use core::ops::Deref;
use std::rc::Rc;

use itertools::Itertools;

use crate::{Input, Key, Pair, PairIter, Sequence};

/// One stable single-key sort over a snapshot of pairs.
type SortPass<V> = Rc<dyn Fn(Vec<Pair<V>>) -> Vec<Pair<V>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

fn sort_pass<V, H, F>(hasher: F, direction: Direction) -> SortPass<V>
where
    V: 'static,
    H: PartialOrd + 'static,
    F: Fn(&V, &Key) -> H + 'static,
{
    Rc::new(move |pairs: Vec<Pair<V>>| {
        let keys = pairs
            .iter()
            .map(|(key, value)| hasher(value, key))
            .collect::<Vec<_>>();
        let order = (0..pairs.len()).sorted_by(|&a, &b| {
            let (a, b) = match direction {
                Direction::Ascending => (&keys[a], &keys[b]),
                Direction::Descending => (&keys[b], &keys[a]),
            };
            // Incomparable keys (NaN) keep their relative order.
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        });
        let mut slots = pairs.into_iter().map(Some).collect::<Vec<_>>();
        order.filter_map(|i| slots[i].take()).collect()
    })
}

/// A [`Sequence`] with a multi-key ordering.
///
/// Built by [`Sequence::order_by`] and refined with [`OrderedSequence::then_by`]. The ordering is recomputed on
/// every traversal: the inner sequence is snapshotted with [`Sequence::to_array`] and each sort pass is applied in
/// turn. Because the passes are stable, the `order_by` key dominates and each `then_by` key breaks ties among the
/// keys before it.
///
/// Dereferences to [`Sequence`], so every combinator is available after ordering.
pub struct OrderedSequence<V> {
    inner: Sequence<V>,
    /// Applied front to back; the `order_by` pass is always last.
    passes: Rc<[SortPass<V>]>,
    sequence: Sequence<V>,
}

impl<V> OrderedSequence<V>
where
    V: Clone + 'static,
{
    fn with_passes(inner: Sequence<V>, passes: Rc<[SortPass<V>]>) -> Self {
        let sequence = {
            let inner = inner.clone();
            let passes = Rc::clone(&passes);
            Sequence::try_lazy(move || {
                let snapshot = inner.to_array()?.into_pairs();
                tracing::trace!(len = snapshot.len(), passes = passes.len(), "Ordering snapshot.");
                let sorted = passes.iter().fold(snapshot, |pairs, pass| pass(pairs));
                Ok(Input::Cursor(PairIter::new(sorted.into_iter())))
            })
        };
        Self {
            inner,
            passes,
            sequence,
        }
    }

    fn then_with(&self, pass: SortPass<V>) -> Self {
        let passes = core::iter::once(pass)
            .chain(self.passes.iter().cloned())
            .collect::<Rc<[_]>>();
        Self::with_passes(self.inner.clone(), passes)
    }

    /// Breaks ties of the existing ordering by `hasher(&value, &key)`, ascending.
    pub fn then_by<H, F>(&self, hasher: F) -> Self
    where
        H: PartialOrd + 'static,
        F: Fn(&V, &Key) -> H + 'static,
    {
        self.then_with(sort_pass(hasher, Direction::Ascending))
    }

    /// Breaks ties of the existing ordering by `hasher(&value, &key)`, descending.
    pub fn then_by_descending<H, F>(&self, hasher: F) -> Self
    where
        H: PartialOrd + 'static,
        F: Fn(&V, &Key) -> H + 'static,
    {
        self.then_with(sort_pass(hasher, Direction::Descending))
    }
}

impl<V> OrderedSequence<V> {
    /// The ordered pairs as a plain [`Sequence`].
    pub fn into_sequence(self) -> Sequence<V> {
        self.sequence
    }
}

impl<V> Clone for OrderedSequence<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            passes: Rc::clone(&self.passes),
            sequence: self.sequence.clone(),
        }
    }
}

impl<V> Deref for OrderedSequence<V> {
    type Target = Sequence<V>;

    fn deref(&self) -> &Self::Target {
        &self.sequence
    }
}

impl<V> From<OrderedSequence<V>> for Sequence<V> {
    fn from(ordered: OrderedSequence<V>) -> Self {
        ordered.into_sequence()
    }
}

impl<V> fmt::Debug for OrderedSequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSequence")
            .field("inner", &self.inner)
            .field("passes", &self.passes.len())
            .finish()
    }
}

impl<V> Sequence<V>
where
    V: Clone + 'static,
{
    /// Orders the pairs by `hasher(&value, &key)`, ascending. Keys are preserved.
    ///
    /// The sort is stable, and keys that are not comparable (such as `f64::NAN`) are treated as equal.
    pub fn order_by<H, F>(&self, hasher: F) -> OrderedSequence<V>
    where
        H: PartialOrd + 'static,
        F: Fn(&V, &Key) -> H + 'static,
    {
        OrderedSequence::with_passes(self.clone(), Rc::from([sort_pass(hasher, Direction::Ascending)]))
    }

    /// Orders the pairs by `hasher(&value, &key)`, descending. Keys are preserved.
    pub fn order_by_descending<H, F>(&self, hasher: F) -> OrderedSequence<V>
    where
        H: PartialOrd + 'static,
        F: Fn(&V, &Key) -> H + 'static,
    {
        OrderedSequence::with_passes(self.clone(), Rc::from([sort_pass(hasher, Direction::Descending)]))
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;

    use super::*;
    use crate::{PairMap, pairs};

    fn scored() -> Sequence<(i32, i32)> {
        Sequence::from(pairs!["a" => (9, 10), "b" => (2, 30), "c" => (2, 1)])
    }

    fn names<V: Clone + 'static>(seq: &Sequence<V>) -> Vec<Key> {
        seq.to_array().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_order_by_keeps_keys() {
        let seq = Sequence::from(vec![3, 1, 2]);
        assert_eq!(pairs![1 => 1, 2 => 2, 0 => 3], seq.order_by(|x, _| *x).to_array().unwrap());
        assert_eq!(
            pairs![0 => 3, 2 => 2, 1 => 1],
            seq.order_by_descending(|x, _| *x).to_array().unwrap()
        );
    }

    #[test]
    fn test_then_by() {
        let seq = scored();
        assert_eq!(
            vec![Key::from("c"), Key::from("b"), Key::from("a")],
            names(&seq.order_by(|x, _| x.0).then_by(|x, _| x.1))
        );
        assert_eq!(
            vec![Key::from("b"), Key::from("c"), Key::from("a")],
            names(&seq.order_by(|x, _| x.0).then_by_descending(|x, _| x.1))
        );
        assert_eq!(
            vec![Key::from("a"), Key::from("b"), Key::from("c")],
            names(&seq.order_by_descending(|x, _| x.0).then_by_descending(|x, _| x.1))
        );
    }

    #[test]
    fn test_then_by_does_not_mutate_receiver() {
        let ordered = scored().order_by(|x, _| x.0);
        let _refined = ordered.then_by(|x, _| x.1);
        assert_eq!(
            vec![Key::from("b"), Key::from("c"), Key::from("a")],
            names(&ordered)
        );
    }

    #[test]
    fn test_order_by_is_stable_and_nan_tolerant() {
        let seq = Sequence::from(vec![1.0, f64::NAN, 0.5, 1.0]);
        let got = seq.order_by(|_, _| 0).to_array().unwrap();
        assert_eq!(
            vec![Key::Index(0), Key::Index(1), Key::Index(2), Key::Index(3)],
            got.keys().cloned().collect::<Vec<_>>()
        );
        assert_eq!(4, seq.order_by(|x, _| *x).count().unwrap());
    }

    #[test]
    fn test_reordering_each_traversal() {
        let drives = Rc::new(Cell::new(0));
        let source = {
            let drives = Rc::clone(&drives);
            Sequence::lazy(move || {
                drives.set(drives.get() + 1);
                Input::values(vec![2, 3, 1])
            })
        };
        let ordered = source.order_by(|x, _| *x);
        assert_eq!(0, drives.get());
        let expected = pairs![2 => 1, 0 => 2, 1 => 3];
        assert_eq!(expected, ordered.to_array().unwrap());
        assert_eq!(expected, ordered.to_array().unwrap());
        assert_eq!(2, drives.get());
        assert_eq!(
            PairMap::from(vec![1, 2, 3]),
            ordered.values().to_array().unwrap()
        );
    }
}
