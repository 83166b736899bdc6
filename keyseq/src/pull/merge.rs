use core::iter::Fuse;

use rustc_hash::FxHashSet;

use crate::input::Fault;
use crate::{Key, Pair, PairIter, Sequence};

enum Second<V> {
    /// Not begun; `first` still has pairs.
    Pending(Sequence<V>),
    Started(PairIter<V>),
    Done,
}

/// Iterator emitting all of `first`, then the pairs of `second` whose name was not emitted by `first`.
///
/// `second` is only begun once `first` is exhausted, so a short-circuited traversal never touches it. If it cannot
/// be begun at that point the iterator ends and the error is reported through [`PairIter::take_error`].
///
/// Index-keyed pairs from either side always pass through with their keys unchanged.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Merge<V> {
    first: Fuse<PairIter<V>>,
    second: Second<V>,
    /// Names emitted by `first`.
    seen: FxHashSet<String>,
    fault: Fault,
}

impl<V> Merge<V>
where
    V: Clone + 'static,
{
    /// Creates from the winning, already begun `first` and the fallback `second`.
    pub fn new(first: PairIter<V>, second: Sequence<V>) -> Self {
        Self {
            fault: first.fault(),
            first: first.fuse(),
            second: Second::Pending(second),
            seen: FxHashSet::default(),
        }
    }

    /// Wraps into a [`PairIter`] sharing the error slot of `first`.
    pub(crate) fn into_pair_iter(self) -> PairIter<V> {
        let fault = self.fault.clone();
        PairIter::with_fault(self, fault)
    }
}

impl<V> Iterator for Merge<V>
where
    V: Clone + 'static,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((key, value)) = self.first.next() {
            if let Key::Name(name) = &key {
                self.seen.insert(name.clone());
            }
            return Some((key, value));
        }

        loop {
            match core::mem::replace(&mut self.second, Second::Done) {
                Second::Pending(_) if self.fault.is_raised() => return None,
                Second::Pending(sequence) => match sequence.iterate() {
                    Ok(iter) => self.second = Second::Started(iter),
                    Err(err) => {
                        tracing::debug!(error = %err, "Could not begin second side of merge.");
                        self.fault.raise(err);
                        return None;
                    }
                },
                Second::Started(mut iter) => {
                    let seen = &self.seen;
                    let found = iter.find(|(key, _)| match key {
                        Key::Name(name) => !seen.contains(name),
                        Key::Index(_) => true,
                    });
                    if found.is_some() {
                        self.second = Second::Started(iter);
                    } else if let Some(err) = iter.take_error() {
                        self.fault.raise(err);
                    }
                    return found;
                }
                Second::Done => return None,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.first.size_hint().0, None)
    }
}
