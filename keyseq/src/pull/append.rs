use core::iter::Fuse;

use crate::{Key, Pair};

/// Iterator emitting all of `iter`, then `element` keyed by the next free index.
///
/// The next free index is one past the largest [`Key::Index`] seen, or `0` if there were none. It saturates at
/// `usize::MAX`, so appending after that key reuses it.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Append<I, V> {
    iter: Fuse<I>,
    element: Option<V>,
    next_index: usize,
}

impl<I, V> Append<I, V>
where
    I: Iterator<Item = Pair<V>>,
{
    /// Creates with source `iter` and the trailing `element`.
    pub fn new(iter: I, element: V) -> Self {
        Self {
            iter: iter.fuse(),
            element: Some(element),
            next_index: 0,
        }
    }
}

impl<I, V> Iterator for Append<I, V>
where
    I: Iterator<Item = Pair<V>>,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.iter.next() {
            Some(pair) => {
                if let Key::Index(index) = pair.0 {
                    self.next_index = self.next_index.max(index.saturating_add(1));
                }
                Some(pair)
            }
            None => self
                .element
                .take()
                .map(|element| (Key::Index(self.next_index), element)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let extra = usize::from(self.element.is_some());
        let (lo, hi) = self.iter.size_hint();
        (
            lo.saturating_add(extra),
            hi.and_then(|hi| hi.checked_add(extra)),
        )
    }
}
