use core::hash::Hash;

use rustc_hash::FxHashSet;

use crate::Pair;

/// Iterator keeping only the first pair for each distinct `hasher(&value, &key)`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Unique<I, Func, H> {
    iter: I,
    hasher: Func,
    seen: FxHashSet<H>,
}

impl<I, Func, H, V> Unique<I, Func, H>
where
    I: Iterator<Item = Pair<V>>,
    Func: FnMut(&V, &crate::Key) -> H,
    H: Eq + Hash,
{
    /// Creates with source `iter` and the `hasher` deciding which pairs are duplicates.
    pub fn new(iter: I, hasher: Func) -> Self {
        Self {
            iter,
            hasher,
            seen: FxHashSet::default(),
        }
    }
}

impl<I, Func, H, V> Iterator for Unique<I, Func, H>
where
    I: Iterator<Item = Pair<V>>,
    Func: FnMut(&V, &crate::Key) -> H,
    H: Eq + Hash,
{
    type Item = Pair<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let Self { iter, hasher, seen } = self;
        iter.find(|(key, value)| seen.insert((hasher)(value, key)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Key, PairMap, pairs};

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let input = pairs![0 => 0, "x" => 2, 1 => 1, 2 => 2, "y" => 2, 3 => 3];
        let got: PairMap<_> = Unique::new(input.into_iter(), |v: &i32, _: &Key| *v).collect();
        assert_eq!(pairs![0 => 0, "x" => 2, 1 => 1, 3 => 3], got);
    }

    #[test]
    fn test_unique_by_key() {
        let input = pairs![0 => 'a', 1 => 'b', "k" => 'c'];
        let got: Vec<_> = Unique::new(input.into_iter(), |_: &char, k: &Key| k.is_index())
            .map(|(_, v)| v)
            .collect();
        assert_eq!(vec!['a', 'c'], got);
    }
}
