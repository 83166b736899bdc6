//! [`Sequence::group_by`].

use rustc_hash::FxHashMap;

use crate::{Input, Key, PairIter, Sequence};

impl<V> Sequence<V>
where
    V: Clone + 'static,
{
    /// Buckets the values by `hasher(&value, &key)`.
    ///
    /// Yields one `(group_key, group)` pair per distinct group key, in the order each key is first seen. Each group
    /// is a materialized sequence of the bucketed values in traversal order, keyed positionally; the original keys
    /// are dropped. Grouping runs on every traversal of the result.
    pub fn group_by<K, F>(&self, hasher: F) -> Sequence<Sequence<V>>
    where
        K: Into<Key>,
        F: Fn(&V, &Key) -> K + 'static,
    {
        let upstream = self.clone();
        Sequence::try_lazy(move || {
            let buckets = upstream.drive(|pairs| {
                let mut buckets = Vec::<(Key, Vec<V>)>::new();
                let mut positions = FxHashMap::<Key, usize>::default();
                for (key, value) in pairs {
                    let group = hasher(&value, &key).into();
                    let pos = *positions.entry(group).or_insert_with_key(|group| {
                        buckets.push((group.clone(), Vec::new()));
                        buckets.len() - 1
                    });
                    buckets[pos].1.push(value);
                }
                buckets
            })?;
            tracing::trace!(groups = buckets.len(), "Grouped.");
            Ok(Input::Cursor(PairIter::new(
                buckets
                    .into_iter()
                    .map(|(group, values)| (group, Sequence::from(values))),
            )))
        })
    }
}
