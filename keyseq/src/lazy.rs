//! [`LazyPairs`], [`Cursor`], and related items.

use core::cell::RefCell;

use crate::{Error, Input, PairIter, Result, Sequence};

/// A zero-argument factory returning a fresh input each time it is called.
pub(crate) type Producer<V> = dyn Fn() -> Result<Input<V>>;

/// What the last producer invocation handed back, which decides how the next traversal begins.
enum Rewind<V> {
    /// The producer has never been invoked.
    Unstarted,
    /// The last input could only be traversed once; the producer must run again.
    SinglePass,
    /// The last input is re-iterable in place.
    Reusable(Sequence<V>),
}

/// Bridges a [`Producer`] to repeatable traversal.
pub(crate) struct LazyPairs<V> {
    producer: Box<Producer<V>>,
    state: RefCell<Rewind<V>>,
}

impl<V> LazyPairs<V>
where
    V: Clone + 'static,
{
    pub(crate) fn new(producer: Box<Producer<V>>) -> Self {
        Self {
            producer,
            state: RefCell::new(Rewind::Unstarted),
        }
    }

    /// Begins a traversal, reusing the cached input if it can be restarted, otherwise invoking the producer.
    pub(crate) fn begin(&self) -> Result<PairIter<V>> {
        if let Some(reusable) = self.reusable() {
            tracing::trace!("Restarting cached input.");
            return reusable.iterate();
        }

        tracing::trace!("Invoking producer.");
        let input = (self.producer)()?;
        let (state, iter) = match input {
            Input::Pairs(pairs) => {
                let sequence = Sequence::materialized(pairs);
                let iter = sequence.iterate()?;
                (Rewind::Reusable(sequence), iter)
            }
            Input::Sequence(sequence) if sequence.is_regenerative() => {
                let iter = sequence.iterate()?;
                (Rewind::Reusable(sequence), iter)
            }
            Input::Sequence(sequence) => (Rewind::SinglePass, sequence.iterate()?),
            Input::Cursor(iter) => (Rewind::SinglePass, iter),
        };
        *self.state.borrow_mut() = state;
        Ok(iter)
    }

    /// The cached input, if the last one obtained can be restarted.
    pub(crate) fn reusable(&self) -> Option<Sequence<V>> {
        match &*self.state.borrow() {
            Rewind::Reusable(sequence) => Some(sequence.clone()),
            Rewind::Unstarted | Rewind::SinglePass => None,
        }
    }
}

/// A single-pass source handed over directly, without a producer to regenerate it.
pub(crate) struct Cursor<V> {
    iter: RefCell<Option<PairIter<V>>>,
}

impl<V> Cursor<V> {
    pub(crate) fn new(iter: PairIter<V>) -> Self {
        Self {
            iter: RefCell::new(Some(iter)),
        }
    }

    /// Hands out the cursor the first time; every later call fails with [`Error::NotRewindable`].
    pub(crate) fn take(&self) -> Result<PairIter<V>> {
        self.iter.borrow_mut().take().ok_or_else(|| {
            tracing::debug!("Single-pass cursor was already traversed.");
            Error::NotRewindable
        })
    }

    pub(crate) fn is_taken(&self) -> bool {
        self.iter.borrow().is_none()
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{Key, PairMap};

    fn counting<F>(calls: &Rc<Cell<usize>>, make: F) -> LazyPairs<u32>
    where
        F: Fn() -> Input<u32> + 'static,
    {
        let calls = Rc::clone(calls);
        LazyPairs::new(Box::new(move || {
            calls.set(calls.get() + 1);
            Ok(make())
        }))
    }

    #[test]
    fn test_materialized_input_is_reused() {
        let calls = Rc::new(Cell::new(0));
        let lazy = counting(&calls, || Input::from(vec![1, 2, 3]));
        assert_eq!(0, calls.get());

        for _ in 0..3 {
            let values: Vec<_> = lazy.begin().unwrap().map(|(_, v)| v).collect();
            assert_eq!(vec![1, 2, 3], values);
        }
        assert_eq!(1, calls.get());
        assert!(lazy.reusable().is_some());
    }

    #[test]
    fn test_cursor_input_is_regenerated() {
        let calls = Rc::new(Cell::new(0));
        let lazy = counting(&calls, || Input::values(vec![1, 2, 3]));

        for round in 1..=3 {
            let values: Vec<_> = lazy.begin().unwrap().map(|(_, v)| v).collect();
            assert_eq!(vec![1, 2, 3], values);
            assert_eq!(round, calls.get());
        }
        assert!(lazy.reusable().is_none());
    }

    #[test]
    fn test_producer_error_propagates() {
        let lazy: LazyPairs<u32> =
            LazyPairs::new(Box::new(|| Err(Error::invalid_input("not today"))));
        assert!(matches!(lazy.begin(), Err(Error::InvalidInput { .. })));
        assert!(lazy.reusable().is_none());
    }

    #[test]
    fn test_cursor_takes_once() {
        let cursor = Cursor::new(PairIter::new(
            PairMap::from(vec!['a']).into_iter(),
        ));
        assert!(!cursor.is_taken());
        assert_eq!(
            vec![(Key::Index(0), 'a')],
            cursor.take().unwrap().collect::<Vec<_>>()
        );
        assert!(cursor.is_taken());
        assert!(matches!(cursor.take(), Err(Error::NotRewindable)));
    }
}
