//! Traversal and rewind behavior of sequences built from each kind of input.

use std::cell::Cell;
use std::rc::Rc;

use keyseq::{Error, Input, Key, PairMap, PairSource, Sequence, pairs};

static_assertions::assert_not_impl_any!(Sequence<u32>: Send, Sync);
static_assertions::assert_impl_all!(Sequence<u32>: Clone, Default);
static_assertions::assert_impl_all!(Error: std::error::Error, Send, Sync);

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn counting<I, F>(calls: &Rc<Cell<usize>>, produce: F) -> Sequence<i32>
where
    I: Into<Input<i32>>,
    F: Fn() -> I + 'static,
{
    let calls = Rc::clone(calls);
    Sequence::lazy(move || {
        calls.set(calls.get() + 1);
        produce()
    })
}

#[test]
fn test_materialized_is_rewindable() {
    init_tracing();

    let seq = Sequence::from(pairs!["a" => 1, "b" => 2]);
    assert!(seq.is_materialized());
    assert_eq!(seq.to_array().unwrap(), seq.to_array().unwrap());
    assert_eq!(2, seq.count().unwrap());
}

#[test]
fn test_cursor_fails_second_traversal() {
    init_tracing();

    let seq = Sequence::new(Input::cursor(vec![("x", 1), ("y", 2)]));
    assert_eq!(pairs!["x" => 1, "y" => 2], seq.to_array().unwrap());
    assert!(matches!(seq.to_array(), Err(Error::NotRewindable)));
    assert!(matches!(seq.count(), Err(Error::NotRewindable)));

    // Derived sequences surface the same failure once the cursor is gone.
    let mapped = seq.map(|x, _| x * 2);
    assert!(matches!(mapped.first(), Err(Error::NotRewindable)));
}

#[test]
fn test_cursor_producer_regenerates() {
    init_tracing();

    let calls = Rc::new(Cell::new(0));
    let seq = counting(&calls, || Input::values(vec![1, 2, 3]));
    assert_eq!(0, calls.get());
    for _ in 0..3 {
        assert_eq!(PairMap::from(vec![1, 2, 3]), seq.to_array().unwrap());
    }
    assert_eq!(3, calls.get());
}

#[test]
fn test_materialized_producer_runs_once() {
    init_tracing();

    let calls = Rc::new(Cell::new(0));
    let seq = counting(&calls, || pairs![0 => 7, "k" => 8]);
    assert_eq!(pairs![0 => 7, "k" => 8], seq.to_array().unwrap());
    assert_eq!(pairs![0 => 7, "k" => 8], seq.to_array().unwrap());
    assert_eq!(Some(8), seq.last_or_none().unwrap());
    assert_eq!(1, calls.get());
}

#[test]
fn test_producer_returning_sequence() {
    init_tracing();

    let inner = Sequence::from(vec![4, 5]);
    let calls = Rc::new(Cell::new(0));
    let seq = {
        let inner = inner.clone();
        counting(&calls, move || inner.clone())
    };
    assert_eq!(9.0, seq.sum().unwrap());
    assert_eq!(9.0, seq.sum().unwrap());
    assert_eq!(1, calls.get());
}

#[test]
fn test_try_lazy_error() {
    init_tracing();

    let seq = Sequence::<i32>::try_lazy(|| Err(Error::producer("backend unavailable")));
    let err = seq.filter(|_, _| true).to_array().unwrap_err();
    assert!(matches!(err, Error::Producer(_)));
    assert_eq!("producer failed: backend unavailable", err.to_string());
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_evaluate_freezes_cursor() {
    init_tracing();

    let seq = Sequence::new(Input::values(vec!['p', 'q']));
    let frozen = seq.evaluate().unwrap();
    assert!(frozen.is_materialized());
    assert!(frozen.is_regenerative());
    assert_eq!(frozen.to_array().unwrap(), frozen.to_array().unwrap());
    assert!(matches!(seq.evaluate(), Err(Error::NotRewindable)));
}

struct Countdown(usize);

impl PairSource<usize> for Countdown {
    fn pairs(&self) -> Input<usize> {
        Input::values((1..=self.0).rev())
    }
}

#[test]
fn test_pair_source() {
    init_tracing();

    let seq = Sequence::from_source(Countdown(3));
    assert_eq!(PairMap::from(vec![3, 2, 1]), seq.to_array().unwrap());
    assert_eq!(Key::Index(2), seq.keys().last().unwrap());
    assert_eq!(6.0, seq.sum().unwrap());
}

#[test]
fn test_early_exit_on_infinite_source() {
    init_tracing();

    let pulled = Rc::new(Cell::new(0));
    let naturals = {
        let pulled = Rc::clone(&pulled);
        Sequence::unfold(0_u64, |x, _| x + 1).inspect(move |_, _| pulled.set(pulled.get() + 1))
    };
    assert_eq!(10, naturals.first_where(|x, _| *x * *x > 81).unwrap());
    assert_eq!(11, pulled.get());
    assert!(naturals.any(|x, _| *x == 3).unwrap());

    let mut iter = naturals.iterate().unwrap();
    assert_eq!(Some((Key::Index(0), 0)), iter.next());
    assert_eq!(Some((Key::Index(1), 1)), iter.next());
}
