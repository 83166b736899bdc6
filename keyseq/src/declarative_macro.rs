//! Declarative macros.

/// Builds a [`PairMap`](crate::PairMap) from `key => value` entries, in order.
///
/// ```rust
/// let map = keyseq::pairs!["a" => 1, 0 => 2];
/// assert_eq!(Some(&1), map.get_name("a"));
/// ```
#[macro_export]
macro_rules! pairs {
    () => {
        $crate::PairMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::PairMap::new();
            $(
                let _ = map.insert($crate::Key::from($key), $value);
            )+
            map
        }
    };
}
