//! [`Key`] and [`Pair`].

use core::fmt;

/// The key half of a [`Pair`].
///
/// Keys are either positional indices or names. The derived ordering puts every index before every name, compares
/// indices numerically and names lexicographically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Key {
    /// A non-negative positional key.
    Index(usize),
    /// A string key. Unique within a materialized [`PairMap`](crate::PairMap).
    Name(String),
}

impl Key {
    /// Returns the index if this is an [`Key::Index`].
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) => None,
        }
    }

    /// Returns the name if this is a [`Key::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(name) => Some(name),
        }
    }

    /// Returns `true` for positional keys.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

/// A `(key, value)` element of a sequence.
pub type Pair<V> = (Key, V);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![Key::from("b"), Key::from(10), Key::from("a"), Key::from(2)];
        keys.sort();
        assert_eq!(
            vec![Key::from(2), Key::from(10), Key::from("a"), Key::from("b")],
            keys
        );
    }

    #[test]
    fn test_key_display() {
        assert_eq!("7", Key::Index(7).to_string());
        assert_eq!("seven", Key::from("seven").to_string());
    }
}
