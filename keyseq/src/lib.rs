#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod combinators;
mod declarative_macro;
mod error;
mod group;
mod input;
mod key;
mod lazy;
mod order;
mod pair_map;
pub mod pull;
mod sequence;
mod terminal;
mod traits;

#[cfg(feature = "json")]
mod json;

pub use error::{Error, Result};
pub use input::{Input, PairIter, PairSource};
pub use key::{Key, Pair};
pub use order::OrderedSequence;
pub use pair_map::PairMap;
pub use sequence::Sequence;
pub use traits::{Nullable, Numeric};
