//! Pull-based adaptors, i.e. [`Iterator`] helpers used by the combinators.

mod append;
pub use append::Append;

mod merge;
pub use merge::Merge;

mod unfold;
pub use unfold::Unfold;

mod unique;
pub use unique::Unique;
