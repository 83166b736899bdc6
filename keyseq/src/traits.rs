//! Sealed value traits used by [`Sequence::compact`](crate::Sequence::compact) and
//! [`Sequence::sum`](crate::Sequence::sum).

use sealed::sealed;

/// A value type with an absent sentinel.
#[sealed]
pub trait Nullable {
    /// The value type once absent values are removed.
    type Present;

    /// Returns the present value, or `None` for the sentinel.
    fn into_present(self) -> Option<Self::Present>;
}

#[sealed]
impl<T> Nullable for Option<T> {
    type Present = T;

    fn into_present(self) -> Option<T> {
        self
    }
}

#[cfg(feature = "json")]
#[sealed]
impl Nullable for serde_json::Value {
    type Present = serde_json::Value;

    fn into_present(self) -> Option<serde_json::Value> {
        if self.is_null() { None } else { Some(self) }
    }
}

/// A numeric value that can be accumulated as `f64`.
#[sealed]
pub trait Numeric {
    /// Converts to `f64`, rounding if needed.
    fn to_f64(&self) -> f64;
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            #[sealed]
            impl Numeric for $ty {
                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}
impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[sealed]
impl<T: Numeric> Numeric for &T {
    fn to_f64(&self) -> f64 {
        T::to_f64(self)
    }
}
