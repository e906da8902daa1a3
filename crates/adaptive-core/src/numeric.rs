//! Numeric input types accepted as sample coordinates and weights
//!
//! Columns read by callers are often integer or single-precision. They are
//! widened to `f64` once, when a sample is built; the partition engines only
//! ever see `f64`.

use num_traits::{Num, ToPrimitive};
use std::fmt::Debug;

/// Base trait for numeric types that can be turned into sample coordinates
pub trait Numeric: Num + ToPrimitive + Copy + PartialOrd + Debug + Send + Sync {
    /// Check if value is finite (always true for integers)
    fn is_finite(&self) -> bool;

    /// Convert to f64
    fn to_f64(&self) -> f64;
}

macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn is_finite(&self) -> bool {
                    true // Integers are always finite
                }

                fn to_f64(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

impl_numeric_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl Numeric for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn to_f64(&self) -> f64 {
        *self
    }
}

impl Numeric for f32 {
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }

    fn to_f64(&self) -> f64 {
        *self as f64
    }
}

/// Widen a slice of numeric values to `f64`
pub fn widen<T: Numeric>(values: &[T]) -> Vec<f64> {
    values.iter().map(Numeric::to_f64).collect()
}
