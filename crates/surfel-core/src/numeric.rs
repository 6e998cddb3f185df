//! Integer trait used to parameterize digital spaces
//!
//! Digital coordinates live on an integer lattice. Any signed primitive integer
//! with ordered arithmetic can serve as the coordinate type of a [`Space`].
//!
//! [`Space`]: crate::space::Space

use num_traits::{PrimInt, Signed};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Base trait for the integer type of a digital space
pub trait DigitalInteger:
    PrimInt + Signed + Hash + Debug + Display + Default + Send + Sync + 'static
{
    /// Short name used when displaying spaces
    const NAME: &'static str;

    /// Convert to floating point for embedding and metric computations
    fn as_f64(self) -> f64;

    /// Convert from a machine integer, `None` on overflow
    fn try_from_i64(val: i64) -> Option<Self>;

    /// Lossless widening used by Khalimsky coordinate arithmetic
    fn as_i64(self) -> i64;
}

impl DigitalInteger for i16 {
    const NAME: &'static str = "i16";

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn try_from_i64(val: i64) -> Option<Self> {
        i16::try_from(val).ok()
    }

    fn as_i64(self) -> i64 {
        self as i64
    }
}

impl DigitalInteger for i32 {
    const NAME: &'static str = "i32";

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn try_from_i64(val: i64) -> Option<Self> {
        i32::try_from(val).ok()
    }

    fn as_i64(self) -> i64 {
        self as i64
    }
}

impl DigitalInteger for i64 {
    const NAME: &'static str = "i64";

    fn as_f64(self) -> f64 {
        self as f64
    }

    fn try_from_i64(val: i64) -> Option<Self> {
        Some(val)
    }

    fn as_i64(self) -> i64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digital_integer_conversions() {
        assert_eq!(DigitalInteger::as_f64(-3i32), -3.0);
        assert_eq!(<i16 as DigitalInteger>::try_from_i64(40_000), None);
        assert_eq!(<i16 as DigitalInteger>::try_from_i64(-7), Some(-7));
        assert_eq!(<i64 as DigitalInteger>::try_from_i64(i64::MAX), Some(i64::MAX));
        assert_eq!(DigitalInteger::as_i64(12i32), 12);
    }

    #[test]
    fn test_names() {
        assert_eq!(<i32 as DigitalInteger>::NAME, "i32");
        assert_eq!(<i64 as DigitalInteger>::NAME, "i64");
    }
}
