//! Complex conjugation applied lazily through view accessors.
//!
//! Conjugation is the only element-wise transformation the accessor layer
//! needs; transposition is a layout property, not an element property, so it
//! never touches values.

use num_complex::Complex;
use num_traits::Num;

/// Trait for types that support complex conjugation.
///
/// The default implementation returns `self` unchanged, so real-valued types
/// (and custom types with no complex structure) can simply write:
/// ```ignore
/// impl Conjugate for MyType {}
/// ```
pub trait Conjugate: Copy {
    #[inline(always)]
    fn conj(self) -> Self {
        self
    }
}

// Real types: use the default identity implementation
macro_rules! impl_conjugate_real {
    ($($t:ty),*) => {
        $(impl Conjugate for $t {})*
    };
}

impl_conjugate_real!(
    f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

// Complex types: override with actual conjugation
impl<T: Num + Copy + std::ops::Neg<Output = T>> Conjugate for Complex<T> {
    #[inline(always)]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}
