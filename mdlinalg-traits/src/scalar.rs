//! Scalar type bounds for the kernel layer.

/// Shared trait bounds for all element types usable with the kernel layer,
/// independent of GEMM backend.
///
/// `ScalarBase` does **not** require [`crate::Conjugate`]. This allows custom
/// scalar types (e.g., semiring types) to satisfy kernel bounds without
/// implementing conjugation.
pub trait ScalarBase:
    Copy
    + Send
    + Sync
    + std::ops::Mul<Output = Self>
    + std::ops::Add<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
{
}

impl<T> ScalarBase for T where
    T: Copy
        + Send
        + Sync
        + std::ops::Mul<Output = T>
        + std::ops::Add<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_scalar_base<T: ScalarBase>() {}

    #[test]
    fn test_standard_types() {
        assert_scalar_base::<f32>();
        assert_scalar_base::<f64>();
        assert_scalar_base::<i32>();
        assert_scalar_base::<i64>();
        assert_scalar_base::<num_complex::Complex32>();
        assert_scalar_base::<num_complex::Complex64>();
    }

    #[test]
    fn test_custom_type() {
        // A custom type that implements the arithmetic traits but NOT
        // Conjugate still satisfies ScalarBase.
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct MaxPlus(f64);

        impl std::ops::Add for MaxPlus {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                MaxPlus(self.0.max(rhs.0))
            }
        }

        impl std::ops::Mul for MaxPlus {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                MaxPlus(self.0 + rhs.0)
            }
        }

        impl num_traits::Zero for MaxPlus {
            fn zero() -> Self {
                MaxPlus(f64::NEG_INFINITY)
            }
            fn is_zero(&self) -> bool {
                self.0 == f64::NEG_INFINITY
            }
        }

        impl num_traits::One for MaxPlus {
            fn one() -> Self {
                MaxPlus(0.0)
            }
        }

        assert_scalar_base::<MaxPlus>();
    }
}
