//! Symmetric matrix products.
//!
//! `A` is square and symmetric with only one triangle stored ([`Triangle`]);
//! reads of the unstored triangle reflect the index pair into the stored one,
//! so the unstored half may hold arbitrary values. Overwriting forms compute
//! `C := A * B` (left) / `C := B * A` (right).
//!
//! The update forms (`C := E + A * B`) are recognized but unsupported: they
//! panic unconditionally rather than computing a wrong or partial result.

use mdlinalg_view::{extents_match, MatrixView, MatrixViewMut};

use crate::exec::{DefaultExec, ExecContext, ExecPolicy};
use crate::provider::KernelProvider;
use crate::{Scalar, Triangle};

/// `C := A * B`, `A` symmetric, under the default execution context.
pub fn symmetric_matrix_left_product<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    symmetric_matrix_left_product_with(DefaultExec, a, triangle, b, c);
}

/// `C := A * B`, `A` symmetric, under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn symmetric_matrix_left_product_with<
    P,
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        left_product_ref(a, triangle, b, c);
    } else {
        policy
            .into_context()
            .symmetric_matrix_left_product(a, triangle, b, c);
    }
}

/// `C := B * A`, `A` symmetric, under the default execution context.
pub fn symmetric_matrix_right_product<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    symmetric_matrix_right_product_with(DefaultExec, a, triangle, b, c);
}

/// `C := B * A`, `A` symmetric, under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn symmetric_matrix_right_product_with<
    P,
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        right_product_ref(a, triangle, b, c);
    } else {
        policy
            .into_context()
            .symmetric_matrix_right_product(a, triangle, b, c);
    }
}

/// `C := E + A * B`, `A` symmetric. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn symmetric_matrix_left_product_update<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RE: usize,
    const CE: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    symmetric_matrix_left_product_update_with(DefaultExec, a, triangle, b, e, c);
}

/// `C := E + A * B`, `A` symmetric. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn symmetric_matrix_left_product_update_with<
    P,
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RE: usize,
    const CE: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        left_product_update_ref(a, triangle, b, e, c);
    } else {
        policy
            .into_context()
            .symmetric_matrix_left_product_update(a, triangle, b, e, c);
    }
}

/// `C := E + B * A`, `A` symmetric. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn symmetric_matrix_right_product_update<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RE: usize,
    const CE: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    symmetric_matrix_right_product_update_with(DefaultExec, a, triangle, b, e, c);
}

/// `C := E + B * A`, `A` symmetric. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn symmetric_matrix_right_product_update_with<
    P,
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RE: usize,
    const CE: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        right_product_update_ref(a, triangle, b, e, c);
    } else {
        policy
            .into_context()
            .symmetric_matrix_right_product_update(a, triangle, b, e, c);
    }
}

pub(crate) fn left_product_ref<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, CA), "symmetric operand must be square");
        assert!(extents_match(CA, RB), "static inner extent mismatch");
        assert!(extents_match(RB, RC), "static row extent mismatch");
        assert!(extents_match(CB, CC), "static column extent mismatch");
    }

    let m = c.extent(0);
    let n = c.extent(1);
    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            for k in 0..m {
                // A(i, k), reflected into the stored triangle by symmetry
                let aik = if Tr::LOWER {
                    if i <= k {
                        a.get(k, i)
                    } else {
                        a.get(i, k)
                    }
                } else if i >= k {
                    a.get(k, i)
                } else {
                    a.get(i, k)
                };
                sum = sum + aik * b.get(k, j);
            }
            c.set(i, j, sum);
        }
    }
}

pub(crate) fn right_product_ref<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, CA), "symmetric operand must be square");
        assert!(extents_match(CB, RA), "static inner extent mismatch");
        assert!(extents_match(RB, RC), "static row extent mismatch");
        assert!(extents_match(CA, CC), "static column extent mismatch");
    }

    let m = c.extent(0);
    let n = c.extent(1);
    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            for k in 0..n {
                // A(k, j), reflected into the stored triangle by symmetry
                let akj = if Tr::LOWER {
                    if j <= k {
                        a.get(k, j)
                    } else {
                        a.get(j, k)
                    }
                } else if j >= k {
                    a.get(k, j)
                } else {
                    a.get(j, k)
                };
                sum = sum + b.get(i, k) * akj;
            }
            c.set(i, j, sum);
        }
    }
}

pub(crate) fn left_product_update_ref<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RE: usize,
    const CE: usize,
    const RC: usize,
    const CC: usize,
>(
    _a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    _b: &MatrixView<'_, T, RB, CB>,
    _e: &MatrixView<'_, T, RE, CE>,
    _c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    unimplemented!("symmetric matrix product update is not supported");
}

pub(crate) fn right_product_update_ref<
    T: Scalar,
    Tr: Triangle,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RE: usize,
    const CE: usize,
    const RC: usize,
    const CC: usize,
>(
    _a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    _b: &MatrixView<'_, T, RB, CB>,
    _e: &MatrixView<'_, T, RE, CE>,
    _c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    unimplemented!("symmetric matrix product update is not supported");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LowerTriangle, UpperTriangle};
    use mdlinalg_view::Matrix;

    fn sym_full(n: usize) -> Matrix<f64> {
        Matrix::from_fn(n, n, |i, j| ((i + 1) * (j + 1)) as f64)
    }

    fn dense_mul(a: &Matrix<f64>, b: &Matrix<f64>) -> Matrix<f64> {
        Matrix::from_fn(a.rows(), b.cols(), |i, j| {
            (0..a.cols())
                .map(|k| a.get(i, k) * b.get(k, j))
                .sum::<f64>()
        })
    }

    #[test]
    fn test_left_lower_with_poisoned_upper() {
        let n = 3;
        let full = sym_full(n);
        let stored = Matrix::from_fn(n, n, |i, j| {
            if i >= j {
                full.get(i, j)
            } else {
                f64::NAN
            }
        });
        let b = Matrix::from_fn(n, 2, |i, j| (i * 2 + j + 1) as f64);
        let mut c = Matrix::zeros(n, 2);
        symmetric_matrix_left_product(&stored.view(), LowerTriangle, &b.view(), &mut c.view_mut());
        assert_eq!(c, dense_mul(&full, &b));
    }

    #[test]
    fn test_left_upper_with_poisoned_lower() {
        let n = 3;
        let full = sym_full(n);
        let stored = Matrix::from_fn(n, n, |i, j| {
            if i <= j {
                full.get(i, j)
            } else {
                f64::NAN
            }
        });
        let b = Matrix::from_fn(n, 2, |i, j| (i + 3 * j) as f64);
        let mut c = Matrix::zeros(n, 2);
        symmetric_matrix_left_product(&stored.view(), UpperTriangle, &b.view(), &mut c.view_mut());
        assert_eq!(c, dense_mul(&full, &b));
    }

    #[test]
    fn test_right_lower() {
        let n = 3;
        let full = sym_full(n);
        let stored = Matrix::from_fn(n, n, |i, j| {
            if i >= j {
                full.get(i, j)
            } else {
                f64::NAN
            }
        });
        let b = Matrix::from_fn(2, n, |i, j| (4 * i + j + 1) as f64);
        let mut c = Matrix::zeros(2, n);
        symmetric_matrix_right_product(&stored.view(), LowerTriangle, &b.view(), &mut c.view_mut());
        assert_eq!(c, dense_mul(&b, &full));
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn test_left_update_panics() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<f64>::zeros(2, 2);
        let e = Matrix::<f64>::zeros(2, 2);
        let mut c = Matrix::<f64>::zeros(2, 2);
        symmetric_matrix_left_product_update(
            &a.view(),
            LowerTriangle,
            &b.view(),
            &e.view(),
            &mut c.view_mut(),
        );
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn test_right_update_panics() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<f64>::zeros(2, 2);
        let e = Matrix::<f64>::zeros(2, 2);
        let mut c = Matrix::<f64>::zeros(2, 2);
        symmetric_matrix_right_product_update(
            &a.view(),
            UpperTriangle,
            &b.view(),
            &e.view(),
            &mut c.view_mut(),
        );
    }
}
