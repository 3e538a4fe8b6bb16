//! Hermitian matrix products.
//!
//! Like [`crate::symmetric`], but reads of the unstored triangle conjugate
//! the reflected element: `A(i, k) = conj(A(k, i))`. For real element types
//! conjugation is the identity and these kernels coincide with the symmetric
//! ones.
//!
//! The update forms are recognized but unsupported: they panic
//! unconditionally rather than computing a wrong or partial result.

use mdlinalg_traits::Conjugate;
use mdlinalg_view::{extents_match, MatrixView, MatrixViewMut};

use crate::exec::{DefaultExec, ExecContext, ExecPolicy};
use crate::provider::KernelProvider;
use crate::{Scalar, Triangle};

/// `C := A * B`, `A` Hermitian, under the default execution context.
pub fn hermitian_matrix_left_product<
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
    hermitian_matrix_left_product_with(DefaultExec, a, triangle, b, c);
}

/// `C := A * B`, `A` Hermitian, under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn hermitian_matrix_left_product_with<
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
            .hermitian_matrix_left_product(a, triangle, b, c);
    }
}

/// `C := B * A`, `A` Hermitian, under the default execution context.
pub fn hermitian_matrix_right_product<
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
    hermitian_matrix_right_product_with(DefaultExec, a, triangle, b, c);
}

/// `C := B * A`, `A` Hermitian, under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn hermitian_matrix_right_product_with<
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
            .hermitian_matrix_right_product(a, triangle, b, c);
    }
}

/// `C := E + A * B`, `A` Hermitian. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn hermitian_matrix_left_product_update<
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
    hermitian_matrix_left_product_update_with(DefaultExec, a, triangle, b, e, c);
}

/// `C := E + A * B`, `A` Hermitian. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn hermitian_matrix_left_product_update_with<
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
            .hermitian_matrix_left_product_update(a, triangle, b, e, c);
    }
}

/// `C := E + B * A`, `A` Hermitian. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn hermitian_matrix_right_product_update<
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
    hermitian_matrix_right_product_update_with(DefaultExec, a, triangle, b, e, c);
}

/// `C := E + B * A`, `A` Hermitian. Unsupported: always panics.
#[allow(clippy::too_many_arguments)]
pub fn hermitian_matrix_right_product_update_with<
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
            .hermitian_matrix_right_product_update(a, triangle, b, e, c);
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
        assert!(extents_match(RA, CA), "hermitian operand must be square");
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
                // A(i, k): reflected reads conjugate the stored element
                let aik = if Tr::LOWER {
                    if i <= k {
                        Conjugate::conj(a.get(k, i))
                    } else {
                        a.get(i, k)
                    }
                } else if i >= k {
                    Conjugate::conj(a.get(k, i))
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
        assert!(extents_match(RA, CA), "hermitian operand must be square");
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
                // A(k, j): stored direct, or conj of the mirrored element
                let akj = if Tr::LOWER {
                    if j <= k {
                        a.get(k, j)
                    } else {
                        Conjugate::conj(a.get(j, k))
                    }
                } else if j >= k {
                    a.get(k, j)
                } else {
                    Conjugate::conj(a.get(j, k))
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
    unimplemented!("hermitian matrix product update is not supported");
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
    unimplemented!("hermitian matrix product update is not supported");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LowerTriangle, UpperTriangle};
    use mdlinalg_view::Matrix;
    use num_complex::Complex64;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    // Hermitian A with real diagonal; full dense form for cross-checking.
    // Off the diagonal, (i+j) + (i-j)i satisfies A(i,j) = conj(A(j,i)).
    fn herm_full(n: usize) -> Matrix<Complex64> {
        Matrix::from_fn(n, n, |i, j| {
            if i == j {
                c((i + 1) as f64, 0.0)
            } else {
                c((i + j) as f64, (i as f64) - (j as f64))
            }
        })
    }

    fn dense_mul(a: &Matrix<Complex64>, b: &Matrix<Complex64>) -> Matrix<Complex64> {
        Matrix::from_fn(a.rows(), b.cols(), |i, j| {
            (0..a.cols())
                .map(|k| a.get(i, k) * b.get(k, j))
                .sum::<Complex64>()
        })
    }

    #[test]
    fn test_left_lower_conjugates_reflected_reads() {
        let n = 3;
        let full = herm_full(n);
        // stored lower triangle; full(i,j) for i<j must equal conj(full(j,i))
        let dense = Matrix::from_fn(n, n, |i, j| {
            if i < j {
                full.get(j, i).conj()
            } else {
                full.get(i, j)
            }
        });
        let nan = c(f64::NAN, f64::NAN);
        let stored = Matrix::from_fn(n, n, |i, j| if i >= j { full.get(i, j) } else { nan });
        let b = Matrix::from_fn(n, 2, |i, j| c((i + 1) as f64, j as f64));
        let mut out = Matrix::zeros(n, 2);
        hermitian_matrix_left_product(&stored.view(), LowerTriangle, &b.view(), &mut out.view_mut());
        assert_eq!(out, dense_mul(&dense, &b));
    }

    #[test]
    fn test_right_upper() {
        let n = 3;
        let full = herm_full(n);
        let dense = Matrix::from_fn(n, n, |i, j| {
            if i > j {
                full.get(j, i).conj()
            } else {
                full.get(i, j)
            }
        });
        let nan = c(f64::NAN, f64::NAN);
        let stored = Matrix::from_fn(n, n, |i, j| if i <= j { full.get(i, j) } else { nan });
        let b = Matrix::from_fn(2, n, |i, j| c(j as f64, (i + 1) as f64));
        let mut out = Matrix::zeros(2, n);
        hermitian_matrix_right_product(&stored.view(), UpperTriangle, &b.view(), &mut out.view_mut());
        assert_eq!(out, dense_mul(&b, &dense));
    }

    #[test]
    fn test_real_elements_match_symmetric() {
        let n = 3;
        let full = Matrix::from_fn(n, n, |i, j| ((i + 1) * (j + 1)) as f64);
        let stored = Matrix::from_fn(n, n, |i, j| {
            if i >= j {
                full.get(i, j)
            } else {
                f64::NAN
            }
        });
        let b = Matrix::from_fn(n, 2, |i, j| (i * 2 + j) as f64);
        let mut herm = Matrix::zeros(n, 2);
        hermitian_matrix_left_product(&stored.view(), LowerTriangle, &b.view(), &mut herm.view_mut());
        let mut sym = Matrix::zeros(n, 2);
        crate::symmetric::symmetric_matrix_left_product(
            &stored.view(),
            LowerTriangle,
            &b.view(),
            &mut sym.view_mut(),
        );
        assert_eq!(herm, sym);
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn test_left_update_panics() {
        let a = Matrix::<Complex64>::zeros(2, 2);
        let b = Matrix::<Complex64>::zeros(2, 2);
        let e = Matrix::<Complex64>::zeros(2, 2);
        let mut out = Matrix::<Complex64>::zeros(2, 2);
        hermitian_matrix_left_product_update(
            &a.view(),
            LowerTriangle,
            &b.view(),
            &e.view(),
            &mut out.view_mut(),
        );
    }

    #[test]
    #[should_panic(expected = "not supported")]
    fn test_right_update_panics() {
        let a = Matrix::<Complex64>::zeros(2, 2);
        let b = Matrix::<Complex64>::zeros(2, 2);
        let e = Matrix::<Complex64>::zeros(2, 2);
        let mut out = Matrix::<Complex64>::zeros(2, 2);
        hermitian_matrix_right_product_update(
            &a.view(),
            UpperTriangle,
            &b.view(),
            &e.view(),
            &mut out.view_mut(),
        );
    }
}
