//! Triangular matrix products.
//!
//! `A` is square with one stored triangle ([`Triangle`]) and an implicit-unit
//! or explicit diagonal ([`DiagonalStorage`]). Overwriting forms compute
//! `C := A * B` (left) / `C := B * A` (right); update forms run in place on
//! `C` (`C := A * C`, `C := C * A`). Kernels touch only the stored band: the
//! opposite triangle is never read, and with an implicit unit diagonal the
//! diagonal is never read either.
//!
//! The in-place updates order their sweeps so that an output element is
//! finalized only after every kernel that reads its old value has run:
//! left-upper walks columns of `A` forward writing rows above the pivot,
//! left-lower walks them backward writing rows below, and the right-side
//! forms mirror this per output column.

use mdlinalg_view::{extents_match, MatrixView, MatrixViewMut};

use crate::exec::{DefaultExec, ExecContext, ExecPolicy};
use crate::provider::KernelProvider;
use crate::{DiagonalStorage, Scalar, Triangle};

/// `C := A * B`, `A` triangular, under the default execution context.
pub fn triangular_matrix_left_product<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    diag: D,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    triangular_matrix_left_product_with(DefaultExec, a, triangle, diag, b, c);
}

/// `C := A * B`, `A` triangular, under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn triangular_matrix_left_product_with<
    P,
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
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
    diag: D,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        left_product_ref(a, triangle, diag, b, c);
    } else {
        policy
            .into_context()
            .triangular_matrix_left_product(a, triangle, diag, b, c);
    }
}

/// `C := B * A`, `A` triangular, under the default execution context.
pub fn triangular_matrix_right_product<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    diag: D,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    triangular_matrix_right_product_with(DefaultExec, a, triangle, diag, b, c);
}

/// `C := B * A`, `A` triangular, under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn triangular_matrix_right_product_with<
    P,
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
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
    diag: D,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        right_product_ref(a, triangle, diag, b, c);
    } else {
        policy
            .into_context()
            .triangular_matrix_right_product(a, triangle, diag, b, c);
    }
}

/// `C := A * C` in place, `A` triangular, under the default execution
/// context.
pub fn triangular_matrix_left_product_update<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    diag: D,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    triangular_matrix_left_product_update_with(DefaultExec, a, triangle, diag, c);
}

/// `C := A * C` in place, under a caller-supplied execution policy.
pub fn triangular_matrix_left_product_update_with<
    P,
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    diag: D,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        left_product_update_ref(a, triangle, diag, c);
    } else {
        policy
            .into_context()
            .triangular_matrix_left_product_update(a, triangle, diag, c);
    }
}

/// `C := C * A` in place, `A` triangular, under the default execution
/// context.
pub fn triangular_matrix_right_product_update<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    diag: D,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    triangular_matrix_right_product_update_with(DefaultExec, a, triangle, diag, c);
}

/// `C := C * A` in place, under a caller-supplied execution policy.
pub fn triangular_matrix_right_product_update_with<
    P,
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    triangle: Tr,
    diag: D,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        right_product_update_ref(a, triangle, diag, c);
    } else {
        policy
            .into_context()
            .triangular_matrix_right_product_update(a, triangle, diag, c);
    }
}

pub(crate) fn left_product_ref<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    _diag: D,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, CA), "triangular operand must be square");
        assert!(extents_match(CA, RB), "static inner extent mismatch");
        assert!(extents_match(RB, RC), "static row extent mismatch");
        assert!(extents_match(CB, CC), "static column extent mismatch");
    }

    let m = c.extent(0);
    let n = c.extent(1);
    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            if Tr::LOWER {
                let k_end = if D::EXPLICIT { i + 1 } else { i };
                for k in 0..k_end {
                    sum = sum + a.get(i, k) * b.get(k, j);
                }
            } else {
                let k_begin = if D::EXPLICIT { i } else { i + 1 };
                for k in k_begin..m {
                    sum = sum + a.get(i, k) * b.get(k, j);
                }
            }
            if !D::EXPLICIT {
                // unit diagonal contributes B(i, j)
                sum = sum + b.get(i, j);
            }
            c.set(i, j, sum);
        }
    }
}

pub(crate) fn right_product_ref<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    _diag: D,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, CA), "triangular operand must be square");
        assert!(extents_match(CB, RA), "static inner extent mismatch");
        assert!(extents_match(RB, RC), "static row extent mismatch");
        assert!(extents_match(CA, CC), "static column extent mismatch");
    }

    let m = c.extent(0);
    let n = c.extent(1);
    for j in 0..n {
        for i in 0..m {
            let mut sum = T::zero();
            if Tr::LOWER {
                // column j of lower-triangular A is stored for k >= j
                let k_begin = if D::EXPLICIT { j } else { j + 1 };
                for k in k_begin..n {
                    sum = sum + b.get(i, k) * a.get(k, j);
                }
            } else {
                // column j of upper-triangular A is stored for k <= j
                let k_end = if D::EXPLICIT { j + 1 } else { j };
                for k in 0..k_end {
                    sum = sum + b.get(i, k) * a.get(k, j);
                }
            }
            if !D::EXPLICIT {
                sum = sum + b.get(i, j);
            }
            c.set(i, j, sum);
        }
    }
}

pub(crate) fn left_product_update_ref<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    _diag: D,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, CA), "triangular operand must be square");
        assert!(extents_match(CA, RC), "static inner extent mismatch");
    }

    let m = c.extent(0);
    let n = c.extent(1);
    for j in 0..n {
        if Tr::LOWER {
            // Finalize rows bottom-up: row k-1's old value feeds rows >= k.
            for k in (1..=m).rev() {
                for i in k..m {
                    let v = c.get(i, j) + a.get(i, k - 1) * c.get(k - 1, j);
                    c.set(i, j, v);
                }
                if D::EXPLICIT {
                    let v = a.get(k - 1, k - 1) * c.get(k - 1, j);
                    c.set(k - 1, j, v);
                }
            }
        } else {
            // Finalize rows top-down: row k's old value feeds rows < k.
            for k in 0..m {
                for i in 0..k {
                    let v = c.get(i, j) + a.get(i, k) * c.get(k, j);
                    c.set(i, j, v);
                }
                if D::EXPLICIT {
                    let v = a.get(k, k) * c.get(k, j);
                    c.set(k, j, v);
                }
            }
        }
    }
}

pub(crate) fn right_product_update_ref<
    T: Scalar,
    Tr: Triangle,
    D: DiagonalStorage,
    const RA: usize,
    const CA: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    _triangle: Tr,
    _diag: D,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, CA), "triangular operand must be square");
        assert!(extents_match(CC, RA), "static inner extent mismatch");
    }

    let m = c.extent(0);
    let n = c.extent(1);
    if Tr::LOWER {
        // Finalize columns left-to-right: column j's new value needs only
        // old columns k > j.
        for j in 0..n {
            if D::EXPLICIT {
                for i in 0..m {
                    let v = c.get(i, j) * a.get(j, j);
                    c.set(i, j, v);
                }
            }
            for k in (j + 1)..n {
                for i in 0..m {
                    let v = c.get(i, j) + c.get(i, k) * a.get(k, j);
                    c.set(i, j, v);
                }
            }
        }
    } else {
        // Finalize columns right-to-left: column j-1's new value needs only
        // old columns k < j-1.
        for j in (1..=n).rev() {
            if D::EXPLICIT {
                for i in 0..m {
                    let v = c.get(i, j - 1) * a.get(j - 1, j - 1);
                    c.set(i, j - 1, v);
                }
            }
            for k in 0..(j - 1) {
                for i in 0..m {
                    let v = c.get(i, j - 1) + c.get(i, k) * a.get(k, j - 1);
                    c.set(i, j - 1, v);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExplicitDiagonal, ImplicitUnitDiagonal, LowerTriangle, UpperTriangle};
    use mdlinalg_view::Matrix;

    // A = [[2, _], [3, 5]] stored lower, B = [[1], [1]]: C = [[2], [8]]
    #[test]
    fn test_lower_explicit_known() {
        let a = Matrix::from_column_major(vec![2.0, 3.0, f64::NAN, 5.0], 2, 2);
        let b = Matrix::from_column_major(vec![1.0, 1.0], 2, 1);
        let mut c = Matrix::zeros(2, 1);
        triangular_matrix_left_product(
            &a.view(),
            LowerTriangle,
            ExplicitDiagonal,
            &b.view(),
            &mut c.view_mut(),
        );
        assert_eq!(c.get(0, 0), 2.0);
        assert_eq!(c.get(1, 0), 8.0);
    }

    fn dense_lower(n: usize, unit_diag: bool) -> Matrix<f64> {
        Matrix::from_fn(n, n, |i, j| {
            if i > j {
                (2 * i + 3 * j + 1) as f64
            } else if i == j {
                if unit_diag {
                    1.0
                } else {
                    (i + 2) as f64
                }
            } else {
                0.0
            }
        })
    }

    fn dense_mul(a: &Matrix<f64>, b: &Matrix<f64>) -> Matrix<f64> {
        Matrix::from_fn(a.rows(), b.cols(), |i, j| {
            (0..a.cols()).map(|k| a.get(i, k) * b.get(k, j)).sum::<f64>()
        })
    }

    #[test]
    fn test_implicit_unit_diag_matches_explicit_ones() {
        // Stored strict triangle identical; implicit form must never read
        // the diagonal, so poison it.
        let n = 4;
        let full = dense_lower(n, true);
        let poisoned =
            Matrix::from_fn(n, n, |i, j| if i == j { f64::NAN } else { full.get(i, j) });

        let b = Matrix::from_fn(n, 3, |i, j| (i + j * j) as f64);
        let expect = dense_mul(&full, &b);

        let mut c = Matrix::zeros(n, 3);
        triangular_matrix_left_product(
            &poisoned.view(),
            LowerTriangle,
            ImplicitUnitDiagonal,
            &b.view(),
            &mut c.view_mut(),
        );
        assert_eq!(c, expect);
    }

    #[test]
    fn test_left_upper_ignores_lower_triangle() {
        let n = 3;
        let full = Matrix::from_fn(n, n, |i, j| {
            if i <= j {
                (i * 3 + j + 1) as f64
            } else {
                0.0
            }
        });
        let stored = Matrix::from_fn(n, n, |i, j| {
            if i <= j {
                full.get(i, j)
            } else {
                f64::NAN
            }
        });
        let b = Matrix::from_fn(n, 2, |i, j| (i + 10 * j) as f64);
        let expect = dense_mul(&full, &b);
        let mut c = Matrix::zeros(n, 2);
        triangular_matrix_left_product(
            &stored.view(),
            UpperTriangle,
            ExplicitDiagonal,
            &b.view(),
            &mut c.view_mut(),
        );
        assert_eq!(c, expect);
    }

    #[test]
    fn test_right_product_matches_dense() {
        let n = 4;
        let full = dense_lower(n, false);
        let b = Matrix::from_fn(2, n, |i, j| (i * 5 + j + 1) as f64);
        let expect = dense_mul(&b, &full);
        let mut c = Matrix::zeros(2, n);
        triangular_matrix_right_product(
            &full.view(),
            LowerTriangle,
            ExplicitDiagonal,
            &b.view(),
            &mut c.view_mut(),
        );
        assert_eq!(c, expect);
    }

    #[test]
    fn test_left_update_matches_overwrite() {
        for unit in [false, true] {
            let n = 4;
            let a = dense_lower(n, unit);
            let b = Matrix::from_fn(n, 3, |i, j| (i * 2 + j + 1) as f64);

            let mut overwrite = Matrix::zeros(n, 3);
            let mut in_place = b.clone();
            if unit {
                triangular_matrix_left_product(
                    &a.view(),
                    LowerTriangle,
                    ImplicitUnitDiagonal,
                    &b.view(),
                    &mut overwrite.view_mut(),
                );
                triangular_matrix_left_product_update(
                    &a.view(),
                    LowerTriangle,
                    ImplicitUnitDiagonal,
                    &mut in_place.view_mut(),
                );
            } else {
                triangular_matrix_left_product(
                    &a.view(),
                    LowerTriangle,
                    ExplicitDiagonal,
                    &b.view(),
                    &mut overwrite.view_mut(),
                );
                triangular_matrix_left_product_update(
                    &a.view(),
                    LowerTriangle,
                    ExplicitDiagonal,
                    &mut in_place.view_mut(),
                );
            }
            assert_eq!(in_place, overwrite);
        }
    }

    #[test]
    fn test_left_update_upper() {
        let n = 3;
        let a = Matrix::from_fn(n, n, |i, j| {
            if i <= j {
                (i + j + 1) as f64
            } else {
                0.0
            }
        });
        let b = Matrix::from_fn(n, 2, |i, j| (3 * i + j) as f64);
        let expect = dense_mul(&a, &b);
        let mut c = b.clone();
        triangular_matrix_left_product_update(
            &a.view(),
            UpperTriangle,
            ExplicitDiagonal,
            &mut c.view_mut(),
        );
        assert_eq!(c, expect);
    }

    #[test]
    fn test_right_update_both_triangles() {
        let n = 4;
        let m = 2;
        let b = Matrix::from_fn(m, n, |i, j| (i * 7 + j + 1) as f64);

        let lower = dense_lower(n, false);
        let mut c = b.clone();
        triangular_matrix_right_product_update(
            &lower.view(),
            LowerTriangle,
            ExplicitDiagonal,
            &mut c.view_mut(),
        );
        assert_eq!(c, dense_mul(&b, &lower));

        let upper = Matrix::from_fn(n, n, |i, j| {
            if i <= j {
                (2 * i + j + 1) as f64
            } else {
                0.0
            }
        });
        let mut c = b.clone();
        triangular_matrix_right_product_update(
            &upper.view(),
            UpperTriangle,
            ExplicitDiagonal,
            &mut c.view_mut(),
        );
        assert_eq!(c, dense_mul(&b, &upper));
    }

    #[test]
    fn test_right_update_implicit_unit_diag() {
        let n = 4;
        let m = 2;
        let b = Matrix::from_fn(m, n, |i, j| (i * 7 + j + 1) as f64);

        for lower in [true, false] {
            let full = Matrix::from_fn(n, n, |i, j| {
                let strict = if lower { i > j } else { i < j };
                if i == j {
                    1.0
                } else if strict {
                    (2 * i + 3 * j + 1) as f64
                } else {
                    0.0
                }
            });
            // implicit form must never read the diagonal
            let poisoned =
                Matrix::from_fn(n, n, |i, j| if i == j { f64::NAN } else { full.get(i, j) });
            let mut c = b.clone();
            if lower {
                triangular_matrix_right_product_update(
                    &poisoned.view(),
                    LowerTriangle,
                    ImplicitUnitDiagonal,
                    &mut c.view_mut(),
                );
            } else {
                triangular_matrix_right_product_update(
                    &poisoned.view(),
                    UpperTriangle,
                    ImplicitUnitDiagonal,
                    &mut c.view_mut(),
                );
            }
            assert_eq!(c, dense_mul(&b, &full));
        }
    }

    #[test]
    fn test_zero_extent() {
        let a = Matrix::<f64>::zeros(0, 0);
        let b = Matrix::<f64>::zeros(0, 0);
        let mut c = Matrix::<f64>::zeros(0, 0);
        triangular_matrix_left_product(
            &a.view(),
            LowerTriangle,
            ExplicitDiagonal,
            &b.view(),
            &mut c.view_mut(),
        );
    }
}
