//! General matrix-matrix product.
//!
//! Overwriting form `C := A * B` and update form `C := E + A * B`. Operands
//! are read through their accessors, so scaled/conjugated/transposed views
//! compute `alpha * op(A) * op(B)` without materializing anything. Under the
//! `blas` feature the overwriting reference kernel first attempts a single
//! `?gemm` call (see [`crate::blas`]); ineligible operands fall through to
//! the loop nest, which computes the identical result.

use mdlinalg_view::{extents_match, MatrixView, MatrixViewMut};

use crate::exec::{DefaultExec, ExecContext, ExecPolicy};
use crate::provider::KernelProvider;
use crate::Scalar;

/// `C := A * B` under the default execution context.
pub fn matrix_product<
    T: Scalar,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    matrix_product_with(DefaultExec, a, b, c);
}

/// `C := A * B` under a caller-supplied execution policy.
pub fn matrix_product_with<
    P,
    T: Scalar,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    policy: P,
    a: &MatrixView<'_, T, RA, CA>,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        matrix_product_ref(a, b, c);
    } else {
        policy.into_context().matrix_product(a, b, c);
    }
}

/// `C := E + A * B` under the default execution context.
pub fn matrix_product_update<
    T: Scalar,
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
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    matrix_product_update_with(DefaultExec, a, b, e, c);
}

/// `C := E + A * B` under a caller-supplied execution policy.
#[allow(clippy::too_many_arguments)]
pub fn matrix_product_update_with<
    P,
    T: Scalar,
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
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) where
    P: ExecPolicy,
    P::Context: KernelProvider<T>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        matrix_product_update_ref(a, b, e, c);
    } else {
        policy.into_context().matrix_product_update(a, b, e, c);
    }
}

pub(crate) fn matrix_product_ref<
    T: Scalar,
    const RA: usize,
    const CA: usize,
    const RB: usize,
    const CB: usize,
    const RC: usize,
    const CC: usize,
>(
    a: &MatrixView<'_, T, RA, CA>,
    b: &MatrixView<'_, T, RB, CB>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, RC), "static row extent mismatch");
        assert!(extents_match(CB, CC), "static column extent mismatch");
        assert!(extents_match(CA, RB), "static inner extent mismatch");
    }

    #[cfg(feature = "blas")]
    if crate::blas::try_gemm(a, b, c) {
        return;
    }

    let k = a.extent(1);
    for j in 0..c.extent(1) {
        for i in 0..c.extent(0) {
            let mut sum = T::zero();
            for p in 0..k {
                sum = sum + a.get(i, p) * b.get(p, j);
            }
            c.set(i, j, sum);
        }
    }
}

pub(crate) fn matrix_product_update_ref<
    T: Scalar,
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
    b: &MatrixView<'_, T, RB, CB>,
    e: &MatrixView<'_, T, RE, CE>,
    c: &mut MatrixViewMut<'_, T, RC, CC>,
) {
    const {
        assert!(extents_match(RA, RC), "static row extent mismatch");
        assert!(extents_match(CB, CC), "static column extent mismatch");
        assert!(extents_match(CA, RB), "static inner extent mismatch");
        assert!(extents_match(RE, RC), "static row extent mismatch");
        assert!(extents_match(CE, CC), "static column extent mismatch");
    }

    let k = a.extent(1);
    for j in 0..c.extent(1) {
        for i in 0..c.extent(0) {
            let mut sum = e.get(i, j);
            for p in 0..k {
                sum = sum + a.get(i, p) * b.get(p, j);
            }
            c.set(i, j, sum);
        }
    }
}
