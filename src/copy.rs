//! Elementwise copy between conforming views.
//!
//! One entry point covers both ranks: [`CopyInto`] connects each
//! (source, destination) view pair to its per-rank
//! [`KernelProvider`](crate::KernelProvider) hook. A rank mismatch between
//! source and destination is a type error; a statically-known extent
//! mismatch fails to compile inside the reference kernel.

use mdlinalg_view::{extents_match, MatrixView, MatrixViewMut, VectorView, VectorViewMut};

use crate::exec::{DefaultExec, ExecContext, ExecPolicy};
use crate::provider::KernelProvider;
use crate::Scalar;

/// Dispatch glue connecting `copy` to the per-rank provider hooks.
///
/// Implemented for (vector, vector) and (matrix, matrix) view pairs. Callers
/// use [`copy`] / [`copy_with`]; implementing this for other operand types
/// is not supported.
pub trait CopyInto<Ctx, Dst> {
    /// Run the reference kernel directly.
    fn copy_ref(&self, dst: &mut Dst);

    /// Run through the context's provider hook.
    fn copy_via(&self, ctx: Ctx, dst: &mut Dst);
}

impl<'y, T, Ctx, const NX: usize, const NY: usize> CopyInto<Ctx, VectorViewMut<'y, T, NY>>
    for VectorView<'_, T, NX>
where
    T: Scalar,
    Ctx: KernelProvider<T>,
{
    fn copy_ref(&self, dst: &mut VectorViewMut<'y, T, NY>) {
        copy_vector_ref(self, dst);
    }

    fn copy_via(&self, ctx: Ctx, dst: &mut VectorViewMut<'y, T, NY>) {
        ctx.copy_vector(self, dst);
    }
}

impl<'y, T, Ctx, const RX: usize, const CX: usize, const RY: usize, const CY: usize>
    CopyInto<Ctx, MatrixViewMut<'y, T, RY, CY>> for MatrixView<'_, T, RX, CX>
where
    T: Scalar,
    Ctx: KernelProvider<T>,
{
    fn copy_ref(&self, dst: &mut MatrixViewMut<'y, T, RY, CY>) {
        copy_matrix_ref(self, dst);
    }

    fn copy_via(&self, ctx: Ctx, dst: &mut MatrixViewMut<'y, T, RY, CY>) {
        ctx.copy_matrix(self, dst);
    }
}

/// `y := x` under the default execution context.
///
/// The destination's extents drive iteration; the source is read through its
/// accessor, so `copy(&x.scaled(alpha), ...)` is a scaled copy.
pub fn copy<Src, Dst>(x: &Src, y: &mut Dst)
where
    Src: CopyInto<DefaultExec, Dst>,
{
    copy_with(DefaultExec, x, y);
}

/// `y := x` under a caller-supplied execution policy.
pub fn copy_with<P, Src, Dst>(policy: P, x: &Src, y: &mut Dst)
where
    P: ExecPolicy,
    Src: CopyInto<P::Context, Dst>,
{
    if <P::Context as ExecContext>::IS_INLINE {
        x.copy_ref(y);
    } else {
        x.copy_via(policy.into_context(), y);
    }
}

pub(crate) fn copy_vector_ref<T: Scalar, const NX: usize, const NY: usize>(
    x: &VectorView<'_, T, NX>,
    y: &mut VectorViewMut<'_, T, NY>,
) {
    const {
        assert!(extents_match(NX, NY), "static extent mismatch");
    }
    for i in 0..y.extent() {
        y.set(i, x.get(i));
    }
}

pub(crate) fn copy_matrix_ref<
    T: Scalar,
    const RX: usize,
    const CX: usize,
    const RY: usize,
    const CY: usize,
>(
    x: &MatrixView<'_, T, RX, CX>,
    y: &mut MatrixViewMut<'_, T, RY, CY>,
) {
    const {
        assert!(extents_match(RX, RY), "static row extent mismatch");
        assert!(extents_match(CX, CY), "static column extent mismatch");
    }
    for j in 0..y.extent(1) {
        for i in 0..y.extent(0) {
            y.set(i, j, x.get(i, j));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InlineExec;
    use mdlinalg_view::{Matrix, Vector};

    #[test]
    fn test_copy_vector() {
        let x = Vector::from_fn(4, |i| i as f64);
        let mut y = Vector::zeros(4);
        copy(&x.view(), &mut y.view_mut());
        assert_eq!(y, x);
    }

    #[test]
    fn test_copy_matrix() {
        let x = Matrix::from_fn(3, 2, |i, j| (i * 10 + j) as f64);
        let mut y = Matrix::zeros(3, 2);
        copy(&x.view(), &mut y.view_mut());
        assert_eq!(y, x);
    }

    #[test]
    fn test_copy_scaled_source() {
        let x = Matrix::from_fn(2, 2, |i, j| (i + j) as f64);
        let mut y = Matrix::zeros(2, 2);
        copy(&x.view().scaled(2.0), &mut y.view_mut());
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(y.get(i, j), 2.0 * x.get(i, j));
            }
        }
    }

    #[test]
    fn test_copy_idempotent() {
        let x = Matrix::from_fn(2, 3, |i, j| (i * 7 + j) as f64);
        let mut y = Matrix::zeros(2, 3);
        copy(&x.view(), &mut y.view_mut());
        let first = y.clone();
        copy(&x.view(), &mut y.view_mut());
        assert_eq!(y, first);
    }

    #[test]
    fn test_copy_inline_policy() {
        let x = Vector::from_fn(3, |i| (i + 1) as f64);
        let mut y = Vector::zeros(3);
        copy_with(InlineExec, &x.view(), &mut y.view_mut());
        assert_eq!(y, x);
    }

    #[test]
    fn test_copy_zero_extent() {
        let x = Vector::<f64>::zeros(0);
        let mut y = Vector::zeros(0);
        copy(&x.view(), &mut y.view_mut());
        assert!(y.is_empty());
    }
}
