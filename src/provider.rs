//! Per-context kernel registration and resolution.
//!
//! [`KernelProvider`] has one hook per operation variant, each with a default
//! body running the portable reference kernel. An execution context
//! "registers a specialized kernel" for a variant by overriding that hook in
//! its `KernelProvider` impl; every other variant keeps falling back.
//! Resolution happens at monomorphization, per variant, with no runtime
//! probing.
//!
//! [`InlineExec`](crate::InlineExec) never reaches these hooks: operation
//! entry points check [`ExecContext::IS_INLINE`](crate::ExecContext) first
//! and run the reference kernels directly, so a specialized kernel can call
//! back into the inline form without recursing into itself.

use mdlinalg_view::{MatrixView, MatrixViewMut, VectorView, VectorViewMut};

use crate::exec::{DefaultExec, ExecContext, InlineExec};
use crate::{DiagonalStorage, Scalar, Triangle};

/// Kernel hooks for one execution context.
///
/// Implement this for a custom context to make it usable with every
/// operation; override individual hooks to register specialized kernels.
#[allow(clippy::too_many_arguments)]
pub trait KernelProvider<T: Scalar>: ExecContext {
    /// `y := x` (rank 1).
    fn copy_vector<const NX: usize, const NY: usize>(
        self,
        x: &VectorView<'_, T, NX>,
        y: &mut VectorViewMut<'_, T, NY>,
    ) {
        crate::copy::copy_vector_ref(x, y);
    }

    /// `Y := X` (rank 2).
    fn copy_matrix<const RX: usize, const CX: usize, const RY: usize, const CY: usize>(
        self,
        x: &MatrixView<'_, T, RX, CX>,
        y: &mut MatrixViewMut<'_, T, RY, CY>,
    ) {
        crate::copy::copy_matrix_ref(x, y);
    }

    /// `C := A * B`.
    fn matrix_product<
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::product::matrix_product_ref(a, b, c);
    }

    /// `C := E + A * B`.
    fn matrix_product_update<
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RE: usize,
        const CE: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        b: &MatrixView<'_, T, RB, CB>,
        e: &MatrixView<'_, T, RE, CE>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::product::matrix_product_update_ref(a, b, e, c);
    }

    /// `C := A * B`, `A` triangular.
    fn triangular_matrix_left_product<
        Tr: Triangle,
        D: DiagonalStorage,
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        diag: D,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::triangular::left_product_ref(a, triangle, diag, b, c);
    }

    /// `C := B * A`, `A` triangular.
    fn triangular_matrix_right_product<
        Tr: Triangle,
        D: DiagonalStorage,
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        diag: D,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::triangular::right_product_ref(a, triangle, diag, b, c);
    }

    /// `C := A * C` in place, `A` triangular.
    fn triangular_matrix_left_product_update<
        Tr: Triangle,
        D: DiagonalStorage,
        const RA: usize,
        const CA: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        diag: D,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::triangular::left_product_update_ref(a, triangle, diag, c);
    }

    /// `C := C * A` in place, `A` triangular.
    fn triangular_matrix_right_product_update<
        Tr: Triangle,
        D: DiagonalStorage,
        const RA: usize,
        const CA: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        diag: D,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::triangular::right_product_update_ref(a, triangle, diag, c);
    }

    /// `C := A * B`, `A` symmetric with one stored triangle.
    fn symmetric_matrix_left_product<
        Tr: Triangle,
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::symmetric::left_product_ref(a, triangle, b, c);
    }

    /// `C := B * A`, `A` symmetric with one stored triangle.
    fn symmetric_matrix_right_product<
        Tr: Triangle,
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::symmetric::right_product_ref(a, triangle, b, c);
    }

    /// `C := E + A * B`, `A` symmetric. Unsupported: panics.
    fn symmetric_matrix_left_product_update<
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
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        e: &MatrixView<'_, T, RE, CE>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::symmetric::left_product_update_ref(a, triangle, b, e, c);
    }

    /// `C := E + B * A`, `A` symmetric. Unsupported: panics.
    fn symmetric_matrix_right_product_update<
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
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        e: &MatrixView<'_, T, RE, CE>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::symmetric::right_product_update_ref(a, triangle, b, e, c);
    }

    /// `C := A * B`, `A` Hermitian with one stored triangle.
    fn hermitian_matrix_left_product<
        Tr: Triangle,
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::hermitian::left_product_ref(a, triangle, b, c);
    }

    /// `C := B * A`, `A` Hermitian with one stored triangle.
    fn hermitian_matrix_right_product<
        Tr: Triangle,
        const RA: usize,
        const CA: usize,
        const RB: usize,
        const CB: usize,
        const RC: usize,
        const CC: usize,
    >(
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::hermitian::right_product_ref(a, triangle, b, c);
    }

    /// `C := E + A * B`, `A` Hermitian. Unsupported: panics.
    fn hermitian_matrix_left_product_update<
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
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        e: &MatrixView<'_, T, RE, CE>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::hermitian::left_product_update_ref(a, triangle, b, e, c);
    }

    /// `C := E + B * A`, `A` Hermitian. Unsupported: panics.
    fn hermitian_matrix_right_product_update<
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
        self,
        a: &MatrixView<'_, T, RA, CA>,
        triangle: Tr,
        b: &MatrixView<'_, T, RB, CB>,
        e: &MatrixView<'_, T, RE, CE>,
        c: &mut MatrixViewMut<'_, T, RC, CC>,
    ) {
        crate::hermitian::right_product_update_ref(a, triangle, b, e, c);
    }
}

// The built-in contexts carry no specialized kernels of their own.
impl<T: Scalar> KernelProvider<T> for DefaultExec {}
impl<T: Scalar> KernelProvider<T> for InlineExec {}
