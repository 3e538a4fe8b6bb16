//! CBLAS adapter for the general overwriting matrix product.
//!
//! [`try_gemm`] maps `C := A * B` onto one column-major `?gemm` call when the
//! operands are expressible: scale factors fold into `alpha`, transposed
//! layouts become trans codes, and a conjugated transposed operand becomes
//! `ConjTrans`. A conjugated but *not* transposed operand has no trans code,
//! so it is rejected and the caller falls back to the reference loop nest;
//! the two paths must compute the same values.
//!
//! Uses `cblas_sgemm` / `cblas_dgemm` / `cblas_cgemm` / `cblas_zgemm` via the
//! per-element-type [`BlasGemm`] trait.

use cblas_sys::CBLAS_TRANSPOSE;
use mdlinalg_view::{Layout, MatrixView, MatrixViewMut, DYN};
use num_complex::{Complex32, Complex64};

use crate::Scalar;

/// Binds an element type to its CBLAS GEMM routine.
///
/// Implemented for `f32`, `f64`, `Complex32`, and `Complex64`.
pub trait BlasGemm: Sized {
    /// One column-major `?gemm` call: `C := alpha * op(A) * op(B) + beta * C`
    /// with `op(A)` m-by-k, `op(B)` k-by-n, and `C` m-by-n.
    ///
    /// # Safety
    ///
    /// Each pointer must address a buffer large enough for its operand's
    /// dimensions under the given leading dimension, and `c` must be valid
    /// for writes.
    #[allow(clippy::too_many_arguments)]
    unsafe fn gemm(
        trans_a: CBLAS_TRANSPOSE,
        trans_b: CBLAS_TRANSPOSE,
        m: i32,
        n: i32,
        k: i32,
        alpha: Self,
        a: *const Self,
        lda: i32,
        b: *const Self,
        ldb: i32,
        beta: Self,
        c: *mut Self,
        ldc: i32,
    );
}

impl BlasGemm for f32 {
    unsafe fn gemm(
        trans_a: CBLAS_TRANSPOSE,
        trans_b: CBLAS_TRANSPOSE,
        m: i32,
        n: i32,
        k: i32,
        alpha: f32,
        a: *const f32,
        lda: i32,
        b: *const f32,
        ldb: i32,
        beta: f32,
        c: *mut f32,
        ldc: i32,
    ) {
        unsafe {
            cblas_sys::cblas_sgemm(
                cblas_sys::CBLAS_LAYOUT::CblasColMajor,
                trans_a,
                trans_b,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                b,
                ldb,
                beta,
                c,
                ldc,
            );
        }
    }
}

impl BlasGemm for f64 {
    unsafe fn gemm(
        trans_a: CBLAS_TRANSPOSE,
        trans_b: CBLAS_TRANSPOSE,
        m: i32,
        n: i32,
        k: i32,
        alpha: f64,
        a: *const f64,
        lda: i32,
        b: *const f64,
        ldb: i32,
        beta: f64,
        c: *mut f64,
        ldc: i32,
    ) {
        unsafe {
            cblas_sys::cblas_dgemm(
                cblas_sys::CBLAS_LAYOUT::CblasColMajor,
                trans_a,
                trans_b,
                m,
                n,
                k,
                alpha,
                a,
                lda,
                b,
                ldb,
                beta,
                c,
                ldc,
            );
        }
    }
}

impl BlasGemm for Complex32 {
    unsafe fn gemm(
        trans_a: CBLAS_TRANSPOSE,
        trans_b: CBLAS_TRANSPOSE,
        m: i32,
        n: i32,
        k: i32,
        alpha: Complex32,
        a: *const Complex32,
        lda: i32,
        b: *const Complex32,
        ldb: i32,
        beta: Complex32,
        c: *mut Complex32,
        ldc: i32,
    ) {
        unsafe {
            cblas_sys::cblas_cgemm(
                cblas_sys::CBLAS_LAYOUT::CblasColMajor,
                trans_a,
                trans_b,
                m,
                n,
                k,
                (&alpha) as *const _ as *const _,
                a as *const _ as *const _,
                lda,
                b as *const _ as *const _,
                ldb,
                (&beta) as *const _ as *const _,
                c as *mut _ as *mut _,
                ldc,
            );
        }
    }
}

impl BlasGemm for Complex64 {
    unsafe fn gemm(
        trans_a: CBLAS_TRANSPOSE,
        trans_b: CBLAS_TRANSPOSE,
        m: i32,
        n: i32,
        k: i32,
        alpha: Complex64,
        a: *const Complex64,
        lda: i32,
        b: *const Complex64,
        ldb: i32,
        beta: Complex64,
        c: *mut Complex64,
        ldc: i32,
    ) {
        unsafe {
            cblas_sys::cblas_zgemm(
                cblas_sys::CBLAS_LAYOUT::CblasColMajor,
                trans_a,
                trans_b,
                m,
                n,
                k,
                (&alpha) as *const _ as *const _,
                a as *const _ as *const _,
                lda,
                b as *const _ as *const _,
                ldb,
                (&beta) as *const _ as *const _,
                c as *mut _ as *mut _,
                ldc,
            );
        }
    }
}

fn trans_code(transposed: bool, conjugated: bool) -> CBLAS_TRANSPOSE {
    match (transposed, conjugated) {
        (false, _) => CBLAS_TRANSPOSE::CblasNoTrans,
        (true, false) => CBLAS_TRANSPOSE::CblasTrans,
        (true, true) => CBLAS_TRANSPOSE::CblasConjTrans,
    }
}

/// Leading dimension of a stored operand buffer.
///
/// When a matrix dimension is 1 the corresponding stride may be degenerate
/// (0, or smaller than the dimension), but CBLAS still requires the leading
/// dimension to be >= the stored row count and >= 1.
fn leading_dim(stride: isize, stored_rows: usize) -> i32 {
    stride.max(stored_rows as isize).max(1) as i32
}

/// Attempt to run `C := A * B` as a single GEMM call.
///
/// Returns `false` without touching `C` when the operands are not
/// expressible: a `General` layout, a non-column-major output, a statically
/// sized output, or a conjugated-but-not-transposed input.
pub(crate) fn try_gemm<
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
) -> bool {
    if RC != DYN || CC != DYN {
        return false;
    }
    if !a.layout().is_blas_compatible() || !b.layout().is_blas_compatible() {
        return false;
    }
    if c.layout() != Layout::ColumnMajor {
        return false;
    }

    let (alpha_a, conj_a) = a.accessor().decode();
    let (alpha_b, conj_b) = b.accessor().decode();
    let a_trans = a.layout().is_transposed();
    let b_trans = b.layout().is_transposed();
    // ?gemm has no conjugate-without-transpose operand code
    if (conj_a && !a_trans) || (conj_b && !b_trans) {
        return false;
    }

    let m = c.extent(0);
    let n = c.extent(1);
    let k = a.extent(1);

    // The stored buffer is the logical operand for NoTrans and its
    // transpose for Trans/ConjTrans; the leading dimension is the stride
    // of the stored buffer's column axis.
    let lda = if a_trans {
        leading_dim(a.stride(0), k)
    } else {
        leading_dim(a.stride(1), m)
    };
    let ldb = if b_trans {
        leading_dim(b.stride(0), n)
    } else {
        leading_dim(b.stride(1), k)
    };
    let ldc = leading_dim(c.stride(1), m);

    let alpha = alpha_a * alpha_b;
    unsafe {
        T::gemm(
            trans_code(a_trans, conj_a),
            trans_code(b_trans, conj_b),
            m as i32,
            n as i32,
            k as i32,
            alpha,
            a.as_ptr(),
            lda,
            b.as_ptr(),
            ldb,
            T::zero(),
            c.as_mut_ptr(),
            ldc,
        );
    }
    true
}
