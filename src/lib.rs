//! Dense linear-algebra kernels over strided matrix and vector views.
//!
//! This crate computes elementwise copy and matrix-matrix products (general,
//! triangular, symmetric, Hermitian; overwriting and in-place/update forms)
//! over the view types from [`mdlinalg_view`]. Three pieces make it generic
//! without giving up fast paths:
//!
//! - **Execution contexts** ([`exec`]): zero-sized tags a caller-supplied
//!   policy maps onto, selecting where kernels run.
//! - **Kernel providers** ([`provider`]): per-context trait with one hook per
//!   operation variant, each defaulting to the portable reference loop nest.
//!   Overriding a hook registers a specialized kernel for exactly that
//!   variant; resolution is monomorphized away.
//! - **Accessor decoding**: scaled/conjugated/transposed operand views fold
//!   into `(scale, conjugate)` plus a layout, so eligible general products
//!   become a single native GEMM call under the `blas` feature.
//!
//! # Example
//!
//! ```rust
//! use mdlinalg::{matrix_product, Matrix};
//!
//! // A = [[1, 2], [3, 4]], B = [[5, 6], [7, 8]], stored column-major
//! let a = Matrix::from_column_major(vec![1.0, 3.0, 2.0, 4.0], 2, 2);
//! let b = Matrix::from_column_major(vec![5.0, 7.0, 6.0, 8.0], 2, 2);
//! let mut c = Matrix::zeros(2, 2);
//! matrix_product(&a.view(), &b.view(), &mut c.view_mut());
//! assert_eq!(c.as_slice(), &[19.0, 43.0, 22.0, 50.0]);
//! ```

pub mod copy;
pub mod exec;
pub mod hermitian;
pub mod product;
pub mod provider;
pub mod symmetric;
pub mod triangular;

#[cfg(feature = "blas")]
pub mod blas;

pub use mdlinalg_traits::{Conjugate, ScalarBase};
pub use mdlinalg_view::{
    Accessor, Layout, Matrix, MatrixView, MatrixViewMut, Vector, VectorView, VectorViewMut,
    ViewError, DYN,
};

pub use copy::{copy, copy_with, CopyInto};
pub use exec::{DefaultExec, ExecContext, ExecPolicy, InlineExec};
pub use hermitian::{
    hermitian_matrix_left_product, hermitian_matrix_left_product_update,
    hermitian_matrix_left_product_update_with, hermitian_matrix_left_product_with,
    hermitian_matrix_right_product, hermitian_matrix_right_product_update,
    hermitian_matrix_right_product_update_with, hermitian_matrix_right_product_with,
};
pub use product::{
    matrix_product, matrix_product_update, matrix_product_update_with, matrix_product_with,
};
pub use provider::KernelProvider;
pub use symmetric::{
    symmetric_matrix_left_product, symmetric_matrix_left_product_update,
    symmetric_matrix_left_product_update_with, symmetric_matrix_left_product_with,
    symmetric_matrix_right_product, symmetric_matrix_right_product_update,
    symmetric_matrix_right_product_update_with, symmetric_matrix_right_product_with,
};
pub use triangular::{
    triangular_matrix_left_product, triangular_matrix_left_product_update,
    triangular_matrix_left_product_update_with, triangular_matrix_left_product_with,
    triangular_matrix_right_product, triangular_matrix_right_product_update,
    triangular_matrix_right_product_update_with, triangular_matrix_right_product_with,
};

#[cfg(feature = "blas")]
pub use blas::BlasGemm;

/// Element bounds for the kernel layer: `ScalarBase + Conjugate`.
#[cfg(not(feature = "blas"))]
pub trait Scalar: ScalarBase + Conjugate {}

#[cfg(not(feature = "blas"))]
impl<T> Scalar for T where T: ScalarBase + Conjugate {}

/// Element bounds for the kernel layer. With the `blas` feature, elements
/// must additionally bind a CBLAS GEMM routine ([`blas::BlasGemm`]: `f32`,
/// `f64`, `Complex32`, `Complex64`).
#[cfg(feature = "blas")]
pub trait Scalar: ScalarBase + Conjugate + blas::BlasGemm {}

#[cfg(feature = "blas")]
impl<T> Scalar for T where T: ScalarBase + Conjugate + blas::BlasGemm {}

// ============================================================================
// Triangle and diagonal-storage tags
// ============================================================================

/// Which triangle of a triangular/symmetric/Hermitian operand is stored.
///
/// Kernels never read outside the stored triangle, so the other triangle may
/// hold arbitrary values (including NaN).
pub trait Triangle: Copy + Default + 'static {
    const LOWER: bool;
}

/// Elements at or below the diagonal are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowerTriangle;

/// Elements at or above the diagonal are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpperTriangle;

impl Triangle for LowerTriangle {
    const LOWER: bool = true;
}

impl Triangle for UpperTriangle {
    const LOWER: bool = false;
}

/// Whether a triangular operand stores its diagonal.
pub trait DiagonalStorage: Copy + Default + 'static {
    const EXPLICIT: bool;
}

/// The diagonal is stored and read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitDiagonal;

/// The diagonal is not stored; every diagonal element is taken to be one.
/// Kernels never read the diagonal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImplicitUnitDiagonal;

impl DiagonalStorage for ExplicitDiagonal {
    const EXPLICIT: bool = true;
}

impl DiagonalStorage for ImplicitUnitDiagonal {
    const EXPLICIT: bool = false;
}
