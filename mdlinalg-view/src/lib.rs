//! Strided matrix and vector views for the mdlinalg kernel layer.
//!
//! This crate provides the operand types the kernels compute over:
//!
//! - [`MatrixView`] / [`MatrixViewMut`]: rank-2 strided views with
//!   const-generic static-or-dynamic extents
//! - [`VectorView`] / [`VectorViewMut`]: rank-1 strided views
//! - [`Matrix`] / [`Vector`]: owned column-major arrays
//! - [`Accessor`]: lazy scale/conjugate transformations applied on read
//! - [`Layout`]: the stride pattern classification used for BLAS dispatch
//!
//! Read views carry an [`Accessor`]; mutable views are identity-access only.

pub mod accessor;
pub mod layout;
pub mod matrix;
pub mod vector;

pub use accessor::Accessor;
pub use layout::Layout;
pub use matrix::{Matrix, MatrixView, MatrixViewMut};
pub use vector::{Vector, VectorView, VectorViewMut};

/// Sentinel extent marking a dimension as dynamic (sized at runtime).
pub const DYN: usize = usize::MAX;

/// Whether two static extents are compatible: equal, or at least one dynamic.
///
/// Usable in inline `const` blocks to reject statically-known extent
/// mismatches at compile time.
pub const fn extents_match(a: usize, b: usize) -> bool {
    a == DYN || b == DYN || a == b
}

/// Errors from view construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// A stride/extent combination would access storage out of bounds,
    /// or offset arithmetic overflowed.
    #[error("view would access storage out of bounds")]
    OffsetOverflow,
    /// A runtime extent disagrees with the view's static extent parameter.
    #[error("extent mismatch: static extent {expected}, runtime extent {actual}")]
    ExtentMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ViewError>;

/// Validate that all accessed offsets stay within `[0, len)`.
pub(crate) fn validate_bounds(len: usize, dims: &[usize], strides: &[isize]) -> Result<()> {
    // Empty view - no access needed
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    // Compute min and max offsets
    let mut min_offset = 0isize;
    let mut max_offset = 0isize;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(ViewError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(ViewError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(ViewError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 {
        return Err(ViewError::OffsetOverflow);
    }
    if max_offset as usize >= len {
        return Err(ViewError::OffsetOverflow);
    }
    Ok(())
}

/// Validate a runtime extent against a static extent parameter.
pub(crate) fn check_static_extent(static_extent: usize, actual: usize) -> Result<()> {
    if static_extent != DYN && static_extent != actual {
        return Err(ViewError::ExtentMismatch {
            expected: static_extent,
            actual,
        });
    }
    Ok(())
}
