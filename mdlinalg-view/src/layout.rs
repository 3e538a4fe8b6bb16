//! Stride pattern classification.
//!
//! BLAS dispatch only understands column-major storage and its transpose;
//! everything else falls back to the reference loop nests. The layout tag
//! records which case a view's strides were built from, so dispatch never
//! has to re-derive it from raw strides.

/// Classification of a matrix view's stride pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Unit row stride, column stride = leading dimension.
    ColumnMajor,
    /// Transposed view of column-major storage.
    Transposed,
    /// Arbitrary caller-supplied strides.
    General,
}

impl Layout {
    /// Layout of the transposed view.
    #[must_use]
    pub fn transposed(self) -> Self {
        match self {
            Layout::ColumnMajor => Layout::Transposed,
            Layout::Transposed => Layout::ColumnMajor,
            Layout::General => Layout::General,
        }
    }

    /// Whether a GEMM trans code can express this layout.
    #[inline]
    pub fn is_blas_compatible(self) -> bool {
        !matches!(self, Layout::General)
    }

    /// Whether this is the transpose of column-major storage.
    #[inline]
    pub fn is_transposed(self) -> bool {
        matches!(self, Layout::Transposed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transposed_round_trip() {
        assert_eq!(Layout::ColumnMajor.transposed(), Layout::Transposed);
        assert_eq!(Layout::Transposed.transposed(), Layout::ColumnMajor);
        assert_eq!(Layout::General.transposed(), Layout::General);
    }

    #[test]
    fn test_blas_compatible() {
        assert!(Layout::ColumnMajor.is_blas_compatible());
        assert!(Layout::Transposed.is_blas_compatible());
        assert!(!Layout::General.is_blas_compatible());
    }
}
