//! Rank-2 strided views and the owned column-major matrix.
//!
//! Extents are const-generic with [`DYN`](crate::DYN) marking a dynamic
//! dimension, so shape mismatches between fully-static operands fail at
//! compile time while dynamic operands are checked where it matters.
//! Read views carry an [`Accessor`]; mutable views are identity-access only.

use mdlinalg_traits::Conjugate;
use num_traits::{One, Zero};

use crate::accessor::Accessor;
use crate::layout::Layout;
use crate::{check_static_extent, validate_bounds, Result, DYN};

// ============================================================================
// MatrixView
// ============================================================================

/// Immutable rank-2 strided view with a lazy element accessor.
///
/// # Type Parameters
/// - `'a`: Lifetime of the underlying data
/// - `T`: Element type
/// - `R`, `C`: Static extents, or [`DYN`](crate::DYN) for dynamic
#[derive(Clone, Copy)]
pub struct MatrixView<'a, T, const R: usize, const C: usize> {
    data: &'a [T],
    dims: [usize; 2],
    strides: [isize; 2],
    layout: Layout,
    accessor: Accessor<T>,
}

impl<T: std::fmt::Debug, const R: usize, const C: usize> std::fmt::Debug
    for MatrixView<'_, T, R, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixView")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("layout", &self.layout)
            .field("accessor", &self.accessor)
            .finish()
    }
}

impl<'a, T: Copy, const R: usize, const C: usize> MatrixView<'a, T, R, C> {
    /// Create a view over column-major storage.
    pub fn from_column_major(data: &'a [T], rows: usize, cols: usize) -> Result<Self> {
        Self::with_layout(data, [rows, cols], [1, rows as isize], Layout::ColumnMajor)
    }

    /// Create a view with arbitrary caller-supplied strides.
    pub fn from_strides(data: &'a [T], dims: [usize; 2], strides: [isize; 2]) -> Result<Self> {
        Self::with_layout(data, dims, strides, Layout::General)
    }

    fn with_layout(
        data: &'a [T],
        dims: [usize; 2],
        strides: [isize; 2],
        layout: Layout,
    ) -> Result<Self> {
        check_static_extent(R, dims[0])?;
        check_static_extent(C, dims[1])?;
        validate_bounds(data.len(), &dims, &strides)?;
        Ok(Self {
            data,
            dims,
            strides,
            layout,
            accessor: Accessor::Identity,
        })
    }

    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    #[inline]
    pub fn stride(&self, axis: usize) -> isize {
        self.strides[axis]
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn accessor(&self) -> Accessor<T> {
        self.accessor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    /// Pointer to the first stored element (untransformed).
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Transposed view: extents and strides swap, the layout toggles, the
    /// accessor is unchanged. Zero-copy.
    #[must_use]
    pub fn transposed(self) -> MatrixView<'a, T, C, R> {
        MatrixView {
            data: self.data,
            dims: [self.dims[1], self.dims[0]],
            strides: [self.strides[1], self.strides[0]],
            layout: self.layout.transposed(),
            accessor: self.accessor,
        }
    }
}

impl<'a, T, const R: usize, const C: usize> MatrixView<'a, T, R, C>
where
    T: Copy + Conjugate + One + std::ops::Mul<Output = T>,
{
    /// View reading `factor * x`. Folds into an existing accessor.
    #[must_use]
    pub fn scaled(self, factor: T) -> Self {
        Self {
            accessor: self.accessor.scaled(factor),
            ..self
        }
    }

    /// View reading `conj(x)`. Folds into an existing accessor.
    #[must_use]
    pub fn conjugated(self) -> Self {
        Self {
            accessor: self.accessor.conjugated(),
            ..self
        }
    }

    /// Read the element at `(i, j)` through the accessor.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.dims[0] && j < self.dims[1], "index out of bounds");
        let idx = i as isize * self.strides[0] + j as isize * self.strides[1];
        self.accessor.apply(self.data[idx as usize])
    }
}

// ============================================================================
// MatrixViewMut
// ============================================================================

/// Mutable rank-2 strided view. Identity access only: output elements are
/// written as stored, never through a scaling or conjugating accessor.
pub struct MatrixViewMut<'a, T, const R: usize, const C: usize> {
    data: &'a mut [T],
    dims: [usize; 2],
    strides: [isize; 2],
    layout: Layout,
}

impl<T: std::fmt::Debug, const R: usize, const C: usize> std::fmt::Debug
    for MatrixViewMut<'_, T, R, C>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixViewMut")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("layout", &self.layout)
            .finish()
    }
}

impl<'a, T: Copy, const R: usize, const C: usize> MatrixViewMut<'a, T, R, C> {
    /// Create a mutable view over column-major storage.
    pub fn from_column_major(data: &'a mut [T], rows: usize, cols: usize) -> Result<Self> {
        let strides = [1, rows as isize];
        Self::with_layout(data, [rows, cols], strides, Layout::ColumnMajor)
    }

    /// Create a mutable view with arbitrary caller-supplied strides.
    pub fn from_strides(data: &'a mut [T], dims: [usize; 2], strides: [isize; 2]) -> Result<Self> {
        Self::with_layout(data, dims, strides, Layout::General)
    }

    fn with_layout(
        data: &'a mut [T],
        dims: [usize; 2],
        strides: [isize; 2],
        layout: Layout,
    ) -> Result<Self> {
        check_static_extent(R, dims[0])?;
        check_static_extent(C, dims[1])?;
        validate_bounds(data.len(), &dims, &strides)?;
        Ok(Self {
            data,
            dims,
            strides,
            layout,
        })
    }

    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    #[inline]
    pub fn stride(&self, axis: usize) -> isize {
        self.strides[axis]
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        assert!(i < self.dims[0] && j < self.dims[1], "index out of bounds");
        (i as isize * self.strides[0] + j as isize * self.strides[1]) as usize
    }

    /// Read the stored element at `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[self.index(i, j)]
    }

    /// Write the element at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        let idx = self.index(i, j);
        self.data[idx] = value;
    }

    /// Immutable reborrow with the same shape and an identity accessor.
    pub fn as_view(&self) -> MatrixView<'_, T, R, C> {
        MatrixView {
            data: self.data,
            dims: self.dims,
            strides: self.strides,
            layout: self.layout,
            accessor: Accessor::Identity,
        }
    }
}

// ============================================================================
// Matrix (owned)
// ============================================================================

/// Owned column-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    /// Build from a generator called as `f(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for j in 0..cols {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Self { data, rows, cols }
    }

    /// Take ownership of column-major storage.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    pub fn from_column_major(data: Vec<T>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "storage length mismatch");
        Self { data, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.rows && j < self.cols, "index out of bounds");
        self.data[i + j * self.rows]
    }

    /// Dynamic-extent read view of the whole matrix.
    pub fn view(&self) -> MatrixView<'_, T, DYN, DYN> {
        MatrixView {
            data: &self.data,
            dims: [self.rows, self.cols],
            strides: [1, self.rows as isize],
            layout: Layout::ColumnMajor,
            accessor: Accessor::Identity,
        }
    }

    /// Dynamic-extent mutable view of the whole matrix.
    pub fn view_mut(&mut self) -> MatrixViewMut<'_, T, DYN, DYN> {
        MatrixViewMut {
            dims: [self.rows, self.cols],
            strides: [1, self.rows as isize],
            layout: Layout::ColumnMajor,
            data: &mut self.data,
        }
    }
}

impl<T: Copy + Zero> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }
}
