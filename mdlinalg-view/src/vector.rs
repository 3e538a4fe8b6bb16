//! Rank-1 strided views and the owned vector.

use mdlinalg_traits::Conjugate;
use num_traits::{One, Zero};

use crate::accessor::Accessor;
use crate::{check_static_extent, validate_bounds, Result, DYN};

/// Immutable rank-1 strided view with a lazy element accessor.
#[derive(Clone, Copy)]
pub struct VectorView<'a, T, const N: usize> {
    data: &'a [T],
    len: usize,
    stride: isize,
    accessor: Accessor<T>,
}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for VectorView<'_, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorView")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .field("accessor", &self.accessor)
            .finish()
    }
}

impl<'a, T: Copy, const N: usize> VectorView<'a, T, N> {
    /// Contiguous view of a whole slice.
    pub fn from_slice(data: &'a [T]) -> Result<Self> {
        Self::from_strides(data, data.len(), 1)
    }

    /// Strided view of `len` elements.
    pub fn from_strides(data: &'a [T], len: usize, stride: isize) -> Result<Self> {
        check_static_extent(N, len)?;
        validate_bounds(data.len(), &[len], &[stride])?;
        Ok(Self {
            data,
            len,
            stride,
            accessor: Accessor::Identity,
        })
    }

    #[inline]
    pub fn extent(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }

    #[inline]
    pub fn accessor(&self) -> Accessor<T> {
        self.accessor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<'a, T, const N: usize> VectorView<'a, T, N>
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

    /// Read the element at `i` through the accessor.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        assert!(i < self.len, "index out of bounds");
        let idx = i as isize * self.stride;
        self.accessor.apply(self.data[idx as usize])
    }
}

/// Mutable rank-1 strided view. Identity access only.
pub struct VectorViewMut<'a, T, const N: usize> {
    data: &'a mut [T],
    len: usize,
    stride: isize,
}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for VectorViewMut<'_, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorViewMut")
            .field("len", &self.len)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<'a, T: Copy, const N: usize> VectorViewMut<'a, T, N> {
    /// Contiguous mutable view of a whole slice.
    pub fn from_slice(data: &'a mut [T]) -> Result<Self> {
        let len = data.len();
        Self::from_strides(data, len, 1)
    }

    /// Strided mutable view of `len` elements.
    pub fn from_strides(data: &'a mut [T], len: usize, stride: isize) -> Result<Self> {
        check_static_extent(N, len)?;
        validate_bounds(data.len(), &[len], &[stride])?;
        Ok(Self { data, len, stride })
    }

    #[inline]
    pub fn extent(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }

    #[inline]
    fn index(&self, i: usize) -> usize {
        assert!(i < self.len, "index out of bounds");
        (i as isize * self.stride) as usize
    }

    /// Read the stored element at `i`.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.data[self.index(i)]
    }

    /// Write the element at `i`.
    #[inline]
    pub fn set(&mut self, i: usize, value: T) {
        let idx = self.index(i);
        self.data[idx] = value;
    }
}

/// Owned contiguous vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Copy> Vector<T> {
    /// Build from a generator called as `f(i)`.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..len).map(f).collect(),
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.data[i]
    }

    /// Dynamic-extent read view of the whole vector.
    pub fn view(&self) -> VectorView<'_, T, DYN> {
        VectorView {
            data: &self.data,
            len: self.data.len(),
            stride: 1,
            accessor: Accessor::Identity,
        }
    }

    /// Dynamic-extent mutable view of the whole vector.
    pub fn view_mut(&mut self) -> VectorViewMut<'_, T, DYN> {
        VectorViewMut {
            len: self.data.len(),
            stride: 1,
            data: &mut self.data,
        }
    }
}

impl<T: Copy + Zero> Vector<T> {
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }
}
