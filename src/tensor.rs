//! Tensor views and reduction results
//!
//! A [`TensorView`] borrows dense `f64` data together with its shape (and, when
//! built from an `ndarray` view, its strides). Reductions never mutate or retain
//! the view. A [`Reduced`] value is what every reduction hands back: a scalar
//! for a global reduction or a freshly allocated tensor one rank lower for an
//! axis reduction.

use crate::errors::{Result, RuNeStatError};
use ndarray::{ArrayD, ArrayViewD, IxDyn};

/// Immutable view over a dense n-dimensional `f64` tensor
#[derive(Debug, Clone)]
pub struct TensorView<'a> {
    data: ArrayViewD<'a, f64>,
}

impl<'a> TensorView<'a> {
    /// Wrap an existing `ndarray` view. Any stride layout is accepted.
    #[must_use]
    pub fn new(data: ArrayViewD<'a, f64>) -> Self {
        Self { data }
    }

    /// Build a row-major view over a flat buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RuNeStatError::ShapeMismatch`] when the product of `shape`
    /// differs from the buffer length. `found` then holds the buffer length.
    pub fn from_slice(data: &'a [f64], shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(RuNeStatError::ShapeMismatch {
                expected: shape.to_vec(),
                found: vec![data.len()],
            });
        }

        let view = ArrayViewD::from_shape(IxDyn(shape), data)?;
        Ok(Self { data: view })
    }

    /// Extent of each dimension
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Number of dimensions
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Total number of elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying `ndarray` view
    #[must_use]
    pub fn as_array(&self) -> &ArrayViewD<'a, f64> {
        &self.data
    }

    /// Shape of the result of reducing along `axis`: the input shape with
    /// that dimension removed.
    ///
    /// # Errors
    ///
    /// Returns [`RuNeStatError::AxisOutOfBounds`] if `axis >= ndim`.
    pub fn reduced_shape(&self, axis: usize) -> Result<Vec<usize>> {
        self.check_axis(axis)?;
        let mut shape = self.shape().to_vec();
        shape.remove(axis);
        Ok(shape)
    }

    pub(crate) fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.ndim() {
            return Err(RuNeStatError::AxisOutOfBounds {
                axis,
                ndim: self.ndim(),
            });
        }
        Ok(())
    }
}

impl<'a> From<ArrayViewD<'a, f64>> for TensorView<'a> {
    fn from(data: ArrayViewD<'a, f64>) -> Self {
        Self::new(data)
    }
}

impl<'a> From<&'a ArrayD<f64>> for TensorView<'a> {
    fn from(data: &'a ArrayD<f64>) -> Self {
        Self::new(data.view())
    }
}

/// Output of a reduction
#[derive(Debug, Clone, PartialEq)]
pub enum Reduced {
    /// Result of a global reduction
    Scalar(f64),
    /// Result of an axis reduction, one rank lower than the input
    Tensor(ArrayD<f64>),
}

impl Reduced {
    /// Shape of the result; a scalar has the empty shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            Reduced::Scalar(_) => &[],
            Reduced::Tensor(array) => array.shape(),
        }
    }

    /// The scalar value, also for a zero-dimensional tensor
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Reduced::Scalar(value) => Some(*value),
            Reduced::Tensor(array) if array.ndim() == 0 => array.first().copied(),
            Reduced::Tensor(_) => None,
        }
    }

    #[must_use]
    pub fn as_tensor(&self) -> Option<&ArrayD<f64>> {
        match self {
            Reduced::Scalar(_) => None,
            Reduced::Tensor(array) => Some(array),
        }
    }

    /// Convert into an array; a scalar becomes a zero-dimensional array.
    #[must_use]
    pub fn into_array(self) -> ArrayD<f64> {
        match self {
            Reduced::Scalar(value) => ArrayD::from_elem(IxDyn(&[]), value),
            Reduced::Tensor(array) => array,
        }
    }
}
