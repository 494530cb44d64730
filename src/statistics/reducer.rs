//! The statistical reducer: mean, median, percentile and variance
//!
//! Every operation reduces either the whole tensor (`axis = None`, scalar
//! result) or each 1-D lane along one axis (tensor result with that axis
//! removed). All arguments are validated before any data is traversed, and a
//! failed call produces no output.
//!
//! NaN inputs are not errors: a NaN in a lane makes that lane's result NaN.

use super::kernels;
use super::parallel::{reduce_lanes, reduce_lanes_with};
use crate::errors::{Result, RuNeStatError};
use crate::tensor::{Reduced, TensorView};
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use std::borrow::Cow;

fn validate(tensor: &TensorView<'_>, axis: Option<usize>, operation: &str) -> Result<()> {
    if let Some(axis) = axis {
        tensor.check_axis(axis)?;
    }
    if tensor.is_empty() {
        return Err(RuNeStatError::empty(operation));
    }
    Ok(())
}

/// All elements as one slice, borrowed when the memory is contiguous.
fn flat_values<'a>(data: &'a ArrayViewD<'_, f64>) -> Cow<'a, [f64]> {
    match data.as_slice_memory_order() {
        Some(values) => Cow::Borrowed(values),
        None => Cow::Owned(data.iter().copied().collect()),
    }
}

/// Arithmetic mean, globally or along `axis`.
///
/// # Errors
///
/// [`RuNeStatError::AxisOutOfBounds`] for a bad axis,
/// [`RuNeStatError::EmptyTensor`] when the tensor has no elements.
pub fn mean(tensor: &TensorView<'_>, axis: Option<usize>) -> Result<Reduced> {
    validate(tensor, axis, "mean")?;
    let data = tensor.as_array();

    Ok(match axis {
        None => Reduced::Scalar(kernels::mean(&flat_values(data))),
        Some(axis) => Reduced::Tensor(reduce_lanes(data, axis, |lane| {
            kernels::with_lane_slice(lane, kernels::mean)
        })),
    })
}

/// Median, globally or along `axis`. Even-length slices average the two
/// middle values.
///
/// # Errors
///
/// [`RuNeStatError::AxisOutOfBounds`] for a bad axis,
/// [`RuNeStatError::EmptyTensor`] when the tensor has no elements.
pub fn median(tensor: &TensorView<'_>, axis: Option<usize>) -> Result<Reduced> {
    validate(tensor, axis, "median")?;
    let data = tensor.as_array();

    Ok(match axis {
        None => Reduced::Scalar(kernels::median(&flat_values(data))),
        Some(axis) => Reduced::Tensor(reduce_lanes(data, axis, |lane| {
            kernels::with_lane_slice(lane, kernels::median)
        })),
    })
}

/// Percentile `p` (in `[0, 100]`) by linear interpolation between the
/// closest ranks, globally or along `axis`.
///
/// # Errors
///
/// [`RuNeStatError::InvalidArgument`] when `p` is NaN or outside `[0, 100]`
/// (checked first), then the same errors as [`mean`].
pub fn percentile(tensor: &TensorView<'_>, p: f64, axis: Option<usize>) -> Result<Reduced> {
    if !(0.0..=100.0).contains(&p) {
        return Err(RuNeStatError::InvalidArgument {
            message: format!("percentile must be within [0, 100], got {p}"),
        });
    }
    validate(tensor, axis, "percentile")?;
    let data = tensor.as_array();

    Ok(match axis {
        None => Reduced::Scalar(kernels::percentile(&flat_values(data), p)),
        Some(axis) => Reduced::Tensor(reduce_lanes(data, axis, |lane| {
            kernels::with_lane_slice(lane, |values| kernels::percentile(values, p))
        })),
    })
}

/// Population variance, globally or along `axis`.
///
/// A supplied `mean` is used as the deviation reference without being
/// recomputed. It must be a scalar for a global reduction and have exactly the
/// reduced shape for an axis reduction. Without one, [`mean`] runs first.
///
/// # Errors
///
/// [`RuNeStatError::AxisOutOfBounds`] for a bad axis,
/// [`RuNeStatError::EmptyTensor`] when the tensor has no elements,
/// [`RuNeStatError::ShapeMismatch`] when `mean` has the wrong shape.
pub fn variance(
    tensor: &TensorView<'_>,
    mean: Option<&Reduced>,
    axis: Option<usize>,
) -> Result<Reduced> {
    validate(tensor, axis, "variance")?;

    let expected = match axis {
        None => Vec::new(),
        Some(axis) => tensor.reduced_shape(axis)?,
    };

    let computed;
    let mean = match mean {
        Some(supplied) => {
            if supplied.shape() != expected.as_slice() {
                return Err(RuNeStatError::ShapeMismatch {
                    expected,
                    found: supplied.shape().to_vec(),
                });
            }
            supplied
        }
        None => {
            computed = self::mean(tensor, axis)?;
            &computed
        }
    };

    let data = tensor.as_array();
    match axis {
        None => {
            let center = mean.as_scalar().ok_or_else(|| {
                RuNeStatError::Generic("scalar mean expected for a global variance".to_string())
            })?;
            Ok(Reduced::Scalar(kernels::variance(&flat_values(data), center)))
        }
        Some(axis) => {
            let wrapped;
            let centers = match mean {
                Reduced::Tensor(array) => array.view(),
                Reduced::Scalar(value) => {
                    wrapped = ArrayD::from_elem(IxDyn(&[]), *value);
                    wrapped.view()
                }
            };
            Ok(Reduced::Tensor(reduce_lanes_with(
                data,
                axis,
                &centers,
                |lane, center| kernels::with_lane_slice(lane, |values| kernels::variance(values, center)),
            )))
        }
    }
}
