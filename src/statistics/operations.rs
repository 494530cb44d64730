//! Core statistical operations and traits
//!
//! This module defines the operation selector, the labelled result type used by
//! the NetCDF layer and the [`StatisticalReduction`] convenience trait.

use super::reducer;
use crate::errors::Result;
use crate::tensor::{Reduced, TensorView};
use ndarray::ArrayD;

/// Supported statistical operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatOperation {
    /// Arithmetic mean
    Mean,
    /// Middle value of the sorted data
    Median,
    /// Linear-interpolation percentile, `p` in `[0, 100]`
    Percentile(f64),
    /// Population variance
    Variance,
}

impl StatOperation {
    /// Get the string representation of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Percentile(_) => "percentile",
            Self::Variance => "variance",
        }
    }

    /// Short label used in generated variable names, e.g. `p90` for the 90th percentile
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Percentile(p) if p.fract() == 0.0 => format!("p{p:.0}"),
            Self::Percentile(p) => format!("p{p}").replace('.', "_"),
            other => other.as_str().to_string(),
        }
    }
}

/// Result of a statistical computation over a named dimension
#[derive(Debug, Clone)]
pub struct StatResult {
    /// The computed data array
    pub data: ArrayD<f64>,
    /// Names of remaining dimensions after reduction
    pub remaining_dimensions: Vec<String>,
    /// The operation that was performed
    pub operation: StatOperation,
    /// Original variable name
    pub variable_name: String,
    /// Dimension that was reduced over
    pub dimension_name: String,
}

impl StatResult {
    /// Create a new statistical result
    #[must_use]
    pub const fn new(
        data: ArrayD<f64>,
        remaining_dimensions: Vec<String>,
        operation: StatOperation,
        variable_name: String,
        dimension_name: String,
    ) -> Self {
        Self {
            data,
            remaining_dimensions,
            operation,
            variable_name,
            dimension_name,
        }
    }

    /// Name for the result variable, e.g. `temperature_mean_over_time`
    #[must_use]
    pub fn output_variable_name(&self) -> String {
        format!(
            "{}_{}_over_{}",
            self.variable_name,
            self.operation.label(),
            self.dimension_name
        )
    }

    /// Get the shape of the result data
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the number of dimensions in the result
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }
}

/// Types that can be reduced with any [`StatOperation`]
pub trait StatisticalReduction {
    /// Reduce globally (`axis = None`) or along one axis
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The axis is out of bounds for the array
    /// - The array has no elements
    /// - A percentile lies outside `[0, 100]`
    fn reduce(&self, axis: Option<usize>, operation: StatOperation) -> Result<Reduced>;

    /// Reduce along `axis` and return the array directly
    ///
    /// # Errors
    ///
    /// Same as [`StatisticalReduction::reduce`].
    fn reduce_along_axis(&self, axis: usize, operation: StatOperation) -> Result<ArrayD<f64>> {
        self.reduce(Some(axis), operation).map(Reduced::into_array)
    }
}

impl StatisticalReduction for TensorView<'_> {
    fn reduce(&self, axis: Option<usize>, operation: StatOperation) -> Result<Reduced> {
        match operation {
            StatOperation::Mean => reducer::mean(self, axis),
            StatOperation::Median => reducer::median(self, axis),
            StatOperation::Percentile(p) => reducer::percentile(self, p, axis),
            StatOperation::Variance => reducer::variance(self, None, axis),
        }
    }
}

impl StatisticalReduction for ArrayD<f64> {
    fn reduce(&self, axis: Option<usize>, operation: StatOperation) -> Result<Reduced> {
        TensorView::from(self).reduce(axis, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_variable_names() {
        assert_eq!(StatOperation::Mean.label(), "mean");
        assert_eq!(StatOperation::Percentile(90.0).label(), "p90");
        assert_eq!(StatOperation::Percentile(2.5).label(), "p2_5");
        assert_eq!(StatOperation::Percentile(2.5).as_str(), "percentile");
    }
}
