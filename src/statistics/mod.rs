//! Statistical reductions over dense tensors
//!
//! This module computes mean, median, percentile and variance over whole
//! tensors or along a single axis, using parallel processing for axis
//! reductions.
//!
//! # Organization
//!
//! - [`reducer`]: the four reductions over a [`TensorView`](crate::tensor::TensorView)
//! - [`kernels`]: slice-level arithmetic (pairwise summation, order statistics)
//! - [`parallel`]: lane fan-out with pre-indexed output slots
//! - [`operations`]: operation selector, labelled results and the reduction trait
//! - [`netcdf`]: reductions over NetCDF variables by dimension name

pub mod kernels;
pub mod netcdf;
pub mod operations;
pub mod parallel;
pub mod reducer;

pub use self::netcdf::{
    compute_stat_over_dimension, mean_over_dimension, median_over_dimension,
    percentile_over_dimension, summarize_variable, variance_over_dimension, VariableSummary,
};
pub use operations::{StatOperation, StatResult, StatisticalReduction};
pub use reducer::{mean, median, percentile, variance};
