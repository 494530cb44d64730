//! NetCDF-backed statistical functions
//!
//! Loads a variable from an open NetCDF file, resolves a dimension name to an
//! axis and hands the data to the reducer. Cells holding the variable's
//! `_FillValue` are loaded as NaN, so they follow the NaN propagation rules.

use super::operations::{StatOperation, StatResult, StatisticalReduction};
use super::reducer;
use crate::errors::{Result, RuNeStatError};
use crate::tensor::{Reduced, TensorView};
use ndarray::ArrayD;
use netcdf::{AttributeValue, File, Variable};
use tracing::info;

/// Computes the mean of a NetCDF variable over one of its dimensions
///
/// # Errors
///
/// Returns an error if the variable or dimension is not found, or if the
/// reduction fails.
pub fn mean_over_dimension(file: &File, var_name: &str, dim_name: &str) -> Result<StatResult> {
    compute_stat_over_dimension(file, var_name, dim_name, StatOperation::Mean)
}

/// Computes the median of a NetCDF variable over one of its dimensions
///
/// # Errors
///
/// Returns an error if the variable or dimension is not found, or if the
/// reduction fails.
pub fn median_over_dimension(file: &File, var_name: &str, dim_name: &str) -> Result<StatResult> {
    compute_stat_over_dimension(file, var_name, dim_name, StatOperation::Median)
}

/// Computes percentile `p` of a NetCDF variable over one of its dimensions
///
/// # Errors
///
/// Returns an error if `p` is outside `[0, 100]`, if the variable or dimension
/// is not found, or if the reduction fails.
pub fn percentile_over_dimension(
    file: &File,
    var_name: &str,
    dim_name: &str,
    p: f64,
) -> Result<StatResult> {
    compute_stat_over_dimension(file, var_name, dim_name, StatOperation::Percentile(p))
}

/// Computes the population variance of a NetCDF variable over one of its dimensions
///
/// # Errors
///
/// Returns an error if the variable or dimension is not found, or if the
/// reduction fails.
pub fn variance_over_dimension(
    file: &File,
    var_name: &str,
    dim_name: &str,
) -> Result<StatResult> {
    compute_stat_over_dimension(file, var_name, dim_name, StatOperation::Variance)
}

/// Generic function to compute statistics over a named dimension
///
/// # Errors
///
/// Returns an error if the variable or dimension is not found, or if the
/// reduction fails.
pub fn compute_stat_over_dimension(
    file: &File,
    var_name: &str,
    dim_name: &str,
    operation: StatOperation,
) -> Result<StatResult> {
    let var = find_variable(file, var_name)?;

    let dim_names: Vec<String> = var
        .dimensions()
        .iter()
        .map(|d| d.name().to_string())
        .collect();

    let axis_index = dim_names
        .iter()
        .position(|d| d == dim_name)
        .ok_or_else(|| RuNeStatError::DimensionNotFound {
            var: var_name.to_string(),
            dim: dim_name.to_string(),
        })?;

    let data = load_variable(&var)?;

    info!(
        variable = var_name,
        dimension = dim_name,
        operation = operation.as_str(),
        shape = ?data.shape(),
        "computing reduction over dimension"
    );

    let result = data.reduce_along_axis(axis_index, operation)?;

    let kept_dim_names: Vec<String> = dim_names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| if i == axis_index { None } else { Some(name) })
        .collect();

    Ok(StatResult::new(
        result,
        kept_dim_names,
        operation,
        var_name.to_string(),
        dim_name.to_string(),
    ))
}

/// Whole-variable descriptive statistics
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
}

/// Computes count, min, max, mean, median, variance and standard deviation
/// over every element of a variable.
///
/// NaN elements, including masked fill values, are skipped for `min` and
/// `max` only; the other statistics follow the usual NaN propagation.
///
/// # Errors
///
/// Returns an error if the variable is not found or has no elements.
pub fn summarize_variable(file: &File, var_name: &str) -> Result<VariableSummary> {
    let var = find_variable(file, var_name)?;
    let data = load_variable(&var)?;
    let view = TensorView::from(&data);

    let mean = reducer::mean(&view, None)?;
    let variance = scalar(reducer::variance(&view, Some(&mean), None)?)?;
    let median = scalar(reducer::median(&view, None)?)?;
    let mean = scalar(mean)?;

    let min = data.iter().copied().fold(f64::NAN, f64::min);
    let max = data.iter().copied().fold(f64::NAN, f64::max);

    Ok(VariableSummary {
        count: data.len(),
        min,
        max,
        mean,
        median,
        variance,
        std_dev: variance.sqrt(),
    })
}

fn scalar(reduced: Reduced) -> Result<f64> {
    reduced
        .as_scalar()
        .ok_or_else(|| RuNeStatError::Generic("global reduction returned a tensor".to_string()))
}

fn find_variable<'f>(file: &'f File, var_name: &str) -> Result<Variable<'f>> {
    file.variable(var_name)
        .ok_or_else(|| RuNeStatError::VariableNotFound {
            var: var_name.to_string(),
        })
}

/// The variable's `_FillValue` attribute as `f64`, if it has a numeric one.
pub(crate) fn fill_value(var: &Variable<'_>) -> Option<f64> {
    match var.attribute("_FillValue")?.value().ok()? {
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        _ => None,
    }
}

/// Reads a whole variable as `f64`, shaped by its dimensions.
///
/// Cells equal to the variable's `_FillValue` become NaN.
fn load_variable(var: &Variable<'_>) -> Result<ArrayD<f64>> {
    let shape: Vec<usize> = var
        .dimensions()
        .iter()
        .map(netcdf::Dimension::len)
        .collect();
    let mut values = var.get_values::<f64, _>(..)?;

    let mut masked = 0usize;
    if let Some(fill) = fill_value(var) {
        for value in values.iter_mut().filter(|v| **v == fill) {
            *value = f64::NAN;
            masked += 1;
        }
    }

    info!(variable = %var.name(), shape = ?shape, masked, "loaded variable");
    Ok(ArrayD::from_shape_vec(shape, values)?)
}
