//! NetCDF output of reduction results
//!
//! Writes a [`StatResult`] to a new NetCDF file, carrying over the attributes
//! of the source variable and recording how the result was produced.

use crate::errors::{Result, RuNeStatError};
use crate::statistics::netcdf::fill_value;
use crate::statistics::StatResult;
use chrono::Utc;
use netcdf::{create, AttributeValue, File};
use std::{fs, path::Path};
use tracing::{info, warn};

/// Writer for statistical results
pub struct NetCDFWriter<'a> {
    input_file: &'a File,
    output_path: &'a Path,
}

impl<'a> NetCDFWriter<'a> {
    /// Create a new NetCDF writer
    #[must_use]
    pub fn new(input_file: &'a File, output_path: &'a Path) -> Self {
        Self {
            input_file,
            output_path,
        }
    }

    /// Write a statistical result to the output file, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns [`RuNeStatError::InvalidArgument`] if the output path is the
    /// input file, and an error if the source variable no longer exists or any
    /// NetCDF or filesystem operation fails.
    pub fn write_result(&self, result: &StatResult) -> Result<()> {
        let orig_var = self
            .input_file
            .variable(&result.variable_name)
            .ok_or_else(|| RuNeStatError::VariableNotFound {
                var: result.variable_name.clone(),
            })?;

        if self.output_path.exists() {
            let input_path = fs::canonicalize(self.input_file.path()?)?;
            if fs::canonicalize(self.output_path)? == input_path {
                return Err(RuNeStatError::InvalidArgument {
                    message: format!(
                        "output path {} is the input file",
                        self.output_path.display()
                    ),
                });
            }
            fs::remove_file(self.output_path)?;
        }

        let mut file = create(self.output_path)?;

        for (dim_name, &dim_len) in result.remaining_dimensions.iter().zip(result.shape()) {
            file.add_dimension(dim_name, dim_len)?;
        }

        let fill = fill_value(&orig_var);

        let var_name = result.output_variable_name();
        let dim_refs: Vec<&str> = result
            .remaining_dimensions
            .iter()
            .map(String::as_str)
            .collect();
        let mut new_var = file.add_variable::<f64>(&var_name, &dim_refs)?;

        if let Some(fv) = fill {
            new_var.put_attribute("_FillValue", fv)?;
        }

        new_var.put(result.data.view(), ..)?;

        for attr in orig_var.attributes().filter(|a| a.name() != "_FillValue") {
            match attr.value()? {
                AttributeValue::Str(val) => {
                    new_var.put_attribute(attr.name(), val)?;
                }
                AttributeValue::Strs(vals) => {
                    new_var.put_attribute(attr.name(), vals)?;
                }
                AttributeValue::Float(val) => {
                    new_var.put_attribute(attr.name(), val)?;
                }
                AttributeValue::Floats(vals) => {
                    new_var.put_attribute(attr.name(), vals)?;
                }
                AttributeValue::Double(val) => {
                    new_var.put_attribute(attr.name(), val)?;
                }
                AttributeValue::Doubles(vals) => {
                    new_var.put_attribute(attr.name(), vals)?;
                }
                AttributeValue::Int(val) => {
                    new_var.put_attribute(attr.name(), val)?;
                }
                AttributeValue::Ints(vals) => {
                    new_var.put_attribute(attr.name(), vals)?;
                }
                AttributeValue::Short(val) => {
                    new_var.put_attribute(attr.name(), val)?;
                }
                AttributeValue::Shorts(vals) => {
                    new_var.put_attribute(attr.name(), vals)?;
                }
                _ => {
                    warn!(attribute = %attr.name(), "skipped unsupported attribute type");
                }
            }
        }

        new_var.put_attribute("statistic", result.operation.label())?;
        new_var.put_attribute("reduced_dimension", result.dimension_name.as_str())?;

        file.add_attribute(
            "history",
            format!("Created by RuNeStat on {}", Utc::now().to_rfc3339()),
        )?;

        info!(
            variable = %var_name,
            path = %self.output_path.display(),
            "wrote reduction result"
        );

        Ok(())
    }
}
