//! Defines command-line interface options using `clap` for the RuNeStat application.

use clap::{ArgGroup, Parser};
use ru_ne_stat::StatOperation;
use std::path::PathBuf;

/// Compute mean, median, percentile and variance of NetCDF variables
#[derive(Parser, Debug)]
#[command(
    version,
    name = "RuNeStat",
    about = "Tensor statistics for NetCDF variables"
)]
#[command(group(
    ArgGroup::new("operation")
        .args(["mean", "median", "percentile", "variance", "summary"])
        .multiple(false)
))]
pub struct Args {
    /// Path to the NetCDF file
    #[arg(short, long)]
    pub file: PathBuf,

    /// Compute the mean of a variable over a dimension, formatted as <var>:<dim>
    #[arg(long, value_parser = parse_var_dim_arg)]
    pub mean: Option<(String, String)>,

    /// Compute the median of a variable over a dimension, formatted as <var>:<dim>
    #[arg(long, value_parser = parse_var_dim_arg)]
    pub median: Option<(String, String)>,

    /// Compute a percentile of a variable over a dimension, formatted as <var>:<dim>:<p>
    #[arg(long, value_parser = parse_percentile_arg)]
    pub percentile: Option<PercentileSpec>,

    /// Compute the population variance of a variable over a dimension, formatted as <var>:<dim>
    #[arg(long, value_parser = parse_var_dim_arg)]
    pub variance: Option<(String, String)>,

    /// Compute whole-variable statistics (count/min/max/mean/median/variance/std)
    #[arg(long)]
    pub summary: Option<String>,

    /// Path to save the result as NetCDF. If not set, prints to terminal.
    #[arg(long)]
    pub output_netcdf: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose (debug) logging. `RUST_LOG` takes precedence.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Number of threads to use for parallel processing. Defaults to number of CPU cores.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,
}

/// A percentile request parsed from `<var>:<dim>:<p>`
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileSpec {
    pub variable: String,
    pub dimension: String,
    pub p: f64,
}

/// The reduction requested on the command line, if any
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub operation: StatOperation,
    pub variable: String,
    pub dimension: String,
}

impl Args {
    /// The axis reduction selected by the flags, if any
    pub fn request(&self) -> Option<Request> {
        let simple = |pair: &Option<(String, String)>, operation| {
            pair.as_ref().map(|(variable, dimension)| Request {
                operation,
                variable: variable.clone(),
                dimension: dimension.clone(),
            })
        };

        simple(&self.mean, StatOperation::Mean)
            .or_else(|| simple(&self.median, StatOperation::Median))
            .or_else(|| simple(&self.variance, StatOperation::Variance))
            .or_else(|| {
                self.percentile.as_ref().map(|spec| Request {
                    operation: StatOperation::Percentile(spec.p),
                    variable: spec.variable.clone(),
                    dimension: spec.dimension.clone(),
                })
            })
    }
}

fn parse_var_dim_arg(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [var, dim] if !var.is_empty() && !dim.is_empty() => {
            Ok((var.to_string(), dim.to_string()))
        }
        _ => Err("Invalid format: Expected '<variable>:<dimension>'.".to_string()),
    }
}

fn parse_percentile_arg(s: &str) -> Result<PercentileSpec, String> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [var, dim, p] if !var.is_empty() && !dim.is_empty() => {
            let p = p
                .parse::<f64>()
                .map_err(|_| format!("Invalid percentile '{}': expected a number", p))?;
            Ok(PercentileSpec {
                variable: var.to_string(),
                dimension: dim.to_string(),
                p,
            })
        }
        _ => Err("Invalid format: Expected '<variable>:<dimension>:<p>'.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percentile_spec() {
        let spec = parse_percentile_arg("temperature:time:90").unwrap();
        assert_eq!(spec.variable, "temperature");
        assert_eq!(spec.dimension, "time");
        assert_eq!(spec.p, 90.0);

        assert!(parse_percentile_arg("temperature:time").is_err());
        assert!(parse_percentile_arg("temperature:time:high").is_err());
    }

    #[test]
    fn rejects_malformed_var_dim() {
        assert!(parse_var_dim_arg("temperature").is_err());
        assert!(parse_var_dim_arg("temperature:").is_err());
        assert!(parse_var_dim_arg("a:b:c").is_err());
    }

    #[test]
    fn operations_are_mutually_exclusive() {
        let parsed = Args::try_parse_from([
            "runestat", "--file", "x.nc", "--mean", "t:time", "--median", "t:time",
        ]);
        assert!(parsed.is_err());

        let args = Args::try_parse_from(["runestat", "--file", "x.nc", "--percentile", "t:time:25"])
            .unwrap();
        let request = args.request().unwrap();
        assert_eq!(request.operation, StatOperation::Percentile(25.0));
        assert_eq!(request.dimension, "time");
    }
}
