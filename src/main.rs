//! Entry point for the RuNeStat application.
//! Handles CLI parsing, file loading, and dispatches reductions or the file listing.

use clap::Parser;
use netcdf::{open, File};
use ru_ne_stat::statistics::{compute_stat_over_dimension, summarize_variable, VariableSummary};
use ru_ne_stat::{NetCDFWriter, ParallelConfig, StatResult};
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    ParallelConfig::new(args.threads).setup_global_pool()?;

    let file = open(&args.file)?;
    tracing::info!(path = %args.file.display(), "opened NetCDF file");

    if let Some(var_name) = &args.summary {
        let summary = summarize_variable(&file, var_name)?;
        print_summary(var_name, &summary, args.json)?;
    } else if let Some(request) = args.request() {
        let result = compute_stat_over_dimension(
            &file,
            &request.variable,
            &request.dimension,
            request.operation,
        )?;

        if let Some(output_path) = &args.output_netcdf {
            NetCDFWriter::new(&file, output_path).write_result(&result)?;
            println!("Saved {} to {}", result.output_variable_name(), output_path.display());
        } else {
            print_result(&result, args.json)?;
        }
    } else {
        print_listing(&file);
    }

    Ok(())
}

fn print_result(result: &StatResult, as_json: bool) -> serde_json::Result<()> {
    if as_json {
        let doc = json!({
            "variable": result.output_variable_name(),
            "operation": result.operation.as_str(),
            "reduced_dimension": result.dimension_name,
            "dimensions": result.remaining_dimensions,
            "shape": result.shape(),
            "values": result.data.iter().copied().collect::<Vec<f64>>(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!(
            "{} ({}) shape {:?}",
            result.output_variable_name(),
            result.remaining_dimensions.join(", "),
            result.shape()
        );
        println!("{}", result.data);
    }
    Ok(())
}

fn print_summary(var_name: &str, summary: &VariableSummary, as_json: bool) -> serde_json::Result<()> {
    if as_json {
        let doc = json!({
            "variable": var_name,
            "count": summary.count,
            "min": summary.min,
            "max": summary.max,
            "mean": summary.mean,
            "median": summary.median,
            "variance": summary.variance,
            "std_dev": summary.std_dev,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("\n Summary for Variable: {}", var_name);
        println!("================================");
        println!("   Count: {}", summary.count);
        println!("   Min: {}", summary.min);
        println!("   Max: {}", summary.max);
        println!("   Mean: {:.4}", summary.mean);
        println!("   Median: {:.4}", summary.median);
        println!("   Variance: {:.4}", summary.variance);
        println!("   Std Dev: {:.4}", summary.std_dev);
    }
    Ok(())
}

fn print_listing(file: &File) {
    println!("\n Dimensions");
    println!("==============");
    let mut dimensions: Vec<_> = file.dimensions().collect();
    dimensions.sort_by(|a, b| a.name().cmp(&b.name()));
    for dim in dimensions {
        println!("    {} = {}", dim.name(), dim.len());
    }

    println!("\n Variables");
    println!("=============");
    let mut variables: Vec<_> = file.variables().collect();
    variables.sort_by(|a, b| a.name().cmp(&b.name()));
    for var in variables {
        let dims: Vec<String> = var
            .dimensions()
            .iter()
            .map(|d| format!("{}[{}]", d.name(), d.len()))
            .collect();
        println!("    {} ({})", var.name(), dims.join(", "));
    }
}
