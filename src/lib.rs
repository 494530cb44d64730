//! RuNeStat: statistics over dense n-dimensional tensors
//!
//! RuNeStat computes means, medians, percentiles and population variances over
//! dense `f64` tensors, either over every element or along a single axis, with
//! axis reductions spread across cores by Rayon.
//!
//! ## Key Features
//!
//! - **Four reductions**: mean, median, linear-interpolation percentile and
//!   population variance
//! - **Axis semantics**: reducing along an axis removes that dimension; results
//!   are in row-major order over the remaining axes
//! - **Numerical care**: pairwise summation for long slices, two-pass variance
//! - **Explicit failures**: empty input, bad percentiles and mismatched means
//!   are errors, NaN inputs propagate as NaN
//! - **NetCDF support**: reduce variables by dimension name and write the result
//!   back out
//!
//! ## Module Organization
//!
//! - [`tensor`]: borrowed tensor views and reduction results
//! - [`statistics`]: the reducer, its kernels and the NetCDF front end
//! - [`netcdf_io`]: writing results to NetCDF files
//! - [`parallel`]: thread pool configuration
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust
//! use ru_ne_stat::prelude::*;
//!
//! let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let tensor = TensorView::from_slice(&data, &[2, 3]).unwrap();
//!
//! let means = statistics::mean(&tensor, Some(1)).unwrap();
//! assert_eq!(means.shape(), &[2]);
//!
//! let p25 = statistics::percentile(&tensor, 25.0, None).unwrap();
//! assert_eq!(p25.as_scalar(), Some(2.25));
//! ```

pub mod errors;
pub mod netcdf_io;
pub mod parallel;
pub mod statistics;
pub mod tensor;

pub use errors::{Result, RuNeStatError};
pub use netcdf_io::NetCDFWriter;
pub use parallel::{get_parallel_info, ParallelConfig, ParallelInfo};
pub use statistics::{StatOperation, StatResult, StatisticalReduction};
pub use tensor::{Reduced, TensorView};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{Result, RuNeStatError};
    pub use crate::netcdf_io::NetCDFWriter;
    pub use crate::parallel::ParallelConfig;
    pub use crate::statistics::{self, StatOperation, StatResult, StatisticalReduction};
    pub use crate::tensor::{Reduced, TensorView};
}
