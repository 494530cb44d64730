//! Centralized error handling for RuNeStat
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! separates hard reduction failures (empty input, bad arguments, shape
//! mismatches) from the I/O and configuration failures of the NetCDF layer.

use std::fmt;

/// Main error type for RuNeStat operations
#[derive(Debug)]
pub enum RuNeStatError {
    /// A reduction was attempted over zero elements
    EmptyTensor { operation: String },

    /// An argument is outside its accepted domain (e.g. a percentile outside `[0, 100]`)
    InvalidArgument { message: String },

    /// Two shapes that must agree do not
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Axis index is not smaller than the tensor rank
    AxisOutOfBounds { axis: usize, ndim: usize },

    /// NetCDF file operation errors
    NetCDFError(netcdf::Error),

    /// I/O operation errors
    IoError(std::io::Error),

    /// Variable not found in NetCDF file
    VariableNotFound { var: String },

    /// Dimension not found in variable
    DimensionNotFound { var: String, dim: String },

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Array shape or dimension error raised by ndarray
    ArrayError(ndarray::ShapeError),

    /// Anything else
    Generic(String),
}

impl fmt::Display for RuNeStatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuNeStatError::EmptyTensor { operation } => {
                write!(f, "Cannot compute {} of an empty tensor", operation)
            }
            RuNeStatError::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            RuNeStatError::ShapeMismatch { expected, found } => {
                write!(f, "Shape mismatch: expected {:?}, found {:?}", expected, found)
            }
            RuNeStatError::AxisOutOfBounds { axis, ndim } => write!(
                f,
                "Axis {} is out of bounds for array with {} dimensions",
                axis, ndim
            ),
            RuNeStatError::NetCDFError(e) => write!(f, "NetCDF error: {}", e),
            RuNeStatError::IoError(e) => write!(f, "I/O error: {}", e),
            RuNeStatError::VariableNotFound { var } => {
                write!(f, "Variable '{}' not found in file", var)
            }
            RuNeStatError::DimensionNotFound { var, dim } => {
                write!(f, "Dimension '{}' not found in variable '{}'", dim, var)
            }
            RuNeStatError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            RuNeStatError::ArrayError(e) => write!(f, "Array error: {}", e),
            RuNeStatError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RuNeStatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuNeStatError::NetCDFError(e) => Some(e),
            RuNeStatError::IoError(e) => Some(e),
            RuNeStatError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl RuNeStatError {
    pub(crate) fn empty(operation: &str) -> Self {
        RuNeStatError::EmptyTensor {
            operation: operation.to_string(),
        }
    }

    /// True for the errors raised by the reduction engine itself, as opposed
    /// to file, array construction or thread pool failures.
    #[must_use]
    pub fn is_reduction_error(&self) -> bool {
        matches!(
            self,
            RuNeStatError::EmptyTensor { .. }
                | RuNeStatError::InvalidArgument { .. }
                | RuNeStatError::ShapeMismatch { .. }
                | RuNeStatError::AxisOutOfBounds { .. }
        )
    }
}

impl From<netcdf::Error> for RuNeStatError {
    fn from(error: netcdf::Error) -> Self {
        RuNeStatError::NetCDFError(error)
    }
}

impl From<std::io::Error> for RuNeStatError {
    fn from(error: std::io::Error) -> Self {
        RuNeStatError::IoError(error)
    }
}

impl From<ndarray::ShapeError> for RuNeStatError {
    fn from(error: ndarray::ShapeError) -> Self {
        RuNeStatError::ArrayError(error)
    }
}

impl From<String> for RuNeStatError {
    fn from(error: String) -> Self {
        RuNeStatError::Generic(error)
    }
}

impl From<&str> for RuNeStatError {
    fn from(error: &str) -> Self {
        RuNeStatError::Generic(error.to_string())
    }
}

/// Result type alias for RuNeStat operations
pub type Result<T> = std::result::Result<T, RuNeStatError>;
