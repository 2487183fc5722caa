//! Error types for raster handling, comparator construction and state persistence

use std::fmt;
use std::path::PathBuf;

/// Main error type for all search operations
#[derive(Debug)]
pub enum SearchError {
    /// Failed to load a raster image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Raster data doesn't meet format requirements
    ///
    /// Raised for malformed PNM headers, token counts that disagree with
    /// the declared dimensions, ragged rows and corrupt serialized rasters.
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Two rasters that must agree in size did not
    DimensionMismatch {
        /// Operation that detected the mismatch
        operation: &'static str,
        /// Required dimensions (rows, cols)
        expected: (usize, usize),
        /// Supplied dimensions (rows, cols)
        actual: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Variant name not present in the catalogue
    UnknownVariant {
        /// The name that failed to parse
        name: String,
    },

    /// Serialized state belongs to a different variant than requested
    VariantMismatch {
        /// Variant requested by the caller
        expected: String,
        /// Variant recorded in the serialized state
        found: String,
    },

    /// Failed to save a raster image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// State (de)serialization failure
    Serialization {
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::DimensionMismatch {
                operation,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Dimension mismatch in {operation}: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownVariant { name } => {
                write!(f, "Unknown shape variant '{name}'")
            }
            Self::VariantMismatch { expected, found } => {
                write!(
                    f,
                    "Serialized state is a {found} but a {expected} was requested"
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { source } => {
                write!(f, "State serialization failed: {source}")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for search results
pub type Result<T> = std::result::Result<T, SearchError>;

impl From<image::ImageError> for SearchError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SearchError {
    SearchError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a dimension mismatch error
pub const fn dimension_mismatch(
    operation: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> SearchError {
    SearchError::DimensionMismatch {
        operation,
        expected,
        actual,
    }
}

/// Create an invalid source data error
pub fn invalid_data(reason: &impl ToString) -> SearchError {
    SearchError::InvalidSourceData {
        reason: reason.to_string(),
    }
}
