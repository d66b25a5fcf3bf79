//! Error types for automaton construction, evolution setup and peripheral I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all automaton operations
///
/// Every variant except the peripheral I/O ones is a validation failure raised
/// before the first generation is computed.
#[derive(Debug)]
pub enum AutomatonError {
    /// Elementary rule number outside `[0, 255]`
    InvalidRuleNumber {
        /// The rejected rule number
        value: i64,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An initial vector with no cells
    EmptyInitialVector,

    /// A cell value other than 0 or 1
    InvalidCell {
        /// Position of the offending cell
        index: usize,
        /// The value found there
        value: u8,
    },

    /// Initial density is already homogeneous and the policy rejects it
    DegenerateDensity {
        /// Density of the initial vector (exactly 0.0 or 1.0)
        density: f64,
    },

    /// Failed to save a rendered history to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
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

    /// Malformed line in a corpus or parameter list
    Parse {
        /// One-based line number
        line: usize,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AutomatonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRuleNumber { value } => {
                write!(f, "Rule number {value} is out of range (expected 0..=255)")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyInitialVector => write!(f, "Initial vector must contain at least one cell"),
            Self::InvalidCell { index, value } => {
                write!(f, "Cell {index} has value {value} (expected 0 or 1)")
            }
            Self::DegenerateDensity { density } => {
                write!(
                    f,
                    "Initial density {density} is already homogeneous; nothing to classify"
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
            Self::Parse { line, reason } => write!(f, "Parse error on line {line}: {reason}"),
        }
    }
}

impl std::error::Error for AutomatonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for automaton results
pub type Result<T> = std::result::Result<T, AutomatonError>;

impl From<std::io::Error> for AutomatonError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AutomatonError {
    AutomatonError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a parse error for a one-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> AutomatonError {
    AutomatonError::Parse {
        line,
        reason: reason.to_string(),
    }
}
