//! Error type shared by the SASA engine, the aggregator and the reporting layer.

use std::fmt;
use std::path::PathBuf;

use polars::error::PolarsError;

/// Error type for SASA calculation and reporting operations.
#[derive(Debug)]
pub enum SasaError {
    /// A setting is out of its valid range
    InvalidConfiguration {
        /// Name of the offending parameter
        parameter: &'static str,
        /// The rejected value, formatted for display
        value: String,
    },
    /// No radius could be resolved for an atom and no default is configured
    MissingRadius {
        /// Serial number of the atom
        atom: usize,
        /// Element symbol that failed to resolve
        element: String,
    },
    /// An aggregation level tag was not recognized or was not computed
    InvalidLevel(String),
    /// The structure file could not be parsed
    MalformedInput {
        /// Path of the input file
        path: PathBuf,
        /// Parser messages joined together
        reason: String,
    },
    /// Failed to read or write a file
    Io(std::io::Error),
    /// Failed to build or write a breakdown table
    Export(PolarsError),
    /// Failed to render a chart
    Plot(String),
}

impl fmt::Display for SasaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SasaError::InvalidConfiguration { parameter, value } => {
                write!(f, "Invalid configuration: {parameter} = {value}")
            }
            SasaError::MissingRadius { atom, element } => {
                write!(f, "No radius for atom {atom} (element '{element}')")
            }
            SasaError::InvalidLevel(level) => write!(
                f,
                "Invalid level '{level}'. Supported levels: A, R, C, M, S"
            ),
            SasaError::MalformedInput { path, reason } => {
                write!(f, "Failed to parse {}: {reason}", path.display())
            }
            SasaError::Io(e) => write!(f, "I/O error: {e}"),
            SasaError::Export(e) => write!(f, "Failed to export table: {e}"),
            SasaError::Plot(msg) => write!(f, "Failed to draw plot: {msg}"),
        }
    }
}

impl std::error::Error for SasaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SasaError::Io(e) => Some(e),
            SasaError::Export(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SasaError {
    fn from(err: std::io::Error) -> Self {
        SasaError::Io(err)
    }
}

impl From<PolarsError> for SasaError {
    fn from(err: PolarsError) -> Self {
        SasaError::Export(err)
    }
}
