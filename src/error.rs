//! Error types for the isotope-lab library.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading, analysing or plotting.
///
/// Every variant is reported to the operator and leaves the running session
/// usable; none of them terminates the process.
#[derive(Error, Debug)]
pub enum Error {
    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Not enough rows: need at least {required}, found {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("No isotopic data available for statistical analysis.")]
    NoData,

    #[error("Invalid number of groups: {0}")]
    InvalidGroupCount(i64),

    #[error("Group {group} is outside 1..={groups}")]
    GroupOutOfRange { group: i64, groups: u32 },

    #[error("Not enough data: every group needs at least one sample.")]
    InsufficientGroupData,

    #[error("Please enter a species name.")]
    EmptySpeciesName,

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;
