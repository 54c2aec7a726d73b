use thiserror::Error;

use crate::source::Operation;
use crate::value::ValueType;

pub use color_eyre::eyre::eyre;

/// Failure reported by a [`RowSource`](crate::source::RowSource) implementation.
///
/// Drivers either fail while performing an operation or do not implement it at all.
/// Both are surfaced to callers as the same [`Error`] variant; the distinction is kept
/// here for diagnostics.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Driver error: {0}")]
    Failed(color_eyre::Report),

    #[error("Operation not supported by this driver: {0}")]
    Unsupported(Operation),
}

impl DriverError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

impl From<color_eyre::Report> for DriverError {
    fn from(report: color_eyre::Report) -> Self {
        Self::Failed(report)
    }
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot set max rows: {0}")]
    CannotSetMaxRows(#[source] DriverError),

    #[error("Cannot fetch next row: {0}")]
    CannotFetchNextRow(#[source] DriverError),

    #[error("Cannot get {value_type} value from column {position}: {source}")]
    CannotGetColumnValue {
        value_type: ValueType,
        position: usize,
        #[source]
        source: DriverError,
    },

    #[error("Cannot determine whether column {position} was null: {source}")]
    CannotDetermineWasNull {
        position: usize,
        #[source]
        source: DriverError,
    },

    #[error("Cannot get row position: {0}")]
    CannotGetRowPosition(#[source] DriverError),

    #[error("Cannot close result set: {0}")]
    CannotCloseResultSet(#[source] DriverError),

    #[error("Bad config error: {0}")]
    BadConfigError(String),

    #[error("Column {index} is out of range")]
    ColumnOutOfRange { index: usize },

    #[error("Column {index} is not a computed column")]
    NotComputedColumn { index: usize },
}

impl Error {
    /// The driver failure behind this error, if any
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            Error::CannotSetMaxRows(source)
            | Error::CannotFetchNextRow(source)
            | Error::CannotGetRowPosition(source)
            | Error::CannotCloseResultSet(source)
            | Error::CannotGetColumnValue { source, .. }
            | Error::CannotDetermineWasNull { source, .. } => Some(source),
            Error::BadConfigError(_)
            | Error::ColumnOutOfRange { .. }
            | Error::NotComputedColumn { .. } => None,
        }
    }

    /// Native column position of a failed column read
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::CannotGetColumnValue { position, .. }
            | Error::CannotDetermineWasNull { position, .. } => Some(*position),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
