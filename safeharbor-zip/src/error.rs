//! Errors that abort a deidentification run.
//!
//! Only configuration and I/O problems are errors. Odd field values and
//! unresolvable column references are handled in place and never surface here.

use std::{io, path::PathBuf};

use crate::delimiter::DelimiterError;

/// A fatal problem with a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("input appears to be empty or malformed: no header row")]
    EmptyInput,
    #[error("no valid ZIP code columns found")]
    NoColumns,
    #[error(transparent)]
    InvalidDelimiter(#[from] DelimiterError),
    #[error("failed to read or write delimited data: {0}")]
    Csv(#[from] csv::Error),
    #[error("file system error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns `true` for errors caused by the run's settings or input shape
    /// rather than by the file system.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InputNotFound(_) | Error::EmptyInput | Error::NoColumns | Error::InvalidDelimiter(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
