//! Error types for profile parsing and model construction.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    /// The file exists but could not be read.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: segment length must be positive")]
    ZeroLengthSegment { line: usize },

    #[error("sample step {0} must be positive, finite and coarse enough for the track length")]
    InvalidSampleStep(f64),

    #[error("total track length exceeds {}", u64::MAX)]
    TrackTooLong,

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_number(line: usize, field: &'static str, value: &str) -> Self {
        Self::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        }
    }
}
