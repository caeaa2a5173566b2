use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, loading, saving or advancing a system.
///
/// Unknown body types in a description file are not errors; they are
/// reported as [`crate::codec::ParseWarning`]s and the line is skipped.
#[derive(Debug, Error)]
pub enum Error {
    /// A body violates a physical invariant (non-positive mass, negative radius, NaN state).
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Invalid engine or configuration parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A body line ended before all required fields were read.
    #[error("line {line}: `{kind}` needs {expected} fields, found {found}")]
    MissingFields {
        line: usize,
        kind: String,
        expected: usize,
        found: usize,
    },

    /// A numeric field could not be parsed.
    #[error("line {line}: cannot read {field} from `{value}`")]
    MalformedField {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A well-formed line described a body that failed validation.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// The description or report file could not be opened, read or written.
    #[error("cannot access `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on a caller-supplied reader or writer.
    #[error(transparent)]
    Stream(#[from] std::io::Error),

    /// The YAML configuration could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    /// Line number the error refers to, for errors raised while parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MissingFields { line, .. }
            | Error::MalformedField { line, .. }
            | Error::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }
}
