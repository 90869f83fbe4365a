//! Error types for model loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::nudge::TokenError;

/// A line within one of the model's input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File name relative to the model directory.
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Location {
    /// Create a location.
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Errors that abort a model load.
///
/// Every variant is fatal; the loader never returns a partial model.
#[derive(Error, Debug)]
pub enum LoadError {
    /// An input file does not exist.
    #[error("{} not found", path.display())]
    Missing {
        /// The expected path.
        path: PathBuf,
    },

    /// Any other I/O failure while reading an input file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A line has the wrong number of fields.
    #[error("{at}: expected {expected} fields, found {found}")]
    FieldCount {
        /// Offending line.
        at: Location,
        /// Required field count.
        expected: usize,
        /// Actual field count.
        found: usize,
    },

    /// A field that must be an integer is not.
    #[error("{at}: not an integer: {value:?}")]
    NotAnInteger {
        /// Offending line.
        at: Location,
        /// The field text.
        value: String,
    },

    /// An enumerated field holds an unrecognized token.
    #[error("{at}: unknown {what} {token:?}")]
    UnknownToken {
        /// Offending line.
        at: Location,
        /// What kind of token was expected (e.g. "edge kind").
        what: &'static str,
        /// The token text.
        token: String,
    },

    /// An edge id is not `<v0>-<v1>` with `v0 < v1`.
    #[error("{at}: malformed edge id {id:?}: {reason}")]
    BadEdgeId {
        /// Offending line.
        at: Location,
        /// The edge id text.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A striping token is neither a gap run nor a valid nudge pair.
    #[error("{at}: bad striping token {token:?}: {source}")]
    BadNudge {
        /// Offending line.
        at: Location,
        /// The token text.
        token: String,
        /// Tokenizer failure.
        #[source]
        source: TokenError,
    },

    /// A controller spec is not `<ip>#<universe>:<offset>`, or is not
    /// allowed on this entity.
    #[error("{at}: invalid controller {spec:?}: {reason}")]
    InvalidController {
        /// Offending line.
        at: Location,
        /// The controller text.
        spec: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A referenced vertex, edge or panel does not exist.
    #[error("{at}: {kind} {id:?} not found")]
    MissingReference {
        /// Offending line.
        at: Location,
        /// Kind of entity referenced.
        kind: &'static str,
        /// The referenced id.
        id: String,
    },

    /// An edge, panel or laser id appears on more than one line.
    #[error("{at}: duplicate {kind} {id:?}, first defined on line {first_line}")]
    DuplicateId {
        /// The repeated line.
        at: Location,
        /// Kind of entity.
        kind: &'static str,
        /// The repeated id.
        id: String,
        /// Line of the first definition.
        first_line: usize,
    },

    /// A panel's three edges do not span exactly three vertices.
    #[error("{at}: panel {id:?} spans {count} distinct vertices, expected 3")]
    NotATriangle {
        /// Offending line.
        at: Location,
        /// Panel id.
        id: String,
        /// Distinct vertex count found.
        count: usize,
    },

    /// The box file ends with fewer than 8 points pending.
    #[error("{file}: {count} leftover points after the last complete box")]
    IncompleteBox {
        /// Box file name.
        file: String,
        /// Number of leftover points.
        count: usize,
    },

    /// The metadata file never declares a name.
    #[error("{file}: model has no name")]
    MissingName {
        /// Metadata file name.
        file: String,
    },

    /// A table header does not carry the expected column.
    #[error("{file}: header {header:?} does not end with {expected:?}")]
    BadHeader {
        /// Table file name.
        file: String,
        /// The header line found.
        header: String,
        /// Required trailing label.
        expected: &'static str,
    },

    /// No pixels were produced, so boundaries cannot be computed.
    #[error("model has no pixels; cannot compute boundaries")]
    EmptyPointCloud,

    /// Loader configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LoadError {
    /// Create a field count error.
    pub fn field_count(at: Location, expected: usize, found: usize) -> Self {
        Self::FieldCount {
            at,
            expected,
            found,
        }
    }

    /// Create an unknown token error.
    pub fn unknown_token(at: Location, what: &'static str, token: impl Into<String>) -> Self {
        Self::UnknownToken {
            at,
            what,
            token: token.into(),
        }
    }

    /// Create a missing reference error.
    pub fn missing_reference(at: Location, kind: &'static str, id: impl ToString) -> Self {
        Self::MissingReference {
            at,
            kind,
            id: id.to_string(),
        }
    }

    /// Create an invalid controller error.
    pub fn invalid_controller(
        at: Location,
        spec: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidController {
            at,
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for model loading.
pub type Result<T> = std::result::Result<T, LoadError>;
