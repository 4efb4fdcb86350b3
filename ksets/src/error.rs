use std::fmt;

/// Result alias for `ksets`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned while building a network or configuring a run.
#[derive(Debug)]
pub enum Error {
    /// Reading the edge list failed.
    Io(std::io::Error),

    /// A record does not match the selected column format.
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// The offending record.
        record: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A vertex id is outside `0..vcount`.
    VertexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending id.
        vertex: usize,
        /// Number of vertices in the graph.
        vcount: usize,
    },

    /// An initial labelling does not cover every vertex exactly once.
    LabelCount {
        /// Number of vertices.
        expected: usize,
        /// Number of labels supplied.
        found: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "failed to read edge list: {e}"),
            Error::MalformedRecord { line, record, reason } => {
                write!(f, "malformed record on line {line} ({record:?}): {reason}")
            }
            Error::VertexOutOfRange { line, vertex, vcount } => {
                write!(f, "vertex {vertex} on line {line} is out of range for {vcount} vertices")
            }
            Error::LabelCount { expected, found } => {
                write!(f, "expected {expected} initial labels, found {found}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
