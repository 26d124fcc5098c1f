use std::fmt;

use thiserror::Error;

/// Machine-readable error codes shared by the library and the `tg` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyVertexName,
    ConfigParseError,
    InputParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyVertexName => "E1001",
            Self::ConfigParseError => "E2001",
            Self::InputParseError => "E2002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyVertexName => "Vertex name is empty",
            Self::ConfigParseError => "Config file parse error",
            Self::InputParseError => "Edge script parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyVertexName => Some("Give every edge endpoint a non-empty name."),
            Self::ConfigParseError => Some("Fix syntax in tangle.toml and retry."),
            Self::InputParseError => {
                Some("Write one edge per line as `FROM -> TO`; prefix with `-` to delete.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised at the graph boundary.
///
/// Every other graph operation is total: duplicate inserts and deletes of
/// absent edges are no-ops, and cycles are reported, not raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex name must not be empty")]
    EmptyVertexName,
}

impl GraphError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyVertexName => ErrorCode::EmptyVertexName,
        }
    }
}
