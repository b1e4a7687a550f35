//! Error handling for the SDP model
//!
//! Two kinds of failure surface from this crate: parse failures (the text
//! does not match the grammar of its line type) and semantic failures (each
//! line is fine but the document violates a cross-field rule, such as a
//! media block without any connection).

use thiserror::Error;

/// Result type alias for SDP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing, building or serializing SDP
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A raw line could not be parsed
    #[error("Failed to parse SDP line '{line}': {reason}")]
    Parse { line: String, reason: String },

    /// A value was rejected at construction time
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// A media block has no connection and the session provides none either
    #[error("Media '{media}' has no connection data and the session has none")]
    MissingConnection { media: String },

    /// A mandatory line is absent from the document
    #[error("Missing mandatory {0}= line")]
    MissingField(&'static str),

    /// A line appears in a position the document grammar does not allow
    #[error("Unexpected SDP line '{line}': {reason}")]
    FieldOrder { line: String, reason: String },
}

impl Error {
    /// Create a new parse error for a raw line
    pub fn parse(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// Create a new field order error
    pub fn order(line: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FieldOrder {
            line: line.into(),
            reason: reason.into(),
        }
    }

    /// Whether the failure comes from malformed text rather than from a rule
    /// spanning several fields
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::InvalidValue { .. })
    }
}

impl<'a> From<nom::Err<nom::error::Error<&'a str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&'a str>>) -> Self {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                Error::parse(e.input, format!("{:?}", e.code))
            }
            nom::Err::Incomplete(_) => Error::parse("", "incomplete input"),
        }
    }
}
