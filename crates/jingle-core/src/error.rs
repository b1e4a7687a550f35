//! Error handling for Jingle conversion

use thiserror::Error;

/// Result type alias for Jingle operations
pub type Result<T> = std::result::Result<T, JingleError>;

/// Errors produced while converting between SDP and Jingle
///
/// Every semantic failure aborts the conversion of the whole session; no
/// partial tree or document is returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JingleError {
    /// The SDP side failed to parse or validate
    #[error(transparent)]
    Sdp(#[from] sdp_core::Error),

    /// Only the `IN` network type can be expressed in Jingle
    #[error("Unsupported network type '{net_type}' for media '{media}'")]
    UnsupportedNetworkType { media: String, net_type: String },

    /// A media block without any payload format
    #[error("No media format for media '{media}'")]
    NoMediaFormat { media: String },

    /// A media block without a connection, locally or at session level
    #[error("No connection data for media '{media}'")]
    MissingConnection { media: String },

    /// An ICE candidate whose tokens do not follow the candidate grammar
    #[error("Malformed candidate '{candidate}': {reason}")]
    MalformedCandidate { candidate: String, reason: String },

    /// A Jingle session id that cannot be used as an SDP session id
    #[error("Invalid session id '{sid}': expected a decimal number")]
    InvalidSessionId { sid: String },

    /// A content without an RTP description
    #[error("Content '{content}' has no RTP description")]
    MissingDescription { content: String },

    /// A payload type or rtpmap value that cannot be represented
    #[error("Invalid payload type '{value}': {reason}")]
    InvalidPayloadType { value: String, reason: String },

    /// An enumerated or numeric stanza value outside its allowed set
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },

    /// The XML stanza could not be read or written
    #[error("XML error: {0}")]
    Xml(String),

    /// The converter configuration is not usable
    #[error("Invalid converter configuration: {details}")]
    InvalidConfig { details: String },
}

impl JingleError {
    /// Create a new malformed candidate error
    pub fn malformed_candidate(candidate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCandidate {
            candidate: candidate.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig {
            details: details.into(),
        }
    }

    /// Whether the error comes from malformed input text rather than from a
    /// mapping that Jingle cannot express
    pub fn is_parse_error(&self) -> bool {
        match self {
            Self::Sdp(e) => e.is_parse_error(),
            Self::MalformedCandidate { .. }
            | Self::InvalidPayloadType { .. }
            | Self::InvalidValue { .. }
            | Self::Xml(_) => true,
            Self::UnsupportedNetworkType { .. }
            | Self::NoMediaFormat { .. }
            | Self::MissingConnection { .. }
            | Self::InvalidSessionId { .. }
            | Self::MissingDescription { .. }
            | Self::InvalidConfig { .. } => false,
        }
    }
}

impl From<quick_xml::Error> for JingleError {
    fn from(err: quick_xml::Error) -> Self {
        JingleError::Xml(err.to_string())
    }
}
