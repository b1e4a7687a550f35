//! Jingle data model
//!
//! A plain tree mirroring the stanza:
//!
//! ```text
//! Jingle (iq type, action, sid)
//!  ├── Content (creator, name)
//!  │    ├── RtpDescription (media, payload types, encryption, rtcp-mux, streams)
//!  │    └── Transport::RawUdp | Transport::IceUdp (candidates)
//!  ├── SessionInfo (mute, unmute, ...)
//!  └── Reason
//! ```

/// Implements `as_str`, `Display` and `FromStr` for a keyword enum
///
/// Defined before the submodules so they see it in textual scope.
macro_rules! keyword_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $text:literal),* $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)*
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = crate::error::JingleError;

            fn from_str(s: &str) -> crate::error::Result<Self> {
                match s {
                    $($text => Ok($ty::$variant),)*
                    other => Err(crate::error::JingleError::invalid_value($field, other)),
                }
            }
        }
    };
}

mod content;
mod description;
mod jingle;
mod transport;

pub use content::{Content, Creator, Senders};
pub use description::{Crypto, Encryption, PayloadType, RtpDescription, Stream};
pub use jingle::{IqType, Jingle, JingleAction, Reason, ReasonCondition, SessionInfo};
pub use transport::{Candidate, CandidateType, IceUdpTransport, RawUdpCandidate, RawUdpTransport, Transport};
