//! # sdp-core
//!
//! A typed model of the Session Description Protocol (RFC 4566 / RFC 8866).
//!
//! The crate is organised leaf-first:
//!
//! - [`primitives`]: typed time, NTP time, addresses and contact helpers
//! - [`field`]: one type per SDP line, each parsing from and serializing to
//!   its exact text form
//! - [`attributes`]: the ordered, name-keyed store behind `a=` lines
//! - [`session`]: the [`SessionDescription`] document, its media blocks and
//!   the document parser
//!
//! ```
//! use sdp_core::SessionDescription;
//!
//! let text = "v=0\r\n\
//!             o=- 20518 0 IN IP4 203.0.113.1\r\n\
//!             s=-\r\n\
//!             c=IN IP4 203.0.113.1\r\n\
//!             t=0 0\r\n\
//!             m=audio 54400 RTP/SAVPF 0 96\r\n\
//!             a=rtpmap:0 PCMU/8000\r\n\
//!             a=rtpmap:96 opus/48000/2\r\n";
//!
//! let sdp: SessionDescription = text.parse().unwrap();
//! assert_eq!(sdp.origin().session_id(), 20518);
//! assert_eq!(sdp.media()[0].attributes().count("rtpmap"), 2);
//! assert_eq!(sdp.to_string(), text);
//! ```

pub mod attributes;
pub mod error;
pub mod field;
pub mod primitives;
pub mod session;

pub use attributes::{AttributeEntry, AttributeStore};
pub use error::{Error, Result};
pub use field::{
    Attribute, Bandwidth, Connection, Email, Field, Information, Key, KeyMethod, Media, Origin, Phone, RepeatTime,
    SdpLine, SessionName, Time, TimeZone, TimeZoneAdjustment, Uri, Version,
};
pub use primitives::{AddressType, Resource};
pub use session::{parse_sdp, MediaDescription, SessionDescription, TimeDescription};
