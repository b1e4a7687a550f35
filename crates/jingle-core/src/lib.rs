//! # jingle-core
//!
//! Jingle (XEP-0166) RTP sessions and their translation to and from SDP.
//!
//! - [`model`]: the Jingle tree (contents, RTP descriptions, raw-udp and
//!   ICE-UDP transports, session-info and reasons)
//! - [`xml`]: reading and writing the tree as an `<iq>` stanza
//! - [`converter`]: SDP to Jingle and back, plus the trickle
//!   `transport-info` builder
//! - [`config`]: converter options
//!
//! ```
//! use jingle_core::{sdp_to_jingle, xml, ConverterConfig};
//!
//! let text = "v=0\r\n\
//!             o=- 123 1 IN IP4 127.0.0.1\r\n\
//!             s=-\r\n\
//!             t=0 0\r\n\
//!             m=audio 36798 RTP/AVPF 111\r\n\
//!             c=IN IP4 172.22.76.221\r\n\
//!             a=rtpmap:111 opus/48000/2\r\n\
//!             a=rtcp-mux\r\n";
//!
//! let jingle = sdp_to_jingle(text, &ConverterConfig::default()).unwrap();
//! let stanza = xml::to_xml(&jingle).unwrap();
//! assert!(stanza.contains(r#"clockrate="48000" channels="2""#));
//! assert!(stanza.contains("<rtcp-mux/>"));
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod model;
pub mod xml;

pub use config::{CandidateGrouping, ConverterConfig, SsrcGrouping};
pub use converter::{to_jingle, to_sdp, transport_info, Converter};
pub use error::{JingleError, Result};
pub use model::{
    Candidate, CandidateType, Content, Creator, Crypto, Encryption, IceUdpTransport, IqType, Jingle, JingleAction,
    PayloadType, RawUdpCandidate, RawUdpTransport, Reason, ReasonCondition, RtpDescription, Senders, SessionInfo,
    Stream, Transport,
};

/// Parse SDP text and convert it to a Jingle IQ
pub fn sdp_to_jingle(text: &str, config: &ConverterConfig) -> Result<Jingle> {
    let sdp = sdp_core::SessionDescription::parse(text)?;
    to_jingle(&sdp, config)
}

/// Convert a Jingle IQ to SDP text
pub fn jingle_to_sdp(jingle: &Jingle, config: &ConverterConfig) -> Result<String> {
    Ok(to_sdp(jingle, config)?.to_string())
}
