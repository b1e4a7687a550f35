//! SDP and Jingle conversion
//!
//! ```
//! use jingle_core::{Converter, ConverterConfig};
//! use sdp_core::SessionDescription;
//!
//! let sdp: SessionDescription = "v=0\r\n\
//!     o=- 123 1 IN IP4 127.0.0.1\r\n\
//!     s=-\r\n\
//!     t=0 0\r\n\
//!     m=audio 36798 RTP/AVPF 0\r\n\
//!     c=IN IP4 172.22.76.221\r\n\
//!     a=rtpmap:0 PCMU/8000\r\n"
//!     .parse()
//!     .unwrap();
//!
//! let converter = Converter::new(ConverterConfig::default()).unwrap();
//! let jingle = converter.to_jingle(&sdp).unwrap();
//! assert_eq!(jingle.sid, "123");
//!
//! let back = converter.to_sdp(&jingle).unwrap();
//! assert_eq!(back.media()[0].media().port(), 36798);
//! ```

pub mod candidate;
pub mod crypto;
pub mod payload;
pub mod ssrc;
mod to_jingle;
mod to_sdp;
mod transport_info;

pub use to_jingle::to_jingle;
pub use to_sdp::to_sdp;
pub use transport_info::transport_info;

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::model::{Jingle, Senders};
use sdp_core::{MediaDescription, SessionDescription};

const DIRECTIONS: [(&str, Senders); 4] = [
    ("sendrecv", Senders::Both),
    ("sendonly", Senders::Initiator),
    ("recvonly", Senders::Responder),
    ("inactive", Senders::None),
];

/// Senders of a content, from the block's direction attribute
pub(crate) fn senders_from_direction(block: &MediaDescription) -> Senders {
    DIRECTIONS
        .iter()
        .find(|(name, _)| block.attributes().contains(name))
        .map(|(_, senders)| *senders)
        .unwrap_or_default()
}

/// Direction attribute name for the senders of a content
pub(crate) fn direction(senders: Senders) -> &'static str {
    DIRECTIONS
        .iter()
        .find(|(_, s)| *s == senders)
        .map(|(name, _)| *name)
        .unwrap_or("sendrecv")
}

/// Converter bound to a validated configuration
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Converter { config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn to_jingle(&self, sdp: &SessionDescription) -> Result<Jingle> {
        to_jingle(sdp, &self.config)
    }

    pub fn to_sdp(&self, jingle: &Jingle) -> Result<SessionDescription> {
        to_sdp(jingle, &self.config)
    }

    /// Parse SDP text and convert it
    pub fn sdp_text_to_jingle(&self, text: &str) -> Result<Jingle> {
        self.to_jingle(&SessionDescription::parse(text)?)
    }

    /// Convert and serialize as SDP text
    pub fn jingle_to_sdp_text(&self, jingle: &Jingle) -> Result<String> {
        Ok(self.to_sdp(jingle)?.to_string())
    }

    pub fn transport_info<I, S>(&self, candidates: I, sid: impl Into<String>, content_name: &str) -> Result<Jingle>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        transport_info(candidates, sid, content_name)
    }
}
