//! Jingle stanza codec
//!
//! [`to_xml`] writes a [`Jingle`] as an `<iq>` stanza; [`from_xml`] reads one
//! back. Reading goes through a small element tree so that unknown children
//! can be skipped wherever they appear.
//!
//! ```
//! use jingle_core::{xml, Jingle, JingleAction};
//!
//! let jingle = Jingle::redirect("1234", "xmpp:carol@example.com");
//! let stanza = xml::to_xml(&jingle).unwrap();
//! assert!(stanza.contains("<redirect>xmpp:carol@example.com</redirect>"));
//!
//! let back = xml::from_xml(&stanza).unwrap();
//! assert_eq!(back.action, JingleAction::SessionTerminate);
//! assert_eq!(back, jingle);
//! ```

mod reader;
mod writer;

pub use reader::from_xml;
pub use writer::to_xml;

use crate::model::Jingle;

pub const NS_JINGLE: &str = "urn:xmpp:jingle:1";
pub const NS_RTP: &str = "urn:xmpp:jingle:apps:rtp:1";
pub const NS_RAW_UDP: &str = "urn:xmpp:jingle:transports:raw-udp:1";
pub const NS_ICE_UDP: &str = "urn:xmpp:jingle:transports:ice-udp:1";
pub const NS_RTP_INFO: &str = "urn:xmpp:jingle:apps:rtp:info:1";

/// Whether `name` can be written as an XML attribute name
pub(crate) fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl Jingle {
    /// Serialize as an `<iq>` stanza
    pub fn to_xml(&self) -> crate::error::Result<String> {
        to_xml(self)
    }

    /// Parse an `<iq>` stanza, or a bare `<jingle>` element
    pub fn from_xml(xml: &str) -> crate::error::Result<Self> {
        from_xml(xml)
    }
}
