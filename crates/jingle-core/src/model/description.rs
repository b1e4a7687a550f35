use serde::{Deserialize, Serialize};

/// `<payload-type/>`
///
/// `clockrate` keeps the rtpmap form, so a channel count travels as
/// `48000/2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadType {
    pub id: u8,
    pub name: String,
    pub clockrate: String,
}

impl PayloadType {
    pub fn new(id: u8, name: impl Into<String>, clockrate: impl Into<String>) -> Self {
        PayloadType {
            id,
            name: name.into(),
            clockrate: clockrate.into(),
        }
    }

    /// A static payload type known only by its id
    pub fn id_only(id: u8) -> Self {
        PayloadType::new(id, "", "")
    }

    /// The sampling rate in Hz
    pub fn clock_rate(&self) -> Option<u32> {
        self.clockrate.split('/').next().and_then(|rate| rate.parse().ok())
    }

    /// The channel count, when the clockrate carries one
    pub fn channels(&self) -> Option<u8> {
        self.clockrate.split('/').nth(1).and_then(|channels| channels.parse().ok())
    }

    pub fn is_id_only(&self) -> bool {
        self.name.is_empty()
    }
}

/// `<crypto/>`, an SDES key exchange entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crypto {
    pub tag: String,
    pub crypto_suite: String,
    pub key_params: String,
}

/// `<encryption/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryption {
    pub required: bool,
    pub crypto: Vec<Crypto>,
}

/// `<stream/>`: named attributes of one synchronization source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub ssrc: String,
    pub attributes: Vec<(String, String)>,
}

impl Stream {
    pub fn new(ssrc: impl Into<String>) -> Self {
        Stream {
            ssrc: ssrc.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set a named attribute, replacing an earlier value for the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }
}

/// `<description xmlns='urn:xmpp:jingle:apps:rtp:1'/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtpDescription {
    pub media: String,
    pub profile: Option<String>,
    pub payload_types: Vec<PayloadType>,
    pub encryption: Option<Encryption>,
    pub rtcp_mux: bool,
    pub streams: Vec<Stream>,
}

impl RtpDescription {
    pub fn new(media: impl Into<String>) -> Self {
        RtpDescription {
            media: media.into(),
            ..Default::default()
        }
    }

    pub fn payload_type(&self, id: u8) -> Option<&PayloadType> {
        self.payload_types.iter().find(|pt| pt.id == id)
    }

    pub fn stream(&self, ssrc: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.ssrc == ssrc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_clockrate() {
        let opus = PayloadType::new(111, "opus", "48000/2");
        assert_eq!(opus.clock_rate(), Some(48000));
        assert_eq!(opus.channels(), Some(2));

        let pcmu = PayloadType::new(0, "PCMU", "8000");
        assert_eq!(pcmu.clock_rate(), Some(8000));
        assert_eq!(pcmu.channels(), None);

        assert!(PayloadType::id_only(18).is_id_only());
        assert_eq!(PayloadType::id_only(18).clock_rate(), None);
    }

    #[test]
    fn test_stream_attributes() {
        let mut stream = Stream::new("2570980487");
        stream.set_attribute("cname", "a");
        stream.set_attribute("label", "audio_label");
        stream.set_attribute("cname", "b");

        assert_eq!(stream.attribute("cname"), Some("b"));
        assert_eq!(stream.attribute("mslabel"), None);
        assert_eq!(stream.attributes.len(), 2);
    }
}
