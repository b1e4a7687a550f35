use serde::{Deserialize, Serialize};

use super::{IceUdpTransport, RawUdpTransport, RtpDescription, Transport};

/// Which party created a content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Creator {
    #[default]
    Initiator,
    Responder,
}

keyword_enum!(Creator, "creator", {
    Initiator => "initiator",
    Responder => "responder",
});

/// Which parties send media on a content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Senders {
    #[default]
    Both,
    Initiator,
    Responder,
    None,
}

keyword_enum!(Senders, "senders", {
    Both => "both",
    Initiator => "initiator",
    Responder => "responder",
    None => "none",
});

/// One `<content/>`: a media description plus its transports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub creator: Creator,
    pub name: String,
    pub senders: Option<Senders>,
    pub description: Option<RtpDescription>,
    pub transports: Vec<Transport>,
}

impl Content {
    pub fn new(creator: Creator, name: impl Into<String>) -> Self {
        Content {
            creator,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: RtpDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transports.push(transport);
        self
    }

    /// The raw-udp transport, if any
    pub fn raw_udp(&self) -> Option<&RawUdpTransport> {
        self.transports.iter().find_map(|t| match t {
            Transport::RawUdp(raw) => Some(raw),
            Transport::IceUdp(_) => None,
        })
    }

    /// Every ICE-UDP transport, in document order
    pub fn ice_udp(&self) -> impl Iterator<Item = &IceUdpTransport> {
        self.transports.iter().filter_map(|t| match t {
            Transport::IceUdp(ice) => Some(ice),
            Transport::RawUdp(_) => None,
        })
    }
}
