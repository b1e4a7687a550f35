use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JingleError;

/// ICE candidate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateType {
    Host,
    Prflx,
    Relay,
    Srflx,
}

impl CandidateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateType::Host => "host",
            CandidateType::Prflx => "prflx",
            CandidateType::Relay => "relay",
            CandidateType::Srflx => "srflx",
        }
    }

    /// Non-host candidates carry a related address and port
    pub fn has_related_address(&self) -> bool {
        !matches!(self, CandidateType::Host)
    }
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateType {
    type Err = JingleError;

    /// Accepts the legacy Google Talk names `stun` and `local`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" | "local" => Ok(CandidateType::Host),
            "prflx" => Ok(CandidateType::Prflx),
            "relay" => Ok(CandidateType::Relay),
            "srflx" | "stun" => Ok(CandidateType::Srflx),
            other => Err(JingleError::invalid_value("candidate type", other)),
        }
    }
}

/// `<candidate/>` of an ICE-UDP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub component: u8,
    pub foundation: String,
    pub generation: u32,
    pub id: Option<String>,
    pub ip: String,
    pub port: u16,
    pub priority: u32,
    pub protocol: String,
    pub candidate_type: CandidateType,
    pub rel_addr: Option<String>,
    pub rel_port: Option<u16>,
}

/// `<candidate/>` of a raw-UDP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUdpCandidate {
    pub component: u8,
    pub generation: u32,
    pub id: Option<String>,
    pub ip: String,
    pub port: u16,
}

/// `<transport xmlns='urn:xmpp:jingle:transports:raw-udp:1'/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUdpTransport {
    pub candidate: RawUdpCandidate,
}

/// `<transport xmlns='urn:xmpp:jingle:transports:ice-udp:1'/>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceUdpTransport {
    pub ufrag: Option<String>,
    pub pwd: Option<String>,
    pub candidates: Vec<Candidate>,
}

impl IceUdpTransport {
    pub fn with_credentials(ufrag: Option<String>, pwd: Option<String>) -> Self {
        IceUdpTransport {
            ufrag,
            pwd,
            candidates: Vec::new(),
        }
    }
}

/// Transport child of a content, one variant per transport namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transport {
    RawUdp(RawUdpTransport),
    IceUdp(IceUdpTransport),
}

impl Transport {
    pub fn namespace(&self) -> &'static str {
        match self {
            Transport::RawUdp(_) => crate::xml::NS_RAW_UDP,
            Transport::IceUdp(_) => crate::xml::NS_ICE_UDP,
        }
    }
}
