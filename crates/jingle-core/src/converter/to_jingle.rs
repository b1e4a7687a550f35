//! SDP document to Jingle tree

use tracing::debug;

use super::candidate::parse_candidate;
use super::{crypto, payload, senders_from_direction, ssrc};
use crate::config::{CandidateGrouping, ConverterConfig};
use crate::error::{JingleError, Result};
use crate::model::{
    Candidate, Content, Creator, IceUdpTransport, Jingle, RawUdpCandidate, RawUdpTransport, RtpDescription, Transport,
};
use sdp_core::{MediaDescription, SessionDescription};

/// Network type that Jingle transports can express
const NET_TYPE_IN: &str = "IN";

/// Convert a session description into a Jingle IQ
///
/// The whole conversion fails on the first media block that cannot be
/// expressed; no partial tree is returned.
pub fn to_jingle(sdp: &SessionDescription, config: &ConverterConfig) -> Result<Jingle> {
    if let Some(group) = sdp.bundle_group() {
        debug!(group = ?group.value(), "derived BUNDLE group");
    }
    debug!(grouping = ?config.candidate_grouping, "converting SDP to Jingle");

    let contents = sdp
        .media()
        .iter()
        .map(|block| content_from_block(sdp, block, config))
        .collect::<Result<Vec<_>>>()?;

    let mut jingle = Jingle::new(config.action, sdp.origin().session_id().to_string());
    jingle.contents = contents;
    Ok(jingle)
}

fn content_from_block(sdp: &SessionDescription, block: &MediaDescription, config: &ConverterConfig) -> Result<Content> {
    let media = block.media();
    let media_type = media.media_type();

    let connection = sdp
        .effective_connection(block)
        .ok_or_else(|| JingleError::MissingConnection {
            media: media_type.to_string(),
        })?;
    if connection.net_type() != NET_TYPE_IN {
        return Err(JingleError::UnsupportedNetworkType {
            media: media_type.to_string(),
            net_type: connection.net_type().to_string(),
        });
    }

    if media.formats().is_empty() {
        return Err(JingleError::NoMediaFormat {
            media: media_type.to_string(),
        });
    }
    let payload_types = payload::payload_types(block)?;
    if payload_types.is_empty() {
        return Err(JingleError::NoMediaFormat {
            media: media_type.to_string(),
        });
    }

    let attributes = block.attributes();
    let description = RtpDescription {
        media: media_type.to_string(),
        profile: Some(media.protocol().to_string()),
        payload_types,
        encryption: crypto::encryption(attributes.get_all("crypto")),
        rtcp_mux: attributes.contains("rtcp-mux"),
        streams: ssrc::streams(attributes.get_all("ssrc"), config.ssrc_grouping),
    };

    let mut content = Content::new(Creator::Initiator, media_type).with_description(description);
    content.senders = Some(senders_from_direction(block));

    if config.emit_raw_udp {
        content = content.with_transport(Transport::RawUdp(RawUdpTransport {
            candidate: RawUdpCandidate {
                component: 1,
                generation: 0,
                id: None,
                ip: connection.address().to_string(),
                port: media.port(),
            },
        }));
    }

    for transport in ice_transports(sdp, block, config.candidate_grouping)? {
        content = content.with_transport(Transport::IceUdp(transport));
    }

    Ok(content)
}

/// Media-level value of an attribute, falling back to the session level
fn ice_credential(sdp: &SessionDescription, block: &MediaDescription, name: &str) -> Option<String> {
    block
        .attributes()
        .get(name)
        .or_else(|| sdp.attributes().get(name))
        .and_then(|attribute| attribute.value())
        .map(str::to_string)
}

fn ice_transports(
    sdp: &SessionDescription,
    block: &MediaDescription,
    grouping: CandidateGrouping,
) -> Result<Vec<IceUdpTransport>> {
    let candidates = block
        .attributes()
        .get_all("candidate")
        .into_iter()
        .map(|attribute| parse_candidate(attribute.value().unwrap_or_default()))
        .collect::<Result<Vec<Candidate>>>()?;

    let ufrag = ice_credential(sdp, block, "ice-ufrag");
    let pwd = ice_credential(sdp, block, "ice-pwd");
    if candidates.is_empty() && ufrag.is_none() && pwd.is_none() {
        return Ok(Vec::new());
    }

    let transports = match grouping {
        CandidateGrouping::PerContent => {
            let mut transport = IceUdpTransport::with_credentials(ufrag, pwd);
            transport.candidates = candidates;
            vec![transport]
        }
        CandidateGrouping::PerCandidate if candidates.is_empty() => {
            vec![IceUdpTransport::with_credentials(ufrag, pwd)]
        }
        CandidateGrouping::PerCandidate => candidates
            .into_iter()
            .map(|candidate| {
                let mut transport = IceUdpTransport::with_credentials(ufrag.clone(), pwd.clone());
                transport.candidates.push(candidate);
                transport
            })
            .collect(),
    };
    Ok(transports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandidateType, Senders};

    const OFFER: &str = "v=0\r\n\
                         o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
                         s=-\r\n\
                         c=IN IP4 198.51.100.1\r\n\
                         t=0 0\r\n\
                         a=ice-ufrag:F7gI\r\n\
                         a=ice-pwd:x9cml/YzichV2+XlhiMu8g\r\n\
                         m=audio 54400 RTP/SAVPF 0 18\r\n\
                         a=rtpmap:0 PCMU/8000\r\n\
                         a=candidate:1 1 udp 2113937151 192.168.1.2 54400 typ host generation 0\r\n\
                         a=candidate:2 1 udp 1845501695 198.51.100.1 54400 typ srflx raddr 192.168.1.2 rport 54400 generation 0\r\n\
                         a=recvonly\r\n";

    #[test]
    fn test_session_connection_and_credentials_are_inherited() {
        let sdp = SessionDescription::parse(OFFER).unwrap();
        let jingle = to_jingle(&sdp, &ConverterConfig::default()).unwrap();

        assert_eq!(jingle.sid, "4611731400430051336");
        let content = &jingle.contents[0];
        assert_eq!(content.senders, Some(Senders::Responder));

        let raw = content.raw_udp().unwrap();
        assert_eq!(raw.candidate.ip, "198.51.100.1");
        assert_eq!(raw.candidate.port, 54400);

        let ice: Vec<_> = content.ice_udp().collect();
        assert_eq!(ice.len(), 1);
        assert_eq!(ice[0].ufrag.as_deref(), Some("F7gI"));
        assert_eq!(ice[0].candidates[1].candidate_type, CandidateType::Srflx);

        let description = content.description.as_ref().unwrap();
        assert_eq!(description.profile.as_deref(), Some("RTP/SAVPF"));
        assert_eq!(description.payload_types.len(), 2);
        assert!(description.payload_type(18).unwrap().is_id_only());
        assert!(description.encryption.is_none());
        assert!(!description.rtcp_mux);
        assert!(description.streams.is_empty());
    }

    #[test]
    fn test_per_candidate_grouping() {
        let sdp = SessionDescription::parse(OFFER).unwrap();
        let config = ConverterConfig::default()
            .with_candidate_grouping(CandidateGrouping::PerCandidate)
            .with_raw_udp(false);
        let jingle = to_jingle(&sdp, &config).unwrap();

        let content = &jingle.contents[0];
        assert!(content.raw_udp().is_none());
        let ice: Vec<_> = content.ice_udp().collect();
        assert_eq!(ice.len(), 2);
        assert!(ice.iter().all(|t| t.candidates.len() == 1 && t.pwd.is_some()));
    }

    #[test]
    fn test_unsupported_network_type() {
        let text = OFFER.replace("c=IN IP4 198.51.100.1", "c=TN IP4 198.51.100.1");
        let sdp = SessionDescription::parse(&text).unwrap();
        assert!(matches!(
            to_jingle(&sdp, &ConverterConfig::default()),
            Err(JingleError::UnsupportedNetworkType { .. })
        ));
    }

    #[test]
    fn test_no_media_format() {
        let text = OFFER
            .replace("m=audio 54400 RTP/SAVPF 0 18", "m=audio 54400 RTP/SAVPF")
            .replace("a=rtpmap:0 PCMU/8000\r\n", "");
        let sdp = SessionDescription::parse(&text).unwrap();
        assert_eq!(
            to_jingle(&sdp, &ConverterConfig::default()),
            Err(JingleError::NoMediaFormat { media: "audio".into() })
        );
    }

    #[test]
    fn test_malformed_candidate_aborts() {
        let text = OFFER.replace("typ srflx raddr 192.168.1.2 rport 54400", "typ srflx");
        let sdp = SessionDescription::parse(&text).unwrap();
        assert!(matches!(
            to_jingle(&sdp, &ConverterConfig::default()),
            Err(JingleError::MalformedCandidate { .. })
        ));
    }
}
