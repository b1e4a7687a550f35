//! Jingle tree to SDP document

use tracing::debug;

use super::candidate::format_candidate;
use super::{crypto, direction, payload, ssrc};
use crate::config::ConverterConfig;
use crate::error::{JingleError, Result};
use crate::model::{Content, Jingle};
use sdp_core::{Attribute, Connection, Media, MediaDescription, Origin, SessionDescription, SessionName};

/// Discard port used when a content has no usable candidate
const DISCARD_PORT: u16 = 9;
const UNSPECIFIED_ADDRESS: &str = "0.0.0.0";
/// Profile assumed when a description carries none
const DEFAULT_PROFILE: &str = "RTP/AVPF";
const SESSION_VERSION: u64 = 1;

/// Convert a Jingle IQ into a session description
///
/// Every content becomes one media block with its own `c=` line. The
/// `group:BUNDLE` attribute is derived from the resulting blocks.
pub fn to_sdp(jingle: &Jingle, config: &ConverterConfig) -> Result<SessionDescription> {
    let session_id = jingle.sid.parse::<u64>().map_err(|_| JingleError::InvalidSessionId {
        sid: jingle.sid.clone(),
    })?;

    let origin = Origin::new(
        config.origin_username.as_str(),
        session_id,
        SESSION_VERSION,
        config.origin_address.as_str(),
    )?;
    let mut sdp = SessionDescription::new(origin, SessionName::new(config.session_name.as_str()));

    let blocks = jingle
        .contents
        .iter()
        .map(block_from_content)
        .collect::<Result<Vec<_>>>()?;
    sdp.set_media(blocks)?;

    if let Some(group) = sdp.bundle_group() {
        debug!(group = ?group.value(), "adding BUNDLE group");
        sdp.add_attribute(group);
    }
    Ok(sdp)
}

/// Address and port for the `m=`/`c=` lines of a content
fn media_address(content: &Content) -> (String, u16) {
    if let Some(raw) = content.raw_udp() {
        return (raw.candidate.ip.clone(), raw.candidate.port);
    }
    content
        .ice_udp()
        .flat_map(|transport| transport.candidates.iter())
        .find(|candidate| candidate.component == 1)
        .map(|candidate| (candidate.ip.clone(), candidate.port))
        .unwrap_or_else(|| (UNSPECIFIED_ADDRESS.to_string(), DISCARD_PORT))
}

fn block_from_content(content: &Content) -> Result<MediaDescription> {
    let description = content
        .description
        .as_ref()
        .ok_or_else(|| JingleError::MissingDescription {
            content: content.name.clone(),
        })?;

    let media_type = if description.media.is_empty() {
        content.name.as_str()
    } else {
        description.media.as_str()
    };

    let mut ids = description.payload_types.iter().map(|p| p.id.to_string());
    let first = ids.next().ok_or_else(|| JingleError::NoMediaFormat {
        media: media_type.to_string(),
    })?;

    let (address, port) = media_address(content);
    let profile = description.profile.as_deref().unwrap_or(DEFAULT_PROFILE);

    let mut media = Media::new(media_type, port, profile, first)?;
    for id in ids {
        media.add_format(id)?;
    }

    let mut block = MediaDescription::new(media).with_connection(Connection::new(&address)?);

    let credentials = content.ice_udp().find(|t| t.ufrag.is_some() || t.pwd.is_some());
    if let Some(ufrag) = credentials.and_then(|t| t.ufrag.as_deref()) {
        block.add_attribute(Attribute::new("ice-ufrag", ufrag)?);
    }
    if let Some(pwd) = credentials.and_then(|t| t.pwd.as_deref()) {
        block.add_attribute(Attribute::new("ice-pwd", pwd)?);
    }
    for candidate in content.ice_udp().flat_map(|transport| transport.candidates.iter()) {
        block.add_attribute(Attribute::new("candidate", format_candidate(candidate)?)?);
    }

    block.add_attribute(Attribute::flag(direction(content.senders.unwrap_or_default()))?);
    block.add_attribute(Attribute::new("mid", content.name.as_str())?);
    if description.rtcp_mux {
        block.add_attribute(Attribute::flag("rtcp-mux")?);
    }

    if let Some(encryption) = &description.encryption {
        for entry in &encryption.crypto {
            block.add_attribute(Attribute::new("crypto", crypto::format_crypto(entry))?);
        }
    }

    for payload_type in description.payload_types.iter().filter(|p| !p.is_id_only()) {
        block.add_attribute(Attribute::new("rtpmap", payload::format_rtpmap(payload_type)?)?);
    }

    for stream in &description.streams {
        for value in ssrc::format_stream(stream) {
            block.add_attribute(Attribute::new("ssrc", value)?);
        }
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Creator, IceUdpTransport, PayloadType, RtpDescription, Senders, Transport};
    use sdp_core::Field;

    fn content(name: &str) -> Content {
        let mut description = RtpDescription::new(name);
        description.payload_types.push(PayloadType::new(96, "VP8", "90000"));
        description.payload_types.push(PayloadType::id_only(34));
        Content::new(Creator::Initiator, name).with_description(description)
    }

    #[test]
    fn test_defaults_without_transports() {
        let jingle = Jingle::new(Default::default(), "42").with_content(content("video"));
        let sdp = to_sdp(&jingle, &ConverterConfig::default()).unwrap();

        assert_eq!(sdp.origin().session_id(), 42);
        assert_eq!(sdp.origin().session_version(), 1);
        let block = &sdp.media()[0];
        assert_eq!(block.media().to_string(), "m=video 9 RTP/AVPF 96 34");
        assert_eq!(block.connection().unwrap().address(), "0.0.0.0");
        assert_eq!(block.attributes().count("rtpmap"), 1);
        assert_eq!(block.attributes().get("sendrecv").map(|a| a.value()), Some(None));
        assert_eq!(block.attributes().get("mid").unwrap().value(), Some("video"));
        assert_eq!(sdp.attributes().get("group").unwrap().to_line(), "a=group:BUNDLE video\r\n");
    }

    #[test]
    fn test_address_from_first_rtp_candidate() {
        let mut ice = IceUdpTransport::with_credentials(Some("u".into()), Some("p".into()));
        ice.candidates.push(
            crate::converter::candidate::parse_candidate("1 2 udp 1 10.0.0.2 5001 typ host generation 0").unwrap(),
        );
        ice.candidates.push(
            crate::converter::candidate::parse_candidate("1 1 udp 1 10.0.0.1 5000 typ host generation 0").unwrap(),
        );
        let mut audio = content("audio").with_transport(Transport::IceUdp(ice));
        audio.senders = Some(Senders::Initiator);

        let jingle = Jingle::new(Default::default(), "1").with_content(audio);
        let sdp = to_sdp(&jingle, &ConverterConfig::default()).unwrap();
        let block = &sdp.media()[0];
        assert_eq!(block.media().port(), 5000);
        assert_eq!(block.connection().unwrap().address(), "10.0.0.1");
        assert_eq!(block.attributes().count("candidate"), 2);
        assert!(block.attributes().contains("sendonly"));
        assert_eq!(block.attributes().get("ice-ufrag").unwrap().value(), Some("u"));
    }

    #[test]
    fn test_conversion_failures() {
        let config = ConverterConfig::default();

        let jingle = Jingle::new(Default::default(), "abc").with_content(content("audio"));
        assert_eq!(to_sdp(&jingle, &config), Err(JingleError::InvalidSessionId { sid: "abc".into() }));

        let jingle = Jingle::new(Default::default(), "1").with_content(Content::new(Creator::Initiator, "audio"));
        assert_eq!(
            to_sdp(&jingle, &config),
            Err(JingleError::MissingDescription { content: "audio".into() })
        );

        let empty = Content::new(Creator::Initiator, "audio").with_description(RtpDescription::new("audio"));
        let jingle = Jingle::new(Default::default(), "1").with_content(empty);
        assert_eq!(to_sdp(&jingle, &config), Err(JingleError::NoMediaFormat { media: "audio".into() }));
    }
}
