use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::warn;

use super::{is_xml_name, NS_ICE_UDP, NS_JINGLE, NS_RAW_UDP, NS_RTP, NS_RTP_INFO};
use crate::error::{JingleError, Result};
use crate::model::{
    Candidate, Content, IceUdpTransport, Jingle, RawUdpTransport, Reason, RtpDescription, SessionInfo, Transport,
};

struct StanzaWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl StanzaWriter {
    fn new() -> Self {
        StanzaWriter {
            writer: Writer::new(Cursor::new(Vec::new())),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| JingleError::Xml(e.to_string()))
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.write(Event::Start(element))
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<()> {
        self.write(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(BytesStart::new(name))?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner().into_inner()).map_err(|e| JingleError::Xml(e.to_string()))
    }
}

/// Serialize a Jingle IQ as XML
pub fn to_xml(jingle: &Jingle) -> Result<String> {
    let mut out = StanzaWriter::new();

    let mut iq = BytesStart::new("iq");
    iq.push_attribute(("type", jingle.iq_type.as_str()));
    out.start(iq)?;

    let mut element = BytesStart::new("jingle");
    element.push_attribute(("xmlns", NS_JINGLE));
    element.push_attribute(("action", jingle.action.as_str()));
    element.push_attribute(("sid", jingle.sid.as_str()));
    if let Some(initiator) = &jingle.initiator {
        element.push_attribute(("initiator", initiator.as_str()));
    }
    if let Some(responder) = &jingle.responder {
        element.push_attribute(("responder", responder.as_str()));
    }
    out.start(element)?;

    for content in &jingle.contents {
        write_content(&mut out, content)?;
    }
    if let Some(info) = &jingle.session_info {
        write_session_info(&mut out, info)?;
    }
    if let Some(reason) = &jingle.reason {
        write_reason(&mut out, reason)?;
    }

    out.end("jingle")?;
    out.end("iq")?;
    out.finish()
}

fn write_content(out: &mut StanzaWriter, content: &Content) -> Result<()> {
    let mut element = BytesStart::new("content");
    element.push_attribute(("creator", content.creator.as_str()));
    element.push_attribute(("name", content.name.as_str()));
    if let Some(senders) = content.senders {
        element.push_attribute(("senders", senders.as_str()));
    }
    out.start(element)?;

    if let Some(description) = &content.description {
        write_description(out, description)?;
    }
    for transport in &content.transports {
        match transport {
            Transport::RawUdp(raw) => write_raw_udp(out, raw)?,
            Transport::IceUdp(ice) => write_ice_udp(out, ice)?,
        }
    }

    out.end("content")
}

fn write_description(out: &mut StanzaWriter, description: &RtpDescription) -> Result<()> {
    let mut element = BytesStart::new("description");
    element.push_attribute(("xmlns", NS_RTP));
    element.push_attribute(("media", description.media.as_str()));
    if let Some(profile) = &description.profile {
        element.push_attribute(("profile", profile.as_str()));
    }
    out.start(element)?;

    for payload in &description.payload_types {
        let mut element = BytesStart::new("payload-type");
        element.push_attribute(("id", payload.id.to_string().as_str()));
        if !payload.name.is_empty() {
            element.push_attribute(("name", payload.name.as_str()));
        }
        // `48000/2` travels as clockrate='48000' channels='2'
        match payload.clockrate.split_once('/') {
            Some((rate, channels)) => {
                element.push_attribute(("clockrate", rate));
                element.push_attribute(("channels", channels));
            }
            None if !payload.clockrate.is_empty() => {
                element.push_attribute(("clockrate", payload.clockrate.as_str()));
            }
            None => {}
        }
        out.empty(element)?;
    }

    if let Some(encryption) = &description.encryption {
        let mut element = BytesStart::new("encryption");
        element.push_attribute(("required", if encryption.required { "1" } else { "0" }));
        out.start(element)?;
        for crypto in &encryption.crypto {
            let mut element = BytesStart::new("crypto");
            element.push_attribute(("tag", crypto.tag.as_str()));
            element.push_attribute(("crypto-suite", crypto.crypto_suite.as_str()));
            element.push_attribute(("key-params", crypto.key_params.as_str()));
            out.empty(element)?;
        }
        out.end("encryption")?;
    }

    if description.rtcp_mux {
        out.empty(BytesStart::new("rtcp-mux"))?;
    }

    if !description.streams.is_empty() {
        out.start(BytesStart::new("streams"))?;
        for stream in &description.streams {
            let mut element = BytesStart::new("stream");
            for (name, value) in &stream.attributes {
                if is_xml_name(name) {
                    element.push_attribute((name.as_str(), value.as_str()));
                } else {
                    warn!(ssrc = %stream.ssrc, attribute = %name, "Skipping stream attribute that is not an XML name");
                }
            }
            out.start(element)?;
            out.text_element("ssrc", &stream.ssrc)?;
            out.end("stream")?;
        }
        out.end("streams")?;
    }

    out.end("description")
}

fn write_raw_udp(out: &mut StanzaWriter, raw: &RawUdpTransport) -> Result<()> {
    let mut element = BytesStart::new("transport");
    element.push_attribute(("xmlns", NS_RAW_UDP));
    out.start(element)?;

    let candidate = &raw.candidate;
    let mut element = BytesStart::new("candidate");
    element.push_attribute(("component", candidate.component.to_string().as_str()));
    element.push_attribute(("generation", candidate.generation.to_string().as_str()));
    if let Some(id) = &candidate.id {
        element.push_attribute(("id", id.as_str()));
    }
    element.push_attribute(("ip", candidate.ip.as_str()));
    element.push_attribute(("port", candidate.port.to_string().as_str()));
    out.empty(element)?;

    out.end("transport")
}

fn write_ice_udp(out: &mut StanzaWriter, ice: &IceUdpTransport) -> Result<()> {
    let mut element = BytesStart::new("transport");
    element.push_attribute(("xmlns", NS_ICE_UDP));
    if let Some(ufrag) = &ice.ufrag {
        element.push_attribute(("ufrag", ufrag.as_str()));
    }
    if let Some(pwd) = &ice.pwd {
        element.push_attribute(("pwd", pwd.as_str()));
    }

    if ice.candidates.is_empty() {
        return out.empty(element);
    }
    out.start(element)?;
    for candidate in &ice.candidates {
        write_candidate(out, candidate)?;
    }
    out.end("transport")
}

fn write_candidate(out: &mut StanzaWriter, candidate: &Candidate) -> Result<()> {
    let mut element = BytesStart::new("candidate");
    element.push_attribute(("component", candidate.component.to_string().as_str()));
    element.push_attribute(("foundation", candidate.foundation.as_str()));
    element.push_attribute(("generation", candidate.generation.to_string().as_str()));
    if let Some(id) = &candidate.id {
        element.push_attribute(("id", id.as_str()));
    }
    element.push_attribute(("ip", candidate.ip.as_str()));
    element.push_attribute(("port", candidate.port.to_string().as_str()));
    element.push_attribute(("priority", candidate.priority.to_string().as_str()));
    element.push_attribute(("protocol", candidate.protocol.as_str()));
    element.push_attribute(("type", candidate.candidate_type.as_str()));
    if let Some(rel_addr) = &candidate.rel_addr {
        element.push_attribute(("rel-addr", rel_addr.as_str()));
    }
    if let Some(rel_port) = candidate.rel_port {
        element.push_attribute(("rel-port", rel_port.to_string().as_str()));
    }
    out.empty(element)
}

fn write_session_info(out: &mut StanzaWriter, info: &SessionInfo) -> Result<()> {
    let mut element = BytesStart::new(info.element_name());
    element.push_attribute(("xmlns", NS_RTP_INFO));
    if let SessionInfo::Mute { creator, name } | SessionInfo::Unmute { creator, name } = info {
        element.push_attribute(("creator", creator.as_str()));
        if let Some(name) = name {
            element.push_attribute(("name", name.as_str()));
        }
    }
    out.empty(element)
}

fn write_reason(out: &mut StanzaWriter, reason: &Reason) -> Result<()> {
    out.start(BytesStart::new("reason"))?;
    let condition = reason.condition.element_name();
    match reason.condition.text() {
        Some(text) => out.text_element(condition, text)?,
        None => out.empty(BytesStart::new(condition))?,
    }
    if let Some(text) = &reason.text {
        out.text_element("text", text)?;
    }
    out.end("reason")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Creator, Crypto, Encryption, JingleAction, PayloadType, RawUdpCandidate, Stream};

    #[test]
    fn test_write_description() {
        let mut description = RtpDescription::new("audio");
        description.profile = Some("RTP/AVPF".into());
        description.payload_types.push(PayloadType::new(111, "opus", "48000/2"));
        description.payload_types.push(PayloadType::id_only(18));
        description.encryption = Some(Encryption {
            required: true,
            crypto: vec![Crypto {
                tag: "0".into(),
                crypto_suite: "AES_CM_128_HMAC_SHA1_32".into(),
                key_params: "inline:abc".into(),
            }],
        });
        description.rtcp_mux = true;
        let mut stream = Stream::new("42");
        stream.set_attribute("cname", "x");
        description.streams.push(stream);

        let jingle = Jingle::new(JingleAction::SessionInitiate, "7")
            .with_content(Content::new(Creator::Initiator, "audio").with_description(description));
        let xml = to_xml(&jingle).unwrap();

        assert!(xml.starts_with(r#"<iq type="set"><jingle xmlns="urn:xmpp:jingle:1" action="session-initiate" sid="7">"#));
        assert!(xml.contains(r#"<payload-type id="111" name="opus" clockrate="48000" channels="2"/>"#));
        assert!(xml.contains(r#"<payload-type id="18"/>"#));
        assert!(xml.contains(r#"<encryption required="1"><crypto tag="0" crypto-suite="AES_CM_128_HMAC_SHA1_32" key-params="inline:abc"/></encryption>"#));
        assert!(xml.contains("<rtcp-mux/>"));
        assert!(xml.contains(r#"<streams><stream cname="x"><ssrc>42</ssrc></stream></streams>"#));
    }

    #[test]
    fn test_write_transports() {
        let content = Content::new(Creator::Initiator, "video")
            .with_transport(Transport::RawUdp(RawUdpTransport {
                candidate: RawUdpCandidate {
                    component: 1,
                    generation: 0,
                    id: None,
                    ip: "10.0.0.1".into(),
                    port: 5000,
                },
            }))
            .with_transport(Transport::IceUdp(IceUdpTransport::with_credentials(
                Some("frag".into()),
                Some("secret".into()),
            )));
        let jingle = Jingle::new(JingleAction::TransportInfo, "7").with_content(content);
        let xml = to_xml(&jingle).unwrap();

        assert!(xml.contains(
            r#"<transport xmlns="urn:xmpp:jingle:transports:raw-udp:1"><candidate component="1" generation="0" ip="10.0.0.1" port="5000"/></transport>"#
        ));
        assert!(xml.contains(r#"<transport xmlns="urn:xmpp:jingle:transports:ice-udp:1" ufrag="frag" pwd="secret"/>"#));
    }

    #[test]
    fn test_write_session_info() {
        let xml = to_xml(&Jingle::mute("7", false, Some("audio".into()))).unwrap();
        assert!(xml.contains(r#"<unmute xmlns="urn:xmpp:jingle:apps:rtp:info:1" creator="initiator" name="audio"/>"#));
    }
}
