use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use super::{NS_ICE_UDP, NS_RAW_UDP, NS_RTP_INFO};
use crate::error::{JingleError, Result};
use crate::model::{
    Candidate, Content, Creator, Crypto, Encryption, IceUdpTransport, IqType, Jingle, PayloadType, RawUdpCandidate,
    RawUdpTransport, Reason, ReasonCondition, RtpDescription, SessionInfo, Stream, Transport,
};

/// A parsed element: local name, attributes in document order, children
/// and concatenated text
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = Element {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attr in start.attributes() {
            let attr = attr.map_err(|e| JingleError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn required(&self, name: &str) -> Result<&str> {
        self.attr(name)
            .ok_or_else(|| JingleError::Xml(format!("missing attribute '{}' on <{}>", name, self.name)))
    }

    fn parsed<T: FromStr>(&self, name: &str, field: &'static str) -> Result<Option<T>> {
        self.attr(name)
            .map(|value| value.parse::<T>().map_err(|_| JingleError::invalid_value(field, value)))
            .transpose()
    }

    fn parsed_required<T: FromStr>(&self, name: &str, field: &'static str) -> Result<T> {
        let value = self.required(name)?;
        value.parse::<T>().map_err(|_| JingleError::invalid_value(field, value))
    }

    fn namespace(&self) -> Option<&str> {
        self.attr("xmlns")
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn read_tree(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => stack.push(Element::from_start(e)?),
            Event::Empty(ref e) => {
                let element = Element::from_start(e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| JingleError::Xml("unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(JingleError::Xml("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| JingleError::Xml("empty document".to_string()))
}

/// Parse a Jingle IQ from XML
///
/// Accepts either a full `<iq>` stanza or a bare `<jingle>` element, in
/// which case the IQ type is `set`.
pub fn from_xml(xml: &str) -> Result<Jingle> {
    let root = read_tree(xml)?;

    let (iq_type, element) = match root.name.as_str() {
        "iq" => {
            let iq_type = root.parsed::<IqType>("type", "iq type")?.unwrap_or_default();
            let element = root
                .child("jingle")
                .ok_or_else(|| JingleError::Xml("<iq> carries no <jingle> element".to_string()))?;
            (iq_type, element)
        }
        "jingle" => (IqType::Set, &root),
        other => return Err(JingleError::Xml(format!("unexpected root element <{}>", other))),
    };

    let mut jingle = Jingle {
        iq_type,
        action: element.parsed_required("action", "jingle action")?,
        sid: element.required("sid")?.to_string(),
        initiator: element.attr("initiator").map(str::to_string),
        responder: element.attr("responder").map(str::to_string),
        ..Default::default()
    };

    for child in &element.children {
        match child.name.as_str() {
            "content" => jingle.contents.push(read_content(child)?),
            "reason" => jingle.reason = read_reason(child),
            _ if child.namespace() == Some(NS_RTP_INFO) => jingle.session_info = read_session_info(child)?,
            other => debug!(element = other, "Skipping unknown jingle child"),
        }
    }

    Ok(jingle)
}

fn read_content(element: &Element) -> Result<Content> {
    let mut content = Content {
        creator: element.parsed("creator", "creator")?.unwrap_or_default(),
        name: element.required("name")?.to_string(),
        senders: element.parsed("senders", "senders")?,
        ..Default::default()
    };

    for child in &element.children {
        match (child.name.as_str(), child.namespace()) {
            ("description", _) => content.description = Some(read_description(child)?),
            ("transport", Some(NS_RAW_UDP)) => match read_raw_udp(child)? {
                Some(raw) => content.transports.push(Transport::RawUdp(raw)),
                None => warn!(content = %content.name, "Skipping raw-udp transport without a candidate"),
            },
            ("transport", Some(NS_ICE_UDP)) => content.transports.push(Transport::IceUdp(read_ice_udp(child)?)),
            (name, ns) => debug!(element = name, namespace = ?ns, "Skipping unknown content child"),
        }
    }

    Ok(content)
}

fn read_description(element: &Element) -> Result<RtpDescription> {
    let mut description = RtpDescription::new(element.attr("media").unwrap_or_default());
    description.profile = element.attr("profile").map(str::to_string);

    for child in &element.children {
        match child.name.as_str() {
            "payload-type" => description.payload_types.push(read_payload_type(child)?),
            "encryption" => {
                let crypto = child
                    .children_named("crypto")
                    .map(|c| {
                        Ok(Crypto {
                            tag: c.required("tag")?.to_string(),
                            crypto_suite: c.required("crypto-suite")?.to_string(),
                            key_params: c.required("key-params")?.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                description.encryption = Some(Encryption {
                    required: matches!(child.attr("required"), Some("1") | Some("true")),
                    crypto,
                });
            }
            "rtcp-mux" => description.rtcp_mux = true,
            "streams" => {
                for stream in child.children_named("stream") {
                    let Some(ssrc) = stream.child("ssrc") else {
                        warn!("Skipping stream without an ssrc");
                        continue;
                    };
                    description.streams.push(Stream {
                        ssrc: ssrc.text.clone(),
                        attributes: stream.attributes.clone(),
                    });
                }
            }
            other => debug!(element = other, "Skipping unknown description child"),
        }
    }

    Ok(description)
}

fn read_payload_type(element: &Element) -> Result<PayloadType> {
    let id = element.required("id")?;
    let id = id.parse::<u8>().map_err(|_| JingleError::InvalidPayloadType {
        value: id.to_string(),
        reason: "payload id must be 0-255".to_string(),
    })?;

    let mut clockrate = element.attr("clockrate").unwrap_or_default().to_string();
    if let Some(channels) = element.attr("channels") {
        clockrate = format!("{}/{}", clockrate, channels);
    }

    Ok(PayloadType::new(id, element.attr("name").unwrap_or_default(), clockrate))
}

fn read_raw_udp(element: &Element) -> Result<Option<RawUdpTransport>> {
    let Some(candidate) = element.child("candidate") else {
        return Ok(None);
    };
    Ok(Some(RawUdpTransport {
        candidate: RawUdpCandidate {
            component: candidate.parsed("component", "component")?.unwrap_or(1),
            generation: candidate.parsed("generation", "generation")?.unwrap_or(0),
            id: candidate.attr("id").map(str::to_string),
            ip: candidate.required("ip")?.to_string(),
            port: candidate.parsed_required("port", "port")?,
        },
    }))
}

fn read_ice_udp(element: &Element) -> Result<IceUdpTransport> {
    let mut transport = IceUdpTransport::with_credentials(
        element.attr("ufrag").map(str::to_string),
        element.attr("pwd").map(str::to_string),
    );
    for candidate in element.children_named("candidate") {
        transport.candidates.push(Candidate {
            component: candidate.parsed_required("component", "component")?,
            foundation: candidate.required("foundation")?.to_string(),
            generation: candidate.parsed("generation", "generation")?.unwrap_or(0),
            id: candidate.attr("id").map(str::to_string),
            ip: candidate.required("ip")?.to_string(),
            port: candidate.parsed_required("port", "port")?,
            priority: candidate.parsed_required("priority", "priority")?,
            protocol: candidate.attr("protocol").unwrap_or("udp").to_string(),
            candidate_type: candidate.parsed_required("type", "candidate type")?,
            rel_addr: candidate.attr("rel-addr").map(str::to_string),
            rel_port: candidate.parsed("rel-port", "rel-port")?,
        });
    }
    Ok(transport)
}

fn read_session_info(element: &Element) -> Result<Option<SessionInfo>> {
    let creator = || -> Result<Creator> { Ok(element.parsed("creator", "creator")?.unwrap_or_default()) };
    let name = || element.attr("name").map(str::to_string);

    let info = match element.name.as_str() {
        "active" => SessionInfo::Active,
        "hold" => SessionInfo::Hold,
        "unhold" => SessionInfo::Unhold,
        "ringing" => SessionInfo::Ringing,
        "mute" => SessionInfo::Mute {
            creator: creator()?,
            name: name(),
        },
        "unmute" => SessionInfo::Unmute {
            creator: creator()?,
            name: name(),
        },
        other => {
            debug!(element = other, "Skipping unknown session-info payload");
            return Ok(None);
        }
    };
    Ok(Some(info))
}

fn read_reason(element: &Element) -> Option<Reason> {
    let text = element.child("text").map(|t| t.text.clone());
    let condition = element.children.iter().filter(|c| c.name != "text").find_map(|c| {
        let content = (!c.text.is_empty()).then(|| c.text.clone());
        ReasonCondition::from_element(&c.name, content)
    });

    match condition {
        Some(condition) => Some(Reason { condition, text }),
        None => {
            warn!("Skipping reason without a known condition");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandidateType, JingleAction, Senders};

    const SESSION_INITIATE: &str = r#"
<iq type='set' id='jingle1' to='juliet@capulet.lit/balcony'>
  <jingle xmlns='urn:xmpp:jingle:1' action='session-initiate' initiator='romeo@montague.lit/orchard' sid='851ba2'>
    <content creator='initiator' name='voice' senders='both'>
      <description xmlns='urn:xmpp:jingle:apps:rtp:1' media='audio'>
        <payload-type id='96' name='speex' clockrate='16000'/>
        <payload-type id='111' name='opus' clockrate='48000' channels='2'/>
        <payload-type id='0' name='PCMU' clockrate='8000'/>
        <bandwidth type='AS'>128</bandwidth>
        <rtcp-mux/>
      </description>
      <transport xmlns='urn:xmpp:jingle:transports:ice-udp:1' pwd='asd88fgpdd777uzjYhagZg' ufrag='8hhy'>
        <candidate component='1' foundation='1' generation='0' id='el0747fg11' ip='10.0.1.1'
                   network='1' port='8998' priority='2130706431' protocol='udp' type='host'/>
        <candidate component='1' foundation='2' generation='0' id='y3s2b30v3r' ip='192.0.2.3'
                   network='1' port='45664' priority='1694498815' protocol='udp'
                   rel-addr='10.0.1.1' rel-port='8998' type='srflx'/>
      </transport>
      <transport xmlns='urn:xmpp:jingle:transports:s5b:1'/>
    </content>
  </jingle>
</iq>"#;

    #[test]
    fn test_read_session_initiate() {
        let jingle = from_xml(SESSION_INITIATE).unwrap();
        assert_eq!(jingle.iq_type, IqType::Set);
        assert_eq!(jingle.action, JingleAction::SessionInitiate);
        assert_eq!(jingle.sid, "851ba2");
        assert_eq!(jingle.initiator.as_deref(), Some("romeo@montague.lit/orchard"));

        let content = &jingle.contents[0];
        assert_eq!(content.name, "voice");
        assert_eq!(content.senders, Some(Senders::Both));
        // the s5b transport is not understood
        assert_eq!(content.transports.len(), 1);

        let description = content.description.as_ref().unwrap();
        assert_eq!(description.media, "audio");
        assert_eq!(description.payload_types.len(), 3);
        assert_eq!(description.payload_type(111).unwrap().clockrate, "48000/2");
        assert!(description.rtcp_mux);

        let ice = content.ice_udp().next().unwrap();
        assert_eq!(ice.ufrag.as_deref(), Some("8hhy"));
        assert_eq!(ice.candidates.len(), 2);
        assert_eq!(ice.candidates[1].candidate_type, CandidateType::Srflx);
        assert_eq!(ice.candidates[1].rel_addr.as_deref(), Some("10.0.1.1"));
        assert_eq!(ice.candidates[1].rel_port, Some(8998));
    }

    #[test]
    fn test_read_bare_jingle_with_reason() {
        let xml = r#"<jingle xmlns='urn:xmpp:jingle:1' action='session-terminate' sid='a73sjjvkla37jfea'>
                       <reason><success/><text>Sorry, gotta go!</text></reason>
                     </jingle>"#;
        let jingle = from_xml(xml).unwrap();
        assert_eq!(jingle.iq_type, IqType::Set);
        let reason = jingle.reason.unwrap();
        assert_eq!(reason.condition, ReasonCondition::Success);
        assert_eq!(reason.text.as_deref(), Some("Sorry, gotta go!"));
    }

    #[test]
    fn test_read_mute() {
        let xml = r#"<iq type='set'><jingle xmlns='urn:xmpp:jingle:1' action='session-info' sid='a73sjjvkla37jfea'>
                       <mute xmlns='urn:xmpp:jingle:apps:rtp:info:1' creator='responder' name='voice'/>
                     </jingle></iq>"#;
        let jingle = from_xml(xml).unwrap();
        assert_eq!(
            jingle.session_info,
            Some(SessionInfo::Mute {
                creator: Creator::Responder,
                name: Some("voice".into())
            })
        );
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(from_xml(""), Err(JingleError::Xml(_))));
        assert!(matches!(from_xml("<message/>"), Err(JingleError::Xml(_))));
        assert!(from_xml("<jingle xmlns='urn:xmpp:jingle:1' sid='1'/>").is_err());
        assert!(matches!(
            from_xml("<jingle xmlns='urn:xmpp:jingle:1' action='session-begin' sid='1'/>"),
            Err(JingleError::InvalidValue { field: "jingle action", .. })
        ));

        let bad_port = r#"<jingle xmlns='urn:xmpp:jingle:1' action='transport-info' sid='1'>
            <content creator='initiator' name='audio'>
              <transport xmlns='urn:xmpp:jingle:transports:raw-udp:1'>
                <candidate component='1' generation='0' ip='10.0.0.1' port='99999'/>
              </transport>
            </content></jingle>"#;
        assert!(matches!(from_xml(bad_port), Err(JingleError::InvalidValue { field: "port", .. })));
    }
}
