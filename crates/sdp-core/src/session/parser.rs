//! Document-level SDP parser
//!
//! `v=`, `o=` and `s=` must open the document in that order. After them the
//! session-level lines may come in any order, `r=` lines attach to the most
//! recent `t=`, and each `m=` opens a media block that only accepts
//! `i=`, `c=`, `b=`, `k=` and `a=` lines.

use tracing::trace;

use super::{MediaDescription, SessionDescription, TimeDescription};
use crate::error::{Error, Result};
use crate::field::SdpLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FieldOrder {
    Version,
    Origin,
    SessionName,
    SessionLevel,
    Media,
}

fn duplicate(line: &str, field: &str) -> Error {
    Error::order(line, format!("multiple {} lines", field))
}

/// Parse a complete SDP document; CRLF and LF line endings are accepted
pub fn parse_sdp(text: &str) -> Result<SessionDescription> {
    let mut position = FieldOrder::Version;
    let mut session: Option<SessionDescription> = None;
    let mut version = None;
    let mut origin = None;
    let mut times: Vec<TimeDescription> = Vec::new();
    let mut blocks: Vec<MediaDescription> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        trace!(line, "parsing SDP line");
        let parsed: SdpLine = line.parse()?;

        match (position, parsed) {
            (FieldOrder::Version, SdpLine::Version(v)) => {
                version = Some(v);
                position = FieldOrder::Origin;
            }
            (FieldOrder::Version, _) => return Err(Error::order(line, "v= must be the first line")),

            (FieldOrder::Origin, SdpLine::Origin(o)) => {
                origin = Some(o);
                position = FieldOrder::SessionName;
            }
            (FieldOrder::Origin, _) => return Err(Error::order(line, "o= must follow v=")),

            (FieldOrder::SessionName, SdpLine::SessionName(name)) => {
                let origin = origin.take().ok_or(Error::MissingField("o"))?;
                let mut sdp = SessionDescription::new(origin, name);
                if let Some(v) = version.take() {
                    sdp.set_version(v);
                }
                session = Some(sdp);
                position = FieldOrder::SessionLevel;
            }
            (FieldOrder::SessionName, _) => return Err(Error::order(line, "s= must follow o=")),

            (FieldOrder::SessionLevel, parsed) => {
                let sdp = session.as_mut().ok_or(Error::MissingField("s"))?;
                match parsed {
                    SdpLine::Information(i) => {
                        if sdp.information().is_some() {
                            return Err(duplicate(line, "session-level i="));
                        }
                        sdp.set_information(Some(i));
                    }
                    SdpLine::Uri(u) => {
                        if sdp.uri().is_some() {
                            return Err(duplicate(line, "u="));
                        }
                        sdp.set_uri(Some(u));
                    }
                    SdpLine::Email(e) => sdp.add_email(e),
                    SdpLine::Phone(p) => sdp.add_phone(p),
                    SdpLine::Connection(c) => {
                        if sdp.connection().is_some() {
                            return Err(duplicate(line, "session-level c="));
                        }
                        sdp.set_connection(c);
                    }
                    SdpLine::Bandwidth(b) => sdp.add_bandwidth(b),
                    SdpLine::Time(t) => times.push(TimeDescription::new(t)),
                    SdpLine::RepeatTime(r) => match times.last_mut() {
                        Some(time) => time.add_repeat_time(r),
                        None => return Err(Error::order(line, "r= must follow a t= line")),
                    },
                    SdpLine::TimeZone(z) => {
                        if sdp.time_zone().is_some() {
                            return Err(duplicate(line, "z="));
                        }
                        sdp.set_time_zone(Some(z));
                    }
                    SdpLine::Key(k) => {
                        if sdp.key().is_some() {
                            return Err(duplicate(line, "session-level k="));
                        }
                        sdp.set_key(Some(k));
                    }
                    SdpLine::Attribute(a) => sdp.add_attribute(a),
                    SdpLine::Media(m) => {
                        if times.is_empty() {
                            return Err(Error::MissingField("t"));
                        }
                        blocks.push(MediaDescription::new(m));
                        position = FieldOrder::Media;
                    }
                    SdpLine::Version(_) | SdpLine::Origin(_) | SdpLine::SessionName(_) => {
                        return Err(duplicate(line, &format!("{}=", line.chars().next().unwrap_or('?'))));
                    }
                }
            }

            (FieldOrder::Media, parsed) => {
                let Some(block) = blocks.last_mut() else {
                    return Err(Error::order(line, "media-level line outside a media block"));
                };
                match parsed {
                    SdpLine::Media(m) => blocks.push(MediaDescription::new(m)),
                    SdpLine::Information(i) => {
                        if block.information().is_some() {
                            return Err(duplicate(line, "media-level i="));
                        }
                        block.set_information(Some(i));
                    }
                    SdpLine::Connection(c) => {
                        if block.connection().is_some() {
                            return Err(duplicate(line, "media-level c="));
                        }
                        block.set_connection(c);
                    }
                    SdpLine::Bandwidth(b) => block.add_bandwidth(b),
                    SdpLine::Key(k) => {
                        if block.key().is_some() {
                            return Err(duplicate(line, "media-level k="));
                        }
                        block.set_key(Some(k));
                    }
                    SdpLine::Attribute(a) => block.add_attribute(a),
                    other => {
                        return Err(Error::order(
                            line,
                            format!("{}= is not allowed inside a media block", other.type_char()),
                        ));
                    }
                }
            }
        }
    }

    let mut sdp = match position {
        FieldOrder::Version => return Err(Error::MissingField("v")),
        FieldOrder::Origin => return Err(Error::MissingField("o")),
        FieldOrder::SessionName => return Err(Error::MissingField("s")),
        FieldOrder::SessionLevel | FieldOrder::Media => session.ok_or(Error::MissingField("s"))?,
    };

    sdp.set_time_descriptions(times)?;
    for block in blocks {
        sdp.add_media(block)?;
    }

    trace!(media = sdp.media().len(), "parsed SDP document");
    Ok(sdp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::KeyMethod;
    use crate::primitives::AddressType;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    const RFC_EXAMPLE: &str = "v=0\r\n\
        o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
        s=SDP Seminar\r\n\
        i=A Seminar on the session description protocol\r\n\
        u=http://www.example.com/seminars/sdp.pdf\r\n\
        e=j.doe@example.com (Jane Doe)\r\n\
        p=+1 617 555-6011\r\n\
        c=IN IP4 224.2.17.12/127\r\n\
        b=CT:1000\r\n\
        t=2873397496 2873404696\r\n\
        r=7d 1h 0 25h\r\n\
        z=2882844526 -1h 2898848070 0\r\n\
        k=clear:secret\r\n\
        a=recvonly\r\n\
        m=audio 49170 RTP/AVP 0\r\n\
        m=video 51372 RTP/AVP 99\r\n\
        c=IN IP6 2001:db8::1\r\n\
        a=rtpmap:99 h263-1998/90000\r\n";

    #[test]
    fn test_parse_full_document() {
        let sdp = parse_sdp(RFC_EXAMPLE).unwrap();

        assert_eq!(sdp.origin().username(), "jdoe");
        assert_eq!(sdp.session_name().value(), "SDP Seminar");
        assert_eq!(sdp.information().unwrap().value(), "A Seminar on the session description protocol");
        assert_eq!(sdp.uri().unwrap().scheme(), "http");
        assert_eq!(sdp.emails()[0].contact().name(), Some("Jane Doe"));
        assert_eq!(sdp.phones()[0].contact().address(), "+1 617 555-6011");
        assert_eq!(sdp.connection().unwrap().resource().ttl(), Some(127));
        assert_eq!(sdp.bandwidths()[0].bandwidth(), 1000);
        assert_eq!(sdp.time_descriptions().len(), 1);
        assert_eq!(sdp.time_descriptions()[0].repeat_times()[0].interval(), 604800);
        assert_eq!(sdp.time_zone().unwrap().adjustments().len(), 2);
        assert_eq!(sdp.key().unwrap().method(), KeyMethod::Clear);
        assert!(sdp.attributes().contains("recvonly"));

        assert_eq!(sdp.media().len(), 2);
        assert!(sdp.media()[0].connection().is_none());
        assert_eq!(sdp.media()[1].connection().unwrap().address_type(), AddressType::Ip6);
        assert_eq!(sdp.media()[1].attributes().get("rtpmap").unwrap().value(), Some("99 h263-1998/90000"));
    }

    #[test]
    fn test_serialization_is_exact() {
        let sdp = parse_sdp(RFC_EXAMPLE).unwrap();
        assert_eq!(sdp.to_string(), RFC_EXAMPLE);
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let first = parse_sdp(RFC_EXAMPLE).unwrap();
        let second = parse_sdp(&first.to_string()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lf_line_endings_and_bytes() {
        let text = RFC_EXAMPLE.replace("\r\n", "\n");
        let from_text = parse_sdp(&text).unwrap();
        let from_bytes = SessionDescription::parse_bytes(&Bytes::from(text)).unwrap();
        assert_eq!(from_text, from_bytes);

        let binary = Bytes::from_static(&[0x76, 0x3d, 0xff, 0xfe]);
        assert!(SessionDescription::parse_bytes(&binary).is_err());
    }

    #[test]
    fn test_mandatory_lines() {
        assert_eq!(parse_sdp("").unwrap_err(), Error::MissingField("v"));
        assert_eq!(parse_sdp("v=0\r\n").unwrap_err(), Error::MissingField("o"));
        assert_eq!(
            parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\n").unwrap_err(),
            Error::MissingField("s")
        );
        assert_eq!(
            parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\n").unwrap_err(),
            Error::MissingField("t")
        );
        assert_eq!(
            parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\nc=IN IP4 10.0.0.1\r\nm=audio 9 RTP/AVP 0\r\n")
                .unwrap_err(),
            Error::MissingField("t")
        );
    }

    #[test]
    fn test_field_order_violations() {
        assert!(matches!(
            parse_sdp("o=- 1 1 IN IP4 10.0.0.1\r\nv=0\r\n").unwrap_err(),
            Error::FieldOrder { .. }
        ));
        assert!(matches!(
            parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\nr=7d 1h 0\r\nt=0 0\r\n").unwrap_err(),
            Error::FieldOrder { .. }
        ));
        assert!(matches!(
            parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\nt=0 0\r\nv=0\r\n").unwrap_err(),
            Error::FieldOrder { .. }
        ));
        assert!(matches!(
            parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\nc=IN IP4 10.0.0.1\r\nt=0 0\r\nm=audio 9 RTP/AVP 0\r\nt=0 0\r\n")
                .unwrap_err(),
            Error::FieldOrder { .. }
        ));
    }

    #[test]
    fn test_unknown_line_is_parse_error() {
        let err = parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\nt=0 0\r\nx=unknown\r\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_media_without_connection() {
        let err = parse_sdp("v=0\r\no=- 1 1 IN IP4 10.0.0.1\r\ns=-\r\nt=0 0\r\nm=audio 9 RTP/AVP 0\r\n").unwrap_err();
        assert_eq!(err, Error::MissingConnection { media: "audio".into() });
    }
}
