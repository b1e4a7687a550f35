//! Trickle-style `transport-info` built from bare candidate lines

use super::candidate::parse_candidate;
use crate::error::Result;
use crate::model::{Content, Creator, IceUdpTransport, Jingle, JingleAction, Transport};

const CANDIDATE_PREFIXES: [&str; 2] = ["a=candidate:", "candidate:"];

fn strip_prefix(line: &str) -> &str {
    let line = line.trim();
    CANDIDATE_PREFIXES
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .unwrap_or(line)
}

/// Build a `transport-info` IQ carrying one ICE transport with every
/// candidate
///
/// Lines may keep their `a=candidate:` or `candidate:` prefix; blank lines
/// are ignored.
///
/// ```
/// use jingle_core::{transport_info, JingleAction};
///
/// let jingle = transport_info(
///     ["a=candidate:1 1 udp 2113937151 192.168.1.2 54400 typ host generation 0"],
///     "1234",
///     "audio",
/// )
/// .unwrap();
/// assert_eq!(jingle.action, JingleAction::TransportInfo);
/// assert_eq!(jingle.contents[0].ice_udp().next().unwrap().candidates.len(), 1);
/// ```
pub fn transport_info<I, S>(candidates: I, sid: impl Into<String>, content_name: &str) -> Result<Jingle>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut transport = IceUdpTransport::default();
    for line in candidates {
        let value = strip_prefix(line.as_ref());
        if value.is_empty() {
            continue;
        }
        transport.candidates.push(parse_candidate(value)?);
    }

    let content = Content::new(Creator::Initiator, content_name).with_transport(Transport::IceUdp(transport));
    Ok(Jingle::new(JingleAction::TransportInfo, sid).with_content(content))
}
