//! `a=rtpmap` values and payload type lists

use tracing::warn;

use crate::error::{JingleError, Result};
use crate::model::PayloadType;
use sdp_core::MediaDescription;

fn invalid(value: &str, reason: &str) -> JingleError {
    JingleError::InvalidPayloadType {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse `<id> <name>/<clockrate>[/<params>]`
pub fn parse_rtpmap(value: &str) -> Result<PayloadType> {
    let (id, encoding) = value
        .split_once(' ')
        .ok_or_else(|| invalid(value, "expected '<id> <encoding>/<clockrate>'"))?;
    let id = id.parse::<u8>().map_err(|_| invalid(value, "payload id must be 0-255"))?;
    let (name, clockrate) = encoding
        .trim()
        .split_once('/')
        .ok_or_else(|| invalid(value, "missing clock rate"))?;
    if name.is_empty() || clockrate.is_empty() {
        return Err(invalid(value, "empty encoding name or clock rate"));
    }
    Ok(PayloadType::new(id, name, clockrate))
}

/// Format the value of an `a=rtpmap` attribute
///
/// An rtpmap needs both an encoding name and a clock rate.
pub fn format_rtpmap(payload: &PayloadType) -> Result<String> {
    let value = format!("{} {}/{}", payload.id, payload.name, payload.clockrate);
    if payload.name.is_empty() || payload.clockrate.is_empty() {
        return Err(invalid(&value, "empty encoding name or clock rate"));
    }
    Ok(value)
}

/// Payload types of a media block
///
/// `rtpmap` attributes come first in attribute order, then every format
/// token without an `rtpmap` as an id-only entry.
pub fn payload_types(block: &MediaDescription) -> Result<Vec<PayloadType>> {
    let mut payloads = block
        .attributes()
        .get_all("rtpmap")
        .into_iter()
        .map(|attribute| parse_rtpmap(attribute.value().unwrap_or_default()))
        .collect::<Result<Vec<_>>>()?;

    for format in block.media().formats() {
        match format.parse::<u8>() {
            Ok(id) if payloads.iter().all(|p| p.id != id) => payloads.push(PayloadType::id_only(id)),
            Ok(_) => {}
            Err(_) => warn!(media = block.media().media_type(), format = %format, "Skipping non-RTP media format"),
        }
    }

    Ok(payloads)
}
