//! `a=ssrc` lines and `<stream/>` entries

use tracing::{debug, warn};

use crate::config::SsrcGrouping;
use crate::model::Stream;
use sdp_core::Attribute;

/// Group `a=ssrc:<id> <name>:<value>` lines into streams keyed by ssrc id
pub fn streams<'a, I>(attributes: I, grouping: SsrcGrouping) -> Vec<Stream>
where
    I: IntoIterator<Item = &'a Attribute>,
{
    let mut streams: Vec<Stream> = Vec::new();

    for attribute in attributes {
        let value = attribute.value().unwrap_or_default();
        let Some((ssrc, parameter)) = value.split_once(' ') else {
            warn!(value, "Skipping ssrc line without an attribute");
            continue;
        };
        let Some((name, parameter_value)) = parameter.trim().split_once(':') else {
            warn!(value, "Skipping ssrc line without a key");
            continue;
        };

        if grouping == SsrcGrouping::FirstSeen && streams.first().is_some_and(|s| s.ssrc != ssrc) {
            debug!(ssrc, "Ignoring ssrc line outside the first stream");
            continue;
        }

        let index = match streams.iter().position(|s| s.ssrc == ssrc) {
            Some(index) => index,
            None => {
                streams.push(Stream::new(ssrc));
                streams.len() - 1
            }
        };
        streams[index].set_attribute(name, parameter_value);
    }

    streams
}

/// `a=ssrc` values for one stream, one per attribute
pub fn format_stream(stream: &Stream) -> Vec<String> {
    stream
        .attributes
        .iter()
        .map(|(name, value)| format!("{} {}:{}", stream.ssrc, name, value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssrc(value: &str) -> Attribute {
        Attribute::new("ssrc", value).unwrap()
    }

    fn lines() -> Vec<Attribute> {
        vec![
            ssrc("2570980487 cname:hsWuSQJxx7przmb8"),
            ssrc("2570980487 mslabel:stream_label"),
            ssrc("43633328 cname:other"),
            ssrc("2570980487 label:audio_label"),
            ssrc("43633328"),
            ssrc("43633328 nokey"),
        ]
    }

    #[test]
    fn test_group_per_ssrc() {
        let lines = lines();
        let streams = streams(&lines, SsrcGrouping::PerSsrc);
        assert_eq!(streams.len(), 2);

        assert_eq!(streams[0].ssrc, "2570980487");
        assert_eq!(streams[0].attributes.len(), 3);
        assert_eq!(streams[0].attribute("label"), Some("audio_label"));
        assert_eq!(streams[1].ssrc, "43633328");
        assert_eq!(streams[1].attribute("cname"), Some("other"));

        assert_eq!(
            format_stream(&streams[0]),
            vec![
                "2570980487 cname:hsWuSQJxx7przmb8",
                "2570980487 mslabel:stream_label",
                "2570980487 label:audio_label"
            ]
        );
    }

    #[test]
    fn test_group_first_seen() {
        let lines = lines();
        let streams = streams(&lines, SsrcGrouping::FirstSeen);
        assert_eq!(streams.len(), 1);
        assert_eq!(streams[0].attributes.len(), 3);
    }

    #[test]
    fn test_values_may_contain_colons() {
        let lines = vec![ssrc("1 msid:stream track:0")];
        let streams = streams(&lines, SsrcGrouping::PerSsrc);
        assert_eq!(streams[0].attribute("msid"), Some("stream track:0"));
    }
}
