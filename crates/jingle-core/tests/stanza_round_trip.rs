//! Conversion and stanza round trips over generated sessions

use jingle_core::{to_jingle, to_sdp, xml, ConverterConfig, Jingle, JingleAction, Reason, ReasonCondition};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sdp_core::{Attribute, Connection, Media, MediaDescription, Origin, SessionDescription, SessionName};

fn ipv4() -> impl Strategy<Value = String> {
    (1u8..=223, any::<u8>(), any::<u8>(), 1u8..=254).prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d))
}

fn candidate() -> impl Strategy<Value = String> {
    (
        1u32..1000,
        1u8..=2,
        any::<u32>(),
        ipv4(),
        1u16..=u16::MAX,
        prop::option::of((ipv4(), 1u16..=u16::MAX)),
        0u32..3,
    )
        .prop_map(|(foundation, component, priority, ip, port, related, generation)| match related {
            Some((raddr, rport)) => format!(
                "{} {} udp {} {} {} typ srflx raddr {} rport {} generation {}",
                foundation, component, priority, ip, port, raddr, rport, generation
            ),
            None => format!(
                "{} {} udp {} {} {} typ host generation {}",
                foundation, component, priority, ip, port, generation
            ),
        })
}

fn media_block() -> impl Strategy<Value = MediaDescription> {
    (
        prop::sample::select(vec!["audio", "video"]),
        1u16..=u16::MAX,
        ipv4(),
        prop::collection::btree_set(96u8..=127, 1..4),
        prop::collection::vec(candidate(), 0..4),
        prop::collection::vec("[A-Za-z0-9+/]{8,40}", 0..2),
        any::<bool>(),
        prop::option::of((any::<u32>(), "[a-zA-Z0-9]{4,16}")),
        prop::option::of("[a-zA-Z0-9]{4,8}"),
    )
        .prop_map(|(kind, port, address, ids, candidates, keys, rtcp_mux, ssrc, ufrag)| {
            let ids: Vec<u8> = ids.into_iter().collect();
            let mut media = Media::new(kind, port, "RTP/SAVPF", ids[0].to_string()).unwrap();
            for id in &ids[1..] {
                media.add_format(id.to_string()).unwrap();
            }

            let mut block = MediaDescription::new(media).with_connection(Connection::new(&address).unwrap());
            if let Some(ufrag) = ufrag {
                block.add_attribute(Attribute::new("ice-ufrag", ufrag).unwrap());
                block.add_attribute(Attribute::new("ice-pwd", "asd88fgpdd777uzjYhagZg").unwrap());
            }
            for candidate in candidates {
                block.add_attribute(Attribute::new("candidate", candidate).unwrap());
            }
            if rtcp_mux {
                block.add_attribute(Attribute::flag("rtcp-mux").unwrap());
            }
            for (tag, key) in keys.iter().enumerate() {
                block.add_attribute(
                    Attribute::new("crypto", format!("{} AES_CM_128_HMAC_SHA1_80 inline:{}", tag + 1, key)).unwrap(),
                );
            }
            for id in &ids {
                block.add_attribute(Attribute::new("rtpmap", format!("{} opus/48000/2", id)).unwrap());
            }
            if let Some((ssrc, cname)) = ssrc {
                block.add_attribute(Attribute::new("ssrc", format!("{} cname:{}", ssrc, cname)).unwrap());
                block.add_attribute(Attribute::new("ssrc", format!("{} label:{}-label", ssrc, kind)).unwrap());
            }
            block
        })
}

fn session() -> impl Strategy<Value = SessionDescription> {
    (any::<u64>(), prop::collection::vec(media_block(), 1..4)).prop_map(|(session_id, blocks)| {
        let origin = Origin::new("-", session_id, 1, "127.0.0.1").unwrap();
        let mut sdp = SessionDescription::new(origin, SessionName::default());
        sdp.set_media(blocks).unwrap();
        sdp
    })
}

proptest! {
    #[test]
    fn conversion_round_trip_preserves_semantics(sdp in session()) {
        let config = ConverterConfig::default();
        let jingle = to_jingle(&sdp, &config).unwrap();
        let rebuilt = to_sdp(&jingle, &config).unwrap();

        prop_assert_eq!(rebuilt.origin().session_id(), sdp.origin().session_id());
        prop_assert_eq!(rebuilt.media().len(), sdp.media().len());
        for (before, after) in sdp.media().iter().zip(rebuilt.media()) {
            prop_assert_eq!(before.media(), after.media());
            prop_assert_eq!(before.connection(), after.connection());
            for name in ["candidate", "crypto", "rtpmap", "ssrc", "rtcp-mux", "ice-ufrag"] {
                prop_assert_eq!(before.attributes().get_all(name), after.attributes().get_all(name));
            }
        }

        prop_assert_eq!(to_jingle(&rebuilt, &config).unwrap(), jingle);
    }

    #[test]
    fn stanza_round_trip(sdp in session()) {
        let jingle = to_jingle(&sdp, &ConverterConfig::default()).unwrap();
        let stanza = xml::to_xml(&jingle).unwrap();
        prop_assert_eq!(xml::from_xml(&stanza).unwrap(), jingle);
    }
}

#[test]
fn test_session_terminate_round_trip() {
    let mut jingle = Jingle::new(JingleAction::SessionTerminate, "a73sjjvkla37jfea");
    jingle.initiator = Some("romeo@montague.lit/orchard".into());
    jingle.reason = Some(Reason {
        condition: ReasonCondition::Busy,
        text: Some("in a <meeting> & away".into()),
    });

    let stanza = jingle.to_xml().unwrap();
    assert!(stanza.contains("<reason><busy/><text>in a &lt;meeting&gt; &amp; away</text></reason>"));
    assert_eq!(Jingle::from_xml(&stanza).unwrap(), jingle);
}

#[test]
fn test_mute_round_trip() {
    for mute in [true, false] {
        let jingle = Jingle::mute("42", mute, Some("video".into()));
        assert_eq!(Jingle::from_xml(&jingle.to_xml().unwrap()).unwrap(), jingle);
    }
    let all = Jingle::mute("42", true, None);
    assert_eq!(Jingle::from_xml(&all.to_xml().unwrap()).unwrap(), all);
}
