//! `a=crypto` (SDES) lines and the `<encryption/>` block

use tracing::warn;

use crate::model::{Crypto, Encryption};
use sdp_core::Attribute;

/// Parse `<tag> <crypto-suite> <key-params>`
///
/// Lines with fewer than three tokens are skipped. Session parameters after
/// the key are not modelled and are dropped.
pub fn parse_crypto(attribute: &Attribute) -> Option<Crypto> {
    match attribute.tokens().as_slice() {
        [tag, suite, key_params, rest @ ..] => {
            if !rest.is_empty() {
                warn!(tag, dropped = rest.len(), "Dropping crypto session parameters");
            }
            Some(Crypto {
                tag: tag.to_string(),
                crypto_suite: suite.to_string(),
                key_params: key_params.to_string(),
            })
        }
        _ => {
            warn!(value = ?attribute.value(), "Skipping crypto line with fewer than three tokens");
            None
        }
    }
}

pub fn format_crypto(crypto: &Crypto) -> String {
    format!("{} {} {}", crypto.tag, crypto.crypto_suite, crypto.key_params)
}

/// Encryption block for a media block's crypto lines; `None` when no line
/// survives parsing
pub fn encryption<'a, I>(attributes: I) -> Option<Encryption>
where
    I: IntoIterator<Item = &'a Attribute>,
{
    let crypto: Vec<Crypto> = attributes.into_iter().filter_map(parse_crypto).collect();
    if crypto.is_empty() {
        return None;
    }
    Some(Encryption { required: true, crypto })
}
