//! Parsing and validation helpers shared by the SDP line types
//!
//! - [`line`]: splitting a raw `x=value` line
//! - [`typed_time`]: `d`/`h`/`m`/`s` time encodings used by `r=` and `z=`
//! - [`ntp`]: NTP-epoch conversions for `t=`
//! - [`resource`]: address, address type and `address[/ttl[/count]]`
//! - [`contact`]: e-mail and phone contact forms

pub mod contact;
pub mod line;
pub mod ntp;
pub mod resource;
pub mod typed_time;

pub use contact::{Contact, ContactKind, ContactStyle};
pub use line::{parse_sdp_line, split_line};
pub use resource::{AddressType, Resource};

/// Whether `c` may appear in an RFC 4566 `token`
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '{' | '|' | '}' | '~'
        )
}

/// Whether the whole string is a non-empty `token`
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// Whether the string is a non-empty run of letters, digits, `-` and `_`
pub fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rules() {
        assert!(is_token("AS"));
        assert!(is_token("X-YZ"));
        assert!(!is_token(""));
        assert!(!is_token("a b"));
        assert!(!is_token("a/b"));

        assert!(is_word("audio"));
        assert!(is_word("x-video_2"));
        assert!(!is_word("audio!"));
        assert!(!is_word(""));
    }
}
