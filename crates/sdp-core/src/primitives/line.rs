//! Splitting of raw SDP lines
//!
//! Every SDP line has the form `<type>=<value>` where the type is a single
//! character. Values are trimmed; CRLF and LF endings are both accepted.

use nom::{
    character::complete::{anychar, char, not_line_ending},
    IResult,
};

use crate::error::{Error, Result};

/// Parse an SDP line into its type character and value
///
/// ```
/// use sdp_core::primitives::parse_sdp_line;
///
/// let (_, (key, value)) = parse_sdp_line("a=rtpmap:96 VP8/90000").unwrap();
/// assert_eq!(key, 'a');
/// assert_eq!(value, "rtpmap:96 VP8/90000");
/// ```
pub fn parse_sdp_line(input: &str) -> IResult<&str, (char, &str)> {
    let (input, key) = anychar(input)?;
    let (input, _) = char('=')(input)?;
    let (input, value) = not_line_ending(input)?;

    let input = input.trim_start_matches(['\r', '\n']);

    Ok((input, (key, value.trim())))
}

/// Split a raw line and check that it carries the expected type character
pub fn split_line(line: &str, expected: char) -> Result<&str> {
    let (_, (key, value)) =
        parse_sdp_line(line).map_err(|_| Error::parse(line, "expected '<type>=<value>'"))?;
    if key != expected {
        return Err(Error::parse(
            line,
            format!("expected a '{}=' line, found '{}='", expected, key),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sdp_line() {
        let (rest, (key, value)) = parse_sdp_line("s=SDP Seminar\r\nt=0 0").unwrap();
        assert_eq!(key, 's');
        assert_eq!(value, "SDP Seminar");
        assert_eq!(rest, "t=0 0");

        let (_, (key, value)) = parse_sdp_line("a=recvonly  ").unwrap();
        assert_eq!(key, 'a');
        assert_eq!(value, "recvonly");

        assert!(parse_sdp_line("no equals").is_err());
        assert!(parse_sdp_line("").is_err());
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("v=0", 'v').unwrap(), "0");

        let err = split_line("o=- 1 1 IN IP4 host", 'v').unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        assert!(split_line("v", 'v').is_err());
    }
}
