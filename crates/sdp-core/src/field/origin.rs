use std::fmt;

use nom::{
    bytes::complete::take_till1,
    character::complete::{digit1, space1},
    combinator::{all_consuming, map_res},
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::resource::validate_address;
use crate::primitives::{is_token, split_line, AddressType};

/// Origin line (`o=`)
///
/// ```text
/// o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>
/// ```
///
/// The session id is the correlation key with the Jingle `sid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    username: String,
    session_id: u64,
    session_version: u64,
    net_type: String,
    address_type: AddressType,
    address: String,
}

fn token(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == ' ')(input)
}

fn number(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse::<u64>())(input)
}

fn parse_origin_nom(input: &str) -> IResult<&str, (&str, u64, u64, &str, &str, &str)> {
    let (input, (username, _, session_id, _, session_version, _, net_type, _, addr_type, _, address)) =
        all_consuming(tuple((
            token, space1, number, space1, number, space1, token, space1, token, space1, token,
        )))(input)?;
    Ok((input, (username, session_id, session_version, net_type, addr_type, address)))
}

impl Origin {
    /// Create an origin on the `IN` network, inferring the address type
    /// from IP literals and defaulting host names to `IP4`
    pub fn new(
        username: impl Into<String>,
        session_id: u64,
        session_version: u64,
        address: impl Into<String>,
    ) -> Result<Self> {
        let address = address.into();
        let address_type = AddressType::of(&address).unwrap_or(AddressType::Ip4);
        Origin::with_types(username, session_id, session_version, "IN", address_type, address)
    }

    /// Create an origin with an explicit network and address type
    pub fn with_types(
        username: impl Into<String>,
        session_id: u64,
        session_version: u64,
        net_type: impl Into<String>,
        address_type: AddressType,
        address: impl Into<String>,
    ) -> Result<Self> {
        let username = username.into();
        let net_type = net_type.into();
        let address = address.into();

        if username.is_empty() || username.contains(char::is_whitespace) {
            return Err(Error::invalid("username", format!("'{}' must be a non-empty word", username)));
        }
        if !is_token(&net_type) {
            return Err(Error::invalid("network type", format!("'{}' is not a token", net_type)));
        }
        validate_address(&address, address_type)?;

        Ok(Origin {
            username,
            session_id,
            session_version,
            net_type,
            address_type,
            address,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn session_version(&self) -> u64 {
        self.session_version
    }

    pub fn net_type(&self) -> &str {
        &self.net_type
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_session_version(&mut self, version: u64) {
        self.session_version = version;
    }
}

impl Field for Origin {
    const TYPE: char = 'o';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let (_, (username, session_id, session_version, net_type, addr_type, address)) =
            parse_origin_nom(value).map_err(|_| {
                Error::parse(
                    line,
                    "expected '<username> <sess-id> <sess-version> <nettype> <addrtype> <address>'",
                )
            })?;

        let address_type = addr_type.parse::<AddressType>().map_err(|e| Error::parse(line, e.to_string()))?;
        Origin::with_types(username, session_id, session_version, net_type, address_type, address)
            .map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "o={} {} {} {} {} {}",
            self.username, self.session_id, self.session_version, self.net_type, self.address_type, self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origin() {
        let origin = Origin::parse_line("o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5").unwrap();
        assert_eq!(origin.username(), "jdoe");
        assert_eq!(origin.session_id(), 2890844526);
        assert_eq!(origin.session_version(), 2890842807);
        assert_eq!(origin.net_type(), "IN");
        assert_eq!(origin.address_type(), AddressType::Ip4);
        assert_eq!(origin.address(), "10.47.16.5");
        assert_eq!(origin.to_string(), "o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5");
    }

    #[test]
    fn test_parse_origin_ipv6_and_hostname() {
        let origin = Origin::parse_line("o=- 4611731400430051336 2 IN IP6 2001:db8::1").unwrap();
        assert_eq!(origin.session_id(), 4611731400430051336);
        assert_eq!(origin.address_type(), AddressType::Ip6);

        let origin = Origin::parse_line("o=- 1 1 IN IP4 host.example.com").unwrap();
        assert_eq!(origin.address(), "host.example.com");
    }

    #[test]
    fn test_parse_origin_invalid() {
        // Non-numeric session id
        assert!(Origin::parse_line("o=- abc 1 IN IP4 10.0.0.1").is_err());
        // Missing fields
        assert!(Origin::parse_line("o=- 1 1 IN IP4").is_err());
        // Extra fields
        assert!(Origin::parse_line("o=- 1 1 IN IP4 10.0.0.1 extra").is_err());
        // Address does not match declared type
        assert!(Origin::parse_line("o=- 1 1 IN IP6 10.0.0.1").is_err());
        // Unknown address type
        assert!(Origin::parse_line("o=- 1 1 IN IPX 10.0.0.1").is_err());
    }

    #[test]
    fn test_new_infers_type() {
        let origin = Origin::new("-", 1, 1, "::1").unwrap();
        assert_eq!(origin.address_type(), AddressType::Ip6);
        assert_eq!(origin.to_string(), "o=- 1 1 IN IP6 ::1");
        assert!(Origin::new("two words", 1, 1, "::1").is_err());
    }
}
