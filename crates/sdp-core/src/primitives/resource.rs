//! Addresses and multicast resources
//!
//! Connection lines carry `address[/ttl[/count]]` for IPv4 and host names
//! and `address[/count]` for IPv6. The address type is
//! inferred from IP literals; host names take the type they are declared with.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Address type token of `o=` and `c=` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    Ip4,
    Ip6,
}

impl AddressType {
    /// Infer the address type of an IP literal
    pub fn of(address: &str) -> Option<AddressType> {
        if address.parse::<Ipv4Addr>().is_ok() {
            Some(AddressType::Ip4)
        } else if address.parse::<Ipv6Addr>().is_ok() {
            Some(AddressType::Ip6)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AddressType::Ip4 => "IP4",
            AddressType::Ip6 => "IP6",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "IP4" => Ok(AddressType::Ip4),
            "IP6" => Ok(AddressType::Ip6),
            other => Err(Error::invalid("address type", format!("unknown address type '{}'", other))),
        }
    }
}

/// Whether a string is a syntactically valid DNS host name
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > 255 {
        return false;
    }

    hostname.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

/// Check that an address is acceptable for the declared address type
///
/// IP literals must match the declared type. Host names are accepted for
/// either type.
pub fn validate_address(address: &str, declared: AddressType) -> Result<()> {
    match AddressType::of(address) {
        Some(actual) if actual == declared => Ok(()),
        Some(actual) => Err(Error::invalid(
            "address",
            format!("'{}' is an {} address, declared as {}", address, actual, declared),
        )),
        None if is_valid_hostname(address) => Ok(()),
        None => Err(Error::invalid("address", format!("'{}' is not a valid address", address))),
    }
}

/// Whether an IPv4 address is in the multicast range
pub fn is_multicast(address: &str) -> bool {
    match AddressType::of(address) {
        Some(AddressType::Ip4) => address.parse::<Ipv4Addr>().map(|a| a.is_multicast()).unwrap_or(false),
        Some(AddressType::Ip6) => address.parse::<Ipv6Addr>().map(|a| a.is_multicast()).unwrap_or(false),
        None => false,
    }
}

/// An address with optional multicast TTL and address count
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    address: String,
    ttl: Option<u8>,
    count: u32,
}

impl Resource {
    /// Create a resource for a plain address
    pub fn new(address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if address.is_empty() || address.contains(char::is_whitespace) || address.contains('/') {
            return Err(Error::invalid("address", format!("'{}' is not a valid address", address)));
        }
        Ok(Resource {
            address,
            ttl: None,
            count: 1,
        })
    }

    /// Set the multicast TTL, which must be between 1 and 255
    pub fn with_ttl(mut self, ttl: u16) -> Result<Self> {
        if self.is_ip6() {
            return Err(Error::invalid("ttl", format!("{} is an IPv6 address", self.address)));
        }
        if !(1..=255).contains(&ttl) {
            return Err(Error::invalid("ttl", format!("{} is outside 1..=255", ttl)));
        }
        self.ttl = Some(ttl as u8);
        Ok(self)
    }

    /// Set the number of contiguous addresses
    ///
    /// IPv6 addresses carry a bare count; every other address needs a TTL
    /// before a count above one.
    pub fn with_count(mut self, count: u32) -> Result<Self> {
        if count < 1 {
            return Err(Error::invalid("address count", "must be at least 1"));
        }
        if count > 1 && self.ttl.is_none() && !self.is_ip6() {
            return Err(Error::invalid("address count", "an address count requires a ttl"));
        }
        self.count = count;
        Ok(self)
    }

    fn is_ip6(&self) -> bool {
        AddressType::of(&self.address) == Some(AddressType::Ip6)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn ttl(&self) -> Option<u8> {
        self.ttl
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        if let Some(ttl) = self.ttl {
            write!(f, "/{}", ttl)?;
        }
        if self.count > 1 {
            write!(f, "/{}", self.count)?;
        }
        Ok(())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('/');
        let address = parts.next().unwrap_or_default();
        let mut resource = Resource::new(address)?;

        // IPv6 has no TTL, its only suffix is the address count
        if resource.is_ip6() {
            if let Some(count) = parts.next() {
                let count = count
                    .parse::<u32>()
                    .map_err(|_| Error::invalid("address count", format!("'{}' is not a number", count)))?;
                resource = resource.with_count(count)?;
            }
            if parts.next().is_some() {
                return Err(Error::invalid("address", format!("'{}' has too many '/' suffixes", s)));
            }
            return Ok(resource);
        }

        if let Some(ttl) = parts.next() {
            let ttl = ttl
                .parse::<u16>()
                .map_err(|_| Error::invalid("ttl", format!("'{}' is not a number", ttl)))?;
            resource = resource.with_ttl(ttl)?;
        }
        if let Some(count) = parts.next() {
            let count = count
                .parse::<u32>()
                .map_err(|_| Error::invalid("address count", format!("'{}' is not a number", count)))?;
            resource = resource.with_count(count)?;
        }
        if parts.next().is_some() {
            return Err(Error::invalid("address", format!("'{}' has too many '/' suffixes", s)));
        }
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_type_inference() {
        assert_eq!(AddressType::of("192.168.1.1"), Some(AddressType::Ip4));
        assert_eq!(AddressType::of("2001:db8::1"), Some(AddressType::Ip6));
        assert_eq!(AddressType::of("example.com"), None);
        assert_eq!("IP6".parse::<AddressType>().unwrap(), AddressType::Ip6);
        assert!("IP5".parse::<AddressType>().is_err());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("10.0.0.1", AddressType::Ip4).is_ok());
        assert!(validate_address("host.example.com", AddressType::Ip6).is_ok());
        assert!(validate_address("::1", AddressType::Ip4).is_err());
        assert!(validate_address("bad_host!", AddressType::Ip4).is_err());
    }

    #[test]
    fn test_resource_parse() {
        let plain: Resource = "192.168.0.1".parse().unwrap();
        assert_eq!(plain.address(), "192.168.0.1");
        assert_eq!(plain.ttl(), None);
        assert_eq!(plain.count(), 1);

        let multicast: Resource = "224.2.1.1/127/3".parse().unwrap();
        assert_eq!(multicast.ttl(), Some(127));
        assert_eq!(multicast.count(), 3);
        assert_eq!(multicast.to_string(), "224.2.1.1/127/3");
        assert!(is_multicast(multicast.address()));

        let single: Resource = "224.2.1.1/127/1".parse().unwrap();
        assert_eq!(single.to_string(), "224.2.1.1/127");
    }

    #[test]
    fn test_ip6_suffix_is_address_count() {
        let group: Resource = "ff15::101/3".parse().unwrap();
        assert_eq!(group.ttl(), None);
        assert_eq!(group.count(), 3);
        assert_eq!(group.to_string(), "ff15::101/3");

        let single: Resource = "ff15::101/1".parse().unwrap();
        assert_eq!(single.to_string(), "ff15::101");

        assert!("ff15::101/3/2".parse::<Resource>().is_err());
        assert!("ff15::101/0".parse::<Resource>().is_err());
        assert!(Resource::new("ff15::101").unwrap().with_ttl(16).is_err());
    }

    #[test]
    fn test_unicast_ip4_accepts_ttl() {
        let resource: Resource = "10.0.0.1/127".parse().unwrap();
        assert_eq!(resource.ttl(), Some(127));
        assert_eq!(resource.to_string(), "10.0.0.1/127");
    }

    #[test]
    fn test_resource_rejects_out_of_range() {
        assert!("224.2.1.1/0".parse::<Resource>().is_err());
        assert!("224.2.1.1/256".parse::<Resource>().is_err());
        assert!("224.2.1.1/127/0".parse::<Resource>().is_err());
        assert!("224.2.1.1/1/2/3".parse::<Resource>().is_err());
        assert!("".parse::<Resource>().is_err());
        assert!(Resource::new("10.0.0.1").unwrap().with_count(2).is_err());
    }
}
