use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::resource::validate_address;
use crate::primitives::{is_token, split_line, AddressType, Resource};

/// Connection data line (`c=`)
///
/// ```text
/// c=<nettype> <addrtype> <connection-address>[/ttl[/count]]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    net_type: String,
    address_type: AddressType,
    resource: Resource,
}

impl Connection {
    /// Create an `IN` connection, inferring the address type from the address
    pub fn new(address: &str) -> Result<Self> {
        let address_type = AddressType::of(address).unwrap_or(AddressType::Ip4);
        Connection::with_resource("IN", address_type, Resource::new(address)?)
    }

    pub fn with_resource(
        net_type: impl Into<String>,
        address_type: AddressType,
        resource: Resource,
    ) -> Result<Self> {
        let net_type = net_type.into();
        if !is_token(&net_type) {
            return Err(Error::invalid("network type", format!("'{}' is not a token", net_type)));
        }
        validate_address(resource.address(), address_type)?;
        Ok(Connection {
            net_type,
            address_type,
            resource,
        })
    }

    pub fn net_type(&self) -> &str {
        &self.net_type
    }

    pub fn address_type(&self) -> AddressType {
        self.address_type
    }

    pub fn address(&self) -> &str {
        self.resource.address()
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

impl Field for Connection {
    const TYPE: char = 'c';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let parts: Vec<&str> = value.split(' ').filter(|p| !p.is_empty()).collect();
        if parts.len() != 3 {
            return Err(Error::parse(line, "expected '<nettype> <addrtype> <address>'"));
        }

        let address_type = parts[1]
            .parse::<AddressType>()
            .map_err(|e| Error::parse(line, e.to_string()))?;
        let resource = parts[2]
            .parse::<Resource>()
            .map_err(|e| Error::parse(line, e.to_string()))?;

        Connection::with_resource(parts[0], address_type, resource)
            .map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c={} {} {}", self.net_type, self.address_type, self.resource)
    }
}
