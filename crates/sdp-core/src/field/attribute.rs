use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::{is_token, split_line};

/// Generic attribute line (`a=<name>` or `a=<name>:<value>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    value: Option<String>,
}

impl Attribute {
    /// A property attribute such as `a=rtcp-mux`
    pub fn flag(name: impl Into<String>) -> Result<Self> {
        Attribute::build(name.into(), None)
    }

    /// A value attribute such as `a=rtpmap:0 PCMU/8000`
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        Attribute::build(name.into(), Some(value.into()))
    }

    fn build(name: String, value: Option<String>) -> Result<Self> {
        if !is_token(&name) {
            return Err(Error::invalid("attribute name", format!("'{}' is not a token", name)));
        }
        if value.as_deref().is_some_and(|v| v.contains(['\r', '\n'])) {
            return Err(Error::invalid("attribute value", "line breaks are not allowed"));
        }
        Ok(Attribute { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value split on single spaces
    pub fn tokens(&self) -> Vec<&str> {
        self.value
            .as_deref()
            .map(|v| v.split(' ').filter(|t| !t.is_empty()).collect())
            .unwrap_or_default()
    }
}

impl Field for Attribute {
    const TYPE: char = 'a';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let attribute = match value.split_once(':') {
            Some((name, value)) => Attribute::new(name, value),
            None => Attribute::flag(value),
        };
        attribute.map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "a={}:{}", self.name, value),
            None => write!(f, "a={}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        let attr = Attribute::parse_line("a=rtpmap:96 opus/48000/2").unwrap();
        assert_eq!(attr.name(), "rtpmap");
        assert_eq!(attr.value(), Some("96 opus/48000/2"));
        assert_eq!(attr.tokens(), vec!["96", "opus/48000/2"]);
        assert_eq!(attr.to_string(), "a=rtpmap:96 opus/48000/2");

        let flag = Attribute::parse_line("a=rtcp-mux").unwrap();
        assert_eq!(flag.value(), None);
        assert!(flag.tokens().is_empty());
        assert_eq!(flag.to_string(), "a=rtcp-mux");
    }

    #[test]
    fn test_value_keeps_colons() {
        let attr = Attribute::parse_line("a=fingerprint:sha-256 AB:CD:EF").unwrap();
        assert_eq!(attr.name(), "fingerprint");
        assert_eq!(attr.value(), Some("sha-256 AB:CD:EF"));
    }

    #[test]
    fn test_parse_attribute_invalid() {
        assert!(Attribute::parse_line("a=").is_err());
        assert!(Attribute::parse_line("a=bad name:1").is_err());
        assert!(Attribute::new("x", "a\r\nb").is_err());
    }
}
