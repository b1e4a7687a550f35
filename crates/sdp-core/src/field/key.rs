use std::fmt;
use std::str::FromStr;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::split_line;

/// Encryption key method of a `k=` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMethod {
    Clear,
    Base64,
    Uri,
    Prompt,
}

impl KeyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMethod::Clear => "clear",
            KeyMethod::Base64 => "base64",
            KeyMethod::Uri => "uri",
            KeyMethod::Prompt => "prompt",
        }
    }
}

impl fmt::Display for KeyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "clear" => Ok(KeyMethod::Clear),
            "base64" => Ok(KeyMethod::Base64),
            "uri" => Ok(KeyMethod::Uri),
            "prompt" => Ok(KeyMethod::Prompt),
            other => Err(Error::invalid("key method", format!("unknown key method '{}'", other))),
        }
    }
}

/// Encryption key line (`k=<method>[:<key>]`)
///
/// The key material is opaque; only its encoding is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key {
    method: KeyMethod,
    key: Option<String>,
}

impl Key {
    pub fn new(method: KeyMethod, key: Option<String>) -> Result<Self> {
        match (method, key.as_deref()) {
            (KeyMethod::Prompt, Some(_)) => {
                return Err(Error::invalid("key", "the prompt method carries no key"));
            }
            (KeyMethod::Prompt, None) => {}
            (_, None) | (_, Some("")) => {
                return Err(Error::invalid("key", format!("the {} method requires a key", method)));
            }
            (KeyMethod::Base64, Some(encoded)) => {
                base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| Error::invalid("key", format!("invalid base64 key: {}", e)))?;
            }
            (KeyMethod::Uri, Some(uri)) if !uri.contains(':') => {
                return Err(Error::invalid("key", format!("'{}' is not a URI", uri)));
            }
            _ => {}
        }
        Ok(Key { method, key })
    }

    pub fn prompt() -> Self {
        Key {
            method: KeyMethod::Prompt,
            key: None,
        }
    }

    pub fn method(&self) -> KeyMethod {
        self.method
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The decoded key bytes for the `base64` method
    pub fn decoded(&self) -> Option<Vec<u8>> {
        match (self.method, &self.key) {
            (KeyMethod::Base64, Some(encoded)) => base64::engine::general_purpose::STANDARD.decode(encoded).ok(),
            _ => None,
        }
    }
}

impl Field for Key {
    const TYPE: char = 'k';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let (method, key) = match value.split_once(':') {
            Some((method, key)) => (method, Some(key.to_string())),
            None => (value, None),
        };
        let method = method.parse::<KeyMethod>().map_err(|e| Error::parse(line, e.to_string()))?;
        Key::new(method, key).map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "k={}:{}", self.method, key),
            None => write!(f, "k={}", self.method),
        }
    }
}
