use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::split_line;

static URI_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$").expect("uri pattern is valid"));

/// URI of additional session information (`u=`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Result<Self> {
        let uri = uri.into();
        if !URI_REGEX.is_match(&uri) {
            return Err(Error::invalid("uri", format!("'{}' is not an absolute URI", uri)));
        }
        Ok(Uri(uri))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }
}

impl Field for Uri {
    const TYPE: char = 'u';

    fn parse_line(line: &str) -> Result<Self> {
        Uri::new(split_line(line, Self::TYPE)?)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u={}", self.0)
    }
}
