use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::split_line;

/// Protocol version line (`v=`); RFC 4566 only defines version 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version(u32);

impl Version {
    pub fn new(version: u32) -> Self {
        Version(version)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Field for Version {
    const TYPE: char = 'v';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::parse(line, "version must be a number"));
        }
        value
            .parse::<u32>()
            .map(Version)
            .map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v={}", self.0)
    }
}
