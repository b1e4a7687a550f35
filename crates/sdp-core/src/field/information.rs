use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::Result;
use crate::primitives::split_line;

/// Free-text session or media information (`i=`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Information(String);

impl Information {
    pub fn new(text: impl Into<String>) -> Self {
        Information(text.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Field for Information {
    const TYPE: char = 'i';

    fn parse_line(line: &str) -> Result<Self> {
        split_line(line, Self::TYPE).map(Information::new)
    }
}

impl fmt::Display for Information {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i={}", self.0)
    }
}
