use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::Result;
use crate::primitives::split_line;

/// Session name line (`s=`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Self {
        SessionName(name.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Default for SessionName {
    fn default() -> Self {
        SessionName("-".to_string())
    }
}

impl Field for SessionName {
    const TYPE: char = 's';

    fn parse_line(line: &str) -> Result<Self> {
        split_line(line, Self::TYPE).map(SessionName::new)
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s={}", self.0)
    }
}
