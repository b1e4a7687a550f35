use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::Result;
use crate::primitives::{split_line, Contact, ContactKind};

/// Phone contact line (`p=`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(Contact);

impl Phone {
    pub fn new(number: &str) -> Result<Self> {
        Contact::parse(ContactKind::Phone, number).map(Phone)
    }

    pub fn contact(&self) -> &Contact {
        &self.0
    }
}

impl Field for Phone {
    const TYPE: char = 'p';

    fn parse_line(line: &str) -> Result<Self> {
        Phone::new(split_line(line, Self::TYPE)?)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p={}", self.0)
    }
}
