use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::Result;
use crate::primitives::{split_line, Contact, ContactKind};

/// E-mail contact line (`e=`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(Contact);

impl Email {
    pub fn new(address: &str) -> Result<Self> {
        Contact::parse(ContactKind::Email, address).map(Email)
    }

    pub fn contact(&self) -> &Contact {
        &self.0
    }
}

impl Field for Email {
    const TYPE: char = 'e';

    fn parse_line(line: &str) -> Result<Self> {
        Email::new(split_line(line, Self::TYPE)?)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e={}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email() {
        let email = Email::parse_line("e=j.doe@example.com (Jane Doe)").unwrap();
        assert_eq!(email.contact().address(), "j.doe@example.com");
        assert_eq!(email.to_string(), "e=j.doe@example.com (Jane Doe)");
        assert!(Email::parse_line("e=nobody").is_err());
    }
}
