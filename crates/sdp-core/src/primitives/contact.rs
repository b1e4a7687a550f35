//! Contact information for `e=` and `p=` lines
//!
//! Three forms are accepted:
//! - `address`
//! - `address (Personal Name)`
//! - `Personal Name <address>`

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*$")
        .expect("email pattern is valid")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9](?:[0-9 \-]*[0-9])?$").expect("phone pattern is valid"));

/// Which kind of address a contact carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Email,
    Phone,
}

impl ContactKind {
    fn field(&self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
        }
    }

    /// Check an address against the compiled pattern for this kind
    pub fn is_valid(&self, address: &str) -> bool {
        match self {
            ContactKind::Email => EMAIL_REGEX.is_match(address),
            ContactKind::Phone => PHONE_REGEX.is_match(address),
        }
    }
}

/// How the personal name was attached to the address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactStyle {
    Bare,
    Comment,
    Angle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    kind: ContactKind,
    address: String,
    name: Option<String>,
    style: ContactStyle,
}

impl Contact {
    /// A contact without a personal name
    pub fn new(kind: ContactKind, address: impl Into<String>) -> Result<Self> {
        let address = address.into();
        if !kind.is_valid(&address) {
            return Err(Error::invalid(
                kind.field(),
                format!("'{}' is not a valid {} address", address, kind.field()),
            ));
        }
        Ok(Contact {
            kind,
            address,
            name: None,
            style: ContactStyle::Bare,
        })
    }

    /// Attach a personal name, written in the `address (name)` form
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() || name.contains(['(', ')', '<', '>']) {
            return Err(Error::invalid(self.kind.field(), format!("'{}' is not a valid name", name)));
        }
        self.name = Some(name);
        self.style = ContactStyle::Comment;
        Ok(self)
    }

    /// Parse any of the three contact forms
    pub fn parse(kind: ContactKind, value: &str) -> Result<Self> {
        let value = value.trim();

        if let Some(rest) = value.strip_suffix('>') {
            let open = rest
                .rfind('<')
                .ok_or_else(|| Error::invalid(kind.field(), format!("unbalanced '<' in '{}'", value)))?;
            let name = rest[..open].trim();
            let address = rest[open + 1..].trim();
            let mut contact = Contact::new(kind, address)?;
            if !name.is_empty() {
                contact = contact.with_name(name)?;
                contact.style = ContactStyle::Angle;
            }
            return Ok(contact);
        }

        if let Some(rest) = value.strip_suffix(')') {
            let open = rest
                .rfind('(')
                .ok_or_else(|| Error::invalid(kind.field(), format!("unbalanced '(' in '{}'", value)))?;
            let address = rest[..open].trim();
            let name = rest[open + 1..].trim();
            return Contact::new(kind, address)?.with_name(name);
        }

        Contact::new(kind, value)
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn style(&self) -> ContactStyle {
        self.style
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, self.style) {
            (Some(name), ContactStyle::Angle) => write!(f, "{} <{}>", name, self.address),
            (Some(name), _) => write!(f, "{} ({})", self.address, name),
            (None, _) => f.write_str(&self.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_forms() {
        let bare = Contact::parse(ContactKind::Email, "j.doe@example.com").unwrap();
        assert_eq!(bare.address(), "j.doe@example.com");
        assert_eq!(bare.name(), None);
        assert_eq!(bare.to_string(), "j.doe@example.com");

        let comment = Contact::parse(ContactKind::Email, "j.doe@example.com (Jane Doe)").unwrap();
        assert_eq!(comment.name(), Some("Jane Doe"));
        assert_eq!(comment.to_string(), "j.doe@example.com (Jane Doe)");

        let angle = Contact::parse(ContactKind::Email, "Jane Doe <j.doe@example.com>").unwrap();
        assert_eq!(angle.address(), "j.doe@example.com");
        assert_eq!(angle.style(), ContactStyle::Angle);
        assert_eq!(angle.to_string(), "Jane Doe <j.doe@example.com>");
    }

    #[test]
    fn test_phone_forms() {
        let phone = Contact::parse(ContactKind::Phone, "+1 617 555-6011").unwrap();
        assert_eq!(phone.address(), "+1 617 555-6011");

        let named = Contact::parse(ContactKind::Phone, "+1 617 555-6011 (Jane Doe)").unwrap();
        assert_eq!(named.address(), "+1 617 555-6011");
        assert_eq!(named.name(), Some("Jane Doe"));
    }

    #[test]
    fn test_invalid_contacts() {
        assert!(Contact::parse(ContactKind::Email, "not-an-email").is_err());
        assert!(Contact::parse(ContactKind::Email, "Jane <j.doe@example.com").is_err());
        assert!(Contact::parse(ContactKind::Phone, "call me").is_err());
        assert!(Contact::parse(ContactKind::Phone, "+1 617 (").is_err());
        assert!(Contact::new(ContactKind::Email, "a@b.c").unwrap().with_name(" ").is_err());
    }
}
