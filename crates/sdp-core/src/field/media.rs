use std::fmt;

use serde::{Deserialize, Serialize};

use super::Field;
use crate::error::{Error, Result};
use crate::primitives::{is_word, split_line};

/// Media line (`m=`)
///
/// ```text
/// m=<media> <port>[/<number of ports>] <proto> <fmt> ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    media_type: String,
    port: u16,
    port_count: Option<u16>,
    protocol: String,
    formats: Vec<String>,
}

fn is_protocol(s: &str) -> bool {
    !s.is_empty()
        && s.split('/').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        })
}

fn check_format(format: &str) -> Result<()> {
    if format.is_empty() || format.contains(char::is_whitespace) {
        return Err(Error::invalid("media format", format!("'{}' is not a format token", format)));
    }
    Ok(())
}

impl Media {
    /// Create a media line; the first format is mandatory
    pub fn new(
        media_type: impl Into<String>,
        port: u16,
        protocol: impl Into<String>,
        format: impl Into<String>,
    ) -> Result<Self> {
        let media_type = media_type.into();
        let protocol = protocol.into();
        let format = format.into();

        if !is_word(&media_type) {
            return Err(Error::invalid("media type", format!("'{}' is not a word token", media_type)));
        }
        if !is_protocol(&protocol) {
            return Err(Error::invalid("transport protocol", format!("'{}' is not a protocol token", protocol)));
        }
        check_format(&format)?;

        Ok(Media {
            media_type,
            port,
            port_count: None,
            protocol,
            formats: vec![format],
        })
    }

    /// Set the number of ports; a count of one is the same as none
    pub fn with_port_count(mut self, count: u16) -> Result<Self> {
        if count == 0 {
            return Err(Error::invalid("port count", "must be at least 1"));
        }
        self.port_count = if count > 1 { Some(count) } else { None };
        Ok(self)
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn port_count(&self) -> Option<u16> {
        self.port_count
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }

    pub fn add_format(&mut self, format: impl Into<String>) -> Result<()> {
        let format = format.into();
        check_format(&format)?;
        self.formats.push(format);
        Ok(())
    }

    /// Replace every format; the list is left untouched if any token is invalid
    pub fn set_formats<I, S>(&mut self, formats: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let staged: Vec<String> = formats.into_iter().map(Into::into).collect();
        for format in &staged {
            check_format(format)?;
        }
        self.formats = staged;
        Ok(())
    }

    pub fn remove_format(&mut self, format: &str) -> bool {
        let before = self.formats.len();
        self.formats.retain(|f| f != format);
        before != self.formats.len()
    }
}

impl Field for Media {
    const TYPE: char = 'm';

    fn parse_line(line: &str) -> Result<Self> {
        let value = split_line(line, Self::TYPE)?;
        let parts: Vec<&str> = value.split(' ').filter(|p| !p.is_empty()).collect();
        if parts.len() < 3 {
            return Err(Error::parse(line, "expected '<media> <port> <proto> <fmt> ...'"));
        }

        let (port, port_count) = match parts[1].split_once('/') {
            Some((port, count)) => (port, Some(count)),
            None => (parts[1], None),
        };
        let port = port
            .parse::<u16>()
            .map_err(|_| Error::parse(line, format!("invalid port '{}'", port)))?;

        let build = || -> Result<Media> {
            // Placeholder format, replaced below so that a format-less line still parses
            let mut media = Media::new(parts[0], port, parts[2], "0")?;
            if let Some(count) = port_count {
                let count = count
                    .parse::<u16>()
                    .map_err(|_| Error::invalid("port count", format!("'{}' is not a number", count)))?;
                media = media.with_port_count(count)?;
            }
            media.set_formats(parts[3..].iter().copied())?;
            Ok(media)
        };
        build().map_err(|e| Error::parse(line, e.to_string()))
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m={} {}", self.media_type, self.port)?;
        if let Some(count) = self.port_count {
            write!(f, "/{}", count)?;
        }
        write!(f, " {}", self.protocol)?;
        for format in &self.formats {
            write!(f, " {}", format)?;
        }
        Ok(())
    }
}
