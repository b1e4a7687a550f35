use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MediaDescription, TimeDescription};
use crate::attributes::AttributeStore;
use crate::error::{Error, Result};
use crate::field::{
    Attribute, Bandwidth, Connection, Email, Field, Information, Key, Origin, Phone, SessionName, TimeZone, Uri,
    Version,
};

/// A complete SDP document
///
/// Mandatory lines (`v=`, `o=`, `s=` and at least one `t=`) are always
/// present. Every media block has a connection, either its own or the
/// session-level one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    version: Version,
    origin: Origin,
    session_name: SessionName,
    information: Option<Information>,
    uri: Option<Uri>,
    emails: Vec<Email>,
    phones: Vec<Phone>,
    connection: Option<Connection>,
    bandwidths: Vec<Bandwidth>,
    time_descriptions: Vec<TimeDescription>,
    time_zone: Option<TimeZone>,
    key: Option<Key>,
    attributes: AttributeStore,
    media: Vec<MediaDescription>,
}

impl SessionDescription {
    /// A session with version 0 and a single permanent `t=0 0`
    pub fn new(origin: Origin, session_name: SessionName) -> Self {
        SessionDescription {
            version: Version::default(),
            origin,
            session_name,
            information: None,
            uri: None,
            emails: Vec::new(),
            phones: Vec::new(),
            connection: None,
            bandwidths: Vec::new(),
            time_descriptions: vec![TimeDescription::default()],
            time_zone: None,
            key: None,
            attributes: AttributeStore::new(),
            media: Vec::new(),
        }
    }

    /// Parse a complete document
    pub fn parse(text: &str) -> Result<Self> {
        super::parse_sdp(text)
    }

    /// Parse a complete document from raw bytes, which must be UTF-8
    pub fn parse_bytes(data: &Bytes) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::parse("<binary>", format!("SDP is not valid UTF-8: {}", e)))?;
        super::parse_sdp(text)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn session_name(&self) -> &SessionName {
        &self.session_name
    }

    pub fn set_session_name(&mut self, name: SessionName) {
        self.session_name = name;
    }

    pub fn information(&self) -> Option<&Information> {
        self.information.as_ref()
    }

    pub fn set_information(&mut self, information: Option<Information>) {
        self.information = information;
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }

    pub fn set_uri(&mut self, uri: Option<Uri>) {
        self.uri = uri;
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn add_email(&mut self, email: Email) {
        self.emails.push(email);
    }

    /// Replace the e-mail contacts; unchanged if any address is invalid
    pub fn set_emails<I, S>(&mut self, addresses: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let staged = addresses
            .into_iter()
            .map(|address| Email::new(address.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.emails = staged;
        Ok(())
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Replace the phone contacts; unchanged if any number is invalid
    pub fn set_phones<I, S>(&mut self, numbers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let staged = numbers
            .into_iter()
            .map(|number| Phone::new(number.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.phones = staged;
        Ok(())
    }

    /// The session-level connection
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    pub fn set_connection(&mut self, connection: Connection) {
        self.connection = Some(connection);
    }

    /// Drop the session-level connection
    ///
    /// Fails when a media block has no connection of its own.
    pub fn clear_connection(&mut self) -> Result<Option<Connection>> {
        if let Some(block) = self.media.iter().find(|block| block.connection().is_none()) {
            return Err(Error::MissingConnection {
                media: block.media().media_type().to_string(),
            });
        }
        Ok(self.connection.take())
    }

    /// The connection that applies to a media block
    pub fn effective_connection<'a>(&'a self, block: &'a MediaDescription) -> Option<&'a Connection> {
        block.connection().or(self.connection.as_ref())
    }

    pub fn bandwidths(&self) -> &[Bandwidth] {
        &self.bandwidths
    }

    pub fn add_bandwidth(&mut self, bandwidth: Bandwidth) {
        self.bandwidths.push(bandwidth);
    }

    pub fn set_bandwidths(&mut self, bandwidths: Vec<Bandwidth>) {
        self.bandwidths = bandwidths;
    }

    /// Replace the bandwidths from raw `b=` lines; unchanged on failure
    pub fn set_bandwidth_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let staged = lines
            .into_iter()
            .map(|line| Bandwidth::parse_line(line.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.bandwidths = staged;
        Ok(())
    }

    pub fn time_descriptions(&self) -> &[TimeDescription] {
        &self.time_descriptions
    }

    pub fn add_time_description(&mut self, time: TimeDescription) {
        self.time_descriptions.push(time);
    }

    /// Replace the time descriptions; at least one is required
    pub fn set_time_descriptions(&mut self, times: Vec<TimeDescription>) -> Result<()> {
        if times.is_empty() {
            return Err(Error::MissingField("t"));
        }
        self.time_descriptions = times;
        Ok(())
    }

    pub fn time_zone(&self) -> Option<&TimeZone> {
        self.time_zone.as_ref()
    }

    pub fn set_time_zone(&mut self, time_zone: Option<TimeZone>) {
        self.time_zone = time_zone;
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn set_key(&mut self, key: Option<Key>) {
        self.key = key;
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.add(attribute);
    }

    pub fn set_attributes(&mut self, attributes: Vec<Attribute>) {
        self.attributes.replace_all(attributes);
    }

    /// Replace the attributes from raw `a=` lines; unchanged on failure
    pub fn set_attribute_lines<I, S>(&mut self, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.attributes.replace_all_lines(lines)
    }

    pub fn media(&self) -> &[MediaDescription] {
        &self.media
    }

    pub fn media_mut(&mut self) -> impl Iterator<Item = &mut MediaDescription> {
        self.media.iter_mut()
    }

    fn check_connection(&self, block: &MediaDescription) -> Result<()> {
        if block.connection().is_none() && self.connection.is_none() {
            return Err(Error::MissingConnection {
                media: block.media().media_type().to_string(),
            });
        }
        Ok(())
    }

    /// Append a media block
    ///
    /// Fails with [`Error::MissingConnection`] when neither the block nor the
    /// session carries a connection.
    pub fn add_media(&mut self, block: MediaDescription) -> Result<()> {
        self.check_connection(&block)?;
        if block.connection().is_none() {
            debug!(media = block.media().media_type(), "media block inherits the session connection");
        }
        self.media.push(block);
        Ok(())
    }

    /// Replace every media block; unchanged if any block lacks a connection
    pub fn set_media(&mut self, blocks: Vec<MediaDescription>) -> Result<()> {
        for block in &blocks {
            self.check_connection(block)?;
        }
        self.media = blocks;
        Ok(())
    }

    pub fn remove_media(&mut self, index: usize) -> Option<MediaDescription> {
        if index < self.media.len() {
            Some(self.media.remove(index))
        } else {
            None
        }
    }

    /// `a=group:BUNDLE` derived from the media types in block order
    pub fn bundle_group(&self) -> Option<Attribute> {
        if self.media.is_empty() {
            return None;
        }
        let mut value = String::from("BUNDLE");
        for block in &self.media {
            value.push(' ');
            value.push_str(block.media().media_type());
        }
        Attribute::new("group", value).ok()
    }
}

impl FromStr for SessionDescription {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SessionDescription::parse(s)
    }
}

impl fmt::Display for SessionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version.to_line())?;
        f.write_str(&self.origin.to_line())?;
        f.write_str(&self.session_name.to_line())?;
        if let Some(information) = &self.information {
            f.write_str(&information.to_line())?;
        }
        if let Some(uri) = &self.uri {
            f.write_str(&uri.to_line())?;
        }
        for email in &self.emails {
            f.write_str(&email.to_line())?;
        }
        for phone in &self.phones {
            f.write_str(&phone.to_line())?;
        }
        if let Some(connection) = &self.connection {
            f.write_str(&connection.to_line())?;
        }
        for bandwidth in &self.bandwidths {
            f.write_str(&bandwidth.to_line())?;
        }
        for time in &self.time_descriptions {
            write!(f, "{}", time)?;
        }
        if let Some(time_zone) = &self.time_zone {
            f.write_str(&time_zone.to_line())?;
        }
        if let Some(key) = &self.key {
            f.write_str(&key.to_line())?;
        }
        for attribute in self.attributes.iter() {
            f.write_str(&attribute.to_line())?;
        }
        for block in &self.media {
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
