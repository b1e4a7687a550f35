use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeStore;
use crate::error::Result;
use crate::field::{Attribute, Bandwidth, Connection, Field, Information, Key, Media};

/// One media block: the `m=` line and everything up to the next one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescription {
    media: Media,
    information: Option<Information>,
    connection: Option<Connection>,
    bandwidths: Vec<Bandwidth>,
    key: Option<Key>,
    attributes: AttributeStore,
}

impl MediaDescription {
    pub fn new(media: Media) -> Self {
        MediaDescription {
            media,
            information: None,
            connection: None,
            bandwidths: Vec::new(),
            key: None,
            attributes: AttributeStore::new(),
        }
    }

    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.add(attribute);
        self
    }

    pub fn media(&self) -> &Media {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut Media {
        &mut self.media
    }

    pub fn information(&self) -> Option<&Information> {
        self.information.as_ref()
    }

    pub fn set_information(&mut self, information: Option<Information>) {
        self.information = information;
    }

    /// The block's own connection, without falling back to the session
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    pub fn set_connection(&mut self, connection: Connection) {
        self.connection = Some(connection);
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
}

impl fmt::Display for MediaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.media.to_line())?;
        if let Some(information) = &self.information {
            f.write_str(&information.to_line())?;
        }
        if let Some(connection) = &self.connection {
            f.write_str(&connection.to_line())?;
        }
        for bandwidth in &self.bandwidths {
            f.write_str(&bandwidth.to_line())?;
        }
        if let Some(key) = &self.key {
            f.write_str(&key.to_line())?;
        }
        for attribute in self.attributes.iter() {
            f.write_str(&attribute.to_line())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_order() {
        let mut block = MediaDescription::new(Media::new("audio", 49170, "RTP/AVP", "0").unwrap())
            .with_attribute(Attribute::new("rtpmap", "0 PCMU/8000").unwrap());
        block.set_key(Some(Key::prompt()));
        block.add_bandwidth(Bandwidth::new("AS", 64).unwrap());
        block.set_connection(Connection::new("10.0.0.1").unwrap());
        block.set_information(Some(Information::new("voice")));

        assert_eq!(
            block.to_string(),
            "m=audio 49170 RTP/AVP 0\r\n\
             i=voice\r\n\
             c=IN IP4 10.0.0.1\r\n\
             b=AS:64\r\n\
             k=prompt\r\n\
             a=rtpmap:0 PCMU/8000\r\n"
        );
    }

    #[test]
    fn test_bulk_setters_roll_back() {
        let mut block = MediaDescription::new(Media::new("video", 9, "RTP/AVPF", "96").unwrap());
        block.add_bandwidth(Bandwidth::new("AS", 512).unwrap());
        block.add_attribute(Attribute::flag("rtcp-mux").unwrap());

        assert!(block.set_bandwidth_lines(["b=TIAS:1000", "b=broken"]).is_err());
        assert_eq!(block.bandwidths().len(), 1);
        assert_eq!(block.bandwidths()[0].bw_type(), "AS");

        assert!(block.set_attribute_lines(["a=mid:video", "m=video 9 RTP/AVP 0"]).is_err());
        assert!(block.attributes().contains("rtcp-mux"));
        assert!(!block.attributes().contains("mid"));
    }
}
