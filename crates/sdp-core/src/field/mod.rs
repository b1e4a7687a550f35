//! SDP line types
//!
//! One type per line kind. Every type parses from its complete raw line
//! (prefix included) and serializes back to it through `Display`, without
//! the trailing CRLF which the document adds.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::primitives::parse_sdp_line;

mod attribute;
mod bandwidth;
mod connection;
mod email;
mod information;
mod key;
mod media;
mod origin;
mod phone;
mod repeat_time;
mod session_name;
mod time;
mod time_zone;
mod uri;
mod version;

pub use attribute::Attribute;
pub use bandwidth::Bandwidth;
pub use connection::Connection;
pub use email::Email;
pub use information::Information;
pub use key::{Key, KeyMethod};
pub use media::Media;
pub use origin::Origin;
pub use phone::Phone;
pub use repeat_time::RepeatTime;
pub use session_name::SessionName;
pub use time::Time;
pub use time_zone::{TimeZone, TimeZoneAdjustment};
pub use uri::Uri;
pub use version::Version;

/// Capability shared by every SDP line type
pub trait Field: fmt::Display + Clone + Sized {
    /// The line's type character
    const TYPE: char;

    /// Parse a complete raw line, prefix included
    fn parse_line(line: &str) -> Result<Self>;

    fn type_char(&self) -> char {
        Self::TYPE
    }

    /// The serialized line terminated by CRLF
    fn to_line(&self) -> String {
        format!("{}\r\n", self)
    }
}

/// Any single SDP line, dispatched by its type character
#[derive(Debug, Clone, PartialEq)]
pub enum SdpLine {
    Version(Version),
    Origin(Origin),
    SessionName(SessionName),
    Information(Information),
    Uri(Uri),
    Email(Email),
    Phone(Phone),
    Connection(Connection),
    Bandwidth(Bandwidth),
    Time(Time),
    RepeatTime(RepeatTime),
    TimeZone(TimeZone),
    Key(Key),
    Attribute(Attribute),
    Media(Media),
}

impl SdpLine {
    pub fn type_char(&self) -> char {
        match self {
            SdpLine::Version(_) => Version::TYPE,
            SdpLine::Origin(_) => Origin::TYPE,
            SdpLine::SessionName(_) => SessionName::TYPE,
            SdpLine::Information(_) => Information::TYPE,
            SdpLine::Uri(_) => Uri::TYPE,
            SdpLine::Email(_) => Email::TYPE,
            SdpLine::Phone(_) => Phone::TYPE,
            SdpLine::Connection(_) => Connection::TYPE,
            SdpLine::Bandwidth(_) => Bandwidth::TYPE,
            SdpLine::Time(_) => Time::TYPE,
            SdpLine::RepeatTime(_) => RepeatTime::TYPE,
            SdpLine::TimeZone(_) => TimeZone::TYPE,
            SdpLine::Key(_) => Key::TYPE,
            SdpLine::Attribute(_) => Attribute::TYPE,
            SdpLine::Media(_) => Media::TYPE,
        }
    }
}

impl FromStr for SdpLine {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let (_, (key, _)) =
            parse_sdp_line(line).map_err(|_| Error::parse(line, "expected '<type>=<value>'"))?;

        Ok(match key {
            'v' => SdpLine::Version(Version::parse_line(line)?),
            'o' => SdpLine::Origin(Origin::parse_line(line)?),
            's' => SdpLine::SessionName(SessionName::parse_line(line)?),
            'i' => SdpLine::Information(Information::parse_line(line)?),
            'u' => SdpLine::Uri(Uri::parse_line(line)?),
            'e' => SdpLine::Email(Email::parse_line(line)?),
            'p' => SdpLine::Phone(Phone::parse_line(line)?),
            'c' => SdpLine::Connection(Connection::parse_line(line)?),
            'b' => SdpLine::Bandwidth(Bandwidth::parse_line(line)?),
            't' => SdpLine::Time(Time::parse_line(line)?),
            'r' => SdpLine::RepeatTime(RepeatTime::parse_line(line)?),
            'z' => SdpLine::TimeZone(TimeZone::parse_line(line)?),
            'k' => SdpLine::Key(Key::parse_line(line)?),
            'a' => SdpLine::Attribute(Attribute::parse_line(line)?),
            'm' => SdpLine::Media(Media::parse_line(line)?),
            other => return Err(Error::parse(line, format!("unknown line type '{}'", other))),
        })
    }
}

impl fmt::Display for SdpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpLine::Version(v) => v.fmt(f),
            SdpLine::Origin(v) => v.fmt(f),
            SdpLine::SessionName(v) => v.fmt(f),
            SdpLine::Information(v) => v.fmt(f),
            SdpLine::Uri(v) => v.fmt(f),
            SdpLine::Email(v) => v.fmt(f),
            SdpLine::Phone(v) => v.fmt(f),
            SdpLine::Connection(v) => v.fmt(f),
            SdpLine::Bandwidth(v) => v.fmt(f),
            SdpLine::Time(v) => v.fmt(f),
            SdpLine::RepeatTime(v) => v.fmt(f),
            SdpLine::TimeZone(v) => v.fmt(f),
            SdpLine::Key(v) => v.fmt(f),
            SdpLine::Attribute(v) => v.fmt(f),
            SdpLine::Media(v) => v.fmt(f),
        }
    }
}

/// Implements `FromStr` for a line type in terms of [`Field::parse_line`]
macro_rules! impl_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as Field>::parse_line(s)
                }
            }
        )*
    };
}

impl_from_str!(
    Attribute, Bandwidth, Connection, Email, Information, Key, Media, Origin, Phone, RepeatTime,
    SessionName, Time, TimeZone, Uri, Version,
);
