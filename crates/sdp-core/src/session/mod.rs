//! SDP documents: the session description, its time descriptions and its
//! media blocks, plus the document-level parser.

mod media_description;
mod parser;
mod session_description;
mod time_description;

pub use media_description::MediaDescription;
pub use parser::parse_sdp;
pub use session_description::SessionDescription;
pub use time_description::TimeDescription;
