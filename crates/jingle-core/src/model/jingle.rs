use serde::{Deserialize, Serialize};

use super::{Content, Creator};

/// IQ stanza type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IqType {
    #[default]
    Set,
    Get,
    Result,
    Error,
}

keyword_enum!(IqType, "iq type", {
    Set => "set",
    Get => "get",
    Result => "result",
    Error => "error",
});

/// Jingle `action` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JingleAction {
    ContentAccept,
    ContentAdd,
    ContentModify,
    ContentReject,
    ContentRemove,
    DescriptionInfo,
    SecurityInfo,
    SessionAccept,
    SessionInfo,
    #[default]
    SessionInitiate,
    SessionTerminate,
    TransportAccept,
    TransportInfo,
    TransportReject,
    TransportReplace,
}

keyword_enum!(JingleAction, "jingle action", {
    ContentAccept => "content-accept",
    ContentAdd => "content-add",
    ContentModify => "content-modify",
    ContentReject => "content-reject",
    ContentRemove => "content-remove",
    DescriptionInfo => "description-info",
    SecurityInfo => "security-info",
    SessionAccept => "session-accept",
    SessionInfo => "session-info",
    SessionInitiate => "session-initiate",
    SessionTerminate => "session-terminate",
    TransportAccept => "transport-accept",
    TransportInfo => "transport-info",
    TransportReject => "transport-reject",
    TransportReplace => "transport-replace",
});

/// RTP session-info payloads (`urn:xmpp:jingle:apps:rtp:info:1`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionInfo {
    Active,
    Hold,
    Unhold,
    Ringing,
    /// `name` absent means every content of the session
    Mute { creator: Creator, name: Option<String> },
    Unmute { creator: Creator, name: Option<String> },
}

impl SessionInfo {
    pub fn element_name(&self) -> &'static str {
        match self {
            SessionInfo::Active => "active",
            SessionInfo::Hold => "hold",
            SessionInfo::Unhold => "unhold",
            SessionInfo::Ringing => "ringing",
            SessionInfo::Mute { .. } => "mute",
            SessionInfo::Unmute { .. } => "unmute",
        }
    }

    pub fn mute(name: Option<String>) -> Self {
        SessionInfo::Mute {
            creator: Creator::Initiator,
            name,
        }
    }

    pub fn unmute(name: Option<String>) -> Self {
        SessionInfo::Unmute {
            creator: Creator::Initiator,
            name,
        }
    }

    pub fn is_mute(&self) -> bool {
        matches!(self, SessionInfo::Mute { .. })
    }
}

/// Condition element of a `<reason/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCondition {
    AlternativeSession(String),
    Busy,
    Cancel,
    ConnectivityError,
    Decline,
    Expired,
    FailedApplication,
    FailedTransport,
    GeneralError,
    Gone,
    IncompatibleParameters,
    MediaError,
    /// `<redirect>` carrying the URI the session moved to
    Redirect(String),
    SecurityError,
    Success,
    Timeout,
    UnsupportedApplications,
    UnsupportedTransports,
}

const EMPTY_CONDITIONS: &[(&str, ReasonCondition)] = &[
    ("busy", ReasonCondition::Busy),
    ("cancel", ReasonCondition::Cancel),
    ("connectivity-error", ReasonCondition::ConnectivityError),
    ("decline", ReasonCondition::Decline),
    ("expired", ReasonCondition::Expired),
    ("failed-application", ReasonCondition::FailedApplication),
    ("failed-transport", ReasonCondition::FailedTransport),
    ("general-error", ReasonCondition::GeneralError),
    ("gone", ReasonCondition::Gone),
    ("incompatible-parameters", ReasonCondition::IncompatibleParameters),
    ("media-error", ReasonCondition::MediaError),
    ("security-error", ReasonCondition::SecurityError),
    ("success", ReasonCondition::Success),
    ("timeout", ReasonCondition::Timeout),
    ("unsupported-applications", ReasonCondition::UnsupportedApplications),
    ("unsupported-transports", ReasonCondition::UnsupportedTransports),
];

impl ReasonCondition {
    pub fn element_name(&self) -> &'static str {
        match self {
            ReasonCondition::AlternativeSession(_) => "alternative-session",
            ReasonCondition::Redirect(_) => "redirect",
            other => EMPTY_CONDITIONS
                .iter()
                .find(|(_, condition)| condition == other)
                .map(|(name, _)| *name)
                .unwrap_or("general-error"),
        }
    }

    /// Build a condition from its element name and text content
    pub fn from_element(name: &str, text: Option<String>) -> Option<Self> {
        match name {
            "alternative-session" => Some(ReasonCondition::AlternativeSession(text.unwrap_or_default())),
            "redirect" => Some(ReasonCondition::Redirect(text.unwrap_or_default())),
            other => EMPTY_CONDITIONS
                .iter()
                .find(|(n, _)| *n == other)
                .map(|(_, condition)| condition.clone()),
        }
    }

    /// Text content of the condition element
    pub fn text(&self) -> Option<&str> {
        match self {
            ReasonCondition::AlternativeSession(sid) => Some(sid),
            ReasonCondition::Redirect(uri) => Some(uri),
            _ => None,
        }
    }
}

/// `<reason/>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub condition: ReasonCondition,
    pub text: Option<String>,
}

impl Reason {
    pub fn new(condition: ReasonCondition) -> Self {
        Reason { condition, text: None }
    }

    pub fn redirect(uri: impl Into<String>) -> Self {
        Reason::new(ReasonCondition::Redirect(uri.into()))
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        match &self.condition {
            ReasonCondition::Redirect(uri) => Some(uri),
            _ => None,
        }
    }
}

/// A Jingle IQ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jingle {
    pub iq_type: IqType,
    pub action: JingleAction,
    pub sid: String,
    pub initiator: Option<String>,
    pub responder: Option<String>,
    pub contents: Vec<Content>,
    pub session_info: Option<SessionInfo>,
    pub reason: Option<Reason>,
}

impl Jingle {
    /// A `set` IQ with the given action and session id
    pub fn new(action: JingleAction, sid: impl Into<String>) -> Self {
        Jingle {
            iq_type: IqType::Set,
            action,
            sid: sid.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    pub fn content(&self, name: &str) -> Option<&Content> {
        self.contents.iter().find(|c| c.name == name)
    }

    /// First content carrying an ICE-UDP transport
    pub fn ice_content(&self) -> Option<&Content> {
        self.contents.iter().find(|c| c.ice_udp().next().is_some())
    }

    /// `session-info` mute or unmute for one content, or all when `name` is `None`
    pub fn mute(sid: impl Into<String>, mute: bool, name: Option<String>) -> Self {
        let mut jingle = Jingle::new(JingleAction::SessionInfo, sid);
        jingle.session_info = Some(if mute {
            SessionInfo::mute(name)
        } else {
            SessionInfo::unmute(name)
        });
        jingle
    }

    /// `session-terminate` redirecting the peer to another URI
    pub fn redirect(sid: impl Into<String>, uri: impl Into<String>) -> Self {
        let mut jingle = Jingle::new(JingleAction::SessionTerminate, sid);
        jingle.reason = Some(Reason::redirect(uri));
        jingle
    }
}
