//! Converter configuration
//!
//! ```rust
//! use jingle_core::{CandidateGrouping, ConverterConfig, JingleAction};
//!
//! let config = ConverterConfig::default()
//!     .with_candidate_grouping(CandidateGrouping::PerCandidate)
//!     .with_action(JingleAction::SessionAccept)
//!     .with_origin_address("192.0.2.10");
//!
//! assert!(config.validate().is_ok());
//! assert!(config.emit_raw_udp);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{JingleError, Result};
use crate::model::JingleAction;

/// How ICE candidates of one media block are spread over transport nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateGrouping {
    /// One ICE transport per content holding every candidate
    #[default]
    PerContent,
    /// One ICE transport per candidate
    PerCandidate,
}

/// How `a=ssrc` lines of one media block become stream entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SsrcGrouping {
    /// One stream per distinct ssrc id
    #[default]
    PerSsrc,
    /// Only the lines sharing the first ssrc id
    FirstSeen,
}

/// Options controlling both conversion directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub candidate_grouping: CandidateGrouping,
    pub ssrc_grouping: SsrcGrouping,
    /// Synthesize the raw-udp compatibility candidate
    pub emit_raw_udp: bool,
    /// Jingle action of a full SDP conversion
    pub action: JingleAction,
    /// `o=` username when building SDP
    pub origin_username: String,
    /// `o=` address when building SDP
    pub origin_address: String,
    /// `s=` value when building SDP
    pub session_name: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            candidate_grouping: CandidateGrouping::PerContent,
            ssrc_grouping: SsrcGrouping::PerSsrc,
            emit_raw_udp: true,
            action: JingleAction::SessionInitiate,
            origin_username: "-".to_string(),
            origin_address: "127.0.0.1".to_string(),
            session_name: "-".to_string(),
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate_grouping(mut self, grouping: CandidateGrouping) -> Self {
        self.candidate_grouping = grouping;
        self
    }

    pub fn with_ssrc_grouping(mut self, grouping: SsrcGrouping) -> Self {
        self.ssrc_grouping = grouping;
        self
    }

    pub fn with_raw_udp(mut self, emit: bool) -> Self {
        self.emit_raw_udp = emit;
        self
    }

    pub fn with_action(mut self, action: JingleAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_origin_username(mut self, username: impl Into<String>) -> Self {
        self.origin_username = username.into();
        self
    }

    pub fn with_origin_address(mut self, address: impl Into<String>) -> Self {
        self.origin_address = address.into();
        self
    }

    pub fn with_session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = name.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.session_name.trim().is_empty() {
            return Err(JingleError::invalid_config("session name must not be empty"));
        }
        if self.origin_username.is_empty() || self.origin_username.contains(char::is_whitespace) {
            return Err(JingleError::invalid_config(format!(
                "origin username '{}' must be a single word",
                self.origin_username
            )));
        }
        sdp_core::Origin::new(self.origin_username.as_str(), 0, 0, self.origin_address.as_str())
            .map_err(|e| JingleError::invalid_config(format!("origin address: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.candidate_grouping, CandidateGrouping::PerContent);
        assert_eq!(config.ssrc_grouping, SsrcGrouping::PerSsrc);
        assert!(config.emit_raw_udp);
        assert_eq!(config.action, JingleAction::SessionInitiate);
        assert_eq!(config.origin_address, "127.0.0.1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ConverterConfig::new().with_session_name("  ").validate().is_err());
        assert!(ConverterConfig::new().with_origin_address("not an address").validate().is_err());
        assert!(ConverterConfig::new().with_origin_username("a b").validate().is_err());
        assert!(ConverterConfig::new().with_origin_address("::1").validate().is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ConverterConfig::new()
            .with_ssrc_grouping(SsrcGrouping::FirstSeen)
            .with_raw_udp(false);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"first-seen\""));
        let back: ConverterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let partial: ConverterConfig = serde_json::from_str(r#"{"emit_raw_udp": false}"#).unwrap();
        assert!(!partial.emit_raw_udp);
        assert_eq!(partial.session_name, "-");
    }
}
