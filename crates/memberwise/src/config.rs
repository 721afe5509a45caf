//! Adapter configuration
//!
//! Every adapter carries an [`AdapterConfig`]. It decides what happens when
//! a member is absent and how reports render member paths. The config is
//! plain data and can be loaded from JSON:
//!
//! ```rust,ignore
//! use nebula_memberwise::config::AdapterConfig;
//!
//! let config = AdapterConfig::from_json(r#"{"unknown_member": "ignore"}"#)?;
//! ```

use serde::{Deserialize, Serialize};

/// What a leaf does when its member is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMember {
    /// The leaf fails.
    #[default]
    Abort,
    /// The leaf is skipped.
    Ignore,
}

/// How the English formatter renders member paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStyle {
    /// `field1 of level1`
    #[default]
    Of,
    /// `level1.field1`
    Dotted,
}

/// Report rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Path rendering.
    pub member_style: MemberStyle,
    /// Wrap string operands in double quotes.
    pub quote_strings: bool,
}

/// Behaviour of an adapter for one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Policy for absent members.
    pub unknown_member: UnknownMember,
    /// Test member presence before reading it, so an absent member is
    /// handled by `unknown_member` instead of failing the lookup.
    pub check_member_exists: bool,
    /// Report rendering.
    pub report: ReportConfig,
}

impl AdapterConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips leaves whose member is absent.
    ///
    /// Sets the ignore policy and enables the presence pre-check.
    #[must_use = "builder methods must be chained or built"]
    pub fn ignore_unknown_members(mut self) -> Self {
        self.unknown_member = UnknownMember::Ignore;
        self.check_member_exists = true;
        self
    }

    /// Sets the unknown-member policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_unknown_member(mut self, policy: UnknownMember) -> Self {
        self.unknown_member = policy;
        self
    }

    /// Enables or disables the presence pre-check.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_check_member_exists(mut self, enabled: bool) -> Self {
        self.check_member_exists = enabled;
        self
    }

    /// Sets the report path style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_member_style(mut self, style: MemberStyle) -> Self {
        self.report.member_style = style;
        self
    }

    /// Enables quoting of string operands in reports.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_quoted_strings(mut self, quote: bool) -> Self {
        self.report.quote_strings = quote;
        self
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AdapterConfig::default();
        assert_eq!(config.unknown_member, UnknownMember::Abort);
        assert!(!config.check_member_exists);
        assert_eq!(config.report.member_style, MemberStyle::Of);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config =
            AdapterConfig::from_json(r#"{"unknown_member": "ignore", "report": {"member_style": "dotted"}}"#)
                .unwrap();
        assert_eq!(config.unknown_member, UnknownMember::Ignore);
        assert!(!config.check_member_exists);
        assert_eq!(config.report.member_style, MemberStyle::Dotted);
        assert!(!config.report.quote_strings);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_value(AdapterConfig::new().ignore_unknown_members()).unwrap();
        assert_eq!(json["unknown_member"], "ignore");
        assert_eq!(json["check_member_exists"], true);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(AdapterConfig::from_json(r#"{"unknown_member": "explode"}"#).is_err());
    }
}
