//! Findings and engine faults produced by a walk

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::span::Location;

/// Rule id used for files the provider could not parse
pub const PARSE_ERROR_RULE: &str = "parse-error";

/// Severity level of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Mandatory convention; fails the run
    Must,
    /// Advisory convention; reported as a warning
    Should,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Must => "MUST",
            Severity::Should => "SHOULD",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violation of a rule at a source location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    rule_id: String,
    severity: Severity,
    location: Location,
    message: String,
}

impl Finding {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            location,
            message: message.into(),
        }
    }

    /// The finding recorded for a file no tree could be produced for
    pub fn unparseable() -> Self {
        Self::new(
            PARSE_ERROR_RULE,
            Severity::Must,
            Location::start(),
            "unparseable",
        )
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn column(&self) -> u32 {
        self.location.column
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A rule failed while evaluating a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleCrashed {
    pub rule_id: String,
    pub location: Location,
    pub cause: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Must.to_string(), "MUST");
        assert_eq!(Severity::Should.to_string(), "SHOULD");
    }

    #[test]
    fn test_severity_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Should).unwrap(), "\"should\"");
        let parsed: Severity = serde_json::from_str("\"must\"").unwrap();
        assert_eq!(parsed, Severity::Must);
    }

    #[test]
    fn test_unparseable_finding() {
        let finding = Finding::unparseable();
        assert_eq!(finding.rule_id(), PARSE_ERROR_RULE);
        assert_eq!(finding.severity(), Severity::Must);
        assert_eq!(finding.location(), Location::new(1, 1));
        assert_eq!(finding.message(), "unparseable");
    }
}
