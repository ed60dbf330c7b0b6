//! Error taxonomy of the engine
//!
//! Configuration and registration errors are fatal and surface before any
//! file is scanned. Parse errors and rule errors are per file and end up in
//! the report instead of aborting the run.

use std::path::PathBuf;
use thiserror::Error;

/// A rule id was registered twice
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("rule '{0}' is already registered")]
pub struct DuplicateRuleError(pub String);

/// Invalid rule configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown rule '{0}' in configuration")]
    UnknownRule(String),

    #[error("no rules enabled")]
    NoRulesEnabled,
}

/// A provider could not produce a tree for a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {reason}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub reason: String,
}

impl ParseError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Failure reported by a rule's `evaluate`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RuleError(pub String);

impl RuleError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

/// Misuse of [`TreeBuilder`](crate::TreeBuilder)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("{0} node(s) left open")]
    Unclosed(usize),

    #[error("close() called with no open node")]
    NothingOpen,

    #[error("a second root node was opened")]
    MultipleRoots,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            DuplicateRuleError("no-var-declaration".into()).to_string(),
            "rule 'no-var-declaration' is already registered"
        );
        assert_eq!(
            ConfigError::UnknownRule("no-such-rule".into()).to_string(),
            "unknown rule 'no-such-rule' in configuration"
        );
        assert_eq!(
            ParseError::new("src/app.js", "unexpected token").to_string(),
            "src/app.js: unexpected token"
        );
    }
}
