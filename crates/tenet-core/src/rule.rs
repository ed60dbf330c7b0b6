//! The rule abstraction
//!
//! A rule is a stateless predicate over one node. It reports violations and
//! tells the walker whether to descend into the node's children; the walker
//! turns violations into [`Finding`](crate::Finding)s stamped with the rule's
//! id and effective severity.

use crate::context::Context;
use crate::error::RuleError;
use crate::finding::Severity;
use crate::kind::NodeKind;
use crate::span::Location;
use crate::tree::NodeRef;

/// A style convention that can be checked against syntax tree nodes
pub trait Rule: Send + Sync {
    /// Unique identifier (e.g. `"no-var-declaration"`)
    fn id(&self) -> &'static str;

    /// A short description of the convention
    fn description(&self) -> &'static str;

    /// Severity used unless configuration overrides it
    fn severity(&self) -> Severity;

    /// Node kinds this rule is invoked on
    fn applies_to(&self) -> &'static [NodeKind];

    /// Whether the rule runs without being enabled explicitly
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Check one node. Must be pure: same node and context, same outcome.
    fn evaluate(&self, node: NodeRef<'_>, ctx: &Context<'_>) -> Result<Outcome, RuleError>;
}

/// A violation reported by a rule, before it is attributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub location: Location,
    pub message: String,
}

impl Violation {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    /// Violation positioned at the start of `node`
    pub fn at(node: NodeRef<'_>, message: impl Into<String>) -> Self {
        Self::new(node.location(), message)
    }
}

/// Whether the walker descends into the evaluated node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    SkipChildren,
}

/// Result of evaluating one rule on one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub violations: Vec<Violation>,
    pub flow: Flow,
}

impl Outcome {
    /// No violations, keep walking
    pub fn pass() -> Self {
        Self::default()
    }

    /// A single violation, keep walking
    pub fn violation(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
            flow: Flow::Continue,
        }
    }

    /// No violations, do not enter the node's children
    pub fn skip_children() -> Self {
        Self {
            violations: Vec::new(),
            flow: Flow::SkipChildren,
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl From<Option<Violation>> for Outcome {
    fn from(violation: Option<Violation>) -> Self {
        match violation {
            Some(v) => Outcome::violation(v),
            None => Outcome::pass(),
        }
    }
}
