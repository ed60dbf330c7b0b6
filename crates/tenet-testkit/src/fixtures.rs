//! Misbehaving rules for exercising the walker's fault isolation

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

/// Panics on every node of the given kinds
pub struct PanickingRule {
    pub id: &'static str,
    pub kinds: &'static [NodeKind],
}

impl Rule for PanickingRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        "panics on every node it sees"
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        self.kinds
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        panic!("fixture panic at {}", node.location())
    }
}

/// Returns an error on every node of the given kinds
pub struct ErroringRule {
    pub id: &'static str,
    pub kinds: &'static [NodeKind],
}

impl Rule for ErroringRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        "fails on every node it sees"
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        self.kinds
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        Err(RuleError::new(format!("cannot evaluate {}", node.kind())))
    }
}

/// Reports each node of `kind` and skips its subtree
pub struct SkippingRule {
    pub id: &'static str,
    pub kinds: &'static [NodeKind],
}

impl Rule for SkippingRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn description(&self) -> &'static str {
        "reports a node and skips its children"
    }

    fn severity(&self) -> Severity {
        Severity::Should
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        self.kinds
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let mut outcome = Outcome::skip_children();
        outcome.push(Violation::at(node, format!("skipped {}", node.kind())));
        Ok(outcome)
    }
}
