//! Rule: Build strings with template literals, not concatenation
//!
//! A `+` chain is reported once, at its outermost expression, when it mixes
//! at least one string with at least one non-literal operand:
//! `'Hello ' + name + '!'` → `` `Hello ${name}!` ``.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

use crate::util::is_string_literal;

pub struct PreferTemplateRule;

fn is_concatenation(node: NodeRef<'_>) -> bool {
    node.is(NodeKind::BinaryExpression) && node.text_is("+")
}

/// Leaf operands of a `+` chain, left to right
fn operands(node: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let mut leaves = Vec::new();
    let mut pending = vec![node];
    while let Some(next) = pending.pop() {
        if next != node && !is_concatenation(next) {
            leaves.push(next);
            continue;
        }
        pending.extend(next.children().rev());
    }
    leaves
}

impl Rule for PreferTemplateRule {
    fn id(&self) -> &'static str {
        "prefer-template"
    }

    fn description(&self) -> &'static str {
        "Use template literals instead of string concatenation"
    }

    fn severity(&self) -> Severity {
        Severity::Should
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::BinaryExpression]
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        if !is_concatenation(node) || node.parent().is_some_and(is_concatenation) {
            return Ok(Outcome::pass());
        }

        let leaves = operands(node);
        let has_string = leaves
            .iter()
            .any(|n| is_string_literal(*n) || n.is(NodeKind::TemplateLiteral));
        let has_dynamic = leaves
            .iter()
            .any(|n| !n.is(NodeKind::Literal) && !n.is(NodeKind::TemplateLiteral));

        Ok((has_string && has_dynamic)
            .then(|| Violation::at(node, "Use a template literal instead of string concatenation"))
            .into())
    }
}
