//! Rule: Ternaries must not nest
//!
//! Each conditional expression directly inside another one's test,
//! consequent or alternate is reported at its own position.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

pub struct NoNestedTernaryRule;

impl Rule for NoNestedTernaryRule {
    fn id(&self) -> &'static str {
        "no-nested-ternary"
    }

    fn description(&self) -> &'static str {
        "Do not nest ternary expressions"
    }

    fn severity(&self) -> Severity {
        Severity::Should
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::ConditionalExpression]
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let mut outcome = Outcome::pass();
        for nested in node
            .children()
            .filter(|c| c.is(NodeKind::ConditionalExpression))
        {
            outcome.push(Violation::at(nested, "Do not nest ternary expressions"));
        }
        Ok(outcome)
    }
}
