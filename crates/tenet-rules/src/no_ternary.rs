//! Rule: Use if statements instead of ternaries
//!
//! Stricter guide revision that forbids the conditional operator outright.
//! Off by default; `no-nested-ternary` covers the milder stance.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

pub struct NoTernaryRule;

impl Rule for NoTernaryRule {
    fn id(&self) -> &'static str {
        "no-ternary"
    }

    fn description(&self) -> &'static str {
        "Use an if statement instead of a ternary expression"
    }

    fn severity(&self) -> Severity {
        Severity::Should
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::ConditionalExpression]
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        Ok(Outcome::violation(Violation::at(
            node,
            "Use an if statement instead of a ternary expression",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenet_testkit::*;

    #[test]
    fn test_every_ternary_reported() {
        let nested = conditional((1, 9), ident("c", (1, 9)), ident("d", (1, 13)), ident("e", (1, 17)));
        let tree = program(vec![expr_stmt(conditional(
            (1, 1),
            ident("a", (1, 1)),
            ident("b", (1, 5)),
            nested,
        ))])
        .build();
        let findings = check(NoTernaryRule, &tree);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].column(), 1);
        assert_eq!(findings[1].column(), 9);
    }

    #[test]
    fn test_off_by_default() {
        assert!(!NoTernaryRule.enabled_by_default());
    }
}
