//! Rule: Use `===` and `!==` instead of `==` and `!=`

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

pub struct PreferStrictEqualityRule;

impl Rule for PreferStrictEqualityRule {
    fn id(&self) -> &'static str {
        "prefer-strict-equality"
    }

    fn description(&self) -> &'static str {
        "Use === and !== instead of == and !="
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::BinaryExpression]
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let strict = match node.text() {
            Some("==") => "===",
            Some("!=") => "!==",
            _ => return Ok(Outcome::pass()),
        };
        let loose = node.text().unwrap_or_default();
        Ok(Outcome::violation(Violation::at(
            node,
            format!("Use {strict} instead of {loose}"),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenet_testkit::*;

    fn comparison(operator: &str) -> tenet_core::SyntaxTree {
        program(vec![expr_stmt(binary(
            operator,
            (2, 5),
            ident("count", (2, 5)),
            num(0, (2, 14)),
        ))])
        .build()
    }

    #[test]
    fn test_loose_equality() {
        assert_eq!(
            positions(&check(PreferStrictEqualityRule, &comparison("=="))),
            vec![(2, 5, "Use === instead of ==".to_string())]
        );
        assert_eq!(
            positions(&check(PreferStrictEqualityRule, &comparison("!="))),
            vec![(2, 5, "Use !== instead of !=".to_string())]
        );
    }

    #[test]
    fn test_strict_and_other_operators_pass() {
        for operator in ["===", "!==", "<", "+", "instanceof"] {
            assert!(check(PreferStrictEqualityRule, &comparison(operator)).is_empty());
        }
    }
}
