//! Rule: Use literal syntax instead of wrapper constructors
//!
//! `new Object()` → `{}`, `new Array()` → `[]`. The primitive wrappers
//! (`String`, `Number`, `Boolean`) create objects rather than primitives and
//! are reported as well.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

/// Constructor name and the literal form to use instead
const LITERAL_FORMS: &[(&str, &str)] = &[
    ("Object", "an object literal {}"),
    ("Array", "an array literal []"),
    ("String", "a string literal"),
    ("Number", "a number literal"),
    ("Boolean", "true or false"),
];

pub struct PreferLiteralConstructionRule;

impl Rule for PreferLiteralConstructionRule {
    fn id(&self) -> &'static str {
        "prefer-literal-construction"
    }

    fn description(&self) -> &'static str {
        "Use literal syntax instead of new Object(), new Array() and the primitive wrappers"
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::NewExpression]
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let Some(callee) = node.child("callee").filter(|c| c.is(NodeKind::Identifier)) else {
            return Ok(Outcome::pass());
        };
        let name = callee.text().unwrap_or_default();
        Ok(LITERAL_FORMS
            .iter()
            .find(|(constructor, _)| *constructor == name)
            .map(|(constructor, literal)| {
                Violation::at(node, format!("Use {literal} instead of new {constructor}()"))
            })
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenet_testkit::*;

    fn construct(name: &str) -> tenet_core::SyntaxTree {
        program(vec![var_decl(
            "const",
            (4, 1),
            vec![declarator("value", (4, 7), Some(new_expr(name, (4, 15), vec![])))],
        )])
        .build()
    }

    #[test]
    fn test_wrapper_constructors() {
        assert_eq!(
            positions(&check(PreferLiteralConstructionRule, &construct("Object"))),
            vec![(4, 15, "Use an object literal {} instead of new Object()".to_string())]
        );
        assert_eq!(
            positions(&check(PreferLiteralConstructionRule, &construct("Array"))),
            vec![(4, 15, "Use an array literal [] instead of new Array()".to_string())]
        );
        for name in ["String", "Number", "Boolean"] {
            assert_eq!(check(PreferLiteralConstructionRule, &construct(name)).len(), 1);
        }
    }

    #[test]
    fn test_other_constructors_pass() {
        for name in ["Map", "Date", "Widget"] {
            assert!(check(PreferLiteralConstructionRule, &construct(name)).is_empty());
        }
    }

    #[test]
    fn test_member_callee_passes() {
        // new globalThis.Object()
        let tree = program(vec![expr_stmt(
            Sketch::new(NodeKind::NewExpression, (1, 1)).child(
                "callee",
                member(ident("globalThis", (1, 5)), ident("Object", (1, 16))),
            ),
        )])
        .build();
        assert!(check(PreferLiteralConstructionRule, &tree).is_empty());
    }
}
