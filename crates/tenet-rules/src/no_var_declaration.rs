//! Rule: Declare variables with `let` or `const`, never `var`

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

pub struct NoVarDeclarationRule;

impl Rule for NoVarDeclarationRule {
    fn id(&self) -> &'static str {
        "no-var-declaration"
    }

    fn description(&self) -> &'static str {
        "Declare variables with let or const, never var"
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::VariableDeclaration]
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        Ok(node
            .text_is("var")
            .then(|| Violation::at(node, "Use let or const instead of var"))
            .into())
    }
}
