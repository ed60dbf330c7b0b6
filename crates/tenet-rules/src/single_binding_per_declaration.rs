//! Rule: One binding per declaration statement
//!
//! `let a = 1, b = 2;` hides the second binding at the end of a line and
//! makes diffs noisier; each name gets its own statement.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

pub struct SingleBindingPerDeclarationRule;

impl Rule for SingleBindingPerDeclarationRule {
    fn id(&self) -> &'static str {
        "single-binding-per-declaration"
    }

    fn description(&self) -> &'static str {
        "Declare one binding per declaration statement"
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::VariableDeclaration]
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let count = node.children_in("declarations").count();
        if count <= 1 {
            return Ok(Outcome::pass());
        }
        Ok(Outcome::violation(Violation::at(
            node,
            format!("Declare one binding per statement ({count} found)"),
        )))
    }
}
