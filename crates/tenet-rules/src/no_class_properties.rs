//! Rule: Assign instance properties in the constructor
//!
//! Class field declarations were not part of the language when the guide's
//! earlier revision was written. Off by default.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

use crate::util::member_name;

pub struct NoClassPropertiesRule;

impl Rule for NoClassPropertiesRule {
    fn id(&self) -> &'static str {
        "no-class-properties"
    }

    fn description(&self) -> &'static str {
        "Assign properties in the constructor instead of declaring class fields"
    }

    fn severity(&self) -> Severity {
        Severity::Should
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::PropertyDefinition]
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let name = member_name(node).unwrap_or_else(|| "[computed]".to_string());
        Ok(Outcome::violation(Violation::at(
            node,
            format!("Class property '{name}' should be assigned in the constructor"),
        )))
    }
}
