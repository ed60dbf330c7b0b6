//! Rule: Public members come before private ones
//!
//! A member is private when its key is a `#name` or starts with `_`. Every
//! public member that follows a private one is reported. Off by default.

use tenet_core::{Context, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation};

use crate::util::{is_private_member, member_name};

pub struct PrivateMembersLastRule;

impl Rule for PrivateMembersLastRule {
    fn id(&self) -> &'static str {
        "private-members-last"
    }

    fn description(&self) -> &'static str {
        "Declare public class members before private ones"
    }

    fn severity(&self) -> Severity {
        Severity::Should
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[NodeKind::ClassBody]
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn evaluate(&self, node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        let mut outcome = Outcome::pass();
        let mut first_private: Option<String> = None;

        for member in node.children().filter(|m| {
            m.is(NodeKind::MethodDefinition) || m.is(NodeKind::PropertyDefinition)
        }) {
            let Some(name) = member_name(member) else {
                continue;
            };
            if is_private_member(member) {
                first_private.get_or_insert(name);
            } else if let Some(private) = &first_private {
                outcome.push(Violation::at(
                    member,
                    format!("Public member '{name}' should come before private member '{private}'"),
                ));
            }
        }
        Ok(outcome)
    }
}
