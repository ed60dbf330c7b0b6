//! Single-pass rule evaluation over a syntax tree
//!
//! The walker visits every node once in pre-order, depth-first. At each node
//! it runs the active rules registered for the node's kind in registration
//! order. A rule that errors or panics is recorded as [`RuleCrashed`] and the
//! walk carries on with the remaining rules and nodes.

use log::{trace, warn};
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use crate::context::Context;
use crate::finding::{Finding, RuleCrashed};
use crate::kind::NodeKind;
use crate::registry::{ActiveRule, RuleSet};
use crate::report::FileOutcome;
use crate::rule::{Flow, Outcome};
use crate::tree::{NodeRef, SyntaxTree};

/// Dispatches rules to the nodes they apply to
pub struct Walker<'r> {
    dispatch: HashMap<NodeKind, Vec<ActiveRule<'r>>>,
}

impl<'r> Walker<'r> {
    pub fn new(rules: &RuleSet<'r>) -> Self {
        let mut dispatch: HashMap<NodeKind, Vec<ActiveRule<'r>>> = HashMap::new();
        for active in rules.iter() {
            for kind in active.rule().applies_to() {
                dispatch.entry(*kind).or_default().push(*active);
            }
        }
        Self { dispatch }
    }

    /// Walk one file's tree and collect findings and crashes
    pub fn walk(&self, path: &Path, source: &str, tree: &SyntaxTree) -> FileOutcome {
        let ctx = Context::new(path, source, tree);
        let mut outcome = FileOutcome::new(path);
        let mut stack = vec![tree.root()];

        while let Some(node) = stack.pop() {
            if self.visit(node, &ctx, &mut outcome) == Flow::Continue {
                stack.extend(node.children().rev());
            }
        }

        outcome
    }

    fn visit(&self, node: NodeRef<'_>, ctx: &Context<'_>, outcome: &mut FileOutcome) -> Flow {
        let Some(rules) = self.dispatch.get(&node.kind()) else {
            return Flow::Continue;
        };

        let mut flow = Flow::Continue;
        for active in rules {
            match evaluate(active, node, ctx) {
                Ok(result) => {
                    if result.flow == Flow::SkipChildren {
                        trace!("{} skips children of {} at {}", active.id(), node.kind(), node.location());
                        flow = Flow::SkipChildren;
                    }
                    outcome.findings.extend(result.violations.into_iter().map(|v| {
                        Finding::new(active.id(), active.severity(), v.location, v.message)
                    }));
                }
                Err(cause) => {
                    warn!(
                        "rule {} crashed on {} at {}:{}: {}",
                        active.id(),
                        node.kind(),
                        ctx.path().display(),
                        node.location(),
                        cause
                    );
                    outcome.crashes.push(RuleCrashed {
                        rule_id: active.id().to_string(),
                        location: node.location(),
                        cause,
                    });
                }
            }
        }
        flow
    }
}

/// Run one rule, folding both `Err` returns and panics into a cause string
fn evaluate(active: &ActiveRule<'_>, node: NodeRef<'_>, ctx: &Context<'_>) -> Result<Outcome, String> {
    let rule = active.rule();
    match catch_unwind(AssertUnwindSafe(|| rule.evaluate(node, ctx))) {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(format!("panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
