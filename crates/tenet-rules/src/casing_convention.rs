//! Rule: Names follow the casing of their role
//!
//! - bindings (variables, parameters, functions, methods): `camelCase`
//! - constructors (classes, functions called with `new`): `PascalCase`
//! - magic constants and macros (all-caps `const`): `UPPER_SNAKE_CASE`
//! - private members: `_camelCase`
//!
//! Only identifiers at declaration sites have a role; references are never
//! checked, so a misnamed binding is reported once. Import declarations are
//! skipped entirely because they name things defined elsewhere.

use regex::Regex;
use std::sync::OnceLock;

use tenet_core::{
    Context, IdentifierRole, NodeKind, NodeRef, Outcome, Rule, RuleError, Severity, Violation,
};

static CAMEL: OnceLock<Regex> = OnceLock::new();
static PASCAL: OnceLock<Regex> = OnceLock::new();
static UPPER_SNAKE: OnceLock<Regex> = OnceLock::new();
static PRIVATE_CAMEL: OnceLock<Regex> = OnceLock::new();

fn camel() -> &'static Regex {
    CAMEL.get_or_init(|| Regex::new(r"^(?:\$?[a-z][A-Za-z0-9]*|_|\$)$").unwrap())
}

fn pascal() -> &'static Regex {
    PASCAL.get_or_init(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap())
}

fn upper_snake() -> &'static Regex {
    UPPER_SNAKE.get_or_init(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*$").unwrap())
}

fn private_camel() -> &'static Regex {
    PRIVATE_CAMEL.get_or_init(|| Regex::new(r"^_[a-z][A-Za-z0-9]*$").unwrap())
}

/// Expected style name and its pattern for a role
fn convention(role: IdentifierRole) -> (&'static str, &'static Regex) {
    match role {
        IdentifierRole::Binding => ("camelCase", camel()),
        IdentifierRole::Constructor => ("PascalCase", pascal()),
        IdentifierRole::Macro | IdentifierRole::MagicConstant => {
            ("UPPER_SNAKE_CASE", upper_snake())
        }
        IdentifierRole::PrivateMember => ("_camelCase", private_camel()),
    }
}

pub struct CasingConventionRule;

impl Rule for CasingConventionRule {
    fn id(&self) -> &'static str {
        "casing-convention"
    }

    fn description(&self) -> &'static str {
        "camelCase bindings, PascalCase constructors, UPPER_SNAKE_CASE constants, _camelCase private members"
    }

    fn severity(&self) -> Severity {
        Severity::Must
    }

    fn applies_to(&self) -> &'static [NodeKind] {
        &[
            NodeKind::Identifier,
            NodeKind::PrivateIdentifier,
            NodeKind::ImportDeclaration,
        ]
    }

    fn evaluate(&self, node: NodeRef<'_>, ctx: &Context<'_>) -> Result<Outcome, RuleError> {
        if node.is(NodeKind::ImportDeclaration) {
            return Ok(Outcome::skip_children());
        }
        let Some(role) = ctx.role(node) else {
            return Ok(Outcome::pass());
        };
        let name = node
            .text()
            .ok_or_else(|| RuleError::new(format!("{} has no name", node.type_name())))?;

        let (style, pattern) = convention(role);
        if pattern.is_match(name) {
            return Ok(Outcome::pass());
        }
        Ok(Outcome::violation(Violation::at(
            node,
            format!("{role} '{name}' should be {style}"),
        )))
    }
}
