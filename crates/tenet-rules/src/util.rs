//! Node predicates shared by several rules

use tenet_core::{NodeKind, NodeRef};

/// `'text'` or `"text"`
pub fn is_string_literal(node: NodeRef<'_>) -> bool {
    node.is(NodeKind::Literal)
        && node
            .text()
            .is_some_and(|raw| raw.starts_with('\'') || raw.starts_with('"'))
}

/// Name of a class member key, `#name` for private identifiers
pub fn member_name(member: NodeRef<'_>) -> Option<String> {
    let key = member.child("key")?;
    let name = key.text()?;
    Some(if key.is(NodeKind::PrivateIdentifier) {
        format!("#{name}")
    } else {
        name.to_string()
    })
}

/// `#name` or `_name`
pub fn is_private_member(member: NodeRef<'_>) -> bool {
    member.child("key").is_some_and(|key| {
        key.is(NodeKind::PrivateIdentifier) || key.text().is_some_and(|n| n.starts_with('_'))
    })
}
