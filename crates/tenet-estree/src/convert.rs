//! ESTree JSON to [`SyntaxTree`] conversion

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use tenet_core::{Location, NodeFlags, NodeKind, NodeSpec, Span, SyntaxTree, TreeBuilder, TreeError};

/// Errors converting an ESTree document
#[derive(Error, Debug)]
pub enum EstreeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root is not an ESTree node")]
    NotANode,

    #[error("malformed tree: {0}")]
    Tree(#[from] TreeError),
}

/// Keys that never hold child nodes
const SKIPPED_KEYS: &[&str] = &["type", "start", "end", "loc", "range", "comments", "tokens"];

/// Parse an ESTree JSON document into a tree
///
/// ESTree nests one object per syntax level, so long operator chains run far
/// past serde_json's default depth limit. The limit is lifted and the stack
/// grows on the heap as needed.
pub fn tree_from_json(json: &str) -> Result<SyntaxTree, EstreeError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    tree_from_value(&value)
}

/// Convert an already-parsed ESTree value into a tree
///
/// Columns are shifted from ESTree's 0-based to 1-based. Nodes without a
/// `loc` inherit their parent's span. Children are ordered by start position;
/// nodes at the same position keep document order.
pub fn tree_from_value(value: &Value) -> Result<SyntaxTree, EstreeError> {
    if node_type(value).is_none() {
        return Err(EstreeError::NotANode);
    }
    let mut builder = TreeBuilder::new();
    emit(&mut builder, value)?;
    Ok(builder.finish()?)
}

enum Step<'v> {
    Open {
        value: &'v Value,
        field: Option<&'v str>,
        inherited: Span,
    },
    Close,
}

/// Depth-first conversion with an explicit stack; trees can be arbitrarily deep
fn emit(builder: &mut TreeBuilder, root: &Value) -> Result<(), EstreeError> {
    let mut steps = vec![Step::Open {
        value: root,
        field: None,
        inherited: Span::at(1, 1),
    }];

    while let Some(step) = steps.pop() {
        let (value, field, inherited) = match step {
            Step::Open {
                value,
                field,
                inherited,
            } => (value, field, inherited),
            Step::Close => {
                builder.close()?;
                continue;
            }
        };

        let Some(object) = value.as_object() else {
            return Err(EstreeError::NotANode);
        };
        let type_name = node_type(value).unwrap_or_default();
        let kind = NodeKind::from_type_name(type_name);
        let span = span_of(value).unwrap_or(inherited);

        let mut spec = NodeSpec::new(kind, span)
            .type_name(type_name)
            .flags(flags_of(value));
        if let Some(text) = text_of(kind, value) {
            spec = spec.text(text);
        }
        if let Some(field) = field {
            spec = spec.field(field);
        }
        builder.open(spec)?;
        steps.push(Step::Close);

        let mut children: Vec<(&str, &Value, Location)> = Vec::new();
        for (key, child) in object {
            if SKIPPED_KEYS.contains(&key.as_str()) {
                continue;
            }
            match child {
                Value::Object(_) if node_type(child).is_some() => {
                    children.push((key.as_str(), child, start_of(child, span)));
                }
                Value::Array(items) => {
                    // `null` holes in array patterns are skipped
                    children.extend(
                        items
                            .iter()
                            .filter(|item| node_type(item).is_some())
                            .map(|item| (key.as_str(), item, start_of(item, span))),
                    );
                }
                _ => {}
            }
        }
        children.sort_by_key(|(_, _, start)| *start);

        // Reversed so the first child is opened first
        steps.extend(children.into_iter().rev().map(|(key, child, _)| Step::Open {
            value: child,
            field: Some(key),
            inherited: span,
        }));
    }
    Ok(())
}

fn node_type(value: &Value) -> Option<&str> {
    value.get("type")?.as_str()
}

fn start_of(value: &Value, inherited: Span) -> Location {
    span_of(value).unwrap_or(inherited).start
}

fn span_of(value: &Value) -> Option<Span> {
    let loc = value.get("loc")?;
    Some(Span::new(position(loc.get("start")?)?, position(loc.get("end")?)?))
}

fn position(value: &Value) -> Option<Location> {
    let line = u32::try_from(value.get("line")?.as_u64()?).ok()?;
    let column = u32::try_from(value.get("column")?.as_u64()?).ok()?;
    Some(Location::new(line, column.saturating_add(1)))
}

fn flags_of(value: &Value) -> NodeFlags {
    let mut flags = NodeFlags::NONE;
    for (key, flag) in [
        ("computed", NodeFlags::COMPUTED),
        ("static", NodeFlags::STATIC),
        ("shorthand", NodeFlags::SHORTHAND),
        ("async", NodeFlags::ASYNC),
    ] {
        if value.get(key).and_then(Value::as_bool).unwrap_or(false) {
            flags |= flag;
        }
    }
    flags
}

fn text_of(kind: NodeKind, value: &Value) -> Option<String> {
    let key = match kind {
        NodeKind::Identifier | NodeKind::PrivateIdentifier => "name",
        NodeKind::VariableDeclaration | NodeKind::MethodDefinition | NodeKind::Property => "kind",
        NodeKind::BinaryExpression
        | NodeKind::LogicalExpression
        | NodeKind::AssignmentExpression
        | NodeKind::UnaryExpression
        | NodeKind::UpdateExpression => "operator",
        NodeKind::Literal => return literal_text(value),
        NodeKind::TemplateElement => {
            return value
                .get("value")?
                .get("cooked")?
                .as_str()
                .map(str::to_string);
        }
        _ => return None,
    };
    value.get(key)?.as_str().map(str::to_string)
}

/// Raw source text of a literal, or its JSON rendering when `raw` is absent
fn literal_text(value: &Value) -> Option<String> {
    if let Some(raw) = value.get("raw").and_then(Value::as_str) {
        return Some(raw.to_string());
    }
    value.get("value").map(Value::to_string)
}
