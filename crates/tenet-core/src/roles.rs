//! Identifier role inference
//!
//! The role of a declared name decides which casing it must use. Roles are
//! inferred once per file from the declaration context and looked up by rules
//! through [`Context::role`](crate::Context::role).

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::kind::NodeKind;
use crate::tree::{NodeFlags, NodeId, NodeRef, SyntaxTree};

/// What a declared identifier is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierRole {
    /// Ordinary variable, parameter, function or method name
    Binding,
    /// Class, or function invoked with `new`
    Constructor,
    /// All-caps `const` bound to a function
    Macro,
    /// All-caps `const` bound to a literal value
    MagicConstant,
    /// Class member or `this` property with a leading underscore
    PrivateMember,
}

impl IdentifierRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierRole::Binding => "binding",
            IdentifierRole::Constructor => "constructor",
            IdentifierRole::Macro => "macro",
            IdentifierRole::MagicConstant => "magic constant",
            IdentifierRole::PrivateMember => "private member",
        }
    }
}

impl fmt::Display for IdentifierRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles of every identifier that sits at a declaration site
#[derive(Debug, Default, Clone)]
pub struct RoleTable {
    roles: HashMap<NodeId, IdentifierRole>,
}

impl RoleTable {
    /// Classify all declaration sites in `tree`
    pub fn infer(tree: &SyntaxTree) -> Self {
        let constructed = constructed_names(tree);
        let mut inference = Inference {
            constructed: &constructed,
            roles: HashMap::new(),
        };
        for node in tree.iter() {
            inference.visit(node);
        }
        Self {
            roles: inference.roles,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<IdentifierRole> {
        self.roles.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Names used as the callee of a `new` expression anywhere in the file
fn constructed_names(tree: &SyntaxTree) -> HashSet<&str> {
    tree.iter()
        .filter(|n| n.is(NodeKind::NewExpression))
        .filter_map(|n| n.child("callee"))
        .filter(|callee| callee.is(NodeKind::Identifier))
        .filter_map(|callee| callee.text())
        .collect()
}

/// `MAX_SIZE`, `API2`: at least one uppercase letter, no lowercase
pub fn is_all_caps(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Role of an all-caps constant: functions are macros, anything else a magic constant
fn constant_role(value: Option<NodeRef<'_>>) -> IdentifierRole {
    if value.is_some_and(|v| v.kind().is_function()) {
        IdentifierRole::Macro
    } else {
        IdentifierRole::MagicConstant
    }
}

struct Inference<'a> {
    constructed: &'a HashSet<&'a str>,
    roles: HashMap<NodeId, IdentifierRole>,
}

impl Inference<'_> {
    fn assign(&mut self, node: NodeRef<'_>, role: IdentifierRole) {
        if node.is(NodeKind::Identifier) || node.is(NodeKind::PrivateIdentifier) {
            self.roles.insert(node.id(), role);
        }
    }

    fn is_constructed(&self, node: NodeRef<'_>) -> bool {
        node.text().is_some_and(|name| self.constructed.contains(name))
    }

    fn visit(&mut self, node: NodeRef<'_>) {
        match node.kind() {
            NodeKind::ClassDeclaration | NodeKind::ClassExpression => {
                if let Some(id) = node.child("id") {
                    self.assign(id, IdentifierRole::Constructor);
                }
            }
            NodeKind::VariableDeclarator => self.visit_declarator(node),
            NodeKind::FunctionDeclaration | NodeKind::FunctionExpression => {
                if let Some(id) = node.child("id") {
                    let role = if self.is_constructed(id) {
                        IdentifierRole::Constructor
                    } else {
                        IdentifierRole::Binding
                    };
                    self.assign(id, role);
                }
                self.visit_params(node);
            }
            NodeKind::ArrowFunctionExpression => self.visit_params(node),
            NodeKind::CatchClause => {
                if let Some(param) = node.child("param") {
                    self.bind_pattern(param);
                }
            }
            NodeKind::MethodDefinition | NodeKind::PropertyDefinition => {
                self.visit_member(node);
            }
            NodeKind::AssignmentExpression => self.visit_this_assignment(node),
            _ => {}
        }
    }

    fn visit_declarator(&mut self, declarator: NodeRef<'_>) {
        let Some(id) = declarator.child("id") else {
            return;
        };
        if !id.is(NodeKind::Identifier) {
            self.bind_pattern(id);
            return;
        }

        let init = declarator.child("init");
        let is_const = declarator
            .parent()
            .is_some_and(|decl| decl.text_is("const"));
        let name = id.text().unwrap_or_default();

        let role = if init.is_some_and(|i| i.is(NodeKind::ClassExpression))
            || self.is_constructed(id)
        {
            IdentifierRole::Constructor
        } else if is_const && is_all_caps(name) {
            constant_role(init)
        } else {
            IdentifierRole::Binding
        };
        self.assign(id, role);
    }

    fn visit_params(&mut self, function: NodeRef<'_>) {
        for param in function.children_in("params") {
            self.bind_pattern(param);
        }
    }

    /// Every name introduced by a binding pattern is a plain binding
    fn bind_pattern(&mut self, pattern: NodeRef<'_>) {
        match pattern.kind() {
            NodeKind::Identifier => self.assign(pattern, IdentifierRole::Binding),
            NodeKind::ObjectPattern => {
                for prop in pattern.children() {
                    match prop.kind() {
                        NodeKind::Property => {
                            if let Some(value) = prop.child("value") {
                                self.bind_pattern(value);
                            }
                        }
                        _ => self.bind_pattern(prop),
                    }
                }
            }
            NodeKind::ArrayPattern => {
                for element in pattern.children() {
                    self.bind_pattern(element);
                }
            }
            NodeKind::AssignmentPattern => {
                if let Some(left) = pattern.child("left") {
                    self.bind_pattern(left);
                }
            }
            NodeKind::RestElement => {
                if let Some(argument) = pattern.child("argument") {
                    self.bind_pattern(argument);
                }
            }
            _ => {}
        }
    }

    fn visit_member(&mut self, member: NodeRef<'_>) {
        if member.has_flag(NodeFlags::COMPUTED) || member.text_is("constructor") {
            return;
        }
        let Some(key) = member.child("key") else {
            return;
        };

        if key.is(NodeKind::PrivateIdentifier) {
            self.assign(key, IdentifierRole::Binding);
            return;
        }

        let name = key.text().unwrap_or_default();
        let role = if name.starts_with('_') {
            IdentifierRole::PrivateMember
        } else if member.is(NodeKind::PropertyDefinition)
            && member.has_flag(NodeFlags::STATIC)
            && is_all_caps(name)
        {
            constant_role(member.child("value"))
        } else {
            IdentifierRole::Binding
        };
        self.assign(key, role);
    }

    /// `this._cache = ...` declares a private member
    fn visit_this_assignment(&mut self, assignment: NodeRef<'_>) {
        let Some(target) = assignment.child("left") else {
            return;
        };
        if !target.is(NodeKind::MemberExpression) || target.has_flag(NodeFlags::COMPUTED) {
            return;
        }
        let on_this = target
            .child("object")
            .is_some_and(|o| o.is(NodeKind::ThisExpression));
        if let Some(property) = target.child("property") {
            if on_this && property.text().is_some_and(|n| n.starts_with('_')) {
                self.assign(property, IdentifierRole::PrivateMember);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use crate::tree::{NodeSpec, TreeBuilder};

    fn spec(kind: NodeKind) -> NodeSpec {
        NodeSpec::new(kind, Span::at(1, 1))
    }

    fn role_of(tree: &SyntaxTree, name: &str) -> Option<IdentifierRole> {
        let table = RoleTable::infer(tree);
        let node = tree
            .iter()
            .find(|n| n.text_is(name) && table.get(n.id()).is_some())
            .or_else(|| tree.iter().find(|n| n.text_is(name)))?;
        table.get(node.id())
    }

    /// `<keyword> <name> = <init>;` followed by `new <newed>();` when given
    fn declaration(keyword: &str, name: &str, init: NodeSpec, newed: Option<&str>) -> SyntaxTree {
        let mut b = TreeBuilder::new();
        b.open(spec(NodeKind::Program)).unwrap();
        b.open(spec(NodeKind::VariableDeclaration).text(keyword)).unwrap();
        b.open(spec(NodeKind::VariableDeclarator).field("declarations")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text(name).field("id")).unwrap();
        b.leaf(init.field("init")).unwrap();
        b.close().unwrap();
        b.close().unwrap();
        if let Some(callee) = newed {
            b.open(spec(NodeKind::NewExpression)).unwrap();
            b.leaf(spec(NodeKind::Identifier).text(callee).field("callee")).unwrap();
            b.close().unwrap();
        }
        b.close().unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn test_is_all_caps() {
        assert!(is_all_caps("MAX_SIZE"));
        assert!(is_all_caps("API2"));
        assert!(!is_all_caps("maxSize"));
        assert!(!is_all_caps("_"));
        assert!(!is_all_caps("Max_Size"));
    }

    #[test]
    fn test_plain_binding() {
        let tree = declaration("let", "count", spec(NodeKind::Literal).text("0"), None);
        assert_eq!(role_of(&tree, "count"), Some(IdentifierRole::Binding));
    }

    #[test]
    fn test_magic_constant() {
        let tree = declaration("const", "MAX_SIZE", spec(NodeKind::Literal).text("10"), None);
        assert_eq!(role_of(&tree, "MAX_SIZE"), Some(IdentifierRole::MagicConstant));
    }

    #[test]
    fn test_all_caps_const_with_computed_value() {
        for init in [
            NodeKind::CallExpression,
            NodeKind::ArrayExpression,
            NodeKind::ObjectExpression,
            NodeKind::Identifier,
        ] {
            let tree = declaration("const", "DEFAULT_OPTIONS", spec(init), None);
            assert_eq!(
                role_of(&tree, "DEFAULT_OPTIONS"),
                Some(IdentifierRole::MagicConstant),
                "initialiser {init:?}"
            );
        }
    }

    #[test]
    fn test_all_caps_let_is_binding() {
        let tree = declaration("let", "MAX_SIZE", spec(NodeKind::Literal).text("10"), None);
        assert_eq!(role_of(&tree, "MAX_SIZE"), Some(IdentifierRole::Binding));
    }

    #[test]
    fn test_macro() {
        let tree = declaration("const", "ASSERT", spec(NodeKind::ArrowFunctionExpression), None);
        assert_eq!(role_of(&tree, "ASSERT"), Some(IdentifierRole::Macro));
    }

    #[test]
    fn test_class_expression_is_constructor() {
        let tree = declaration("const", "widget", spec(NodeKind::ClassExpression), None);
        assert_eq!(role_of(&tree, "widget"), Some(IdentifierRole::Constructor));
    }

    #[test]
    fn test_newed_function_is_constructor() {
        let tree = declaration(
            "var",
            "Point",
            spec(NodeKind::FunctionExpression),
            Some("Point"),
        );
        assert_eq!(role_of(&tree, "Point"), Some(IdentifierRole::Constructor));
    }

    #[test]
    fn test_new_callee_reference_has_no_role() {
        let tree = declaration("var", "Point", spec(NodeKind::FunctionExpression), Some("Point"));
        let table = RoleTable::infer(&tree);
        let callee = tree
            .iter()
            .find(|n| n.field() == Some("callee"))
            .unwrap();
        assert_eq!(table.get(callee.id()), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_class_members() {
        let mut b = TreeBuilder::new();
        b.open(spec(NodeKind::ClassDeclaration)).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("Widget").field("id")).unwrap();
        b.open(spec(NodeKind::ClassBody).field("body")).unwrap();
        b.open(spec(NodeKind::MethodDefinition).text("method")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("_render").field("key")).unwrap();
        b.close().unwrap();
        b.open(spec(NodeKind::MethodDefinition).text("constructor")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("constructor").field("key")).unwrap();
        b.close().unwrap();
        b.open(spec(NodeKind::PropertyDefinition).flags(NodeFlags::STATIC)).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("LIMIT").field("key")).unwrap();
        b.leaf(spec(NodeKind::Literal).text("5").field("value")).unwrap();
        b.close().unwrap();
        b.open(spec(NodeKind::PropertyDefinition).flags(NodeFlags::STATIC)).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("DEFAULTS").field("key")).unwrap();
        b.leaf(spec(NodeKind::ObjectExpression).field("value")).unwrap();
        b.close().unwrap();
        b.open(spec(NodeKind::PropertyDefinition).flags(NodeFlags::STATIC)).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("CHECK").field("key")).unwrap();
        b.leaf(spec(NodeKind::ArrowFunctionExpression).field("value")).unwrap();
        b.close().unwrap();
        b.close().unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(role_of(&tree, "Widget"), Some(IdentifierRole::Constructor));
        assert_eq!(role_of(&tree, "_render"), Some(IdentifierRole::PrivateMember));
        assert_eq!(role_of(&tree, "constructor"), None);
        assert_eq!(role_of(&tree, "LIMIT"), Some(IdentifierRole::MagicConstant));
        assert_eq!(role_of(&tree, "DEFAULTS"), Some(IdentifierRole::MagicConstant));
        assert_eq!(role_of(&tree, "CHECK"), Some(IdentifierRole::Macro));
    }

    #[test]
    fn test_this_assignment_private_member() {
        let mut b = TreeBuilder::new();
        b.open(spec(NodeKind::AssignmentExpression).text("=")).unwrap();
        b.open(spec(NodeKind::MemberExpression).field("left")).unwrap();
        b.leaf(spec(NodeKind::ThisExpression).field("object")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("_cache").field("property")).unwrap();
        b.close().unwrap();
        b.leaf(spec(NodeKind::Literal).text("null").field("right")).unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();

        assert_eq!(role_of(&tree, "_cache"), Some(IdentifierRole::PrivateMember));
    }

    #[test]
    fn test_destructured_params_are_bindings() {
        let mut b = TreeBuilder::new();
        b.open(spec(NodeKind::ArrowFunctionExpression)).unwrap();
        b.open(spec(NodeKind::ObjectPattern).field("params")).unwrap();
        b.open(spec(NodeKind::Property).field("properties")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("first_name").field("key")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("first_name").field("value")).unwrap();
        b.close().unwrap();
        b.close().unwrap();
        b.open(spec(NodeKind::AssignmentPattern).field("params")).unwrap();
        b.leaf(spec(NodeKind::Identifier).text("limit").field("left")).unwrap();
        b.leaf(spec(NodeKind::Literal).text("10").field("right")).unwrap();
        b.close().unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();

        let table = RoleTable::infer(&tree);
        let value = tree.iter().find(|n| n.field() == Some("value")).unwrap();
        let key = tree.iter().find(|n| n.field() == Some("key")).unwrap();
        assert_eq!(table.get(value.id()), Some(IdentifierRole::Binding));
        assert_eq!(table.get(key.id()), None);
        assert_eq!(role_of(&tree, "limit"), Some(IdentifierRole::Binding));
    }
}
