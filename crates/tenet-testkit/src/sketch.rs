//! Hand-built syntax trees
//!
//! Each helper takes the `(line, column)` its node starts at, so tests can
//! assert exact finding positions without going through a parser. Field names
//! follow ESTree (`declarations`, `init`, `callee`, ...), which is what the
//! role inference and the built-in rules look at.
//!
//! ```
//! use tenet_testkit::*;
//!
//! // var x = 1, y = 2;
//! let tree = program(vec![var_decl(
//!     "var",
//!     (1, 1),
//!     vec![
//!         declarator("x", (1, 5), Some(num(1, (1, 9)))),
//!         declarator("y", (1, 12), Some(num(2, (1, 16)))),
//!     ],
//! )])
//! .build();
//! assert_eq!(tree.root().children().count(), 1);
//! ```

use tenet_core::{NodeFlags, NodeKind, NodeSpec, Span, SyntaxTree, TreeBuilder};

/// A 1-based `(line, column)` position
pub type At = (u32, u32);

/// A node and its children, not yet flattened into a tree
#[derive(Debug, Clone)]
pub struct Sketch {
    spec: NodeSpec,
    at: At,
    children: Vec<Sketch>,
}

impl Sketch {
    pub fn new(kind: NodeKind, at: At) -> Self {
        Self {
            spec: NodeSpec::new(kind, Span::at(at.0, at.1)),
            at,
            children: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spec = self.spec.text(text);
        self
    }

    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.spec = self.spec.flags(flags);
        self
    }

    /// Append `child` under the parent field `field`
    pub fn child(mut self, field: &str, child: Sketch) -> Self {
        self.children.push(child.in_field(field));
        self
    }

    /// Append every sketch in `children` under `field`
    pub fn children(mut self, field: &str, children: impl IntoIterator<Item = Sketch>) -> Self {
        self.children
            .extend(children.into_iter().map(|c| c.in_field(field)));
        self
    }

    fn in_field(mut self, field: &str) -> Self {
        self.spec = self.spec.field(field);
        self
    }

    /// Flatten into an immutable tree rooted at this sketch
    pub fn build(self) -> SyntaxTree {
        let mut builder = TreeBuilder::new();
        self.emit(&mut builder);
        builder.finish().expect("sketches are always balanced")
    }

    fn emit(self, builder: &mut TreeBuilder) {
        builder
            .open(self.spec)
            .expect("sketches have a single root");
        for child in self.children {
            child.emit(builder);
        }
        builder.close().expect("open and close are paired");
    }
}

pub fn program(body: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::Program, (1, 1)).children("body", body)
}

pub fn ident(name: &str, at: At) -> Sketch {
    Sketch::new(NodeKind::Identifier, at).text(name)
}

pub fn private_ident(name: &str, at: At) -> Sketch {
    Sketch::new(NodeKind::PrivateIdentifier, at).text(name)
}

/// Numeric literal
pub fn num(value: i64, at: At) -> Sketch {
    Sketch::new(NodeKind::Literal, at).text(value.to_string())
}

/// String literal; the raw text carries single quotes
pub fn string(value: &str, at: At) -> Sketch {
    Sketch::new(NodeKind::Literal, at).text(format!("'{value}'"))
}

/// Template literal without substitutions
pub fn template(value: &str, at: At) -> Sketch {
    Sketch::new(NodeKind::TemplateLiteral, at)
        .child("quasis", Sketch::new(NodeKind::TemplateElement, at).text(value))
}

pub fn expr_stmt(expression: Sketch) -> Sketch {
    let at = start_of(&expression);
    Sketch::new(NodeKind::ExpressionStatement, at).child("expression", expression)
}

pub fn block(at: At, body: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::BlockStatement, at).children("body", body)
}

/// `<keyword> <declarators>;`
pub fn var_decl(keyword: &str, at: At, declarators: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::VariableDeclaration, at)
        .text(keyword)
        .children("declarations", declarators)
}

/// `<name> = <init>` inside a declaration
pub fn declarator(name: &str, at: At, init: Option<Sketch>) -> Sketch {
    pattern_declarator(ident(name, at), init)
}

/// Declarator whose id is an arbitrary pattern
pub fn pattern_declarator(id: Sketch, init: Option<Sketch>) -> Sketch {
    let at = start_of(&id);
    let declarator = Sketch::new(NodeKind::VariableDeclarator, at).child("id", id);
    match init {
        Some(init) => declarator.child("init", init),
        None => declarator,
    }
}

/// `{ a, b: c }` destructuring pattern with shorthand properties for bare names
pub fn object_pattern(at: At, names: Vec<Sketch>) -> Sketch {
    let properties = names.into_iter().map(|value| {
        let at = start_of(&value);
        let key = value.clone();
        Sketch::new(NodeKind::Property, at)
            .flags(NodeFlags::SHORTHAND)
            .child("key", key)
            .child("value", value)
    });
    Sketch::new(NodeKind::ObjectPattern, at).children("properties", properties)
}

pub fn binary(operator: &str, at: At, left: Sketch, right: Sketch) -> Sketch {
    Sketch::new(NodeKind::BinaryExpression, at)
        .text(operator)
        .child("left", left)
        .child("right", right)
}

pub fn assign(at: At, left: Sketch, right: Sketch) -> Sketch {
    Sketch::new(NodeKind::AssignmentExpression, at)
        .text("=")
        .child("left", left)
        .child("right", right)
}

/// `<test> ? <consequent> : <alternate>`
pub fn conditional(at: At, test: Sketch, consequent: Sketch, alternate: Sketch) -> Sketch {
    Sketch::new(NodeKind::ConditionalExpression, at)
        .child("test", test)
        .child("consequent", consequent)
        .child("alternate", alternate)
}

/// `new <callee>(<arguments>)`; the callee starts four columns in
pub fn new_expr(callee: &str, at: At, arguments: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::NewExpression, at)
        .child("callee", ident(callee, (at.0, at.1 + 4)))
        .children("arguments", arguments)
}

pub fn call(callee: Sketch, arguments: Vec<Sketch>) -> Sketch {
    let at = start_of(&callee);
    Sketch::new(NodeKind::CallExpression, at)
        .child("callee", callee)
        .children("arguments", arguments)
}

/// `object.property`
pub fn member(object: Sketch, property: Sketch) -> Sketch {
    let at = start_of(&object);
    Sketch::new(NodeKind::MemberExpression, at)
        .child("object", object)
        .child("property", property)
}

/// `this.<property> = <value>;`
pub fn this_assign(property: &str, at: At, value: Sketch) -> Sketch {
    let target = member(
        Sketch::new(NodeKind::ThisExpression, at),
        ident(property, (at.0, at.1 + 5)),
    );
    expr_stmt(assign(at, target, value))
}

/// `function <name>(<params>) { <body> }`; the name starts nine columns in
pub fn function_decl(name: &str, at: At, params: Vec<Sketch>, body: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::FunctionDeclaration, at)
        .child("id", ident(name, (at.0, at.1 + 9)))
        .children("params", params)
        .child("body", block(at, body))
}

/// `function (<params>) { <body> }`
pub fn function_expr(at: At, params: Vec<Sketch>, body: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::FunctionExpression, at)
        .children("params", params)
        .child("body", block(at, body))
}

/// `(<params>) => <body>`
pub fn arrow(at: At, params: Vec<Sketch>, body: Sketch) -> Sketch {
    Sketch::new(NodeKind::ArrowFunctionExpression, at)
        .children("params", params)
        .child("body", body)
}

/// `class <name> { <members> }`; the name starts six columns in
pub fn class_decl(name: &str, at: At, members: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::ClassDeclaration, at)
        .child("id", ident(name, (at.0, at.1 + 6)))
        .child("body", class_body(at, members))
}

/// `class { <members> }`, optionally named
pub fn class_expr(name: Option<&str>, at: At, members: Vec<Sketch>) -> Sketch {
    let class = Sketch::new(NodeKind::ClassExpression, at);
    let class = match name {
        Some(name) => class.child("id", ident(name, (at.0, at.1 + 6))),
        None => class,
    };
    class.child("body", class_body(at, members))
}

fn class_body(at: At, members: Vec<Sketch>) -> Sketch {
    Sketch::new(NodeKind::ClassBody, at).children("body", members)
}

/// Method definition; `kind` is `method`, `constructor`, `get` or `set`
pub fn method(name: &str, at: At, kind: &str) -> Sketch {
    method_with_key(ident(name, at), kind)
}

/// `#name() {}`
pub fn private_method(name: &str, at: At) -> Sketch {
    method_with_key(private_ident(name, at), "method")
}

fn method_with_key(key: Sketch, kind: &str) -> Sketch {
    let at = start_of(&key);
    Sketch::new(NodeKind::MethodDefinition, at)
        .text(kind)
        .child("key", key)
        .child("value", function_expr(at, vec![], vec![]))
}

/// Class field `<name> = <value>;`
pub fn property_def(name: &str, at: At, value: Option<Sketch>) -> Sketch {
    let definition = Sketch::new(NodeKind::PropertyDefinition, at).child("key", ident(name, at));
    match value {
        Some(value) => definition.child("value", value),
        None => definition,
    }
}

/// `import <local>, { <imported> as <local> } from '<source>';`
///
/// Each specifier is `(imported, local)`; an empty `imported` makes a
/// default import.
pub fn import_decl(at: At, specifiers: &[(&str, &str)], source: &str) -> Sketch {
    let mut column = at.1 + 7;
    let specifiers: Vec<Sketch> = specifiers
        .iter()
        .map(|(imported, local)| {
            let spot = (at.0, column);
            column += (imported.len() + local.len() + 6) as u32;
            if imported.is_empty() {
                Sketch::new(NodeKind::ImportDefaultSpecifier, spot).child("local", ident(local, spot))
            } else {
                Sketch::new(NodeKind::ImportSpecifier, spot)
                    .child("imported", ident(imported, spot))
                    .child("local", ident(local, spot))
            }
        })
        .collect();
    Sketch::new(NodeKind::ImportDeclaration, at)
        .children("specifiers", specifiers)
        .child("source", string(source, (at.0, column)))
}

fn start_of(sketch: &Sketch) -> At {
    sketch.at
}
