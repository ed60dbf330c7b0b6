//! Node kinds understood by the rule engine
//!
//! Kinds mirror the ESTree node types. Anything a provider produces that is
//! not listed here maps to [`NodeKind::Other`]; the original type name is
//! kept on the node itself.

use std::fmt;

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// Kind of a syntax tree node
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($kind,)*
            /// A node type the engine has no dedicated kind for
            Other,
        }

        impl NodeKind {
            /// Map a parser type name (e.g. `"VariableDeclaration"`) to a kind
            pub fn from_type_name(name: &str) -> NodeKind {
                match name {
                    $(stringify!($kind) => NodeKind::$kind,)*
                    _ => NodeKind::Other,
                }
            }

            /// Canonical type name of this kind
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                    NodeKind::Other => "Other",
                }
            }
        }
    };
}

node_kinds! {
    Program,
    // Declarations
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ClassDeclaration,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
    ExportSpecifier,
    // Classes
    ClassBody,
    ClassExpression,
    MethodDefinition,
    PropertyDefinition,
    StaticBlock,
    // Names and literals
    Identifier,
    PrivateIdentifier,
    Literal,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    // Expressions
    ThisExpression,
    Super,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    ChainExpression,
    SequenceExpression,
    SpreadElement,
    YieldExpression,
    AwaitExpression,
    // Patterns
    ObjectPattern,
    ArrayPattern,
    AssignmentPattern,
    RestElement,
    // Statements
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    ReturnStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    BreakStatement,
    ContinueStatement,
    LabeledStatement,
}

impl NodeKind {
    /// Function-like nodes (declarations and expressions)
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDeclaration
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunctionExpression
        )
    }

    /// Class declarations and class expressions
    pub fn is_class(&self) -> bool {
        matches!(self, NodeKind::ClassDeclaration | NodeKind::ClassExpression)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
