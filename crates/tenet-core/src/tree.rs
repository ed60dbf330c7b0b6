//! Language-neutral syntax tree
//!
//! Providers build trees through [`TreeBuilder`] in source order; rules only
//! ever see shared [`NodeRef`] handles, so the tree cannot change while it is
//! being walked.

use crate::error::TreeError;
use crate::kind::NodeKind;
use crate::span::{Location, Span};

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Boolean node properties carried over from the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeFlags(u8);

impl NodeFlags {
    pub const NONE: NodeFlags = NodeFlags(0);
    /// `obj[key]`, `{ [key]: value }`, `class { [key]() {} }`
    pub const COMPUTED: NodeFlags = NodeFlags(1);
    /// `static` class member
    pub const STATIC: NodeFlags = NodeFlags(1 << 1);
    /// `{ name }` object shorthand
    pub const SHORTHAND: NodeFlags = NodeFlags(1 << 2);
    /// `async` function
    pub const ASYNC: NodeFlags = NodeFlags(1 << 3);

    pub fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for NodeFlags {
    type Output = NodeFlags;

    fn bitor(self, rhs: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for NodeFlags {
    fn bitor_assign(&mut self, rhs: NodeFlags) {
        self.0 |= rhs.0;
    }
}

/// A single node as stored in the arena
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    type_name: String,
    span: Span,
    text: Option<String>,
    field: Option<String>,
    flags: NodeFlags,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Description of a node to be added to a [`TreeBuilder`]
#[derive(Debug, Clone)]
pub struct NodeSpec {
    kind: NodeKind,
    type_name: Option<String>,
    span: Span,
    text: Option<String>,
    field: Option<String>,
    flags: NodeFlags,
}

impl NodeSpec {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            type_name: None,
            span,
            text: None,
            field: None,
            flags: NodeFlags::NONE,
        }
    }

    pub fn flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Raw type name from the parser, when it differs from the kind's name
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    /// Identifier name, operator, declaration keyword or literal raw text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Name of the parent field this node occupies (e.g. `"init"`)
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// An immutable syntax tree; the root is always the first node
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Look up a node by id
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.root().descendants()
    }
}

/// Builds a [`SyntaxTree`] from nested open/close calls
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node; subsequent nodes become its children until [`close`](Self::close)
    pub fn open(&mut self, spec: NodeSpec) -> Result<NodeId, TreeError> {
        let parent = self.stack.last().copied();
        if parent.is_none() && !self.nodes.is_empty() {
            return Err(TreeError::MultipleRoots);
        }

        let id = NodeId(self.nodes.len() as u32);
        let type_name = spec
            .type_name
            .unwrap_or_else(|| spec.kind.as_str().to_string());
        self.nodes.push(Node {
            kind: spec.kind,
            type_name,
            span: spec.span,
            text: spec.text,
            field: spec.field,
            flags: spec.flags,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.stack.push(id);
        Ok(id)
    }

    /// Close the most recently opened node
    pub fn close(&mut self) -> Result<NodeId, TreeError> {
        self.stack.pop().ok_or(TreeError::NothingOpen)
    }

    /// Add a node without children
    pub fn leaf(&mut self, spec: NodeSpec) -> Result<NodeId, TreeError> {
        self.open(spec)?;
        self.close()
    }

    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::Empty);
        }
        if !self.stack.is_empty() {
            return Err(TreeError::Unclosed(self.stack.len()));
        }
        Ok(SyntaxTree { nodes: self.nodes })
    }
}

/// Borrowed handle to a node and its tree
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn node(&self) -> &'t Node {
        &self.tree.nodes[self.id.index()]
    }

    fn wrap(&self, id: NodeId) -> NodeRef<'t> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.node().kind == kind
    }

    pub fn type_name(&self) -> &'t str {
        &self.node().type_name
    }

    pub fn span(&self) -> Span {
        self.node().span
    }

    /// Position findings on this node are reported at
    pub fn location(&self) -> Location {
        self.node().span.start
    }

    pub fn text(&self) -> Option<&'t str> {
        self.node().text.as_deref()
    }

    pub fn text_is(&self, expected: &str) -> bool {
        self.text() == Some(expected)
    }

    pub fn field(&self) -> Option<&'t str> {
        self.node().field.as_deref()
    }

    pub fn flags(&self) -> NodeFlags {
        self.node().flags
    }

    pub fn has_flag(&self, flag: NodeFlags) -> bool {
        self.node().flags.contains(flag)
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.node().parent.map(|id| self.wrap(id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    /// First child stored under `field`
    pub fn child(&self, field: &str) -> Option<NodeRef<'t>> {
        self.children().find(|c| c.field() == Some(field))
    }

    /// All children stored under `field`, in order
    pub fn children_in<'f>(&self, field: &'f str) -> impl Iterator<Item = NodeRef<'t>> + 'f
    where
        't: 'f,
    {
        self.children().filter(move |c| c.field() == Some(field))
    }

    fn position_in_parent(&self) -> Option<(NodeRef<'t>, usize)> {
        let parent = self.parent()?;
        let index = parent.node().children.iter().position(|&id| id == self.id)?;
        Some((parent, index))
    }

    pub fn prev_sibling(&self) -> Option<NodeRef<'t>> {
        let (parent, index) = self.position_in_parent()?;
        let id = *parent.node().children.get(index.checked_sub(1)?)?;
        Some(self.wrap(id))
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'t>> {
        let (parent, index) = self.position_in_parent()?;
        let id = *parent.node().children.get(index + 1)?;
        Some(self.wrap(id))
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// This node and everything below it, in pre-order
    pub fn descendants(&self) -> Descendants<'t> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Pre-order iterator over a subtree
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.index()];
        self.stack.extend(node.children.iter().rev().copied());
        Some(NodeRef {
            tree: self.tree,
            id,
        })
    }
}
