//! Per-file state handed to every rule invocation

use std::path::Path;

use crate::roles::{IdentifierRole, RoleTable};
use crate::tree::{NodeRef, SyntaxTree};

/// Read-only view of the file being walked
///
/// Owned by the walker for the duration of one traversal. The source text is
/// empty when the provider only produced a tree.
pub struct Context<'a> {
    path: &'a Path,
    source: &'a str,
    tree: &'a SyntaxTree,
    roles: RoleTable,
}

impl<'a> Context<'a> {
    /// Build a context, inferring identifier roles once for the whole file
    pub fn new(path: &'a Path, source: &'a str, tree: &'a SyntaxTree) -> Self {
        Self {
            path,
            source,
            tree,
            roles: RoleTable::infer(tree),
        }
    }

    pub fn path(&self) -> &'a Path {
        self.path
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn root(&self) -> NodeRef<'a> {
        self.tree.root()
    }

    /// Role of an identifier at a declaration site; `None` for references
    pub fn role(&self, node: NodeRef<'_>) -> Option<IdentifierRole> {
        self.roles.get(node.id())
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Text of a 1-based source line, if the source is available
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        let index = (line as usize).checked_sub(1)?;
        self.source.lines().nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use crate::span::Span;
    use crate::tree::{NodeSpec, TreeBuilder};

    #[test]
    fn test_line_text() {
        let mut b = TreeBuilder::new();
        b.leaf(NodeSpec::new(NodeKind::Program, Span::at(1, 1))).unwrap();
        let tree = b.finish().unwrap();
        let ctx = Context::new(Path::new("a.js"), "let a = 1;\nlet b = 2;\n", &tree);

        assert_eq!(ctx.line_text(1), Some("let a = 1;"));
        assert_eq!(ctx.line_text(2), Some("let b = 2;"));
        assert_eq!(ctx.line_text(0), None);
        assert_eq!(ctx.line_text(3), None);
        assert_eq!(ctx.path(), Path::new("a.js"));
    }

    #[test]
    fn test_role_lookup() {
        let mut b = TreeBuilder::new();
        b.open(NodeSpec::new(NodeKind::ClassDeclaration, Span::at(1, 1))).unwrap();
        b.leaf(NodeSpec::new(NodeKind::Identifier, Span::at(1, 7)).text("Widget").field("id"))
            .unwrap();
        b.close().unwrap();
        let tree = b.finish().unwrap();
        let ctx = Context::new(Path::new("a.js"), "", &tree);

        let id = ctx.root().child("id").unwrap();
        assert_eq!(ctx.role(id), Some(IdentifierRole::Constructor));
        assert_eq!(ctx.role(ctx.root()), None);
    }
}
