//! The seam between the engine and whatever parses source text

use std::path::Path;

use crate::error::ParseError;
use crate::tree::SyntaxTree;

/// A parsed file: the tree plus the source text when it is available
#[derive(Debug)]
pub struct ParsedSource {
    /// Empty when the provider only had a serialized tree to work from
    pub source: String,
    pub tree: SyntaxTree,
}

/// Produces syntax trees for files
///
/// The engine never parses text itself. Implementations wrap an external
/// parser, or read trees an external parser already serialized.
pub trait SyntaxProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this provider understands `path`
    fn accepts(&self, path: &Path) -> bool;

    /// Parse one file
    fn parse(&self, path: &Path) -> Result<ParsedSource, ParseError>;
}
