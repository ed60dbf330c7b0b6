//! tenet-estree: syntax trees from ESTree JSON
//!
//! ESTree is the JSON AST shape emitted by acorn, espree and friends. This
//! crate converts such a document (with `locations: true`) into a
//! [`tenet_core::SyntaxTree`] and provides two [`tenet_core::SyntaxProvider`]s:
//! - [`EstreeJsonProvider`] reads trees serialized to `*.estree.json`
//! - [`CommandProvider`] runs a parser command on a source file and reads its
//!   stdout

pub mod convert;
pub mod provider;

pub use convert::{tree_from_json, tree_from_value, EstreeError};
pub use provider::{CommandProvider, EstreeJsonProvider, ESTREE_SUFFIX};
