//! tenet-core: rule engine for style-conformance checking
//!
//! This crate holds the language-neutral parts of the checker:
//! - [`SyntaxTree`]: an arena tree produced by a [`SyntaxProvider`]
//! - [`Rule`] and [`RuleRegistry`]: conventions and their selection
//! - [`Walker`]: a single pre-order pass dispatching rules by node kind
//! - [`Report`]: deterministic aggregation, rendering and exit status
//!
//! Parsing lives outside the engine. See the `tenet-estree` crate for an
//! ESTree provider and `tenet-rules` for the built-in rules.

pub mod context;
pub mod error;
pub mod finding;
pub mod kind;
pub mod output;
pub mod provider;
pub mod registry;
pub mod report;
pub mod roles;
pub mod rule;
pub mod span;
pub mod tree;
pub mod walker;

pub use context::Context;
pub use error::{ConfigError, DuplicateRuleError, ParseError, RuleError, TreeError};
pub use finding::{Finding, RuleCrashed, Severity, PARSE_ERROR_RULE};
pub use kind::NodeKind;
pub use output::{format_report, Formatter, OutputFormat};
pub use provider::{ParsedSource, SyntaxProvider};
pub use registry::{ActiveRule, RuleOverride, RuleRegistry, RuleSet};
pub use report::{ExitStatus, FileOutcome, FileReport, Report, Summary};
pub use roles::{IdentifierRole, RoleTable};
pub use rule::{Flow, Outcome, Rule, Violation};
pub use span::{Location, Span};
pub use tree::{NodeFlags, NodeId, NodeRef, NodeSpec, SyntaxTree, TreeBuilder};
pub use walker::Walker;
