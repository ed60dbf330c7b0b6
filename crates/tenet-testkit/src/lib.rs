//! tenet-testkit: helpers for testing rules without a parser
//!
//! - [`sketch`]: a small DSL for building syntax trees by hand
//! - [`fixtures`]: rules that panic, error or skip subtrees on purpose
//! - [`check`] / [`run`]: walk a tree with one rule or a whole registry

pub mod fixtures;
pub mod sketch;

pub use sketch::*;

use std::collections::BTreeMap;
use std::path::Path;

use tenet_core::{FileOutcome, Finding, Rule, RuleRegistry, SyntaxTree, Walker};

/// Path every helper reports findings under
pub const TEST_PATH: &str = "test.js";

/// Walk `tree` with `rule` alone, enabled even if it is off by default
pub fn check(rule: impl Rule + 'static, tree: &SyntaxTree) -> Vec<Finding> {
    let id = rule.id().to_string();
    let mut registry = RuleRegistry::new();
    registry
        .register(Box::new(rule))
        .expect("empty registry accepts any rule");
    let rules = registry
        .select(&BTreeMap::new(), &[id])
        .expect("the registered rule is selectable");
    Walker::new(&rules)
        .walk(Path::new(TEST_PATH), "", tree)
        .findings
}

/// Walk `tree` with the default selection of `registry`
pub fn run(registry: &RuleRegistry, tree: &SyntaxTree) -> FileOutcome {
    let rules = registry
        .select(&BTreeMap::new(), &[])
        .expect("registry has default rules");
    Walker::new(&rules).walk(Path::new(TEST_PATH), "", tree)
}

/// `(line, column, message)` of each finding, for compact assertions
pub fn positions(findings: &[Finding]) -> Vec<(u32, u32, String)> {
    findings
        .iter()
        .map(|f| (f.line(), f.column(), f.message().to_string()))
        .collect()
}
