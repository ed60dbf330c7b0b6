//! Built-in rule set

use tenet_core::{DuplicateRuleError, Rule, RuleRegistry};

use crate::casing_convention::CasingConventionRule;
use crate::no_class_properties::NoClassPropertiesRule;
use crate::no_nested_ternary::NoNestedTernaryRule;
use crate::no_ternary::NoTernaryRule;
use crate::no_var_declaration::NoVarDeclarationRule;
use crate::prefer_literal_construction::PreferLiteralConstructionRule;
use crate::prefer_strict_equality::PreferStrictEqualityRule;
use crate::prefer_template::PreferTemplateRule;
use crate::private_members_last::PrivateMembersLastRule;
use crate::single_binding_per_declaration::SingleBindingPerDeclarationRule;

/// All built-in rules in registration order
///
/// The order is the tie-break for findings at the same location.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(NoVarDeclarationRule),
        Box::new(SingleBindingPerDeclarationRule),
        Box::new(PreferStrictEqualityRule),
        Box::new(CasingConventionRule),
        Box::new(PreferLiteralConstructionRule),
        Box::new(PreferTemplateRule),
        Box::new(NoNestedTernaryRule),
        Box::new(NoTernaryRule),
        Box::new(NoClassPropertiesRule),
        Box::new(PrivateMembersLastRule),
    ]
}

/// A registry holding every built-in rule
pub fn builtin_registry() -> Result<RuleRegistry, DuplicateRuleError> {
    let mut registry = RuleRegistry::new();
    for rule in builtin_rules() {
        registry.register(rule)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tenet_core::{NodeKind, Report, Severity};
    use tenet_testkit::fixtures::{ErroringRule, PanickingRule, SkippingRule};
    use tenet_testkit::*;

    #[test]
    fn test_registration_order() {
        let registry = builtin_registry().unwrap();
        assert_eq!(
            registry.ids(),
            vec![
                "no-var-declaration",
                "single-binding-per-declaration",
                "prefer-strict-equality",
                "casing-convention",
                "prefer-literal-construction",
                "prefer-template",
                "no-nested-ternary",
                "no-ternary",
                "no-class-properties",
                "private-members-last",
            ]
        );
    }

    #[test]
    fn test_default_selection() {
        let registry = builtin_registry().unwrap();
        let rules = registry.select(&BTreeMap::new(), &[]).unwrap();
        assert_eq!(rules.len(), 7);
        assert!(!rules.ids().contains(&"no-ternary"));
    }

    #[test]
    fn test_descriptions_are_present() {
        for rule in builtin_rules() {
            assert!(!rule.description().is_empty(), "{} has no description", rule.id());
            assert!(!rule.applies_to().is_empty(), "{} applies to nothing", rule.id());
        }
    }

    #[test]
    fn test_clean_program_has_no_findings() {
        let registry = builtin_registry().unwrap();
        let tree = program(vec![var_decl(
            "const",
            (1, 1),
            vec![declarator("total", (1, 7), Some(num(0, (1, 15))))],
        )])
        .build();
        let outcome = run(&registry, &tree);
        assert!(outcome.findings.is_empty());
        assert!(outcome.crashes.is_empty());
    }

    #[test]
    fn test_single_var_yields_one_finding() {
        let registry = builtin_registry().unwrap();
        let tree = program(vec![var_decl(
            "var",
            (2, 1),
            vec![declarator("total", (2, 5), Some(num(0, (2, 13))))],
        )])
        .build();
        let outcome = run(&registry, &tree);
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].rule_id(), "no-var-declaration");
        assert_eq!(outcome.findings[0].severity(), Severity::Must);
        assert_eq!(outcome.findings[0].line(), 2);
    }

    #[test]
    fn test_var_with_two_bindings_in_rank_order() {
        // var x = 1, y = 2;
        let registry = builtin_registry().unwrap();
        let tree = program(vec![var_decl(
            "var",
            (1, 1),
            vec![
                declarator("x", (1, 5), Some(num(1, (1, 9)))),
                declarator("y", (1, 12), Some(num(2, (1, 16)))),
            ],
        )])
        .build();
        let rules = registry.select(&BTreeMap::new(), &[]).unwrap();
        let report = Report::build(vec![run(&registry, &tree)], &rules);

        let found: Vec<_> = report
            .findings()
            .map(|(_, f)| (f.rule_id(), f.line(), f.column()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("no-var-declaration", 1, 1),
                ("single-binding-per-declaration", 1, 1),
            ]
        );
    }

    #[test]
    fn test_crashing_rules_do_not_hide_builtin_findings() {
        // var total = 0;
        let mut registry = builtin_registry().unwrap();
        registry
            .register(Box::new(PanickingRule {
                id: "panics",
                kinds: &[NodeKind::VariableDeclaration],
            }))
            .unwrap();
        registry
            .register(Box::new(ErroringRule {
                id: "errors",
                kinds: &[NodeKind::Identifier],
            }))
            .unwrap();
        let tree = program(vec![var_decl(
            "var",
            (1, 1),
            vec![declarator("total", (1, 5), Some(num(0, (1, 13))))],
        )])
        .build();

        let outcome = run(&registry, &tree);
        let found: Vec<_> = outcome.findings.iter().map(|f| f.rule_id()).collect();
        assert_eq!(found, vec!["no-var-declaration"]);
        let crashed: Vec<_> = outcome
            .crashes
            .iter()
            .map(|c| (c.rule_id.as_str(), c.location.line, c.location.column))
            .collect();
        assert_eq!(crashed, vec![("panics", 1, 1), ("errors", 1, 5)]);

        let rules = registry.select(&BTreeMap::new(), &[]).unwrap();
        let report = Report::build(vec![outcome], &rules);
        assert_eq!(report.exit_status().code(), 2);
    }

    #[test]
    fn test_skipped_subtree_hides_nested_findings() {
        // const bad_name = 0;
        let tree = program(vec![var_decl(
            "const",
            (1, 1),
            vec![declarator("bad_name", (1, 7), Some(num(0, (1, 18))))],
        )])
        .build();

        let registry = builtin_registry().unwrap();
        let found: Vec<_> = run(&registry, &tree)
            .findings
            .iter()
            .map(|f| f.rule_id().to_string())
            .collect();
        assert_eq!(found, vec!["casing-convention"]);

        let mut registry = builtin_registry().unwrap();
        registry
            .register(Box::new(SkippingRule {
                id: "skips",
                kinds: &[NodeKind::VariableDeclaration],
            }))
            .unwrap();
        let outcome = run(&registry, &tree);
        let found: Vec<_> = outcome.findings.iter().map(|f| f.rule_id()).collect();
        assert_eq!(found, vec!["skips"]);
        assert!(outcome.crashes.is_empty());
    }
}
