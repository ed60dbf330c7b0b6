//! Rule registry and configuration-driven rule selection

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{ConfigError, DuplicateRuleError};
use crate::finding::{Severity, PARSE_ERROR_RULE};
use crate::rule::Rule;

/// Per-rule configuration entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleOverride {
    pub enabled: Option<bool>,
    pub severity: Option<Severity>,
}

/// Ordered collection of rules with unique ids
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule; ids must be unique
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Result<(), DuplicateRuleError> {
        if self.contains(rule.id()) {
            return Err(DuplicateRuleError(rule.id().to_string()));
        }
        debug!("registered rule {}", rule.id());
        self.rules.push(rule);
        Ok(())
    }

    /// All rules in registration order
    pub fn all(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.all().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.iter().any(|r| r.id() == id)
    }

    /// Get all rule ids
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the active rule set
    ///
    /// `overrides` maps rule ids to configuration entries; `only` is an
    /// explicit rule list that, when non-empty, replaces the default
    /// selection. Unknown ids in either fail before anything is scanned.
    pub fn select(
        &self,
        overrides: &BTreeMap<String, RuleOverride>,
        only: &[String],
    ) -> Result<RuleSet<'_>, ConfigError> {
        for id in overrides.keys().chain(only.iter()) {
            if !self.contains(id) {
                return Err(ConfigError::UnknownRule(id.clone()));
            }
        }

        let only: HashSet<&str> = only.iter().map(String::as_str).collect();
        let mut active = Vec::new();

        for (index, rule) in self.all().enumerate() {
            let entry = overrides.get(rule.id()).copied().unwrap_or_default();
            let enabled = if only.is_empty() {
                entry.enabled.unwrap_or_else(|| rule.enabled_by_default())
            } else {
                only.contains(rule.id()) && entry.enabled != Some(false)
            };
            if !enabled {
                continue;
            }
            active.push(ActiveRule {
                rule,
                severity: entry.severity.unwrap_or_else(|| rule.severity()),
                rank: index + 1,
            });
        }

        if active.is_empty() {
            return Err(ConfigError::NoRulesEnabled);
        }
        Ok(RuleSet { rules: active })
    }
}

/// A rule selected for a run, with its effective severity
#[derive(Clone, Copy)]
pub struct ActiveRule<'r> {
    rule: &'r dyn Rule,
    severity: Severity,
    rank: usize,
}

impl<'r> ActiveRule<'r> {
    pub fn rule(&self) -> &'r dyn Rule {
        self.rule
    }

    pub fn id(&self) -> &'static str {
        self.rule.id()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// 1-based registration index
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// The rules active for one run, in registration order
#[derive(Clone)]
pub struct RuleSet<'r> {
    rules: Vec<ActiveRule<'r>>,
}

impl<'r> RuleSet<'r> {
    pub fn iter(&self) -> impl Iterator<Item = &ActiveRule<'r>> + '_ {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Sort rank of a rule id; parse errors sort before every rule
    pub fn rank(&self, id: &str) -> usize {
        if id == PARSE_ERROR_RULE {
            return 0;
        }
        self.rules
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r.rank)
            .unwrap_or(usize::MAX)
    }

    /// Stable description of ids and severities, for cache keys
    pub fn fingerprint(&self) -> String {
        self.rules
            .iter()
            .map(|r| format!("{}={}", r.id(), r.severity))
            .collect::<Vec<_>>()
            .join(";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::error::RuleError;
    use crate::kind::NodeKind;
    use crate::rule::Outcome;
    use crate::tree::NodeRef;

    struct Named {
        id: &'static str,
        default_on: bool,
    }

    impl Rule for Named {
        fn id(&self) -> &'static str {
            self.id
        }

        fn description(&self) -> &'static str {
            "test rule"
        }

        fn severity(&self) -> Severity {
            Severity::Must
        }

        fn applies_to(&self) -> &'static [NodeKind] {
            &[NodeKind::Identifier]
        }

        fn enabled_by_default(&self) -> bool {
            self.default_on
        }

        fn evaluate(&self, _node: NodeRef<'_>, _ctx: &Context<'_>) -> Result<Outcome, RuleError> {
            Ok(Outcome::pass())
        }
    }

    fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry
            .register(Box::new(Named { id: "alpha", default_on: true }))
            .unwrap();
        registry
            .register(Box::new(Named { id: "beta", default_on: true }))
            .unwrap();
        registry
            .register(Box::new(Named { id: "gamma", default_on: false }))
            .unwrap();
        registry
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = registry();
        let err = registry
            .register(Box::new(Named { id: "beta", default_on: true }))
            .unwrap_err();
        assert_eq!(err, DuplicateRuleError("beta".to_string()));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_all_in_registration_order() {
        let registry = registry();
        assert_eq!(registry.ids(), vec!["alpha", "beta", "gamma"]);
        assert!(registry.get("beta").is_some());
        assert!(registry.get("delta").is_none());
    }

    #[test]
    fn test_select_defaults() {
        let registry = registry();
        let set = registry.select(&BTreeMap::new(), &[]).unwrap();
        assert_eq!(set.ids(), vec!["alpha", "beta"]);
        assert_eq!(set.rank("alpha"), 1);
        assert_eq!(set.rank("beta"), 2);
        assert_eq!(set.rank(PARSE_ERROR_RULE), 0);
        assert_eq!(set.rank("gamma"), usize::MAX);
    }

    #[test]
    fn test_select_with_overrides() {
        let registry = registry();
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "alpha".to_string(),
            RuleOverride {
                enabled: Some(false),
                severity: None,
            },
        );
        overrides.insert(
            "gamma".to_string(),
            RuleOverride {
                enabled: Some(true),
                severity: Some(Severity::Should),
            },
        );

        let set = registry.select(&overrides, &[]).unwrap();
        assert_eq!(set.ids(), vec!["beta", "gamma"]);
        let gamma = set.iter().find(|r| r.id() == "gamma").unwrap();
        assert_eq!(gamma.severity(), Severity::Should);
        assert_eq!(gamma.rank(), 3);
        assert_eq!(set.fingerprint(), "beta=MUST;gamma=SHOULD");
    }

    #[test]
    fn test_select_only() {
        let registry = registry();
        let set = registry
            .select(&BTreeMap::new(), &["gamma".to_string()])
            .unwrap();
        assert_eq!(set.ids(), vec!["gamma"]);
    }

    #[test]
    fn test_unknown_rule_in_config_fails() {
        let registry = registry();
        let mut overrides = BTreeMap::new();
        overrides.insert("no-such-rule".to_string(), RuleOverride::default());
        assert_eq!(
            registry.select(&overrides, &[]).err(),
            Some(ConfigError::UnknownRule("no-such-rule".to_string()))
        );
        assert_eq!(
            registry.select(&BTreeMap::new(), &["nope".to_string()]).err(),
            Some(ConfigError::UnknownRule("nope".to_string()))
        );
    }

    #[test]
    fn test_everything_disabled_fails() {
        let registry = registry();
        let overrides: BTreeMap<_, _> = ["alpha", "beta"]
            .into_iter()
            .map(|id| {
                (
                    id.to_string(),
                    RuleOverride {
                        enabled: Some(false),
                        severity: None,
                    },
                )
            })
            .collect();
        assert_eq!(
            registry.select(&overrides, &[]).err(),
            Some(ConfigError::NoRulesEnabled)
        );
    }
}
