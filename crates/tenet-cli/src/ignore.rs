//! `tenet-ignore` comments in the paired source file
//!
//! A directive is a line or block comment whose text starts with one of:
//!
//! | Marker               | Suppresses                              |
//! |----------------------|-----------------------------------------|
//! | `tenet-ignore-file`  | every line of the file                  |
//! | `tenet-ignore-line`  | the line the comment sits on            |
//! | `tenet-ignore`       | the line after the comment              |
//!
//! A bare marker covers all rules; `: rule-a, rule-b` narrows it. Only
//! `tenet-ignore-line` may trail code on the same line. Findings for files
//! without source text pass through untouched, and `parse-error` findings are
//! always kept.

use std::collections::{HashMap, HashSet};

use tenet_core::{Finding, PARSE_ERROR_RULE};

/// Which lines a directive applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    File,
    Line,
    NextLine,
}

/// Rules a directive silences
#[derive(Debug, Clone, PartialEq, Eq)]
enum Suppression {
    All,
    Rules(HashSet<String>),
}

impl Suppression {
    /// Widen `self` by `other`; `All` absorbs any rule list
    fn merge(&mut self, other: Suppression) {
        if let Suppression::Rules(mine) = self {
            match other {
                Suppression::All => *self = Suppression::All,
                Suppression::Rules(theirs) => mine.extend(theirs),
            }
        }
    }

    fn covers(&self, rule: &str) -> bool {
        match self {
            Suppression::All => true,
            Suppression::Rules(rules) => rules.contains(rule),
        }
    }
}

/// Suppressions collected from one source file
#[derive(Debug, Default)]
pub struct IgnoreDirectives {
    file: Option<Suppression>,
    lines: HashMap<u32, Suppression>,
}

impl IgnoreDirectives {
    pub fn parse(source: &str) -> Self {
        let mut directives = IgnoreDirectives::default();

        for (line, text) in (1u32..).zip(source.lines()) {
            let Some((scope, suppression)) = directive(text.trim()) else {
                continue;
            };
            match scope {
                Scope::File => match &mut directives.file {
                    Some(existing) => existing.merge(suppression),
                    None => directives.file = Some(suppression),
                },
                Scope::Line => directives.add_line(line, suppression),
                Scope::NextLine => directives.add_line(line + 1, suppression),
            }
        }

        directives
    }

    fn add_line(&mut self, line: u32, suppression: Suppression) {
        match self.lines.get_mut(&line) {
            Some(existing) => existing.merge(suppression),
            None => {
                self.lines.insert(line, suppression);
            }
        }
    }

    /// Whether a finding of `rule` on `line` is silenced
    pub fn should_ignore(&self, line: u32, rule: &str) -> bool {
        if rule == PARSE_ERROR_RULE {
            return false;
        }
        self.file.as_ref().is_some_and(|s| s.covers(rule))
            || self.lines.get(&line).is_some_and(|s| s.covers(rule))
    }

    pub fn has_any(&self) -> bool {
        self.file.is_some() || !self.lines.is_empty()
    }

    pub fn filter(&self, findings: Vec<Finding>) -> Vec<Finding> {
        if !self.has_any() {
            return findings;
        }
        findings
            .into_iter()
            .filter(|f| !self.should_ignore(f.line(), f.rule_id()))
            .collect()
    }
}

const COMMENT_OPENERS: [&str; 2] = ["//", "/*"];

/// Recognise a directive in a trimmed source line
fn directive(text: &str) -> Option<(Scope, Suppression)> {
    for opener in COMMENT_OPENERS {
        if let Some(rest) = text.strip_prefix(opener) {
            let rest = rest.trim_start();
            if let Some(rules) = rest.strip_prefix("tenet-ignore-file") {
                return Some((Scope::File, suppression(rules)));
            }
        }
    }

    // The only marker allowed after code
    for opener in COMMENT_OPENERS {
        let marker = format!("{opener} tenet-ignore-line");
        if let Some(at) = text.find(&marker) {
            return Some((Scope::Line, suppression(&text[at + marker.len()..])));
        }
    }

    for opener in COMMENT_OPENERS {
        if let Some(rest) = text.strip_prefix(opener) {
            if let Some(rules) = rest.trim_start().strip_prefix("tenet-ignore") {
                if !rules.starts_with('-') {
                    return Some((Scope::NextLine, suppression(rules)));
                }
            }
        }
    }

    None
}

/// `: a, b */` names rules; anything else silences all of them
fn suppression(rest: &str) -> Suppression {
    let rest = rest.trim().trim_end_matches("*/").trim();
    let Some(list) = rest.strip_prefix(':') else {
        return Suppression::All;
    };
    let rules: HashSet<String> = list
        .split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(str::to_string)
        .collect();
    if rules.is_empty() {
        Suppression::All
    } else {
        Suppression::Rules(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenet_core::{Location, Severity};

    #[test]
    fn test_ignore_file_all() {
        let source = "'use strict';\n// tenet-ignore-file\nvar x = 1;";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(3, "no-var-declaration"));
        assert!(directives.should_ignore(3, "prefer-template"));
    }

    #[test]
    fn test_ignore_file_specific() {
        let source = "// tenet-ignore-file: no-var-declaration, prefer-template\nvar x = 1;";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(2, "no-var-declaration"));
        assert!(directives.should_ignore(2, "prefer-template"));
        assert!(!directives.should_ignore(2, "casing-convention"));
    }

    #[test]
    fn test_ignore_next_line_all() {
        let source = "let a = 1;\n// tenet-ignore\nvar x = 1;";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(3, "no-var-declaration"));
        assert!(!directives.should_ignore(2, "no-var-declaration"));
    }

    #[test]
    fn test_ignore_next_line_specific() {
        let source = "// tenet-ignore: no-var-declaration\nvar x = 1, y = 2;\nvar z;";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(2, "no-var-declaration"));
        assert!(!directives.should_ignore(2, "single-binding-per-declaration"));
        assert!(!directives.should_ignore(3, "no-var-declaration"));
    }

    #[test]
    fn test_ignore_line_inline() {
        let source = "let a = 1;\nif (a == b) {} // tenet-ignore-line: prefer-strict-equality";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(2, "prefer-strict-equality"));
        assert!(!directives.should_ignore(2, "no-var-declaration"));
    }

    #[test]
    fn test_block_comment_style() {
        let source = "/* tenet-ignore: casing-convention */\nclass widget {}";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(2, "casing-convention"));
        assert!(!directives.should_ignore(2, "no-class-properties"));
    }

    #[test]
    fn test_ignore_all_is_not_narrowed() {
        let source = "// tenet-ignore-file\n// tenet-ignore-file: prefer-template\nvar x;";
        let directives = IgnoreDirectives::parse(source);
        assert!(directives.should_ignore(3, "no-var-declaration"));
    }

    #[test]
    fn test_parse_errors_are_never_ignored() {
        let directives = IgnoreDirectives::parse("// tenet-ignore-file\n");
        assert!(!directives.should_ignore(1, PARSE_ERROR_RULE));
    }

    #[test]
    fn test_no_directives() {
        let directives = IgnoreDirectives::parse("var x = 1;");
        assert!(!directives.should_ignore(1, "no-var-declaration"));
        assert!(!directives.has_any());
    }

    #[test]
    fn test_filter_findings() {
        let source = "// tenet-ignore\nvar x = 1;\nvar y = 2;";
        let findings = vec![
            Finding::new("no-var-declaration", Severity::Must, Location::new(2, 1), "var"),
            Finding::new("no-var-declaration", Severity::Must, Location::new(3, 1), "var"),
        ];
        let kept = IgnoreDirectives::parse(source).filter(findings);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].line(), 3);
    }
}
