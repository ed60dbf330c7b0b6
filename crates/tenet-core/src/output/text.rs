//! Plain line-oriented output format
//!
//! One line per finding, then one line per crash, file by file:
//!
//! ```text
//! src/app.js:3:1: [MUST] no-var-declaration: Use let or const instead of var
//! src/app.js:9:5: [CRASH] prefer-template: panicked: index out of bounds
//! ```

use super::Formatter;
use crate::report::Report;

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, report: &Report) -> String {
        let mut output = String::new();

        for file in report.files() {
            let path = file.path.display();
            for finding in &file.findings {
                output.push_str(&format!(
                    "{}:{}: [{}] {}: {}\n",
                    path,
                    finding.location(),
                    finding.severity(),
                    finding.rule_id(),
                    finding.message()
                ));
            }
            for crash in &file.crashes {
                output.push_str(&format!(
                    "{}:{}: [CRASH] {}: {}\n",
                    path, crash.location, crash.rule_id, crash.cause
                ));
            }
            if file.abandoned {
                output.push_str(&format!(
                    "{}:1:1: [ABANDONED] not scanned before the run deadline\n",
                    path
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{Finding, RuleCrashed, Severity};
    use crate::report::FileOutcome;
    use crate::span::Location;
    use crate::testing::single_rule_set;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_text_lines() {
        let registry = single_rule_set();
        let rules = registry.select(&Default::default(), &[]).unwrap();
        let mut outcome = FileOutcome::new("src/app.js");
        outcome.findings.push(Finding::new(
            "stub",
            Severity::Must,
            Location::new(3, 1),
            "Use let or const",
        ));
        outcome.crashes.push(RuleCrashed {
            rule_id: "stub".into(),
            location: Location::new(9, 5),
            cause: "panicked: boom".into(),
        });

        let report = Report::build(
            vec![outcome, FileOutcome::abandoned("late.js")],
            &rules,
        );
        assert_eq!(
            TextFormatter.format(&report),
            "late.js:1:1: [ABANDONED] not scanned before the run deadline\n\
             src/app.js:3:1: [MUST] stub: Use let or const\n\
             src/app.js:9:5: [CRASH] stub: panicked: boom\n"
        );
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        let registry = single_rule_set();
        let rules = registry.select(&Default::default(), &[]).unwrap();
        let report = Report::build(vec![FileOutcome::new("clean.js")], &rules);
        assert_eq!(TextFormatter.format(&report), "");
    }

    fn arb_finding() -> impl Strategy<Value = (String, Finding)> {
        (
            prop::sample::select(vec!["a.js", "b.js", "c/d.js"]),
            1u32..20,
            1u32..5,
            prop::sample::select(vec!["x", "y", "z"]),
        )
            .prop_map(|(path, line, column, message)| {
                (
                    path.to_string(),
                    Finding::new("stub", Severity::Must, Location::new(line, column), message),
                )
            })
    }

    fn outcomes(items: &[(String, Finding)]) -> Vec<FileOutcome> {
        items
            .iter()
            .map(|(path, finding)| {
                let mut outcome = FileOutcome::new(path);
                outcome.findings.push(finding.clone());
                outcome
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_render_is_independent_of_arrival_order(
            items in prop::collection::vec(arb_finding(), 0..40)
        ) {
            let registry = single_rule_set();
            let rules = registry.select(&Default::default(), &[]).unwrap();

            let forward = Report::build(outcomes(&items), &rules);
            let mut reversed_items = items.clone();
            reversed_items.reverse();
            let reversed = Report::build(outcomes(&reversed_items), &rules);

            prop_assert_eq!(TextFormatter.format(&forward), TextFormatter.format(&reversed));
        }

        #[test]
        fn prop_findings_are_sorted_within_each_file(
            items in prop::collection::vec(arb_finding(), 0..40)
        ) {
            let registry = single_rule_set();
            let rules = registry.select(&Default::default(), &[]).unwrap();
            let report = Report::build(outcomes(&items), &rules);

            for file in report.files() {
                for pair in file.findings.windows(2) {
                    prop_assert!(pair[0].location() <= pair[1].location());
                    prop_assert!(pair[0] != pair[1]);
                }
            }
            let paths: Vec<_> = report.files().iter().map(|f| f.path.clone()).collect();
            let mut sorted = paths.clone();
            sorted.sort();
            prop_assert_eq!(paths, sorted);
        }
    }
}
