//! GitHub Actions annotations output format

use super::Formatter;
use crate::finding::Severity;
use crate::report::Report;

pub struct GithubFormatter;

impl Formatter for GithubFormatter {
    fn format(&self, report: &Report) -> String {
        let mut output = String::new();

        for file in report.files() {
            let path = file.path.display();
            for finding in &file.findings {
                let level = match finding.severity() {
                    Severity::Must => "error",
                    Severity::Should => "warning",
                };
                // ::error file={name},line={line},col={col},title={rule}::{message}
                output.push_str(&format!(
                    "::{} file={},line={},col={},title={}::{}\n",
                    level,
                    path,
                    finding.line(),
                    finding.column(),
                    finding.rule_id(),
                    escape_message(finding.message())
                ));
            }
            for crash in &file.crashes {
                output.push_str(&format!(
                    "::error file={},line={},col={},title={} crashed::{}\n",
                    path,
                    crash.location.line,
                    crash.location.column,
                    crash.rule_id,
                    escape_message(&crash.cause)
                ));
            }
            if file.abandoned {
                output.push_str(&format!(
                    "::error file={}::not scanned before the run deadline\n",
                    path
                ));
            }
        }

        output
    }
}

/// Escape special characters for GitHub Actions annotations
fn escape_message(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
