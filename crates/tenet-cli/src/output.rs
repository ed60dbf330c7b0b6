//! Terminal output that is not part of the report itself

use colored::*;

use tenet_core::{Report, RuleRegistry, Severity};

/// Print the registry as a table
pub fn print_rules(registry: &RuleRegistry) {
    println!("{}", "Available rules:".bold());
    for rule in registry.all() {
        let severity = format!("{:<6}", rule.severity().as_str());
        let severity = match rule.severity() {
            Severity::Must => severity.red(),
            Severity::Should => severity.yellow(),
        };
        let state = if rule.enabled_by_default() {
            "on ".normal()
        } else {
            "off".dimmed()
        };
        println!(
            "  {} {} {}  {}",
            format!("{:<32}", rule.id()).green(),
            severity,
            state,
            rule.description()
        );
    }
}

/// Print the run summary to stderr, keeping stdout for the report
pub fn print_summary(report: &Report) {
    let summary = report.summary();
    eprintln!();
    eprintln!("{}", "Summary".bold().underline());
    eprintln!("  Files checked: {}", summary.files);
    if summary.errors > 0 {
        eprintln!("  Errors: {}", summary.errors.to_string().red());
    } else {
        eprintln!("  Errors: 0");
    }
    if summary.warnings > 0 {
        eprintln!("  Warnings: {}", summary.warnings.to_string().yellow());
    }
    if summary.crashes > 0 {
        eprintln!("  Rule crashes: {}", summary.crashes.to_string().red());
    }
    if summary.abandoned > 0 {
        eprintln!("  Abandoned files: {}", summary.abandoned.to_string().red());
    }
    if report.is_empty() {
        eprintln!();
        eprintln!("{}", "No style violations found".green());
    }
}
