//! Aggregation of per-file outcomes into a deterministic report

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::finding::{Finding, RuleCrashed, Severity};
use crate::registry::RuleSet;

/// Everything one walk (or one failed parse) produced for a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    pub crashes: Vec<RuleCrashed>,
    /// The run timed out before this file was started
    pub abandoned: bool,
}

impl FileOutcome {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Outcome for a file the provider could not parse
    pub fn unparseable(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            findings: vec![Finding::unparseable()],
            ..Default::default()
        }
    }

    /// Outcome for a file skipped because the run deadline passed
    pub fn abandoned(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            abandoned: true,
            ..Default::default()
        }
    }

    fn merge(&mut self, other: FileOutcome) {
        self.findings.extend(other.findings);
        self.crashes.extend(other.crashes);
        self.abandoned |= other.abandoned;
    }
}

/// Sorted results for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crashes: Vec<RuleCrashed>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub abandoned: bool,
}

/// Summary statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    /// MUST findings
    pub errors: usize,
    /// SHOULD findings
    pub warnings: usize,
    pub crashes: usize,
    pub abandoned: usize,
}

/// Process exit status derived from a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// No MUST findings, no engine faults
    Success,
    /// At least one MUST finding
    Violations,
    /// A rule crashed or files were abandoned; the scan is incomplete
    EngineFault,
}

impl ExitStatus {
    pub fn code(&self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Violations => 1,
            ExitStatus::EngineFault => 2,
        }
    }
}

/// Final, immutable report of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    summary: Summary,
    files: Vec<FileReport>,
}

impl Report {
    /// Merge outcomes, sort them and drop exact duplicates
    ///
    /// Files are ordered by path. Findings within a file are ordered by
    /// line, column, the rule's registration rank, rule id and message.
    pub fn build(outcomes: impl IntoIterator<Item = FileOutcome>, rules: &RuleSet<'_>) -> Self {
        let mut by_path: BTreeMap<PathBuf, FileOutcome> = BTreeMap::new();
        for outcome in outcomes {
            match by_path.get_mut(&outcome.path) {
                Some(existing) => existing.merge(outcome),
                None => {
                    by_path.insert(outcome.path.clone(), outcome);
                }
            }
        }

        let mut summary = Summary::default();
        let files: Vec<FileReport> = by_path
            .into_values()
            .map(|outcome| {
                let mut findings = outcome.findings;
                findings.sort_by(|a, b| {
                    a.location()
                        .cmp(&b.location())
                        .then_with(|| rules.rank(a.rule_id()).cmp(&rules.rank(b.rule_id())))
                        .then_with(|| a.rule_id().cmp(b.rule_id()))
                        .then_with(|| a.message().cmp(b.message()))
                        .then_with(|| a.severity().cmp(&b.severity()))
                });
                findings.dedup();

                let mut crashes = outcome.crashes;
                crashes.sort_by(|a, b| {
                    a.location
                        .cmp(&b.location)
                        .then_with(|| rules.rank(&a.rule_id).cmp(&rules.rank(&b.rule_id)))
                        .then_with(|| a.rule_id.cmp(&b.rule_id))
                        .then_with(|| a.cause.cmp(&b.cause))
                });
                crashes.dedup();

                summary.files += 1;
                summary.errors += findings
                    .iter()
                    .filter(|f| f.severity() == Severity::Must)
                    .count();
                summary.warnings += findings
                    .iter()
                    .filter(|f| f.severity() == Severity::Should)
                    .count();
                summary.crashes += crashes.len();
                summary.abandoned += usize::from(outcome.abandoned);

                FileReport {
                    path: outcome.path,
                    findings,
                    crashes,
                    abandoned: outcome.abandoned,
                }
            })
            .collect();

        Self { summary, files }
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// All findings with their file, in report order
    pub fn findings(&self) -> impl Iterator<Item = (&Path, &Finding)> + '_ {
        self.files
            .iter()
            .flat_map(|f| f.findings.iter().map(move |finding| (f.path.as_path(), finding)))
    }

    pub fn is_empty(&self) -> bool {
        self.files
            .iter()
            .all(|f| f.findings.is_empty() && f.crashes.is_empty() && !f.abandoned)
    }

    /// Engine faults outrank style violations
    pub fn exit_status(&self) -> ExitStatus {
        if self.summary.crashes > 0 || self.summary.abandoned > 0 {
            ExitStatus::EngineFault
        } else if self.summary.errors > 0 {
            ExitStatus::Violations
        } else {
            ExitStatus::Success
        }
    }
}
