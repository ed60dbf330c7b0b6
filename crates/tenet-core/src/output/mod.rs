//! Report renderers

mod github;
mod json;
mod text;

pub use github::GithubFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::report::Report;

/// Output format for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `path:line:column: [SEVERITY] rule: message` line per finding
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
    /// GitHub Actions workflow annotations
    Github,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "github" => Some(OutputFormat::Github),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Github => "github",
        }
    }
}

/// Trait for output formatters
pub trait Formatter {
    /// Format the report and return the output string
    fn format(&self, report: &Report) -> String;
}

/// Format a report using the specified format
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => TextFormatter.format(report),
        OutputFormat::Json => JsonFormatter.format(report),
        OutputFormat::Github => GithubFormatter.format(report),
    }
}
