//! JSON output format

use serde::Serialize;

use super::Formatter;
use crate::report::{FileReport, Report, Summary};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    summary: Summary,
    files: &'a [FileReport],
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &Report) -> String {
        let output = JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            summary: report.summary(),
            files: report.files(),
        };
        // Paths that are not valid UTF-8 cannot be serialized
        match serde_json::to_string_pretty(&output) {
            Ok(json) => json + "\n",
            Err(e) => error_document(&e.to_string()),
        }
    }
}

fn error_document(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string() + "\n"
}
