//! Output formatters for reports.

mod text;

pub use text::*;

use serde::Serialize;

use crate::diagnostic::{Finding, Severity};
use crate::linter::LintResult;
use crate::report::Report;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rich terminal output with code snippets
    #[default]
    Text,
    /// JSON output for tooling integration
    Json,
}

/// Format a report according to the specified format.
///
/// `results` supplies the source text for snippets; findings of files
/// missing from it are rendered without one.
pub fn format_report(report: &Report, results: &[LintResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_text(report, results),
        OutputFormat::Json => format_json(report),
    }
}

/// JSON output structure for a single finding
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFinding<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
    pub rule_id: &'static str,
    pub severity: Severity,
    pub message: &'a str,
}

impl<'a> From<&'a Finding> for JsonFinding<'a> {
    fn from(finding: &'a Finding) -> Self {
        Self {
            file: &finding.file,
            line: finding.line,
            column: finding.column,
            rule_id: finding.rule_id,
            severity: finding.severity,
            message: &finding.message,
        }
    }
}

/// Format findings as a JSON array, in report order
pub fn format_json(report: &Report) -> String {
    let findings: Vec<JsonFinding<'_>> = report.findings.iter().map(JsonFinding::from).collect();
    serde_json::to_string_pretty(&findings).unwrap_or_else(|_| "[]".to_string())
}
