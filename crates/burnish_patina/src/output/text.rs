//! Rich terminal output using miette.

use burnish_carton::{plural, FxHashMap};
use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, MietteDiagnostic, NamedSource};

use crate::diagnostic::{Finding, LintSummary, Severity};
use crate::linter::LintResult;
use crate::report::Report;

/// Format a report as rich terminal output
pub fn format_text(report: &Report, results: &[LintResult]) -> String {
    let mut output = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode());

    let sources: FxHashMap<&str, &str> = results
        .iter()
        .map(|r| (r.filename.as_str(), r.source.as_str()))
        .collect();

    for finding in &report.findings {
        let source = sources.get(finding.file.as_str()).copied().unwrap_or("");
        let diagnostic = to_miette(finding, !source.is_empty());
        let report = miette::Report::new(diagnostic)
            .with_source_code(NamedSource::new(finding.file.as_str(), source.to_string()));

        let mut buf = String::new();
        if handler.render_report(&mut buf, report.as_ref()).is_ok() {
            output.push_str(&buf);
            output.push('\n');
        }
    }

    output
}

fn to_miette(finding: &Finding, with_label: bool) -> MietteDiagnostic {
    let severity = match finding.severity {
        Severity::Warning => miette::Severity::Warning,
        Severity::Error | Severity::Fatal => miette::Severity::Error,
    };
    let message = match finding.severity {
        Severity::Fatal => format!("{}: {}", finding.file, finding.message),
        _ => finding.message.to_string(),
    };

    let mut diagnostic = MietteDiagnostic::new(message)
        .with_code(finding.rule_id)
        .with_severity(severity);
    if let Some(help) = &finding.help {
        diagnostic = diagnostic.with_help(help.as_str());
    }
    if with_label {
        let len = finding.end.saturating_sub(finding.start) as usize;
        diagnostic =
            diagnostic.with_label(LabeledSpan::new_with_span(None, (finding.start as usize, len)));
    }
    diagnostic
}

/// Format a summary line
pub fn format_summary(summary: &LintSummary) -> String {
    let mut parts = Vec::new();

    if summary.fatal_count > 0 {
        parts.push(format!("{} fatal", summary.fatal_count));
    }
    if summary.error_count > 0 {
        parts.push(plural(summary.error_count, "error"));
    }
    if summary.warning_count > 0 {
        parts.push(plural(summary.warning_count, "warning"));
    }

    if parts.is_empty() {
        format!("No problems found in {} file(s)", summary.file_count)
    } else {
        format!(
            "{} in {}",
            parts.join(", "),
            plural(summary.file_count, "file")
        )
    }
}
