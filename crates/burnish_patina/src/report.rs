//! Finding aggregation.
//!
//! [`aggregate`] turns the findings of any number of files into one
//! deterministic [`Report`]: exact repeats removed, sorted by file, line,
//! column and rule id. The order does not depend on the order files were
//! processed in.

use crate::diagnostic::{Finding, LintSummary};

/// Aggregated findings of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Findings in report order
    pub findings: Vec<Finding>,
    pub summary: LintSummary,
    /// The run was cancelled before every file was processed
    pub cancelled: bool,
}

impl Report {
    /// Record how many files the run covered
    #[inline]
    pub fn with_file_count(mut self, file_count: usize) -> Self {
        self.summary.file_count = file_count;
        self
    }

    /// Check if any finding fails the run
    #[inline]
    pub fn has_failures(&self) -> bool {
        self.summary.has_failures()
    }

    /// Process exit code: 0 unless a fatal or error finding exists
    #[inline]
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// Deduplicate and sort findings into a report.
///
/// Two findings are repeats when file, line, column and rule id all match;
/// the first one is kept.
pub fn aggregate<I>(findings: I) -> Report
where
    I: IntoIterator<Item = Finding>,
{
    let mut findings: Vec<Finding> = findings.into_iter().collect();
    // Stable, so the first of a run of repeats stays first
    findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    findings.dedup_by(|later, earlier| later.sort_key() == earlier.sort_key());

    let mut summary = LintSummary::default();
    for finding in &findings {
        summary.add(finding);
    }

    Report {
        findings,
        summary,
        cancelled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;
    use burnish_relief::{Position, SourceLocation};

    fn finding(file: &str, line: u32, column: u32, rule: &'static str, severity: Severity) -> Finding {
        let at = Position::new(0, line, column);
        Finding::new(rule, severity, file, &SourceLocation::new(at, at), "message")
    }

    fn sample() -> Vec<Finding> {
        vec![
            finding("b.scss", 1, 1, "style/blank-lines", Severity::Warning),
            finding("a.scss", 3, 5, "ordering/property-order", Severity::Error),
            finding("a.scss", 3, 5, "naming/lowercase-hyphen", Severity::Error),
            finding("a.scss", 1, 9, "style/colon-spacing", Severity::Warning),
            finding("a.scss", 3, 5, "ordering/property-order", Severity::Error),
        ]
    }

    #[test]
    fn test_sort_and_dedup() {
        let report = aggregate(sample());
        let keys: Vec<_> = report
            .findings
            .iter()
            .map(|f| (f.file.as_str(), f.line, f.column, f.rule_id))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a.scss", 1, 9, "style/colon-spacing"),
                ("a.scss", 3, 5, "naming/lowercase-hyphen"),
                ("a.scss", 3, 5, "ordering/property-order"),
                ("b.scss", 1, 1, "style/blank-lines"),
            ]
        );
        assert_eq!(report.summary.error_count, 2);
        assert_eq!(report.summary.warning_count, 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_order_is_independent_of_input_order() {
        let forward = aggregate(sample());
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(aggregate(reversed), forward);
        assert_eq!(aggregate(forward.findings.clone()), forward);
    }

    #[test]
    fn test_warnings_only_exit_zero() {
        let report = aggregate(vec![finding("a.scss", 1, 1, "style/shorthand", Severity::Warning)]);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(aggregate(Vec::new()).exit_code(), 0);
    }

    #[test]
    fn test_fatal_fails() {
        let report = aggregate(vec![Finding::fatal("io-error", "gone.scss", "failed to read file")]);
        assert_eq!(report.summary.fatal_count, 1);
        assert_eq!(report.exit_code(), 1);
    }
}
