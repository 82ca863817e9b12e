//! Parallel linting of many files.
//!
//! Files are linted independently on the rayon thread pool. Results are
//! collected and then aggregated; the only thing shared between workers is
//! the read-only [`Linter`]. A failure in one file (unreadable, unparsable)
//! becomes a fatal finding for that file and never stops the batch.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::linter::{LintResult, Linter};
use crate::report::{aggregate, Report};

/// Cooperative cancellation flag, checked before each file
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip every file not yet started
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-file results and the aggregated report of a batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Results of the files that were linted, in input order
    pub results: Vec<LintResult>,
    pub report: Report,
}

/// Lint files in parallel
pub fn lint_batch(linter: &Linter, paths: &[PathBuf], cancel: &CancelToken) -> BatchOutcome {
    let results: Vec<Option<LintResult>> = paths
        .par_iter()
        .map(|path| {
            if cancel.is_cancelled() {
                return None;
            }
            Some(linter.lint_file(path))
        })
        .collect();

    let skipped = results.iter().filter(|r| r.is_none()).count();
    let results: Vec<LintResult> = results.into_iter().flatten().collect();

    let mut report = aggregate(results.iter().flat_map(|r| r.findings.iter().cloned()))
        .with_file_count(results.len());
    report.cancelled = skipped > 0;

    if report.cancelled {
        tracing::warn!(skipped, linted = results.len(), "batch cancelled");
    } else {
        tracing::debug!(
            files = results.len(),
            findings = report.findings.len(),
            "batch finished"
        );
    }

    BatchOutcome { results, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    #[test]
    fn test_missing_file_does_not_stop_batch() {
        let dir = tempfile::tempdir().unwrap();
        let valid = dir.path().join("card.scss");
        std::fs::write(&valid, ".card {\n  width: 1px;\n  color: red;\n}\n").unwrap();
        let missing = dir.path().join("gone.scss");

        let outcome = lint_batch(
            &Linter::new(),
            &[missing.clone(), valid.clone()],
            &CancelToken::new(),
        );

        assert_eq!(outcome.results.len(), 2);
        let report = &outcome.report;
        assert!(!report.cancelled);
        assert_eq!(report.summary.file_count, 2);
        assert_eq!(report.summary.fatal_count, 1);
        assert_eq!(report.summary.error_count, 1);
        assert_eq!(report.exit_code(), 1);

        let fatal = report
            .findings
            .iter()
            .find(|f| f.severity == Severity::Fatal)
            .unwrap();
        assert_eq!(fatal.rule_id, "io-error");
        assert_eq!(fatal.file.as_str(), missing.to_string_lossy());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = lint_batch(&Linter::new(), &[PathBuf::from("a.scss")], &cancel);
        assert!(outcome.results.is_empty());
        assert!(outcome.report.cancelled);
        assert_eq!(outcome.report.summary.file_count, 0);
    }

    #[test]
    fn test_empty_batch() {
        let outcome = lint_batch(&Linter::new(), &[], &CancelToken::new());
        assert!(outcome.report.findings.is_empty());
        assert_eq!(outcome.report.exit_code(), 0);
    }
}
