//! Lint context for rule execution.

use burnish_carton::CompactString;
use burnish_relief::{Position, SourceLocation};

use crate::component::ComponentFile;
use crate::config::RuleConfiguration;
use crate::diagnostic::{Finding, Severity};

/// Lint context provides the file under check, the configuration, and
/// finding collection to rules.
pub struct LintContext<'a> {
    pub file: &'a ComponentFile<'a>,
    pub config: &'a RuleConfiguration,
    /// Current rule name (set by the linter before calling the rule)
    pub current_rule: &'static str,
    /// Severity the current rule reports with
    pub current_severity: Severity,
    findings: Vec<Finding>,
}

impl<'a> LintContext<'a> {
    const INITIAL_FINDINGS_CAPACITY: usize = 16;

    #[inline]
    pub fn new(file: &'a ComponentFile<'a>, config: &'a RuleConfiguration) -> Self {
        Self {
            file,
            config,
            current_rule: "",
            current_severity: Severity::Error,
            findings: Vec::with_capacity(Self::INITIAL_FINDINGS_CAPACITY),
        }
    }

    /// Source code being linted
    #[inline]
    pub fn source(&self) -> &'a str {
        self.file.source
    }

    /// Build a finding for the current rule without reporting it
    #[inline]
    pub fn finding(&self, message: impl Into<CompactString>, loc: &SourceLocation) -> Finding {
        Finding::new(
            self.current_rule,
            self.current_severity,
            self.file.path,
            loc,
            message,
        )
    }

    /// Report a finding
    #[inline]
    pub fn report_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Report a finding at a location
    #[inline]
    pub fn report(&mut self, message: impl Into<CompactString>, loc: &SourceLocation) {
        let finding = self.finding(message, loc);
        self.findings.push(finding);
    }

    /// Report a finding with a help message
    #[inline]
    pub fn report_with_help(
        &mut self,
        message: impl Into<CompactString>,
        loc: &SourceLocation,
        help: impl Into<CompactString>,
    ) {
        let finding = self.finding(message, loc).with_help(help);
        self.findings.push(finding);
    }

    /// Location covering a byte range of the source
    pub fn span(&self, start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(
            Position::at(&self.file.index, start),
            Position::at(&self.file.index, end),
        )
    }

    /// Location of a byte range within a 1-indexed line
    pub fn line_span(&self, line: u32, start: usize, end: usize) -> SourceLocation {
        let line_start = self.file.index.line_start(line).unwrap_or(0);
        self.span(line_start + start, line_start + end)
    }

    /// Get reference to collected findings
    #[inline]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[inline]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}
