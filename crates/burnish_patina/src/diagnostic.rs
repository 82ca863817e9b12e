//! Finding types for burnish_patina.
//!
//! Uses `CompactString` for efficient small string storage.

use burnish_carton::CompactString;
use burnish_relief::SourceLocation;
use serde::Serialize;

/// Finding severity, ordered `Warning < Error < Fatal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Whether this severity fails a run
    #[inline]
    pub fn is_failure(self) -> bool {
        self >= Self::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single style guide finding.
///
/// Findings are immutable once produced; the aggregator only sorts and
/// filters them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Rule that produced this finding (e.g. "ordering/property-order")
    pub rule_id: &'static str,
    pub severity: Severity,
    /// Path of the file, as given on the command line
    pub file: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// 1-indexed line of `start`
    pub line: u32,
    /// 1-indexed column of `start`
    pub column: u32,
    pub message: CompactString,
    /// Offending selector or property text
    pub subject: Option<CompactString>,
    /// Help message for fixing (optional)
    pub help: Option<CompactString>,
}

impl Finding {
    /// Create a finding spanning `loc`
    pub fn new(
        rule_id: &'static str,
        severity: Severity,
        file: impl Into<CompactString>,
        loc: &SourceLocation,
        message: impl Into<CompactString>,
    ) -> Self {
        Self {
            rule_id,
            severity,
            file: file.into(),
            start: loc.start.offset,
            end: loc.end.offset,
            line: loc.start.line,
            column: loc.start.column,
            message: message.into(),
            subject: None,
            help: None,
        }
    }

    /// Create a fatal finding that applies to the whole file
    pub fn fatal(
        rule_id: &'static str,
        file: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self {
            rule_id,
            severity: Severity::Fatal,
            file: file.into(),
            start: 0,
            end: 0,
            line: 1,
            column: 1,
            message: message.into(),
            subject: None,
            help: None,
        }
    }

    /// Point the finding at a different location
    #[inline]
    pub fn at(mut self, loc: &SourceLocation) -> Self {
        self.start = loc.start.offset;
        self.end = loc.end.offset;
        self.line = loc.start.line;
        self.column = loc.start.column;
        self
    }

    /// Add a help message
    #[inline]
    pub fn with_help(mut self, help: impl Into<CompactString>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Record the offending selector or property
    #[inline]
    pub fn with_subject(mut self, subject: impl Into<CompactString>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Key findings are sorted and deduplicated by
    #[inline]
    pub fn sort_key(&self) -> (&str, u32, u32, &'static str) {
        (self.file.as_str(), self.line, self.column, self.rule_id)
    }
}

/// Summary counts for a set of findings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintSummary {
    pub file_count: usize,
    pub fatal_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintSummary {
    /// Count one finding
    #[inline]
    pub fn add(&mut self, finding: &Finding) {
        match finding.severity {
            Severity::Fatal => self.fatal_count += 1,
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
    }

    /// Whether any Fatal or Error finding was counted
    #[inline]
    pub fn has_failures(&self) -> bool {
        self.fatal_count > 0 || self.error_count > 0
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.fatal_count + self.error_count + self.warning_count
    }
}
