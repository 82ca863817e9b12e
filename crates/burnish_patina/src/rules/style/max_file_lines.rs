//! style/max-file-lines
//!
//! A component file should be broken up once it grows past
//! `maxComponentFileLines` lines (300 by default). Advisory only.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/max-file-lines",
    description: "Warn about component files longer than the configured limit",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Warn about long files
pub struct MaxFileLines;

impl Rule for MaxFileLines {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let max = ctx.config.max_component_file_lines;
        let count = ctx.file.index.line_count();
        if count <= max {
            return;
        }

        let line = max as u32 + 1;
        let length = ctx.file.index.line_text(line).map_or(0, str::len);
        let loc = ctx.line_span(line, 0, length);
        let finding = ctx
            .finding(
                format!("file has {} lines, maximum is {}", count, max),
                &loc,
            )
            .with_help("Split the file into smaller components");
        ctx.report_finding(finding);
    }
}
