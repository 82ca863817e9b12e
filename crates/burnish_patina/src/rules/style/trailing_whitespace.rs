//! style/trailing-whitespace
//!
//! Disallow spaces and tabs at the end of a line.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/trailing-whitespace",
    description: "Disallow trailing whitespace",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Disallow trailing whitespace
pub struct TrailingWhitespace;

impl Rule for TrailingWhitespace {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        for (line, text) in file.index.lines() {
            let trimmed = text.trim_end_matches([' ', '\t']);
            if trimmed.len() == text.len() {
                continue;
            }
            let loc = ctx.line_span(line, trimmed.len(), text.len());
            let finding = ctx
                .finding("trailing whitespace", &loc)
                .with_help("Remove spaces and tabs at the end of the line");
            ctx.report_finding(finding);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(TrailingWhitespace));
        Linter::with_registry(registry).lint_source(source, "card.scss")
    }

    #[test]
    fn test_clean() {
        assert!(!lint(".card {\r\n  color: red;\r\n}\r\n").has_findings());
    }

    #[test]
    fn test_trailing() {
        let result = lint(".card { \n  color: red;\t\n\n}\n");
        let positions: Vec<_> = result.findings.iter().map(|f| (f.line, f.column)).collect();
        assert_eq!(positions, vec![(1, 8), (2, 14)]);
    }
}
