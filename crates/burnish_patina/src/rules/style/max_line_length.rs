//! style/max-line-length
//!
//! Lines are at most `maxLineLength` characters long (80 by default).

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/max-line-length",
    description: "Enforce a maximum line length",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Enforce a maximum line length
pub struct MaxLineLength;

impl Rule for MaxLineLength {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        let max = ctx.config.max_line_length;

        for (line, text) in file.index.lines() {
            let length = text.chars().count();
            if length <= max {
                continue;
            }
            // Point at the first character past the limit
            let over = text.char_indices().nth(max).map_or(text.len(), |(i, _)| i);
            let loc = ctx.line_span(line, over, text.len());
            ctx.report(
                format!("line is {} characters long, maximum is {}", length, max),
                &loc,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfiguration;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    fn lint(source: &str, max: usize) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(MaxLineLength));
        let mut config = RuleConfiguration::default();
        config.max_line_length = max;
        Linter::with_registry(registry)
            .with_config(config)
            .lint_source(source, "card.scss")
    }

    #[test]
    fn test_within_limit() {
        assert!(!lint(".card {\n  color: red;\n}\n", 13).has_findings());
    }

    #[test]
    fn test_too_long() {
        let result = lint(".card {\n  background: url(\"image.png\");\n}\n", 20);
        assert_eq!(result.warning_count(), 1);
        let finding = &result.findings[0];
        assert_eq!(finding.message, "line is 31 characters long, maximum is 20");
        assert_eq!((finding.line, finding.column), (2, 21));
    }

    #[test]
    fn test_counts_characters() {
        // Eleven characters, fifteen bytes
        assert!(!lint("$a: 'éééé';\n", 11).has_findings());
    }
}
