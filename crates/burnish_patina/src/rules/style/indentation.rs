//! style/indentation
//!
//! Statements are indented by `indentWidth` spaces (two by default) per
//! level of nesting, and closing braces line up with the statement that
//! opened the block. Tabs are not allowed.
//!
//! Only lines a statement starts on are checked; continuation lines of
//! multi-line selectors and values are left alone.

use burnish_carton::leading_whitespace;
use burnish_relief::{Node, Position};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/indentation",
    description: "Enforce space indentation matching the nesting depth",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Enforce indentation by nesting depth
pub struct Indentation;

impl Indentation {
    /// Check the line `at` is on, if `at` is the first thing on it
    fn check_line(ctx: &mut LintContext<'_>, at: Position, depth: u32) {
        let Some(text) = ctx.file.index.line_text(at.line) else {
            return;
        };
        let indent = leading_whitespace(text);
        if indent.len() + 1 != at.column as usize {
            return;
        }

        let expected = depth as usize * ctx.config.indent_width;
        let message = if indent.contains('\t') {
            "indentation must use spaces, found a tab".to_string()
        } else if indent.len() != expected {
            format!(
                "expected indentation of {} spaces, found {}",
                expected,
                indent.len()
            )
        } else {
            return;
        };

        let loc = ctx.line_span(at.line, 0, indent.len());
        ctx.report(message, &loc);
    }

    fn check_nodes(ctx: &mut LintContext<'_>, nodes: &[Node], depth: u32) {
        for node in nodes {
            Self::check_line(ctx, node.loc().start, depth);
        }
    }
}

impl Rule for Indentation {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        Self::check_nodes(ctx, &file.stylesheet.nodes, 0);
        for info in &file.blocks {
            Self::check_nodes(ctx, &info.block.children, info.depth);
            Self::check_line(ctx, info.block.close, info.depth - 1);
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
        registry.register(Box::new(Indentation));
        Linter::with_registry(registry).lint_source(source, "card.scss")
    }

    #[test]
    fn test_valid() {
        let source = ".card {\n  color: red;\n  // title\n  .card-title {\n    margin: 0;\n  }\n\n  @media print {\n    display: none;\n  }\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_wrong_depth() {
        let result = lint(".card {\n    color: red;\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "expected indentation of 2 spaces, found 4"
        );
        assert_eq!(result.findings[0].line, 2);
    }

    #[test]
    fn test_tab() {
        let result = lint(".card {\n\tcolor: red;\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "indentation must use spaces, found a tab"
        );
    }

    #[test]
    fn test_closing_brace() {
        let result = lint(".card {\n  .card-title {\n    margin: 0;\n    }\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.findings[0].line, 4);
    }

    #[test]
    fn test_single_line_block() {
        assert!(!lint(".card { color: red; }\n").has_findings());
    }
}
