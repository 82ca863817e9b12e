//! style/declaration-per-line
//!
//! Each declaration sits on its own line, never on the line of the block's
//! opening brace.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .card { color: red; }
//! .card {
//!   color: red; margin: 0;
//! }
//! ```

use burnish_carton::format_compact;
use burnish_relief::Node;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/declaration-per-line",
    description: "Require one declaration per line",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Require one declaration per line
pub struct DeclarationPerLine;

impl Rule for DeclarationPerLine {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        for info in &file.blocks {
            let mut last_line = info.block.open.line;
            let mut after_brace = true;

            for child in &info.block.children {
                match child {
                    Node::Declaration(decl) => {
                        if decl.loc.start.line == last_line {
                            let what = if after_brace {
                                "the opening brace"
                            } else {
                                "another statement"
                            };
                            let message = format_compact!(
                                "declaration `{}` shares a line with {}",
                                decl.property,
                                what
                            );
                            let finding = ctx
                                .finding(message, &decl.loc)
                                .with_subject(decl.property.clone())
                                .with_help("Put each declaration on its own line");
                            ctx.report_finding(finding);
                        }
                        last_line = decl.loc.end.line;
                        after_brace = false;
                    }
                    // Trailing comments may share a line
                    Node::Comment(_) => {}
                    other => {
                        last_line = other.loc().end.line;
                        after_brace = false;
                    }
                }
            }
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
        registry.register(Box::new(DeclarationPerLine));
        Linter::with_registry(registry).lint_source(source, "card.scss")
    }

    #[test]
    fn test_valid() {
        let source = ".card {\n  color: red; // brand\n  margin: 0;\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_opening_brace_line() {
        let result = lint(".card { color: red; }\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "declaration `color` shares a line with the opening brace"
        );
    }

    #[test]
    fn test_two_on_one_line() {
        let result = lint(".card {\n  color: red; margin: 0;\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!((result.findings[0].line, result.findings[0].column), (2, 15));
    }
}
