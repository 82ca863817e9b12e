//! style/colon-spacing
//!
//! No space before the colon of a declaration and exactly one space after
//! it. A value continued on the next line is allowed.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .card {
//!   color:red;
//!   margin :0;
//!   padding:  0;
//! }
//! ```

use burnish_relief::{DeclarationNode, Node};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/colon-spacing",
    description: "Require `property: value` spacing around colons",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Require a single space after declaration colons
pub struct ColonSpacing;

impl ColonSpacing {
    fn check_declaration(ctx: &mut LintContext<'_>, decl: &DeclarationNode) {
        let source = ctx.source().as_bytes();
        let colon = decl.colon.offset as usize;

        if colon > 0 && matches!(source[colon - 1], b' ' | b'\t') {
            let start = colon
                - source[..colon]
                    .iter()
                    .rev()
                    .take_while(|&&b| b == b' ' || b == b'\t')
                    .count();
            let finding = ctx
                .finding(
                    format!("unexpected whitespace before `:` in `{}`", decl.property),
                    &ctx.span(start, colon),
                )
                .with_subject(decl.property.clone());
            ctx.report_finding(finding);
            return;
        }

        let after = &source[colon + 1..];
        let spaces = after
            .iter()
            .take_while(|&&b| b == b' ' || b == b'\t')
            .count();
        let next = after.get(spaces).copied();
        if matches!(next, Some(b'\n' | b'\r') | None) {
            return;
        }
        if spaces != 1 || after[0] != b' ' {
            let finding = ctx
                .finding(
                    format!(
                        "expected exactly one space after `:` in `{}`, found {}",
                        decl.property, spaces
                    ),
                    &ctx.span(colon, colon + 1 + spaces),
                )
                .with_subject(decl.property.clone())
                .with_help("Write declarations as `property: value`");
            ctx.report_finding(finding);
        }
    }
}

impl Rule for ColonSpacing {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        let top_level = file.stylesheet.nodes.iter();
        let nested = file.blocks.iter().flat_map(|info| info.block.children.iter());
        for node in top_level.chain(nested) {
            if let Node::Declaration(decl) = node {
                Self::check_declaration(ctx, decl);
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
        registry.register(Box::new(ColonSpacing));
        Linter::with_registry(registry).lint_source(source, "card.scss")
    }

    #[test]
    fn test_valid() {
        let source = "$gap: 4px;\n.card {\n  color: red;\n  grid-template-areas:\n    \"a b\";\n}\n";
        assert!(!lint(source).has_findings());
    }

    #[test]
    fn test_missing_space() {
        let result = lint(".card {\n  color:red;\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(
            result.findings[0].message,
            "expected exactly one space after `:` in `color`, found 0"
        );
        assert_eq!((result.findings[0].line, result.findings[0].column), (2, 8));
    }

    #[test]
    fn test_space_before() {
        let result = lint(".card {\n  margin : 0;\n}\n");
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.findings[0].column, 9);
    }

    #[test]
    fn test_two_spaces_and_tab() {
        let result = lint("$a:  1;\n$b:\t2;\n");
        assert_eq!(result.warning_count(), 2);
    }
}
