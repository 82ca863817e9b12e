//! style/blank-lines
//!
//! Top-level blocks are separated by exactly `blankLinesBetweenBlocks`
//! blank lines (two by default). Comments directly above a block belong to
//! it, so the blank lines are counted above the comment.
//!
//! ## Examples
//!
//! ### Valid
//! ```scss
//! .card {
//!   color: red;
//! }
//!
//!
//! /* Modifiers */
//! .card.mod-wide {
//!   width: 100%;
//! }
//! ```

use burnish_carton::{is_blank, plural};
use burnish_relief::{Node, SourceLocation};

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "style/blank-lines",
    description: "Require a fixed number of blank lines between top-level blocks",
    category: RuleCategory::Style,
    default_severity: Severity::Warning,
};

/// Require blank lines between top-level blocks
pub struct BlankLines;

impl Rule for BlankLines {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;
        let expected = ctx.config.blank_lines_between_blocks;

        // End line of the previous block, while only comments followed it
        let mut previous_end: Option<u32> = None;
        // First comment after the previous block
        let mut leading: Option<SourceLocation> = None;

        for node in &file.stylesheet.nodes {
            match node {
                Node::Comment(comment) => {
                    let on_own_line = previous_end.is_some_and(|end| comment.loc.start.line > end);
                    if on_own_line && leading.is_none() {
                        leading = Some(comment.loc);
                    }
                }
                _ if node.block().is_some() => {
                    let start = leading.take().unwrap_or(*node.loc());
                    if let Some(end) = previous_end {
                        let found = (end + 1..start.start.line)
                            .filter(|&line| file.index.line_text(line).is_some_and(is_blank))
                            .count();
                        if found != expected {
                            let message = format!(
                                "expected {} between top-level blocks, found {}",
                                plural(expected, "blank line"),
                                found
                            );
                            ctx.report(message, &start);
                        }
                    }
                    previous_end = Some(node.loc().end.line);
                }
                _ => {
                    previous_end = None;
                    leading = None;
                }
            }
        }
    }
}
