//! ordering/property-order
//!
//! Properties within a block are in strict lexicographic order, so a
//! repeated property is reported too. Only the first offending property of
//! a block is reported. Variable declarations (`$name: value`) are ignored.
//!
//! ## Examples
//!
//! ### Invalid
//! ```scss
//! .card {
//!   width: 1px;
//!   color: red;
//! }
//! ```
//!
//! ### Valid
//! ```scss
//! .card {
//!   color: red;
//!   width: 1px;
//! }
//! ```

use burnish_carton::format_compact;

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};

static META: RuleMeta = RuleMeta {
    name: "ordering/property-order",
    description: "Enforce alphabetical property order within a block",
    category: RuleCategory::Ordering,
    default_severity: Severity::Error,
};

/// Enforce alphabetical property order
pub struct PropertyOrder;

impl Rule for PropertyOrder {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check(&self, ctx: &mut LintContext<'_>) {
        let file = ctx.file;

        for info in &file.blocks {
            let mut declarations = info.block.declarations().filter(|d| !d.is_variable());
            let Some(mut previous) = declarations.next() else {
                continue;
            };

            for decl in declarations {
                if decl.property <= previous.property {
                    let message = if decl.property == previous.property {
                        format_compact!("property `{}` is repeated", decl.property)
                    } else {
                        format_compact!(
                            "property `{}` should come before `{}`",
                            decl.property,
                            previous.property
                        )
                    };
                    let finding = ctx
                        .finding(message, &decl.property_loc())
                        .with_subject(decl.property.clone())
                        .with_help("Sort properties alphabetically");
                    ctx.report_finding(finding);
                    break;
                }
                previous = decl;
            }
        }
    }
}
