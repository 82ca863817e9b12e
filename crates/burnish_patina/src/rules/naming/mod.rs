//! Class naming conventions.
//!
//! Component names are lowercase words joined by single hyphens, and each
//! level of nesting adds one word to the name of the enclosing component:
//!
//! ```scss
//! .global-header {
//!   .global-header-nav {
//!     .global-header-nav-item { ... }
//!   }
//! }
//! ```

mod descendant_chain;
mod lowercase_hyphen;
mod no_id_or_element;

pub use descendant_chain::DescendantChain;
pub use lowercase_hyphen::LowercaseHyphen;
pub use no_id_or_element::NoIdOrElement;

use crate::selector::{parse_compounds, Compound};

/// Compounds the rule wrote itself, left of the rightmost one.
///
/// Compounds containing `&` stand for the enclosing rule, which is checked
/// on its own.
fn own_ancestor_compounds(written: &str) -> Vec<Compound> {
    let mut compounds = parse_compounds(written);
    compounds.pop();
    compounds.retain(|c| !c.parent_ref);
    compounds
}
