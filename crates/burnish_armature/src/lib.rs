//! Armature - The structural SCSS parser for Burnish.
//!
//! ## Name Origin
//!
//! An **armature** is the internal frame a sculptor builds before applying
//! clay. `burnish_armature` builds the frame of a stylesheet: it finds rules,
//! declarations, at-rules and comments and records where they are, leaving
//! selector and value text untouched for later analysis.
//!
//! ## Usage
//!
//! ```
//! let sheet = burnish_armature::parse(".a {\n  color: red;\n}\n").unwrap();
//! let rule = sheet.rules().next().unwrap();
//! assert_eq!(rule.selector, ".a");
//! assert_eq!(rule.block.declarations().count(), 1);
//! ```

mod parser;
pub mod tokenizer;

pub use burnish_relief::ParseError;
pub use parser::Parser;

use burnish_relief::Stylesheet;

/// Parse SCSS source into a structural tree
pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
    Parser::new(source).parse()
}
