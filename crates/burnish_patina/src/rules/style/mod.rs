//! Formatting conventions and advisory size limits.
//!
//! All style rules default to warnings.

mod blank_lines;
mod colon_spacing;
mod component_size;
mod declaration_per_line;
mod indentation;
mod max_file_lines;
mod max_line_length;
mod shorthand;
mod trailing_whitespace;

pub use blank_lines::BlankLines;
pub use colon_spacing::ColonSpacing;
pub use component_size::ComponentSize;
pub use declaration_per_line::DeclarationPerLine;
pub use indentation::Indentation;
pub use max_file_lines::MaxFileLines;
pub use max_line_length::MaxLineLength;
pub use shorthand::Shorthand;
pub use trailing_whitespace::TrailingWhitespace;
