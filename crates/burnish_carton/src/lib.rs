//! Carton - The finisher's toolbox for Burnish.
//!
//! This crate provides the small shared utilities used across the Burnish
//! workspace, much like a carton holds the rags, waxes and burnishers a
//! finisher reaches for while working a surface.
//!
//! # Modules
//!
//! - **line_index**: byte offset to line/column conversion
//! - **general**: character and line helpers shared by the parser and the rules
//!
//! # Example
//!
//! ```
//! use burnish_carton::LineIndex;
//!
//! let index = LineIndex::new(".a {\n  color: red;\n}\n");
//! let pos = index.line_col(7);
//! assert_eq!((pos.line, pos.column), (2, 3));
//! ```

pub mod general;
pub mod line_index;

pub use general::*;
pub use line_index::{LineCol, LineIndex};

// Re-export compact_str::CompactString for convenience
pub use compact_str::format_compact;
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};
