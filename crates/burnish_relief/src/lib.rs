//! Relief - The sculptured syntax tree surface for Burnish.
//!
//! ## Name Origin
//!
//! A **relief** is a sculpture whose forms stand out from a flat background.
//! `burnish_relief` lifts the structure out of a flat stylesheet: rules,
//! declarations, at-rules and comments, each carrying its source position.
//!
//! The tree is structural only. Selectors and values are kept as text; no
//! value semantics, `@extend` or `@include` resolution is attempted.

pub mod ast;
pub mod error;

pub use ast::*;
pub use error::ParseError;
