//! Parse errors reported by the stylesheet parser.

use crate::ast::Position;

/// Structural parse failure. A file that fails to parse is reported as a
/// single fatal finding and skipped by the rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// `/*` without a matching `*/`
    #[error("unterminated comment starting at {}:{}", at.line, at.column)]
    UnterminatedComment { at: Position },

    /// String literal that reaches a newline or end of input
    #[error("unterminated string starting at {}:{}", at.line, at.column)]
    UnterminatedString { at: Position },

    /// `{` without a matching `}`
    #[error("block opened at {}:{} is never closed", at.line, at.column)]
    UnclosedBlock { at: Position },

    /// `}` with no open block
    #[error("unexpected `}}` at {}:{}", at.line, at.column)]
    UnexpectedCloseBrace { at: Position },

    /// Statement that is neither a declaration nor an at-rule
    #[error("expected a declaration at {}:{}, found `{text}`", at.line, at.column)]
    ExpectedDeclaration { text: String, at: Position },
}

impl ParseError {
    /// Position the error points at
    pub fn position(&self) -> Position {
        match self {
            Self::UnterminatedComment { at }
            | Self::UnterminatedString { at }
            | Self::UnclosedBlock { at }
            | Self::UnexpectedCloseBrace { at }
            | Self::ExpectedDeclaration { at, .. } => *at,
        }
    }
}
