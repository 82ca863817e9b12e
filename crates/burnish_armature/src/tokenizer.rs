//! Structural tokenizer for SCSS.
//!
//! Splits the source into braces, semicolons, comments and the text between
//! them. Strings, `#{...}` interpolation and parenthesized groups are
//! skipped as opaque text so that the `;`, `{` and `//` they may contain do
//! not end a statement.

use burnish_carton::LineIndex;
use burnish_relief::{ParseError, Position};

/// Character codes for fast comparison
pub mod char_codes {
    pub const NEWLINE: u8 = 0x0A;
    pub const DOUBLE_QUOTE: u8 = 0x22;
    pub const NUMBER: u8 = 0x23;
    pub const SINGLE_QUOTE: u8 = 0x27;
    pub const LEFT_PAREN: u8 = 0x28;
    pub const RIGHT_PAREN: u8 = 0x29;
    pub const STAR: u8 = 0x2A;
    pub const SLASH: u8 = 0x2F;
    pub const COLON: u8 = 0x3A;
    pub const SEMI: u8 = 0x3B;
    pub const BACKSLASH: u8 = 0x5C;
    pub const LEFT_BRACE: u8 = 0x7B;
    pub const RIGHT_BRACE: u8 = 0x7D;
}

use char_codes::*;

/// Token kinds produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Anything that is not structural, including whitespace
    Text,
    OpenBrace,
    CloseBrace,
    Semicolon,
    /// `/* ... */`
    BlockComment,
    /// `// ...` up to (not including) the newline
    LineComment,
}

/// A token as a byte range into the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    /// First `:` outside strings, interpolation and parentheses (text tokens only)
    pub colon: Option<usize>,
}

impl Token {
    #[inline]
    const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            colon: None,
        }
    }
}

/// Byte-level tokenizer over a single stylesheet
pub struct Tokenizer<'a, 'i> {
    index: &'i LineIndex<'a>,
    input: &'a [u8],
    pos: usize,
    paren_depth: u32,
}

impl<'a, 'i> Tokenizer<'a, 'i> {
    pub fn new(index: &'i LineIndex<'a>) -> Self {
        Self {
            index,
            input: index.source().as_bytes(),
            pos: 0,
            paren_depth: 0,
        }
    }

    /// Tokenize the whole input
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        let start = self.pos;
        let Some(&c) = self.input.get(start) else {
            return Ok(None);
        };

        let kind = match c {
            LEFT_BRACE => {
                self.pos += 1;
                self.paren_depth = 0;
                TokenKind::OpenBrace
            }
            RIGHT_BRACE => {
                self.pos += 1;
                self.paren_depth = 0;
                TokenKind::CloseBrace
            }
            SEMI if self.paren_depth == 0 => {
                self.pos += 1;
                TokenKind::Semicolon
            }
            SLASH if self.peek(1) == Some(STAR) => {
                self.skip_block_comment()?;
                TokenKind::BlockComment
            }
            SLASH if self.peek(1) == Some(SLASH) && self.paren_depth == 0 => {
                self.skip_line_comment();
                TokenKind::LineComment
            }
            _ => return self.text(start).map(Some),
        };

        Ok(Some(Token::new(kind, start, self.pos)))
    }

    fn text(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut colon = None;

        while let Some(&c) = self.input.get(self.pos) {
            match c {
                LEFT_BRACE | RIGHT_BRACE => break,
                SEMI if self.paren_depth == 0 => break,
                SLASH if self.peek(1) == Some(STAR) => break,
                SLASH if self.peek(1) == Some(SLASH) && self.paren_depth == 0 => break,
                DOUBLE_QUOTE | SINGLE_QUOTE => self.skip_string(c)?,
                NUMBER if self.peek(1) == Some(LEFT_BRACE) => self.skip_interpolation()?,
                LEFT_PAREN => {
                    self.paren_depth += 1;
                    self.pos += 1;
                }
                RIGHT_PAREN => {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                    self.pos += 1;
                }
                COLON => {
                    if self.paren_depth == 0 && colon.is_none() {
                        colon = Some(self.pos);
                    }
                    self.pos += 1;
                }
                BACKSLASH => self.pos = (self.pos + 2).min(self.input.len()),
                _ => self.pos += 1,
            }
        }

        Ok(Token {
            kind: TokenKind::Text,
            start,
            end: self.pos,
            colon,
        })
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match memchr::memmem::find(&self.input[start + 2..], b"*/") {
            Some(i) => {
                self.pos = start + 2 + i + 2;
                Ok(())
            }
            None => Err(ParseError::UnterminatedComment {
                at: self.position(start),
            }),
        }
    }

    fn skip_line_comment(&mut self) {
        self.pos = match memchr::memchr(NEWLINE, &self.input[self.pos..]) {
            Some(i) => self.pos + i,
            None => self.input.len(),
        };
    }

    fn skip_string(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;
        while let Some(&c) = self.input.get(self.pos) {
            match c {
                _ if c == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                BACKSLASH => self.pos = (self.pos + 2).min(self.input.len()),
                NEWLINE => break,
                _ => self.pos += 1,
            }
        }
        Err(ParseError::UnterminatedString {
            at: self.position(start),
        })
    }

    fn skip_interpolation(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let mut depth = 0u32;
        self.pos += 1;
        while let Some(&c) = self.input.get(self.pos) {
            match c {
                LEFT_BRACE => {
                    depth += 1;
                    self.pos += 1;
                }
                RIGHT_BRACE => {
                    self.pos += 1;
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                DOUBLE_QUOTE | SINGLE_QUOTE => self.skip_string(c)?,
                _ => self.pos += 1,
            }
        }
        Err(ParseError::UnclosedBlock {
            at: self.position(start),
        })
    }

    #[inline]
    fn peek(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.pos + ahead).copied()
    }

    #[inline]
    fn position(&self, offset: usize) -> Position {
        Position::at(self.index, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let index = LineIndex::new(source);
        Tokenizer::new(&index)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_structural_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds(".a { color: red; }"),
            vec![Text, OpenBrace, Text, Semicolon, Text, CloseBrace]
        );
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        assert_eq!(
            kinds("/* a */\n// b\n.c {}"),
            vec![BlockComment, Text, LineComment, Text, OpenBrace, CloseBrace]
        );
    }

    #[test]
    fn test_opaque_text() {
        use TokenKind::*;
        // `;` inside parentheses and `//` inside url() stay in the text
        assert_eq!(
            kinds("$m: (a: 1; b: 2); background: url(//x.png);"),
            vec![Text, Semicolon, Text, Semicolon]
        );
        assert_eq!(kinds("content: \"{;}\";"), vec![Text, Semicolon]);
        assert_eq!(kinds(".a-#{$b} {}"), vec![Text, OpenBrace, CloseBrace]);
    }

    #[test]
    fn test_first_colon() {
        let source = "  $m: (a: 1)";
        let index = LineIndex::new(source);
        let tokens = Tokenizer::new(&index).tokenize().unwrap();
        assert_eq!(tokens[0].colon, Some(4));
    }

    #[test]
    fn test_unterminated() {
        let index = LineIndex::new(".a {\n  /* open");
        let err = Tokenizer::new(&index).tokenize().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnterminatedComment {
                at: Position::new(7, 2, 3)
            }
        );

        let index = LineIndex::new("content: 'abc\n;");
        let err = Tokenizer::new(&index).tokenize().unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { .. }));
    }
}
