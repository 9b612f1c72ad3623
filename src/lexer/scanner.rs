use lazy_static::lazy_static;
use regex::Regex;

use super::token::Token;

lazy_static! {
    /// One token per match in group 1, after skipping whitespace and commas.
    /// String literals may be unterminated here; the reader rejects them.
    static ref TOKEN_PATTERN: Regex = Regex::new(
        r#"[\s,]*(~@|[\[\]{}()'`~^@]|"(?:\\.|[^\\"])*"?|;.*|[^\s\[\]{}('"`,;)]*)"#
    )
    .expect("token pattern compiles");
}

/// Regex-driven scanner for Wisp source
pub struct Scanner<'a> {
    /// Source text
    source: &'a str,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner over source code
    pub fn new(source: &'a str) -> Self {
        Scanner { source }
    }

    /// Scans all tokens from source code and returns them as a vector
    pub fn scan_tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = Position::default();

        for caps in TOKEN_PATTERN.captures_iter(self.source) {
            let Some(m) = caps.get(1) else { continue };
            let lexeme = m.as_str();
            if lexeme.is_empty() || lexeme.starts_with(';') {
                continue;
            }
            position.advance_to(self.source, m.start());
            tokens.push(Token::from_lexeme(lexeme, position.line, position.column));
        }

        tracing::trace!(count = tokens.len(), "scanned tokens");
        tokens
    }
}

/// Line/column tracking for token positions
struct Position {
    offset: usize,
    line: usize,
    column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    fn advance_to(&mut self, source: &str, offset: usize) {
        for c in source[self.offset..offset].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
    }
}
