use serde::{Deserialize, Serialize};

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Original text of the token
    pub lexeme: String,
    /// Line number where token appears (1-indexed)
    pub line: usize,
    /// Column number where token starts (1-indexed)
    pub column: usize,
}

impl Token {
    /// Creates a new token with the given properties
    pub fn new(kind: TokenKind, lexeme: String, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme,
            line,
            column,
        }
    }

    /// Classifies `lexeme` and builds the token
    pub fn from_lexeme(lexeme: &str, line: usize, column: usize) -> Self {
        Token::new(TokenKind::classify(lexeme), lexeme.to_string(), line, column)
    }
}

/// All possible token types in Wisp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,

    // Reader macros
    /// `'` (quote)
    Quote,
    /// `` ` `` (quasiquote)
    Backtick,
    /// `~` (unquote)
    Tilde,
    /// `~@` (splice-unquote)
    TildeAt,
    /// `^` (metadata prefix)
    Caret,
    /// `@` (deref prefix)
    At,

    /// Anything else: numbers, strings, keywords, symbols
    Atom,
}

impl TokenKind {
    /// Maps punctuation to its kind; everything else is an atom
    pub fn classify(lexeme: &str) -> Self {
        match lexeme {
            "(" => TokenKind::LeftParen,
            ")" => TokenKind::RightParen,
            "[" => TokenKind::LeftBracket,
            "]" => TokenKind::RightBracket,
            "{" => TokenKind::LeftBrace,
            "}" => TokenKind::RightBrace,
            "'" => TokenKind::Quote,
            "`" => TokenKind::Backtick,
            "~" => TokenKind::Tilde,
            "~@" => TokenKind::TildeAt,
            "^" => TokenKind::Caret,
            "@" => TokenKind::At,
            _ => TokenKind::Atom,
        }
    }

    /// Closing delimiter for an opening one
    pub fn closer(self) -> Option<TokenKind> {
        match self {
            TokenKind::LeftParen => Some(TokenKind::RightParen),
            TokenKind::LeftBracket => Some(TokenKind::RightBracket),
            TokenKind::LeftBrace => Some(TokenKind::RightBrace),
            _ => None,
        }
    }

    /// True for `)`, `]` and `}`
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace
        )
    }
}
