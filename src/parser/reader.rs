use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};
use crate::lexer::{Scanner, Token, TokenKind};
use crate::runtime::{Hashmap, Value};

lazy_static! {
    static ref NUMBER_PATTERN: Regex = Regex::new(r"^-?[0-9]+$").expect("number pattern compiles");
}

/// Reads the first form in `source`
///
/// Anything after the first complete form is ignored. Empty input is an
/// underflow, so a REPL can tell "nothing yet" from "malformed".
pub fn read_str(source: &str) -> Result<Value> {
    Reader::from_source(source).read_form()
}

/// Reads every top-level form in `source`
pub fn read_all(source: &str) -> Result<Vec<Value>> {
    let mut reader = Reader::from_source(source);
    let mut forms = Vec::new();
    while !reader.is_at_end() {
        forms.push(reader.read_form()?);
    }
    Ok(forms)
}

/// Recursive-descent reader over a token stream
pub struct Reader {
    tokens: Vec<Token>,
    current: usize,
}

impl Reader {
    /// Creates a reader over already-scanned tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Reader { tokens, current: 0 }
    }

    /// Scans `source` and creates a reader over its tokens
    pub fn from_source(source: &str) -> Self {
        Reader::new(Scanner::new(source).scan_tokens())
    }

    /// True once every token has been consumed
    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.current.min(self.tokens.len())..]
    }

    /// Reads the next complete form
    pub fn read_form(&mut self) -> Result<Value> {
        let kind = self.peek().ok_or(Error::UnexpectedEof)?.kind;

        match kind {
            TokenKind::Quote => self.read_prefixed("quote"),
            TokenKind::Backtick => self.read_prefixed("quasiquote"),
            TokenKind::Tilde => self.read_prefixed("unquote"),
            TokenKind::TildeAt => self.read_prefixed("splice-unquote"),
            TokenKind::At => self.read_prefixed("deref"),
            TokenKind::Caret => self.read_meta(),
            TokenKind::LeftParen => Ok(Value::list(self.read_sequence()?)),
            TokenKind::LeftBracket => Ok(Value::vector(self.read_sequence()?)),
            TokenKind::LeftBrace => {
                let forms = self.read_sequence()?;
                Ok(Value::hashmap(Hashmap::from_forms(&forms)?))
            }
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace => {
                let token = &self.tokens[self.current];
                Err(syntax_error(token, format!("unexpected '{}'", token.lexeme)))
            }
            TokenKind::Atom => self.read_atom(),
        }
    }

    /// `'x` → `(quote x)` and friends
    fn read_prefixed(&mut self, symbol: &str) -> Result<Value> {
        self.advance();
        let form = self.read_form()?;
        Ok(Value::list(vec![Value::symbol(symbol), form]))
    }

    /// `^meta x` → `(with-meta x meta)`
    fn read_meta(&mut self) -> Result<Value> {
        self.advance();
        let meta = self.read_form()?;
        let form = self.read_form()?;
        Ok(Value::list(vec![Value::symbol("with-meta"), form, meta]))
    }

    /// Reads forms between an opening delimiter and its matching closer
    fn read_sequence(&mut self) -> Result<Vec<Value>> {
        let open = self.advance().ok_or(Error::UnexpectedEof)?;
        let close = open.kind.closer().ok_or_else(|| {
            syntax_error(open, format!("expected opening delimiter, got '{}'", open.lexeme))
        })?;

        let mut forms = Vec::new();
        loop {
            let token = self.peek().ok_or(Error::UnexpectedEof)?;
            if token.kind == close {
                self.advance();
                return Ok(forms);
            }
            if token.kind.is_closer() {
                return Err(syntax_error(
                    token,
                    format!("expected closing delimiter, got '{}'", token.lexeme),
                ));
            }
            forms.push(self.read_form()?);
        }
    }

    fn read_atom(&mut self) -> Result<Value> {
        let token = self.advance().ok_or(Error::UnexpectedEof)?;
        let text = token.lexeme.as_str();

        let value = match text {
            "nil" => Value::Nil,
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ if text.starts_with(':') => Value::keyword(&text[1..]),
            _ if NUMBER_PATTERN.is_match(text) => match text.parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => return Err(syntax_error(token, "number parse error".to_string())),
            },
            _ if text.starts_with('"') => {
                if !is_terminated_string(text) {
                    return Err(syntax_error(token, "expected '\"', got EOF".to_string()));
                }
                Value::String(text[1..text.len() - 1].to_string())
            }
            _ => Value::symbol(text),
        };
        Ok(value)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.current)?;
        self.current += 1;
        Some(token)
    }
}

// The closing quote must exist and must not itself be escaped.
fn is_terminated_string(token: &str) -> bool {
    if token.len() < 2 || !token.ends_with('"') {
        return false;
    }
    let body = &token[1..token.len() - 1];
    let backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 0
}

fn syntax_error(token: &Token, message: String) -> Error {
    Error::SyntaxError {
        line: token.line,
        col: token.column,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_atoms() {
        assert_eq!(read_str("nil").unwrap(), Value::Nil);
        assert_eq!(read_str("true").unwrap(), Value::Bool(true));
        assert_eq!(read_str("false").unwrap(), Value::Bool(false));
        assert_eq!(read_str("-42").unwrap(), num(-42.0));
        assert_eq!(read_str(":kw").unwrap(), Value::keyword("kw"));
        assert_eq!(read_str(r#""hi there""#).unwrap(), Value::string("hi there"));
        assert_eq!(read_str("abc-1").unwrap(), Value::symbol("abc-1"));
        assert_eq!(read_str("-").unwrap(), Value::symbol("-"));
    }

    #[test]
    fn test_strings_are_not_unescaped() {
        assert_eq!(read_str(r#""a\nb""#).unwrap(), Value::string(r"a\nb"));
    }

    #[test]
    fn test_nested_list() {
        let form = read_str("(+ 1 (* 2 3))").unwrap();
        let expected = Value::list(vec![
            Value::symbol("+"),
            num(1.0),
            Value::list(vec![Value::symbol("*"), num(2.0), num(3.0)]),
        ]);
        assert_eq!(form, expected);
        assert!(matches!(form, Value::List(_)));
    }

    #[test]
    fn test_vector_is_distinct_variant() {
        assert!(matches!(read_str("[1 2]").unwrap(), Value::Vector(_)));
        assert!(matches!(read_str("()").unwrap(), Value::List(_)));
    }

    #[test]
    fn test_hashmap() {
        let form = read_str(r#"{:a 1 "b" 2}"#).unwrap();
        let map = form.as_hashmap().unwrap();
        assert_eq!(map.get(&Value::keyword("a")), Some(&num(1.0)));
        assert_eq!(map.get(&Value::string("b")), Some(&num(2.0)));
        assert!(matches!(read_str("{:a}"), Err(Error::OddMapEntries { count: 1 })));
    }

    #[test]
    fn test_reader_macros() {
        let cases = [
            ("'x", "quote"),
            ("`x", "quasiquote"),
            ("~x", "unquote"),
            ("~@x", "splice-unquote"),
            ("@x", "deref"),
        ];
        for (source, head) in cases {
            assert_eq!(
                read_str(source).unwrap(),
                Value::list(vec![Value::symbol(head), Value::symbol("x")]),
                "reading {}",
                source
            );
        }
    }

    #[test]
    fn test_meta() {
        assert_eq!(
            read_str("^{:a 1} [1]").unwrap(),
            Value::list(vec![
                Value::symbol("with-meta"),
                Value::vector(vec![num(1.0)]),
                read_str("{:a 1}").unwrap(),
            ])
        );
    }

    #[test]
    fn test_underflow_vs_syntax() {
        assert!(matches!(read_str("(1 2"), Err(Error::UnexpectedEof)));
        assert!(matches!(read_str("[1 (2"), Err(Error::UnexpectedEof)));
        assert!(matches!(read_str(""), Err(Error::UnexpectedEof)));
        assert!(matches!(read_str("'"), Err(Error::UnexpectedEof)));
        assert!(matches!(read_str(")"), Err(Error::SyntaxError { .. })));
        assert!(matches!(read_str("(1 2]"), Err(Error::SyntaxError { .. })));
        assert!(matches!(read_str(r#""abc"#), Err(Error::SyntaxError { .. })));
        assert!(matches!(read_str(r#""abc\""#), Err(Error::SyntaxError { .. })));
    }

    #[test]
    fn test_read_all() {
        let forms = read_all("(def! a 1) ; note\n a").unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[1], Value::symbol("a"));
    }

    #[test]
    fn test_remaining() {
        let mut reader = Reader::from_source("1 2 3");
        reader.read_form().unwrap();
        assert_eq!(reader.remaining().len(), 2);
    }
}
