//! Lexical analysis for Wisp
//!
//! Converts source text into a flat stream of tokens. Whitespace, commas and
//! `;` line comments never reach the reader.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};
