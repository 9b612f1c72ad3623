//! # Wisp - A small Lisp interpreter
//!
//! Wisp reads S-expressions into a tree of [`Value`]s and evaluates them
//! against a chain of lexical [`Environment`]s. It has closures with variadic
//! parameters, proper tail calls, quasiquote, user-defined macros and atoms.
//!
//! ## Quick Start
//!
//! ```rust
//! use wisp::{Interpreter, Value};
//!
//! # fn main() -> wisp::Result<()> {
//! let interp = Interpreter::new()?;
//!
//! interp.eval_str("(def! square (fn* (x) (* x x)))")?;
//! assert_eq!(interp.eval_str("(square 12)")?, Value::Number(144.0));
//!
//! // rep renders results (and errors) the way the REPL prints them
//! assert_eq!(interp.rep("(list 1 \"two\" :three)"), "(1 \"two\" :three)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! source ─▶ Scanner ─▶ tokens ─▶ Reader ─▶ Value ─▶ eval ─▶ Value ─▶ pr_str
//! ```
//!
//! Each stage is usable on its own:
//!
//! ```rust
//! use wisp::{builtins, eval, read_str, Value};
//!
//! # fn main() -> wisp::Result<()> {
//! let env = builtins::base_environment();
//! let form = read_str("(let* (a 2 b 3) (* a b))")?;
//! assert_eq!(eval(&form, &env)?, Value::Number(6.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Special forms
//!
//! `def!`, `let*`, `do`, `if`, `fn*`, `quote`, `quasiquote` (with `unquote`
//! and `splice-unquote`), `defmacro!` and `macroexpand`. Everything else in
//! call position is an ordinary function call.
//!
//! ## Errors
//!
//! All fallible operations return [`Result`]. [`Error::is_incomplete`] tells
//! an interactive caller that the input stopped in the middle of a form and
//! more lines should be read.

#![warn(missing_docs)]

/// Version of the Wisp interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod builtins;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use builtins::{Builtin, BuiltinRegistry};
pub use config::Config;
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{Scanner, Token, TokenKind};
pub use parser::{read_all, read_str, Reader};
pub use runtime::printer::pr_str;
pub use runtime::{apply, eval, Environment, Interpreter, Value};
