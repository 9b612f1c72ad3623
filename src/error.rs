//! Error types for the Wisp interpreter

use thiserror::Error;

use crate::runtime::{printer, Value};

/// Wisp interpreter errors
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered while reading
    ///
    /// **Triggered by:** A closing token with no matching opener, or an
    /// unterminated string literal
    /// **Example:** `)`, `(+ 1 2]`, `"abc`
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Input ended before the current form was complete
    ///
    /// **Triggered by:** An unclosed `(`, `[` or `{`, or a reader macro with
    /// nothing after it
    /// **Recovery:** The REPL keeps reading lines until the form closes
    #[error("Unexpected end of input: more input expected")]
    UnexpectedEof,

    // Runtime errors
    /// Symbol not bound in any enclosing frame
    ///
    /// **Triggered by:** Evaluating a symbol that was never defined
    /// **Example:** `(undefined-sym)`
    #[error("'{name}' not found")]
    UndefinedSymbol {
        /// Symbol name
        name: String,
    },

    /// Too few arguments for a closure's positional parameters
    #[error("Wrong number of arguments: expected {expected}, got {got}")]
    BindArity {
        /// Number of positional parameters
        expected: usize,
        /// Number of arguments supplied
        got: usize,
    },

    /// Parameter or binding list with the wrong shape
    ///
    /// **Example:** `(fn* x x)`, `(let* (x) x)`, `(fn* (a &) a)`
    #[error("Malformed binder: {message}")]
    MalformedBinder {
        /// Error description
        message: String,
    },

    /// Special form or native function invoked with the wrong argument count
    #[error("Wrong number of arguments to {form}: {reason}")]
    Arity {
        /// Form or function name
        form: String,
        /// What was expected
        reason: String,
    },

    /// Type mismatch error
    ///
    /// **Example:** `(+ "hello" 5)`, `(deref 1)`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Attempt to call a non-callable value
    #[error("Attempt to call non-function {value}")]
    NotCallable {
        /// Printed form of the offending value
        value: String,
    },

    /// Value raised with `throw`
    #[error("Uncaught exception: {}", printer::pr_str(.0, true))]
    UserError(Value),

    /// Sequence index out of bounds
    #[error("Index out of bounds: {index} for sequence of length {length}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Sequence length
        length: usize,
    },

    /// Hashmap built from an odd number of forms
    #[error("Odd number of forms ({count}) for hash-map")]
    OddMapEntries {
        /// Number of forms supplied
        count: usize,
    },

    /// File could not be read
    #[error("Problem reading source file {path}: {message}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying error
        message: String,
    },

    /// General runtime error
    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// More input would let the reader finish
    Incomplete,
    /// Raised by the program itself via `throw`
    User,
    /// Aborts the current top-level evaluation
    Fatal,
}

impl Error {
    /// Create a runtime error with a message
    pub fn runtime(msg: impl Into<String>) -> Self {
        Error::RuntimeError(msg.into())
    }

    /// Create a type error from an expected type name and the offending value
    pub fn type_error(expected: impl Into<String>, got: &Value) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.type_name().to_string(),
        }
    }

    /// Create an arity error for a special form or native function
    pub fn arity(form: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Arity {
            form: form.into(),
            reason: reason.into(),
        }
    }

    /// True when the reader ran out of input mid-form
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Error::UnexpectedEof)
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::UnexpectedEof => ErrorSeverity::Incomplete,
            Error::UserError(_) => ErrorSeverity::User,
            _ => ErrorSeverity::Fatal,
        }
    }
}

/// Result type for Wisp operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_prints_payload() {
        let err = Error::UserError(Value::String("boom".to_string()));
        assert_eq!(err.to_string(), "Uncaught exception: \"boom\"");
        assert_eq!(err.classify(), ErrorSeverity::User);
    }

    #[test]
    fn test_underflow_is_incomplete() {
        assert!(Error::UnexpectedEof.is_incomplete());
        assert!(!Error::runtime("x").is_incomplete());
        assert_eq!(Error::UnexpectedEof.classify(), ErrorSeverity::Incomplete);
    }
}
