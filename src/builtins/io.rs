//! Reading source text and files

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::error::{Error, Result};
use crate::parser::read_str;
use crate::runtime::{Environment, Value};

/// Register I/O builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(ReadStringBuiltin);
    registry.register(SlurpBuiltin);
}

/// read-string - Parse the first form in a string
pub struct ReadStringBuiltin;

impl Builtin for ReadStringBuiltin {
    fn name(&self) -> &str {
        "read-string"
    }

    fn description(&self) -> &str {
        "Parse the first form in a string without evaluating it"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        read_str(args[0].as_string()?)
    }
}

/// slurp - Whole file contents as a string
pub struct SlurpBuiltin;

impl Builtin for SlurpBuiltin {
    fn name(&self) -> &str {
        "slurp"
    }

    fn description(&self) -> &str {
        "Read an entire file into a string"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let path = args[0].as_string()?;
        tracing::debug!(path, "slurp");
        std::fs::read_to_string(path)
            .map(Value::String)
            .map_err(|e| Error::Io {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}
