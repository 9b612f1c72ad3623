//! String building and printing

use std::io::Write;

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::error::{Error, Result};
use crate::runtime::{printer, Environment, Value};

/// Register string and printing builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(StrBuiltin);
    registry.register(PrStrBuiltin);
    registry.register(PrintlnBuiltin);
    registry.register(PrnBuiltin);
}

fn render(args: &[Value], readably: bool, sep: &str) -> String {
    args.iter()
        .map(|v| printer::pr_str(v, readably))
        .collect::<Vec<_>>()
        .join(sep)
}

fn print_line(line: &str) -> Result<Value> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", line).map_err(|e| Error::runtime(format!("stdout: {}", e)))?;
    Ok(Value::Nil)
}

/// str - Concatenate raw renderings
pub struct StrBuiltin;

impl Builtin for StrBuiltin {
    fn name(&self) -> &str {
        "str"
    }

    fn description(&self) -> &str {
        "Concatenate the non-readable renderings of the arguments"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::String(render(args, false, "")))
    }
}

/// pr-str - Readable renderings joined by spaces
pub struct PrStrBuiltin;

impl Builtin for PrStrBuiltin {
    fn name(&self) -> &str {
        "pr-str"
    }

    fn description(&self) -> &str {
        "Join the readable renderings of the arguments with spaces"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::String(render(args, true, " ")))
    }
}

/// println - Print raw renderings
pub struct PrintlnBuiltin;

impl Builtin for PrintlnBuiltin {
    fn name(&self) -> &str {
        "println"
    }

    fn description(&self) -> &str {
        "Print the non-readable renderings joined by spaces, then a newline"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        print_line(&render(args, false, " "))
    }
}

/// prn - Print readable renderings
pub struct PrnBuiltin;

impl Builtin for PrnBuiltin {
    fn name(&self) -> &str {
        "prn"
    }

    fn description(&self) -> &str {
        "Print the readable renderings joined by spaces, then a newline"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        print_line(&render(args, true, " "))
    }
}
