//! Mutable reference cells

use crate::builtins::{require_at_least, Builtin, BuiltinRegistry};
use crate::error::Result;
use crate::runtime::{apply, Environment, Value};

/// Register atom builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(AtomBuiltin);
    registry.register(DerefBuiltin);
    registry.register(ResetBuiltin);
    registry.register(SwapBuiltin);
}

/// atom - Fresh cell holding a value
pub struct AtomBuiltin;

impl Builtin for AtomBuiltin {
    fn name(&self) -> &str {
        "atom"
    }

    fn description(&self) -> &str {
        "Create a mutable cell holding the value"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::atom(args[0].clone()))
    }
}

/// deref - Current contents of an atom
pub struct DerefBuiltin;

impl Builtin for DerefBuiltin {
    fn name(&self) -> &str {
        "deref"
    }

    fn description(&self) -> &str {
        "Current contents of an atom"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(args[0].as_atom()?.borrow().clone())
    }
}

/// reset! - Replace an atom's contents
pub struct ResetBuiltin;

impl Builtin for ResetBuiltin {
    fn name(&self) -> &str {
        "reset!"
    }

    fn description(&self) -> &str {
        "Replace an atom's contents and return the new value"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let cell = args[0].as_atom()?;
        *cell.borrow_mut() = args[1].clone();
        Ok(args[1].clone())
    }
}

/// swap! - Update an atom with a function of its contents
pub struct SwapBuiltin;

impl Builtin for SwapBuiltin {
    fn name(&self) -> &str {
        "swap!"
    }

    fn description(&self) -> &str {
        "Set an atom to (f current extra-args...) and return the new value"
    }

    fn call(&self, env: &Environment, args: &[Value]) -> Result<Value> {
        require_at_least(self.name(), args, 2)?;
        let cell = args[0].as_atom()?;

        // The cell must not stay borrowed while `f` runs; it may deref the atom.
        let current = cell.borrow().clone();
        let mut call_args = Vec::with_capacity(args.len() - 1);
        call_args.push(current);
        call_args.extend_from_slice(&args[2..]);

        let updated = apply(&args[1], &call_args, env)?;
        *cell.borrow_mut() = updated.clone();
        Ok(updated)
    }
}
