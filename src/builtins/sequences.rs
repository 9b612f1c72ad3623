//! List and vector builtins
//!
//! Anything taking a sequence accepts lists and vectors alike. Results that
//! build a new sequence are always lists, except `vector`.

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::error::{Error, Result};
use crate::runtime::{Environment, SequentialView, Value};

/// Register sequence builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(ListBuiltin);
    registry.register(VectorBuiltin);
    registry.register(ConsBuiltin);
    registry.register(ConcatBuiltin);
    registry.register(FirstBuiltin);
    registry.register(RestBuiltin);
    registry.register(NthBuiltin);
    registry.register(CountBuiltin);
    registry.register(EmptyBuiltin);
    registry.register(SequentialBuiltin);
}

fn sequence<'a>(value: &'a Value) -> Result<&'a dyn SequentialView> {
    value
        .as_sequential()
        .ok_or_else(|| Error::type_error("list or vector", value))
}

/// list - Collect the arguments into a list
pub struct ListBuiltin;

impl Builtin for ListBuiltin {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "Collect the arguments into a list"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::list(args.to_vec()))
    }
}

/// vector - Collect the arguments into a vector
pub struct VectorBuiltin;

impl Builtin for VectorBuiltin {
    fn name(&self) -> &str {
        "vector"
    }

    fn description(&self) -> &str {
        "Collect the arguments into a vector"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::vector(args.to_vec()))
    }
}

/// cons - Prepend a value to a sequence
pub struct ConsBuiltin;

impl Builtin for ConsBuiltin {
    fn name(&self) -> &str {
        "cons"
    }

    fn description(&self) -> &str {
        "Prepend a value to a list or vector, returning a list"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let tail = sequence(&args[1])?;
        let mut items = Vec::with_capacity(tail.len() + 1);
        items.push(args[0].clone());
        items.extend_from_slice(tail.data());
        Ok(Value::list(items))
    }
}

/// concat - Join sequences end to end
pub struct ConcatBuiltin;

impl Builtin for ConcatBuiltin {
    fn name(&self) -> &str {
        "concat"
    }

    fn description(&self) -> &str {
        "Join any number of lists or vectors into one list"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let mut items = Vec::new();
        for arg in args {
            items.extend_from_slice(sequence(arg)?.data());
        }
        Ok(Value::list(items))
    }
}

/// first - First element, or nil
pub struct FirstBuiltin;

impl Builtin for FirstBuiltin {
    fn name(&self) -> &str {
        "first"
    }

    fn description(&self) -> &str {
        "First element of a sequence; nil for nil or an empty sequence"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        if let Value::Nil = args[0] {
            return Ok(Value::Nil);
        }
        Ok(sequence(&args[0])?.first().cloned().unwrap_or(Value::Nil))
    }
}

/// rest - Everything after the first element
pub struct RestBuiltin;

impl Builtin for RestBuiltin {
    fn name(&self) -> &str {
        "rest"
    }

    fn description(&self) -> &str {
        "All but the first element, as a list; empty for nil"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        if let Value::Nil = args[0] {
            return Ok(Value::list(vec![]));
        }
        Ok(Value::List(sequence(&args[0])?.rest()))
    }
}

/// nth - Element at an index
pub struct NthBuiltin;

impl Builtin for NthBuiltin {
    fn name(&self) -> &str {
        "nth"
    }

    fn description(&self) -> &str {
        "Element at a zero-based index; out of range is an error"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let seq = sequence(&args[0])?;
        let index = args[1].as_number()?;
        if index < 0.0 || index.fract() != 0.0 {
            return Err(Error::type_error("non-negative integer index", &args[1]));
        }
        seq.nth(index as usize).cloned()
    }
}

/// count - Number of elements
pub struct CountBuiltin;

impl Builtin for CountBuiltin {
    fn name(&self) -> &str {
        "count"
    }

    fn description(&self) -> &str {
        "Number of elements in a sequence or map; 0 for nil"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let count = match &args[0] {
            Value::Nil => 0,
            Value::Hashmap(map) => map.len(),
            other => sequence(other)?.len(),
        };
        Ok(Value::Number(count as f64))
    }
}

/// empty? - True for nil and for empty sequences or maps
pub struct EmptyBuiltin;

impl Builtin for EmptyBuiltin {
    fn name(&self) -> &str {
        "empty?"
    }

    fn description(&self) -> &str {
        "True if a sequence or map has no elements"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        let empty = match &args[0] {
            Value::Nil => true,
            Value::Hashmap(map) => map.is_empty(),
            other => sequence(other)?.is_empty(),
        };
        Ok(Value::Bool(empty))
    }
}

/// sequential? - True for lists and vectors
pub struct SequentialBuiltin;

impl Builtin for SequentialBuiltin {
    fn name(&self) -> &str {
        "sequential?"
    }

    fn description(&self) -> &str {
        "True for lists and vectors"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::Bool(args[0].as_sequential().is_some()))
    }
}
