//! Hash-map builtins
//!
//! Maps are immutable values; `assoc` and `dissoc` return updated copies.

use crate::builtins::{require_at_least, Builtin, BuiltinRegistry};
use crate::error::Result;
use crate::runtime::{Environment, Hashmap, Value};

/// Register hash-map builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(HashMapBuiltin);
    registry.register(AssocBuiltin);
    registry.register(DissocBuiltin);
    registry.register(GetBuiltin);
    registry.register(ContainsBuiltin);
    registry.register(KeysBuiltin);
    registry.register(ValsBuiltin);
}

/// hash-map - Build a map from alternating keys and values
pub struct HashMapBuiltin;

impl Builtin for HashMapBuiltin {
    fn name(&self) -> &str {
        "hash-map"
    }

    fn description(&self) -> &str {
        "Build a map from alternating keys and values"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::hashmap(Hashmap::from_forms(args)?))
    }
}

/// assoc - Copy of a map with entries added or replaced
pub struct AssocBuiltin;

impl Builtin for AssocBuiltin {
    fn name(&self) -> &str {
        "assoc"
    }

    fn description(&self) -> &str {
        "Copy of a map with the given key/value pairs added or replaced"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        require_at_least(self.name(), args, 1)?;
        let mut map = args[0].as_hashmap()?.clone();
        for (key, value) in Hashmap::from_forms(&args[1..])?.iter() {
            map.insert(key.clone(), value.clone());
        }
        Ok(Value::hashmap(map))
    }
}

/// dissoc - Copy of a map without the given keys
pub struct DissocBuiltin;

impl Builtin for DissocBuiltin {
    fn name(&self) -> &str {
        "dissoc"
    }

    fn description(&self) -> &str {
        "Copy of a map with the given keys removed"
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        require_at_least(self.name(), args, 1)?;
        let mut map = args[0].as_hashmap()?.clone();
        for key in &args[1..] {
            map.remove(key);
        }
        Ok(Value::hashmap(map))
    }
}

/// get - Value stored under a key, or nil
pub struct GetBuiltin;

impl Builtin for GetBuiltin {
    fn name(&self) -> &str {
        "get"
    }

    fn description(&self) -> &str {
        "Value stored under a key; nil when missing or when the map is nil"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        if let Value::Nil = args[0] {
            return Ok(Value::Nil);
        }
        let map = args[0].as_hashmap()?;
        Ok(map.get(&args[1]).cloned().unwrap_or(Value::Nil))
    }
}

/// contains? - True if a key has an entry
pub struct ContainsBuiltin;

impl Builtin for ContainsBuiltin {
    fn name(&self) -> &str {
        "contains?"
    }

    fn description(&self) -> &str {
        "True if the map has an entry for the key"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::Bool(args[0].as_hashmap()?.contains_key(&args[1])))
    }
}

/// keys - List of a map's keys
pub struct KeysBuiltin;

impl Builtin for KeysBuiltin {
    fn name(&self) -> &str {
        "keys"
    }

    fn description(&self) -> &str {
        "List of the map's keys"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::list(args[0].as_hashmap()?.keys()))
    }
}

/// vals - List of a map's values
pub struct ValsBuiltin;

impl Builtin for ValsBuiltin {
    fn name(&self) -> &str {
        "vals"
    }

    fn description(&self) -> &str {
        "List of the map's values"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::list(args[0].as_hashmap()?.values()))
    }
}
