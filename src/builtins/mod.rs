//! Native function system for Wisp
//!
//! Every host-provided function implements [`Builtin`]. The registry installs
//! them into the root environment as `NativeFunction` values, so the evaluator
//! sees them as ordinary bindings.

pub mod arithmetic;
pub mod atoms;
pub mod control;
pub mod hashmaps;
pub mod io;
pub mod predicates;
pub mod sequences;
pub mod strings;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Symbol, Value};

/// Builtin trait - all native functions must implement this
pub trait Builtin {
    /// Name the function is bound to
    fn name(&self) -> &str;

    /// Function description
    fn description(&self) -> &str;

    /// Execute the function with already-evaluated arguments
    fn call(&self, env: &Environment, args: &[Value]) -> Result<Value>;

    /// Exact argument count, checked before `call`
    fn arity(&self) -> Option<usize> {
        None // None means variadic
    }
}

impl fmt::Debug for dyn Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name())
    }
}

/// Invokes a builtin after checking its declared arity
pub fn invoke(builtin: &dyn Builtin, env: &Environment, args: &[Value]) -> Result<Value> {
    if let Some(expected) = builtin.arity() {
        if args.len() != expected {
            return Err(Error::arity(
                builtin.name(),
                format!("expected {}, got {}", expected, args.len()),
            ));
        }
    }
    builtin.call(env, args)
}

/// Checks a lower bound on the argument count for variadic builtins
pub(crate) fn require_at_least(name: &str, args: &[Value], min: usize) -> Result<()> {
    if args.len() < min {
        return Err(Error::arity(
            name,
            format!("expected at least {}, got {}", min, args.len()),
        ));
    }
    Ok(())
}

/// Builtin registry
pub struct BuiltinRegistry {
    builtins: HashMap<String, Rc<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// Create new registry with the standard native functions
    pub fn new() -> Self {
        let mut registry = BuiltinRegistry::empty();

        arithmetic::register(&mut registry);
        sequences::register(&mut registry);
        hashmaps::register(&mut registry);
        predicates::register(&mut registry);
        atoms::register(&mut registry);
        strings::register(&mut registry);
        io::register(&mut registry);
        control::register(&mut registry);

        registry
    }

    /// Create empty registry (for testing)
    pub fn empty() -> Self {
        BuiltinRegistry {
            builtins: HashMap::new(),
        }
    }

    /// Register a builtin
    pub fn register<T: Builtin + 'static>(&mut self, builtin: T) {
        let name = builtin.name().to_string();
        self.builtins.insert(name, Rc::new(builtin));
    }

    /// Get builtin by name
    pub fn get(&self, name: &str) -> Result<Rc<dyn Builtin>> {
        self.builtins
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UndefinedSymbol {
                name: name.to_string(),
            })
    }

    /// Check if builtin exists
    pub fn has(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// List all builtin names
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.builtins.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get builtin count
    pub fn count(&self) -> usize {
        self.builtins.len()
    }

    /// Binds every builtin into `env`'s local frame
    pub fn install(&self, env: &Environment) {
        for (name, builtin) in &self.builtins {
            env.set(Symbol::new(name), Value::NativeFunction(builtin.clone()));
        }
        tracing::debug!(count = self.builtins.len(), "installed native functions");
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Root environment holding every native function
///
/// Call once at startup; the evaluator never reaches for global state.
pub fn base_environment() -> Environment {
    let env = Environment::new(None);
    BuiltinRegistry::new().install(&env);
    env
}
