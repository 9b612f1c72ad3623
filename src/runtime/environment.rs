use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::{Symbol, Value};

/// Marker separating positional parameters from the variadic tail
const VARIADIC_MARKER: &str = "&";

/// Environment for variable scoping
///
/// A handle to one frame in a chain of frames. Cloning the handle shares the
/// frame, so a closure and the scope that created it see the same bindings.
#[derive(Clone)]
pub struct Environment(Rc<Frame>);

/// Single frame in the environment chain
struct Frame {
    /// Variables defined in this frame
    variables: RefCell<HashMap<Symbol, Value>>,
    /// Enclosing frame (None for the root)
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a new frame, optionally chained to `parent`
    pub fn new(parent: Option<&Environment>) -> Self {
        Environment(Rc::new(Frame {
            variables: RefCell::new(HashMap::new()),
            parent: parent.cloned(),
        }))
    }

    /// Creates a child frame with `params` bound positionally to `args`
    ///
    /// If the second-to-last parameter is `&`, the last parameter receives a
    /// list of every remaining argument. Missing positional arguments are an
    /// error; surplus arguments without `&` are ignored.
    pub fn bind(&self, params: &[Value], args: &[Value]) -> Result<Environment> {
        let child = Environment::new(Some(self));

        let (positional, rest) = match params.iter().position(|p| p.is_symbol(VARIADIC_MARKER)) {
            Some(idx) if idx + 2 == params.len() => (&params[..idx], Some(&params[idx + 1])),
            Some(_) => {
                return Err(Error::MalformedBinder {
                    message: "'&' must be followed by exactly one parameter".to_string(),
                })
            }
            None => (params, None),
        };

        if args.len() < positional.len() {
            return Err(Error::BindArity {
                expected: positional.len(),
                got: args.len(),
            });
        }

        for (param, arg) in positional.iter().zip(args) {
            child.set(binder_symbol(param)?, arg.clone());
        }

        if let Some(rest) = rest {
            let tail = args[positional.len()..].to_vec();
            child.set(binder_symbol(rest)?, Value::list(tail));
        }

        Ok(child)
    }

    /// Binds `symbol` in this frame, shadowing any outer binding
    pub fn set(&self, symbol: Symbol, value: Value) {
        self.0.variables.borrow_mut().insert(symbol, value);
    }

    /// Finds the innermost frame that binds `name`
    pub fn find(&self, name: &str) -> Option<Environment> {
        let mut env = self;
        loop {
            if env.0.variables.borrow().contains_key(name) {
                return Some(env.clone());
            }
            env = env.0.parent.as_ref()?;
        }
    }

    /// Looks a symbol up by walking outward from this frame
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut env = self;
        loop {
            if let Some(value) = env.0.variables.borrow().get(name) {
                return Some(value.clone());
            }
            env = env.0.parent.as_ref()?;
        }
    }

    /// Like [`lookup`](Self::lookup), but a missing binding is an error
    pub fn get(&self, name: &str) -> Result<Value> {
        self.lookup(name).ok_or_else(|| Error::UndefinedSymbol {
            name: name.to_string(),
        })
    }

    /// Checks if a symbol is bound in any enclosing frame
    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Outermost frame of the chain
    pub fn root(&self) -> Environment {
        let mut env = self;
        while let Some(parent) = &env.0.parent {
            env = parent;
        }
        env.clone()
    }

    /// Number of frames from here to the root (1 for the root)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut env = self;
        while let Some(parent) = &env.0.parent {
            depth += 1;
            env = parent;
        }
        depth
    }

    /// True if both handles refer to the same frame
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}

// Frames can be reached from closures they contain, so print a summary only.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.0.variables.borrow().len())
            .field("depth", &self.depth())
            .finish()
    }
}

fn binder_symbol(param: &Value) -> Result<Symbol> {
    match param {
        Value::Symbol(s) => Ok(s.clone()),
        other => Err(Error::MalformedBinder {
            message: format!("parameter must be a symbol, got {}", other.type_name()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(names: &[&str]) -> Vec<Value> {
        names.iter().map(|n| Value::symbol(n)).collect()
    }

    #[test]
    fn test_basic_set_and_get() {
        let env = Environment::new(None);
        env.set(Symbol::new("x"), Value::Number(42.0));

        assert_eq!(env.get("x").unwrap(), Value::Number(42.0));
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new(None);
        match env.get("undefined") {
            Err(Error::UndefinedSymbol { name }) => assert_eq!(name, "undefined"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_shadowing_leaves_parent_untouched() {
        let global = Environment::new(None);
        global.set(Symbol::new("x"), Value::Number(10.0));

        let inner = Environment::new(Some(&global));
        inner.set(Symbol::new("x"), Value::string("shadowed"));
        inner.set(Symbol::new("y"), Value::Number(30.0));

        assert_eq!(inner.get("x").unwrap(), Value::string("shadowed"));
        assert_eq!(global.get("x").unwrap(), Value::Number(10.0));
        assert!(global.get("y").is_err());
    }

    #[test]
    fn test_find_returns_binding_frame() {
        let global = Environment::new(None);
        global.set(Symbol::new("x"), Value::Number(1.0));
        let inner = Environment::new(Some(&global));

        assert!(inner.find("x").unwrap().ptr_eq(&global));
        assert!(inner.find("missing").is_none());
        assert!(inner.root().ptr_eq(&global));
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn test_bind_positional() {
        let env = Environment::new(None);
        let child = env
            .bind(&syms(&["a", "b"]), &[Value::Number(1.0), Value::Number(2.0)])
            .unwrap();

        assert_eq!(child.get("a").unwrap(), Value::Number(1.0));
        assert_eq!(child.get("b").unwrap(), Value::Number(2.0));
        assert!(env.get("a").is_err());
    }

    #[test]
    fn test_bind_variadic_tail() {
        let env = Environment::new(None);
        let args = [Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)];
        let child = env.bind(&syms(&["a", "&", "rest"]), &args).unwrap();

        assert_eq!(child.get("a").unwrap(), Value::Number(1.0));
        assert_eq!(
            child.get("rest").unwrap(),
            Value::list(vec![Value::Number(2.0), Value::Number(3.0)])
        );

        let empty_tail = env.bind(&syms(&["&", "xs"]), &[]).unwrap();
        assert_eq!(empty_tail.get("xs").unwrap(), Value::list(vec![]));
    }

    #[test]
    fn test_bind_too_few_arguments() {
        let env = Environment::new(None);
        let result = env.bind(&syms(&["a", "b"]), &[Value::Number(1.0)]);
        assert!(matches!(
            result,
            Err(Error::BindArity {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_bind_malformed() {
        let env = Environment::new(None);
        assert!(matches!(
            env.bind(&syms(&["a", "&"]), &[Value::Nil]),
            Err(Error::MalformedBinder { .. })
        ));
        assert!(matches!(
            env.bind(&[Value::Number(1.0)], &[Value::Nil]),
            Err(Error::MalformedBinder { .. })
        ));
    }
}
