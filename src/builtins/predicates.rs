//! Type predicates and symbol/keyword constructors

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::error::Result;
use crate::runtime::{Environment, Value};

/// Register type predicate builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(NilpBuiltin);
    registry.register(TruepBuiltin);
    registry.register(FalsepBuiltin);
    registry.register(SymbolpBuiltin);
    registry.register(KeywordpBuiltin);
    registry.register(ListpBuiltin);
    registry.register(VectorpBuiltin);
    registry.register(MappBuiltin);
    registry.register(AtompBuiltin);
    registry.register(FnpBuiltin);

    registry.register(SymbolBuiltin);
    registry.register(KeywordBuiltin);
}

macro_rules! predicate_builtin {
    ($name:ident, $str:expr, $desc:expr, $pattern:pat) => {
        #[doc = $desc]
        pub struct $name;

        impl Builtin for $name {
            fn name(&self) -> &str {
                $str
            }

            fn description(&self) -> &str {
                $desc
            }

            fn arity(&self) -> Option<usize> {
                Some(1)
            }

            fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
                Ok(Value::Bool(matches!(&args[0], $pattern)))
            }
        }
    };
}

predicate_builtin!(NilpBuiltin, "nil?", "True for nil", Value::Nil);
predicate_builtin!(TruepBuiltin, "true?", "True only for the boolean true", Value::Bool(true));
predicate_builtin!(FalsepBuiltin, "false?", "True only for the boolean false", Value::Bool(false));
predicate_builtin!(SymbolpBuiltin, "symbol?", "True for symbols", Value::Symbol(_));
predicate_builtin!(KeywordpBuiltin, "keyword?", "True for keywords", Value::Keyword(_));
predicate_builtin!(ListpBuiltin, "list?", "True for lists, but not vectors", Value::List(_));
predicate_builtin!(VectorpBuiltin, "vector?", "True for vectors", Value::Vector(_));
predicate_builtin!(MappBuiltin, "map?", "True for hash-maps", Value::Hashmap(_));
predicate_builtin!(AtompBuiltin, "atom?", "True for atoms", Value::Atom(_));

/// fn? - True for anything callable
pub struct FnpBuiltin;

impl Builtin for FnpBuiltin {
    fn name(&self) -> &str {
        "fn?"
    }

    fn description(&self) -> &str {
        "True for native functions and closures, false for macros"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::Bool(args[0].is_callable()))
    }
}

/// symbol - Symbol named by a string
pub struct SymbolBuiltin;

impl Builtin for SymbolBuiltin {
    fn name(&self) -> &str {
        "symbol"
    }

    fn description(&self) -> &str {
        "Symbol whose name is the given string"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::symbol(args[0].as_string()?))
    }
}

/// keyword - Keyword named by a string
pub struct KeywordBuiltin;

impl Builtin for KeywordBuiltin {
    fn name(&self) -> &str {
        "keyword"
    }

    fn description(&self) -> &str {
        "Keyword whose name is the given string; keywords pass through"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        match &args[0] {
            Value::Keyword(_) => Ok(args[0].clone()),
            other => Ok(Value::keyword(other.as_string()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::invoke;

    fn check(builtin: &dyn Builtin, value: Value) -> bool {
        match invoke(builtin, &Environment::new(None), &[value]).unwrap() {
            Value::Bool(b) => b,
            other => panic!("predicate returned {:?}", other),
        }
    }

    #[test]
    fn test_boolean_predicates_are_strict() {
        assert!(check(&TruepBuiltin, Value::Bool(true)));
        assert!(!check(&TruepBuiltin, Value::Number(1.0)));
        assert!(check(&FalsepBuiltin, Value::Bool(false)));
        assert!(!check(&FalsepBuiltin, Value::Nil));
        assert!(!check(&FalsepBuiltin, Value::Number(0.0)));
    }

    #[test]
    fn test_list_is_not_vector() {
        assert!(check(&ListpBuiltin, Value::list(vec![])));
        assert!(!check(&ListpBuiltin, Value::vector(vec![])));
        assert!(check(&VectorpBuiltin, Value::vector(vec![])));
    }

    #[test]
    fn test_constructors() {
        let env = Environment::new(None);
        assert_eq!(
            invoke(&SymbolBuiltin, &env, &[Value::string("abc")]).unwrap(),
            Value::symbol("abc")
        );
        assert_eq!(
            invoke(&KeywordBuiltin, &env, &[Value::string("k")]).unwrap(),
            Value::keyword("k")
        );
        assert!(invoke(&SymbolBuiltin, &env, &[Value::Number(1.0)]).is_err());
    }
}
