//! Raising errors and invoking callables generically

use crate::builtins::{require_at_least, Builtin, BuiltinRegistry};
use crate::error::{Error, Result};
use crate::runtime::{apply, eval, Environment, Value};

/// Register control builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(ThrowBuiltin);
    registry.register(ApplyBuiltin);
    registry.register(MapBuiltin);
    registry.register(EvalBuiltin);
    registry.register(DocBuiltin);
}

/// throw - Raise a value as an error
pub struct ThrowBuiltin;

impl Builtin for ThrowBuiltin {
    fn name(&self) -> &str {
        "throw"
    }

    fn description(&self) -> &str {
        "Abort evaluation, carrying the value as the error payload"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Err(Error::UserError(args[0].clone()))
    }
}

/// apply - Call a function with arguments spread from a final sequence
///
/// `(apply f a b [c d])` calls `(f a b c d)`.
pub struct ApplyBuiltin;

impl Builtin for ApplyBuiltin {
    fn name(&self) -> &str {
        "apply"
    }

    fn description(&self) -> &str {
        "Call a function with leading arguments plus the elements of a final sequence"
    }

    fn call(&self, env: &Environment, args: &[Value]) -> Result<Value> {
        require_at_least(self.name(), args, 2)?;
        let last = &args[args.len() - 1];
        let middle = &args[1..args.len() - 1];
        let spread = last
            .as_sequential()
            .ok_or_else(|| Error::type_error("list or vector", last))?;

        let mut call_args = middle.to_vec();
        call_args.extend_from_slice(spread.data());
        apply(&args[0], &call_args, env)
    }
}

/// map - Call a function on each element
pub struct MapBuiltin;

impl Builtin for MapBuiltin {
    fn name(&self) -> &str {
        "map"
    }

    fn description(&self) -> &str {
        "List of the results of calling the function on each element"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, env: &Environment, args: &[Value]) -> Result<Value> {
        let seq = args[1]
            .as_sequential()
            .ok_or_else(|| Error::type_error("list or vector", &args[1]))?;
        let results = seq
            .data()
            .iter()
            .map(|item| apply(&args[0], std::slice::from_ref(item), env))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::list(results))
    }
}

/// eval - Evaluate a form at top level
pub struct EvalBuiltin;

impl Builtin for EvalBuiltin {
    fn name(&self) -> &str {
        "eval"
    }

    fn description(&self) -> &str {
        "Evaluate a form in the root environment"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, env: &Environment, args: &[Value]) -> Result<Value> {
        eval(&args[0], &env.root())
    }
}

/// doc - Description of a native function
pub struct DocBuiltin;

impl Builtin for DocBuiltin {
    fn name(&self) -> &str {
        "doc"
    }

    fn description(&self) -> &str {
        "Description string of a native function; nil for anything else"
    }

    fn arity(&self) -> Option<usize> {
        Some(1)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        match &args[0] {
            Value::NativeFunction(f) => Ok(Value::string(f.description())),
            _ => Ok(Value::Nil),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::{base_environment, invoke};

    #[test]
    fn test_doc_reads_description() {
        let env = base_environment();
        let doc = invoke(&DocBuiltin, &env, &[env.get("eval").unwrap()]).unwrap();
        assert_eq!(doc, Value::string("Evaluate a form in the root environment"));
        assert_eq!(invoke(&DocBuiltin, &env, &[Value::Number(1.0)]).unwrap(), Value::Nil);
    }

    #[test]
    fn test_throw_carries_value() {
        let env = Environment::new(None);
        match invoke(&ThrowBuiltin, &env, &[Value::string("boom")]) {
            Err(Error::UserError(value)) => assert_eq!(value, Value::string("boom")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_apply_spreads_last_argument() {
        let env = base_environment();
        let plus = env.get("+").unwrap();
        let result = invoke(
            &ApplyBuiltin,
            &env,
            &[plus.clone(), Value::Number(1.0), Value::list(vec![Value::Number(2.0)])],
        )
        .unwrap();
        assert_eq!(result, Value::Number(3.0));

        let result = invoke(
            &ApplyBuiltin,
            &env,
            &[plus, Value::vector(vec![Value::Number(2.0), Value::Number(5.0)])],
        )
        .unwrap();
        assert_eq!(result, Value::Number(7.0));
    }

    #[test]
    fn test_map_over_vector() {
        let env = base_environment();
        let list = env.get("list").unwrap();
        let result = invoke(
            &MapBuiltin,
            &env,
            &[list, Value::vector(vec![Value::Number(1.0), Value::Number(2.0)])],
        )
        .unwrap();
        assert_eq!(
            result,
            Value::list(vec![
                Value::list(vec![Value::Number(1.0)]),
                Value::list(vec![Value::Number(2.0)]),
            ])
        );
    }

    #[test]
    fn test_eval_uses_root() {
        let root = base_environment();
        let inner = Environment::new(Some(&root));
        let form = Value::list(vec![Value::symbol("def!"), Value::symbol("x"), Value::Number(1.0)]);
        invoke(&EvalBuiltin, &inner, &[form]).unwrap();
        assert!(inner.find("x").unwrap().ptr_eq(&root));
    }
}
