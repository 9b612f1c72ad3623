//! Definitions written in Wisp itself, evaluated into the root environment
//! after the native functions are installed.

use crate::error::Result;
use crate::parser::read_str;
use crate::runtime::{eval, Environment};

/// Source of each prelude definition, evaluated in order
///
/// `load-file` appends a newline before the closing paren so a trailing
/// comment in the file cannot swallow it.
pub const DEFINITIONS: &[&str] = &[
    "(def! not (fn* (a) (if a false true)))",
    "(def! load-file (fn* (f) (eval (read-string (str \"(do \" (slurp f) \"\n)\")))))",
    "(defmacro! cond (fn* (& xs) \
        (if (> (count xs) 0) \
          (list 'if (first xs) \
            (if (> (count xs) 1) (nth xs 1) (throw \"odd number of forms to cond\")) \
            (cons 'cond (rest (rest xs)))))))",
    "(defmacro! or (fn* (& xs) \
        (if (empty? xs) nil \
          (if (= 1 (count xs)) (first xs) \
            `(let* (or__value ~(first xs)) \
               (if or__value or__value (or ~@(rest xs))))))))",
];

/// Evaluates every prelude definition into `env`
pub fn load(env: &Environment) -> Result<()> {
    for source in DEFINITIONS {
        eval(&read_str(source)?, env)?;
    }
    tracing::debug!(count = DEFINITIONS.len(), "prelude loaded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::base_environment;
    use crate::runtime::Value;

    fn env() -> Environment {
        let env = base_environment();
        load(&env).unwrap();
        env
    }

    fn run(env: &Environment, source: &str) -> Result<Value> {
        eval(&read_str(source)?, env)
    }

    #[test]
    fn test_definitions_bound() {
        let env = env();
        for name in ["not", "load-file", "cond", "or"] {
            assert!(env.exists(name), "{} not defined", name);
        }
        assert!(matches!(env.get("cond"), Ok(Value::Macro(_))));
    }

    #[test]
    fn test_not() {
        let env = env();
        assert_eq!(run(&env, "(not nil)").unwrap(), Value::Bool(true));
        assert_eq!(run(&env, "(not 0)").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_cond() {
        let env = env();
        assert_eq!(
            run(&env, "(cond false 1 (= 1 1) 2 true 3)").unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(run(&env, "(cond false 1)").unwrap(), Value::Nil);
        assert!(run(&env, "(cond true)").is_err());
    }

    #[test]
    fn test_or() {
        let env = env();
        assert_eq!(run(&env, "(or)").unwrap(), Value::Nil);
        assert_eq!(run(&env, "(or nil false 3)").unwrap(), Value::Number(3.0));
        assert_eq!(run(&env, "(or nil false)").unwrap(), Value::Bool(false));
    }
}
