use std::path::Path;

use crate::builtins::base_environment;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::{read_all, read_str};
use crate::runtime::{eval, prelude, printer, Environment, Symbol, Value};

/// Host-facing entry point: one root environment plus read-eval-print helpers
///
/// # Example
///
/// ```
/// use wisp::Interpreter;
///
/// let interp = Interpreter::new().unwrap();
/// assert_eq!(interp.rep("(+ 1 2)"), "3");
/// ```
pub struct Interpreter {
    env: Environment,
    config: Config,
}

impl Interpreter {
    /// Interpreter with default configuration (natives plus prelude)
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Interpreter with explicit configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let env = base_environment();
        if config.load_prelude {
            prelude::load(&env)?;
        }
        Ok(Interpreter { env, config })
    }

    /// Root environment
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads the first form in `source` without evaluating it
    ///
    /// Only this phase reports [`Error::UnexpectedEof`] for unfinished input;
    /// the same error from [`Interpreter::eval`] comes from the program itself.
    pub fn read(&self, source: &str) -> Result<Value> {
        read_str(source)
    }

    /// Evaluates an already-read form in the root environment
    pub fn eval(&self, form: &Value) -> Result<Value> {
        eval(form, &self.env)
    }

    /// Reads the first form in `source` and evaluates it
    pub fn eval_str(&self, source: &str) -> Result<Value> {
        self.eval(&self.read(source)?)
    }

    /// Evaluates every form in `source` as one implicit `do`
    ///
    /// Returns the last value, or nil when there are no forms.
    pub fn eval_all(&self, source: &str) -> Result<Value> {
        let forms = read_all(source)?;
        if forms.is_empty() {
            return Ok(Value::Nil);
        }
        let mut body = Vec::with_capacity(forms.len() + 1);
        body.push(Value::symbol("do"));
        body.extend(forms);
        eval(&Value::list(body), &self.env)
    }

    /// Read, evaluate, print; errors render as their message
    pub fn rep(&self, source: &str) -> String {
        match self.eval_str(source) {
            Ok(value) => printer::pr_str(&value, true),
            Err(e) => e.to_string(),
        }
    }

    /// Evaluates a whole source file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading file");
        let source = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.eval_all(&source)
    }

    /// Binds `*ARGV*` to a list of strings
    pub fn set_argv(&self, args: &[String]) {
        let argv = args.iter().map(|a| Value::string(a.as_str())).collect();
        self.env.set(Symbol::new("*ARGV*"), Value::list(argv));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rep() {
        let interp = Interpreter::new().unwrap();
        assert_eq!(interp.rep("(+ 1 2)"), "3");
        assert_eq!(interp.rep(r#"(str "a" "b")"#), r#""ab""#);
        assert_eq!(interp.rep("undefined-thing"), "'undefined-thing' not found");
    }

    #[test]
    fn test_state_persists_between_calls() {
        let interp = Interpreter::new().unwrap();
        interp.eval_str("(def! x 10)").unwrap();
        assert_eq!(interp.eval_str("(* x 2)").unwrap(), Value::Number(20.0));
    }

    #[test]
    fn test_read_then_eval() {
        let interp = Interpreter::new().unwrap();
        assert!(interp.read("(+ 1").unwrap_err().is_incomplete());

        // Complete input whose evaluation underflows
        let form = interp.read(r#"(read-string "(1 2")"#).unwrap();
        assert!(interp.eval(&form).unwrap_err().is_incomplete());
    }

    #[test]
    fn test_eval_all() {
        let interp = Interpreter::new().unwrap();
        assert_eq!(interp.eval_all("(def! a 1) (+ a 1)").unwrap(), Value::Number(2.0));
        assert_eq!(interp.eval_all("; nothing").unwrap(), Value::Nil);
    }

    #[test]
    fn test_without_prelude() {
        let config = Config {
            load_prelude: false,
            ..Config::default()
        };
        let interp = Interpreter::with_config(config).unwrap();
        assert!(interp.eval_str("(not true)").is_err());
        assert_eq!(interp.eval_str("(+ 1 1)").unwrap(), Value::Number(2.0));
    }

    #[test]
    fn test_set_argv() {
        let interp = Interpreter::new().unwrap();
        interp.set_argv(&["a".to_string(), "b".to_string()]);
        assert_eq!(interp.rep("*ARGV*"), r#"("a" "b")"#);
    }
}
