use std::rc::Rc;

use tracing::{debug, trace};

use crate::builtins;
use crate::error::{Error, Result};
use crate::runtime::{printer, Closure, Environment, Hashmap, SequentialView, Value};

/// Evaluates `ast` in `env`
///
/// Forms in tail position (the chosen `if` branch, the last `do` form, a
/// `let*` body, a closure body, a quasiquote expansion) replace the current
/// form and environment instead of recursing, so tail-recursive programs run
/// in constant host stack.
pub fn eval(ast: &Value, env: &Environment) -> Result<Value> {
    let mut ast = ast.clone();
    let mut env = env.clone();

    loop {
        ast = macroexpand(ast, &env)?;

        let list = match &ast {
            Value::List(list) => list.clone(),
            _ => return eval_atomic(&ast, &env),
        };
        let items = list.data();
        let Some(head) = items.first() else {
            return Ok(ast);
        };
        let args = &items[1..];

        if let Value::Symbol(symbol) = head {
            match symbol.as_str() {
                "quote" => return Ok(single_arg("quote", args)?.clone()),
                "quasiquote" => {
                    ast = quasiquote(single_arg("quasiquote", args)?)?;
                    continue;
                }
                "do" => {
                    let (last, init) = args
                        .split_last()
                        .ok_or_else(|| Error::arity("do", "expected at least 1 form"))?;
                    for form in init {
                        eval(form, &env)?;
                    }
                    ast = last.clone();
                    continue;
                }
                "if" => {
                    if args.len() < 2 {
                        return Err(Error::arity("if", "expected a condition and a branch"));
                    }
                    ast = if eval(&args[0], &env)?.is_truthy() {
                        args[1].clone()
                    } else {
                        args.get(2).cloned().unwrap_or(Value::Nil)
                    };
                    continue;
                }
                "fn*" => return Ok(Value::Closure(Rc::new(make_closure(args, &env)?))),
                "def!" => return eval_def(args, &env),
                "defmacro!" => return eval_defmacro(args, &env),
                "macroexpand" => return macroexpand(single_arg("macroexpand", args)?.clone(), &env),
                "let*" => {
                    let (scope, body) = eval_let(args, &env)?;
                    env = scope;
                    ast = body;
                    continue;
                }
                _ => {}
            }
        }

        let evaluated = items
            .iter()
            .map(|form| eval(form, &env))
            .collect::<Result<Vec<_>>>()?;
        let Some((callee, call_args)) = evaluated.split_first() else {
            return Ok(Value::Nil);
        };

        match callee {
            Value::NativeFunction(f) => {
                trace!(name = f.name(), argc = call_args.len(), "native call");
                return builtins::invoke(f.as_ref(), &env, call_args);
            }
            Value::Closure(closure) | Value::Macro(closure) => {
                env = closure.bind(call_args)?;
                ast = closure.body.clone();
            }
            other => {
                return Err(Error::NotCallable {
                    value: printer::pr_str(other, true),
                })
            }
        }
    }
}

/// Invokes any callable value with already-evaluated arguments
pub fn apply(callable: &Value, args: &[Value], env: &Environment) -> Result<Value> {
    match callable {
        Value::NativeFunction(f) => builtins::invoke(f.as_ref(), env, args),
        Value::Closure(closure) | Value::Macro(closure) => eval(&closure.body, &closure.bind(args)?),
        other => Err(Error::NotCallable {
            value: printer::pr_str(other, true),
        }),
    }
}

/// Expands `ast` while its head names a macro
///
/// Anything that is not a macro call comes back untouched.
pub fn macroexpand(mut ast: Value, env: &Environment) -> Result<Value> {
    while let Some((mac, args)) = macro_call(&ast, env) {
        debug!(form = %ast, "expanding macro");
        ast = eval(&mac.body, &mac.bind(&args)?)?;
    }
    Ok(ast)
}

fn macro_call(ast: &Value, env: &Environment) -> Option<(Rc<Closure>, Vec<Value>)> {
    let Value::List(list) = ast else {
        return None;
    };
    let Some(Value::Symbol(head)) = list.first() else {
        return None;
    };
    match env.lookup(head.as_str())? {
        Value::Macro(mac) => Some((mac, list.data()[1..].to_vec())),
        _ => None,
    }
}

/// Rewrites a quasiquoted template into `cons`/`concat`/`quote` calls
///
/// `(unquote x)` yields `x` itself; a `(splice-unquote xs)` element is
/// concatenated into the surrounding sequence. Templates always rebuild as
/// lists, even when written as vectors.
pub fn quasiquote(ast: &Value) -> Result<Value> {
    let Some(items) = ast.as_sequential().map(|s| s.data()).filter(|d| !d.is_empty()) else {
        return Ok(Value::list(vec![Value::symbol("quote"), ast.clone()]));
    };

    let head = &items[0];
    if head.is_symbol("unquote") {
        return Ok(single_arg("unquote", &items[1..])?.clone());
    }

    let rest = Value::list(items[1..].to_vec());
    if let Some(inner) = head.as_sequential() {
        if inner.first().map_or(false, |h| h.is_symbol("splice-unquote")) {
            let spliced = single_arg("splice-unquote", &inner.data()[1..])?;
            return Ok(Value::list(vec![
                Value::symbol("concat"),
                spliced.clone(),
                quasiquote(&rest)?,
            ]));
        }
    }

    Ok(Value::list(vec![
        Value::symbol("cons"),
        quasiquote(head)?,
        quasiquote(&rest)?,
    ]))
}

/// Symbols resolve through the environment; vectors and map values are
/// evaluated element-wise; everything else evaluates to itself.
fn eval_atomic(ast: &Value, env: &Environment) -> Result<Value> {
    match ast {
        Value::Symbol(symbol) => env.get(symbol.as_str()),
        Value::Vector(vector) => {
            let items = vector
                .data()
                .iter()
                .map(|form| eval(form, env))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::vector(items))
        }
        Value::Hashmap(map) => {
            let mut evaluated = Hashmap::new();
            for (key, value) in map.iter() {
                evaluated.insert(key.clone(), eval(value, env)?);
            }
            Ok(Value::hashmap(evaluated))
        }
        other => Ok(other.clone()),
    }
}

fn single_arg<'a>(form: &str, args: &'a [Value]) -> Result<&'a Value> {
    args.first()
        .ok_or_else(|| Error::arity(form, "expected 1 argument, got 0"))
}

/// (fn* (params...) body)
fn make_closure(args: &[Value], env: &Environment) -> Result<Closure> {
    if args.len() < 2 {
        return Err(Error::arity("fn*", "expected a parameter list and a body"));
    }
    let params = args[0].as_sequential().ok_or_else(|| Error::MalformedBinder {
        message: format!(
            "fn* parameters must be a list or vector, got {}",
            args[0].type_name()
        ),
    })?;
    if let Some(bad) = params.data().iter().find(|p| !matches!(p, Value::Symbol(_))) {
        return Err(Error::MalformedBinder {
            message: format!("parameter must be a symbol, got {}", bad.type_name()),
        });
    }

    Ok(Closure {
        params: params.data().to_vec(),
        body: args[1].clone(),
        env: env.clone(),
    })
}

/// (def! name value) - binds in the current frame and returns the value
fn eval_def(args: &[Value], env: &Environment) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::arity("def!", "expected a name and a value"));
    }
    let name = args[0].as_symbol()?.clone();
    let value = eval(&args[1], env)?;
    debug!(name = %name, "def!");
    env.set(name, value.clone());
    Ok(value)
}

/// (defmacro! name fn) - like def!, but the value must be a closure
fn eval_defmacro(args: &[Value], env: &Environment) -> Result<Value> {
    if args.len() < 2 {
        return Err(Error::arity("defmacro!", "expected a name and a function"));
    }
    let name = args[0].as_symbol()?.clone();
    let closure = match eval(&args[1], env)? {
        Value::Closure(closure) | Value::Macro(closure) => closure,
        other => return Err(Error::type_error("function", &other)),
    };
    debug!(name = %name, "defmacro!");
    let mac = Value::Macro(closure);
    env.set(name, mac.clone());
    Ok(mac)
}

/// (let* (name expr ...) body) - returns the new scope and the body to run in it
///
/// Each binding sees the ones before it.
fn eval_let(args: &[Value], env: &Environment) -> Result<(Environment, Value)> {
    if args.len() < 2 {
        return Err(Error::arity("let*", "expected bindings and a body"));
    }
    let bindings = args[0].as_sequential().ok_or_else(|| Error::MalformedBinder {
        message: format!(
            "let* bindings must be a list or vector, got {}",
            args[0].type_name()
        ),
    })?;
    if bindings.len() % 2 == 1 {
        return Err(Error::MalformedBinder {
            message: "let* bindings need an even number of forms".to_string(),
        });
    }

    let scope = Environment::new(Some(env));
    for pair in bindings.data().chunks(2) {
        let Value::Symbol(name) = &pair[0] else {
            return Err(Error::MalformedBinder {
                message: format!("let* binding name must be a symbol, got {}", pair[0].type_name()),
            });
        };
        let value = eval(&pair[1], &scope)?;
        scope.set(name.clone(), value);
    }

    Ok((scope, args[1].clone()))
}
