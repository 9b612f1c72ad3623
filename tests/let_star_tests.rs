//! Tests for let* sequential bindings

use wisp::{Error, Interpreter, Value};

fn eval_lisp(source: &str) -> wisp::Result<Value> {
    Interpreter::new()?.eval_all(source)
}

#[test]
fn test_let_star_basic() {
    assert_eq!(eval_lisp("(let* (x 10 y 20) (+ x y))").unwrap(), Value::Number(30.0));
}

#[test]
fn test_let_star_sequential_binding() {
    let source = "(let* (x 5 y (* x 2) z (+ y 1)) z)";
    assert_eq!(eval_lisp(source).unwrap(), Value::Number(11.0));
}

#[test]
fn test_let_star_vector_bindings() {
    assert_eq!(eval_lisp("(let* [a 1 b 2] [a b])").unwrap(), eval_lisp("[1 2]").unwrap());
}

#[test]
fn test_let_star_shadows_without_mutating_outer() {
    let source = r#"
(def! x 1)
(def! inner (let* (x 2) x))
(list x inner)
"#;
    assert_eq!(
        eval_lisp(source).unwrap(),
        Value::list(vec![Value::Number(1.0), Value::Number(2.0)])
    );
}

#[test]
fn test_let_star_closure_captures_binding() {
    let source = r#"
(def! f (let* (secret 7) (fn* () secret)))
(f)
"#;
    assert_eq!(eval_lisp(source).unwrap(), Value::Number(7.0));
}

#[test]
fn test_let_star_empty_bindings() {
    assert_eq!(eval_lisp("(let* () 4)").unwrap(), Value::Number(4.0));
}

#[test]
fn test_let_star_malformed() {
    assert!(matches!(eval_lisp("(let* (x 1 y) x)"), Err(Error::MalformedBinder { .. })));
    assert!(matches!(eval_lisp("(let* (1 2) 3)"), Err(Error::MalformedBinder { .. })));
    assert!(matches!(eval_lisp("(let* 5 3)"), Err(Error::MalformedBinder { .. })));
    assert!(matches!(eval_lisp("(let* (x 1))"), Err(Error::Arity { .. })));
}
