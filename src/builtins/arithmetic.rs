//! Arithmetic and comparison builtins
//!
//! Every operator takes exactly two numbers.

use crate::builtins::{Builtin, BuiltinRegistry};
use crate::error::Result;
use crate::runtime::{Environment, Value};

/// Register arithmetic and comparison builtins
pub fn register(registry: &mut BuiltinRegistry) {
    registry.register(AddBuiltin);
    registry.register(SubtractBuiltin);
    registry.register(MultiplyBuiltin);
    registry.register(DivideBuiltin);

    registry.register(LessThanBuiltin);
    registry.register(LessOrEqualBuiltin);
    registry.register(GreaterThanBuiltin);
    registry.register(GreaterOrEqualBuiltin);
    registry.register(EqualBuiltin);
}

macro_rules! binary_number_builtin {
    ($name:ident, $str:expr, $desc:expr, |$a:ident, $b:ident| $body:expr) => {
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
                Some(2)
            }

            fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
                let $a = args[0].as_number()?;
                let $b = args[1].as_number()?;
                Ok(Value::from($body))
            }
        }
    };
}

// Division by zero follows IEEE semantics and yields an infinity or NaN.
binary_number_builtin!(AddBuiltin, "+", "Add two numbers", |a, b| a + b);
binary_number_builtin!(SubtractBuiltin, "-", "Subtract the second number from the first", |a, b| a - b);
binary_number_builtin!(MultiplyBuiltin, "*", "Multiply two numbers", |a, b| a * b);
binary_number_builtin!(DivideBuiltin, "/", "Divide the first number by the second", |a, b| a / b);

binary_number_builtin!(LessThanBuiltin, "<", "True if the first number is smaller", |a, b| a < b);
binary_number_builtin!(LessOrEqualBuiltin, "<=", "True if the first number is not larger", |a, b| a <= b);
binary_number_builtin!(GreaterThanBuiltin, ">", "True if the first number is larger", |a, b| a > b);
binary_number_builtin!(GreaterOrEqualBuiltin, ">=", "True if the first number is not smaller", |a, b| a >= b);

/// = - Structural equality of any two values
pub struct EqualBuiltin;

impl Builtin for EqualBuiltin {
    fn name(&self) -> &str {
        "="
    }

    fn description(&self) -> &str {
        "Structural equality; lists equal vectors with the same elements"
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn call(&self, _env: &Environment, args: &[Value]) -> Result<Value> {
        Ok(Value::Bool(args[0] == args[1]))
    }
}
