//! Runtime execution for Wisp programs
//!
//! Values, lexical environments, the tail-call evaluator and the printer.

mod environment;
mod evaluator;
mod interpreter;
pub mod prelude;
pub mod printer;
mod value;

pub use environment::Environment;
pub use evaluator::{apply, eval, macroexpand, quasiquote};
pub use interpreter::Interpreter;
pub use value::{Closure, Hashmap, List, SequentialView, Symbol, Value, Vector};
