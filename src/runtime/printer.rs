//! Value-to-text rendering
//!
//! `readably` selects the `pr-str` flavour: strings are quoted and escaped so
//! the output reads back as the same value. Without it strings print raw, the
//! way `str` and `println` want them.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::{SequentialView, Value};

/// Renders a single value
///
/// An atom reached again from inside its own contents prints as `(atom ...)`.
pub fn pr_str(value: &Value, readably: bool) -> String {
    render(value, readably, &mut Vec::new())
}

fn render(
    value: &Value,
    readably: bool,
    open_atoms: &mut Vec<*const RefCell<Value>>,
) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => {
            if readably {
                escape(s)
            } else {
                s.clone()
            }
        }
        Value::Symbol(s) => s.to_string(),
        Value::Keyword(k) => format!(":{}", k),
        Value::List(list) => join(list.data(), readably, open_atoms, "(", ")"),
        Value::Vector(vector) => join(vector.data(), readably, open_atoms, "[", "]"),
        Value::Hashmap(map) => join(&map.to_forms(), readably, open_atoms, "{", "}"),
        Value::Atom(cell) => {
            let ptr = Rc::as_ptr(cell);
            if open_atoms.contains(&ptr) {
                return "(atom ...)".to_string();
            }
            open_atoms.push(ptr);
            let inner = render(&cell.borrow(), readably, open_atoms);
            open_atoms.pop();
            format!("(atom {})", inner)
        }
        Value::NativeFunction(f) => format!("#<native {}>", f.name()),
        Value::Closure(_) => "#<function>".to_string(),
        Value::Macro(_) => "#<macro>".to_string(),
    }
}

fn join(
    values: &[Value],
    readably: bool,
    open_atoms: &mut Vec<*const RefCell<Value>>,
    open: &str,
    close: &str,
) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| render(v, readably, open_atoms))
        .collect();
    format!("{}{}{}", open, parts.join(" "), close)
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// Integral values print without a fractional part, so `(+ 1 2)` shows `3`
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
