use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::builtins::Builtin;
use crate::error::{Error, Result};
use crate::runtime::printer;
use crate::runtime::Environment;

/// Interned symbol name
///
/// Cloning is a reference-count bump, so symbols are cheap to pass around and
/// to use as environment keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Rc<str>);

impl Symbol {
    /// Creates a symbol from its name
    pub fn new(name: &str) -> Self {
        Symbol(Rc::from(name))
    }

    /// Returns the symbol name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered-sequence access shared by lists and vectors
pub trait SequentialView {
    /// Elements in order
    fn data(&self) -> &[Value];

    /// Number of elements
    fn len(&self) -> usize {
        self.data().len()
    }

    /// True when there are no elements
    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// First element, if any
    fn first(&self) -> Option<&Value> {
        self.data().first()
    }

    /// Everything after the first element, as a list
    fn rest(&self) -> List {
        List::new(self.data().iter().skip(1).cloned().collect())
    }

    /// Element at `index`
    fn nth(&self, index: usize) -> Result<&Value> {
        self.data().get(index).ok_or(Error::IndexOutOfBounds {
            index,
            length: self.len(),
        })
    }
}

/// Parenthesized sequence
#[derive(Debug, Clone, Default)]
pub struct List(Rc<Vec<Value>>);

impl List {
    /// Creates a list owning `items`
    pub fn new(items: Vec<Value>) -> Self {
        List(Rc::new(items))
    }
}

impl SequentialView for List {
    fn data(&self) -> &[Value] {
        &self.0
    }
}

/// Bracketed sequence
#[derive(Debug, Clone, Default)]
pub struct Vector(Rc<Vec<Value>>);

impl Vector {
    /// Creates a vector owning `items`
    pub fn new(items: Vec<Value>) -> Self {
        Vector(Rc::new(items))
    }
}

impl SequentialView for Vector {
    fn data(&self) -> &[Value] {
        &self.0
    }
}

/// Mapping from value keys to values
///
/// Keys are compared by structural equality, so `(1 2)` and `[1 2]` name the
/// same entry. Maps in this language stay small, so entries live in a flat
/// vector rather than a hash table.
#[derive(Debug, Clone, Default)]
pub struct Hashmap {
    entries: Vec<(Value, Value)>,
}

impl Hashmap {
    /// Creates an empty map
    pub fn new() -> Self {
        Hashmap::default()
    }

    /// Builds a map from alternating key/value forms
    pub fn from_forms(forms: &[Value]) -> Result<Self> {
        if forms.len() % 2 == 1 {
            return Err(Error::OddMapEntries { count: forms.len() });
        }
        let mut map = Hashmap::new();
        for pair in forms.chunks(2) {
            map.insert(pair[0].clone(), pair[1].clone());
        }
        Ok(map)
    }

    /// Inserts or replaces the entry for `key`
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Removes the entry for `key`, if present
    pub fn remove(&mut self, key: &Value) {
        self.entries.retain(|(k, _)| k != key);
    }

    /// Looks up the value stored under `key`
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// True if `key` has an entry
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// All keys
    pub fn keys(&self) -> Vec<Value> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// All values
    pub fn values(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Flattens back into alternating key/value forms
    pub fn to_forms(&self) -> Vec<Value> {
        self.entries
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    }
}

impl PartialEq for Hashmap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map(|ov| ov == v).unwrap_or(false))
    }
}

/// User-defined function
///
/// The captured environment is fixed at creation; each call binds parameters
/// in a fresh child of it.
#[derive(Debug)]
pub struct Closure {
    /// Parameter forms (symbols, optionally `&` before the final one)
    pub params: Vec<Value>,
    /// Body expression
    pub body: Value,
    /// Defining environment
    pub env: Environment,
}

impl Closure {
    /// Environment for one invocation with `args` bound to the parameters
    pub fn bind(&self, args: &[Value]) -> Result<Environment> {
        self.env.bind(&self.params, args)
    }
}

/// Runtime value representation
#[derive(Debug, Clone)]
pub enum Value {
    // Primitives
    /// Nil value
    Nil,
    /// Boolean value
    Bool(bool),
    /// Double-precision number
    Number(f64),
    /// String value
    String(String),
    /// Symbol, resolved through the environment when evaluated
    Symbol(Symbol),
    /// Self-evaluating tag, stored without the leading `:`
    Keyword(Rc<str>),

    // Collections
    /// Parenthesized sequence
    List(List),
    /// Bracketed sequence
    Vector(Vector),
    /// Key/value map
    Hashmap(Rc<Hashmap>),

    // Special
    /// Mutable cell; equality is identity
    Atom(Rc<RefCell<Value>>),
    /// Host-provided function
    NativeFunction(Rc<dyn Builtin>),
    /// User-defined function
    Closure(Rc<Closure>),
    /// Closure flagged for call-site expansion
    Macro(Rc<Closure>),
}

impl Value {
    /// Creates a list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(List::new(items))
    }

    /// Creates a vector value
    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Vector::new(items))
    }

    /// Creates a symbol value
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// Creates a keyword value from its name (without `:`)
    pub fn keyword(name: &str) -> Self {
        Value::Keyword(Rc::from(name))
    }

    /// Creates a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Wraps a map
    pub fn hashmap(map: Hashmap) -> Self {
        Value::Hashmap(Rc::new(map))
    }

    /// Creates a fresh atom holding `value`
    pub fn atom(value: Value) -> Self {
        Value::Atom(Rc::new(RefCell::new(value)))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Keyword(_) => "keyword",
            Value::List(_) => "list",
            Value::Vector(_) => "vector",
            Value::Hashmap(_) => "hash-map",
            Value::Atom(_) => "atom",
            Value::NativeFunction(_) => "native-function",
            Value::Closure(_) => "function",
            Value::Macro(_) => "macro",
        }
    }

    /// Only `nil` and `false` are false; zero and empty collections are true
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Sequential view of a list or vector
    pub fn as_sequential(&self) -> Option<&dyn SequentialView> {
        match self {
            Value::List(list) => Some(list),
            Value::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    /// Non-empty list or vector
    pub fn is_pair(&self) -> bool {
        self.as_sequential().map(|s| !s.is_empty()).unwrap_or(false)
    }

    /// True if this is the symbol `name`
    pub fn is_symbol(&self, name: &str) -> bool {
        matches!(self, Value::Symbol(s) if s.as_str() == name)
    }

    /// Returns the symbol, or a type error
    pub fn as_symbol(&self) -> Result<&Symbol> {
        match self {
            Value::Symbol(s) => Ok(s),
            _ => Err(Error::type_error("symbol", self)),
        }
    }

    /// Returns the number, or a type error
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(Error::type_error("number", self)),
        }
    }

    /// Returns a reference to the string value
    pub fn as_string(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(Error::type_error("string", self)),
        }
    }

    /// Returns the atom cell, or a type error
    pub fn as_atom(&self) -> Result<&Rc<RefCell<Value>>> {
        match self {
            Value::Atom(cell) => Ok(cell),
            _ => Err(Error::type_error("atom", self)),
        }
    }

    /// Returns the map, or a type error
    pub fn as_hashmap(&self) -> Result<&Hashmap> {
        match self {
            Value::Hashmap(map) => Ok(map),
            _ => Err(Error::type_error("hash-map", self)),
        }
    }

    /// Native functions and closures
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::NativeFunction(_) | Value::Closure(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&printer::pr_str(self, true))
    }
}

// Structural equality, matching the language's `=`
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_sequential(), other.as_sequential()) {
            return a.data() == b.data();
        }
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Hashmap(a), Value::Hashmap(b)) => a == b,
            // Cells and functions compare by identity
            (Value::Atom(a), Value::Atom(b)) => Rc::ptr_eq(a, b),
            (Value::NativeFunction(a), Value::NativeFunction(b)) => {
                std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
            }
            (Value::Closure(a), Value::Closure(b)) | (Value::Macro(a), Value::Macro(b)) => {
                Rc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
