//! Runtime values.
//!
//! The target is dynamically typed: every slot holds a [`Value`]. Functions
//! return zero or more values (`Vec<Value>`); call sites truncate or expand
//! multi-values by position. Objects and function values have reference
//! identity — two clones of the same `Rc` are the same runtime entity.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::sparse::SparseList;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Obj(Rc<Obj>),
    List(Rc<RefCell<SparseList>>),
    Fn(FnValue),
}

impl Value {
    /// Create a string value.
    pub fn str(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Obj(o) => write!(f, "obj@{:p}", Rc::as_ptr(o)),
            Value::List(l) => write!(f, "sparse[{}]", l.borrow().len()),
            Value::Fn(func) => write!(f, "fn@{:#x}", func.identity()),
        }
    }
}

impl PartialEq for Value {
    /// Target equality: primitives by value, objects/lists/functions by
    /// reference identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Obj(a), Value::Obj(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Fn(a), Value::Fn(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// A runtime object (class instance).
///
/// Alongside its fields, every object carries the wrapped-method side table:
/// receiver-binding wrappers produced for this object, keyed by the wrapped
/// function's identity. The table is owned by the object, so wrapper
/// lifetime matches receiver lifetime.
pub struct Obj {
    fields: RefCell<FxHashMap<String, Value>>,
    pub(crate) wrapped: RefCell<FxHashMap<usize, FnValue>>,
}

impl Obj {
    /// Create an empty object.
    pub fn new() -> Rc<Obj> {
        Rc::new(Obj {
            fields: RefCell::new(FxHashMap::default()),
            wrapped: RefCell::new(FxHashMap::default()),
        })
    }

    /// Read a field; absent fields are nil.
    pub fn get(&self, field: &str) -> Value {
        self.fields.borrow().get(field).cloned().unwrap_or(Value::Nil)
    }

    /// Write a field.
    pub fn set(&self, field: &str, value: Value) {
        self.fields.borrow_mut().insert(field.to_string(), value);
    }
}

/// A callable runtime value with reference identity.
///
/// Receiver-taking functions receive the receiver as their effective first
/// argument; receiver-free functions start at the first declared parameter.
/// That difference is exactly what [`crate::wrap_function`] papers over.
#[derive(Clone)]
pub struct FnValue(Rc<dyn Fn(&[Value]) -> Vec<Value>>);

impl FnValue {
    /// Create a function value from a Rust closure.
    pub fn new(f: impl Fn(&[Value]) -> Vec<Value> + 'static) -> FnValue {
        FnValue(Rc::new(f))
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Vec<Value> {
        (self.0)(args)
    }

    /// The function's identity: its allocation address. Stable for the
    /// lifetime of the value, shared by all clones.
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Whether two values are the same runtime function.
    pub fn ptr_eq(&self, other: &FnValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn@{:#x}", self.identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let f = FnValue::new(|_| vec![]);
        let g = f.clone();
        assert!(f.ptr_eq(&g));
        assert_eq!(f.identity(), g.identity());

        let h = FnValue::new(|_| vec![]);
        assert!(!f.ptr_eq(&h));
    }

    #[test]
    fn object_fields_default_to_nil() {
        let obj = Obj::new();
        assert_eq!(obj.get("missing"), Value::Nil);
        obj.set("x", Value::Int(3));
        assert_eq!(obj.get("x"), Value::Int(3));
    }

    #[test]
    fn equality_is_identity_for_objects() {
        let a = Obj::new();
        let b = Obj::new();
        assert_eq!(Value::Obj(a.clone()), Value::Obj(a.clone()));
        assert_ne!(Value::Obj(a), Value::Obj(b));
    }
}
