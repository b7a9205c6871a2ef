//! Incrementally built argument lists.
//!
//! When the compiler cannot flatten an argument list into a fixed-arity call
//! (a spread sits mid-list, or too many temporaries would be needed), it
//! builds the arguments at runtime: create a list from the first batch,
//! append later batches, then flatten the whole list into a multi-value at
//! the call site.
//!
//! Arguments may legitimately be nil. The list therefore keeps an explicit
//! element count instead of relying on the target's length operator, which
//! is undefined over nil holes — hence "sparse".

use std::cell::RefCell;
use std::rc::Rc;

use crate::value::Value;

/// A runtime argument list with an explicit length.
#[derive(Debug, Default)]
pub struct SparseList {
    items: Vec<Value>,
}

impl SparseList {
    /// Create a list from initial elements.
    pub fn new(items: Vec<Value>) -> SparseList {
        SparseList { items }
    }

    /// Append elements, nils included.
    pub fn push_all(&mut self, items: Vec<Value>) {
        self.items.extend(items);
    }

    /// Number of elements, counting nil holes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The elements in order, as a multi-value.
    pub fn spread(&self) -> Vec<Value> {
        self.items.clone()
    }
}

/// Construct a new sparse list from initial elements (`__tarn_sparse_new`).
pub fn sparse_new(items: Vec<Value>) -> Value {
    Value::List(Rc::new(RefCell::new(SparseList::new(items))))
}

/// Append elements to an existing sparse list (`__tarn_sparse_push`).
///
/// # Panics
///
/// Panics if `list` is not a sparse list — the compiler only ever passes the
/// handle it created, so anything else is a caller contract violation.
pub fn sparse_push(list: &Value, items: Vec<Value>) {
    match list {
        Value::List(l) => l.borrow_mut().push_all(items),
        other => panic!("__tarn_sparse_push: expected sparse list, got {:?}", other),
    }
}

/// Flatten a sparse list into a multi-value result (`__tarn_sparse_spread`).
///
/// # Panics
///
/// Panics if `list` is not a sparse list.
pub fn sparse_spread(list: &Value) -> Vec<Value> {
    match list {
        Value::List(l) => l.borrow().spread(),
        other => panic!("__tarn_sparse_spread: expected sparse list, got {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_push_spread_round() {
        let list = sparse_new(vec![Value::Int(1), Value::Nil]);
        sparse_push(&list, vec![Value::Int(3)]);
        sparse_push(&list, vec![Value::Nil, Value::Int(5)]);
        assert_eq!(
            sparse_spread(&list),
            vec![
                Value::Int(1),
                Value::Nil,
                Value::Int(3),
                Value::Nil,
                Value::Int(5),
            ]
        );
    }

    #[test]
    fn nil_holes_count_toward_length() {
        let list = sparse_new(vec![Value::Nil, Value::Nil, Value::Int(9)]);
        match &list {
            Value::List(l) => assert_eq!(l.borrow().len(), 3),
            _ => unreachable!(),
        }
    }

    #[test]
    #[should_panic(expected = "expected sparse list")]
    fn push_rejects_non_list() {
        sparse_push(&Value::Int(0), vec![]);
    }
}
