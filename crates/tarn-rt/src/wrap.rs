//! Receiver-binding wrappers (`__tarn_wrap`).
//!
//! A receiver-taking function expects the receiver as its effective first
//! argument; a receiver-free call site supplies only the declared arguments.
//! `wrap_function` bridges the two: it returns a receiver-free function that
//! forwards to the original with the receiver fixed in first position.
//!
//! Wrappers for object receivers are memoized in the object's wrapped-method
//! side table, keyed by the wrapped function's identity. Wrapping the same
//! method on the same object twice returns the identical function value, so
//! a wrapper is a stable key — it can be registered as an event handler and
//! later removed by passing the "same" wrapped method again.

use crate::value::{FnValue, Value};

/// Re-expose a receiver-taking function as receiver-free, with the receiver
/// fixed as the first argument.
///
/// Object receivers memoize the wrapper per (receiver, function identity);
/// any other receiver gets a fresh unmemoized wrapper, since there is no
/// side table to attach it to.
pub fn wrap_function(f: &FnValue, receiver: &Value) -> FnValue {
    if let Value::Obj(obj) = receiver {
        let key = f.identity();
        if let Some(existing) = obj.wrapped.borrow().get(&key) {
            return existing.clone();
        }
        let wrapper = make_wrapper(f.clone(), receiver.clone());
        obj.wrapped.borrow_mut().insert(key, wrapper.clone());
        wrapper
    } else {
        make_wrapper(f.clone(), receiver.clone())
    }
}

fn make_wrapper(f: FnValue, receiver: Value) -> FnValue {
    FnValue::new(move |args| {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(receiver.clone());
        full.extend_from_slice(args);
        f.call(&full)
    })
}
