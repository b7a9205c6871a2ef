//! Tarn target-runtime library.
//!
//! Lowered Tarn programs run on a dynamically-typed, table-based target with
//! 1-based indexing and multiple return values. This crate is the compiler's
//! embedded model of that runtime: the value representation plus the library
//! functions the lowering crate emits calls to.
//!
//! ## Modules
//!
//! - [`value`]: runtime values — nil, primitives, objects, function values
//! - [`sparse`]: incrementally built argument lists that tolerate nil holes
//! - [`wrap`]: receiver-binding wrappers, memoized per (receiver, function)
//!
//! ## Library contract
//!
//! The lowering crate emits calls to four named operations; their semantics
//! are fixed here:
//!
//! | runtime name           | operation                                    |
//! |------------------------|----------------------------------------------|
//! | `__tarn_sparse_new`    | construct a sparse list from initial elements|
//! | `__tarn_sparse_push`   | append elements to an existing sparse list   |
//! | `__tarn_sparse_spread` | flatten a sparse list into a multi-value     |
//! | `__tarn_wrap`          | bind a receiver, memoized per receiver       |

pub mod sparse;
pub mod value;
pub mod wrap;

pub use sparse::{sparse_new, sparse_push, sparse_spread, SparseList};
pub use value::{FnValue, Obj, Value};
pub use wrap::wrap_function;
