//! Expression-list lowering and call-convention normalization for the Tarn
//! compiler.
//!
//! Tarn source is statically typed and class-based; the target is
//! dynamically typed and table-based, with 1-based indexing, multiple return
//! values, and no native notion of a bound method. This crate is the part of
//! the lowering pipeline that reconciles the two around expression lists:
//!
//! - flattening variadic/spread argument lists while preserving
//!   left-to-right evaluation order and multi-value semantics;
//! - deciding which expressions must be snapshotted into temporaries and
//!   which may stay inline;
//! - detecting arguments that cross a calling-convention boundary
//!   (receiver-taking vs receiver-free) and wrapping them with the runtime's
//!   receiver-binding adapter.
//!
//! ## Architecture
//!
//! - [`target`]: target-language AST nodes produced by lowering
//! - [`context`]: the lowering context — temp names, preceding-statement
//!   scopes, used runtime features, diagnostics
//! - [`features`]: runtime-library call dispatch
//! - [`convention`]: receiver-convention classification and adapter
//!   detection
//! - [`expr`]: per-expression transformation
//! - [`expr_list`]: the expression-list unit — temp hoisting, the
//!   sparse-list fallback, and the two lowering entry points
//! - [`diagnostics`]: lowering diagnostics and their rendering
//!
//! ## Pipeline
//!
//! ```text
//! resolved AST + checker facts -> per-expression transform
//!                              -> temp hoisting | sparse-list fallback
//!                              -> target expressions + flushed statements
//! ```

pub mod context;
pub mod convention;
pub mod diagnostics;
pub mod expr;
pub mod expr_list;
pub mod features;
pub mod target;

pub use context::LowerCtx;
pub use convention::{classify, needs_adapter};
pub use diagnostics::{render_diagnostic, LowerDiagnostic};
pub use expr::transform_expression;
pub use expr_list::{lower_call_arguments, lower_ordered_expressions};
pub use features::{lib_call, LibFeature};
pub use target::{TExpr, TIdent, TStmt};
