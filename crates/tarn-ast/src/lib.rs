//! Source-language AST for the Tarn compiler.
//!
//! Tarn source is statically typed, class-and-expression based. This crate
//! defines the expression grammar consumed by the lowering crate. There is
//! no parser here: the frontend hands lowering an already-resolved tree in
//! which every node carries a [`NodeId`](tarn_common::NodeId) the type
//! checker can answer questions about.

pub mod expr;

pub use expr::{BinOp, Expr, ExprKind, NameRef};
