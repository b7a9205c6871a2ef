//! Shared types for the Tarn compiler.
//!
//! Home of the small vocabulary types every other crate speaks: byte-offset
//! [`Span`]s into source text and the [`NodeId`]/[`SymbolId`] handles that
//! key checker facts and bindings.

pub mod ids;
pub mod span;

pub use ids::{NodeId, SymbolId};
pub use span::Span;
