//! Type representation and checker query layer for the Tarn compiler.
//!
//! Lowering never runs inference; it consults an already-populated
//! [`Checker`] for the facts it needs: the type of an expression at its use
//! site, the resolved signature of a call, and whether a symbol is bound
//! `const`. Types are explicit tagged variants — unions and the intrinsic
//! absent-value type are first-class and matched exhaustively.

pub mod checker;
pub mod ty;

pub use checker::Checker;
pub use ty::{ParamSym, PrimTy, ReceiverConvention, Signature, Ty};
