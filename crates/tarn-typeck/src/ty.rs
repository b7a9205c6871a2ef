//! Type representation for the Tarn type system.
//!
//! Defines the core `Ty` enum, call signatures, and the receiver-convention
//! classification signatures carry. Tarn functions come in three flavors:
//! methods take the enclosing object as an implicit receiver (`Bound`), free
//! functions annotated `bare` are contractually receiver-free (`Bare`), and
//! function values originating from the target runtime have no receiver slot
//! at all (`None`).

use std::fmt;

use serde::Serialize;
use tarn_common::NodeId;

/// Primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimTy {
    Int,
    Float,
    Bool,
    Str,
}

/// How a call signature relates to an implicit receiver.
///
/// Signatures carry one of the first three variants; `Mixed` only ever
/// appears as a classification result, when a type's signatures disagree or
/// a type has no call signatures at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReceiverConvention {
    /// The signature has no receiver slot (convention-agnostic).
    None,
    /// Contractually receiver-free: declared `bare`.
    Bare,
    /// Expects the enclosing object as implicit receiver.
    Bound,
    /// Ambiguous: overloads disagree, or the type is not callable.
    Mixed,
}

/// A parameter of a call signature.
///
/// `decl` points at the parameter's declaration node, whose declared type
/// the checker can report. A parameter without a resolvable declaration
/// (e.g. from a synthetic or foreign signature) yields no convention
/// information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSym {
    pub name: String,
    pub decl: Option<NodeId>,
}

impl ParamSym {
    pub fn new(name: impl Into<String>, decl: Option<NodeId>) -> Self {
        ParamSym { name: name.into(), decl }
    }
}

/// A call signature: receiver convention plus declared parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    pub receiver: ReceiverConvention,
    pub params: Vec<ParamSym>,
}

impl Signature {
    pub fn new(receiver: ReceiverConvention, params: Vec<ParamSym>) -> Self {
        Signature { receiver, params }
    }
}

/// A Tarn type.
///
/// Explicit tagged variants: unions and the intrinsic absent-value type are
/// first-class, never detected by shape sniffing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Ty {
    /// The intrinsic absent-value type (the type of an omitted optional).
    Undefined,
    /// A primitive type.
    Prim(PrimTy),
    /// A named class type.
    Class(String),
    /// A callable type with one or more signatures (overloads).
    Fun(Vec<Signature>),
    /// A union of member types.
    Union(Vec<Ty>),
}

impl Ty {
    /// Create an `Int` type.
    pub fn int() -> Ty {
        Ty::Prim(PrimTy::Int)
    }

    /// Create a `Float` type.
    pub fn float() -> Ty {
        Ty::Prim(PrimTy::Float)
    }

    /// Create a `Bool` type.
    pub fn bool() -> Ty {
        Ty::Prim(PrimTy::Bool)
    }

    /// Create a `Str` type.
    pub fn str() -> Ty {
        Ty::Prim(PrimTy::Str)
    }

    /// Create a single-signature callable type.
    pub fn fun(sig: Signature) -> Ty {
        Ty::Fun(vec![sig])
    }

    /// Create a receiver-taking (method) type with `arity` unnamed params.
    pub fn bound_fun(arity: usize) -> Ty {
        Ty::fun(Signature::new(ReceiverConvention::Bound, anon_params(arity)))
    }

    /// Create a contractually receiver-free (`bare`) type with `arity`
    /// unnamed params.
    pub fn bare_fun(arity: usize) -> Ty {
        Ty::fun(Signature::new(ReceiverConvention::Bare, anon_params(arity)))
    }

    /// Create a receiver-slot-free callable type with `arity` unnamed params.
    pub fn detached_fun(arity: usize) -> Ty {
        Ty::fun(Signature::new(ReceiverConvention::None, anon_params(arity)))
    }

    /// Create the optional form of a type: `Undefined | T`.
    pub fn optional(inner: Ty) -> Ty {
        Ty::Union(vec![Ty::Undefined, inner])
    }

    /// The call signatures of this type, if it is callable.
    pub fn signatures(&self) -> &[Signature] {
        match self {
            Ty::Fun(sigs) => sigs,
            _ => &[],
        }
    }
}

fn anon_params(arity: usize) -> Vec<ParamSym> {
    (0..arity).map(|i| ParamSym::new(format!("p{i}"), None)).collect()
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Undefined => write!(f, "undefined"),
            Ty::Prim(PrimTy::Int) => write!(f, "Int"),
            Ty::Prim(PrimTy::Float) => write!(f, "Float"),
            Ty::Prim(PrimTy::Bool) => write!(f, "Bool"),
            Ty::Prim(PrimTy::Str) => write!(f, "Str"),
            Ty::Class(name) => write!(f, "{}", name),
            Ty::Fun(sigs) => match sigs.as_slice() {
                [] => write!(f, "fn<uncallable>"),
                [sig] => write!(f, "{}", display_signature(sig)),
                _ => write!(f, "fn<{} overloads>", sigs.len()),
            },
            Ty::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", m)?;
                }
                Ok(())
            }
        }
    }
}

fn display_signature(sig: &Signature) -> String {
    let params: Vec<&str> = sig.params.iter().map(|p| p.name.as_str()).collect();
    match sig.receiver {
        ReceiverConvention::Bare => format!("bare fn({})", params.join(", ")),
        ReceiverConvention::Bound => {
            if params.is_empty() {
                "fn(self)".to_string()
            } else {
                format!("fn(self, {})", params.join(", "))
            }
        }
        ReceiverConvention::None | ReceiverConvention::Mixed => {
            format!("fn({})", params.join(", "))
        }
    }
}
