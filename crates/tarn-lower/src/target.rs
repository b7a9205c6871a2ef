//! Target-language AST.
//!
//! The nodes lowering produces: a small expression/statement grammar for a
//! dynamically-typed, table-based scripting target. `local` declarations
//! bind once; calls and unpacks are multi-valued, expanding in the final
//! position of an argument list and truncating to one value elsewhere.

use serde::Serialize;
use tarn_common::SymbolId;

/// A target identifier.
///
/// Compiler-generated temporaries carry `SymbolId::TEMP`; identifiers
/// lowered from source names keep their source symbol for identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TIdent {
    pub text: String,
    pub symbol: Option<SymbolId>,
}

impl TIdent {
    /// An identifier without binding information (library names, `self`).
    pub fn new(text: impl Into<String>) -> TIdent {
        TIdent { text: text.into(), symbol: None }
    }

    /// A compiler-generated temporary.
    pub fn temp(text: impl Into<String>) -> TIdent {
        TIdent {
            text: text.into(),
            symbol: Some(SymbolId::TEMP),
        }
    }

    /// Whether this identifier is a compiler-generated temporary.
    pub fn is_temp(&self) -> bool {
        self.symbol.is_some_and(|s| s.is_temp())
    }
}

/// Binary operators in the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TBinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
}

/// A target expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TExpr {
    Nil,
    True,
    False,
    Int(i64),
    Float(f64),
    Str(String),
    Ident(TIdent),
    Binary {
        op: TBinOp,
        lhs: Box<TExpr>,
        rhs: Box<TExpr>,
    },
    /// Table index: `object[key]`.
    Index {
        object: Box<TExpr>,
        key: Box<TExpr>,
    },
    Call {
        callee: Box<TExpr>,
        args: Vec<TExpr>,
    },
    /// Multi-value expansion of a list value.
    Unpack(Box<TExpr>),
}

impl TExpr {
    /// An identifier expression.
    pub fn ident(text: impl Into<String>) -> TExpr {
        TExpr::Ident(TIdent::new(text))
    }

    /// A call expression.
    pub fn call(callee: TExpr, args: Vec<TExpr>) -> TExpr {
        TExpr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// Whether this expression is a literal (safe to duplicate or reorder).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TExpr::Nil
                | TExpr::True
                | TExpr::False
                | TExpr::Int(_)
                | TExpr::Float(_)
                | TExpr::Str(_)
        )
    }

    /// Whether this expression is a compiler-generated temporary reference.
    pub fn is_temp_ident(&self) -> bool {
        matches!(self, TExpr::Ident(id) if id.is_temp())
    }
}

/// A target statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TStmt {
    /// `local name` or `local name = value`. Bound once, never reassigned
    /// by lowering except through an explicit [`TStmt::Assign`] to a
    /// forward-declared conditional temp.
    Local {
        name: TIdent,
        value: Option<TExpr>,
    },
    /// `target = value`.
    Assign { target: TExpr, value: TExpr },
    /// An expression evaluated for its effects.
    Expression(TExpr),
    /// `if cond then ... else ... end`.
    If {
        cond: TExpr,
        then_body: Vec<TStmt>,
        else_body: Vec<TStmt>,
    },
}
