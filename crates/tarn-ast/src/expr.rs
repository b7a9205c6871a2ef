//! Expression nodes.
//!
//! Every expression carries its [`NodeId`] (the key into checker fact
//! tables) and its source [`Span`]. Nodes manufactured during lowering use
//! `NodeId::SYNTHETIC` and a synthetic span; the checker knows nothing about
//! them.

use serde::Serialize;
use tarn_common::{NodeId, Span, SymbolId};

/// A source expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

/// The expression grammar handled by lowering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// The absent value.
    Nil,
    True,
    False,
    Int(i64),
    Float(f64),
    Str(String),
    /// A resolved name reference.
    Name(NameRef),
    /// The enclosing object, inside a method body.
    This,
    /// Property access: `object.field`.
    Member { object: Box<Expr>, field: String },
    /// A binary operation.
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A call or constructor invocation.
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// A conditional expression: `if cond then a else b`.
    ///
    /// The target language has no expression-level conditional, so these
    /// lower to a temporary plus an `if` statement.
    If {
        cond: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// A variadic unpack: `...inner` in an argument or list position.
    Spread(Box<Expr>),
}

/// A name reference resolved to a binding.
///
/// `guard` marks references synthesized by optional-chain lowering: they
/// point at a short-circuit temp that has already been evaluated and
/// nil-checked, so re-reading them cannot observe new effects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
    pub text: String,
    pub symbol: Option<SymbolId>,
    pub guard: bool,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
}

impl Expr {
    /// Create an expression node.
    pub fn new(id: NodeId, span: Span, kind: ExprKind) -> Self {
        Expr { id, span, kind }
    }

    /// A `this` reference manufactured during lowering (no checker facts).
    pub fn synthetic_this() -> Self {
        Expr {
            id: NodeId::SYNTHETIC,
            span: Span::synthetic(),
            kind: ExprKind::This,
        }
    }

    /// A plain (non-guard) name reference.
    pub fn name(id: NodeId, span: Span, text: impl Into<String>, symbol: Option<SymbolId>) -> Self {
        Expr::new(
            id,
            span,
            ExprKind::Name(NameRef {
                text: text.into(),
                symbol,
                guard: false,
            }),
        )
    }

    /// Whether this node is a variadic unpack.
    pub fn is_spread(&self) -> bool {
        matches!(self.kind, ExprKind::Spread(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_this_has_no_checker_identity() {
        let e = Expr::synthetic_this();
        assert!(e.id.is_synthetic());
        assert_eq!(e.kind, ExprKind::This);
    }

    #[test]
    fn spread_detection() {
        let inner = Expr::name(NodeId(0), Span::new(3, 4), "xs", None);
        let spread = Expr::new(
            NodeId(1),
            Span::new(0, 4),
            ExprKind::Spread(Box::new(inner)),
        );
        assert!(spread.is_spread());
        assert!(!Expr::synthetic_this().is_spread());
    }
}
